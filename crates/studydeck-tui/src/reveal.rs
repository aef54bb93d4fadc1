//! One-time fade/slide-in of dashboard sections as they scroll into view.
//!
//! The tracker observes each registered section against the viewport,
//! contracted at the bottom by a small margin so a section has to be
//! genuinely entering the page before it animates. Sections are never
//! unobserved once revealed; a later trigger on a revealed entry just
//! re-applies the terminal state, which is a no-op.

use std::time::{Duration, Instant};

use studydeck_core::config::{EasingType, RevealConfig};

use crate::scroll::easing::ease;

/// Rows a section is shifted down by while hidden (slide-in travel).
pub const SLIDE_ROWS: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
enum RevealState {
    Hidden,
    Revealing { started: Instant },
    Revealed,
}

/// How a section should be drawn this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    /// Rows to shift the section down while it slides in
    pub offset_rows: u16,
    /// Dim the section while it fades in
    pub dimmed: bool,
    /// Section has not been triggered yet: draw nothing
    pub hidden: bool,
}

const SHOWN: Visibility = Visibility {
    offset_rows: 0,
    dimmed: false,
    hidden: false,
};

pub struct RevealTracker {
    config: RevealConfig,
    states: Vec<RevealState>,
}

impl RevealTracker {
    pub fn new(config: RevealConfig) -> Self {
        Self {
            config,
            states: Vec::new(),
        }
    }

    /// Declare how many sections are observed. Existing entries keep their
    /// state; new entries start hidden.
    pub fn track(&mut self, count: usize) {
        self.states.resize(count, RevealState::Hidden);
    }

    pub fn tracked(&self) -> usize {
        self.states.len()
    }

    /// Observe all sections against the scrolled viewport.
    ///
    /// `spans` are `(top, height)` pairs in content rows; the window is
    /// `[scroll, scroll + viewport_height - bottom_margin_rows)`. A hidden
    /// section whose visible fraction reaches the threshold starts its
    /// reveal at `now`.
    pub fn observe(&mut self, spans: &[(u16, u16)], scroll: u16, viewport_height: u16, now: Instant) {
        if !self.config.enabled {
            return;
        }

        let window_top = u32::from(scroll);
        let window_bottom = window_top
            + u32::from(viewport_height.saturating_sub(self.config.bottom_margin_rows));

        for (idx, &(top, height)) in spans.iter().enumerate() {
            let Some(state) = self.states.get_mut(idx) else {
                break;
            };

            let fraction = visible_fraction(u32::from(top), u32::from(height), window_top, window_bottom);
            if fraction >= self.config.threshold {
                // Only Hidden entries transition; anything further along is
                // left alone even though observation continues.
                if *state == RevealState::Hidden {
                    *state = RevealState::Revealing { started: now };
                }
            }
        }

        // Settle finished animations.
        let duration = self.duration();
        for state in &mut self.states {
            if let RevealState::Revealing { started } = *state {
                if now.duration_since(started) >= duration {
                    *state = RevealState::Revealed;
                }
            }
        }
    }

    /// How section `idx` should be drawn at `now`.
    pub fn visibility(&self, idx: usize, now: Instant) -> Visibility {
        if !self.config.enabled {
            return SHOWN;
        }

        match self.states.get(idx) {
            None | Some(RevealState::Revealed) => SHOWN,
            Some(RevealState::Hidden) => Visibility {
                offset_rows: SLIDE_ROWS,
                dimmed: true,
                hidden: true,
            },
            Some(RevealState::Revealing { started }) => {
                let progress = self.progress(*started, now);
                let eased = ease(EasingType::Cubic, progress);
                let travel = f64::from(SLIDE_ROWS) * (1.0 - eased);
                Visibility {
                    offset_rows: travel.round() as u16,
                    dimmed: progress < 0.5,
                    hidden: false,
                }
            }
        }
    }

    /// True while any section is mid-reveal.
    pub fn is_animating(&self) -> bool {
        self.states
            .iter()
            .any(|state| matches!(state, RevealState::Revealing { .. }))
    }

    fn progress(&self, started: Instant, now: Instant) -> f64 {
        let duration = self.duration();
        if duration.is_zero() {
            return 1.0;
        }
        (now.duration_since(started).as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    fn duration(&self) -> Duration {
        Duration::from_millis(self.config.duration_ms)
    }
}

/// Fraction of `[top, top+height)` that lies inside `[window_top, window_bottom)`.
fn visible_fraction(top: u32, height: u32, window_top: u32, window_bottom: u32) -> f64 {
    if height == 0 {
        return 0.0;
    }
    let bottom = top + height;
    let overlap_top = top.max(window_top);
    let overlap_bottom = bottom.min(window_bottom);
    if overlap_bottom <= overlap_top {
        return 0.0;
    }
    f64::from(overlap_bottom - overlap_top) / f64::from(height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn tracker() -> RevealTracker {
        let mut tracker = RevealTracker::new(RevealConfig {
            enabled: true,
            threshold: 0.1,
            bottom_margin_rows: 2,
            duration_ms: 600,
        });
        tracker.track(3);
        tracker
    }

    // Three sections of 10 rows stacked top to bottom.
    const SPANS: [(u16, u16); 3] = [(0, 10), (10, 10), (20, 10)];

    #[test]
    fn sections_above_the_fold_reveal_on_first_observe() {
        let t0 = Instant::now();
        let mut tracker = tracker();
        assert_eq!(tracker.tracked(), 3);

        tracker.observe(&SPANS, 0, 14, t0);

        assert!(!tracker.visibility(0, t0).hidden);
        assert!(!tracker.visibility(1, t0).hidden);
        // Third section is entirely below the contracted window.
        assert!(tracker.visibility(2, t0).hidden);
    }

    #[test]
    fn bottom_margin_contracts_the_window() {
        let t0 = Instant::now();
        let mut tracker = tracker();

        // Viewport of 23 rows reaches row 23, but the contracted window
        // stops at 21: only 1 of 10 rows (10%) of section 2 is inside.
        tracker.observe(&SPANS, 0, 23, t0);
        assert!(!tracker.visibility(2, t0).hidden);

        let mut shorter = RevealTracker::new(RevealConfig {
            enabled: true,
            threshold: 0.1,
            bottom_margin_rows: 2,
            duration_ms: 600,
        });
        shorter.track(3);
        shorter.observe(&SPANS, 0, 22, t0);
        assert!(shorter.visibility(2, t0).hidden);
    }

    #[test]
    fn reveal_runs_once_and_stays_settled() {
        let t0 = Instant::now();
        let mut tracker = tracker();

        tracker.observe(&SPANS, 0, 14, t0);
        assert!(tracker.is_animating());

        let mid = tracker.visibility(0, t0 + ms(100));
        assert!(!mid.hidden);

        tracker.observe(&SPANS, 0, 14, t0 + ms(600));
        assert!(!tracker.is_animating());
        assert_eq!(tracker.visibility(0, t0 + ms(600)), SHOWN);

        // Scrolling away and back keeps firing the observer; the entry is
        // already revealed, so nothing changes.
        tracker.observe(&SPANS, 30, 14, t0 + ms(700));
        tracker.observe(&SPANS, 0, 14, t0 + ms(800));
        assert_eq!(tracker.visibility(0, t0 + ms(800)), SHOWN);
    }

    #[test]
    fn slide_offset_shrinks_over_the_animation() {
        let t0 = Instant::now();
        let mut tracker = tracker();

        tracker.observe(&SPANS, 0, 14, t0);
        let early = tracker.visibility(0, t0).offset_rows;
        let late = tracker.visibility(0, t0 + ms(590)).offset_rows;
        assert!(early >= late);
        assert_eq!(tracker.visibility(0, t0 + ms(600)).offset_rows, 0);
    }

    #[test]
    fn disabled_tracker_shows_everything() {
        let mut tracker = RevealTracker::new(RevealConfig {
            enabled: false,
            ..RevealConfig::default()
        });
        tracker.track(2);
        let now = Instant::now();
        tracker.observe(&[(0, 10), (100, 10)], 0, 5, now);
        assert_eq!(tracker.visibility(1, now), SHOWN);
    }
}
