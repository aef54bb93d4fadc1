//! Scroll animation controller.
//!
//! All timing flows through the `Instant` the caller passes in; the
//! controller never reads the clock itself, so tests can drive it with
//! synthetic timestamps.

use std::time::{Duration, Instant};

use studydeck_core::config::{EasingType, ScrollConfig};

use super::easing::ease;

#[derive(Debug, Clone)]
struct Animation {
    started: Instant,
    from: u16,
    to: u16,
    duration: Duration,
    easing: EasingType,
}

impl Animation {
    fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (now.duration_since(self.started).as_secs_f64() / self.duration.as_secs_f64())
            .clamp(0.0, 1.0)
    }

    fn is_done(&self, now: Instant) -> bool {
        now.duration_since(self.started) >= self.duration
    }

    fn position(&self, now: Instant) -> u16 {
        let t = ease(self.easing, self.progress(now));
        let from = f64::from(self.from);
        let to = f64::from(self.to);
        (from + (to - from) * t).round() as u16
    }
}

/// Smooth scroll state for one scrollable view.
///
/// `scroll_by` deltas are batched and folded into a single animation on the
/// next `update`, which keeps rapid key repeats from restarting the curve
/// on every press.
#[derive(Debug, Clone)]
pub struct ScrollAnimator {
    config: ScrollConfig,
    animation: Option<Animation>,
    current: u16,
    pending_delta: i32,
}

impl ScrollAnimator {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            animation: None,
            current: 0,
            pending_delta: 0,
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// True while there is work left: an active animation or batched deltas.
    /// The event loop uses this to switch to the animation frame rate.
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.animation.is_some() || self.pending_delta != 0
    }

    #[inline]
    pub fn current(&self) -> u16 {
        self.current
    }

    /// Final position once the active animation (if any) lands.
    pub fn target(&self) -> u16 {
        self.animation
            .as_ref()
            .map_or(self.current, |anim| anim.to)
    }

    /// Jump without animating.
    pub fn set(&mut self, scroll: u16) {
        self.animation = None;
        self.pending_delta = 0;
        self.current = scroll;
    }

    /// Animate to `target`, aligning it with the top of the viewport.
    /// Jumps instantly when smoothing is disabled.
    pub fn scroll_to(&mut self, target: u16, max_scroll: u16, now: Instant) {
        let target = target.min(max_scroll);

        if !self.is_smooth() {
            self.set(target);
            return;
        }

        if target == self.current {
            self.animation = None;
            return;
        }

        self.animation = Some(Animation {
            started: now,
            from: self.current,
            to: target,
            duration: self.duration(),
            easing: self.config.easing,
        });
    }

    /// Queue a scroll by `delta` rows (positive is down). Batched until the
    /// next `update`.
    pub fn scroll_by(&mut self, delta: i32, max_scroll: u16) {
        if !self.is_smooth() {
            let stepped = i32::from(self.current) + delta * i32::from(self.config.scroll_lines);
            self.current = stepped.clamp(0, i32::from(max_scroll)) as u16;
            self.animation = None;
            return;
        }
        self.pending_delta += delta;
    }

    pub fn scroll_half_page(&mut self, viewport_height: u16, down: bool, max_scroll: u16) {
        let rows = i32::from((viewport_height / 2).max(1));
        self.scroll_by(if down { rows } else { -rows }, max_scroll);
    }

    /// Fold batched deltas into the animation, advance it, and return the
    /// interpolated position for this frame.
    pub fn update(&mut self, now: Instant, max_scroll: u16) -> u16 {
        if self.pending_delta != 0 {
            let target = (i32::from(self.target()) + self.pending_delta)
                .clamp(0, i32::from(max_scroll)) as u16;
            self.pending_delta = 0;

            if target != self.current {
                self.animation = Some(Animation {
                    started: now,
                    from: self.current,
                    to: target,
                    duration: self.duration(),
                    easing: self.config.easing,
                });
            }
        }

        if let Some(ref anim) = self.animation {
            if anim.is_done(now) {
                self.current = anim.to.min(max_scroll);
                self.animation = None;
            } else {
                self.current = anim.position(now).min(max_scroll);
            }
        }

        self.current
    }

    fn duration(&self) -> Duration {
        Duration::from_millis(self.config.animation_duration_ms)
    }

    fn is_smooth(&self) -> bool {
        self.config.smooth_enabled && self.config.animation_duration_ms > 0
    }
}
