use std::sync::Arc;
use std::time::{Duration, Instant};

use studydeck_core::api::models::{ClusteringInsights, RecommendationReport, StudentStats};
use studydeck_core::rate::{Debouncer, Throttle};
use studydeck_core::{AppConfig, Storage};

use crate::event::FetchResult;
use crate::notify::{NotificationKind, NotificationStack};
use crate::reveal::RevealTracker;
use crate::scroll::{AnchorMap, ScrollAnimator};
use crate::theme::Theme;

/// Storage key for the persisted recommendation filter
const FILTER_KEY: &str = "dashboard.filter";

const FILTER_DEBOUNCE: Duration = Duration::from_millis(300);
const REFRESH_THROTTLE: Duration = Duration::from_millis(2000);

/// Lifecycle of one dashboard panel's data
pub enum PanelState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> PanelState<T> {
    pub fn as_ready(&self) -> Option<&T> {
        match self {
            PanelState::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Normal browsing mode
    Normal,
    /// Typing into the recommendation filter
    Filter,
}

/// Dashboard sections, in page order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Overview,
    Performance,
    Clusters,
    Recommendations,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Overview,
        Section::Performance,
        Section::Clusters,
        Section::Recommendations,
    ];

    pub fn anchor(self) -> &'static str {
        match self {
            Section::Overview => "#overview",
            Section::Performance => "#performance",
            Section::Clusters => "#clusters",
            Section::Recommendations => "#recommendations",
        }
    }
}

/// A section's place in the scrollable content, in content rows
#[derive(Debug, Clone, Copy)]
pub struct SectionSpan {
    pub section: Section,
    pub top: u16,
    pub height: u16,
}

/// Application state
pub struct App {
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    /// Best-effort persistence for small bits of UI state
    pub storage: Storage,

    pub stats: PanelState<StudentStats>,
    pub report: PanelState<RecommendationReport>,
    pub insights: PanelState<ClusteringInsights>,

    pub notifications: NotificationStack,
    pub scroll: ScrollAnimator,
    pub anchors: AnchorMap,
    pub reveal: RevealTracker,

    pub mode: Mode,
    /// Filter text as typed
    pub filter_input: String,
    /// Filter actually applied to the tools list (trails typing)
    pub filter_applied: String,
    filter_debounce: Debouncer<String>,
    refresh_throttle: Throttle,

    pub spinner_tick: usize,
    pub is_refreshing: bool,
    pending_fetches: u8,
    refresh_errors: u8,
    pub should_quit: bool,
    pub status_message: Option<String>,
    pub viewport_height: u16,
}

impl App {
    pub fn new(config: Arc<AppConfig>, theme: Theme, storage: Storage) -> Self {
        let filter: String = storage.get(FILTER_KEY).unwrap_or_default();
        let scroll = ScrollAnimator::new(config.ui.scroll.clone());
        let reveal = RevealTracker::new(config.ui.reveal.clone());

        let mut app = Self {
            config,
            theme,
            storage,
            stats: PanelState::Loading,
            report: PanelState::Loading,
            insights: PanelState::Loading,
            notifications: NotificationStack::new(),
            scroll,
            anchors: AnchorMap::new(),
            reveal,
            mode: Mode::Normal,
            filter_input: filter.clone(),
            filter_applied: filter,
            filter_debounce: Debouncer::new(FILTER_DEBOUNCE),
            refresh_throttle: Throttle::new(REFRESH_THROTTLE),
            spinner_tick: 0,
            is_refreshing: false,
            pending_fetches: 0,
            refresh_errors: 0,
            should_quit: false,
            status_message: None,
            viewport_height: 0,
        };
        app.reveal.track(Section::ALL.len());
        app.rebuild_anchors();
        app
    }

    /// Section geometry of the scrollable dashboard page.
    pub fn section_layout(&self) -> Vec<SectionSpan> {
        let mut spans = Vec::with_capacity(Section::ALL.len());
        let mut top = 0u16;
        for section in Section::ALL {
            let height = self.section_height(section);
            spans.push(SectionSpan {
                section,
                top,
                height,
            });
            top += height + 1;
        }
        spans
    }

    fn section_height(&self, section: Section) -> u16 {
        match section {
            Section::Overview => 7,
            Section::Performance => 14,
            Section::Clusters => 14,
            Section::Recommendations => {
                match self.report.as_ready() {
                    Some(report) if report.is_ready() => {
                        12 + (report.recommended_tools.len() as u16).min(6)
                    }
                    _ => 8,
                }
            }
        }
    }

    pub fn content_height(&self) -> u16 {
        self.section_layout()
            .last()
            .map_or(0, |span| span.top + span.height + 1)
    }

    pub fn max_scroll(&self) -> u16 {
        self.content_height().saturating_sub(self.viewport_height)
    }

    /// Rebuild the anchor registry from the current layout. Called when the
    /// view is (re)constructed; section moves in between are not picked up.
    pub fn rebuild_anchors(&mut self) {
        self.anchors.clear();
        for span in self.section_layout() {
            self.anchors.insert(span.section.anchor(), span.top);
        }
    }

    /// Per-frame bookkeeping: advance scroll, feed the reveal observer.
    pub fn update_frame(&mut self, now: Instant, viewport_height: u16) {
        self.viewport_height = viewport_height;
        let max_scroll = self.max_scroll();
        self.scroll.update(now, max_scroll);

        let spans: Vec<(u16, u16)> = self
            .section_layout()
            .iter()
            .map(|span| (span.top, span.height))
            .collect();
        self.reveal
            .observe(&spans, self.scroll.current(), viewport_height, now);
    }

    /// Idle tick: spinner, notification lifecycles, debounced filter.
    pub fn on_tick(&mut self, now: Instant) {
        self.spinner_tick = self.spinner_tick.wrapping_add(1);
        self.notifications.update(now);

        if let Some(filter) = self.filter_debounce.poll(now) {
            self.apply_filter(filter);
        }
    }

    /// True while anything is animating and the event loop should poll at
    /// the animation frame rate.
    pub fn needs_animation(&self) -> bool {
        self.scroll.needs_update() || self.reveal.is_animating() || self.notifications.has_active()
    }

    // --- refresh -----------------------------------------------------------

    /// Gate a refresh request through the throttle. Returns true when the
    /// caller should actually start fetching.
    pub fn try_refresh(&mut self, now: Instant) -> bool {
        if self.is_refreshing {
            self.status_message = Some("Refresh already in progress...".to_string());
            return false;
        }
        if !self.refresh_throttle.allow(now) {
            // Leading-edge throttle: repeated presses are dropped, not queued
            return false;
        }
        self.begin_refresh();
        true
    }

    pub fn begin_refresh(&mut self) {
        self.is_refreshing = true;
        self.pending_fetches = 3;
        self.refresh_errors = 0;
        self.stats = PanelState::Loading;
        self.report = PanelState::Loading;
        self.insights = PanelState::Loading;
        self.status_message = None;
    }

    /// Fold one completed fetch into the panels; once the last one lands,
    /// notify and rebuild the anchor registry for the new layout.
    pub fn apply_fetch(&mut self, result: FetchResult, now: Instant) {
        match result {
            FetchResult::Stats(Ok(stats)) => self.stats = PanelState::Ready(stats),
            FetchResult::Stats(Err(error)) => {
                tracing::debug!("stats fetch failed: {error}");
                self.stats = PanelState::Failed(error);
                self.refresh_errors += 1;
            }
            FetchResult::Recommendations(Ok(report)) => self.report = PanelState::Ready(report),
            FetchResult::Recommendations(Err(error)) => {
                tracing::debug!("recommendations fetch failed: {error}");
                self.report = PanelState::Failed(error);
                self.refresh_errors += 1;
            }
            FetchResult::Insights(Ok(insights)) => self.insights = PanelState::Ready(insights),
            FetchResult::Insights(Err(error)) => {
                tracing::debug!("insights fetch failed: {error}");
                self.insights = PanelState::Failed(error);
                self.refresh_errors += 1;
            }
        }

        self.pending_fetches = self.pending_fetches.saturating_sub(1);
        if self.pending_fetches == 0 {
            self.is_refreshing = false;
            if self.refresh_errors == 0 {
                self.notifications
                    .push("Dashboard updated", NotificationKind::Success, now);
            } else {
                self.notifications.push(
                    format!("{} dashboard request(s) failed", self.refresh_errors),
                    NotificationKind::Error,
                    now,
                );
            }
            self.refresh_errors = 0;
            self.rebuild_anchors();
        }
    }

    // --- scrolling ---------------------------------------------------------

    pub fn scroll_down(&mut self) {
        self.scroll.scroll_by(1, self.max_scroll());
    }

    pub fn scroll_up(&mut self) {
        self.scroll.scroll_by(-1, self.max_scroll());
    }

    pub fn scroll_half_page(&mut self, down: bool) {
        self.scroll
            .scroll_half_page(self.viewport_height, down, self.max_scroll());
    }

    pub fn jump_to_top(&mut self) {
        self.scroll.set(0);
    }

    pub fn jump_to_bottom(&mut self) {
        self.scroll.set(self.max_scroll());
    }

    /// Smooth-scroll a section's top edge to the top of the viewport.
    pub fn jump_to_section(&mut self, section: Section, now: Instant) {
        if let Some(top) = self.anchors.resolve(section.anchor()) {
            self.scroll.scroll_to(top, self.max_scroll(), now);
        }
    }

    // --- filter ------------------------------------------------------------

    pub fn start_filter(&mut self) {
        self.mode = Mode::Filter;
    }

    pub fn filter_push(&mut self, c: char, now: Instant) {
        self.filter_input.push(c);
        self.filter_debounce
            .call(self.filter_input.clone(), now);
    }

    pub fn filter_backspace(&mut self, now: Instant) {
        self.filter_input.pop();
        self.filter_debounce
            .call(self.filter_input.clone(), now);
    }

    /// Enter applies immediately, skipping the rest of the quiet period.
    pub fn confirm_filter(&mut self) {
        self.mode = Mode::Normal;
        self.apply_filter(self.filter_input.clone());
    }

    /// Escape abandons the edit and restores the applied filter. Re-arming
    /// the debouncer with the restored value supersedes any keystroke still
    /// waiting out its quiet period.
    pub fn cancel_filter(&mut self, now: Instant) {
        self.mode = Mode::Normal;
        self.filter_input = self.filter_applied.clone();
        self.filter_debounce
            .call(self.filter_input.clone(), now);
    }

    fn apply_filter(&mut self, filter: String) {
        if filter != self.filter_applied {
            self.filter_applied = filter;
            self.storage.set(FILTER_KEY, &self.filter_applied);
        }
    }

    /// Recommended tools matching the applied filter.
    pub fn filtered_tools(&self) -> Vec<&str> {
        let Some(report) = self.report.as_ready() else {
            return Vec::new();
        };
        let needle = self.filter_applied.to_lowercase();
        report
            .recommended_tools
            .iter()
            .map(String::as_str)
            .filter(|tool| needle.is_empty() || tool.to_lowercase().contains(&needle))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path().join("state"));
        let app = App::new(
            Arc::new(AppConfig::default()),
            Theme::default(),
            storage,
        );
        (dir, app)
    }

    fn ready_report(tools: &[&str]) -> RecommendationReport {
        serde_json::from_value(serde_json::json!({
            "success": true,
            "has_recommendations": true,
            "cluster_name": "Night Owls",
            "recommended_tools": tools,
        }))
        .unwrap()
    }

    #[test]
    fn anchors_cover_every_section() {
        let (_dir, app) = test_app();
        for section in Section::ALL {
            assert!(app.anchors.resolve(section.anchor()).is_some(), "{section:?}");
        }
    }

    #[test]
    fn layout_is_contiguous_and_ordered() {
        let (_dir, app) = test_app();
        let layout = app.section_layout();
        assert_eq!(layout.len(), 4);
        for pair in layout.windows(2) {
            assert_eq!(pair[1].top, pair[0].top + pair[0].height + 1);
        }
        assert!(app.content_height() > layout[3].top);
    }

    #[test]
    fn fetch_completion_notifies_and_rebuilds_anchors() {
        let (_dir, mut app) = test_app();
        let now = Instant::now();
        let before = app.anchors.resolve("#recommendations").unwrap();

        app.begin_refresh();
        app.apply_fetch(FetchResult::Stats(Ok(StudentStats::default())), now);
        app.apply_fetch(
            FetchResult::Recommendations(Ok(ready_report(&["Pomodoro Timer", "Focus Music"]))),
            now,
        );
        assert!(app.is_refreshing);

        app.apply_fetch(FetchResult::Insights(Ok(ClusteringInsights::default())), now);
        assert!(!app.is_refreshing);
        assert_eq!(app.notifications.len(), 1);

        // Recommendations grew, so its anchor stays put but the page grew.
        assert_eq!(app.anchors.resolve("#recommendations").unwrap(), before);
        assert!(app.report.as_ready().is_some());
    }

    #[test]
    fn failed_fetch_produces_error_notification() {
        let (_dir, mut app) = test_app();
        let now = Instant::now();

        app.begin_refresh();
        app.apply_fetch(FetchResult::Stats(Err("HTTP error 404".to_string())), now);
        app.apply_fetch(FetchResult::Recommendations(Ok(ready_report(&[]))), now);
        app.apply_fetch(FetchResult::Insights(Ok(ClusteringInsights::default())), now);

        let kinds: Vec<_> = app.notifications.iter().map(|n| n.kind).collect();
        assert_eq!(kinds, vec![NotificationKind::Error]);
        assert!(matches!(app.stats, PanelState::Failed(_)));
    }

    #[test]
    fn refresh_is_throttled_leading_edge() {
        let (_dir, mut app) = test_app();
        let t0 = Instant::now();

        assert!(app.try_refresh(t0));
        // Finish the refresh so only the throttle gates the next ones.
        app.apply_fetch(FetchResult::Stats(Err("x".into())), t0);
        app.apply_fetch(FetchResult::Recommendations(Err("x".into())), t0);
        app.apply_fetch(FetchResult::Insights(Err("x".into())), t0);

        assert!(!app.try_refresh(t0 + Duration::from_millis(500)));
        assert!(app.try_refresh(t0 + Duration::from_millis(2500)));
    }

    #[test]
    fn filter_applies_after_quiet_period_and_persists() {
        let (dir, mut app) = test_app();
        let t0 = Instant::now();

        app.start_filter();
        for (i, c) in "timer".chars().enumerate() {
            app.filter_push(c, t0 + Duration::from_millis(i as u64 * 50));
        }
        assert_eq!(app.filter_applied, "");

        // Quiet period after the last keystroke.
        app.on_tick(t0 + Duration::from_millis(4 * 50 + 300));
        assert_eq!(app.filter_applied, "timer");

        // A fresh App over the same storage restores the filter.
        let storage = Storage::new(dir.path().join("state"));
        let restored = App::new(Arc::new(AppConfig::default()), Theme::default(), storage);
        assert_eq!(restored.filter_applied, "timer");
    }

    #[test]
    fn cancel_restores_applied_filter() {
        let (_dir, mut app) = test_app();
        let t0 = Instant::now();

        app.start_filter();
        app.filter_push('x', t0);
        app.confirm_filter();
        assert_eq!(app.filter_applied, "x");

        app.start_filter();
        app.filter_push('y', t0 + Duration::from_millis(1000));
        app.cancel_filter(t0 + Duration::from_millis(1100));
        assert_eq!(app.filter_input, "x");
        assert_eq!(app.filter_applied, "x");

        // The abandoned keystroke never applies, even after its quiet period.
        app.on_tick(t0 + Duration::from_millis(2000));
        assert_eq!(app.filter_applied, "x");
    }

    #[test]
    fn filtered_tools_match_case_insensitively() {
        let (_dir, mut app) = test_app();
        app.report = PanelState::Ready(ready_report(&[
            "Pomodoro Timer",
            "Focus Music",
            "Digital Notes",
        ]));
        app.filter_applied = "timer".to_string();
        assert_eq!(app.filtered_tools(), vec!["Pomodoro Timer"]);

        app.filter_applied.clear();
        assert_eq!(app.filtered_tools().len(), 3);
    }

    #[test]
    fn section_jump_targets_section_top() {
        let (_dir, mut app) = test_app();
        let now = Instant::now();
        app.viewport_height = 10;

        app.jump_to_section(Section::Clusters, now);
        let expected = app.anchors.resolve("#clusters").unwrap();
        assert_eq!(app.scroll.target(), expected.min(app.max_scroll()));
    }
}
