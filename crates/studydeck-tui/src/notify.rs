//! Transient notification banners.
//!
//! Each notification runs its own little state machine
//! `Pending -> Visible -> Hiding -> Removed`, advanced by the `Instant` the
//! caller passes to [`NotificationStack::update`]. That keeps the lifecycle
//! off the wall clock and lets tests step through it deterministically.

use std::str::FromStr;
use std::time::{Duration, Instant};

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::theme::Theme;

/// Delay before a fresh banner becomes visible (slide-in lead time)
pub const SHOW_DELAY: Duration = Duration::from_millis(100);
/// How long a banner stays on screen
pub const DISPLAY_DURATION: Duration = Duration::from_millis(3000);
/// Fade-out time before the banner is dropped
pub const FADE_DURATION: Duration = Duration::from_millis(300);

const BANNER_WIDTH: u16 = 38;
const BANNER_HEIGHT: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

impl NotificationKind {
    /// Success gets a check mark; everything else the info glyph.
    pub fn icon(self) -> &'static str {
        match self {
            NotificationKind::Success => "✓",
            _ => "ℹ",
        }
    }

    pub fn color(self, theme: &Theme) -> ratatui::style::Color {
        match self {
            NotificationKind::Info => theme.info,
            NotificationKind::Success => theme.success,
            NotificationKind::Error => theme.error,
        }
    }
}

impl FromStr for NotificationKind {
    type Err = std::convert::Infallible;

    /// Unrecognized kinds fall back to `Info`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "success" => NotificationKind::Success,
            "error" => NotificationKind::Error,
            _ => NotificationKind::Info,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Pending,
    Visible,
    Hiding,
    Removed,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    phase: Phase,
    /// When the current phase was entered
    since: Instant,
}

impl Notification {
    fn new(message: String, kind: NotificationKind, now: Instant) -> Self {
        Self {
            message,
            kind,
            phase: Phase::Pending,
            since: now,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_on_screen(&self) -> bool {
        matches!(self.phase, Phase::Visible | Phase::Hiding)
    }

    /// Advance the state machine up to `now`. Several transitions can
    /// elapse between two frames, so this loops until the phase settles.
    fn advance(&mut self, now: Instant) {
        loop {
            let deadline = match self.phase {
                Phase::Pending => SHOW_DELAY,
                Phase::Visible => DISPLAY_DURATION,
                Phase::Hiding => FADE_DURATION,
                Phase::Removed => return,
            };
            if now.duration_since(self.since) < deadline {
                return;
            }
            self.since += deadline;
            self.phase = match self.phase {
                Phase::Pending => Phase::Visible,
                Phase::Visible => Phase::Hiding,
                Phase::Hiding | Phase::Removed => Phase::Removed,
            };
        }
    }
}

/// All live notifications, stacked in creation order.
///
/// There is no queue, no deduplication and no cap: concurrent pushes each
/// get their own independently timed banner. Rendering clips to the screen,
/// the stack itself does not.
#[derive(Debug, Default)]
pub struct NotificationStack {
    items: Vec<Notification>,
}

impl NotificationStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>, kind: NotificationKind, now: Instant) {
        self.items.push(Notification::new(message.into(), kind, now));
    }

    /// Advance every banner's state machine and drop the removed ones.
    pub fn update(&mut self, now: Instant) {
        for item in &mut self.items {
            item.advance(now);
        }
        self.items.retain(|item| item.phase != Phase::Removed);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True while any banner still has pending phase transitions.
    pub fn has_active(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    /// Draw visible banners stacked from the top-right corner.
    pub fn render(&self, frame: &mut Frame, theme: &Theme) {
        let area = frame.area();
        let width = BANNER_WIDTH.min(area.width);
        let x = area.width.saturating_sub(width);
        let mut y = area.y + 1;

        for item in self.items.iter().filter(|item| item.is_on_screen()) {
            if y + BANNER_HEIGHT > area.height {
                break;
            }
            let rect = Rect::new(x, y, width, BANNER_HEIGHT);
            frame.render_widget(Clear, rect);

            let color = item.kind.color(theme);
            let mut text_style = Style::default().fg(theme.fg0);
            let mut border_style = Style::default().fg(color);
            if item.phase == Phase::Hiding {
                text_style = text_style.add_modifier(Modifier::DIM);
                border_style = border_style.add_modifier(Modifier::DIM);
            }

            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .style(Style::default().bg(theme.bg1));

            let message = clip_to_width(&item.message, usize::from(width).saturating_sub(5));
            let line = Line::from(vec![
                Span::styled(item.kind.icon(), Style::default().fg(color)),
                Span::raw(" "),
                Span::styled(message, text_style),
            ]);

            frame.render_widget(Paragraph::new(line).block(block), rect);
            y += BANNER_HEIGHT;
        }
    }
}

fn clip_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut clipped = String::new();
    for ch in text.chars() {
        if clipped.width() + 1 >= max_width {
            break;
        }
        clipped.push(ch);
    }
    clipped.push('…');
    clipped
}
