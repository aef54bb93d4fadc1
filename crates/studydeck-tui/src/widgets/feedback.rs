//! Loading / error / success presenters for a dashboard panel.
//!
//! Each call synchronously replaces the target area's content; no state is
//! kept between calls, so calling another presenter on the same area simply
//! overwrites it. Messages are drawn verbatim; a terminal paragraph carries
//! no markup, so there is nothing to escape.

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph, Widget, Wrap};

use crate::theme::Theme;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Current spinner glyph for a tick counter.
pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

pub struct FeedbackWidget;

impl FeedbackWidget {
    /// Replace `area` with a centered spinner.
    pub fn loading(area: Rect, buf: &mut Buffer, theme: &Theme, tick: usize) {
        let line = Line::from(vec![
            Span::styled(spinner_frame(tick), Style::default().fg(theme.accent)),
            Span::styled(" Loading...", Style::default().fg(theme.grey2)),
        ]);
        Self::replace(area, buf, line);
    }

    /// Replace `area` with an error banner and the caller's message.
    pub fn error(area: Rect, buf: &mut Buffer, theme: &Theme, message: &str) {
        let line = Line::from(vec![
            Span::styled(
                "⚠ ",
                Style::default()
                    .fg(theme.error)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(message.to_string(), Style::default().fg(theme.fg0)),
        ]);
        Self::replace(area, buf, line);
    }

    /// Replace `area` with a success banner and the caller's message.
    pub fn success(area: Rect, buf: &mut Buffer, theme: &Theme, message: &str) {
        let line = Line::from(vec![
            Span::styled(
                "✓ ",
                Style::default()
                    .fg(theme.success)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(message.to_string(), Style::default().fg(theme.fg0)),
        ]);
        Self::replace(area, buf, line);
    }

    fn replace(area: Rect, buf: &mut Buffer, line: Line) {
        Clear.render(area, buf);

        // Center vertically; the paragraph centers horizontally.
        let y = area.y + area.height / 2;
        let target = Rect::new(area.x, y.min(area.bottom().saturating_sub(1)), area.width, 1)
            .intersection(area);

        Paragraph::new(line)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(target, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_cycles_through_frames() {
        assert_eq!(spinner_frame(0), SPINNER_FRAMES[0]);
        assert_eq!(spinner_frame(9), SPINNER_FRAMES[9]);
        assert_eq!(spinner_frame(10), SPINNER_FRAMES[0]);
    }

    #[test]
    fn presenters_overwrite_prior_content() {
        let area = Rect::new(0, 0, 30, 5);
        let mut buf = Buffer::empty(area);
        let theme = Theme::default();

        FeedbackWidget::loading(area, &mut buf, &theme, 0);
        FeedbackWidget::error(area, &mut buf, &theme, "server unreachable");

        let rendered = buffer_text(&buf);
        assert!(rendered.contains("server unreachable"));
        assert!(!rendered.contains("Loading"));
    }

    #[test]
    fn success_renders_message_verbatim() {
        let area = Rect::new(0, 0, 40, 3);
        let mut buf = Buffer::empty(area);
        let theme = Theme::default();

        FeedbackWidget::success(area, &mut buf, &theme, "<b>saved</b>");
        assert!(buffer_text(&buf).contains("<b>saved</b>"));
    }

    fn buffer_text(buf: &Buffer) -> String {
        let mut text = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                if let Some(cell) = buf.cell((x, y)) {
                    text.push_str(cell.symbol());
                }
            }
            text.push('\n');
        }
        text
    }
}
