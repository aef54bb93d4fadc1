use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{App, Mode};
use crate::widgets::feedback::spinner_frame;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;

        let mode_str = match app.mode {
            Mode::Normal => "NORMAL".to_string(),
            Mode::Filter => format!("FILTER /{}", app.filter_input),
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {msg}")
        } else if app.is_refreshing {
            format!(" {} Refreshing...", spinner_frame(app.spinner_tick))
        } else {
            format!(" {mode_str}")
        };

        let help_hint = " q:quit j/k:scroll 1-4:sections r:refresh /:filter ";
        let padding_len = area
            .width
            .saturating_sub(status_text.len() as u16 + help_hint.len() as u16)
            as usize;

        let line = Line::from(vec![
            Span::styled(
                status_text,
                Style::default().fg(theme.fg0).bg(theme.bg2),
            ),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(
                help_hint,
                Style::default().fg(theme.grey2).bg(theme.bg2),
            ),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
