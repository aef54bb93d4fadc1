use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use studydeck_core::api::models::StudentStats;
use studydeck_core::format::format_f64;

use crate::theme::Theme;

pub struct OverviewWidget;

impl OverviewWidget {
    pub fn render(area: Rect, buf: &mut Buffer, stats: &StudentStats, theme: &Theme) {
        let block = Block::default()
            .title(" Overview ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.grey0));
        let inner = block.inner(area);
        block.render(area, buf);

        let tiles = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 4),
                Constraint::Ratio(1, 4),
                Constraint::Ratio(1, 4),
                Constraint::Ratio(1, 4),
            ])
            .split(inner);

        tile(
            tiles[0],
            buf,
            "Sessions",
            stats.total_sessions.to_string(),
            theme.blue,
            theme,
        );
        tile(
            tiles[1],
            buf,
            "Hours",
            format_f64(stats.total_hours, 1),
            theme.green,
            theme,
        );
        tile(
            tiles[2],
            buf,
            "Avg Score",
            format_f64(stats.avg_score, 1),
            theme.yellow,
            theme,
        );
        tile(
            tiles[3],
            buf,
            "Streak",
            format!("{}d", stats.current_streak),
            theme.orange,
            theme,
        );
    }
}

fn tile(area: Rect, buf: &mut Buffer, label: &str, value: String, accent: Color, theme: &Theme) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            value,
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(label, Style::default().fg(theme.grey2))),
    ];
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(area, buf);
}
