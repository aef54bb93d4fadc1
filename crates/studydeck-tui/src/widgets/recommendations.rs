use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Widget, Wrap};

use studydeck_core::api::models::RecommendationReport;
use studydeck_core::format::format_f64;

use crate::theme::Theme;

pub struct RecommendationsWidget;

impl RecommendationsWidget {
    pub fn render(
        area: Rect,
        buf: &mut Buffer,
        report: &RecommendationReport,
        filtered_tools: &[&str],
        filter: &str,
        theme: &Theme,
    ) {
        let block = Block::default()
            .title(" Recommendations ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.grey0));
        let inner = block.inner(area);
        block.render(area, buf);

        if !report.is_ready() {
            // Until three sessions are logged the service only sends a hint.
            let hint = report
                .message
                .as_deref()
                .unwrap_or("No recommendations yet");
            Paragraph::new(Line::from(Span::styled(
                hint,
                Style::default().fg(theme.grey2),
            )))
            .wrap(Wrap { trim: true })
            .render(inner, buf);
            return;
        }

        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
            .split(inner);

        let mut lines = vec![Line::from(vec![
            Span::styled(
                report.cluster_name.as_deref().unwrap_or("Unknown cluster"),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
        ])];
        if let Some(description) = &report.cluster_description {
            lines.push(Line::from(Span::styled(
                description.clone(),
                Style::default().fg(theme.grey2),
            )));
        }
        lines.push(Line::from(""));
        if let Some(method) = &report.suggested_method {
            lines.push(detail_line("Method", method.clone(), theme));
        }
        if let Some(hours) = report.recommended_hours {
            lines.push(detail_line(
                "Daily hours",
                format_f64(hours, 1),
                theme,
            ));
        }
        if let Some(minutes) = report.break_interval {
            lines.push(detail_line("Break every", format!("{minutes} min"), theme));
        }
        if let Some(time) = &report.preferred_time {
            lines.push(detail_line("Best time", time.clone(), theme));
        }
        if !report.weekly_schedule.is_empty() {
            lines.push(Line::from(""));
            let schedule: Vec<Span> = report
                .weekly_schedule
                .iter()
                .flat_map(|day| {
                    vec![
                        Span::styled(
                            format!("{} ", day.day),
                            Style::default().fg(theme.grey2),
                        ),
                        Span::styled(
                            format!("{}h  ", format_f64(day.hours, 1)),
                            Style::default().fg(theme.fg1),
                        ),
                    ]
                })
                .collect();
            lines.push(Line::from(schedule));
        }
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(halves[0], buf);

        let title = if filter.is_empty() {
            " Tools ".to_string()
        } else {
            format!(" Tools /{filter} ")
        };
        let items: Vec<ListItem> = filtered_tools
            .iter()
            .map(|tool| {
                ListItem::new(Line::from(vec![
                    Span::styled("▸ ", Style::default().fg(theme.accent)),
                    Span::styled((*tool).to_string(), Style::default().fg(theme.fg0)),
                ]))
            })
            .collect();
        let list = List::new(items).block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.grey0)),
        );
        Widget::render(list, halves[1], buf);
    }
}

fn detail_line(label: &str, value: String, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(theme.grey2)),
        Span::styled(value, Style::default().fg(theme.fg0)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_text(buf: &Buffer) -> String {
        (0..buf.area.height)
            .map(|y| {
                (0..buf.area.width)
                    .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn shows_hint_until_recommendations_exist() {
        let report: RecommendationReport = serde_json::from_value(serde_json::json!({
            "success": true,
            "has_recommendations": false,
            "message": "Log at least 3 study sessions to get personalized recommendations"
        }))
        .unwrap();

        let area = Rect::new(0, 0, 70, 8);
        let mut buf = Buffer::empty(area);
        RecommendationsWidget::render(area, &mut buf, &report, &[], "", &Theme::default());
        assert!(buffer_text(&buf).contains("3 study sessions"));
    }

    #[test]
    fn renders_profile_details_and_filtered_tools() {
        let report: RecommendationReport = serde_json::from_value(serde_json::json!({
            "success": true,
            "has_recommendations": true,
            "cluster_name": "Focused Studiers",
            "recommended_hours": 3.5,
            "break_interval": 25,
            "suggested_method": "Pomodoro Technique",
            "recommended_tools": ["Pomodoro Timer", "Focus Music", "Digital Notes"],
            "weekly_schedule": [{"day": "Mon", "hours": 3.2}]
        }))
        .unwrap();

        let area = Rect::new(0, 0, 90, 16);
        let mut buf = Buffer::empty(area);
        RecommendationsWidget::render(
            area,
            &mut buf,
            &report,
            &["Pomodoro Timer"],
            "timer",
            &Theme::default(),
        );

        let text = buffer_text(&buf);
        assert!(text.contains("Focused Studiers"));
        assert!(text.contains("Pomodoro Timer"));
        assert!(!text.contains("Focus Music"));
        assert!(text.contains("/timer"));
        assert!(text.contains("3.2h"));
    }
}
