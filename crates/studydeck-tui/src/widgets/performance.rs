use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::Widget;

use studydeck_core::api::models::PerformanceData;
use studydeck_core::format::format_date;

use super::charts::{bar_chart, line_chart, ChartOptions, LineSeries};
use crate::theme::Theme;

pub struct PerformanceWidget;

impl PerformanceWidget {
    /// Recent-session charts: study hours as a line, quiz scores as bars.
    pub fn render(area: Rect, buf: &mut Buffer, perf: &PerformanceData, theme: &Theme) {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
            .split(area);

        let points: Vec<(f64, f64)> = perf
            .study_hours
            .iter()
            .enumerate()
            .map(|(i, hours)| (i as f64, *hours))
            .collect();
        let series = [LineSeries {
            name: "hours",
            points: &points,
        }];
        line_chart("Study Hours", &series, ChartOptions::default(), theme).render(halves[0], buf);

        // Bars are labeled with the session's short date ("Jan 5").
        let labels: Vec<String> = perf
            .dates
            .iter()
            .map(|date| short_date(date))
            .collect();
        let values: Vec<(&str, u64)> = labels
            .iter()
            .map(String::as_str)
            .zip(perf.quiz_scores.iter().map(|score| score.round() as u64))
            .collect();
        bar_chart(
            "Quiz Scores",
            &values,
            ChartOptions {
                bar_width: Some(6),
                ..ChartOptions::default()
            },
            theme,
        )
        .render(halves[1], buf);
    }
}

/// "2024-01-05" -> "Jan 5"; unparseable dates keep the sentinel visible.
fn short_date(date: &str) -> String {
    let formatted = format_date(date);
    formatted
        .split_once(',')
        .map_or(formatted.clone(), |(day, _)| day.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_date_strips_the_year() {
        assert_eq!(short_date("2024-01-05"), "Jan 5");
        assert_eq!(short_date("nonsense"), "Invalid Date");
    }

    #[test]
    fn renders_both_charts() {
        let perf = PerformanceData {
            dates: vec!["2024-01-03".into(), "2024-01-04".into()],
            study_hours: vec![2.0, 3.5],
            quiz_scores: vec![80.0, 85.0],
        };
        let area = Rect::new(0, 0, 80, 14);
        let mut buf = Buffer::empty(area);
        PerformanceWidget::render(area, &mut buf, &perf, &Theme::default());

        let text: String = (0..area.height)
            .map(|y| {
                (0..area.width)
                    .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n");
        assert!(text.contains("Study Hours"));
        assert!(text.contains("Quiz Scores"));
        assert!(text.contains("Jan 3"));
    }
}
