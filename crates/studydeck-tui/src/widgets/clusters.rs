use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use studydeck_core::api::models::ClusteringInsights;
use studydeck_core::format::format_f64;

use super::charts::{doughnut_chart, DoughnutSlice};
use crate::theme::Theme;

pub struct ClustersWidget;

impl ClustersWidget {
    /// Cluster landscape: a doughnut of average session length per cluster
    /// next to the profile summaries.
    pub fn render(area: Rect, buf: &mut Buffer, insights: &ClusteringInsights, theme: &Theme) {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(3, 5), Constraint::Ratio(2, 5)])
            .split(area);

        let slices: Vec<DoughnutSlice> = insights
            .cluster_profiles
            .values()
            .map(|profile| DoughnutSlice {
                label: profile.name.clone(),
                value: profile.avg_study_duration,
            })
            .collect();
        doughnut_chart("Cluster Landscape", &slices, theme).render(halves[0], buf);

        let title = format!(
            " Profiles ({} students, quality {}%) ",
            insights.total_students,
            format_f64(insights.data_quality, 0)
        );
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.grey0));
        let inner = block.inner(halves[1]);
        block.render(halves[1], buf);

        let palette = theme.chart_palette();
        let mut lines = Vec::new();
        for (i, profile) in insights.cluster_profiles.values().enumerate() {
            lines.push(Line::from(vec![
                Span::styled("● ", Style::default().fg(palette[i % palette.len()])),
                Span::styled(
                    profile.name.clone(),
                    Style::default()
                        .fg(theme.fg0)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
            lines.push(Line::from(Span::styled(
                format!(
                    "  {} · quiz {} · {}",
                    profile.suggested_method,
                    format_f64(profile.quiz_performance, 0),
                    profile.preferred_time
                ),
                Style::default().fg(theme.grey2),
            )));
        }
        Paragraph::new(lines).render(inner, buf);
    }
}
