//! The scrollable dashboard page.
//!
//! Sections are rendered into an off-screen buffer at their content-row
//! positions, then the rows under the scroll window are blitted onto the
//! frame. That gives row-exact smooth scrolling and lets the reveal
//! tracker shift and dim whole sections while they animate in.

use std::time::Instant;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::Frame;

use crate::app::{App, PanelState, Section};
use crate::widgets::clusters::ClustersWidget;
use crate::widgets::feedback::FeedbackWidget;
use crate::widgets::overview::OverviewWidget;
use crate::widgets::performance::PerformanceWidget;
use crate::widgets::recommendations::RecommendationsWidget;

pub struct DashboardWidget;

impl DashboardWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, now: Instant) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let layout = app.section_layout();
        let content_height = app.content_height().max(1);
        let content_area = Rect::new(0, 0, area.width, content_height);
        let mut content = Buffer::empty(content_area);

        for (idx, span) in layout.iter().enumerate() {
            let visibility = app.reveal.visibility(idx, now);
            if visibility.hidden {
                continue;
            }

            let top = span.top + visibility.offset_rows;
            if top >= content_height {
                continue;
            }
            let height = span.height.min(content_height - top);
            let rect = Rect::new(0, top, area.width, height);

            Self::render_section(span.section, rect, &mut content, app);

            if visibility.dimmed {
                content.set_style(rect, Style::default().add_modifier(Modifier::DIM));
            }
        }

        blit(&content, frame.buffer_mut(), area, app.scroll.current());
    }

    fn render_section(section: Section, rect: Rect, buf: &mut Buffer, app: &App) {
        let theme = &app.theme;
        match section {
            Section::Overview => match &app.stats {
                PanelState::Loading => {
                    FeedbackWidget::loading(rect, buf, theme, app.spinner_tick);
                }
                PanelState::Failed(message) => FeedbackWidget::error(rect, buf, theme, message),
                PanelState::Ready(stats) => OverviewWidget::render(rect, buf, stats, theme),
            },
            Section::Performance => match &app.report {
                PanelState::Loading => {
                    FeedbackWidget::loading(rect, buf, theme, app.spinner_tick);
                }
                PanelState::Failed(message) => FeedbackWidget::error(rect, buf, theme, message),
                PanelState::Ready(report) => match &report.performance_data {
                    Some(perf) if !perf.study_hours.is_empty() => {
                        PerformanceWidget::render(rect, buf, perf, theme);
                    }
                    _ => FeedbackWidget::success(
                        rect,
                        buf,
                        theme,
                        "Log sessions to chart your progress",
                    ),
                },
            },
            Section::Clusters => match &app.insights {
                PanelState::Loading => {
                    FeedbackWidget::loading(rect, buf, theme, app.spinner_tick);
                }
                PanelState::Failed(message) => FeedbackWidget::error(rect, buf, theme, message),
                PanelState::Ready(insights) => {
                    ClustersWidget::render(rect, buf, insights, theme);
                }
            },
            Section::Recommendations => match &app.report {
                PanelState::Loading => {
                    FeedbackWidget::loading(rect, buf, theme, app.spinner_tick);
                }
                PanelState::Failed(message) => FeedbackWidget::error(rect, buf, theme, message),
                PanelState::Ready(report) => RecommendationsWidget::render(
                    rect,
                    buf,
                    report,
                    &app.filtered_tools(),
                    &app.filter_applied,
                    theme,
                ),
            },
        }
    }
}

/// Copy the rows of `content` under the scroll window onto `dst` at `area`.
fn blit(content: &Buffer, dst: &mut Buffer, area: Rect, scroll: u16) {
    for row in 0..area.height {
        let src_y = scroll + row;
        if src_y >= content.area.height {
            break;
        }
        for col in 0..area.width {
            if let Some(cell) = content.cell((col, src_y)) {
                if let Some(target) = dst.cell_mut((area.x + col, area.y + row)) {
                    *target = cell.clone();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blit_respects_scroll_offset() {
        let content_area = Rect::new(0, 0, 4, 6);
        let mut content = Buffer::empty(content_area);
        for y in 0..6u16 {
            let digit = char::from_digit(u32::from(y), 10).unwrap();
            for x in 0..4u16 {
                if let Some(cell) = content.cell_mut((x, y)) {
                    cell.set_char(digit);
                }
            }
        }

        let dst_area = Rect::new(1, 1, 4, 3);
        let mut dst = Buffer::empty(Rect::new(0, 0, 6, 5));
        blit(&content, &mut dst, dst_area, 2);

        assert_eq!(dst.cell((1, 1)).unwrap().symbol(), "2");
        assert_eq!(dst.cell((1, 3)).unwrap().symbol(), "4");
        // Outside the target area stays untouched.
        assert_eq!(dst.cell((0, 0)).unwrap().symbol(), " ");
    }

    #[test]
    fn blit_stops_at_content_end() {
        let content = Buffer::empty(Rect::new(0, 0, 2, 2));
        let mut dst = Buffer::empty(Rect::new(0, 0, 2, 4));
        blit(&content, &mut dst, Rect::new(0, 0, 2, 4), 1);
        // Only one content row exists below scroll=1; no panic, no spill.
        assert_eq!(dst.cell((0, 2)).unwrap().symbol(), " ");
    }
}
