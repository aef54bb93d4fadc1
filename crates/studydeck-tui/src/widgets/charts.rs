//! Chart constructors with opinionated defaults.
//!
//! Callers hand over data plus optional overrides; the factory merges them
//! with the dashboard defaults (legend at the top for line charts, none for
//! bar charts, bounds derived from the data) and delegates to ratatui's
//! chart widgets. Lifecycle of the produced widget belongs to the frame.

use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Points};
use ratatui::widgets::{
    Axis, BarChart, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Widget,
};

use studydeck_core::format::format_f64;

use crate::theme::Theme;

/// Caller overrides merged over the factory defaults. `None` means "use the
/// default".
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartOptions {
    pub show_legend: Option<bool>,
    pub x_bounds: Option<[f64; 2]>,
    pub y_bounds: Option<[f64; 2]>,
    pub bar_width: Option<u16>,
}

/// One named series for a line chart.
pub struct LineSeries<'a> {
    pub name: &'a str,
    pub points: &'a [(f64, f64)],
}

/// A slice of a doughnut chart.
pub struct DoughnutSlice {
    pub label: String,
    pub value: f64,
}

/// Build a line chart. Defaults: legend shown at the top, braille line
/// marker, axis bounds fitted to the data.
pub fn line_chart<'a>(
    title: &'a str,
    series: &'a [LineSeries<'a>],
    opts: ChartOptions,
    theme: &Theme,
) -> Chart<'a> {
    let palette = theme.chart_palette();

    let datasets = series
        .iter()
        .enumerate()
        .map(|(i, s)| {
            Dataset::default()
                .name(s.name)
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(palette[i % palette.len()]))
                .data(s.points)
        })
        .collect();

    let x_bounds = opts
        .x_bounds
        .unwrap_or_else(|| fitted_bounds(series, |p| p.0));
    let y_bounds = opts
        .y_bounds
        .unwrap_or_else(|| fitted_bounds(series, |p| p.1));

    let axis_style = Style::default().fg(theme.grey1);
    let label_style = Style::default().fg(theme.grey2);

    let mut chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(format!(" {title} "))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.grey0)),
        )
        .x_axis(
            Axis::default()
                .style(axis_style)
                .bounds(x_bounds)
                .labels(bound_labels(x_bounds, label_style)),
        )
        .y_axis(
            Axis::default()
                .style(axis_style)
                .bounds(y_bounds)
                .labels(bound_labels(y_bounds, label_style)),
        );

    chart = if opts.show_legend.unwrap_or(true) {
        chart.legend_position(Some(LegendPosition::Top))
    } else {
        chart.legend_position(None)
    };

    chart
}

/// Build a bar chart. Defaults: no legend, labeled bars in the accent color.
pub fn bar_chart<'a>(
    title: &'a str,
    values: &'a [(&'a str, u64)],
    opts: ChartOptions,
    theme: &Theme,
) -> BarChart<'a> {
    BarChart::default()
        .block(
            Block::default()
                .title(format!(" {title} "))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.grey0)),
        )
        .bar_width(opts.bar_width.unwrap_or(5))
        .bar_gap(1)
        .bar_style(Style::default().fg(theme.accent))
        .value_style(Style::default().fg(theme.bg0).bg(theme.accent))
        .label_style(Style::default().fg(theme.grey2))
        .data(values)
}

/// Build a doughnut chart on the canvas layer: a colored ring with a legend
/// to the right showing each slice's share.
pub fn doughnut_chart<'a>(
    title: &'a str,
    slices: &'a [DoughnutSlice],
    theme: &Theme,
) -> impl Widget + 'a {
    let palette = theme.chart_palette();
    let border_color = theme.grey0;
    let text_color = theme.fg1;
    let total: f64 = slices.iter().map(|s| s.value.max(0.0)).sum();

    Canvas::default()
        .block(
            Block::default()
                .title(format!(" {title} "))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        )
        .marker(symbols::Marker::Braille)
        .x_bounds([-1.4, 3.2])
        .y_bounds([-1.3, 1.3])
        .paint(move |ctx| {
            if total <= 0.0 {
                return;
            }

            let mut start = std::f64::consts::FRAC_PI_2;
            for (i, slice) in slices.iter().enumerate() {
                let share = slice.value.max(0.0) / total;
                let sweep = share * std::f64::consts::TAU;
                let color = palette[i % palette.len()];

                let steps = ((sweep / 0.02).ceil() as usize).max(2);
                let mut coords = Vec::with_capacity(steps * 8);
                for step in 0..=steps {
                    let angle = start - sweep * step as f64 / steps as f64;
                    let mut radius = 0.62;
                    while radius <= 1.0 {
                        coords.push((angle.cos() * radius, angle.sin() * radius));
                        radius += 0.05;
                    }
                }
                ctx.draw(&Points {
                    coords: &coords,
                    color,
                });

                let label = format!("{} ({}%)", slice.label, format_f64(share * 100.0, 0));
                ctx.print(
                    1.35,
                    1.0 - i as f64 * 0.35,
                    Line::from(vec![
                        Span::styled("■ ", Style::default().fg(color)),
                        Span::styled(label, Style::default().fg(text_color)),
                    ]),
                );

                start -= sweep;
            }
        })
}

/// Fit axis bounds to the data, padding degenerate ranges so flat series
/// still render mid-chart.
fn fitted_bounds(series: &[LineSeries<'_>], pick: impl Fn(&(f64, f64)) -> f64) -> [f64; 2] {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for s in series {
        for point in s.points {
            let v = pick(point);
            min = min.min(v);
            max = max.max(v);
        }
    }

    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }
    if (max - min).abs() < f64::EPSILON {
        return [min - 1.0, max + 1.0];
    }
    [min, max]
}

fn bound_labels(bounds: [f64; 2], style: Style) -> Vec<Span<'static>> {
    vec![
        Span::styled(format_f64(bounds[0], 1), style),
        Span::styled(format_f64((bounds[0] + bounds[1]) / 2.0, 1), style),
        Span::styled(format_f64(bounds[1], 1), style),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;

    #[test]
    fn bounds_fit_the_data() {
        let points = [(0.0, 2.0), (1.0, 3.5), (2.0, 1.0)];
        let series = [LineSeries {
            name: "hours",
            points: &points,
        }];
        assert_eq!(fitted_bounds(&series, |p| p.0), [0.0, 2.0]);
        assert_eq!(fitted_bounds(&series, |p| p.1), [1.0, 3.5]);
    }

    #[test]
    fn flat_series_get_padded_bounds() {
        let points = [(0.0, 2.0), (1.0, 2.0)];
        let series = [LineSeries {
            name: "flat",
            points: &points,
        }];
        assert_eq!(fitted_bounds(&series, |p| p.1), [1.0, 3.0]);
    }

    #[test]
    fn empty_series_default_to_unit_bounds() {
        let series: [LineSeries<'_>; 0] = [];
        assert_eq!(fitted_bounds(&series, |p| p.1), [0.0, 1.0]);
    }

    #[test]
    fn caller_overrides_win_over_defaults() {
        let points = [(0.0, 1.0), (6.0, 4.0)];
        let series = [LineSeries {
            name: "hours",
            points: &points,
        }];
        let opts = ChartOptions {
            y_bounds: Some([0.0, 10.0]),
            ..ChartOptions::default()
        };

        // Rendering exercises the merged configuration end to end.
        let chart = line_chart("Study Hours", &series, opts, &Theme::default());
        let area = Rect::new(0, 0, 40, 12);
        let mut buf = Buffer::empty(area);
        chart.render(area, &mut buf);
    }

    #[test]
    fn doughnut_renders_labels_and_shares() {
        let slices = [
            DoughnutSlice {
                label: "Focused Studiers".to_string(),
                value: 3.0,
            },
            DoughnutSlice {
                label: "Night Owls".to_string(),
                value: 1.0,
            },
        ];
        let widget = doughnut_chart("Clusters", &slices, &Theme::default());
        let area = Rect::new(0, 0, 60, 16);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);

        let text: String = (0..area.height)
            .map(|y| {
                (0..area.width)
                    .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n");
        assert!(text.contains("Focused Studiers"));
        assert!(text.contains("75%"));
        assert!(text.contains("25%"));
    }
}
