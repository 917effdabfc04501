use eframe::egui::{Align2, Color32, RichText, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoint, PlotPoints, Polygon, Text};

use crate::color::{coolwarm, outcome_color, text_color_on};
use crate::viz::{CorrelationHeatmap, DistributionChart, ImportanceChart};

// ---------------------------------------------------------------------------
// Distribution by outcome
// ---------------------------------------------------------------------------

/// Overlaid per-outcome histograms with their density curves.
pub fn distribution_plot(ui: &mut Ui, chart: &DistributionChart) {
    ui.strong(&chart.title);
    let width = chart.bin_width();

    Plot::new("distribution_plot")
        .legend(Legend::default())
        .x_axis_label(chart.feature.as_str())
        .y_axis_label("Count")
        .height(320.0)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &chart.series {
                let color = outcome_color(series.outcome);
                let name = format!("Outcome {}", series.outcome);

                let bars: Vec<Bar> = series
                    .counts
                    .iter()
                    .enumerate()
                    .map(|(i, &count)| {
                        Bar::new(chart.edges[i] + width / 2.0, count as f64).width(width)
                    })
                    .collect();
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .name(&name)
                        .color(color.linear_multiply(0.55)),
                );

                if !series.density.is_empty() {
                    let points: PlotPoints = series.density.iter().copied().collect();
                    plot_ui.line(Line::new(points).name(&name).color(color).width(2.0));
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

/// Annotated correlation grid; row 0 is drawn at the top.
pub fn correlation_plot(ui: &mut Ui, heatmap: &CorrelationHeatmap) {
    let k = heatmap.labels.len();

    Plot::new("correlation_plot")
        .data_aspect(1.0)
        .height(460.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .include_x(-4.5)
        .include_x(k as f64)
        .include_y(-2.0)
        .include_y(k as f64)
        .show(ui, |plot_ui| {
            for row in 0..k {
                let y = (k - 1 - row) as f64;
                for col in 0..k {
                    let x = col as f64;
                    let fill = coolwarm(heatmap.values[row][col]);
                    let cell: PlotPoints = vec![
                        [x - 0.5, y - 0.5],
                        [x + 0.5, y - 0.5],
                        [x + 0.5, y + 0.5],
                        [x - 0.5, y + 0.5],
                    ]
                    .into();
                    plot_ui.polygon(
                        Polygon::new(cell)
                            .fill_color(fill)
                            .stroke(Stroke::new(0.5, Color32::WHITE)),
                    );
                    plot_ui.text(Text::new(
                        PlotPoint::new(x, y),
                        RichText::new(heatmap.annotation(row, col))
                            .size(10.0)
                            .color(text_color_on(fill)),
                    ));
                }

                plot_ui.text(
                    Text::new(
                        PlotPoint::new(-0.6, y),
                        RichText::new(&heatmap.labels[row]).size(10.0),
                    )
                    .anchor(Align2::RIGHT_CENTER),
                );
            }

            for (col, label) in heatmap.labels.iter().enumerate() {
                // Alternate rows so neighbouring labels do not collide.
                let y = if col % 2 == 0 { -0.7 } else { -1.3 };
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(col as f64, y),
                        RichText::new(short_label(label)).size(10.0),
                    )
                    .anchor(Align2::CENTER_TOP),
                );
            }
        });
}

fn short_label(label: &str) -> String {
    const MAX: usize = 12;
    if label.chars().count() <= MAX {
        label.to_string()
    } else {
        let head: String = label.chars().take(MAX - 1).collect();
        format!("{head}…")
    }
}

// ---------------------------------------------------------------------------
// Feature importance
// ---------------------------------------------------------------------------

/// Horizontal bars, first importance on top.
pub fn importance_plot(ui: &mut Ui, chart: &ImportanceChart, color: Color32) {
    ui.strong(&chart.title);
    let n = chart.bars.len();
    let max = chart
        .bars
        .iter()
        .map(|b| b.importance)
        .fold(0.0f64, f64::max)
        .max(f64::EPSILON);

    Plot::new("importance_plot")
        .height(300.0)
        .show_axes([true, false])
        .show_grid([true, false])
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .include_x(-max * 0.6)
        .include_x(max * 1.05)
        .show(ui, |plot_ui| {
            let bars: Vec<Bar> = chart
                .bars
                .iter()
                .enumerate()
                .map(|(i, b)| {
                    Bar::new((n - 1 - i) as f64, b.importance)
                        .width(0.7)
                        .name(&b.feature)
                        .fill(color)
                })
                .collect();
            plot_ui.bar_chart(BarChart::new(bars).horizontal().color(color));

            for (i, b) in chart.bars.iter().enumerate() {
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(-max * 0.02, (n - 1 - i) as f64),
                        RichText::new(&b.feature).size(11.0),
                    )
                    .anchor(Align2::RIGHT_CENTER),
                );
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_labels_are_shortened() {
        assert_eq!(short_label("Glucose"), "Glucose");
        assert_eq!(short_label("DiabetesPedigreeFunction"), "DiabetesPed…");
    }
}
