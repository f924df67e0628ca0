//! Chart Plotter Module
//! Draws the interactive progress and volume charts using egui_plot.

use crate::charts::{date_to_axis, format_day, VOLUME_AXIS_TITLE, VOLUME_SERIES_LABEL, WEIGHT_AXIS_TITLE};
use crate::data::ChartSet;
use egui_plot::{uniform_grid_spacer, Bar, BarChart, Legend, Line, Plot, PlotPoints};

const BAR_WIDTH: f64 = 0.6;

/// Draws both charts of a [`ChartSet`] into an egui layout.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Weight over time, one line per exercise.
    /// X-axis: days, Y-axis: weight
    pub fn draw_progress_chart(ui: &mut egui::Ui, chart_set: &ChartSet, height: f32) {
        Plot::new("progress_chart")
            .height(height)
            .legend(Legend::default())
            .x_axis_label("Date")
            .y_axis_label(WEIGHT_AXIS_TITLE)
            .x_grid_spacer(uniform_grid_spacer(|_input| [1.0, 7.0, 28.0]))
            .x_axis_formatter(|mark, _range| format_day(mark.value))
            .label_formatter(|name, value| {
                let day = format_day(value.x.round());
                if name.is_empty() {
                    format!("{day}\n{:.1}", value.y)
                } else {
                    format!("{name}\n{day}\n{:.1}", value.y)
                }
            })
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                for series in &chart_set.progress {
                    let points: PlotPoints = series
                        .points
                        .iter()
                        .map(|p| [date_to_axis(p.x), p.y])
                        .collect();

                    // Stroke only; lines are never filled.
                    plot_ui.line(
                        Line::new(points)
                            .color(series.color.to_color32())
                            .width(2.0)
                            .name(&series.label),
                    );
                }
            });
    }

    /// Total volume, one bar per exercise.
    /// X-axis: exercises, Y-axis: volume starting at zero
    pub fn draw_volume_chart(ui: &mut egui::Ui, chart_set: &ChartSet, height: f32) {
        let labels = chart_set.labels();

        Plot::new("volume_chart")
            .height(height)
            .legend(Legend::default())
            .y_axis_label(VOLUME_AXIS_TITLE)
            .include_y(0.0)
            .allow_scroll(false)
            .x_grid_spacer(uniform_grid_spacer(|_input| [1.0, 5.0, 10.0]))
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                    return String::new();
                }
                labels.get(idx as usize).cloned().unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                let bars: Vec<Bar> = chart_set
                    .volume
                    .iter()
                    .enumerate()
                    .map(|(i, bar)| {
                        Bar::new(i as f64, bar.total)
                            .width(BAR_WIDTH)
                            .fill(bar.color.to_color32())
                            .name(&bar.label)
                    })
                    .collect();

                plot_ui.bar_chart(BarChart::new(bars).name(VOLUME_SERIES_LABEL));
            });
    }
}
