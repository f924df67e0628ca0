//! Static Chart Renderer
//! Draws the progress and volume charts to PNG bytes with plotters.
//!
//! Layout mirrors the interactive view:
//! 1. Progress: caption, time x-axis labelled per day, one stroked line per exercise, legend
//! 2. Volume: caption, exercise names under zero-based bars, one color per bar

use crate::charts::{
    date_to_axis, format_day, PROGRESS_CHART_TITLE, VOLUME_AXIS_TITLE, VOLUME_CHART_TITLE,
    WEIGHT_AXIS_TITLE,
};
use crate::data::ChartSet;
use image::{ImageFormat, RgbImage};
use plotters::prelude::*;
use std::io::Cursor;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Plot(String),
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error("Invalid canvas size {0}x{1}")]
    Canvas(u32, u32),
}

fn plot_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Plot(e.to_string())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render the weight progress chart as PNG bytes.
    pub fn render_progress_png(
        chart_set: &ChartSet,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, RenderError> {
        let mut buffer = Self::canvas(width, height)?;
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(plot_err)?;

            let (x_min, x_max) = Self::progress_x_range(chart_set);
            let (y_min, y_max) = Self::progress_y_range(chart_set);

            let mut chart = ChartBuilder::on(&root)
                .caption(PROGRESS_CHART_TITLE, ("sans-serif", 28))
                .margin(15)
                .x_label_area_size(45)
                .y_label_area_size(60)
                .build_cartesian_2d(x_min..x_max, y_min..y_max)
                .map_err(plot_err)?;

            chart
                .configure_mesh()
                .x_desc("Date")
                .y_desc(WEIGHT_AXIS_TITLE)
                .x_labels(8)
                .x_label_formatter(&|x: &f64| format_day(x.round()))
                .draw()
                .map_err(plot_err)?;

            for series in &chart_set.progress {
                let color = series.color.to_rgb_color();
                chart
                    .draw_series(LineSeries::new(
                        series.points.iter().map(|p| (date_to_axis(p.x), p.y)),
                        color.stroke_width(2),
                    ))
                    .map_err(plot_err)?
                    .label(series.label.clone())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
            }

            if !chart_set.progress.is_empty() {
                chart
                    .configure_series_labels()
                    .background_style(&WHITE.mix(0.8))
                    .border_style(&BLACK)
                    .draw()
                    .map_err(plot_err)?;
            }

            root.present().map_err(plot_err)?;
        }
        Self::encode_png(buffer, width, height)
    }

    /// Render the total volume bar chart as PNG bytes.
    pub fn render_volume_png(
        chart_set: &ChartSet,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, RenderError> {
        let mut buffer = Self::canvas(width, height)?;
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(plot_err)?;

            let labels = chart_set.labels();
            let slots = labels.len().max(1) as u32;

            let mut chart = ChartBuilder::on(&root)
                .caption(VOLUME_CHART_TITLE, ("sans-serif", 28))
                .margin(15)
                .x_label_area_size(45)
                .y_label_area_size(70)
                .build_cartesian_2d(
                    (0u32..slots).into_segmented(),
                    0f64..Self::volume_y_max(chart_set),
                )
                .map_err(plot_err)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_desc("Exercise")
                .y_desc(VOLUME_AXIS_TITLE)
                .x_labels(labels.len().max(1))
                .x_label_formatter(&|v: &SegmentValue<u32>| match v {
                    SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
                    _ => String::new(),
                })
                .draw()
                .map_err(plot_err)?;

            chart
                .draw_series(chart_set.volume.iter().enumerate().map(|(i, bar)| {
                    let i = i as u32;
                    let mut rect = Rectangle::new(
                        [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), bar.total)],
                        bar.color.to_rgb_color().filled(),
                    );
                    rect.set_margin(0, 0, 10, 10);
                    rect
                }))
                .map_err(plot_err)?;

            root.present().map_err(plot_err)?;
        }
        Self::encode_png(buffer, width, height)
    }

    fn canvas(width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::Canvas(width, height));
        }
        Ok(vec![0u8; width as usize * height as usize * 3])
    }

    fn encode_png(buffer: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
        let img = RgbImage::from_raw(width, height, buffer).ok_or(RenderError::Canvas(width, height))?;
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Date span padded by a day on each side.
    fn progress_x_range(chart_set: &ChartSet) -> (f64, f64) {
        match chart_set.date_span() {
            Some((first, last)) => (date_to_axis(first) - 1.0, date_to_axis(last) + 1.0),
            None => {
                let today = date_to_axis(chrono::Local::now().date_naive());
                (today - 1.0, today + 1.0)
            }
        }
    }

    /// Weight span with 10% headroom; never collapses to a single value.
    fn progress_y_range(chart_set: &ChartSet) -> (f64, f64) {
        match chart_set.weight_span() {
            Some((lo, hi)) if hi > lo => {
                let pad = (hi - lo) * 0.1;
                (lo - pad, hi + pad)
            }
            Some((w, _)) => {
                let pad = (w.abs() * 0.1).max(1.0);
                (w - pad, w + pad)
            }
            None => (0.0, 1.0),
        }
    }

    fn volume_y_max(chart_set: &ChartSet) -> f64 {
        let max = chart_set.max_volume();
        if max > 0.0 {
            max * 1.1
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ColorPicker;
    use crate::data::{ChartPoint, ProgressSeries, VolumeBar};
    use chrono::NaiveDate;

    fn chart_set(weights: &[f64]) -> ChartSet {
        let points = weights
            .iter()
            .enumerate()
            .map(|(i, &y)| ChartPoint {
                x: NaiveDate::from_ymd_opt(2024, 1, 1 + i as u32).unwrap(),
                y,
            })
            .collect();
        ChartSet {
            progress: vec![ProgressSeries {
                label: "Squat".to_string(),
                points,
                color: ColorPicker::seeded(3).random_color(),
            }],
            volume: vec![VolumeBar {
                label: "Squat".to_string(),
                total: weights.iter().sum::<f64>() * 5.0,
                color: ColorPicker::seeded(4).random_color(),
            }],
        }
    }

    #[test]
    fn x_range_pads_one_day() {
        let set = chart_set(&[80.0, 85.0, 90.0]);
        let first = date_to_axis(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(
            StaticChartRenderer::progress_x_range(&set),
            (first - 1.0, first + 3.0)
        );
    }

    #[test]
    fn y_range_has_headroom() {
        let (lo, hi) = StaticChartRenderer::progress_y_range(&chart_set(&[80.0, 100.0]));
        assert!(lo < 80.0 && hi > 100.0);

        let (lo, hi) = StaticChartRenderer::progress_y_range(&chart_set(&[60.0]));
        assert!(lo < 60.0 && hi > 60.0);

        assert_eq!(
            StaticChartRenderer::progress_y_range(&ChartSet::default()),
            (0.0, 1.0)
        );
    }

    #[test]
    fn volume_axis_starts_at_zero_with_headroom() {
        let set = chart_set(&[100.0]);
        assert!((StaticChartRenderer::volume_y_max(&set) - 550.0).abs() < 1e-9);
        assert_eq!(StaticChartRenderer::volume_y_max(&ChartSet::default()), 1.0);
    }

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn assert_png(bytes: &[u8], width: u32, height: u32) {
        assert!(bytes.starts_with(&PNG_SIGNATURE));
        let decoded = image::load_from_memory(bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (width, height));
    }

    #[test]
    fn renders_progress_png() {
        let set = chart_set(&[80.0, 85.0, 90.0]);
        assert_png(&StaticChartRenderer::render_progress_png(&set, 640, 320).unwrap(), 640, 320);
    }

    #[test]
    fn renders_volume_png() {
        let set = chart_set(&[50.0, 55.0]);
        assert_png(&StaticChartRenderer::render_volume_png(&set, 640, 320).unwrap(), 640, 320);
    }

    #[test]
    fn empty_chart_set_still_renders() {
        let empty = ChartSet::default();
        assert_png(&StaticChartRenderer::render_progress_png(&empty, 320, 200).unwrap(), 320, 200);
        assert_png(&StaticChartRenderer::render_volume_png(&empty, 320, 200).unwrap(), 320, 200);
    }

    #[test]
    fn zero_sized_canvas_is_rejected() {
        let err = StaticChartRenderer::render_volume_png(&ChartSet::default(), 0, 400).unwrap_err();
        assert!(matches!(err, RenderError::Canvas(0, 400)));
    }
}
