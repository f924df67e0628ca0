//! Data Processor Module
//! Reshapes a workout dataset into the series both charts draw.

use crate::charts::{ColorPicker, HexColor};
use crate::data::{ExerciseSeries, WorkoutDataset};
use chrono::NaiveDate;
use rayon::prelude::*;

/// One point on the progress chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    pub x: NaiveDate,
    pub y: f64,
}

/// Weight-over-time line for one exercise.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSeries {
    pub label: String,
    pub points: Vec<ChartPoint>,
    pub color: HexColor,
}

/// Total volume bar for one exercise.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeBar {
    pub label: String,
    pub total: f64,
    pub color: HexColor,
}

/// Everything the progress and volume charts need, in exercise-name order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSet {
    pub progress: Vec<ProgressSeries>,
    pub volume: Vec<VolumeBar>,
}

impl ChartSet {
    pub fn labels(&self) -> Vec<String> {
        self.volume.iter().map(|bar| bar.label.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.progress.is_empty() && self.volume.is_empty()
    }

    /// Earliest and latest date over every progress point.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.progress.iter().flat_map(|s| s.points.iter().map(|p| p.x));
        let first = dates.next()?;
        Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }

    /// Lowest and highest weight over every progress point.
    pub fn weight_span(&self) -> Option<(f64, f64)> {
        let mut weights = self.progress.iter().flat_map(|s| s.points.iter().map(|p| p.y));
        let first = weights.next()?;
        Some(weights.fold((first, first), |(lo, hi), w| (lo.min(w), hi.max(w))))
    }

    pub fn max_volume(&self) -> f64 {
        self.volume.iter().map(|bar| bar.total).fold(0.0, f64::max)
    }
}

/// Pure transformations from logged sets to chart series.
pub struct DataProcessor;

impl DataProcessor {
    /// Pair each date with the weight logged at the same index.
    pub fn to_chart_points(series: &ExerciseSeries) -> Vec<ChartPoint> {
        series
            .dates()
            .iter()
            .zip(series.weights())
            .map(|(&x, &y)| ChartPoint { x, y })
            .collect()
    }

    /// Sum of weight x reps over every logged set; 0 for an empty series.
    pub fn to_volume(series: &ExerciseSeries) -> f64 {
        series
            .weights()
            .iter()
            .zip(series.reps())
            .map(|(weight, reps)| weight * reps)
            .sum()
    }

    /// Build both chart datasets.
    ///
    /// Every progress line draws its color first, then every volume bar, so a
    /// seeded picker always assigns the same colors to the same dataset.
    pub fn build_chart_set(dataset: &WorkoutDataset, colors: &mut ColorPicker) -> ChartSet {
        let exercises: Vec<(&String, &ExerciseSeries)> = dataset.iter().collect();
        let line_colors: Vec<HexColor> = exercises.iter().map(|_| colors.random_color()).collect();
        let bar_colors: Vec<HexColor> = exercises.iter().map(|_| colors.random_color()).collect();

        let shapes: Vec<(Vec<ChartPoint>, f64)> = exercises
            .par_iter()
            .map(|(_, series)| (Self::to_chart_points(series), Self::to_volume(series)))
            .collect();

        let mut chart_set = ChartSet::default();
        for (((name, _), (points, total)), (line_color, bar_color)) in exercises
            .into_iter()
            .zip(shapes)
            .zip(line_colors.into_iter().zip(bar_colors))
        {
            chart_set.progress.push(ProgressSeries {
                label: name.clone(),
                points,
                color: line_color,
            });
            chart_set.volume.push(VolumeBar {
                label: name.clone(),
                total,
                color: bar_color,
            });
        }

        tracing::debug!(
            exercises = chart_set.volume.len(),
            "built progress and volume series"
        );
        chart_set
    }
}
