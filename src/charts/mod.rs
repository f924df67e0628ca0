//! Charts module - Chart rendering

mod axis;
mod color;
mod plotter;
mod renderer;

pub use axis::{axis_to_date, date_to_axis, format_day};
pub use color::{ColorPicker, HexColor};
pub use plotter::ChartPlotter;
pub use renderer::{RenderError, StaticChartRenderer};

/// Y-axis title of the progress chart.
pub const WEIGHT_AXIS_TITLE: &str = "Weight (kg/lbs)";
/// Y-axis title of the volume chart.
pub const VOLUME_AXIS_TITLE: &str = "Total Volume";
/// Name of the single bar series on the volume chart.
pub const VOLUME_SERIES_LABEL: &str = "Total Volume (Weight × Reps)";
pub const PROGRESS_CHART_TITLE: &str = "Weight Progress";
pub const VOLUME_CHART_TITLE: &str = "Exercise Volume";
