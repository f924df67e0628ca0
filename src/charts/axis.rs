//! Day-granularity time axis shared by the interactive and static charts.
//!
//! Dates are placed at their day number counted from 0001-01-01, so one axis
//! unit is one day.

use chrono::{Datelike, NaiveDate};

pub fn date_to_axis(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

/// Nearest whole day for an axis value, if it is a valid date.
pub fn axis_to_date(value: f64) -> Option<NaiveDate> {
    if !value.is_finite() || value.abs() > i32::MAX as f64 {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(value.round() as i32)
}

/// Axis label for a day value; empty between days.
pub fn format_day(value: f64) -> String {
    if (value - value.round()).abs() > 1e-6 {
        return String::new();
    }
    axis_to_date(value)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
