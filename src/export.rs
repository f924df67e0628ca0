//! Report Export Module
//! Writes both charts as PNG images and the logged sets as a CSV export into
//! one folder.

use crate::charts::{RenderError, StaticChartRenderer};
use crate::data::{
    ChartSet, WorkoutDataset, DATE_COLUMN, EXERCISE_COLUMN, NOTES_COLUMN, REPS_COLUMN,
    WEIGHT_COLUMN,
};
use polars::prelude::*;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const PROGRESS_FILE: &str = "progress.png";
pub const VOLUME_FILE: &str = "volume.png";
pub const CSV_FILE: &str = "workouts.csv";

/// Canvas size of exported chart images
pub const EXPORT_WIDTH: u32 = 1400;
pub const EXPORT_HEIGHT: u32 = 700;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
    #[error("CSV error: {0}")]
    Csv(#[from] PolarsError),
}

/// Files written by one export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    pub progress_png: PathBuf,
    pub volume_png: PathBuf,
    pub csv: PathBuf,
    pub rows: usize,
}

pub struct ReportExporter;

impl ReportExporter {
    /// Render both charts and write the CSV into `dir`, creating it if needed.
    pub fn export_all(
        chart_set: &ChartSet,
        dataset: &WorkoutDataset,
        dir: &Path,
    ) -> Result<ExportSummary, ExportError> {
        fs::create_dir_all(dir).map_err(|source| ExportError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let progress_png = dir.join(PROGRESS_FILE);
        let png = StaticChartRenderer::render_progress_png(chart_set, EXPORT_WIDTH, EXPORT_HEIGHT)?;
        Self::write_bytes(&progress_png, &png)?;

        let volume_png = dir.join(VOLUME_FILE);
        let png = StaticChartRenderer::render_volume_png(chart_set, EXPORT_WIDTH, EXPORT_HEIGHT)?;
        Self::write_bytes(&volume_png, &png)?;

        let csv = dir.join(CSV_FILE);
        let rows = Self::write_csv(dataset, &csv)?;

        tracing::info!(dir = %dir.display(), rows, "export written");
        Ok(ExportSummary {
            progress_png,
            volume_png,
            csv,
            rows,
        })
    }

    /// Write every logged set as `Date,Exercise,Reps,Weight (kg/lbs),Notes`.
    ///
    /// Reps are written as integers when every value is whole, and empty notes
    /// as empty fields. Returns the number of data rows.
    pub fn write_csv(dataset: &WorkoutDataset, path: &Path) -> Result<usize, ExportError> {
        let records = dataset.to_records();

        let mut df = DataFrame::new(vec![
            Column::new(
                DATE_COLUMN.into(),
                records
                    .iter()
                    .map(|r| r.date.format("%Y-%m-%d").to_string())
                    .collect::<Vec<String>>(),
            ),
            Column::new(
                EXERCISE_COLUMN.into(),
                records.iter().map(|r| r.exercise.clone()).collect::<Vec<String>>(),
            ),
            Self::reps_column(records.iter().map(|r| r.reps).collect()),
            Column::new(
                WEIGHT_COLUMN.into(),
                records.iter().map(|r| r.weight).collect::<Vec<f64>>(),
            ),
            Column::new(
                NOTES_COLUMN.into(),
                records
                    .iter()
                    .map(|r| (!r.notes.is_empty()).then(|| r.notes.clone()))
                    .collect::<Vec<Option<String>>>(),
            ),
        ])?;

        let mut file = File::create(path).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        CsvWriter::new(&mut file).include_header(true).finish(&mut df)?;

        Ok(records.len())
    }

    fn reps_column(reps: Vec<f64>) -> Column {
        if reps.iter().all(|r| r.fract() == 0.0) {
            Column::new(
                REPS_COLUMN.into(),
                reps.into_iter().map(|r| r as i64).collect::<Vec<i64>>(),
            )
        } else {
            Column::new(REPS_COLUMN.into(), reps)
        }
    }

    fn write_bytes(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
        fs::write(path, bytes).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
