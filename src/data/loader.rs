//! Workout Data Loader Module
//! Reads the workout dataset once from the server endpoint, a saved JSON
//! payload, or a CSV export.

use crate::data::{WorkoutDataset, WorkoutRecord};
use chrono::NaiveDate;
use polars::prelude::*;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, COOKIE};
use reqwest::redirect::Policy;
use reqwest::StatusCode;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Endpoint path on the workout server.
pub const WORKOUT_DATA_PATH: &str = "/api/workout_data";

/// Column headers of the server's CSV export.
pub const DATE_COLUMN: &str = "Date";
pub const EXERCISE_COLUMN: &str = "Exercise";
pub const REPS_COLUMN: &str = "Reps";
pub const WEIGHT_COLUMN: &str = "Weight (kg/lbs)";
pub const NOTES_COLUMN: &str = "Notes";

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Server responded with {0}")]
    Status(StatusCode),
    #[error("Failed to decode workout data: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("CSV row {row}: {reason}")]
    CsvRow { row: usize, reason: String },
}

/// Where the dataset comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    /// `GET <base_url>/api/workout_data`, optionally with a login session cookie.
    Http {
        base_url: String,
        session: Option<String>,
        timeout: Option<Duration>,
    },
    /// A saved endpoint response.
    JsonFile(PathBuf),
    /// A CSV export (`Date,Exercise,Reps,Weight (kg/lbs),Notes`).
    CsvFile(PathBuf),
}

impl DataSource {
    pub fn describe(&self) -> String {
        match self {
            DataSource::Http { base_url, .. } => endpoint_url(base_url),
            DataSource::JsonFile(path) | DataSource::CsvFile(path) => path.display().to_string(),
        }
    }
}

/// Full endpoint URL for a server base URL.
pub fn endpoint_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), WORKOUT_DATA_PATH)
}

/// Performs the single dataset read for one source.
pub struct DataLoader {
    source: DataSource,
}

impl DataLoader {
    pub fn new(source: DataSource) -> Self {
        Self { source }
    }

    /// Read and decode the dataset. No retries.
    pub fn load(&self) -> Result<WorkoutDataset, LoaderError> {
        tracing::info!(source = %self.source.describe(), "loading workout data");
        let dataset = match &self.source {
            DataSource::Http {
                base_url,
                session,
                timeout,
            } => Self::fetch_http(base_url, session.as_deref(), *timeout)?,
            DataSource::JsonFile(path) => Self::load_json_file(path)?,
            DataSource::CsvFile(path) => Self::load_csv(path)?,
        };
        tracing::info!(
            exercises = dataset.len(),
            sets = dataset.set_count(),
            "workout data loaded"
        );
        Ok(dataset)
    }

    fn fetch_http(
        base_url: &str,
        session: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<WorkoutDataset, LoaderError> {
        // The endpoint redirects to the login page when the session is missing;
        // surface that as a status error instead of decoding the login HTML.
        let mut builder = Client::builder().redirect(Policy::none());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let url = endpoint_url(base_url);
        let mut request = client.get(&url).header(ACCEPT, "application/json");
        if let Some(session) = session {
            request = request.header(COOKIE, format!("session={session}"));
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            if status.is_redirection() {
                tracing::warn!(%url, "endpoint redirected; is the session cookie valid?");
            }
            return Err(LoaderError::Status(status));
        }

        let body = response.text()?;
        Ok(WorkoutDataset::from_json(&body)?)
    }

    fn load_json_file(path: &Path) -> Result<WorkoutDataset, LoaderError> {
        let body = fs::read_to_string(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(WorkoutDataset::from_json(&body)?)
    }

    /// Read a CSV export with Polars and group it the way the endpoint does.
    fn load_csv(path: &Path) -> Result<WorkoutDataset, LoaderError> {
        if !path.exists() {
            return Err(LoaderError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
            });
        }

        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .finish()?
            .collect()?;

        Ok(WorkoutDataset::from_records(Self::records_from_frame(&df)?))
    }

    fn records_from_frame(df: &DataFrame) -> Result<Vec<WorkoutRecord>, LoaderError> {
        let dates = df.column(DATE_COLUMN)?.cast(&DataType::String)?;
        let dates = dates.str()?;
        let exercises = df.column(EXERCISE_COLUMN)?.cast(&DataType::String)?;
        let exercises = exercises.str()?;
        let reps = df.column(REPS_COLUMN)?.cast(&DataType::Float64)?;
        let reps = reps.f64()?;
        let weights = df.column(WEIGHT_COLUMN)?.cast(&DataType::Float64)?;
        let weights = weights.f64()?;
        let notes = match df.column(NOTES_COLUMN) {
            Ok(col) => Some(col.cast(&DataType::String)?),
            Err(_) => None,
        };
        let notes = notes.as_ref().map(|col| col.str()).transpose()?;

        let mut records = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            // Header is line 1.
            let row = i + 2;
            let missing = |column: &str| LoaderError::CsvRow {
                row,
                reason: format!("missing {column}"),
            };

            let date_text = dates.get(i).ok_or_else(|| missing(DATE_COLUMN))?;
            let date = NaiveDate::parse_from_str(date_text, DATE_FORMAT).map_err(|e| {
                LoaderError::CsvRow {
                    row,
                    reason: format!("bad date {date_text:?}: {e}"),
                }
            })?;
            let exercise = exercises
                .get(i)
                .ok_or_else(|| missing(EXERCISE_COLUMN))?
                .to_string();
            let rep_count = reps.get(i).ok_or_else(|| missing(REPS_COLUMN))?;
            let weight = weights.get(i).ok_or_else(|| missing(WEIGHT_COLUMN))?;
            let note = notes
                .and_then(|col| col.get(i))
                .unwrap_or_default()
                .to_string();

            records.push(WorkoutRecord {
                date,
                exercise,
                reps: rep_count,
                weight,
                notes: note,
            });
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_joins_base() {
        assert_eq!(
            endpoint_url("http://localhost:5000"),
            "http://localhost:5000/api/workout_data"
        );
        assert_eq!(
            endpoint_url("http://localhost:5000/"),
            "http://localhost:5000/api/workout_data"
        );
    }

    #[test]
    fn describe_names_the_source() {
        let http = DataSource::Http {
            base_url: "http://gym.local".to_string(),
            session: Some("secret".to_string()),
            timeout: None,
        };
        assert_eq!(http.describe(), "http://gym.local/api/workout_data");
        assert!(!http.describe().contains("secret"));
        assert_eq!(
            DataSource::CsvFile(PathBuf::from("log.csv")).describe(),
            "log.csv"
        );
    }

    #[test]
    fn missing_json_file_is_io_error() {
        let loader = DataLoader::new(DataSource::JsonFile(PathBuf::from(
            "/nonexistent/workout_data.json",
        )));
        assert!(matches!(loader.load(), Err(LoaderError::Io { .. })));
    }
}
