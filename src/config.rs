//! Command-line and environment configuration.

use crate::data::DataSource;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "workout-charts",
    version,
    about = "Weight progression and training volume charts for a workout log"
)]
pub struct Cli {
    /// Base URL of the workout server
    #[arg(long, env = "WORKOUT_CHARTS_URL", default_value = DEFAULT_BASE_URL)]
    pub url: String,

    /// Value of the server's `session` login cookie
    #[arg(long, env = "WORKOUT_CHARTS_SESSION", hide_env_values = true)]
    pub session: Option<String>,

    /// Read a saved `/api/workout_data` response instead of the server
    #[arg(long, value_name = "PATH", conflicts_with = "csv")]
    pub json: Option<PathBuf>,

    /// Read a workout CSV export instead of the server
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Seed for series colors
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write progress.png, volume.png and workouts.csv here and exit without a window
    #[arg(long, value_name = "DIR")]
    pub export_dir: Option<PathBuf>,
}

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub source: DataSource,
    pub seed: Option<u64>,
    pub export_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: DataSource::Http {
                base_url: DEFAULT_BASE_URL.to_string(),
                session: None,
                timeout: None,
            },
            seed: None,
            export_dir: None,
        }
    }
}

impl From<Cli> for AppConfig {
    fn from(cli: Cli) -> Self {
        let source = match (cli.json, cli.csv) {
            (Some(path), _) => DataSource::JsonFile(path),
            (None, Some(path)) => DataSource::CsvFile(path),
            (None, None) => DataSource::Http {
                base_url: cli.url,
                session: cli.session.filter(|s| !s.is_empty()),
                timeout: cli.timeout_secs.map(Duration::from_secs),
            },
        };

        Self {
            source,
            seed: cli.seed,
            export_dir: cli.export_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_source_by_default() {
        let cli = Cli::try_parse_from([
            "workout-charts",
            "--url",
            "http://gym.local:8000",
            "--session",
            "abc123",
            "--timeout-secs",
            "5",
        ])
        .unwrap();
        let config = AppConfig::from(cli);
        assert_eq!(
            config.source,
            DataSource::Http {
                base_url: "http://gym.local:8000".to_string(),
                session: Some("abc123".to_string()),
                timeout: Some(Duration::from_secs(5)),
            }
        );
        assert_eq!(config.export_dir, None);
    }

    #[test]
    fn file_sources_replace_http() {
        let cli = Cli::try_parse_from(["workout-charts", "--csv", "log.csv", "--seed", "4"]).unwrap();
        let config = AppConfig::from(cli);
        assert_eq!(config.source, DataSource::CsvFile(PathBuf::from("log.csv")));
        assert_eq!(config.seed, Some(4));

        let cli = Cli::try_parse_from(["workout-charts", "--json", "data.json"]).unwrap();
        assert_eq!(
            AppConfig::from(cli).source,
            DataSource::JsonFile(PathBuf::from("data.json"))
        );
    }

    #[test]
    fn json_and_csv_conflict() {
        assert!(
            Cli::try_parse_from(["workout-charts", "--json", "a.json", "--csv", "b.csv"]).is_err()
        );
    }

    #[test]
    fn export_dir_selects_headless() {
        let cli =
            Cli::try_parse_from(["workout-charts", "--json", "a.json", "--export-dir", "out"]).unwrap();
        assert_eq!(AppConfig::from(cli).export_dir, Some(PathBuf::from("out")));
    }
}
