//! Workout Charts Main Application
//! Window hosting the status panel and both charts. The single data load runs
//! on a background thread started from `on_ready`.

use crate::charts::ColorPicker;
use crate::config::AppConfig;
use crate::data::{ChartSet, DataLoader, DataProcessor, WorkoutDataset};
use crate::export::ReportExporter;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread;

/// Load result from background thread
enum LoadResult {
    Progress(f32, String),
    Complete {
        dataset: WorkoutDataset,
        chart_set: ChartSet,
    },
    Error(String),
}

/// Page lifecycle. `Loaded` and `Failed` are final.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Unloaded,
    Loading,
    Loaded,
    Failed(String),
}

/// Main application window.
pub struct WorkoutChartsApp {
    config: AppConfig,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    dataset: Option<WorkoutDataset>,
    state: LoadState,
    load_rx: Option<Receiver<LoadResult>>,
}

impl WorkoutChartsApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let mut app = Self::with_config(config);
        app.on_ready();
        app
    }

    /// App in the `Unloaded` state; nothing is fetched until `on_ready`.
    pub fn with_config(config: AppConfig) -> Self {
        let mut control_panel = ControlPanel::new();
        control_panel.source = config.source.describe();
        Self {
            config,
            control_panel,
            chart_viewer: ChartViewer::new(),
            dataset: None,
            state: LoadState::Unloaded,
            load_rx: None,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn chart_set(&self) -> Option<&ChartSet> {
        self.chart_viewer.chart_set.as_ref()
    }

    /// Start the one-time load. Calls after the first are ignored.
    pub fn on_ready(&mut self) {
        if self.state != LoadState::Unloaded {
            return;
        }

        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        self.state = LoadState::Loading;
        self.control_panel.set_progress(5.0, "Fetching workout data...");

        let loader = DataLoader::new(self.config.source.clone());
        let colors = ColorPicker::from_seed_option(self.config.seed);

        thread::spawn(move || {
            Self::run_load(tx, loader, colors);
        });
    }

    /// Fetch then build both chart datasets (called from background thread)
    fn run_load(tx: Sender<LoadResult>, loader: DataLoader, mut colors: ColorPicker) {
        let dataset = match loader.load() {
            Ok(dataset) => dataset,
            Err(e) => {
                tracing::error!(error = %e, "workout data load failed");
                let _ = tx.send(LoadResult::Error(e.to_string()));
                return;
            }
        };

        let _ = tx.send(LoadResult::Progress(60.0, "Building charts...".to_string()));

        let chart_set = DataProcessor::build_chart_set(&dataset, &mut colors);
        let _ = tx.send(LoadResult::Complete { dataset, chart_set });
    }

    /// Drain background results; returns true once the load has finished.
    pub fn check_load_results(&mut self) -> bool {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            loop {
                let result = match rx.try_recv() {
                    Ok(result) => result,
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        // Worker exited (or panicked) without a final result.
                        if self.state == LoadState::Loading {
                            let error = "load worker stopped before finishing".to_string();
                            tracing::error!("{}", error);
                            self.control_panel
                                .set_progress(0.0, &format!("Error: {}", error));
                            self.state = LoadState::Failed(error);
                        }
                        should_keep_receiver = false;
                        break;
                    }
                };

                match result {
                    LoadResult::Progress(progress, status) => {
                        self.control_panel.set_progress(progress, &status);
                    }
                    LoadResult::Complete { dataset, chart_set } => {
                        let count = chart_set.volume.len();
                        self.chart_viewer.set_chart_set(chart_set);
                        self.dataset = Some(dataset);
                        self.control_panel
                            .set_progress(100.0, &format!("Complete! {} exercises", count));
                        self.control_panel.export_enabled = true;
                        self.state = LoadState::Loaded;
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(error) => {
                        self.control_panel
                            .set_progress(0.0, &format!("Error: {}", error));
                        self.state = LoadState::Failed(error);
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }

        matches!(self.state, LoadState::Loaded | LoadState::Failed(_))
    }

    /// Save both chart images and the CSV into a folder picked by the user
    fn handle_export(&mut self) {
        let (Some(chart_set), Some(dataset)) = (&self.chart_viewer.chart_set, &self.dataset)
        else {
            self.control_panel.set_progress(0.0, "No charts to export");
            return;
        };

        let Some(dir) = rfd::FileDialog::new().pick_folder() else {
            return; // User cancelled
        };

        match ReportExporter::export_all(chart_set, dataset, &dir) {
            Ok(summary) => {
                self.control_panel.set_progress(
                    100.0,
                    &format!("Complete! Exported {} sets to {}", summary.rows, dir.display()),
                );
                if let Err(e) = open::that(&dir) {
                    tracing::warn!(error = %e, "could not open export folder");
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "export failed");
                self.control_panel
                    .set_progress(100.0, &format!("Error: export failed: {}", e));
            }
        }
    }
}

impl eframe::App for WorkoutChartsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        if self.state == LoadState::Loading {
            ctx.request_repaint();
        }

        SidePanel::left("control_panel")
            .min_width(240.0)
            .max_width(300.0)
            .show(ctx, |ui| {
                if self.control_panel.show(ui) == ControlPanelAction::Export {
                    self.handle_export();
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui, &self.state);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataSource;
    use std::io::Write;
    use std::time::{Duration, Instant};

    fn wait_for_load(app: &mut WorkoutChartsApp) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while !app.check_load_results() {
            assert!(Instant::now() < deadline, "load did not finish");
            thread::sleep(Duration::from_millis(10));
        }
    }

    fn app_for(body: &str) -> (WorkoutChartsApp, tempfile::NamedTempFile) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        let config = AppConfig {
            source: DataSource::JsonFile(file.path().to_path_buf()),
            seed: Some(11),
            export_dir: None,
        };
        (WorkoutChartsApp::with_config(config), file)
    }

    #[test]
    fn loads_once_and_shows_charts() {
        let (mut app, _file) = app_for(
            r#"{"Bench": {"dates": ["2024-01-01", "2024-01-08"], "weights": [50, 55], "reps": [10, 8]}}"#,
        );
        assert_eq!(app.state(), &LoadState::Unloaded);
        assert!(app.chart_set().is_none());

        app.on_ready();
        assert_eq!(app.state(), &LoadState::Loading);
        // Second signal does not start another load.
        app.on_ready();
        assert_eq!(app.state(), &LoadState::Loading);

        wait_for_load(&mut app);
        assert_eq!(app.state(), &LoadState::Loaded);
        let chart_set = app.chart_set().unwrap();
        assert_eq!(chart_set.labels(), vec!["Bench"]);
        assert_eq!(chart_set.volume[0].total, 940.0);

        app.on_ready();
        assert_eq!(app.state(), &LoadState::Loaded);
    }

    #[test]
    fn malformed_body_builds_no_chart() {
        let (mut app, _file) = app_for("this is not json");
        app.on_ready();
        wait_for_load(&mut app);

        assert!(matches!(app.state(), LoadState::Failed(msg) if msg.contains("decode")));
        assert!(app.chart_set().is_none());
    }

    #[test]
    fn stopped_worker_fails_the_load() {
        let (mut app, _file) = app_for("{}");
        let (tx, rx) = channel::<LoadResult>();
        tx.send(LoadResult::Progress(60.0, "Building charts...".to_string()))
            .unwrap();
        drop(tx);
        app.state = LoadState::Loading;
        app.load_rx = Some(rx);

        assert!(app.check_load_results());
        assert!(matches!(app.state(), LoadState::Failed(msg) if msg.contains("worker stopped")));
        assert!(app.load_rx.is_none());
        assert!(app.chart_set().is_none());
    }

    #[test]
    fn empty_dataset_loads_empty_charts() {
        let (mut app, _file) = app_for("{}");
        app.on_ready();
        wait_for_load(&mut app);

        assert_eq!(app.state(), &LoadState::Loaded);
        assert!(app.chart_set().unwrap().is_empty());
    }
}
