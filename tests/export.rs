use assert_cmd::Command;
use std::fs;
use std::path::Path;
use workout_charts::charts::ColorPicker;
use workout_charts::data::{DataProcessor, WorkoutDataset};
use workout_charts::export::{ReportExporter, CSV_FILE, PROGRESS_FILE, VOLUME_FILE};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

const ENDPOINT_BODY: &str = r#"{
    "Bench": {"dates": ["2024-01-01", "2024-01-08"], "weights": [50, 55], "reps": [10, 8]},
    "Squat": {"dates": ["2024-01-02"], "weights": [80], "reps": [5]}
}"#;

fn assert_png(path: &Path) {
    let bytes = fs::read(path).unwrap();
    assert!(bytes.starts_with(&PNG_SIGNATURE), "{} is not a PNG", path.display());
}

#[test]
fn export_writes_both_charts_and_the_csv() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("report");
    let dataset = WorkoutDataset::from_json(ENDPOINT_BODY).unwrap();
    let chart_set = DataProcessor::build_chart_set(&dataset, &mut ColorPicker::seeded(1));

    let summary = ReportExporter::export_all(&chart_set, &dataset, &out).unwrap();

    assert_eq!(summary.rows, 3);
    assert_eq!(summary.progress_png, out.join(PROGRESS_FILE));
    assert_eq!(summary.volume_png, out.join(VOLUME_FILE));
    assert_eq!(summary.csv, out.join(CSV_FILE));
    assert_png(&summary.progress_png);
    assert_png(&summary.volume_png);
    assert_eq!(
        fs::read_to_string(&summary.csv).unwrap().lines().count(),
        4
    );
}

#[test]
fn empty_dataset_exports_empty_charts() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = WorkoutDataset::new();
    let chart_set = DataProcessor::build_chart_set(&dataset, &mut ColorPicker::seeded(1));

    let summary = ReportExporter::export_all(&chart_set, &dataset, dir.path()).unwrap();

    assert_eq!(summary.rows, 0);
    assert_png(&summary.progress_png);
    assert_png(&summary.volume_png);
}

#[test]
fn headless_run_writes_the_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("workout_data.json");
    fs::write(&input, ENDPOINT_BODY).unwrap();
    let out = dir.path().join("out");

    Command::cargo_bin("workout-charts")
        .unwrap()
        .arg("--json")
        .arg(&input)
        .arg("--export-dir")
        .arg(&out)
        .args(["--seed", "1"])
        .assert()
        .success();

    assert_png(&out.join(PROGRESS_FILE));
    assert_png(&out.join(VOLUME_FILE));
    let csv = fs::read_to_string(out.join(CSV_FILE)).unwrap();
    assert!(csv.starts_with("Date,Exercise,Reps,Weight (kg/lbs),Notes\n"));
    assert_eq!(csv.lines().count(), 4);
}

#[test]
fn headless_run_fails_on_malformed_data() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("workout_data.json");
    fs::write(&input, "<html>login</html>").unwrap();
    let out = dir.path().join("out");

    Command::cargo_bin("workout-charts")
        .unwrap()
        .arg("--json")
        .arg(&input)
        .arg("--export-dir")
        .arg(&out)
        .assert()
        .failure();

    assert!(!out.join(PROGRESS_FILE).exists());
    assert!(!out.join(CSV_FILE).exists());
}
