//! Data module - workout dataset loading and series building

mod dataset;
mod loader;
mod processor;

pub use dataset::{ExerciseSeries, SeriesLengthError, WorkoutDataset, WorkoutRecord};
pub use loader::{
    endpoint_url, DataLoader, DataSource, LoaderError, DATE_COLUMN, EXERCISE_COLUMN,
    NOTES_COLUMN, REPS_COLUMN, WEIGHT_COLUMN, WORKOUT_DATA_PATH,
};
pub use processor::{ChartPoint, ChartSet, DataProcessor, ProgressSeries, VolumeBar};
