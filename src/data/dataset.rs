//! Workout Dataset Module
//! Typed form of the `/api/workout_data` payload, validated at the boundary.

use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Series lengths differ: {dates} dates, {weights} weights, {reps} reps, {notes} notes")]
pub struct SeriesLengthError {
    pub dates: usize,
    pub weights: usize,
    pub reps: usize,
    pub notes: usize,
}

/// Wire shape of one exercise before the length check.
#[derive(Deserialize)]
struct RawSeries {
    dates: Vec<NaiveDate>,
    weights: Vec<f64>,
    reps: Vec<f64>,
    #[serde(default)]
    notes: Option<Vec<String>>,
}

impl TryFrom<RawSeries> for ExerciseSeries {
    type Error = SeriesLengthError;

    fn try_from(raw: RawSeries) -> Result<Self, Self::Error> {
        match raw.notes {
            Some(notes) => ExerciseSeries::with_notes(raw.dates, raw.weights, raw.reps, notes),
            None => ExerciseSeries::new(raw.dates, raw.weights, raw.reps),
        }
    }
}

/// Logged sets for one exercise as parallel sequences.
///
/// Index `i` in `dates`, `weights`, `reps` and `notes` refers to the same set;
/// the constructors and the deserializer both reject sequences of unequal
/// length. The endpoint payload carries no notes, so those sets get empty ones.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "RawSeries")]
pub struct ExerciseSeries {
    dates: Vec<NaiveDate>,
    weights: Vec<f64>,
    reps: Vec<f64>,
    notes: Vec<String>,
}

impl ExerciseSeries {
    pub fn new(
        dates: Vec<NaiveDate>,
        weights: Vec<f64>,
        reps: Vec<f64>,
    ) -> Result<Self, SeriesLengthError> {
        let notes = vec![String::new(); dates.len()];
        Self::with_notes(dates, weights, reps, notes)
    }

    pub fn with_notes(
        dates: Vec<NaiveDate>,
        weights: Vec<f64>,
        reps: Vec<f64>,
        notes: Vec<String>,
    ) -> Result<Self, SeriesLengthError> {
        let n = dates.len();
        if weights.len() != n || reps.len() != n || notes.len() != n {
            return Err(SeriesLengthError {
                dates: n,
                weights: weights.len(),
                reps: reps.len(),
                notes: notes.len(),
            });
        }
        Ok(Self {
            dates,
            weights,
            reps,
            notes,
        })
    }

    /// Append one logged set.
    pub fn push(&mut self, date: NaiveDate, weight: f64, reps: f64, note: impl Into<String>) {
        self.dates.push(date);
        self.weights.push(weight);
        self.reps.push(reps);
        self.notes.push(note.into());
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn reps(&self) -> &[f64] {
        &self.reps
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Iterate `(date, weight, reps, note)` per logged set.
    pub fn sets(&self) -> impl Iterator<Item = (NaiveDate, f64, f64, &str)> + '_ {
        self.dates
            .iter()
            .zip(self.weights.iter())
            .zip(self.reps.iter())
            .zip(self.notes.iter())
            .map(|(((&date, &weight), &reps), note)| (date, weight, reps, note.as_str()))
    }
}

/// One logged set in the flat layout of the server's CSV export.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutRecord {
    pub date: NaiveDate,
    pub exercise: String,
    pub reps: f64,
    pub weight: f64,
    pub notes: String,
}

/// Exercise name -> logged sets.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct WorkoutDataset {
    exercises: BTreeMap<String, ExerciseSeries>,
}

impl WorkoutDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an endpoint response body.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    /// Group flat records by exercise, each group in chronological order.
    ///
    /// Records sharing a date keep their input order.
    pub fn from_records(records: impl IntoIterator<Item = WorkoutRecord>) -> Self {
        let mut records: Vec<WorkoutRecord> = records.into_iter().collect();
        records.sort_by_key(|r| r.date);

        let mut dataset = Self::new();
        for record in records {
            dataset
                .exercises
                .entry(record.exercise)
                .or_default()
                .push(record.date, record.weight, record.reps, record.notes);
        }
        dataset
    }

    /// Flatten back into records, ordered by date then exercise name.
    pub fn to_records(&self) -> Vec<WorkoutRecord> {
        let mut records: Vec<WorkoutRecord> = self
            .exercises
            .iter()
            .flat_map(|(name, series)| {
                series.sets().map(move |(date, weight, reps, note)| WorkoutRecord {
                    date,
                    exercise: name.clone(),
                    reps,
                    weight,
                    notes: note.to_string(),
                })
            })
            .collect();
        records.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.exercise.cmp(&b.exercise)));
        records
    }

    pub fn insert(&mut self, exercise: impl Into<String>, series: ExerciseSeries) {
        self.exercises.insert(exercise.into(), series);
    }

    pub fn get(&self, exercise: &str) -> Option<&ExerciseSeries> {
        self.exercises.get(exercise)
    }

    /// Exercises in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ExerciseSeries)> {
        self.exercises.iter()
    }

    pub fn exercise_names(&self) -> Vec<String> {
        self.exercises.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// Total number of logged sets across every exercise.
    pub fn set_count(&self) -> usize {
        self.exercises.values().map(ExerciseSeries::len).sum()
    }
}
