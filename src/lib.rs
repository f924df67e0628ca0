//! Workout Charts - weight progression and training volume charts
//!
//! Loads a workout log once from the `/api/workout_data` endpoint (or a saved
//! payload / CSV export) and draws two charts: weight over time per exercise
//! and total volume (weight × reps) per exercise.

pub mod charts;
pub mod config;
pub mod data;
pub mod export;
pub mod gui;
