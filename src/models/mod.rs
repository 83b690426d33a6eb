//! Data models
//!
//! Value types for nutrition records, daily logs, the user profile, and
//! settings blobs, with their persisted JSON shapes.

mod daily_log;
mod profile;
mod record;
mod settings;

use thiserror::Error;

pub use daily_log::{DailyLog, ExerciseEntry, MealSlot};
pub use profile::{ActivityLevel, GoalDirection, Sex, UserProfile};
pub use record::NutritionRecord;
pub use settings::{WaterSettings, WeightEntry};

/// Synchronous input validation failure
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Invalid quantity: {0} (must be > 0)")]
    InvalidQuantity(f64),

    #[error("Record quantity is zero, cannot rescale")]
    ZeroQuantity,

    #[error("Invalid {field}: {value}")]
    InvalidField { field: &'static str, value: f64 },

    #[error("Target weight is required for goal '{0}'")]
    MissingTargetWeight(&'static str),

    #[error("Invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),
}
