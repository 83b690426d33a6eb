//! Settings and history blobs
//!
//! Water tracking settings and the weight history list, persisted under the
//! `waterSettings` and `weightHistory` keys.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Water tracking configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterSettings {
    /// Daily goal in cups
    pub goal: u32,
    /// Cup size in milliliters
    pub cup_size: u32,
}

impl Default for WaterSettings {
    fn default() -> Self {
        Self {
            goal: 8,
            cup_size: 250,
        }
    }
}

/// One entry in the weight history
///
/// Written unordered; consumers sort by date first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub date: NaiveDate,
    /// Kilograms
    pub weight: f64,
}
