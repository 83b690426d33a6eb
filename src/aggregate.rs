//! Daily aggregation
//!
//! Reduces a day's meal records and exercises into totals and
//! remaining-budget figures against the calorie goal.

use serde::{Deserialize, Serialize};

use crate::models::DailyLog;

/// Summed nutrients for one day, plus exercise burn
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTotals {
    pub calories: f64,
    pub protein: f64,       // grams
    pub carbs: f64,         // grams
    pub fat: f64,           // grams
    pub fiber: f64,         // grams
    pub sugar: f64,         // grams
    pub sodium: f64,        // milligrams
    pub exercise_calories_burned: f64,
}

/// Sum all meal slots and exercises into daily totals.
///
/// Summation is commutative; record order within and across slots does not
/// affect the result.
pub fn aggregate_day(log: &DailyLog) -> DailyTotals {
    let mut totals = DailyTotals::default();

    for record in log.all_records() {
        totals.calories += record.calories;
        totals.protein += record.protein;
        totals.carbs += record.carbs;
        totals.fat += record.fat;
        totals.fiber += record.fiber;
        totals.sugar += record.sugar;
        totals.sodium += record.sodium;
    }

    for exercise in &log.exercises {
        totals.exercise_calories_burned += exercise.calories_burned;
    }

    totals
}

/// Calories left in the daily budget; negative means over budget, which is a
/// valid displayable state.
pub fn remaining_calories(totals: &DailyTotals, daily_calorie_goal: u32) -> i64 {
    (f64::from(daily_calorie_goal) - totals.calories + totals.exercise_calories_burned).round()
        as i64
}

/// Raw consumed/goal ratio; exceeds 1.0 on overage, 0.0 when the goal is
/// unset. Clamping is a presentation concern, see [`display_ratio`].
pub fn progress_ratio(consumed: f64, goal: f64) -> f64 {
    if goal > 0.0 {
        consumed / goal
    } else {
        0.0
    }
}

/// Progress ratio clamped to [0, 1] for display
pub fn display_ratio(consumed: f64, goal: f64) -> f64 {
    progress_ratio(consumed, goal).clamp(0.0, 1.0)
}
