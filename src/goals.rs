//! Calorie and macro goal calculation
//!
//! Mifflin-St Jeor BMR scaled by a fixed activity multiplier, adjusted by
//! goal direction, with a hard floor. Macro goals come from a fixed
//! percentage split of the calorie goal.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{GoalDirection, Sex, UserProfile, ValidationError};

/// Hard safety floor for the daily calorie goal, kcal
pub const MIN_DAILY_CALORIES: u32 = 1200;

/// Calorie adjustment for lose/gain, kcal
pub const GOAL_ADJUSTMENT: f64 = 500.0;

/// Share of calories from protein
pub const PROTEIN_SPLIT: f64 = 0.30;
/// Share of calories from carbohydrates
pub const CARBS_SPLIT: f64 = 0.40;
/// Share of calories from fat
pub const FAT_SPLIT: f64 = 0.30;

/// Calories per gram of protein
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
/// Calories per gram of carbohydrate
pub const KCAL_PER_G_CARBS: f64 = 4.0;
/// Calories per gram of fat
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// Daily macro targets in grams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroGoals {
    pub protein_goal_g: u32,
    pub carbs_goal_g: u32,
    pub fat_goal_g: u32,
}

/// Calorie goal plus derived macro targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedGoals {
    pub daily_calorie_goal: u32,
    #[serde(flatten)]
    pub macros: MacroGoals,
}

/// Compute the recommended daily calorie goal for a profile.
///
/// Age is calendar-year subtraction only, with no month/day correction; the
/// source app computed it this way and the behavior is kept.
pub fn compute_daily_calorie_goal(
    profile: &UserProfile,
    reference_date: NaiveDate,
) -> Result<u32, ValidationError> {
    validate_profile(profile)?;

    let age = f64::from(reference_date.year() - profile.birth_date.year());

    let sex_term = match profile.gender {
        Sex::Male => 5.0,
        Sex::Female => -161.0,
    };
    let bmr = 10.0 * profile.weight + 6.25 * profile.height - 5.0 * age + sex_term;

    let tdee = bmr * profile.activity_level.multiplier();

    let adjusted = match profile.goal {
        GoalDirection::Lose => tdee - GOAL_ADJUSTMENT,
        GoalDirection::Maintain => tdee,
        GoalDirection::Gain => tdee + GOAL_ADJUSTMENT,
    };

    let rounded = adjusted.round();
    if rounded < f64::from(MIN_DAILY_CALORIES) {
        Ok(MIN_DAILY_CALORIES)
    } else {
        Ok(rounded as u32)
    }
}

/// Derive macro targets from a calorie goal via the fixed 30/40/30 split
pub fn compute_macro_goals(calorie_goal: u32) -> MacroGoals {
    let calories = f64::from(calorie_goal);
    MacroGoals {
        protein_goal_g: (calories * PROTEIN_SPLIT / KCAL_PER_G_PROTEIN).round() as u32,
        carbs_goal_g: (calories * CARBS_SPLIT / KCAL_PER_G_CARBS).round() as u32,
        fat_goal_g: (calories * FAT_SPLIT / KCAL_PER_G_FAT).round() as u32,
    }
}

/// Compute the full goal set for a profile.
///
/// A stored `daily_goal` on the profile takes precedence over the computed
/// calorie goal; macros always derive from whichever goal wins.
pub fn derive_goals(
    profile: &UserProfile,
    reference_date: NaiveDate,
) -> Result<DerivedGoals, ValidationError> {
    let daily_calorie_goal = match profile.daily_goal {
        Some(stored) => stored.max(MIN_DAILY_CALORIES),
        None => compute_daily_calorie_goal(profile, reference_date)?,
    };

    Ok(DerivedGoals {
        daily_calorie_goal,
        macros: compute_macro_goals(daily_calorie_goal),
    })
}

/// Check the profile invariants: positive finite height/weight, and a target
/// weight whenever the goal is lose or gain
pub fn validate_profile(profile: &UserProfile) -> Result<(), ValidationError> {
    if !(profile.height.is_finite() && profile.height > 0.0) {
        return Err(ValidationError::InvalidField {
            field: "height",
            value: profile.height,
        });
    }
    if !(profile.weight.is_finite() && profile.weight > 0.0) {
        return Err(ValidationError::InvalidField {
            field: "weight",
            value: profile.weight,
        });
    }
    match profile.goal {
        GoalDirection::Lose | GoalDirection::Gain => {
            if profile.target_weight.is_none() {
                return Err(ValidationError::MissingTargetWeight(profile.goal.as_str()));
            }
        }
        GoalDirection::Maintain => {}
    }
    Ok(())
}
