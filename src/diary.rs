//! Diary operations
//!
//! Read/modify/write operations over the persistence gateway: daily logs,
//! water, weight, exercises, the user profile, and settings blobs.
//!
//! A read-then-write against one date key is performed as a single load,
//! mutate, save sequence here; two concurrent callers writing the same date
//! are last-write-wins (see `store::gateway`).

use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

use crate::aggregate::{self, DailyTotals};
use crate::goals::{self, DerivedGoals};
use crate::models::{
    DailyLog, ExerciseEntry, MealSlot, NutritionRecord, UserProfile, ValidationError,
    WaterSettings, WeightEntry,
};
use crate::store::gateway::{
    Gateway, PROFILE_KEY, STEP_NOTIFIED_KEY, WATER_SETTINGS_KEY, WEIGHT_HISTORY_KEY,
};
use crate::store::StoreError;

/// Diary operation failure
#[derive(Debug, Error)]
pub enum DiaryError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Malformed stored value under key '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No profile has been saved yet")]
    ProfileMissing,

    #[error("No record with id '{0}' in that meal")]
    RecordNotFound(String),
}

pub type DiaryResult<T> = Result<T, DiaryError>;

/// Totals, goals, and remaining budget for one date
#[derive(Debug, Clone, PartialEq)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub totals: DailyTotals,
    pub goals: DerivedGoals,
    pub remaining_calories: i64,
}

fn date_key(date: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(date.to_string()))
}

fn decode<T: serde::de::DeserializeOwned>(key: &str, value: serde_json::Value) -> DiaryResult<T> {
    serde_json::from_value(value).map_err(|source| DiaryError::Corrupt {
        key: key.to_string(),
        source,
    })
}

/// Load the log for a date; an absent key yields an empty log
pub fn load_day(gw: &dyn Gateway, date: &str) -> DiaryResult<DailyLog> {
    date_key(date)?;
    match gw.get(date)? {
        Some(value) => decode(date, value),
        None => Ok(DailyLog::default()),
    }
}

/// Persist the log for a date
pub fn save_day(gw: &dyn Gateway, date: &str, log: &DailyLog) -> DiaryResult<()> {
    date_key(date)?;
    let value = serde_json::to_value(log).map_err(StoreError::from)?;
    gw.set(date, &value)?;
    debug!(date, "saved daily log");
    Ok(())
}

/// Load every date in `[start, end]` inclusive, in one multi-get
pub fn load_days(
    gw: &dyn Gateway,
    start: &str,
    end: &str,
) -> DiaryResult<Vec<(NaiveDate, DailyLog)>> {
    let start = date_key(start)?;
    let end = date_key(end)?;

    let dates: Vec<String> = start
        .iter_days()
        .take_while(|d| *d <= end)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect();
    let keys: Vec<&str> = dates.iter().map(String::as_str).collect();

    let mut out = Vec::with_capacity(keys.len());
    for (key, value) in gw.multi_get(&keys)? {
        let log = match value {
            Some(value) => decode(&key, value)?,
            None => DailyLog::default(),
        };
        // Keys came from formatted dates above
        let date = date_key(&key)?;
        out.push((date, log));
    }
    Ok(out)
}

/// Append a record to a meal slot for a date
pub fn add_record_to_meal(
    gw: &dyn Gateway,
    date: &str,
    slot: MealSlot,
    record: NutritionRecord,
) -> DiaryResult<()> {
    if record.quantity_grams <= 0.0 {
        return Err(ValidationError::InvalidQuantity(record.quantity_grams).into());
    }
    let mut log = load_day(gw, date)?;
    log.add_record(slot, record);
    save_day(gw, date, &log)
}

/// Remove a record by id from a meal slot, returning it
pub fn remove_record_from_meal(
    gw: &dyn Gateway,
    date: &str,
    slot: MealSlot,
    id: &str,
) -> DiaryResult<NutritionRecord> {
    let mut log = load_day(gw, date)?;
    let removed = log
        .remove_record(slot, id)
        .ok_or_else(|| DiaryError::RecordNotFound(id.to_string()))?;
    save_day(gw, date, &log)?;
    Ok(removed)
}

/// Rescale a logged record to a new quantity, preserving its slot position
pub fn rescale_meal_record(
    gw: &dyn Gateway,
    date: &str,
    slot: MealSlot,
    id: &str,
    new_quantity_grams: f64,
) -> DiaryResult<NutritionRecord> {
    let mut log = load_day(gw, date)?;
    let current = log
        .slot(slot)
        .iter()
        .find(|r| r.id == id)
        .ok_or_else(|| DiaryError::RecordNotFound(id.to_string()))?;

    let rescaled = current.rescaled(new_quantity_grams)?;
    log.replace_record(slot, rescaled.clone());
    save_day(gw, date, &log)?;
    Ok(rescaled)
}

/// Increment the day's water count by one cup, returning the new count
pub fn add_water(gw: &dyn Gateway, date: &str) -> DiaryResult<u32> {
    let mut log = load_day(gw, date)?;
    log.water += 1;
    save_day(gw, date, &log)?;
    Ok(log.water)
}

/// Decrement the day's water count, never going below zero
pub fn remove_water(gw: &dyn Gateway, date: &str) -> DiaryResult<u32> {
    let mut log = load_day(gw, date)?;
    log.water = log.water.saturating_sub(1);
    save_day(gw, date, &log)?;
    Ok(log.water)
}

/// Append an exercise entry to a date
pub fn add_exercise(gw: &dyn Gateway, date: &str, entry: ExerciseEntry) -> DiaryResult<()> {
    let mut log = load_day(gw, date)?;
    log.exercises.push(entry);
    save_day(gw, date, &log)
}

/// Log a weight measurement: sets the day's weight and appends to the
/// weight history blob
pub fn log_weight(gw: &dyn Gateway, date: &str, weight_kg: f64) -> DiaryResult<()> {
    if !(weight_kg.is_finite() && weight_kg > 0.0) {
        return Err(ValidationError::InvalidField {
            field: "weight",
            value: weight_kg,
        }
        .into());
    }
    let parsed = date_key(date)?;

    let mut log = load_day(gw, date)?;
    log.weight = Some(weight_kg);
    save_day(gw, date, &log)?;

    let mut history = raw_weight_history(gw)?;
    history.push(WeightEntry {
        date: parsed,
        weight: weight_kg,
    });
    let value = serde_json::to_value(&history).map_err(StoreError::from)?;
    gw.set(WEIGHT_HISTORY_KEY, &value)?;
    Ok(())
}

fn raw_weight_history(gw: &dyn Gateway) -> DiaryResult<Vec<WeightEntry>> {
    match gw.get(WEIGHT_HISTORY_KEY)? {
        Some(value) => decode(WEIGHT_HISTORY_KEY, value),
        None => Ok(Vec::new()),
    }
}

/// Weight history sorted by date ascending.
///
/// The blob is unordered on write; sorting happens here, on read.
pub fn weight_history(gw: &dyn Gateway) -> DiaryResult<Vec<WeightEntry>> {
    let mut history = raw_weight_history(gw)?;
    history.sort_by_key(|e| e.date);
    Ok(history)
}

/// Load the saved user profile
pub fn load_profile(gw: &dyn Gateway) -> DiaryResult<UserProfile> {
    match gw.get(PROFILE_KEY)? {
        Some(value) => decode(PROFILE_KEY, value),
        None => Err(DiaryError::ProfileMissing),
    }
}

/// Persist the user profile.
///
/// The profile is validated first; an invariant-violating profile is never
/// written to storage.
pub fn save_profile(gw: &dyn Gateway, profile: &UserProfile) -> DiaryResult<()> {
    goals::validate_profile(profile)?;
    let value = serde_json::to_value(profile).map_err(StoreError::from)?;
    gw.set(PROFILE_KEY, &value)?;
    Ok(())
}

/// Water settings, falling back to defaults when never configured
pub fn water_settings(gw: &dyn Gateway) -> DiaryResult<WaterSettings> {
    match gw.get(WATER_SETTINGS_KEY)? {
        Some(value) => decode(WATER_SETTINGS_KEY, value),
        None => Ok(WaterSettings::default()),
    }
}

/// Persist water settings
pub fn save_water_settings(gw: &dyn Gateway, settings: &WaterSettings) -> DiaryResult<()> {
    let value = serde_json::to_value(settings).map_err(StoreError::from)?;
    gw.set(WATER_SETTINGS_KEY, &value)?;
    Ok(())
}

/// Whether the step goal notification already fired on the given date
pub fn step_goal_notified_on(gw: &dyn Gateway, date: &str) -> DiaryResult<bool> {
    date_key(date)?;
    match gw.get(STEP_NOTIFIED_KEY)? {
        Some(value) => {
            let last: String = decode(STEP_NOTIFIED_KEY, value)?;
            Ok(last == date)
        }
        None => Ok(false),
    }
}

/// Record that the step goal notification fired on the given date
pub fn mark_step_goal_notified(gw: &dyn Gateway, date: &str) -> DiaryResult<()> {
    date_key(date)?;
    gw.set(STEP_NOTIFIED_KEY, &serde_json::Value::String(date.to_string()))?;
    Ok(())
}

/// Totals, goals, and remaining budget for one date, using the saved profile
pub fn day_summary(gw: &dyn Gateway, date: &str) -> DiaryResult<DaySummary> {
    let parsed = date_key(date)?;
    let log = load_day(gw, date)?;
    let profile = load_profile(gw)?;

    let totals = aggregate::aggregate_day(&log);
    let goals = goals::derive_goals(&profile, parsed)?;
    let remaining = aggregate::remaining_calories(&totals, goals.daily_calorie_goal);

    Ok(DaySummary {
        date: parsed,
        totals,
        goals,
        remaining_calories: remaining,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityLevel, GoalDirection, Sex};
    use crate::store::{migrations, Database, MemoryStore, SqliteStore};
    use pretty_assertions::assert_eq;

    fn rec(id: &str, calories: f64) -> NutritionRecord {
        let mut r = NutritionRecord::new("food", 100.0);
        r.id = id.to_string();
        r.calories = calories;
        r
    }

    fn profile() -> UserProfile {
        UserProfile {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            gender: Sex::Male,
            birth_date: NaiveDate::from_ymd_opt(1995, 3, 20).unwrap(),
            height: 180.0,
            weight: 80.0,
            goal: GoalDirection::Lose,
            target_weight: Some(75.0),
            activity_level: ActivityLevel::Active,
            daily_goal: None,
        }
    }

    #[test]
    fn test_load_absent_day_is_empty() {
        let gw = MemoryStore::new();
        let log = load_day(&gw, "2025-01-09").unwrap();
        assert_eq!(log, DailyLog::default());
    }

    #[test]
    fn test_invalid_date_rejected() {
        let gw = MemoryStore::new();
        assert!(matches!(
            load_day(&gw, "Jan 9, 2025"),
            Err(DiaryError::Validation(ValidationError::InvalidDate(_)))
        ));
    }

    #[test]
    fn test_day_roundtrip() {
        let gw = MemoryStore::new();
        let mut log = DailyLog::default();
        log.add_record(MealSlot::Lunch, rec("a", 500.0));
        log.water = 3;

        save_day(&gw, "2025-01-09", &log).unwrap();
        assert_eq!(load_day(&gw, "2025-01-09").unwrap(), log);
    }

    #[test]
    fn test_day_roundtrip_sqlite() {
        let db = Database::open_in_memory().unwrap();
        db.with_conn(|conn| migrations::run_migrations(conn)).unwrap();
        let gw = SqliteStore::new(db);

        let mut record = rec("a", 123.4);
        record.quantity_grams = 62.5;
        record.protein = 5.67;
        record.carbs = 17.25;
        record.fat = 0.125;
        record.fiber = 2.5;
        record.sugar = 9.01;
        record.sodium = 480.5;
        record.image_ref = Some("file:///scan/a.jpg".to_string());

        let mut log = DailyLog::default();
        log.add_record(MealSlot::Breakfast, record);
        log.add_record(MealSlot::Snacks, rec("b", 90.0));
        log.water = 4;
        log.weight = Some(80.25);
        log.exercises.push(ExerciseEntry {
            name: "Running".to_string(),
            duration_minutes: 32.5,
            calories_burned: 287.3,
        });

        save_day(&gw, "2025-01-09", &log).unwrap();
        assert_eq!(load_day(&gw, "2025-01-09").unwrap(), log);
    }

    #[test]
    fn test_add_then_rescale_record() {
        let gw = MemoryStore::new();
        add_record_to_meal(&gw, "2025-01-09", MealSlot::Lunch, rec("a", 500.0)).unwrap();

        let rescaled =
            rescale_meal_record(&gw, "2025-01-09", MealSlot::Lunch, "a", 150.0).unwrap();
        assert_eq!(rescaled.calories, 750.0);
        assert_eq!(rescaled.id, "a");

        let log = load_day(&gw, "2025-01-09").unwrap();
        assert_eq!(log.slot(MealSlot::Lunch)[0].calories, 750.0);
    }

    #[test]
    fn test_rescale_missing_record() {
        let gw = MemoryStore::new();
        assert!(matches!(
            rescale_meal_record(&gw, "2025-01-09", MealSlot::Lunch, "nope", 150.0),
            Err(DiaryError::RecordNotFound(_))
        ));
    }

    #[test]
    fn test_remove_record() {
        let gw = MemoryStore::new();
        add_record_to_meal(&gw, "2025-01-09", MealSlot::Dinner, rec("a", 100.0)).unwrap();
        add_record_to_meal(&gw, "2025-01-09", MealSlot::Dinner, rec("b", 200.0)).unwrap();

        let removed = remove_record_from_meal(&gw, "2025-01-09", MealSlot::Dinner, "a").unwrap();
        assert_eq!(removed.id, "a");

        let log = load_day(&gw, "2025-01-09").unwrap();
        assert_eq!(log.slot(MealSlot::Dinner).len(), 1);
        assert_eq!(log.slot(MealSlot::Dinner)[0].id, "b");
    }

    #[test]
    fn test_water_floor_at_zero() {
        let gw = MemoryStore::new();
        assert_eq!(remove_water(&gw, "2025-01-09").unwrap(), 0);
        assert_eq!(add_water(&gw, "2025-01-09").unwrap(), 1);
        assert_eq!(add_water(&gw, "2025-01-09").unwrap(), 2);
        assert_eq!(remove_water(&gw, "2025-01-09").unwrap(), 1);
    }

    #[test]
    fn test_log_weight_updates_day_and_history() {
        let gw = MemoryStore::new();
        log_weight(&gw, "2025-01-10", 80.5).unwrap();
        log_weight(&gw, "2025-01-08", 81.0).unwrap();

        let log = load_day(&gw, "2025-01-10").unwrap();
        assert_eq!(log.weight, Some(80.5));

        // Written out of order, read back sorted
        let history = weight_history(&gw).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].date, NaiveDate::from_ymd_opt(2025, 1, 8).unwrap());
        assert_eq!(history[1].weight, 80.5);
    }

    #[test]
    fn test_log_weight_rejects_nonpositive() {
        let gw = MemoryStore::new();
        assert!(log_weight(&gw, "2025-01-10", 0.0).is_err());
        assert!(log_weight(&gw, "2025-01-10", -5.0).is_err());
    }

    #[test]
    fn test_profile_roundtrip_and_missing() {
        let gw = MemoryStore::new();
        assert!(matches!(load_profile(&gw), Err(DiaryError::ProfileMissing)));

        save_profile(&gw, &profile()).unwrap();
        assert_eq!(load_profile(&gw).unwrap(), profile());
    }

    #[test]
    fn test_invalid_profile_is_never_stored() {
        let gw = MemoryStore::new();
        let mut invalid = profile();
        invalid.target_weight = None; // required for goal lose

        assert!(matches!(
            save_profile(&gw, &invalid),
            Err(DiaryError::Validation(ValidationError::MissingTargetWeight(_)))
        ));
        // The failed save left nothing behind
        assert!(matches!(load_profile(&gw), Err(DiaryError::ProfileMissing)));
    }

    #[test]
    fn test_water_settings_default() {
        let gw = MemoryStore::new();
        assert_eq!(water_settings(&gw).unwrap(), WaterSettings::default());

        let custom = WaterSettings { goal: 10, cup_size: 330 };
        save_water_settings(&gw, &custom).unwrap();
        assert_eq!(water_settings(&gw).unwrap(), custom);
    }

    #[test]
    fn test_step_flag_is_per_date() {
        let gw = MemoryStore::new();
        assert!(!step_goal_notified_on(&gw, "2025-01-09").unwrap());

        mark_step_goal_notified(&gw, "2025-01-09").unwrap();
        assert!(step_goal_notified_on(&gw, "2025-01-09").unwrap());
        // A new day starts clean
        assert!(!step_goal_notified_on(&gw, "2025-01-10").unwrap());
    }

    #[test]
    fn test_load_days_range() {
        let gw = MemoryStore::new();
        add_record_to_meal(&gw, "2025-01-08", MealSlot::Lunch, rec("a", 500.0)).unwrap();
        add_record_to_meal(&gw, "2025-01-10", MealSlot::Lunch, rec("b", 600.0)).unwrap();

        let days = load_days(&gw, "2025-01-08", "2025-01-10").unwrap();
        assert_eq!(days.len(), 3);
        assert_eq!(days[0].1.slot(MealSlot::Lunch).len(), 1);
        assert_eq!(days[1].1, DailyLog::default());
        assert_eq!(days[2].1.slot(MealSlot::Lunch)[0].id, "b");
    }

    #[test]
    fn test_day_summary() {
        let gw = MemoryStore::new();
        save_profile(&gw, &profile()).unwrap();
        add_record_to_meal(&gw, "2025-01-09", MealSlot::Lunch, rec("a", 500.0)).unwrap();
        add_exercise(
            &gw,
            "2025-01-09",
            ExerciseEntry {
                name: "Running".to_string(),
                duration_minutes: 30.0,
                calories_burned: 300.0,
            },
        )
        .unwrap();

        let summary = day_summary(&gw, "2025-01-09").unwrap();
        // Reference profile computes to 2259 (see goals tests)
        assert_eq!(summary.goals.daily_calorie_goal, 2259);
        assert_eq!(summary.totals.calories, 500.0);
        assert_eq!(summary.remaining_calories, 2259 - 500 + 300);
    }
}
