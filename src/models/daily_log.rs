//! Daily log model
//!
//! One calendar day's meals, water, weight, and exercise. The storage key is
//! the ISO date; an absent key is equivalent to an all-empty log.

use serde::{Deserialize, Serialize};

use super::NutritionRecord;

/// Meal slot enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl MealSlot {
    pub const ALL: [MealSlot; 4] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Dinner,
        MealSlot::Snacks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
            MealSlot::Snacks => "snacks",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "breakfast" => Some(MealSlot::Breakfast),
            "lunch" => Some(MealSlot::Lunch),
            "dinner" => Some(MealSlot::Dinner),
            "snacks" | "snack" => Some(MealSlot::Snacks),
            _ => None,
        }
    }
}

/// One exercise entry logged against a day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseEntry {
    pub name: String,
    #[serde(default)]
    pub duration_minutes: f64,
    #[serde(default)]
    pub calories_burned: f64,
}

/// The persisted record for one calendar day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyLog {
    #[serde(default)]
    pub breakfast: Vec<NutritionRecord>,
    #[serde(default)]
    pub lunch: Vec<NutritionRecord>,
    #[serde(default)]
    pub dinner: Vec<NutritionRecord>,
    #[serde(default)]
    pub snacks: Vec<NutritionRecord>,
    /// Cups of water drunk
    #[serde(default)]
    pub water: u32,
    /// Weight logged on this day, kg
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default)]
    pub exercises: Vec<ExerciseEntry>,
}

impl DailyLog {
    /// Records in one meal slot
    pub fn slot(&self, slot: MealSlot) -> &[NutritionRecord] {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
            MealSlot::Snacks => &self.snacks,
        }
    }

    fn slot_mut(&mut self, slot: MealSlot) -> &mut Vec<NutritionRecord> {
        match slot {
            MealSlot::Breakfast => &mut self.breakfast,
            MealSlot::Lunch => &mut self.lunch,
            MealSlot::Dinner => &mut self.dinner,
            MealSlot::Snacks => &mut self.snacks,
        }
    }

    /// Append a record to a meal slot, preserving insertion order
    pub fn add_record(&mut self, slot: MealSlot, record: NutritionRecord) {
        self.slot_mut(slot).push(record);
    }

    /// Remove a record by id from a slot, returning it when found
    pub fn remove_record(&mut self, slot: MealSlot, id: &str) -> Option<NutritionRecord> {
        let records = self.slot_mut(slot);
        let pos = records.iter().position(|r| r.id == id)?;
        Some(records.remove(pos))
    }

    /// Replace a record in a slot by id, keeping its position
    pub fn replace_record(&mut self, slot: MealSlot, record: NutritionRecord) -> bool {
        let records = self.slot_mut(slot);
        match records.iter().position(|r| r.id == record.id) {
            Some(pos) => {
                records[pos] = record;
                true
            }
            None => false,
        }
    }

    /// Iterate records across all four meal slots
    pub fn all_records(&self) -> impl Iterator<Item = &NutritionRecord> {
        self.breakfast
            .iter()
            .chain(self.lunch.iter())
            .chain(self.dinner.iter())
            .chain(self.snacks.iter())
    }

    /// True when nothing has been logged for the day
    pub fn is_empty(&self) -> bool {
        self.all_records().next().is_none()
            && self.water == 0
            && self.weight.is_none()
            && self.exercises.is_empty()
    }
}
