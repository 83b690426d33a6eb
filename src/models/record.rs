//! Nutrition record model
//!
//! One logged food entry's nutrient values at a given quantity. The persisted
//! JSON keys (`quantity`, `p`, `c`, `f`, `fib`, `sug`, `sod`, `image`) are the
//! abbreviations used throughout existing stored logs and must not change.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ValidationError;

/// A food entry's nutrient content at its current quantity
///
/// All nutrient fields are expressed per `quantity_grams`; rescaling the
/// quantity rescales every nutrient by the same ratio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "quantity")]
    pub quantity_grams: f64,
    #[serde(default)]
    pub calories: f64,
    #[serde(rename = "p", default)]
    pub protein: f64,       // grams
    #[serde(rename = "c", default)]
    pub carbs: f64,         // grams
    #[serde(rename = "f", default)]
    pub fat: f64,           // grams
    #[serde(rename = "fib", default)]
    pub fiber: f64,         // grams
    #[serde(rename = "sug", default)]
    pub sugar: f64,         // grams
    #[serde(rename = "sod", default)]
    pub sodium: f64,        // milligrams
    #[serde(rename = "image", default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
}

impl NutritionRecord {
    /// Create a record with a fresh id and all nutrients zeroed
    pub fn new(name: impl Into<String>, quantity_grams: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            quantity_grams,
            calories: 0.0,
            protein: 0.0,
            carbs: 0.0,
            fat: 0.0,
            fiber: 0.0,
            sugar: 0.0,
            sodium: 0.0,
            image_ref: None,
        }
    }

    /// Produce a copy at a new quantity with every nutrient scaled linearly.
    ///
    /// The returned record keeps the same `id`. Fails when the new quantity
    /// is not positive or the original quantity is zero.
    pub fn rescaled(&self, new_quantity_grams: f64) -> Result<Self, ValidationError> {
        if new_quantity_grams <= 0.0 || !new_quantity_grams.is_finite() {
            return Err(ValidationError::InvalidQuantity(new_quantity_grams));
        }
        if self.quantity_grams == 0.0 {
            return Err(ValidationError::ZeroQuantity);
        }

        let ratio = new_quantity_grams / self.quantity_grams;
        Ok(Self {
            id: self.id.clone(),
            name: self.name.clone(),
            quantity_grams: new_quantity_grams,
            calories: self.calories * ratio,
            protein: self.protein * ratio,
            carbs: self.carbs * ratio,
            fat: self.fat * ratio,
            fiber: self.fiber * ratio,
            sugar: self.sugar * ratio,
            sodium: self.sodium * ratio,
            image_ref: self.image_ref.clone(),
        })
    }
}
