//! USDA FoodData Central provider
//!
//! Searches the FDC `/foods/search` endpoint and maps nutrient numbers onto
//! the canonical record, per 100g.

use serde::Deserialize;

use crate::models::NutritionRecord;

use super::{LookupError, NutritionLookup};

const BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";

// FDC nutrient numbers
const NUTRIENT_ENERGY: &str = "208";
const NUTRIENT_PROTEIN: &str = "203";
const NUTRIENT_CARBS: &str = "205";
const NUTRIENT_FAT: &str = "204";
const NUTRIENT_FIBER: &str = "291";
const NUTRIENT_SUGAR: &str = "269";
const NUTRIENT_SODIUM: &str = "307";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    foods: Vec<FdcFood>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FdcFood {
    description: String,
    #[serde(default)]
    food_nutrients: Vec<FdcNutrient>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FdcNutrient {
    #[serde(default)]
    nutrient_number: String,
    #[serde(default)]
    value: f64,
}

impl FdcFood {
    fn nutrient(&self, number: &str) -> f64 {
        self.food_nutrients
            .iter()
            .find(|n| n.nutrient_number == number)
            .map(|n| n.value)
            .unwrap_or(0.0)
    }
}

/// Adapter: one FDC food to the canonical record, per 100g
fn record_from_fdc(food: &FdcFood) -> NutritionRecord {
    let mut record = NutritionRecord::new(food.description.clone(), 100.0);
    record.calories = food.nutrient(NUTRIENT_ENERGY);
    record.protein = food.nutrient(NUTRIENT_PROTEIN);
    record.carbs = food.nutrient(NUTRIENT_CARBS);
    record.fat = food.nutrient(NUTRIENT_FAT);
    record.fiber = food.nutrient(NUTRIENT_FIBER);
    record.sugar = food.nutrient(NUTRIENT_SUGAR);
    record.sodium = food.nutrient(NUTRIENT_SODIUM);
    record
}

/// USDA FoodData Central client
pub struct UsdaClient {
    client: reqwest::blocking::Client,
    api_key: String,
    base_url: String,
}

impl UsdaClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Override the endpoint (tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl NutritionLookup for UsdaClient {
    fn name(&self) -> &'static str {
        "usda"
    }

    fn search_by_name(&self, query: &str) -> Result<Vec<NutritionRecord>, LookupError> {
        let url = format!("{}/foods/search", self.base_url);
        let response: SearchResponse = self
            .client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("query", query),
                ("pageSize", "10"),
            ])
            .send()?
            .error_for_status()?
            .json()?;

        Ok(response.foods.iter().map(record_from_fdc).collect())
    }
}
