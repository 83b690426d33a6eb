//! Open Food Facts provider
//!
//! Barcode lookups against the OFF product endpoint and free-text search via
//! `cgi/search.pl`, normalizing the `nutriments` per-100g keys onto the
//! canonical record.

use serde::Deserialize;

use crate::models::NutritionRecord;

use super::{LookupError, NutritionLookup};

const BASE_URL: &str = "https://world.openfoodfacts.org";

#[derive(Debug, Deserialize)]
struct ProductResponse {
    #[serde(default)]
    status: i32,
    product: Option<Product>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
struct Product {
    #[serde(default)]
    code: String,
    #[serde(default)]
    product_name: String,
    #[serde(default)]
    nutriments: Nutriments,
}

#[derive(Debug, Default, Deserialize)]
struct Nutriments {
    #[serde(rename = "energy-kcal_100g", default)]
    energy_kcal_100g: f64,
    #[serde(rename = "proteins_100g", default)]
    proteins_100g: f64,
    #[serde(rename = "carbohydrates_100g", default)]
    carbohydrates_100g: f64,
    #[serde(rename = "fat_100g", default)]
    fat_100g: f64,
    #[serde(rename = "fiber_100g", default)]
    fiber_100g: f64,
    #[serde(rename = "sugars_100g", default)]
    sugars_100g: f64,
    /// OFF reports sodium in grams per 100g
    #[serde(rename = "sodium_100g", default)]
    sodium_100g: f64,
}

/// Adapter: OFF product to the canonical record, per 100g
fn record_from_product(fallback_name: &str, product: &Product) -> NutritionRecord {
    let name = if product.product_name.is_empty() {
        fallback_name.to_string()
    } else {
        product.product_name.clone()
    };

    let mut record = NutritionRecord::new(name, 100.0);
    record.calories = product.nutriments.energy_kcal_100g;
    record.protein = product.nutriments.proteins_100g;
    record.carbs = product.nutriments.carbohydrates_100g;
    record.fat = product.nutriments.fat_100g;
    record.fiber = product.nutriments.fiber_100g;
    record.sugar = product.nutriments.sugars_100g;
    record.sodium = product.nutriments.sodium_100g * 1000.0; // g -> mg
    record
}

/// Open Food Facts client
pub struct OpenFoodFactsClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl Default for OpenFoodFactsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenFoodFactsClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Override the endpoint (tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl NutritionLookup for OpenFoodFactsClient {
    fn name(&self) -> &'static str {
        "openfoodfacts"
    }

    fn search_by_name(&self, query: &str) -> Result<Vec<NutritionRecord>, LookupError> {
        let url = format!("{}/cgi/search.pl", self.base_url);
        let response: SearchResponse = self
            .client
            .get(&url)
            .query(&[
                ("search_terms", query),
                ("search_simple", "1"),
                ("action", "process"),
                ("json", "1"),
                ("page_size", "10"),
            ])
            .send()?
            .error_for_status()?
            .json()?;

        Ok(response
            .products
            .iter()
            .map(|product| {
                let fallback = if product.code.is_empty() {
                    query
                } else {
                    product.code.as_str()
                };
                record_from_product(fallback, product)
            })
            .collect())
    }

    fn lookup_by_barcode(&self, code: &str) -> Result<NutritionRecord, LookupError> {
        let url = format!("{}/api/v0/product/{}.json", self.base_url, code);
        let response: ProductResponse = self
            .client
            .get(&url)
            .send()?
            .error_for_status()?
            .json()?;

        if response.status != 1 {
            return Err(LookupError::NotFound(code.to_string()));
        }
        let product = response.product.ok_or_else(|| LookupError::BadPayload {
            provider: "openfoodfacts",
            detail: "status 1 without product".to_string(),
        })?;

        Ok(record_from_product(code, &product))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_record_from_product() {
        let raw = r#"{
            "status": 1,
            "product": {
                "product_name": "Haferflocken",
                "nutriments": {
                    "energy-kcal_100g": 372.0,
                    "proteins_100g": 13.5,
                    "carbohydrates_100g": 58.7,
                    "fat_100g": 7.0,
                    "fiber_100g": 10.0,
                    "sugars_100g": 0.7,
                    "sodium_100g": 0.002
                }
            }
        }"#;
        let response: ProductResponse = serde_json::from_str(raw).unwrap();
        let record = record_from_product("4000417025005", response.product.as_ref().unwrap());

        assert_eq!(record.name, "Haferflocken");
        assert_eq!(record.calories, 372.0);
        assert_eq!(record.protein, 13.5);
        assert_eq!(record.sugar, 0.7);
        // grams converted to milligrams
        assert_eq!(record.sodium, 2.0);
    }

    #[test]
    fn test_missing_name_falls_back_to_code() {
        let raw = r#"{"status": 1, "product": {"nutriments": {}}}"#;
        let response: ProductResponse = serde_json::from_str(raw).unwrap();
        let record = record_from_product("123", response.product.as_ref().unwrap());
        assert_eq!(record.name, "123");
    }

    #[test]
    fn test_not_found_status() {
        let raw = r#"{"status": 0, "status_verbose": "product not found"}"#;
        let response: ProductResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.status, 0);
        assert!(response.product.is_none());
    }

    #[test]
    fn test_search_response_maps_products_in_order() {
        let raw = r#"{
            "count": 2,
            "products": [
                {
                    "code": "111",
                    "product_name": "Apfelmus",
                    "nutriments": {"energy-kcal_100g": 80.0, "sugars_100g": 18.0}
                },
                {
                    "code": "222",
                    "nutriments": {"energy-kcal_100g": 52.0}
                }
            ]
        }"#;
        let response: SearchResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.products.len(), 2);

        let first = record_from_product("apple", &response.products[0]);
        assert_eq!(first.name, "Apfelmus");
        assert_eq!(first.calories, 80.0);
        assert_eq!(first.sugar, 18.0);

        // Nameless product falls back to its code
        let second = record_from_product(&response.products[1].code, &response.products[1]);
        assert_eq!(second.name, "222");
        assert_eq!(second.calories, 52.0);
    }
}
