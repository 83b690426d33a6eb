//! Nutrition lookup providers
//!
//! Resolves free-text food names or barcodes to nutrition records. Each
//! provider normalizes its own payload into the canonical record shape at
//! the boundary; the core never sees provider-specific fields.

pub mod label;
pub mod local;
pub mod off;
pub mod spoonacular;
pub mod usda;

use thiserror::Error;
use tracing::warn;

use crate::models::NutritionRecord;
use crate::store::StoreError;

pub use label::parse_label_text;
pub use local::LocalFoodDb;
pub use off::OpenFoodFactsClient;
pub use spoonacular::SpoonacularClient;
pub use usda::UsdaClient;

/// Lookup failure
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Unexpected payload from {provider}: {detail}")]
    BadPayload {
        provider: &'static str,
        detail: String,
    },

    #[error("No result for '{0}'")]
    NotFound(String),

    #[error("{0} does not support this lookup")]
    Unsupported(&'static str),
}

/// A nutrition lookup backend
pub trait NutritionLookup {
    /// Provider name, used in logs and errors
    fn name(&self) -> &'static str;

    /// Resolve a free-text food name to candidate records
    fn search_by_name(&self, query: &str) -> Result<Vec<NutritionRecord>, LookupError>;

    /// Resolve a barcode to a single record
    fn lookup_by_barcode(&self, _code: &str) -> Result<NutritionRecord, LookupError> {
        Err(LookupError::Unsupported(self.name()))
    }
}

/// Search every provider in order and concatenate candidates.
///
/// Failed providers are logged and skipped; no ranking or dedup is applied
/// across providers.
pub fn search_all(
    providers: &[&dyn NutritionLookup],
    query: &str,
) -> Vec<NutritionRecord> {
    let mut out = Vec::new();
    for provider in providers {
        match provider.search_by_name(query) {
            Ok(records) => out.extend(records),
            Err(e) => warn!(provider = provider.name(), error = %e, "lookup failed"),
        }
    }
    out
}
