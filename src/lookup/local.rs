//! Local food database provider
//!
//! Looks foods up in the `foods` table, values stored per 100g.

use rusqlite::{params, Row};

use crate::models::NutritionRecord;
use crate::store::{Database, StoreResult};

use super::{LookupError, NutritionLookup};

/// A food row in the local database, per 100g
#[derive(Debug, Clone)]
pub struct Food {
    pub id: i64,
    pub name: String,
    pub brand: Option<String>,
    pub barcode: Option<String>,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub sugar: f64,
    pub sodium: f64,
}

impl Food {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            brand: row.get("brand")?,
            barcode: row.get("barcode")?,
            calories: row.get("calories")?,
            protein: row.get("protein")?,
            carbs: row.get("carbs")?,
            fat: row.get("fat")?,
            fiber: row.get("fiber")?,
            sugar: row.get("sugar")?,
            sodium: row.get("sodium")?,
        })
    }

    /// Normalize to the canonical record shape, per 100g with a fresh id
    fn into_record(self) -> NutritionRecord {
        let mut record = NutritionRecord::new(self.name, 100.0);
        record.calories = self.calories;
        record.protein = self.protein;
        record.carbs = self.carbs;
        record.fat = self.fat;
        record.fiber = self.fiber;
        record.sugar = self.sugar;
        record.sodium = self.sodium;
        record
    }
}

/// Lookup provider over the local `foods` table
#[derive(Clone)]
pub struct LocalFoodDb {
    db: Database,
}

impl LocalFoodDb {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Insert a food, returning its row id
    pub fn insert(&self, food: &Food) -> StoreResult<i64> {
        self.db.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO foods (
                    name, brand, barcode,
                    calories, protein, carbs, fat, fiber, sugar, sodium
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                "#,
                params![
                    food.name,
                    food.brand,
                    food.barcode,
                    food.calories,
                    food.protein,
                    food.carbs,
                    food.fat,
                    food.fiber,
                    food.sugar,
                    food.sodium,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    fn search(&self, query: &str) -> StoreResult<Vec<Food>> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT * FROM foods WHERE name LIKE ?1 ORDER BY name LIMIT 25",
            )?;

            let pattern = format!("%{}%", query);
            let foods = stmt
                .query_map([pattern], Food::from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(foods)
        })
    }

    fn by_barcode(&self, code: &str) -> StoreResult<Option<Food>> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT * FROM foods WHERE barcode = ?1")?;

            let result = stmt.query_row([code], Food::from_row);
            match result {
                Ok(food) => Ok(Some(food)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
    }
}

impl NutritionLookup for LocalFoodDb {
    fn name(&self) -> &'static str {
        "local"
    }

    fn search_by_name(&self, query: &str) -> Result<Vec<NutritionRecord>, LookupError> {
        let foods = self.search(query)?;
        Ok(foods.into_iter().map(Food::into_record).collect())
    }

    fn lookup_by_barcode(&self, code: &str) -> Result<NutritionRecord, LookupError> {
        match self.by_barcode(code)? {
            Some(food) => Ok(food.into_record()),
            None => Err(LookupError::NotFound(code.to_string())),
        }
    }
}
