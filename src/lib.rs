//! Nutrilog Library
//!
//! Core functionality for nutrition and activity tracking: daily logs,
//! calorie/macro goals, aggregation, and food lookup.

pub mod aggregate;
pub mod build_info;
pub mod diary;
pub mod goals;
pub mod lookup;
pub mod models;
pub mod steps;
pub mod store;
