//! Test utilities and helpers for unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Measurement input factories
//! - Helper assertions

use crate::db::MemorySlotStore;
use crate::models::{Gender, MeasurementInput, UnitSystem};
use sqlx::SqlitePool;
use std::sync::Arc;

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// Fresh in-memory slot store
pub fn memory_store() -> Arc<MemorySlotStore> {
  Arc::new(MemorySlotStore::new())
}

/// ---------------------------------------------------------------------------
/// Input Factories
/// ---------------------------------------------------------------------------

/// Metric input (male, moderate activity) with the given age, height and weight
pub fn metric_input(age: &str, height_cm: &str, weight_kg: &str) -> MeasurementInput {
  MeasurementInput {
    age: age.to_string(),
    height_cm: height_cm.to_string(),
    weight_kg: weight_kg.to_string(),
    unit: UnitSystem::Metric,
    ..MeasurementInput::default()
  }
}

/// US-customary input (male, moderate activity)
pub fn us_input(age: &str, feet: &str, inches: &str, pounds: &str) -> MeasurementInput {
  MeasurementInput {
    age: age.to_string(),
    height_ft: feet.to_string(),
    height_in: inches.to_string(),
    weight_lb: pounds.to_string(),
    unit: UnitSystem::Us,
    ..MeasurementInput::default()
  }
}

/// Female metric input
pub fn female_input(age: &str, height_cm: &str, weight_kg: &str) -> MeasurementInput {
  MeasurementInput {
    gender: Gender::Female,
    ..metric_input(age, height_cm, weight_kg)
  }
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {
    let diff = ($left - $right).abs();
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      $left,
      $right,
      diff,
      $tolerance
    );
  };
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    let tables: Vec<(String,)> =
      sqlx::query_as("SELECT name FROM sqlite_master WHERE type='table' AND name = 'kv_slots'")
        .fetch_all(&pool)
        .await
        .expect("Failed to query tables");

    assert_eq!(tables.len(), 1);

    teardown_test_db(pool).await;
  }

  #[test]
  fn test_input_factories() {
    let input = us_input("40", "6", "1", "200");
    assert_eq!(input.unit, UnitSystem::Us);
    assert_eq!(input.height_ft, "6");
    // Metric pair keeps the form defaults
    assert_eq!(input.height_cm, "180");

    let input = female_input("30", "165", "65");
    assert_eq!(input.gender, Gender::Female);
    assert_eq!(input.unit, UnitSystem::Metric);
  }
}
