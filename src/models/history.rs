use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::measurement::MeasurementInput;
use super::result::CalculationResult;

/// Snapshot of one past calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
  /// Creation time in epoch milliseconds, unique within a log
  pub id: i64,
  pub recorded_at: DateTime<Utc>,
  pub input: MeasurementInput,
  pub result: CalculationResult,
}

impl HistoryEntry {
  /// One-line description for history lists, e.g. "25yo, male, Veg, Goal: maintain"
  pub fn summary(&self) -> String {
    format!(
      "{}yo, {}, {}, Goal: {}",
      self.input.age.trim(),
      self.input.gender,
      self.input.diet.short_label(),
      self.input.goal
    )
  }
}
