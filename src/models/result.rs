use serde::{Deserialize, Serialize};

use super::measurement::Goal;

/// Daily offset for 0.25 lb/week change
pub const MILD_OFFSET: i64 = 250;
/// Daily offset for 0.5 lb/week change
pub const STANDARD_OFFSET: i64 = 500;
/// Daily offset for 1 lb/week change
pub const EXTREME_OFFSET: i64 = 1000;

/// Daily calorie targets derived from one measurement input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
  pub maintenance: i64,
  pub mild_loss: i64,
  pub loss: i64,
  pub extreme_loss: i64,
  pub mild_gain: i64,
  pub gain: i64,
  pub extreme_gain: i64,
}

impl CalculationResult {
  /// Build the full target set around a maintenance figure.
  /// Offsets are not clamped, so extreme loss can go negative. They
  /// saturate at the `i64` bounds instead of overflowing.
  pub fn from_maintenance(maintenance: i64) -> Self {
    Self {
      maintenance,
      mild_loss: maintenance.saturating_sub(MILD_OFFSET),
      loss: maintenance.saturating_sub(STANDARD_OFFSET),
      extreme_loss: maintenance.saturating_sub(EXTREME_OFFSET),
      mild_gain: maintenance.saturating_add(MILD_OFFSET),
      gain: maintenance.saturating_add(STANDARD_OFFSET),
      extreme_gain: maintenance.saturating_add(EXTREME_OFFSET),
    }
  }

  /// All-zero result returned for insufficient input
  pub fn zero() -> Self {
    Self::default()
  }

  pub fn is_insufficient(&self) -> bool {
    *self == Self::zero()
  }

  /// Calorie target matching the user's goal
  pub fn target_for(&self, goal: Goal) -> i64 {
    match goal {
      Goal::Loss => self.loss,
      Goal::Maintain => self.maintenance,
      Goal::Gain => self.gain,
    }
  }
}
