use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Rejection of an unknown enumerated tag at the input boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseEnumError {
  pub kind: &'static str,
  pub value: String,
  pub expected: &'static str,
}

impl ParseEnumError {
  fn new(kind: &'static str, value: &str, expected: &'static str) -> Self {
    Self {
      kind,
      value: value.to_string(),
      expected,
    }
  }
}

/// ---------------------------------------------------------------------------
/// Enumerated Tags
/// ---------------------------------------------------------------------------

/// Selects the Mifflin-St Jeor constant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
  Male,
  Female,
}

impl Gender {
  pub fn as_str(&self) -> &'static str {
    match self {
      Gender::Male => "male",
      Gender::Female => "female",
    }
  }
}

impl FromStr for Gender {
  type Err = ParseEnumError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "male" => Ok(Gender::Male),
      "female" => Ok(Gender::Female),
      _ => Err(ParseEnumError::new("gender", s, "male, female")),
    }
  }
}

/// Which height/weight fields are authoritative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
  Metric,
  /// US customary: feet + inches, pounds
  Us,
}

impl UnitSystem {
  pub fn as_str(&self) -> &'static str {
    match self {
      UnitSystem::Metric => "metric",
      UnitSystem::Us => "us",
    }
  }
}

impl FromStr for UnitSystem {
  type Err = ParseEnumError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "metric" => Ok(UnitSystem::Metric),
      "us" | "imperial" => Ok(UnitSystem::Us),
      _ => Err(ParseEnumError::new("unit system", s, "metric, us")),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DietPreference {
  #[serde(rename = "veg")]
  Veg,
  #[serde(rename = "non-veg")]
  NonVeg,
}

impl DietPreference {
  pub fn as_str(&self) -> &'static str {
    match self {
      DietPreference::Veg => "veg",
      DietPreference::NonVeg => "non-veg",
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      DietPreference::Veg => "Vegetarian",
      DietPreference::NonVeg => "Non-Vegetarian",
    }
  }

  pub fn short_label(&self) -> &'static str {
    match self {
      DietPreference::Veg => "Veg",
      DietPreference::NonVeg => "Non-Veg",
    }
  }
}

impl FromStr for DietPreference {
  type Err = ParseEnumError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "veg" | "vegetarian" => Ok(DietPreference::Veg),
      "non-veg" | "nonveg" | "non-vegetarian" => Ok(DietPreference::NonVeg),
      _ => Err(ParseEnumError::new("diet preference", s, "veg, non-veg")),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
  Loss,
  Maintain,
  Gain,
}

impl Goal {
  pub fn as_str(&self) -> &'static str {
    match self {
      Goal::Loss => "loss",
      Goal::Maintain => "maintain",
      Goal::Gain => "gain",
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      Goal::Loss => "Weight Loss",
      Goal::Maintain => "Maintain Weight",
      Goal::Gain => "Weight Gain",
    }
  }
}

impl FromStr for Goal {
  type Err = ParseEnumError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "loss" | "lose" => Ok(Goal::Loss),
      "maintain" | "maintenance" => Ok(Goal::Maintain),
      "gain" => Ok(Goal::Gain),
      _ => Err(ParseEnumError::new("goal", s, "loss, maintain, gain")),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
  Low,
  Medium,
  High,
}

impl BudgetTier {
  pub fn as_str(&self) -> &'static str {
    match self {
      BudgetTier::Low => "low",
      BudgetTier::Medium => "medium",
      BudgetTier::High => "high",
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      BudgetTier::Low => "Budget-Friendly",
      BudgetTier::Medium => "Moderate",
      BudgetTier::High => "Flexible",
    }
  }
}

impl FromStr for BudgetTier {
  type Err = ParseEnumError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "low" => Ok(BudgetTier::Low),
      "medium" => Ok(BudgetTier::Medium),
      "high" => Ok(BudgetTier::High),
      _ => Err(ParseEnumError::new("budget", s, "low, medium, high")),
    }
  }
}

macro_rules! display_as_str {
  ($($ty:ty),+) => {
    $(
      impl fmt::Display for $ty {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
          f.write_str(self.as_str())
        }
      }
    )+
  };
}

display_as_str!(Gender, UnitSystem, DietPreference, Goal, BudgetTier);

/// ---------------------------------------------------------------------------
/// Activity Levels
/// ---------------------------------------------------------------------------

/// The fixed set of activity multipliers offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
  Sedentary,
  Light,
  Moderate,
  Active,
  VeryActive,
  ExtraActive,
}

impl ActivityLevel {
  pub const ALL: [ActivityLevel; 6] = [
    ActivityLevel::Sedentary,
    ActivityLevel::Light,
    ActivityLevel::Moderate,
    ActivityLevel::Active,
    ActivityLevel::VeryActive,
    ActivityLevel::ExtraActive,
  ];

  pub fn multiplier(&self) -> f64 {
    match self {
      ActivityLevel::Sedentary => 1.2,
      ActivityLevel::Light => 1.375,
      ActivityLevel::Moderate => 1.55,
      ActivityLevel::Active => 1.725,
      ActivityLevel::VeryActive => 1.9,
      ActivityLevel::ExtraActive => 2.2,
    }
  }

  /// Form value as stored in a measurement input
  pub fn value(&self) -> &'static str {
    match self {
      ActivityLevel::Sedentary => "1.2",
      ActivityLevel::Light => "1.375",
      ActivityLevel::Moderate => "1.55",
      ActivityLevel::Active => "1.725",
      ActivityLevel::VeryActive => "1.9",
      ActivityLevel::ExtraActive => "2.2",
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      ActivityLevel::Sedentary => "Sedentary: little or no exercise",
      ActivityLevel::Light => "Light: exercise 1-3 times/week",
      ActivityLevel::Moderate => "Moderate: exercise 4-5 times/week",
      ActivityLevel::Active => "Active: daily exercise or intense exercise 3-4 times/week",
      ActivityLevel::VeryActive => "Very Active: intense exercise 6-7 times/week",
      ActivityLevel::ExtraActive => {
        "Extra Active: very intense exercise daily, or physical job"
      }
    }
  }

  /// Match a multiplier back to its level (exact table values only)
  pub fn from_multiplier(multiplier: f64) -> Option<Self> {
    Self::ALL
      .into_iter()
      .find(|level| (level.multiplier() - multiplier).abs() < 1e-9)
  }
}

/// ---------------------------------------------------------------------------
/// Measurement Input
/// ---------------------------------------------------------------------------

/// Everything the user typed into the calculator form.
///
/// Numeric fields stay as raw text; they are coerced at calculation time
/// (see [`crate::numeric`]). Only the pair selected by `unit` is read, the
/// other pair may hold stale values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementInput {
  pub age: String,
  pub gender: Gender,
  pub height_cm: String,
  pub height_ft: String,
  pub height_in: String,
  pub weight_kg: String,
  pub weight_lb: String,
  /// Activity multiplier as text, e.g. "1.55"
  pub activity_level: String,
  pub unit: UnitSystem,
  pub diet: DietPreference,
  pub goal: Goal,
  pub budget: BudgetTier,
}

impl Default for MeasurementInput {
  fn default() -> Self {
    Self {
      age: "25".into(),
      gender: Gender::Male,
      height_cm: "180".into(),
      height_ft: "5".into(),
      height_in: "10".into(),
      weight_kg: "65".into(),
      weight_lb: "143".into(),
      activity_level: ActivityLevel::Moderate.value().into(),
      unit: UnitSystem::Metric,
      diet: DietPreference::Veg,
      goal: Goal::Maintain,
      budget: BudgetTier::Medium,
    }
  }
}
