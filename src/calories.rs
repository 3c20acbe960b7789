//! Calorie target calculation
//!
//! Mifflin-St Jeor BMR scaled by an activity multiplier gives maintenance
//! calories; loss and gain targets are fixed offsets from it.
//!
//! Mifflin, M.D., et al. (1990). A new predictive equation for resting energy
//! expenditure. *American Journal of Clinical Nutrition*, 51(2), 241-247.
//!
//! The calculation is total: it never fails. Inputs too incomplete to
//! produce a meaningful BMR yield an all-zero [`CalculationResult`].

use crate::models::{ActivityLevel, CalculationResult, Gender, MeasurementInput};
use crate::numeric::{parse_number, parse_number_or};
use crate::units::to_metric;

/// ---------------------------------------------------------------------------
/// Mifflin-St Jeor Coefficients
/// ---------------------------------------------------------------------------

const WEIGHT_COEFFICIENT: f64 = 10.0;
const HEIGHT_COEFFICIENT: f64 = 6.25;
const AGE_COEFFICIENT: f64 = 5.0;
const MALE_CONSTANT: f64 = 5.0;
const FEMALE_CONSTANT: f64 = -161.0;

/// Multiplier used when the activity field is empty or unparseable
pub const DEFAULT_ACTIVITY_MULTIPLIER: f64 = 1.2;

/// Basal metabolic rate in kcal/day
///
/// - male: `10w + 6.25h - 5a + 5`
/// - female: `10w + 6.25h - 5a - 161`
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age: f64, gender: Gender) -> f64 {
  let base = WEIGHT_COEFFICIENT * weight_kg + HEIGHT_COEFFICIENT * height_cm - AGE_COEFFICIENT * age;
  match gender {
    Gender::Male => base + MALE_CONSTANT,
    Gender::Female => base + FEMALE_CONSTANT,
  }
}

/// Activity multiplier from form text, falling back to sedentary
pub fn activity_multiplier(raw: &str) -> f64 {
  parse_number_or(raw, DEFAULT_ACTIVITY_MULTIPLIER)
}

/// Compute all calorie targets for an input
pub fn calculate_calories(input: &MeasurementInput) -> CalculationResult {
  let body = to_metric(input);
  let age = parse_number(&input.age);
  let multiplier = activity_multiplier(&input.activity_level);

  if body.weight_kg <= 0.0 || body.height_cm <= 0.0 || age <= 0.0 {
    return CalculationResult::zero();
  }

  let bmr = calculate_bmr(body.weight_kg, body.height_cm, age, input.gender);
  // f64::round is half away from zero
  let maintenance = (bmr * multiplier).round() as i64;

  CalculationResult::from_maintenance(maintenance)
}

/// Label for the multiplier in an input, if it is one of the standard levels
pub fn activity_label(input: &MeasurementInput) -> Option<&'static str> {
  ActivityLevel::from_multiplier(activity_multiplier(&input.activity_level)).map(|l| l.label())
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use crate::assert_approx_eq;
  use crate::models::UnitSystem;
  use crate::test_utils::{metric_input, us_input};

  #[test]
  fn test_male_reference_case() {
    // 10*65 + 6.25*180 - 5*25 + 5 = 1655; 1655 * 1.55 = 2565.25
    let mut input = metric_input("25", "180", "65");
    input.activity_level = "1.55".into();

    let result = calculate_calories(&input);
    assert_eq!(result.maintenance, 2565);
    assert_eq!(result.mild_loss, 2315);
    assert_eq!(result.loss, 2065);
    assert_eq!(result.extreme_loss, 1565);
    assert_eq!(result.mild_gain, 2815);
    assert_eq!(result.gain, 3065);
    assert_eq!(result.extreme_gain, 3565);
  }

  #[test]
  fn test_female_reference_case() {
    // 650 + 1031.25 - 150 - 161 = 1370.25; * 1.2 = 1644.3
    let mut input = metric_input("30", "165", "65");
    input.gender = Gender::Female;
    input.activity_level = "1.2".into();

    assert_approx_eq!(calculate_bmr(65.0, 165.0, 30.0, Gender::Female), 1370.25, 1e-9);
    assert_eq!(calculate_calories(&input).maintenance, 1644);
  }

  #[test]
  fn test_rounds_half_away_from_zero() {
    // 10*60 + 6.25*160 - 5*40 + 5 = 1405; * 1.5 = 2107.5
    let mut input = metric_input("40", "160", "60");
    input.activity_level = "1.5".into();
    assert_eq!(calculate_calories(&input).maintenance, 2108);
  }

  #[test]
  fn test_degenerate_inputs_yield_zero() {
    let cases = [
      metric_input("0", "180", "65"),
      metric_input("25", "0", "65"),
      metric_input("25", "180", "0"),
      metric_input("", "180", "65"),
      metric_input("25", "abc", "65"),
      metric_input("-3", "180", "65"),
      metric_input("25", "180", "-65"),
      us_input("25", "", "", "150"),
    ];

    for input in cases {
      let result = calculate_calories(&input);
      assert!(result.is_insufficient(), "expected zero result for {:?}", input);
      assert_eq!(result.extreme_gain, 0);
    }
  }

  #[test]
  fn test_offsets_track_maintenance() {
    for (age, height, weight) in [("18", "150", "45"), ("45", "190", "110"), ("70", "160", "55")] {
      let result = calculate_calories(&metric_input(age, height, weight));
      assert!(result.loss < result.maintenance && result.maintenance < result.gain);
      assert_eq!(result.maintenance - result.mild_loss, 250);
      assert_eq!(result.maintenance - result.loss, 500);
      assert_eq!(result.maintenance - result.extreme_loss, 1000);
      assert_eq!(result.mild_gain - result.maintenance, 250);
      assert_eq!(result.gain - result.maintenance, 500);
      assert_eq!(result.extreme_gain - result.maintenance, 1000);
    }
  }

  #[test]
  fn test_activity_multiplier_fallback() {
    let mut input = metric_input("25", "180", "65");

    input.activity_level = "".into();
    let sedentary = calculate_calories(&input);
    assert_eq!(sedentary.maintenance, 1986); // 1655 * 1.2

    input.activity_level = "very".into();
    assert_eq!(calculate_calories(&input), sedentary);

    input.activity_level = "0".into();
    assert_eq!(calculate_calories(&input), sedentary);
  }

  #[test]
  fn test_unit_systems_agree() {
    let metric = metric_input("25", "180", "65");
    // 180 cm = 70.866 in = 5' 10.866"; 65 kg = 143.3 lb
    let us = us_input("25", "5", "10.8661417", "143.3");

    let metric_body = to_metric(&metric);
    let us_body = to_metric(&us);
    let metric_bmr = calculate_bmr(metric_body.weight_kg, metric_body.height_cm, 25.0, Gender::Male);
    let us_bmr = calculate_bmr(us_body.weight_kg, us_body.height_cm, 25.0, Gender::Male);

    assert_approx_eq!(metric_bmr, us_bmr, 0.1);
    assert_eq!(us.unit, UnitSystem::Us);
    assert_eq!(
      calculate_calories(&metric).maintenance,
      calculate_calories(&us).maintenance
    );
  }

  #[test]
  fn test_huge_inputs_do_not_panic() {
    let heavy = calculate_calories(&metric_input("25", "180", "1e300"));
    assert_eq!(heavy.maintenance, i64::MAX);
    assert_eq!(heavy.extreme_gain, i64::MAX);
    assert_eq!(heavy.extreme_loss, i64::MAX - 1000);

    let old = calculate_calories(&metric_input("1e300", "180", "65"));
    assert_eq!(old.maintenance, i64::MIN);
    assert_eq!(old.extreme_loss, i64::MIN);
    assert_eq!(old.extreme_gain, i64::MIN + 1000);

    let both = calculate_calories(&metric_input("1e300", "180", "1e300"));
    assert_eq!(both.extreme_loss, both.maintenance.saturating_sub(1000));
  }

  #[test]
  fn test_calculation_is_pure() {
    let input = metric_input("33", "172", "80");
    assert_eq!(calculate_calories(&input), calculate_calories(&input));
  }

  #[test]
  fn test_extreme_loss_is_not_clamped() {
    // Tiny but positive body: 10*20 + 6.25*50 - 5*80 - 161 = -48.5 BMR
    let mut input = metric_input("80", "50", "20");
    input.gender = Gender::Female;
    let result = calculate_calories(&input);
    assert!(result.maintenance < 0);
    assert_eq!(result.extreme_loss, result.maintenance - 1000);
  }

  #[test]
  fn test_activity_label() {
    let input = metric_input("25", "180", "65");
    assert_eq!(activity_label(&input), Some("Moderate: exercise 4-5 times/week"));
  }
}
