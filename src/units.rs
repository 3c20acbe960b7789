//! Unit normalization
//!
//! Converts whichever height/weight pair the input marks as authoritative
//! into centimeters and kilograms. The other pair is never read.

use crate::models::{MeasurementInput, UnitSystem};
use crate::numeric::parse_number;

pub const CM_PER_INCH: f64 = 2.54;
pub const KG_PER_POUND: f64 = 0.453592;
pub const INCHES_PER_FOOT: f64 = 12.0;

/// Body measurements in metric units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricBody {
  pub weight_kg: f64,
  pub height_cm: f64,
}

/// Normalize an input to metric. Unparseable fields count as 0.
pub fn to_metric(input: &MeasurementInput) -> MetricBody {
  match input.unit {
    UnitSystem::Metric => MetricBody {
      weight_kg: parse_number(&input.weight_kg),
      height_cm: parse_number(&input.height_cm),
    },
    UnitSystem::Us => {
      let feet = parse_number(&input.height_ft);
      let inches = parse_number(&input.height_in);
      let total_inches = feet * INCHES_PER_FOOT + inches;
      MetricBody {
        weight_kg: parse_number(&input.weight_lb) * KG_PER_POUND,
        height_cm: total_inches * CM_PER_INCH,
      }
    }
  }
}

/// Height as the user entered it, e.g. `180 cm` or `5'10"`
pub fn describe_height(input: &MeasurementInput) -> String {
  match input.unit {
    UnitSystem::Metric => format!("{} cm", input.height_cm.trim()),
    UnitSystem::Us => format!("{}'{}\"", input.height_ft.trim(), input.height_in.trim()),
  }
}

/// Weight as the user entered it, e.g. `65 kg` or `143 lbs`
pub fn describe_weight(input: &MeasurementInput) -> String {
  match input.unit {
    UnitSystem::Metric => format!("{} kg", input.weight_kg.trim()),
    UnitSystem::Us => format!("{} lbs", input.weight_lb.trim()),
  }
}
