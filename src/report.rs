//! Plain-text rendering of command results

use crate::calories::activity_label;
use crate::commands::ActivityLevelInfo;
use crate::models::{CalculationResult, HistoryEntry, MeasurementInput};
use crate::profile::SavedProfile;
use crate::units::{describe_height, describe_weight};

/// Format a calorie figure with thousands separators, e.g. `2,565`
pub fn format_kcal(value: i64) -> String {
  let digits = value.unsigned_abs().to_string();
  let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
  for (i, ch) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      grouped.push(',');
    }
    grouped.push(ch);
  }
  if value < 0 {
    format!("-{}", grouped)
  } else {
    grouped
  }
}

pub fn format_result(result: &CalculationResult) -> String {
  if result.is_insufficient() {
    return "Not enough information to calculate. Enter a positive age, height and weight.\n"
      .to_string();
  }

  let rows = [
    ("Maintain weight", result.maintenance),
    ("Mild weight loss (0.25 lb/week)", result.mild_loss),
    ("Weight loss (0.5 lb/week)", result.loss),
    ("Extreme weight loss (1 lb/week)", result.extreme_loss),
    ("Mild weight gain (0.25 lb/week)", result.mild_gain),
    ("Weight gain (0.5 lb/week)", result.gain),
    ("Fast weight gain (1 lb/week)", result.extreme_gain),
  ];

  rows
    .iter()
    .map(|(label, kcal)| format!("{:<34}{:>8} kcal/day\n", label, format_kcal(*kcal)))
    .collect()
}

pub fn format_input(input: &MeasurementInput) -> String {
  let activity = match activity_label(input) {
    Some(label) => format!("{} ({})", input.activity_level.trim(), label),
    None => input.activity_level.trim().to_string(),
  };

  format!(
    "{}yo {}, {}, {}, activity {}, {}, goal: {}, budget: {}\n",
    input.age.trim(),
    input.gender,
    describe_height(input),
    describe_weight(input),
    activity,
    input.diet.label(),
    input.goal.label(),
    input.budget.label()
  )
}

pub fn format_profile(profile: &SavedProfile) -> String {
  format!(
    "Saved {}\n{}",
    profile.saved_at.format("%Y-%m-%d %H:%M UTC"),
    format_input(&profile.input)
  )
}

pub fn format_history(entries: &[HistoryEntry]) -> String {
  if entries.is_empty() {
    return "Your recent calculations will appear here.\n".to_string();
  }

  entries
    .iter()
    .map(|entry| {
      format!(
        "{}  {:>6} kcal/day  {}\n",
        entry.recorded_at.format("%Y-%m-%d"),
        format_kcal(entry.result.maintenance),
        entry.summary()
      )
    })
    .collect()
}

pub fn format_activity_levels(levels: &[ActivityLevelInfo]) -> String {
  levels
    .iter()
    .map(|info| format!("{:<6} {}\n", info.multiplier, info.label))
    .collect()
}
