//! Command-line interface definitions

use clap::{Args, Parser, Subcommand};

use crate::models::{BudgetTier, DietPreference, Gender, Goal, MeasurementInput, UnitSystem};

#[derive(Parser)]
#[command(name = "calorie-planner")]
#[command(about = "Estimate daily calorie targets and get diet advice")]
#[command(version)]
pub struct Cli {
  /// SQLite URL for saved profile and history (overrides CALORIE_PLANNER_DATABASE_URL)
  #[arg(long, global = true)]
  pub database_url: Option<String>,

  /// Print results as JSON
  #[arg(long, global = true)]
  pub json: bool,

  /// Enable debug logging
  #[arg(short, long, global = true)]
  pub verbose: bool,

  #[command(subcommand)]
  pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
  /// Calculate calorie targets and add them to history
  Calculate(InputArgs),

  /// Save or load the profile
  Profile {
    #[command(subcommand)]
    action: ProfileAction,
  },

  /// Show or clear calculation history
  History {
    #[command(subcommand)]
    action: HistoryAction,
  },

  /// Calculate, then ask the AI assistant for tips and a meal plan
  Advice {
    #[command(flatten)]
    input: InputArgs,

    /// Render the advice as HTML instead of Markdown
    #[arg(long)]
    html: bool,
  },

  /// List the supported activity multipliers
  ActivityLevels,
}

#[derive(Subcommand)]
pub enum ProfileAction {
  /// Save these inputs as the profile, replacing any previous one
  Save(InputArgs),

  /// Load the saved profile and calculate from it
  Load,

  /// Print the saved profile
  Show,
}

#[derive(Subcommand)]
pub enum HistoryAction {
  /// List recent calculations, newest first
  List,

  /// Delete all history
  Clear,
}

/// Calculator form fields. Numbers are taken as typed; unreadable
/// values count as zero when calculating.
#[derive(Debug, Clone, Args)]
pub struct InputArgs {
  #[arg(long, default_value = "25", allow_hyphen_values = true)]
  pub age: String,

  #[arg(long, default_value = "male")]
  pub gender: Gender,

  /// metric or us
  #[arg(long, default_value = "metric")]
  pub unit: UnitSystem,

  #[arg(long, default_value = "180", allow_hyphen_values = true)]
  pub height_cm: String,

  #[arg(long, default_value = "5", allow_hyphen_values = true)]
  pub height_ft: String,

  #[arg(long, default_value = "10", allow_hyphen_values = true)]
  pub height_in: String,

  #[arg(long, default_value = "65", allow_hyphen_values = true)]
  pub weight_kg: String,

  #[arg(long, default_value = "143", allow_hyphen_values = true)]
  pub weight_lb: String,

  /// Activity multiplier (see `activity-levels`)
  #[arg(long = "activity", default_value = "1.55", allow_hyphen_values = true)]
  pub activity_level: String,

  /// veg or non-veg
  #[arg(long, default_value = "veg")]
  pub diet: DietPreference,

  /// loss, maintain or gain
  #[arg(long, default_value = "maintain")]
  pub goal: Goal,

  /// low, medium or high
  #[arg(long, default_value = "medium")]
  pub budget: BudgetTier,
}

impl From<InputArgs> for MeasurementInput {
  fn from(args: InputArgs) -> Self {
    Self {
      age: args.age,
      gender: args.gender,
      height_cm: args.height_cm,
      height_ft: args.height_ft,
      height_in: args.height_in,
      weight_kg: args.weight_kg,
      weight_lb: args.weight_lb,
      activity_level: args.activity_level,
      unit: args.unit,
      diet: args.diet,
      goal: args.goal,
      budget: args.budget,
    }
  }
}
