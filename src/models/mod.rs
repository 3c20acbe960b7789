pub mod history;
pub mod measurement;
pub mod result;

pub use history::HistoryEntry;
pub use measurement::{
  ActivityLevel, BudgetTier, DietPreference, Gender, Goal, MeasurementInput, ParseEnumError,
  UnitSystem,
};
pub use result::CalculationResult;
