use serde::Serialize;

use super::{AppState, CommandError};
use crate::models::{CalculationResult, MeasurementInput};
use crate::profile::SavedProfile;

/// A loaded profile and the result recomputed from it
#[derive(Debug, Clone, Serialize)]
pub struct LoadedProfile {
  pub input: MeasurementInput,
  pub result: CalculationResult,
}

/// Save `input` as the profile, replacing any previous one
pub async fn save_profile(
  state: &mut AppState,
  input: MeasurementInput,
) -> Result<SavedProfile, CommandError> {
  state.session.set_input(input);
  Ok(state.session.save_profile().await?)
}

/// Load the saved profile into the session and recompute (not logged)
pub async fn load_profile(state: &mut AppState) -> Result<LoadedProfile, CommandError> {
  let result = state
    .session
    .load_profile()
    .await
    .ok_or(CommandError::NoProfile)?;

  Ok(LoadedProfile {
    input: state.session.input().clone(),
    result,
  })
}

pub async fn show_profile(state: &AppState) -> Result<SavedProfile, CommandError> {
  state
    .session
    .saved_profile()
    .await
    .ok_or(CommandError::NoProfile)
}
