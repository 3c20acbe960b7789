pub mod advice;
pub mod history;
pub mod profile;

use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

use crate::advice::AdviceService;
use crate::config::{AdviceConfig, AppConfig, ConfigError};
use crate::db::{SlotStore, SqliteSlotStore, StoreError};
use crate::llm::AdviceError;
use crate::models::{ActivityLevel, HistoryEntry, MeasurementInput};
use crate::session::{CalculatorSession, SessionError};

/// Application state shared by all commands
pub struct AppState {
  pub session: CalculatorSession,
  pub advice: AdviceService,
}

impl AppState {
  /// Open storage and configure the advice service. Invalid advice settings
  /// are an error only when `advice_required` is set.
  pub async fn initialize(config: &AppConfig, advice_required: bool) -> Result<Self, CommandError> {
    let advice = advice_service(&config.advice, advice_required)?;
    let store = SqliteSlotStore::connect(&config.database_url).await?;
    Ok(Self::new(Arc::new(store), advice))
  }

  pub fn new(store: Arc<dyn SlotStore>, advice: AdviceService) -> Self {
    Self {
      session: CalculatorSession::new(store),
      advice,
    }
  }
}

/// Build the advice service. Commands that don't need advice log invalid
/// settings and carry on with an unconfigured service.
pub fn advice_service(
  config: &Result<AdviceConfig, ConfigError>,
  required: bool,
) -> Result<AdviceService, CommandError> {
  let built = match config {
    Ok(config) => AdviceService::from_config(config).map_err(CommandError::from),
    Err(e) => Err(CommandError::Config(e.clone())),
  };

  match built {
    Ok(service) => Ok(service),
    Err(e) if required => Err(e),
    Err(e) => {
      warn!(error = %e, "Invalid advice settings, advice disabled");
      Ok(AdviceService::unconfigured())
    }
  }
}

#[derive(Debug, Error)]
pub enum CommandError {
  #[error("No saved profile")]
  NoProfile,

  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error(transparent)]
  Store(#[from] StoreError),

  #[error(transparent)]
  Session(#[from] SessionError),

  #[error(transparent)]
  Advice(#[from] AdviceError),
}

/// Calculate from `input`, display it, and log it to history
pub async fn calculate(
  state: &mut AppState,
  input: MeasurementInput,
) -> Result<HistoryEntry, CommandError> {
  state.session.set_input(input);
  Ok(state.session.calculate().await?)
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityLevelInfo {
  pub level: ActivityLevel,
  pub multiplier: f64,
  pub label: &'static str,
}

pub fn activity_levels() -> Vec<ActivityLevelInfo> {
  ActivityLevel::ALL
    .iter()
    .map(|level| ActivityLevelInfo {
      level: *level,
      multiplier: level.multiplier(),
      label: level.label(),
    })
    .collect()
}

#[cfg(test)]
pub(crate) fn test_state() -> AppState {
  AppState::new(crate::test_utils::memory_store(), AdviceService::unconfigured())
}
