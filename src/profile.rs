//! Saved profile
//!
//! At most one measurement input is kept. Saving overwrites it wholesale;
//! loading hands it back for the caller to recompute.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::db::{SlotStore, StoreError, PROFILE_SLOT};
use crate::models::MeasurementInput;

/// Stored form of the profile slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedProfile {
  pub input: MeasurementInput,
  pub saved_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct ProfileStore {
  store: Arc<dyn SlotStore>,
}

impl ProfileStore {
  pub fn new(store: Arc<dyn SlotStore>) -> Self {
    Self { store }
  }

  /// Replace the saved profile with `input`
  pub async fn save(&self, input: &MeasurementInput) -> Result<SavedProfile, StoreError> {
    let profile = SavedProfile {
      input: input.clone(),
      saved_at: Utc::now(),
    };
    let json = serde_json::to_string(&profile)?;
    self.store.write_slot(PROFILE_SLOT, &json).await?;

    info!("Saved profile");
    Ok(profile)
  }

  /// The saved profile, if one exists and is readable.
  ///
  /// Storage failures and corrupt data are logged and read as "no profile".
  pub async fn saved(&self) -> Option<SavedProfile> {
    let raw = match self.store.read_slot(PROFILE_SLOT).await {
      Ok(raw) => raw?,
      Err(e) => {
        warn!(error = %e, "Failed to read saved profile");
        return None;
      }
    };

    match serde_json::from_str(&raw) {
      Ok(profile) => Some(profile),
      Err(e) => {
        warn!(error = %e, "Ignoring unreadable saved profile");
        None
      }
    }
  }

  /// The saved measurement input, if any
  pub async fn load(&self) -> Option<MeasurementInput> {
    self.saved().await.map(|profile| profile.input)
  }

  pub async fn has_profile(&self) -> bool {
    self.saved().await.is_some()
  }
}
