//! Calculation history
//!
//! Newest-first list of past calculations, capped at [`HISTORY_LIMIT`].
//! Each change reads the list, modifies it and writes the whole list back.

use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use crate::db::{SlotStore, StoreError, HISTORY_SLOT};
use crate::models::{CalculationResult, HistoryEntry, MeasurementInput};

/// Maximum number of entries kept
pub const HISTORY_LIMIT: usize = 10;

/// Put `entry` at the front and drop everything past `limit`
pub fn prepend_bounded(
  mut entries: Vec<HistoryEntry>,
  entry: HistoryEntry,
  limit: usize,
) -> Vec<HistoryEntry> {
  entries.insert(0, entry);
  entries.truncate(limit);
  entries
}

#[derive(Clone)]
pub struct HistoryLog {
  store: Arc<dyn SlotStore>,
}

impl HistoryLog {
  pub fn new(store: Arc<dyn SlotStore>) -> Self {
    Self { store }
  }

  /// All entries, newest first.
  ///
  /// Storage failures and corrupt data are logged and read as empty.
  pub async fn entries(&self) -> Vec<HistoryEntry> {
    self.load().await.unwrap_or_else(|e| {
      warn!(error = %e, "Failed to read calculation history");
      Vec::new()
    })
  }

  /// Stored entries. Corrupt data reads as empty; storage failures are returned.
  async fn load(&self) -> Result<Vec<HistoryEntry>, StoreError> {
    let Some(raw) = self.store.read_slot(HISTORY_SLOT).await? else {
      return Ok(Vec::new());
    };

    Ok(serde_json::from_str(&raw).unwrap_or_else(|e| {
      warn!(error = %e, "Ignoring unreadable calculation history");
      Vec::new()
    }))
  }

  /// Snapshot a calculation and prepend it
  pub async fn record(
    &self,
    input: &MeasurementInput,
    result: &CalculationResult,
  ) -> Result<HistoryEntry, StoreError> {
    // A failed read must not overwrite the stored list
    let entries = self.load().await?;

    let recorded_at = Utc::now();
    // Ids must stay unique even for calculations within the same millisecond
    let id = match entries.first() {
      Some(newest) => recorded_at.timestamp_millis().max(newest.id + 1),
      None => recorded_at.timestamp_millis(),
    };

    let entry = HistoryEntry {
      id,
      recorded_at,
      input: input.clone(),
      result: *result,
    };

    let entries = prepend_bounded(entries, entry.clone(), HISTORY_LIMIT);
    self.write(&entries).await?;

    info!(id, maintenance = result.maintenance, count = entries.len(), "Recorded calculation");
    Ok(entry)
  }

  /// Drop every entry
  pub async fn clear(&self) -> Result<(), StoreError> {
    self.write(&[]).await?;
    info!("Cleared calculation history");
    Ok(())
  }

  async fn write(&self, entries: &[HistoryEntry]) -> Result<(), StoreError> {
    let json = serde_json::to_string(entries)?;
    self.store.write_slot(HISTORY_SLOT, &json).await
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
