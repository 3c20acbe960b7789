use super::{AppState, CommandError};
use crate::models::HistoryEntry;

pub async fn list_history(state: &AppState) -> Vec<HistoryEntry> {
  state.session.history().await
}

pub async fn clear_history(state: &AppState) -> Result<(), CommandError> {
  Ok(state.session.clear_history().await?)
}
