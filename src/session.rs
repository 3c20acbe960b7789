//! Calculator session
//!
//! Holds the form input being edited and the result on display, and wires
//! calculations into history, profiles and advice requests. A shell (the
//! CLI, or any other front end) drives one session per user.

use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::advice::{AdviceBusy, AdviceOutcome, AdviceService, AdviceState, AdviceTicket, AdviceTracker};
use crate::calories::calculate_calories;
use crate::db::{SlotStore, StoreError};
use crate::history::HistoryLog;
use crate::models::{CalculationResult, HistoryEntry, MeasurementInput};
use crate::profile::{ProfileStore, SavedProfile};

#[derive(Debug, Error)]
pub enum SessionError {
  #[error("No result is displayed")]
  NoResult,

  #[error(transparent)]
  AdviceBusy(#[from] AdviceBusy),

  #[error(transparent)]
  Store(#[from] StoreError),
}

/// The result currently on display, with the input that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayedResult {
  pub id: u64,
  pub input: MeasurementInput,
  pub result: CalculationResult,
}

/// Everything needed to run one advice request outside the session borrow
#[derive(Debug, Clone)]
pub struct AdviceRequest {
  pub ticket: AdviceTicket,
  pub input: MeasurementInput,
  pub result: CalculationResult,
}

pub struct CalculatorSession {
  input: MeasurementInput,
  displayed: Option<DisplayedResult>,
  next_result_id: u64,
  profiles: ProfileStore,
  history: HistoryLog,
  advice: AdviceTracker,
}

impl CalculatorSession {
  pub fn new(store: Arc<dyn SlotStore>) -> Self {
    Self {
      input: MeasurementInput::default(),
      displayed: None,
      next_result_id: 1,
      profiles: ProfileStore::new(store.clone()),
      history: HistoryLog::new(store),
      advice: AdviceTracker::new(),
    }
  }

  pub fn input(&self) -> &MeasurementInput {
    &self.input
  }

  /// Replace the form input. The displayed result is left alone.
  pub fn set_input(&mut self, input: MeasurementInput) {
    self.input = input;
  }

  pub fn current(&self) -> Option<&DisplayedResult> {
    self.displayed.as_ref()
  }

  // ---------------------------------------------------------------------------
  // Calculation
  // ---------------------------------------------------------------------------

  /// Calculate from the current input, display it, and log it to history.
  /// Insufficient input still produces (and logs) an all-zero result.
  pub async fn calculate(&mut self) -> Result<HistoryEntry, SessionError> {
    let result = calculate_calories(&self.input);
    self.display(result);
    Ok(self.history.record(&self.input, &result).await?)
  }

  fn display(&mut self, result: CalculationResult) {
    let id = self.next_result_id;
    self.next_result_id += 1;
    self.advice.reset();
    self.displayed = Some(DisplayedResult {
      id,
      input: self.input.clone(),
      result,
    });
  }

  // ---------------------------------------------------------------------------
  // Profile
  // ---------------------------------------------------------------------------

  pub async fn save_profile(&self) -> Result<SavedProfile, SessionError> {
    Ok(self.profiles.save(&self.input).await?)
  }

  pub async fn has_profile(&self) -> bool {
    self.profiles.has_profile().await
  }

  pub async fn saved_profile(&self) -> Option<SavedProfile> {
    self.profiles.saved().await
  }

  /// Replace the input with the saved profile and recompute.
  /// The recomputed result is displayed but not logged to history.
  pub async fn load_profile(&mut self) -> Option<CalculationResult> {
    let input = self.profiles.load().await?;
    self.input = input;
    let result = calculate_calories(&self.input);
    self.display(result);

    info!(maintenance = result.maintenance, "Loaded profile");
    Some(result)
  }

  // ---------------------------------------------------------------------------
  // History
  // ---------------------------------------------------------------------------

  pub async fn history(&self) -> Vec<HistoryEntry> {
    self.history.entries().await
  }

  pub async fn clear_history(&self) -> Result<(), SessionError> {
    Ok(self.history.clear().await?)
  }

  // ---------------------------------------------------------------------------
  // Advice
  // ---------------------------------------------------------------------------

  pub fn advice_state(&self) -> &AdviceState {
    self.advice.state()
  }

  /// Start an advice request for the displayed result
  pub fn begin_advice(&mut self) -> Result<AdviceRequest, SessionError> {
    let displayed = self.displayed.as_ref().ok_or(SessionError::NoResult)?;
    let ticket = self.advice.begin(displayed.id)?;

    Ok(AdviceRequest {
      ticket,
      input: displayed.input.clone(),
      result: displayed.result,
    })
  }

  /// Deliver a finished request. Returns `false` if it was stale and dropped.
  pub fn finish_advice(&mut self, ticket: AdviceTicket, outcome: AdviceOutcome) -> bool {
    let displayed_id = self.displayed.as_ref().map(|d| d.id);
    self.advice.settle(ticket, outcome, displayed_id)
  }

  /// Begin, run and finish an advice request in one go
  pub async fn request_advice(&mut self, service: &AdviceService) -> Result<AdviceOutcome, SessionError> {
    let request = self.begin_advice()?;
    let outcome = service.advise(&request.input, &request.result).await;
    self.finish_advice(request.ticket, outcome.clone());
    Ok(outcome)
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use crate::history::HISTORY_LIMIT;
  use crate::test_utils::{female_input, memory_store, metric_input};

  #[tokio::test]
  async fn test_calculate_displays_and_logs() {
    let mut session = CalculatorSession::new(memory_store());
    session.set_input(metric_input("25", "180", "65"));

    let entry = session.calculate().await.unwrap();

    assert_eq!(entry.result.maintenance, 2565);
    assert_eq!(session.current().unwrap().result, entry.result);
    assert_eq!(session.history().await, vec![entry]);
  }

  #[tokio::test]
  async fn test_eleven_calculations_keep_ten() {
    let mut session = CalculatorSession::new(memory_store());

    for weight in 60..71 {
      session.set_input(metric_input("25", "180", &weight.to_string()));
      session.calculate().await.unwrap();
    }

    let history = session.history().await;
    assert_eq!(history.len(), HISTORY_LIMIT);
    assert_eq!(history[0].input.weight_kg, "70");
    assert_eq!(history[9].input.weight_kg, "61");
  }

  #[tokio::test]
  async fn test_profile_roundtrip_recomputes_without_logging() {
    let store = memory_store();
    let mut session = CalculatorSession::new(store.clone());
    let saved = female_input("30", "165", "65");
    session.set_input(saved.clone());
    session.save_profile().await.unwrap();

    // A fresh session over the same storage
    let mut session = CalculatorSession::new(store);
    assert!(session.has_profile().await);
    session.set_input(metric_input("50", "170", "90"));

    let result = session.load_profile().await.unwrap();

    assert_eq!(session.input(), &saved);
    assert_eq!(result, calculate_calories(&saved));
    assert_eq!(result.maintenance, 2124); // 1370.25 * 1.55
    assert_eq!(session.current().unwrap().result, result);
    assert!(session.history().await.is_empty());
  }

  #[tokio::test]
  async fn test_load_without_profile() {
    let mut session = CalculatorSession::new(memory_store());
    assert!(!session.has_profile().await);
    assert_eq!(session.load_profile().await, None);
    assert!(session.current().is_none());
  }

  #[tokio::test]
  async fn test_clear_history() {
    let mut session = CalculatorSession::new(memory_store());
    session.calculate().await.unwrap();
    session.clear_history().await.unwrap();
    assert!(session.history().await.is_empty());
  }

  #[tokio::test]
  async fn test_advice_needs_a_result() {
    let mut session = CalculatorSession::new(memory_store());
    assert!(matches!(session.begin_advice(), Err(SessionError::NoResult)));
  }

  #[tokio::test]
  async fn test_advice_for_displayed_result() {
    let mut session = CalculatorSession::new(memory_store());
    session.calculate().await.unwrap();

    let outcome = session.request_advice(&AdviceService::unconfigured()).await.unwrap();

    assert_eq!(outcome, AdviceOutcome::NotConfigured);
    let id = session.current().unwrap().id;
    assert_eq!(
      session.advice_state(),
      &AdviceState::Settled {
        result_id: id,
        outcome: AdviceOutcome::NotConfigured
      }
    );
  }

  #[tokio::test]
  async fn test_late_advice_for_old_result_is_dropped() {
    let mut session = CalculatorSession::new(memory_store());
    session.calculate().await.unwrap();

    let request = session.begin_advice().unwrap();
    assert!(matches!(session.begin_advice(), Err(SessionError::AdviceBusy(_))));

    // User recalculates before the response lands
    session.set_input(metric_input("40", "170", "80"));
    session.calculate().await.unwrap();

    let kept = session.finish_advice(request.ticket, AdviceOutcome::Generated("stale".into()));
    assert!(!kept);
    assert_eq!(session.advice_state(), &AdviceState::Idle);
    assert!(session.begin_advice().is_ok());
  }

  #[tokio::test]
  async fn test_advice_uses_calculated_input_not_edits() {
    let mut session = CalculatorSession::new(memory_store());
    session.set_input(metric_input("25", "180", "65"));
    session.calculate().await.unwrap();

    session.set_input(metric_input("99", "100", "40"));
    let request = session.begin_advice().unwrap();

    assert_eq!(request.input.age, "25");
    assert_eq!(request.result.maintenance, 2565);
  }
}
