//! Advice request lifecycle
//!
//! At most one advice request is in flight. Each request is tagged with the
//! id of the result it was issued for; a response arriving after a newer
//! result has been displayed is discarded instead of shown.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use super::AdviceOutcome;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AdviceState {
  Idle,
  Pending {
    request_id: u64,
    result_id: u64,
  },
  Settled {
    result_id: u64,
    outcome: AdviceOutcome,
  },
}

/// Handle for one issued advice request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdviceTicket {
  pub request_id: u64,
  pub result_id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("an advice request is already in progress")]
pub struct AdviceBusy;

#[derive(Debug)]
pub struct AdviceTracker {
  state: AdviceState,
  next_request_id: u64,
}

impl Default for AdviceTracker {
  fn default() -> Self {
    Self::new()
  }
}

impl AdviceTracker {
  pub fn new() -> Self {
    Self {
      state: AdviceState::Idle,
      next_request_id: 1,
    }
  }

  pub fn state(&self) -> &AdviceState {
    &self.state
  }

  pub fn is_pending(&self) -> bool {
    matches!(self.state, AdviceState::Pending { .. })
  }

  /// Issue a request for `result_id`. Refused while another is pending.
  pub fn begin(&mut self, result_id: u64) -> Result<AdviceTicket, AdviceBusy> {
    if self.is_pending() {
      return Err(AdviceBusy);
    }

    let ticket = AdviceTicket {
      request_id: self.next_request_id,
      result_id,
    };
    self.next_request_id += 1;
    self.state = AdviceState::Pending {
      request_id: ticket.request_id,
      result_id,
    };

    debug!(request_id = ticket.request_id, result_id, "Advice request pending");
    Ok(ticket)
  }

  /// Apply a finished request's outcome.
  ///
  /// Returns `true` when the outcome was kept. Outcomes for a request that
  /// is not the in-flight one, or whose result is no longer displayed, are
  /// dropped.
  pub fn settle(
    &mut self,
    ticket: AdviceTicket,
    outcome: AdviceOutcome,
    displayed_result_id: Option<u64>,
  ) -> bool {
    match self.state {
      AdviceState::Pending { request_id, .. } if request_id == ticket.request_id => {}
      _ => {
        debug!(request_id = ticket.request_id, "Ignoring outcome for unknown advice request");
        return false;
      }
    }

    if displayed_result_id != Some(ticket.result_id) {
      info!(
        request_id = ticket.request_id,
        result_id = ticket.result_id,
        "Discarding advice for a result that is no longer displayed"
      );
      self.state = AdviceState::Idle;
      return false;
    }

    self.state = AdviceState::Settled {
      result_id: ticket.result_id,
      outcome,
    };
    true
  }

  /// Forget a settled outcome when a new result is displayed.
  /// A pending request keeps running and will be dropped when it settles.
  pub fn reset(&mut self) {
    if matches!(self.state, AdviceState::Settled { .. }) {
      self.state = AdviceState::Idle;
    }
  }
}
