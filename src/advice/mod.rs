//! Diet advice
//!
//! Wraps the remote text-generation call so that it always produces a
//! user-presentable outcome: generated text, a "not configured" notice, or a
//! generic retry message. Failure causes are logged, never shown.

pub mod prompt;
pub mod render;
pub mod tracker;

use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::AdviceConfig;
use crate::llm::{AdviceError, AdviceTransport, GeminiClient};
use crate::models::{CalculationResult, MeasurementInput};

pub use prompt::build_prompt;
pub use render::render_advice_html;
pub use tracker::{AdviceBusy, AdviceState, AdviceTicket, AdviceTracker};

pub const NOT_CONFIGURED_MESSAGE: &str =
  "API key not configured. Please set up your API key to use the AI Assistant.";
pub const FAILED_MESSAGE: &str =
  "Sorry, I couldn't fetch advice at the moment. Please check your API key and try again later.";

/// Settled result of an advice request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum AdviceOutcome {
  /// Markdown-flavored advice text
  Generated(String),
  /// No credential configured
  NotConfigured,
  /// The remote call failed; details are in the logs
  Failed,
}

impl AdviceOutcome {
  /// Text to show the user
  pub fn message(&self) -> &str {
    match self {
      AdviceOutcome::Generated(text) => text,
      AdviceOutcome::NotConfigured => NOT_CONFIGURED_MESSAGE,
      AdviceOutcome::Failed => FAILED_MESSAGE,
    }
  }
}

#[derive(Clone)]
pub struct AdviceService {
  transport: Option<Arc<dyn AdviceTransport>>,
}

impl AdviceService {
  /// Build the service from configuration. A missing API key yields an
  /// unconfigured service rather than an error.
  pub fn from_config(config: &AdviceConfig) -> Result<Self, AdviceError> {
    match GeminiClient::from_config(config) {
      Ok(client) => {
        info!(model = client.model(), "Advice service configured");
        Ok(Self::with_transport(Arc::new(client)))
      }
      Err(AdviceError::MissingApiKey) => {
        warn!("No advice API key configured");
        Ok(Self::unconfigured())
      }
      Err(e) => Err(e),
    }
  }

  pub fn with_transport(transport: Arc<dyn AdviceTransport>) -> Self {
    Self {
      transport: Some(transport),
    }
  }

  pub fn unconfigured() -> Self {
    Self { transport: None }
  }

  pub fn is_configured(&self) -> bool {
    self.transport.is_some()
  }

  /// Request advice for a calculation. Never fails.
  pub async fn advise(&self, input: &MeasurementInput, result: &CalculationResult) -> AdviceOutcome {
    let Some(transport) = &self.transport else {
      return AdviceOutcome::NotConfigured;
    };

    let prompt = build_prompt(input, result);
    match transport.fetch_advice(&prompt).await {
      Ok(text) => AdviceOutcome::Generated(text),
      Err(AdviceError::MissingApiKey) => AdviceOutcome::NotConfigured,
      Err(e) => {
        error!(error = %e, "Error fetching advice");
        AdviceOutcome::Failed
      }
    }
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
