use serde::Serialize;

use super::{calculate, AppState, CommandError};
use crate::advice::{render_advice_html, AdviceOutcome};
use crate::models::{CalculationResult, MeasurementInput};

#[derive(Debug, Clone, Serialize)]
pub struct AdviceReport {
  pub result: CalculationResult,
  pub outcome: AdviceOutcome,
  /// Advice text, rendered as HTML when requested
  pub text: String,
}

/// Calculate from `input` (logging it), then request advice for that result
pub async fn get_advice(
  state: &mut AppState,
  input: MeasurementInput,
  html: bool,
) -> Result<AdviceReport, CommandError> {
  let entry = calculate(state, input).await?;
  let outcome = state.session.request_advice(&state.advice).await?;

  let text = match &outcome {
    AdviceOutcome::Generated(markdown) if html => render_advice_html(markdown),
    other => other.message().to_string(),
  };

  Ok(AdviceReport {
    result: entry.result,
    outcome,
    text,
  })
}
