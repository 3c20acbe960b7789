//! LLM integration for diet advice
//!
//! This module handles communication with the Gemini `generateContent` API.
//! Callers depend on [`AdviceTransport`], so the HTTP client can be swapped
//! for a fake in tests.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::config::AdviceConfig;

/// ---------------------------------------------------------------------------
/// Configuration
/// ---------------------------------------------------------------------------

const API_VERSION_PATH: &str = "v1beta";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// ---------------------------------------------------------------------------
/// Error Types
/// ---------------------------------------------------------------------------

#[derive(Error, Debug, Serialize)]
pub enum AdviceError {
  #[error("API key not configured")]
  MissingApiKey,

  #[error("Invalid endpoint: {0}")]
  Endpoint(String),

  #[error("Request failed: {0}")]
  Request(String),

  #[error("Request timed out")]
  Timeout,

  #[error("API error: {0}")]
  Api(String),

  #[error("Parse error: {0}")]
  Parse(String),
}

impl From<reqwest::Error> for AdviceError {
  fn from(e: reqwest::Error) -> Self {
    if e.is_timeout() {
      AdviceError::Timeout
    } else {
      AdviceError::Request(e.to_string())
    }
  }
}

/// ---------------------------------------------------------------------------
/// Transport Seam
/// ---------------------------------------------------------------------------

/// Sends a finished prompt to a text-generation service
#[async_trait]
pub trait AdviceTransport: Send + Sync {
  async fn fetch_advice(&self, prompt: &str) -> Result<String, AdviceError>;
}

/// ---------------------------------------------------------------------------
/// Gemini API Types
/// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
  contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
  role: String,
  parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
  text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
  #[serde(default)]
  candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
  content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
  #[serde(default)]
  parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
  text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
  error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
  message: String,
}

/// ---------------------------------------------------------------------------
/// Gemini Client
/// ---------------------------------------------------------------------------

pub struct GeminiClient {
  client: Client,
  api_key: String,
  endpoint: Url,
  model: String,
}

impl GeminiClient {
  /// Build a client from configuration; fails if no API key is set
  pub fn from_config(config: &AdviceConfig) -> Result<Self, AdviceError> {
    let api_key = config.api_key.clone().ok_or(AdviceError::MissingApiKey)?;
    let endpoint = generate_content_url(&config.api_base, &config.model)?;

    let client = Client::builder().timeout(config.timeout).build()?;

    Ok(Self {
      client,
      api_key,
      endpoint,
      model: config.model.clone(),
    })
  }

  pub fn model(&self) -> &str {
    &self.model
  }

  /// Send a single-turn prompt and return the generated text
  pub async fn generate(&self, prompt: &str) -> Result<String, AdviceError> {
    let request = GenerateContentRequest {
      contents: vec![RequestContent {
        role: "user".to_string(),
        parts: vec![RequestPart {
          text: prompt.to_string(),
        }],
      }],
    };

    debug!(model = %self.model, prompt_chars = prompt.len(), "Sending advice request");

    let response = self
      .client
      .post(self.endpoint.clone())
      .header(API_KEY_HEADER, &self.api_key)
      .header("content-type", "application/json")
      .json(&request)
      .send()
      .await?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
      // Try to parse error response
      if let Ok(error_resp) = serde_json::from_str::<GeminiErrorResponse>(&body) {
        return Err(AdviceError::Api(error_resp.error.message));
      }
      return Err(AdviceError::Api(format!("HTTP {}: {}", status, body)));
    }

    let parsed: GenerateContentResponse =
      serde_json::from_str(&body).map_err(|e| AdviceError::Parse(e.to_string()))?;

    extract_text(parsed)
  }
}

#[async_trait]
impl AdviceTransport for GeminiClient {
  async fn fetch_advice(&self, prompt: &str) -> Result<String, AdviceError> {
    self.generate(prompt).await
  }
}

/// `{base}/v1beta/models/{model}:generateContent`
fn generate_content_url(api_base: &str, model: &str) -> Result<Url, AdviceError> {
  let mut url = Url::parse(api_base).map_err(|e| AdviceError::Endpoint(e.to_string()))?;
  let method = format!("{}:generateContent", model);
  url
    .path_segments_mut()
    .map_err(|_| AdviceError::Endpoint(format!("cannot be a base URL: {}", api_base)))?
    .pop_if_empty()
    .extend([API_VERSION_PATH, "models", method.as_str()]);
  Ok(url)
}

/// Join the text parts of the first candidate
fn extract_text(response: GenerateContentResponse) -> Result<String, AdviceError> {
  let text: String = response
    .candidates
    .into_iter()
    .next()
    .and_then(|c| c.content)
    .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
    .unwrap_or_default();

  if text.trim().is_empty() {
    return Err(AdviceError::Parse("No text content in response".to_string()));
  }
  Ok(text)
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use std::time::Duration;

  const MODEL: &str = "gemini-test";
  const PATH: &str = "/v1beta/models/gemini-test:generateContent";

  fn config(api_base: &str, timeout: Duration) -> AdviceConfig {
    AdviceConfig {
      api_key: Some("test-key".to_string()),
      api_base: api_base.to_string(),
      model: MODEL.to_string(),
      timeout,
    }
  }

  #[test]
  fn test_endpoint_url() {
    let url = generate_content_url("https://generativelanguage.googleapis.com", "gemini-2.5-flash").unwrap();
    assert_eq!(
      url.as_str(),
      "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
    );

    let url = generate_content_url("http://localhost:1234/proxy/", MODEL).unwrap();
    assert_eq!(url.as_str(), "http://localhost:1234/proxy/v1beta/models/gemini-test:generateContent");

    assert!(generate_content_url("not a url", MODEL).is_err());
  }

  #[test]
  fn test_missing_api_key() {
    let mut cfg = config("http://localhost", Duration::from_secs(1));
    cfg.api_key = None;
    assert!(matches!(GeminiClient::from_config(&cfg), Err(AdviceError::MissingApiKey)));
  }

  #[test]
  fn test_extract_text_joins_parts() {
    let response: GenerateContentResponse = serde_json::from_str(
      r###"{"candidates":[{"content":{"parts":[{"text":"## Plan\n"},{"text":"* Eat dal"}]}}]}"###,
    )
    .unwrap();
    assert_eq!(extract_text(response).unwrap(), "## Plan\n* Eat dal");

    let empty: GenerateContentResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
    assert!(matches!(extract_text(empty), Err(AdviceError::Parse(_))));
  }

  #[tokio::test]
  async fn test_generate_success() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
      .mock("POST", PATH)
      .match_header(API_KEY_HEADER, "test-key")
      .match_body(mockito::Matcher::PartialJsonString(
        r#"{"contents":[{"role":"user","parts":[{"text":"hello"}]}]}"#.to_string(),
      ))
      .with_status(200)
      .with_header("content-type", "application/json")
      .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"**Eat well**"}]}}]}"#)
      .create_async()
      .await;

    let client = GeminiClient::from_config(&config(&server.url(), Duration::from_secs(5))).unwrap();
    let text = client.fetch_advice("hello").await.unwrap();

    assert_eq!(text, "**Eat well**");
    mock.assert_async().await;
  }

  #[tokio::test]
  async fn test_generate_api_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
      .mock("POST", PATH)
      .with_status(400)
      .with_body(r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#)
      .create_async()
      .await;

    let client = GeminiClient::from_config(&config(&server.url(), Duration::from_secs(5))).unwrap();
    let err = client.generate("hello").await.unwrap_err();

    match err {
      AdviceError::Api(message) => assert_eq!(message, "API key not valid"),
      other => panic!("unexpected error: {:?}", other),
    }
  }

  #[tokio::test]
  async fn test_generate_unstructured_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
      .mock("POST", PATH)
      .with_status(503)
      .with_body("upstream unavailable")
      .create_async()
      .await;

    let client = GeminiClient::from_config(&config(&server.url(), Duration::from_secs(5))).unwrap();
    let err = client.generate("hello").await.unwrap_err();

    match err {
      AdviceError::Api(message) => {
        assert!(message.contains("503"));
        assert!(message.contains("upstream unavailable"));
      }
      other => panic!("unexpected error: {:?}", other),
    }
  }

  #[tokio::test]
  async fn test_generate_times_out() {
    // Accepts connections into the backlog but never answers
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let client = GeminiClient::from_config(&config(&base, Duration::from_millis(200))).unwrap();
    let err = client.generate("hello").await.unwrap_err();

    assert!(matches!(err, AdviceError::Timeout), "expected timeout, got {:?}", err);
  }
}
