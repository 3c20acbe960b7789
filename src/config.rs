//! Runtime configuration from the environment (and `.env`)

use std::env;
use std::time::Duration;

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

pub const DEFAULT_DATABASE_URL: &str = "sqlite://calorie-planner.db?mode=rwc";
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ADVICE_TIMEOUT_SECS: u64 = 30;

const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
  #[error("Invalid value for {key}: '{value}'")]
  Invalid { key: String, value: String },
}

/// Settings for the remote advice service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdviceConfig {
  /// `None` means advice is not configured, not an error
  pub api_key: Option<String>,
  pub api_base: String,
  pub model: String,
  pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
  pub database_url: String,
  /// Invalid advice settings are kept as the error so that only commands
  /// needing advice fail on them
  pub advice: Result<AdviceConfig, ConfigError>,
}

impl AppConfig {
  pub fn from_env() -> Self {
    Self {
      database_url: non_empty_var("CALORIE_PLANNER_DATABASE_URL")
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
      advice: AdviceConfig::from_env(),
    }
  }
}

impl AdviceConfig {
  pub fn from_env() -> Result<Self, ConfigError> {
    let timeout_secs = match non_empty_var("ADVICE_TIMEOUT_SECS") {
      Some(raw) => match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => secs,
        _ => {
          return Err(ConfigError::Invalid {
            key: "ADVICE_TIMEOUT_SECS".into(),
            value: raw,
          })
        }
      },
      None => DEFAULT_ADVICE_TIMEOUT_SECS,
    };

    Ok(Self {
      api_key: API_KEY_VARS.iter().find_map(|name| non_empty_var(name)),
      api_base: non_empty_var("GEMINI_API_BASE")
        .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string()),
      model: non_empty_var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
      timeout: Duration::from_secs(timeout_secs),
    })
  }
}

/// Environment variable, treating blank values as unset
fn non_empty_var(name: &str) -> Option<String> {
  env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
