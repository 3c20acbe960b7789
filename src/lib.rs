pub mod advice;
pub mod calories;
pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod history;
pub mod llm;
pub mod logging;
pub mod models;
pub mod numeric;
pub mod profile;
pub mod report;
pub mod session;
pub mod units;

#[cfg(test)]
mod test_utils;

use clap::Parser;
use serde::Serialize;
use std::process::ExitCode;
use tracing::error;

use cli::{Cli, Command, HistoryAction, ProfileAction};
use commands::{AppState, CommandError};
use config::AppConfig;

#[derive(Debug, thiserror::Error)]
enum RunError {
  #[error(transparent)]
  Command(#[from] CommandError),

  #[error("Failed to encode output: {0}")]
  Output(#[from] serde_json::Error),
}

pub fn run() -> ExitCode {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();

  let cli = Cli::parse();
  logging::init_logging(cli.verbose);

  let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
    Ok(runtime) => runtime,
    Err(e) => {
      eprintln!("Failed to start async runtime: {}", e);
      return ExitCode::FAILURE;
    }
  };

  match runtime.block_on(execute(cli)) {
    Ok(output) => {
      print!("{}", output);
      ExitCode::SUCCESS
    }
    Err(e) => {
      error!(error = %e, "Command failed");
      eprintln!("Error: {}", e);
      ExitCode::FAILURE
    }
  }
}

/// Open storage and the advice service for commands that need them
async fn open_state(
  database_url: Option<String>,
  advice_required: bool,
) -> Result<AppState, RunError> {
  let mut config = AppConfig::from_env();
  if let Some(url) = database_url {
    config.database_url = url;
  }
  Ok(AppState::initialize(&config, advice_required).await?)
}

/// Run one CLI command and return what should be printed
async fn execute(cli: Cli) -> Result<String, RunError> {
  let Cli {
    database_url,
    json,
    command,
    ..
  } = cli;

  match command {
    Command::ActivityLevels => {
      let levels = commands::activity_levels();
      render(json, &levels, || report::format_activity_levels(&levels))
    }
    Command::Calculate(args) => {
      let mut state = open_state(database_url, false).await?;
      let entry = commands::calculate(&mut state, args.into()).await?;
      render(json, &entry, || report::format_result(&entry.result))
    }
    Command::Profile { action } => {
      let mut state = open_state(database_url, false).await?;
      match action {
        ProfileAction::Save(args) => {
          let saved = commands::profile::save_profile(&mut state, args.into()).await?;
          render(json, &saved, || format!("Profile saved.\n{}", report::format_profile(&saved)))
        }
        ProfileAction::Load => {
          let loaded = commands::profile::load_profile(&mut state).await?;
          render(json, &loaded, || {
            format!(
              "{}\n{}",
              report::format_input(&loaded.input),
              report::format_result(&loaded.result)
            )
          })
        }
        ProfileAction::Show => {
          let saved = commands::profile::show_profile(&state).await?;
          render(json, &saved, || report::format_profile(&saved))
        }
      }
    }
    Command::History { action } => {
      let state = open_state(database_url, false).await?;
      match action {
        HistoryAction::List => {
          let entries = commands::history::list_history(&state).await;
          render(json, &entries, || report::format_history(&entries))
        }
        HistoryAction::Clear => {
          commands::history::clear_history(&state).await?;
          Ok("History cleared.\n".to_string())
        }
      }
    }
    Command::Advice { input, html } => {
      let mut state = open_state(database_url, true).await?;
      let advice = commands::advice::get_advice(&mut state, input.into(), html).await?;
      render(json, &advice, || {
        format!("{}\n{}\n", report::format_result(&advice.result), advice.text)
      })
    }
  }
}

/// JSON when requested, otherwise the plain-text rendering
fn render<T: Serialize>(
  json: bool,
  value: &T,
  text: impl FnOnce() -> String,
) -> Result<String, RunError> {
  if json {
    Ok(format!("{}\n", serde_json::to_string_pretty(value)?))
  } else {
    Ok(text())
  }
}
