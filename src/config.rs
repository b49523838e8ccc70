//! Loading trivia configuration (quiz settings + optional question bank) from TOML.
//!
//! See `TriviaConfig` for expected schema.

use serde::Deserialize;
use tracing::{info, error};

use crate::quiz::SelectionPolicy;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct TriviaConfig {
  #[serde(default)]
  pub quiz: QuizSettings,
  #[serde(default)]
  pub categories: Vec<CategoryCfg>,
  #[serde(default)]
  pub questions: Vec<QuestionCfg>,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct QuizSettings {
  #[serde(default)]
  pub selection: SelectionPolicy,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CategoryCfg {
  #[serde(rename = "type")]
  pub kind: String,
}

/// Question entry in the TOML bank. `category` names a category by its type.
#[derive(Clone, Debug, Deserialize)]
pub struct QuestionCfg {
  pub question: String,
  pub answer: String,
  pub difficulty: i64,
  pub category: String,
}

impl TriviaConfig {
  /// True when the file brings its own catalog instead of relying on built-in seeds.
  pub fn has_bank(&self) -> bool { !self.categories.is_empty() }
}

pub fn parse_config(s: &str) -> Result<TriviaConfig, toml::de::Error> {
  toml::from_str::<TriviaConfig>(s)
}

/// Attempt to load `TriviaConfig` from TRIVIA_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_config_from_env() -> Option<TriviaConfig> {
  let path = std::env::var("TRIVIA_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_config(&s) {
      Ok(cfg) => {
        info!(target: "trivia_backend", %path, categories = cfg.categories.len(), questions = cfg.questions.len(), "Loaded trivia config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "trivia_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "trivia_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
