use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;
use crate::store::{Choice, GameFields, CHOICE_COUNT};

const DEFAULT_SOURCE: &str = "data/Ward Conversation Jan 26.docx";
const DEFAULT_OUTPUT: &str = "data/questions.json";
const CONFIG_FILE: &str = "quiz";
const ENV_PREFIX: &str = "QUIZ";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Document the questions are extracted from.
    pub source: PathBuf,
    /// Question bank written by `extract` and read by everything else.
    pub output: PathBuf,
    pub game: GameTemplate,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source: PathBuf::from(DEFAULT_SOURCE),
            output: PathBuf::from(DEFAULT_OUTPUT),
            game: GameTemplate::default(),
        }
    }
}

/// Game metadata stamped onto every extracted question.
///
/// The same five choices are reused for all questions; per-question choices
/// are edited by hand in the written bank.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameTemplate {
    pub choices: Vec<String>,
    pub correct_choice: Choice,
    pub hint_wrong: String,
    pub explanation_right: String,
}

impl Default for GameTemplate {
    fn default() -> Self {
        Self {
            choices: vec![
                "Classical orthodox: God intervenes directly; traditional doctrines as stated.".into(),
                "Liberal/demythologizing: mostly symbolic language; ethics-first; minimal metaphysics.".into(),
                "Ward-like metaphysical theism/idealist: ultimate reality is Mind/Spirit; nuanced, not crude supernaturalism.".into(),
                "Materialist/skeptical: only matter exists; religion is human projection.".into(),
                "Non-theistic spiritual: ultimate reality is impersonal; 'God' language is too anthropomorphic.".into(),
            ],
            correct_choice: Choice::C,
            hint_wrong: "Not quite right—Ward typically takes a nuanced metaphysical position rather than a purely literalist or purely reductionist one.".into(),
            explanation_right: "Yes—this aligns with Ward's characteristic approach in this answer.".into(),
        }
    }
}

impl GameTemplate {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.choices.len() != CHOICE_COUNT {
            return Err(ConfigError::ChoiceCount(self.choices.len()));
        }
        Ok(())
    }

    pub fn fields(&self) -> GameFields {
        GameFields {
            choices: self.choices.clone(),
            correct_choice: self.correct_choice,
            hint_wrong: self.hint_wrong.clone(),
            explanation_right: self.explanation_right.clone(),
        }
    }
}

/// Load settings: defaults, then `quiz.toml` (or `explicit`), then `QUIZ_*` env vars.
pub fn load(explicit: Option<&Path>) -> Result<Settings> {
    let file = match explicit {
        Some(path) => config::File::from(path.to_path_buf()).required(true),
        None => config::File::with_name(CONFIG_FILE).required(false),
    };

    let builder = config::Config::builder().add_source(file).add_source(
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__"),
    );
    let settings = from_builder(builder)?;
    debug!(settings = ?settings, "configuration loaded");
    Ok(settings)
}

fn from_builder(builder: config::ConfigBuilder<config::builder::DefaultState>) -> Result<Settings> {
    let settings: Settings = builder
        .build()
        .context("Failed to read configuration")?
        .try_deserialize()
        .context("Invalid configuration")?;

    settings.game.validate()?;
    Ok(settings)
}
