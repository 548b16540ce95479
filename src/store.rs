use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::QuizError;

pub const CHOICE_COUNT: usize = 5;

/// Answer label shown next to each of the five choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Choice {
    A,
    B,
    #[default]
    C,
    D,
    E,
}

impl Choice {
    pub const ALL: [Choice; CHOICE_COUNT] = [Choice::A, Choice::B, Choice::C, Choice::D, Choice::E];

    pub fn as_str(self) -> &'static str {
        match self {
            Choice::A => "A",
            Choice::B => "B",
            Choice::C => "C",
            Choice::D => "D",
            Choice::E => "E",
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Choice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Choice::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("invalid choice '{}' (expected one of A, B, C, D, E)", s))
    }
}

/// Structural part of a question: what the document actually says.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub question_text: String,
    #[serde(default)]
    pub answer_text: String,
}

/// Game part of a question: options and feedback, edited by hand after extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameFields {
    #[serde(default)]
    pub choices: Vec<String>,
    #[serde(default)]
    pub correct_choice: Choice,
    #[serde(default)]
    pub hint_wrong: String,
    #[serde(default)]
    pub explanation_right: String,
}

/// One record of the question bank, serialized as a single flat JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(flatten)]
    pub section: Section,
    #[serde(flatten)]
    pub game: GameFields,
}

/// Write the bank as an indented JSON array, replacing `path` atomically.
pub fn save_questions(path: &Path, questions: &[Question]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let json = serde_json::to_string_pretty(questions)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
    tmp.write_all(json.as_bytes())?;
    tmp.write_all(b"\n")?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!("Saved {} questions to {}", questions.len(), path.display());
    Ok(())
}

pub fn load_questions(path: &Path) -> Result<Vec<Question>> {
    if !path.exists() {
        return Err(QuizError::BankNotFound(path.to_path_buf()).into());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let questions: Vec<Question> = serde_json::from_str(&raw)
        .with_context(|| format!("Malformed question bank: {}", path.display()))?;
    Ok(questions)
}
