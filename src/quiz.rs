use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::error::QuizError;
use crate::store::{self, Choice, Question, CHOICE_COUNT};

const PREVIEW_CHARS: usize = 220;
const MSG_CORRECT: &str = "Correct — you've got Ward exactly right.";
const MSG_WRONG: &str = "Not quite right.";
const FALLBACK_HINT: &str = "Try again: Ward's answer is subtler than this option suggests.";

/// Read-only view over an extracted question bank.
pub struct QuestionBank {
    questions: Vec<Question>,
}

#[derive(Debug, Serialize)]
pub struct Summary<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub question_preview: String,
}

#[derive(Debug, Serialize)]
pub struct Detail<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub question_text: &'a str,
    pub choices: &'a [String],
}

#[derive(Debug, Serialize)]
pub struct AnswerView<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub answer_text: &'a str,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub correct: bool,
    pub message: String,
    pub correct_choice: Choice,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self::new(store::load_questions(path)?))
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn find(&self, id: &str) -> Result<&Question, QuizError> {
        self.questions
            .iter()
            .find(|q| q.section.id == id)
            .ok_or_else(|| QuizError::QuestionNotFound(id.to_string()))
    }

    pub fn summaries(&self) -> Vec<Summary<'_>> {
        self.questions
            .iter()
            .map(|q| Summary {
                id: &q.section.id,
                title: &q.section.title,
                question_preview: preview(&q.section.question_text, PREVIEW_CHARS),
            })
            .collect()
    }

    /// Question with its choices. Refuses records that don't have exactly five.
    pub fn detail(&self, id: &str) -> Result<Detail<'_>, QuizError> {
        let q = self.find(id)?;
        let count = q.game.choices.len();
        if count != CHOICE_COUNT {
            return Err(QuizError::ChoiceCount {
                id: id.to_string(),
                count,
            });
        }
        Ok(Detail {
            id: &q.section.id,
            title: &q.section.title,
            question_text: &q.section.question_text,
            choices: &q.game.choices,
        })
    }

    pub fn answer(&self, id: &str) -> Result<AnswerView<'_>, QuizError> {
        let q = self.find(id)?;
        Ok(AnswerView {
            id: &q.section.id,
            title: &q.section.title,
            answer_text: &q.section.answer_text,
        })
    }

    pub fn grade(&self, id: &str, choice: Choice) -> Result<Verdict, QuizError> {
        let q = self.find(id)?;
        let correct_choice = q.game.correct_choice;

        if choice == correct_choice {
            Ok(Verdict {
                correct: true,
                message: MSG_CORRECT.to_string(),
                correct_choice,
                explanation: non_empty(&q.game.explanation_right),
                hint: None,
            })
        } else {
            Ok(Verdict {
                correct: false,
                message: MSG_WRONG.to_string(),
                correct_choice,
                explanation: None,
                hint: Some(non_empty(&q.game.hint_wrong).unwrap_or_else(|| FALLBACK_HINT.to_string())),
            })
        }
    }

    /// Problems a consumer would trip over, one message per problem.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.questions.is_empty() {
            problems.push("bank contains no questions".to_string());
        }

        for (i, q) in self.questions.iter().enumerate() {
            let expected = format!("q{:03}", i + 1);
            if q.section.id != expected {
                problems.push(format!(
                    "record {}: id is '{}', expected '{}'",
                    i + 1,
                    q.section.id,
                    expected
                ));
            }
            if q.section.title.trim().is_empty() {
                problems.push(format!("{}: empty title", q.section.id));
            }
            if q.game.choices.len() != CHOICE_COUNT {
                problems.push(format!(
                    "{}: {} choices, expected {}",
                    q.section.id,
                    q.game.choices.len(),
                    CHOICE_COUNT
                ));
            }
        }
        problems
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// First `max` chars of the trimmed text, with an ellipsis when cut.
pub fn preview(text: &str, max: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}…", cut)
    }
}
