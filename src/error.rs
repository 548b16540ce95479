use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions of an extraction run.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("source document not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error(
        "no Q/A blocks detected; expected paragraphs beginning with 'Opening Question' \
         or 'Question ...' and answers beginning with 'Answer'"
    )]
    NoQuestions,
}

/// Errors raised while serving an extracted question bank.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("question bank not found: {} (run `extract` first)", .0.display())]
    BankNotFound(PathBuf),

    #[error("question not found: {0}")]
    QuestionNotFound(String),

    #[error("question {id} does not have exactly 5 choices (found {count})")]
    ChoiceCount { id: String, count: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("game template needs exactly 5 choices, got {0}")]
    ChoiceCount(usize),
}
