pub mod lines;
pub mod records;

use tracing::{debug, info};

use crate::settings::GameTemplate;
use crate::error::ExtractError;
use crate::store::Question;

/// Two-pass pipeline: paragraphs → classified lines → question records.
pub fn extract_questions(
    paragraphs: &[String],
    template: &GameTemplate,
) -> Result<Vec<Question>, ExtractError> {
    let lines = lines::classify_all(paragraphs);
    let sections = records::group(&lines);
    if sections.is_empty() {
        return Err(ExtractError::NoQuestions);
    }

    for s in &sections {
        debug!(id = %s.id, title = %s.title, "extracted record");
    }
    info!("Extracted {} questions from {} paragraphs", sections.len(), paragraphs.len());

    let game = template.fields();
    Ok(sections
        .into_iter()
        .map(|section| Question {
            section,
            game: game.clone(),
        })
        .collect())
}
