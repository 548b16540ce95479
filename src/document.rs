use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use quick_xml::events::Event;
use tracing::{debug, info};

use crate::error::ExtractError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Read the source document as non-empty, trimmed paragraphs in reading order.
///
/// `.docx` files are read from their main document part; anything else is
/// treated as UTF-8 text with one paragraph per line.
pub fn read_paragraphs(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(ExtractError::SourceNotFound(path.to_path_buf()).into());
    }

    let is_docx = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("docx"));

    let raw = if is_docx {
        let xml = read_document_part(path)?;
        parse_document_xml(&xml)
            .with_context(|| format!("Failed to parse {} in {}", DOCUMENT_PART, path.display()))?
    } else {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        text.lines().map(str::to_string).collect()
    };

    let total = raw.len();
    let paragraphs = clean(raw);
    info!(
        "Read {} paragraphs from {} ({} blank dropped)",
        paragraphs.len(),
        path.display(),
        total - paragraphs.len()
    );
    Ok(paragraphs)
}

fn clean(raw: Vec<String>) -> Vec<String> {
    raw.into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

fn read_document_part(path: &Path) -> Result<String> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut archive = zip::ZipArchive::new(file)
        .with_context(|| format!("Not a Word document: {}", path.display()))?;
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .with_context(|| format!("Not a Word document (no {}): {}", DOCUMENT_PART, path.display()))?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)?;
    debug!("{} is {} bytes", DOCUMENT_PART, xml.len());
    Ok(xml)
}

/// Collect the text of every body-level `<w:p>` in a WordprocessingML document.
///
/// Paragraphs inside tables, text boxes or content controls are skipped, and a
/// text box nested in a body paragraph contributes nothing to its text.
fn parse_document_xml(xml: &str) -> Result<Vec<String>> {
    let mut reader = quick_xml::Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    let mut depth = 0usize;
    let mut body_depth: Option<usize> = None;
    // <w:p> elements open inside the current body paragraph
    let mut nested = 0usize;
    let mut in_text = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let parent = depth;
                depth += 1;
                match e.name().as_ref() {
                    b"w:body" => body_depth = Some(depth),
                    b"w:p" if current.is_some() => nested += 1,
                    b"w:p" if body_depth == Some(parent) => current = Some(String::new()),
                    b"w:t" => in_text = true,
                    b"w:tab" if nested == 0 => push_str(&mut current, "\t"),
                    b"w:br" | b"w:cr" if nested == 0 => push_str(&mut current, "\n"),
                    _ => {}
                }
            }
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:p" if current.is_none() && body_depth == Some(depth) => {
                    paragraphs.push(String::new())
                }
                b"w:tab" if nested == 0 => push_str(&mut current, "\t"),
                b"w:br" | b"w:cr" if nested == 0 => push_str(&mut current, "\n"),
                _ => {}
            },
            Ok(Event::Text(e)) if in_text && nested == 0 => {
                let text = e.unescape()?;
                push_str(&mut current, &text);
            }
            Ok(Event::End(e)) => {
                match e.name().as_ref() {
                    b"w:t" => in_text = false,
                    b"w:p" if nested > 0 => nested -= 1,
                    b"w:p" => {
                        if let Some(p) = current.take() {
                            paragraphs.push(p);
                        }
                    }
                    b"w:body" => body_depth = None,
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
        buf.clear();
    }
    Ok(paragraphs)
}

fn push_str(current: &mut Option<String>, s: &str) {
    if let Some(p) = current.as_mut() {
        p.push_str(s);
    }
}
