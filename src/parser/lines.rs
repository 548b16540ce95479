use std::sync::LazyLock;

use regex::Regex;

static QUESTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(Opening Question|Question\s+\w+|Question\s+\d+)\s*[:\-]?\s*(.*?)\s*$").unwrap()
});
static ANSWER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*Answer\s*[:\-]?\s*(.*?)\s*$").unwrap());
static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Starts a new record. `rest` is whatever followed the header on the same line.
    QuestionHeader { title: String, rest: String },
    /// Switches the open record to its answer body.
    AnswerHeader { rest: String },
    Content(String),
}

/// Classify one paragraph. Question headers take precedence over answer markers.
pub fn classify(line: &str) -> Line {
    if let Some(caps) = QUESTION_RE.captures(line) {
        return Line::QuestionHeader {
            title: normalize_ws(&caps[1]),
            rest: caps[2].trim().to_string(),
        };
    }

    if let Some(caps) = ANSWER_RE.captures(line) {
        return Line::AnswerHeader {
            rest: caps[1].trim().to_string(),
        };
    }

    Line::Content(line.to_string())
}

pub fn classify_all(paragraphs: &[String]) -> Vec<Line> {
    paragraphs.iter().map(|p| classify(p)).collect()
}

/// Collapse runs of whitespace to single spaces and trim.
pub fn normalize_ws(s: &str) -> String {
    WS_RE.replace_all(s, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(title: &str, rest: &str) -> Line {
        Line::QuestionHeader {
            title: title.to_string(),
            rest: rest.to_string(),
        }
    }

    #[test]
    fn opening_question_with_text() {
        assert_eq!(
            classify("Opening Question: What is truth?"),
            header("Opening Question", "What is truth?")
        );
    }

    #[test]
    fn numbered_question() {
        assert_eq!(classify("Question 2: Second?"), header("Question 2", "Second?"));
        assert_eq!(classify("Question 12 - Why?"), header("Question 12", "Why?"));
        assert_eq!(classify("Question 3"), header("Question 3", ""));
    }

    #[test]
    fn worded_question() {
        assert_eq!(classify("Question Three: On miracles"), header("Question Three", "On miracles"));
    }

    #[test]
    fn header_is_case_insensitive_and_whitespace_normalized() {
        assert_eq!(classify("  opening question:  x "), header("opening question", "x"));
        assert_eq!(classify("QUESTION\t7"), header("QUESTION 7", ""));
    }

    #[test]
    fn opening_phrase_needs_single_space() {
        assert_eq!(
            classify("Opening  Question: x"),
            Line::Content("Opening  Question: x".to_string())
        );
    }

    #[test]
    fn bare_question_word_is_content() {
        assert_eq!(classify("Question"), Line::Content("Question".to_string()));
        assert_eq!(
            classify("Questions remain."),
            Line::Content("Questions remain.".to_string())
        );
    }

    #[test]
    fn answer_marker() {
        assert_eq!(classify("Answer: It depends."), Line::AnswerHeader { rest: "It depends.".into() });
        assert_eq!(classify("answer - yes"), Line::AnswerHeader { rest: "yes".into() });
        assert_eq!(classify("Answer"), Line::AnswerHeader { rest: String::new() });
    }

    #[test]
    fn plain_text_is_content() {
        assert_eq!(
            classify("Some elaboration."),
            Line::Content("Some elaboration.".to_string())
        );
        // marker must start the line
        assert_eq!(
            classify("The Answer: none"),
            Line::Content("The Answer: none".to_string())
        );
    }

    #[test]
    fn break_after_header_text_is_content() {
        assert_eq!(
            classify("Question 1: foo\nbar"),
            Line::Content("Question 1: foo\nbar".to_string())
        );
        assert_eq!(classify("Answer: x\ny"), Line::Content("Answer: x\ny".to_string()));
    }

    #[test]
    fn break_right_after_marker_still_a_header() {
        assert_eq!(classify("Question 1:\nfoo"), header("Question 1", "foo"));
        assert_eq!(classify("Answer:\nyes"), Line::AnswerHeader { rest: "yes".into() });
    }

    #[test]
    fn normalize() {
        assert_eq!(normalize_ws("  a \t b\n c  "), "a b c");
    }
}
