use super::lines::Line;
use crate::store::Section;

const PARAGRAPH_SEP: &str = "\n\n";

/// Record being accumulated until the next header or end of input.
#[derive(Debug)]
struct Draft {
    id: String,
    title: String,
    question: Vec<String>,
    answer: Vec<String>,
}

impl Draft {
    fn open(seq: usize, title: &str) -> Self {
        Self {
            id: format!("q{:03}", seq),
            title: title.to_string(),
            question: Vec::new(),
            answer: Vec::new(),
        }
    }

    fn finish(self) -> Section {
        Section {
            id: self.id,
            title: self.title,
            question_text: join_paragraphs(&self.question),
            answer_text: join_paragraphs(&self.answer),
        }
    }
}

#[derive(Debug)]
enum State {
    NoRecordOpen,
    InQuestionBody(Draft),
    InAnswerBody(Draft),
}

impl State {
    fn into_draft(self) -> Option<Draft> {
        match self {
            State::NoRecordOpen => None,
            State::InQuestionBody(d) | State::InAnswerBody(d) => Some(d),
        }
    }
}

/// Group classified lines into records, in header order.
///
/// Ids are `q001`, `q002`, ... by position, whatever the header text says.
pub fn group(lines: &[Line]) -> Vec<Section> {
    let mut done = Vec::new();
    let mut state = State::NoRecordOpen;

    for line in lines {
        state = step(state, line, &mut done);
    }
    if let Some(draft) = state.into_draft() {
        done.push(draft.finish());
    }

    done
}

fn step(state: State, line: &Line, done: &mut Vec<Section>) -> State {
    match (state, line) {
        (state, Line::QuestionHeader { title, rest }) => {
            if let Some(prev) = state.into_draft() {
                done.push(prev.finish());
            }
            let mut draft = Draft::open(done.len() + 1, title);
            push_non_empty(&mut draft.question, rest);
            State::InQuestionBody(draft)
        }

        // preamble, including answer markers before the first header
        (State::NoRecordOpen, _) => State::NoRecordOpen,

        (State::InQuestionBody(mut d) | State::InAnswerBody(mut d), Line::AnswerHeader { rest }) => {
            push_non_empty(&mut d.answer, rest);
            State::InAnswerBody(d)
        }

        (State::InQuestionBody(mut d), Line::Content(text)) => {
            d.question.push(text.clone());
            State::InQuestionBody(d)
        }

        (State::InAnswerBody(mut d), Line::Content(text)) => {
            d.answer.push(text.clone());
            State::InAnswerBody(d)
        }
    }
}

fn push_non_empty(paras: &mut Vec<String>, text: &str) {
    if !text.is_empty() {
        paras.push(text.to_string());
    }
}

/// Trim each paragraph, drop blank ones, join with a blank line.
pub fn join_paragraphs(paras: &[String]) -> String {
    paras
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(PARAGRAPH_SEP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lines::classify;

    fn run(paras: &[&str]) -> Vec<Section> {
        let lines: Vec<Line> = paras.iter().map(|p| classify(p)).collect();
        group(&lines)
    }

    #[test]
    fn ids_follow_header_order_not_header_text() {
        let out = run(&["Question 7: a", "Question 3: b", "Opening Question: c"]);
        let ids: Vec<&str> = out.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["q001", "q002", "q003"]);
        assert_eq!(out[0].title, "Question 7");
    }

    #[test]
    fn preamble_dropped() {
        let out = run(&["Ward Conversation", "January 26", "Question 1: Why?"]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].question_text, "Why?");
    }

    #[test]
    fn answer_before_first_header_ignored() {
        let out = run(&["Answer: too early", "Question 1", "Answer: on time"]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].question_text, "");
        assert_eq!(out[0].answer_text, "on time");
    }

    #[test]
    fn consecutive_headers_leave_first_empty() {
        let out = run(&["Question 1", "Question 2: Next?", "Answer: Yes."]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].question_text, "");
        assert_eq!(out[0].answer_text, "");
        assert_eq!(out[1].question_text, "Next?");
        assert_eq!(out[1].answer_text, "Yes.");
    }

    #[test]
    fn bare_answer_marker_switches_mode() {
        let out = run(&["Question 1: Q?", "Answer", "First.", "Second."]);
        assert_eq!(out[0].question_text, "Q?");
        assert_eq!(out[0].answer_text, "First.\n\nSecond.");
    }

    #[test]
    fn repeated_answer_marker_keeps_appending() {
        let out = run(&["Question 1", "Answer: one", "Answer: two"]);
        assert_eq!(out[0].answer_text, "one\n\ntwo");
    }

    #[test]
    fn multi_line_answer_paragraph_stays_in_question_body() {
        let out = run(&["Question 1: Q?", "Answer: x\ny"]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].question_text, "Q?\n\nAnswer: x\ny");
        assert_eq!(out[0].answer_text, "");
    }

    #[test]
    fn multi_line_header_paragraph_does_not_open_a_record() {
        let out = run(&["Question 1: Q?", "Question 2: foo\nbar"]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].question_text, "Q?\n\nQuestion 2: foo\nbar");
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(group(&[]).is_empty());
        assert!(run(&["just text", "Answer: nothing open"]).is_empty());
    }

    #[test]
    fn joined_text_splits_back_into_paragraphs() {
        let paras = vec!["  First para. ".to_string(), "Second\tpara.".to_string(), "Third.".to_string()];
        let joined = join_paragraphs(&paras);
        let split: Vec<&str> = joined.split(PARAGRAPH_SEP).collect();
        let expected: Vec<&str> = paras.iter().map(|p| p.trim()).collect();
        assert_eq!(split, expected);
    }

    #[test]
    fn blank_paragraphs_skipped_when_joining() {
        let paras = vec!["a".to_string(), "   ".to_string(), "b".to_string()];
        assert_eq!(join_paragraphs(&paras), "a\n\nb");
        assert_eq!(join_paragraphs(&[]), "");
    }
}
