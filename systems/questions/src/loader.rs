//! Question source parsing.
//!
//! Sources are JSON arrays of `{"text", "choices", "correctAnswer"}` objects.

use std::{fs, io, path::Path};

use log::{info, warn};
use orb_maze_core::{LoadPolicy, Question, QuestionError, RecordDefect};
use serde::Deserialize;
use thiserror::Error;

/// Failures raised while reading a question source.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source exists but could not be read.
    #[error("failed to read question source: {0}")]
    Io(#[from] io::Error),
    /// The source is not a JSON array.
    #[error("question source is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// A record was rejected under the strict policy.
    #[error(transparent)]
    Record(#[from] QuestionError),
}

#[derive(Debug, Deserialize)]
struct QuestionRecord {
    #[serde(default)]
    text: String,
    #[serde(default)]
    choices: Option<Vec<String>>,
    #[serde(default, rename = "correctAnswer", alias = "correct_answer")]
    correct_answer: String,
}

impl QuestionRecord {
    fn into_question(self) -> Result<Question, RecordDefect> {
        let choices = match self.choices {
            None => return Err(RecordDefect::MissingChoices),
            Some(choices) if choices.is_empty() => return Err(RecordDefect::MissingChoices),
            Some(choices) => choices,
        };

        let count = choices.len();
        let pair: [String; 2] = choices
            .try_into()
            .map_err(|_| RecordDefect::WrongChoiceCount(count))?;

        Question::new(self.text, pair, self.correct_answer)
    }
}

/// Parses a JSON question source.
///
/// `null` parses as an empty source. Malformed records are skipped under
/// [`LoadPolicy::Lenient`] and abort the load under [`LoadPolicy::Strict`].
pub fn parse_questions(json: &str, policy: LoadPolicy) -> Result<Vec<Question>, LoadError> {
    let raw: Option<Vec<serde_json::Value>> = serde_json::from_str(json)?;
    let raw = raw.unwrap_or_default();

    let mut questions = Vec::with_capacity(raw.len());
    for (index, value) in raw.into_iter().enumerate() {
        let parsed = serde_json::from_value::<QuestionRecord>(value)
            .map_err(|_| RecordDefect::Malformed)
            .and_then(QuestionRecord::into_question);

        match parsed {
            Ok(question) => questions.push(question),
            Err(reason) => {
                let error = QuestionError::InvalidQuestionRecord { index, reason };
                match policy {
                    LoadPolicy::Strict => return Err(error.into()),
                    LoadPolicy::Lenient => warn!("skipping {error}"),
                }
            }
        }
    }

    Ok(questions)
}

/// Reads and parses the question source at `path`.
///
/// A missing file is not an error: it yields an empty pool, which disables
/// question gating for the session.
pub fn load_questions_from_path(
    path: &Path,
    policy: LoadPolicy,
) -> Result<Vec<Question>, LoadError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            warn!("question source {} not found, loading no questions", path.display());
            return Ok(Vec::new());
        }
        Err(error) => return Err(error.into()),
    };

    let questions = parse_questions(&contents, policy)?;
    info!("loaded {} questions from {}", questions.len(), path.display());
    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r#"[
        {"text": "2+2?", "choices": ["3", "4"], "correctAnswer": "4"},
        {"text": "no choices", "correctAnswer": "x"},
        {"text": "three", "choices": ["a", "b", "c"], "correctAnswer": "a"},
        {"text": "wrong", "choices": ["a", "b"], "correctAnswer": "z"},
        42,
        {"text": "Sky?", "choices": ["blue", "green"], "correct_answer": "blue"}
    ]"#;

    #[test]
    fn lenient_policy_skips_bad_records() {
        let questions = parse_questions(SOURCE, LoadPolicy::Lenient).expect("lenient load");
        let texts: Vec<&str> = questions.iter().map(Question::text).collect();
        assert_eq!(texts, vec!["2+2?", "Sky?"]);
    }

    #[test]
    fn strict_policy_rejects_first_bad_record() {
        let error = parse_questions(SOURCE, LoadPolicy::Strict).expect_err("strict load fails");
        match error {
            LoadError::Record(QuestionError::InvalidQuestionRecord { index, reason }) => {
                assert_eq!(index, 1);
                assert_eq!(reason, RecordDefect::MissingChoices);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn wrong_choice_count_is_reported() {
        let source = r#"[{"text": "t", "choices": ["a", "b", "c"], "correctAnswer": "a"}]"#;
        let error = parse_questions(source, LoadPolicy::Strict).expect_err("strict load fails");
        assert!(matches!(
            error,
            LoadError::Record(QuestionError::InvalidQuestionRecord {
                index: 0,
                reason: RecordDefect::WrongChoiceCount(3),
            })
        ));
    }

    #[test]
    fn null_and_empty_sources_yield_no_questions() {
        assert!(parse_questions("null", LoadPolicy::Strict)
            .expect("null parses")
            .is_empty());
        assert!(parse_questions("[]", LoadPolicy::Strict)
            .expect("empty array parses")
            .is_empty());
    }

    #[test]
    fn non_array_source_is_a_parse_error() {
        let error = parse_questions("{\"text\": 1}", LoadPolicy::Lenient).expect_err("not an array");
        assert!(matches!(error, LoadError::Parse(_)));
    }

    #[test]
    fn missing_file_yields_empty_pool() {
        let path = Path::new("definitely/not/here/questions.json");
        let questions =
            load_questions_from_path(path, LoadPolicy::Strict).expect("missing file tolerated");
        assert!(questions.is_empty());
    }
}
