use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{Question, QuestionError};

/// An ordered list of questions with optional framing text.
///
/// A question set is presentation-agnostic: a host walks it one question at a
/// time, presenting each in a fresh session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionSet {
    /// Optional title for the set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Optional message shown before the first question.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prelude: Option<String>,

    /// All questions, in presentation order.
    #[serde(deserialize_with = "questions_or_invalid")]
    pub questions: Vec<Question>,

    /// Optional message shown after the last question.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epilogue: Option<String>,
}

impl QuestionSet {
    /// Create a new question set with the given questions.
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            title: None,
            prelude: None,
            questions,
            epilogue: None,
        }
    }

    /// Parse a question set from JSON.
    ///
    /// Either an object with a `questions` array or a bare array of questions.
    /// A question that does not parse is kept as
    /// [`QuestionKind::Invalid`](crate::QuestionKind::Invalid) so the rest of
    /// the set still loads.
    pub fn from_json(json: &str) -> Result<Self, QuestionError> {
        let value: Value = serde_json::from_str(json)?;
        if let Value::Array(values) = value {
            return Ok(Self::new(degrade_invalid(values)));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Read and parse a question set file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, QuestionError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| QuestionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the prelude message.
    pub fn with_prelude(mut self, prelude: impl Into<String>) -> Self {
        self.prelude = Some(prelude.into());
        self
    }

    /// Set the epilogue message.
    pub fn with_epilogue(mut self, epilogue: impl Into<String>) -> Self {
        self.epilogue = Some(epilogue.into());
        self
    }

    /// Get the questions.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Find a question by id.
    pub fn get(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }

    /// Check if the set has any questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Get the number of questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }
}

fn degrade_invalid(values: Vec<Value>) -> Vec<Question> {
    values
        .into_iter()
        .enumerate()
        .map(|(position, value)| Question::from_value_or_invalid(value, position))
        .collect()
}

fn questions_or_invalid<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Question>, D::Error> {
    Vec::<Value>::deserialize(deserializer).map(degrade_invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_array() {
        let set = QuestionSet::from_json(
            r#"[{"type": "writing_short", "id": "a", "text": "Hi"}, {"type": "true_false", "id": "b", "text": "Sky is blue", "correctValue": true}]"#,
        )
        .unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.get("b").is_some());
        assert!(set.title.is_none());
    }

    #[test]
    fn object_with_framing() {
        let set = QuestionSet::from_json(
            r#"{"title": "Warmup", "prelude": "Go!", "questions": [], "epilogue": "Done"}"#,
        )
        .unwrap();
        assert!(set.is_empty());
        assert_eq!(set.prelude.as_deref(), Some("Go!"));
    }

    #[test]
    fn bad_question_does_not_sink_the_set() {
        let set = QuestionSet::from_json(
            r#"{"questions": [
                {"type": "true_false", "id": "ok", "text": "Sky is blue", "correctValue": true},
                {"type": "multiple_choice", "id": "no-options", "text": "Pick"},
                {"id": "no-type"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(set.len(), 3);
        assert_eq!(set.get("ok").and_then(Question::question_type), Some(crate::QuestionType::TrueFalse));
        for id in ["no-options", "no-type"] {
            let question = set.get(id).unwrap();
            assert!(matches!(question.kind(), crate::QuestionKind::Invalid(_)), "{id}");
        }

        let bare = QuestionSet::from_json(r#"[{"type": "ordering", "id": "o", "items": 5}]"#).unwrap();
        assert!(matches!(bare.questions()[0].kind(), crate::QuestionKind::Invalid(_)));
    }

    #[test]
    fn malformed_json_is_still_an_error() {
        assert!(QuestionSet::from_json("[{").is_err());
        assert!(QuestionSet::from_json(r#"{"questions": 3}"#).is_err());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = QuestionSet::from_path("/definitely/not/here.json").unwrap_err();
        assert!(!err.is_content_error());
    }
}
