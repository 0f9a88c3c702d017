use quizkit_types::{AnswerSink, AnswerValue, HostProps, SubmitPolicy};

use crate::{Capture, Interaction, Outcome};

/// The diagnostic shown in place of a matching question with missing fields.
pub const MALFORMED_MATCHING_MESSAGE: &str =
    "This matching question is missing its columns or answer key and cannot be answered.";

/// The diagnostic shown in place of a question whose content did not parse.
pub const INVALID_CONTENT_MESSAGE: &str =
    "This question's content could not be read and cannot be answered.";

/// An inert stand-in for content that cannot be rendered.
///
/// It never becomes ready and never answers; hosts should treat the question
/// as ungraded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    message: &'static str,
    missing: Vec<&'static str>,
}

impl Placeholder {
    pub fn malformed_matching(missing: Vec<&'static str>) -> Self {
        Self {
            message: MALFORMED_MATCHING_MESSAGE,
            missing,
        }
    }

    pub fn invalid_content() -> Self {
        Self {
            message: INVALID_CONTENT_MESSAGE,
            missing: Vec::new(),
        }
    }

    pub fn message(&self) -> &'static str {
        self.message
    }

    /// Names of the fields that were absent, as they appear on the wire.
    pub fn missing_fields(&self) -> &[&'static str] {
        &self.missing
    }
}

impl Capture for Placeholder {
    fn is_ready(&self) -> bool {
        false
    }

    fn submit_policy(&self) -> SubmitPolicy {
        SubmitPolicy::Explicit
    }

    fn is_answered(&self) -> bool {
        false
    }

    fn handle(&mut self, _: &Interaction, _: &HostProps, _: &mut dyn AnswerSink) -> Outcome {
        Outcome::Inert
    }

    fn restore(&mut self, _: &AnswerValue) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_event_is_inert() {
        let mut placeholder = Placeholder::malformed_matching(vec!["correctPairs"]);
        let mut received = Vec::new();
        let mut sink = |v: AnswerValue| received.push(v);
        for interaction in [
            Interaction::TapLeft("1".into()),
            Interaction::TapRight("A".into()),
            Interaction::Submit,
        ] {
            assert_eq!(
                placeholder.handle(&interaction, &HostProps::new(), &mut sink),
                Outcome::Inert
            );
        }
        assert!(received.is_empty());
        assert_eq!(placeholder.missing_fields(), ["correctPairs"]);
    }
}
