//! Handler selection.

use quizkit_types::{AnswerSink, AnswerValue, HostProps, Question, QuestionKind, SubmitPolicy};

use crate::handlers::{
    CategorizationHandler, ChoiceHandler, CorrectionHandler, FillBlankHandler,
    FillBlanksMultiHandler, MatchingHandler, OrderingHandler, Placeholder,
    ReadingComprehensionHandler, TextHandler, TrueFalseHandler, WritingSentenceHandler,
};
use crate::{Capture, Interaction, Outcome};

/// The handler chosen for one question instance.
#[derive(Debug, Clone, PartialEq)]
pub enum Handler {
    MultipleChoice(ChoiceHandler),
    FillBlank(FillBlankHandler),
    WritingShort(TextHandler),
    TrueFalse(TrueFalseHandler),
    Matching(MatchingHandler),
    Ordering(OrderingHandler),
    ReadingComprehension(ReadingComprehensionHandler),
    FillBlanksMulti(FillBlanksMultiHandler),
    WritingSentence(WritingSentenceHandler),
    Correction(CorrectionHandler),
    Categorization(CategorizationHandler),

    /// An unknown tag that carries options.
    FallbackChoice(ChoiceHandler),

    /// An unknown tag without options.
    FallbackText(TextHandler),

    /// Content that cannot be answered.
    Malformed(Placeholder),
}

impl Handler {
    fn as_capture(&self) -> &dyn Capture {
        match self {
            Self::MultipleChoice(h) | Self::FallbackChoice(h) => h,
            Self::FillBlank(h) => h,
            Self::WritingShort(h) | Self::FallbackText(h) => h,
            Self::TrueFalse(h) => h,
            Self::Matching(h) => h,
            Self::Ordering(h) => h,
            Self::ReadingComprehension(h) => h,
            Self::FillBlanksMulti(h) => h,
            Self::WritingSentence(h) => h,
            Self::Correction(h) => h,
            Self::Categorization(h) => h,
            Self::Malformed(h) => h,
        }
    }

    fn as_capture_mut(&mut self) -> &mut dyn Capture {
        match self {
            Self::MultipleChoice(h) | Self::FallbackChoice(h) => h,
            Self::FillBlank(h) => h,
            Self::WritingShort(h) | Self::FallbackText(h) => h,
            Self::TrueFalse(h) => h,
            Self::Matching(h) => h,
            Self::Ordering(h) => h,
            Self::ReadingComprehension(h) => h,
            Self::FillBlanksMulti(h) => h,
            Self::WritingSentence(h) => h,
            Self::Correction(h) => h,
            Self::Categorization(h) => h,
            Self::Malformed(h) => h,
        }
    }

    /// Whether this is the inert placeholder for malformed content.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }

    /// Whether an unknown tag was degraded to a fallback handler.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::FallbackChoice(_) | Self::FallbackText(_))
    }
}

impl Capture for Handler {
    fn is_ready(&self) -> bool {
        self.as_capture().is_ready()
    }

    fn submit_policy(&self) -> SubmitPolicy {
        self.as_capture().submit_policy()
    }

    fn is_answered(&self) -> bool {
        self.as_capture().is_answered()
    }

    fn handle(
        &mut self,
        interaction: &Interaction,
        props: &HostProps,
        sink: &mut dyn AnswerSink,
    ) -> Outcome {
        self.as_capture_mut().handle(interaction, props, sink)
    }

    fn restore(&mut self, answer: &AnswerValue) -> bool {
        self.as_capture_mut().restore(answer)
    }
}

/// Pick the handler for a question.
///
/// Unknown tags fall back to choice handling when options are present and to
/// free text otherwise. A matching question missing a column or its answer
/// key, and content that did not parse, get an inert [`Placeholder`]. If
/// `props` carries a previously submitted answer of a fitting shape, the
/// handler is restored from it.
pub fn dispatch(question: &Question, props: &HostProps) -> Handler {
    let mut handler = match question.kind() {
        QuestionKind::MultipleChoice(q) => Handler::MultipleChoice(ChoiceHandler::new(q.options.clone())),
        QuestionKind::FillBlank(q) => Handler::FillBlank(FillBlankHandler::new(q)),
        QuestionKind::WritingShort(q) => Handler::WritingShort(TextHandler::new(q.max_words)),
        QuestionKind::TrueFalse(q) => Handler::TrueFalse(TrueFalseHandler::new(q)),
        QuestionKind::Matching(q) => match MatchingHandler::from_question(q) {
            Some(handler) => Handler::Matching(handler),
            None => {
                let missing = q.missing_fields();
                tracing::warn!(id = question.id(), ?missing, "malformed matching question");
                Handler::Malformed(Placeholder::malformed_matching(missing))
            }
        },
        QuestionKind::Ordering(q) => Handler::Ordering(OrderingHandler::new(q)),
        QuestionKind::ReadingComprehension(q) => {
            Handler::ReadingComprehension(ReadingComprehensionHandler::new(q))
        }
        QuestionKind::FillBlanksMulti(q) => Handler::FillBlanksMulti(FillBlanksMultiHandler::new(q)),
        QuestionKind::WritingSentence(q) => Handler::WritingSentence(WritingSentenceHandler::new(q)),
        QuestionKind::Correction(q) => Handler::Correction(CorrectionHandler::new(q)),
        QuestionKind::Categorization(q) => Handler::Categorization(CategorizationHandler::new(q)),
        QuestionKind::Unknown(q) => match q.options.as_deref() {
            Some(options) if !options.is_empty() => {
                tracing::warn!(id = question.id(), tag = %q.tag, "unknown question type, using choice handling");
                Handler::FallbackChoice(ChoiceHandler::new(options.to_vec()))
            }
            _ => {
                tracing::warn!(id = question.id(), tag = %q.tag, "unknown question type, using free-text handling");
                Handler::FallbackText(TextHandler::new(None))
            }
        },
        QuestionKind::Invalid(q) => {
            tracing::warn!(id = question.id(), tag = %q.tag, reason = %q.reason, "unreadable question content");
            Handler::Malformed(Placeholder::invalid_content())
        }
    };
    tracing::debug!(id = question.id(), tag = question.tag(), "dispatched question");

    if let Some(answer) = &props.selected_answer
        && !handler.restore(answer)
    {
        tracing::warn!(
            id = question.id(),
            kind = answer.type_name(),
            "selected answer does not fit the question, ignoring it"
        );
    }
    handler
}

#[cfg(test)]
mod tests {
    use quizkit_types::{MatchingQuestion, UnknownQuestion, WritingShortQuestion};

    use super::*;

    #[test]
    fn unknown_tag_with_options_is_choice() {
        let question = Question::new(
            "q",
            "Pick one",
            UnknownQuestion {
                tag: "image_choice".into(),
                options: Some(vec!["A".into(), "B".into()]),
            },
        );
        let handler = dispatch(&question, &HostProps::new());
        assert!(matches!(handler, Handler::FallbackChoice(_)));
        assert_eq!(handler.submit_policy(), SubmitPolicy::Implicit);
    }

    #[test]
    fn unknown_tag_without_options_is_text() {
        for options in [None, Some(vec![])] {
            let question = Question::new(
                "q",
                "Say something",
                UnknownQuestion {
                    tag: "audio_response".into(),
                    options,
                },
            );
            let handler = dispatch(&question, &HostProps::new());
            assert!(matches!(handler, Handler::FallbackText(_)));
            assert!(handler.is_fallback());
        }
    }

    #[test]
    fn malformed_matching_gets_placeholder() {
        let question = Question::new("m", "Match", MatchingQuestion::default());
        let handler = dispatch(&question, &HostProps::new());
        match handler {
            Handler::Malformed(placeholder) => assert_eq!(
                placeholder.missing_fields(),
                ["leftColumn", "rightColumn", "correctPairs"]
            ),
            other => panic!("expected placeholder, got {other:?}"),
        }
    }

    #[test]
    fn unreadable_content_gets_placeholder() {
        let value = serde_json::json!({"type": "ordering", "id": "o", "items": 5});
        let question = Question::from_value_or_invalid(value, 0);
        let mut handler = dispatch(&question, &HostProps::new());

        let Handler::Malformed(placeholder) = &handler else {
            panic!("expected placeholder, got {handler:?}");
        };
        assert_eq!(placeholder.message(), crate::INVALID_CONTENT_MESSAGE);
        assert!(placeholder.missing_fields().is_empty());

        let mut received = Vec::new();
        let outcome = handler.handle(&Interaction::Submit, &HostProps::new(), &mut |v: AnswerValue| {
            received.push(v)
        });
        assert_eq!(outcome, Outcome::Inert);
        assert!(received.is_empty());
    }

    #[test]
    fn selected_answer_is_restored() {
        let question = Question::new("w", "Write", WritingShortQuestion::default());
        let props = HostProps::new().with_selected_answer("Hello");
        let handler = dispatch(&question, &props);
        assert!(handler.is_answered());
        match handler {
            Handler::WritingShort(text) => assert_eq!(text.text(), "Hello"),
            other => panic!("expected text handler, got {other:?}"),
        }
    }

    #[test]
    fn mismatched_selected_answer_is_ignored() {
        let question = Question::new("w", "Write", WritingShortQuestion::default());
        let props = HostProps::new().with_selected_answer(vec!["a".to_string()]);
        let handler = dispatch(&question, &props);
        assert!(!handler.is_answered());
    }
}
