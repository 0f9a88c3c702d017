use quizkit_types::{AnswerSink, AnswerValue, HostProps, SubmitPolicy, WritingSentenceQuestion};

use crate::capture::WriteOnce;
use crate::handlers::{WordLimit, word_count};
use crate::{Capture, Interaction, Outcome};

/// Free-text sentence writing with advisory constraints.
///
/// Word limits and key elements are reported for presentation only; readiness
/// is a non-empty trimmed draft, like every text variant.
#[derive(Debug, Clone, PartialEq)]
pub struct WritingSentenceHandler {
    question: WritingSentenceQuestion,
    buffer: String,
    gate: WriteOnce,
}

impl WritingSentenceHandler {
    pub fn new(question: &WritingSentenceQuestion) -> Self {
        Self {
            question: question.clone(),
            buffer: String::new(),
            gate: WriteOnce::default(),
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn key_elements(&self) -> &[String] {
        &self.question.key_elements
    }

    pub fn word_count(&self) -> usize {
        word_count(&self.buffer)
    }

    pub fn word_limit(&self) -> WordLimit {
        WordLimit::check(
            self.word_count(),
            self.question.min_words,
            self.question.max_words,
        )
    }

    /// Key elements the draft mentions, compared case-insensitively.
    pub fn key_elements_used(&self) -> Vec<&str> {
        let draft = self.buffer.to_lowercase();
        self.question
            .key_elements
            .iter()
            .filter(|element| draft.contains(&element.to_lowercase()))
            .map(String::as_str)
            .collect()
    }

    /// The model answer, revealed only while feedback is shown.
    pub fn model_answer(&self, props: &HostProps) -> Option<&str> {
        if props.show_feedback {
            self.question.model_answer.as_deref()
        } else {
            None
        }
    }
}

impl Capture for WritingSentenceHandler {
    fn is_ready(&self) -> bool {
        !self.buffer.trim().is_empty()
    }

    fn submit_policy(&self) -> SubmitPolicy {
        SubmitPolicy::Explicit
    }

    fn is_answered(&self) -> bool {
        self.gate.is_answered()
    }

    fn handle(
        &mut self,
        interaction: &Interaction,
        props: &HostProps,
        sink: &mut dyn AnswerSink,
    ) -> Outcome {
        if !self.gate.accepts_input(props) {
            return Outcome::Inert;
        }
        match interaction {
            Interaction::Edit(text) => {
                if *text == self.buffer {
                    return Outcome::Inert;
                }
                self.buffer.clone_from(text);
                Outcome::Changed
            }
            Interaction::Submit if self.is_ready() => {
                self.gate.submit(AnswerValue::Text(self.buffer.clone()), sink)
            }
            Interaction::Submit => Outcome::NotReady,
            _ => Outcome::Unsupported,
        }
    }

    fn restore(&mut self, answer: &AnswerValue) -> bool {
        let Some(text) = answer.as_text() else {
            return false;
        };
        self.buffer = text.to_string();
        self.gate.close();
        true
    }
}
