use quizkit_types::{
    AnswerSink, AnswerValue, CorrectionEdit, CorrectionQuestion, HostProps, SubmitPolicy,
};

use crate::capture::WriteOnce;
use crate::{Capture, Interaction, Outcome};

/// An editor seeded with the erroneous text.
///
/// An unedited draft is never ready, so the learner cannot submit the
/// mistakes back unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectionHandler {
    question: CorrectionQuestion,
    buffer: String,
    gate: WriteOnce,
}

impl CorrectionHandler {
    pub fn new(question: &CorrectionQuestion) -> Self {
        Self {
            question: question.clone(),
            buffer: question.error_text.clone(),
            gate: WriteOnce::default(),
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn error_text(&self) -> &str {
        &self.question.error_text
    }

    pub fn is_edited(&self) -> bool {
        self.buffer != self.question.error_text
    }

    /// The corrected text, revealed only while feedback is shown.
    pub fn corrected_text(&self, props: &HostProps) -> Option<&str> {
        props
            .show_feedback
            .then_some(self.question.corrected_text.as_str())
    }

    /// The individual fixes, revealed only while feedback is shown.
    pub fn errors(&self, props: &HostProps) -> &[CorrectionEdit] {
        if props.show_feedback {
            &self.question.errors
        } else {
            &[]
        }
    }
}

impl Capture for CorrectionHandler {
    fn is_ready(&self) -> bool {
        !self.buffer.trim().is_empty() && self.is_edited()
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
