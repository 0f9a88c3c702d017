use crate::AnswerValue;

/// Flags the host passes down alongside a question.
///
/// Feedback flags only change presentation; they never alter captured data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostProps {
    /// While set, every handler treats input as a no-op.
    pub disabled: bool,

    /// Switch handlers into their feedback presentation.
    pub show_feedback: bool,

    /// The host's grading verdict. Display-only.
    pub is_correct: bool,

    /// A previously submitted answer to restore when the question is presented.
    pub selected_answer: Option<AnswerValue>,
}

impl HostProps {
    /// Create props with input enabled and no feedback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Block or unblock input.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Show feedback with the given verdict.
    pub fn with_feedback(mut self, is_correct: bool) -> Self {
        self.show_feedback = true;
        self.is_correct = is_correct;
        self
    }

    /// Hide feedback.
    pub fn without_feedback(mut self) -> Self {
        self.show_feedback = false;
        self.is_correct = false;
        self
    }

    /// Restore a previously submitted answer.
    pub fn with_selected_answer(mut self, answer: impl Into<AnswerValue>) -> Self {
        self.selected_answer = Some(answer.into());
        self
    }

    /// The verdict, if feedback is currently shown.
    pub fn verdict(&self) -> Option<bool> {
        self.show_feedback.then_some(self.is_correct)
    }
}

/// Receiver for submitted answers.
///
/// Handlers call `on_answer` at most once per question instance, synchronously
/// from the input event that completed the answer. Any `FnMut(AnswerValue)`
/// closure is a sink.
pub trait AnswerSink {
    /// Receive the answer for the current question.
    fn on_answer(&mut self, value: AnswerValue);
}

impl<F> AnswerSink for F
where
    F: FnMut(AnswerValue),
{
    fn on_answer(&mut self, value: AnswerValue) {
        self(value)
    }
}

/// How a handler decides when to submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmitPolicy {
    /// Submit as soon as the readiness predicate becomes true.
    ///
    /// Used where completion is unambiguous: a tapped choice, a word-bank
    /// pick for a single blank, a fully paired matching board.
    Implicit,

    /// Submit only on an explicit submit action once ready.
    Explicit,
}

impl SubmitPolicy {
    pub fn is_implicit(self) -> bool {
        self == Self::Implicit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_only_when_feedback_shown() {
        assert_eq!(HostProps::new().verdict(), None);
        assert_eq!(HostProps::new().with_feedback(true).verdict(), Some(true));
        assert_eq!(
            HostProps::new().with_feedback(false).without_feedback().verdict(),
            None
        );
    }

    #[test]
    fn closures_are_sinks() {
        let mut received = Vec::new();
        {
            let mut sink = |value: AnswerValue| received.push(value);
            sink.on_answer(AnswerValue::from("x"));
        }
        assert_eq!(received, vec![AnswerValue::from("x")]);
    }
}
