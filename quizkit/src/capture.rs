use quizkit_types::{AnswerSink, AnswerValue, HostProps, SubmitPolicy};

use crate::{Interaction, Outcome};

/// The contract every variant handler implements.
///
/// A handler owns the capture state of one question instance. It is created
/// when the question is presented and dropped with it.
pub trait Capture {
    /// Whether the variant-specific readiness predicate holds.
    fn is_ready(&self) -> bool;

    /// Whether the handler submits on readiness or waits for [`Interaction::Submit`].
    fn submit_policy(&self) -> SubmitPolicy;

    /// Whether an answer has been submitted (or restored).
    ///
    /// Once true, every further interaction is [`Outcome::Inert`].
    fn is_answered(&self) -> bool;

    /// Process one input event.
    ///
    /// Must be a no-op returning [`Outcome::Inert`] while `props.disabled` is
    /// set, and must call `sink` at most once over the handler's lifetime.
    fn handle(
        &mut self,
        interaction: &Interaction,
        props: &HostProps,
        sink: &mut dyn AnswerSink,
    ) -> Outcome;

    /// Seed visible state from a previously submitted answer.
    ///
    /// A restored handler counts as answered. Returns `false` (leaving the
    /// handler untouched) if the answer's shape does not fit the variant.
    fn restore(&mut self, answer: &AnswerValue) -> bool;
}

/// The write-once gate shared by all handlers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct WriteOnce {
    answered: bool,
}

impl WriteOnce {
    /// Whether input may change state right now.
    pub(crate) fn accepts_input(self, props: &HostProps) -> bool {
        !props.disabled && !self.answered
    }

    pub(crate) fn is_answered(self) -> bool {
        self.answered
    }

    /// Close the gate without emitting (used when restoring).
    pub(crate) fn close(&mut self) {
        self.answered = true;
    }

    /// Emit the answer and close the gate.
    pub(crate) fn submit(&mut self, value: AnswerValue, sink: &mut dyn AnswerSink) -> Outcome {
        if self.answered {
            return Outcome::Inert;
        }
        self.answered = true;
        tracing::trace!(kind = value.type_name(), "emitting answer");
        sink.on_answer(value);
        Outcome::Submitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_emits_once() {
        let mut gate = WriteOnce::default();
        let mut received = Vec::new();
        let mut sink = |value: AnswerValue| received.push(value);

        assert_eq!(gate.submit("a".into(), &mut sink), Outcome::Submitted);
        assert_eq!(gate.submit("b".into(), &mut sink), Outcome::Inert);
        assert_eq!(received, vec![AnswerValue::from("a")]);
    }

    #[test]
    fn disabled_props_close_input() {
        let gate = WriteOnce::default();
        assert!(gate.accepts_input(&HostProps::new()));
        assert!(!gate.accepts_input(&HostProps::new().disabled(true)));
    }
}
