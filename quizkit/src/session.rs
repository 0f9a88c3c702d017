use quizkit_types::{AnswerSink, HostProps, Question, SubmitPolicy};

use crate::{Capture, Handler, Interaction, Outcome, dispatch};

/// One presented question: the content, the host's props and the capture state.
///
/// The capture state lives exactly as long as the session. Presenting another
/// question replaces it with a fresh handler, so partial input never carries
/// over.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionSession {
    question: Question,
    props: HostProps,
    handler: Handler,
}

impl QuestionSession {
    /// Present a question. A `selected_answer` in `props` is restored.
    pub fn new(question: Question, props: HostProps) -> Self {
        let handler = dispatch(&question, &props);
        Self {
            question,
            props,
            handler,
        }
    }

    /// Replace the question, discarding all capture state.
    pub fn present(&mut self, question: Question) {
        tracing::debug!(
            from = self.question.id(),
            to = question.id(),
            "replacing question"
        );
        self.handler = dispatch(&question, &self.props);
        self.question = question;
    }

    /// Replace the host props.
    ///
    /// Feedback and `disabled` take effect immediately. A `selected_answer` is
    /// only read when a question is presented.
    pub fn update_props(&mut self, props: HostProps) {
        self.props = props;
    }

    /// Edit the host props in place.
    pub fn set_props(&mut self, update: impl FnOnce(&mut HostProps)) {
        update(&mut self.props);
    }

    /// Forward one input event to the handler.
    pub fn interact(&mut self, interaction: Interaction, sink: &mut dyn AnswerSink) -> Outcome {
        let outcome = self.handler.handle(&interaction, &self.props, sink);
        tracing::trace!(id = self.question.id(), ?interaction, ?outcome, "interaction");
        if outcome.is_submitted() {
            tracing::info!(id = self.question.id(), tag = self.question.tag(), "question answered");
        }
        outcome
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn props(&self) -> &HostProps {
        &self.props
    }

    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    pub fn is_ready(&self) -> bool {
        self.handler.is_ready()
    }

    pub fn is_answered(&self) -> bool {
        self.handler.is_answered()
    }

    pub fn submit_policy(&self) -> SubmitPolicy {
        self.handler.submit_policy()
    }

    /// Whether an explicit submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.props.disabled && !self.is_answered() && self.is_ready()
    }
}
