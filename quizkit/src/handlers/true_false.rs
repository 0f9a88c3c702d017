use quizkit_types::{AnswerSink, AnswerValue, HostProps, SubmitPolicy, TrueFalseQuestion};

use crate::capture::WriteOnce;
use crate::handlers::ChoiceMark;
use crate::{Capture, Interaction, Outcome};

/// A fixed two-option judgement, submitted on tap as `"true"` or `"false"`.
#[derive(Debug, Clone, PartialEq)]
pub struct TrueFalseHandler {
    correct_value: bool,
    selected: Option<bool>,
    gate: WriteOnce,
}

impl TrueFalseHandler {
    pub fn new(question: &TrueFalseQuestion) -> Self {
        Self {
            correct_value: question.correct_value,
            selected: None,
            gate: WriteOnce::default(),
        }
    }

    /// The judgement made so far.
    pub fn selected(&self) -> Option<bool> {
        self.selected
    }

    /// Presentation state of the `true` or `false` button.
    pub fn mark(&self, value: bool, props: &HostProps) -> ChoiceMark {
        ChoiceMark::for_selection(self.selected == Some(value), props)
    }

    /// The correct judgement, revealed only while feedback is shown.
    pub fn revealed_answer(&self, props: &HostProps) -> Option<bool> {
        props.show_feedback.then_some(self.correct_value)
    }
}

impl Capture for TrueFalseHandler {
    fn is_ready(&self) -> bool {
        self.selected.is_some()
    }

    fn submit_policy(&self) -> SubmitPolicy {
        SubmitPolicy::Implicit
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
            Interaction::Choose(option) => {
                let value = match option.as_str() {
                    "true" => true,
                    "false" => false,
                    _ => return Outcome::Inert,
                };
                self.selected = Some(value);
                self.gate.submit(AnswerValue::from_bool(value), sink)
            }
            Interaction::Submit => Outcome::NotReady,
            _ => Outcome::Unsupported,
        }
    }

    fn restore(&mut self, answer: &AnswerValue) -> bool {
        let Some(value) = answer.as_bool() else {
            return false;
        };
        self.selected = Some(value);
        self.gate.close();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn judgement_is_encoded_as_string() {
        let mut handler = TrueFalseHandler::new(&TrueFalseQuestion {
            correct_value: true,
        });
        let mut received = Vec::new();
        handler.handle(
            &Interaction::judge(false),
            &HostProps::new(),
            &mut |v: AnswerValue| received.push(v),
        );
        assert_eq!(received, vec![AnswerValue::Text("false".to_string())]);
    }

    #[test]
    fn correct_value_hidden_until_feedback() {
        let handler = TrueFalseHandler::new(&TrueFalseQuestion {
            correct_value: false,
        });
        assert_eq!(handler.revealed_answer(&HostProps::new()), None);
        assert_eq!(
            handler.revealed_answer(&HostProps::new().with_feedback(true)),
            Some(false)
        );
    }

    #[test]
    fn restore_rejects_non_boolean_text() {
        let mut handler = TrueFalseHandler::new(&TrueFalseQuestion::default());
        assert!(!handler.restore(&AnswerValue::from("yes")));
        assert!(!handler.is_answered());
        assert!(handler.restore(&AnswerValue::from("true")));
        assert_eq!(handler.selected(), Some(true));
    }
}
