use quizkit_types::{AnswerSink, AnswerValue, HostProps, OrderingQuestion, SubmitPolicy};

use crate::capture::WriteOnce;
use crate::{Capture, Interaction, Outcome};

/// Reordering by adjacent swaps.
///
/// The working order starts as the given `items` and only changes by swapping
/// neighbours, so it is always a permutation of them.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderingHandler {
    working: Vec<String>,
    correct_order: Vec<String>,
    gate: WriteOnce,
}

impl OrderingHandler {
    pub fn new(question: &OrderingQuestion) -> Self {
        Self {
            working: question.items.clone(),
            correct_order: question.correct_order.clone(),
            gate: WriteOnce::default(),
        }
    }

    /// The current order.
    pub fn working_order(&self) -> &[String] {
        &self.working
    }

    pub fn can_move_up(&self, index: usize) -> bool {
        index > 0 && index < self.working.len()
    }

    pub fn can_move_down(&self, index: usize) -> bool {
        index < self.working.len().saturating_sub(1)
    }

    /// Whether the item at `index` sits where `correctOrder` expects it.
    ///
    /// Only known while feedback is shown.
    pub fn position_correct(&self, index: usize, props: &HostProps) -> Option<bool> {
        if !props.show_feedback {
            return None;
        }
        let item = self.working.get(index)?;
        Some(self.correct_order.get(index) == Some(item))
    }

    fn swap(&mut self, a: usize, b: usize) -> Outcome {
        self.working.swap(a, b);
        Outcome::Changed
    }
}

impl Capture for OrderingHandler {
    fn is_ready(&self) -> bool {
        true
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
        match *interaction {
            Interaction::MoveUp(index) if self.can_move_up(index) => self.swap(index - 1, index),
            Interaction::MoveDown(index) if self.can_move_down(index) => {
                self.swap(index, index + 1)
            }
            Interaction::MoveUp(_) | Interaction::MoveDown(_) => Outcome::Inert,
            Interaction::Submit => self
                .gate
                .submit(AnswerValue::Sequence(self.working.clone()), sink),
            _ => Outcome::Unsupported,
        }
    }

    fn restore(&mut self, answer: &AnswerValue) -> bool {
        let Some(order) = answer.as_sequence() else {
            return false;
        };
        let mut submitted = order.to_vec();
        let mut items = self.working.clone();
        submitted.sort();
        items.sort();
        if submitted != items {
            return false;
        }
        self.working = order.to_vec();
        self.gate.close();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler() -> OrderingHandler {
        OrderingHandler::new(&OrderingQuestion::new(["b", "a", "c"], ["a", "b", "c"]))
    }

    #[test]
    fn move_up_swaps_neighbours() {
        let mut ordering = handler();
        let mut received = Vec::new();
        let mut sink = |v: AnswerValue| received.push(v);

        assert_eq!(
            ordering.handle(&Interaction::MoveUp(1), &HostProps::new(), &mut sink),
            Outcome::Changed
        );
        assert_eq!(ordering.working_order(), ["a", "b", "c"]);
        assert!(received.is_empty());
    }

    #[test]
    fn edge_moves_are_inert() {
        let mut ordering = handler();
        let mut sink = |_: AnswerValue| {};
        for interaction in [
            Interaction::MoveUp(0),
            Interaction::MoveDown(2),
            Interaction::MoveUp(7),
            Interaction::MoveDown(usize::MAX),
        ] {
            assert_eq!(
                ordering.handle(&interaction, &HostProps::new(), &mut sink),
                Outcome::Inert
            );
        }
        assert_eq!(ordering.working_order(), ["b", "a", "c"]);
    }

    #[test]
    fn positions_checked_under_feedback() {
        let ordering = handler();
        assert_eq!(ordering.position_correct(2, &HostProps::new()), None);
        let feedback = HostProps::new().with_feedback(false);
        assert_eq!(ordering.position_correct(0, &feedback), Some(false));
        assert_eq!(ordering.position_correct(2, &feedback), Some(true));
    }

    #[test]
    fn restore_requires_permutation() {
        let mut ordering = handler();
        assert!(!ordering.restore(&AnswerValue::Sequence(vec!["a".into(), "a".into(), "c".into()])));
        assert!(!ordering.is_answered());
        assert!(ordering.restore(&AnswerValue::Sequence(vec!["c".into(), "a".into(), "b".into()])));
        assert_eq!(ordering.working_order(), ["c", "a", "b"]);
    }
}
