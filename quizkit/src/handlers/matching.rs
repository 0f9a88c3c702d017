use std::collections::BTreeMap;

use quizkit_types::{
    AnswerSink, AnswerValue, HostProps, MatchItem, MatchPair, MatchingQuestion, SubmitPolicy,
};

use crate::capture::WriteOnce;
use crate::{Capture, Interaction, Outcome};

/// How a column item should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PairMark {
    /// Free to tap.
    Available,

    /// The pending left-hand selection.
    Pending,

    /// Part of a committed pair, no feedback shown.
    Paired,

    /// Part of a pair found in `correctPairs`.
    Correct,

    /// Part of a pair not found in `correctPairs`.
    Incorrect,
}

/// Pairing of left-column items with right-column items.
///
/// Tapping a left item toggles it as pending; tapping a right item commits the
/// pair. Both sides are single-use. The pair map is submitted as soon as every
/// left item has a partner.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchingHandler {
    left: Vec<MatchItem>,
    right: Vec<MatchItem>,
    correct_pairs: Vec<MatchPair>,
    selected_left: Option<String>,
    pairs: BTreeMap<String, String>,
    gate: WriteOnce,
}

impl MatchingHandler {
    /// Build a handler, or `None` if any column or the answer key is missing.
    pub fn from_question(question: &MatchingQuestion) -> Option<Self> {
        Some(Self {
            left: question.left_column.clone()?,
            right: question.right_column.clone()?,
            correct_pairs: question.correct_pairs.clone()?,
            selected_left: None,
            pairs: BTreeMap::new(),
            gate: WriteOnce::default(),
        })
    }

    pub fn left_column(&self) -> &[MatchItem] {
        &self.left
    }

    pub fn right_column(&self) -> &[MatchItem] {
        &self.right
    }

    /// The pending left-hand selection.
    pub fn selected_left(&self) -> Option<&str> {
        self.selected_left.as_deref()
    }

    /// Committed pairs, keyed by left id.
    pub fn pairs(&self) -> &BTreeMap<String, String> {
        &self.pairs
    }

    /// Whether a right item is still free to pair.
    pub fn right_available(&self, right_id: &str) -> bool {
        !self.pairs.values().any(|r| r == right_id)
    }

    /// Whether a committed pair appears in the answer key.
    pub fn pair_correct(&self, left_id: &str) -> Option<bool> {
        let right_id = self.pairs.get(left_id)?;
        Some(
            self.correct_pairs
                .iter()
                .any(|p| p.left == left_id && p.right == *right_id),
        )
    }

    /// Presentation state of a left-column item.
    pub fn left_mark(&self, left_id: &str, props: &HostProps) -> PairMark {
        if self.selected_left.as_deref() == Some(left_id) {
            return PairMark::Pending;
        }
        self.paired_mark(self.pair_correct(left_id), props)
    }

    /// Presentation state of a right-column item.
    pub fn right_mark(&self, right_id: &str, props: &HostProps) -> PairMark {
        let correct = self
            .pairs
            .iter()
            .find(|(_, r)| *r == right_id)
            .and_then(|(left_id, _)| self.pair_correct(left_id));
        self.paired_mark(correct, props)
    }

    fn paired_mark(&self, correct: Option<bool>, props: &HostProps) -> PairMark {
        match (correct, props.show_feedback) {
            (None, _) => PairMark::Available,
            (Some(_), false) => PairMark::Paired,
            (Some(true), true) => PairMark::Correct,
            (Some(false), true) => PairMark::Incorrect,
        }
    }

    fn has_left(&self, id: &str) -> bool {
        self.left.iter().any(|item| item.id == id)
    }

    fn has_right(&self, id: &str) -> bool {
        self.right.iter().any(|item| item.id == id)
    }

    fn submit(&mut self, sink: &mut dyn AnswerSink) -> Outcome {
        self.gate.submit(AnswerValue::Map(self.pairs.clone()), sink)
    }
}

impl Capture for MatchingHandler {
    fn is_ready(&self) -> bool {
        self.pairs.len() == self.left.len()
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
            Interaction::TapLeft(id) => {
                if !self.has_left(id) || self.pairs.contains_key(id) {
                    return Outcome::Inert;
                }
                if self.selected_left.as_ref() == Some(id) {
                    self.selected_left = None;
                } else {
                    self.selected_left = Some(id.clone());
                }
                Outcome::Changed
            }
            Interaction::TapRight(id) => {
                if !self.has_right(id) || !self.right_available(id) {
                    return Outcome::Inert;
                }
                let Some(left) = self.selected_left.take() else {
                    return Outcome::Inert;
                };
                tracing::trace!(%left, right = %id, "pair committed");
                self.pairs.insert(left, id.clone());
                if self.is_ready() {
                    self.submit(sink)
                } else {
                    Outcome::Changed
                }
            }
            // Only reachable with an empty left column.
            Interaction::Submit if self.is_ready() => self.submit(sink),
            Interaction::Submit => Outcome::NotReady,
            _ => Outcome::Unsupported,
        }
    }

    fn restore(&mut self, answer: &AnswerValue) -> bool {
        let Some(pairs) = answer.as_map() else {
            return false;
        };
        self.pairs = pairs.clone();
        self.selected_left = None;
        self.gate.close();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> MatchingQuestion {
        MatchingQuestion::new(
            vec![MatchItem::new("1", "Dog"), MatchItem::new("2", "Cat")],
            vec![MatchItem::new("A", "Bark"), MatchItem::new("B", "Meow")],
            vec![MatchPair::new("1", "A"), MatchPair::new("2", "B")],
        )
    }

    fn tap_left(id: &str) -> Interaction {
        Interaction::TapLeft(id.to_string())
    }

    fn tap_right(id: &str) -> Interaction {
        Interaction::TapRight(id.to_string())
    }

    #[test]
    fn missing_columns_are_rejected() {
        let mut malformed = question();
        malformed.correct_pairs = None;
        assert!(MatchingHandler::from_question(&malformed).is_none());
    }

    #[test]
    fn left_tap_toggles() {
        let mut handler = MatchingHandler::from_question(&question()).unwrap();
        let mut sink = |_: AnswerValue| {};
        handler.handle(&tap_left("1"), &HostProps::new(), &mut sink);
        assert_eq!(handler.selected_left(), Some("1"));
        handler.handle(&tap_left("1"), &HostProps::new(), &mut sink);
        assert_eq!(handler.selected_left(), None);
    }

    #[test]
    fn right_items_are_single_use() {
        let mut handler = MatchingHandler::from_question(&question()).unwrap();
        let mut received = Vec::new();
        let mut sink = |v: AnswerValue| received.push(v);

        handler.handle(&tap_left("1"), &HostProps::new(), &mut sink);
        handler.handle(&tap_right("A"), &HostProps::new(), &mut sink);
        handler.handle(&tap_left("2"), &HostProps::new(), &mut sink);
        assert_eq!(
            handler.handle(&tap_right("A"), &HostProps::new(), &mut sink),
            Outcome::Inert
        );
        assert_eq!(handler.selected_left(), Some("2"));
        assert!(received.is_empty());
    }

    #[test]
    fn paired_left_item_is_inert() {
        let mut handler = MatchingHandler::from_question(&question()).unwrap();
        let mut sink = |_: AnswerValue| {};
        handler.handle(&tap_left("1"), &HostProps::new(), &mut sink);
        handler.handle(&tap_right("B"), &HostProps::new(), &mut sink);
        assert_eq!(
            handler.handle(&tap_left("1"), &HostProps::new(), &mut sink),
            Outcome::Inert
        );
    }

    #[test]
    fn per_pair_feedback() {
        let mut handler = MatchingHandler::from_question(&question()).unwrap();
        let mut sink = |_: AnswerValue| {};
        for interaction in [tap_left("1"), tap_right("B"), tap_left("2"), tap_right("A")] {
            handler.handle(&interaction, &HostProps::new(), &mut sink);
        }
        assert!(handler.is_answered());
        assert_eq!(handler.pair_correct("1"), Some(false));

        let feedback = HostProps::new().with_feedback(false);
        assert_eq!(handler.left_mark("1", &feedback), PairMark::Incorrect);
        assert_eq!(handler.right_mark("B", &feedback), PairMark::Incorrect);
        assert_eq!(handler.left_mark("2", &HostProps::new()), PairMark::Paired);
    }

    #[test]
    fn empty_board_submits_on_request() {
        let mut handler =
            MatchingHandler::from_question(&MatchingQuestion::new(vec![], vec![], vec![]))
                .unwrap();
        let mut received = Vec::new();
        let outcome = handler.handle(
            &Interaction::Submit,
            &HostProps::new(),
            &mut |v: AnswerValue| received.push(v),
        );
        assert_eq!(outcome, Outcome::Submitted);
        assert_eq!(received, vec![AnswerValue::Map(BTreeMap::new())]);
    }
}
