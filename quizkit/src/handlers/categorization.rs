use std::collections::BTreeMap;

use quizkit_types::{AnswerSink, AnswerValue, CategorizationQuestion, HostProps, SubmitPolicy};

use crate::capture::WriteOnce;
use crate::{Capture, Interaction, Outcome};

/// Sorting items into named buckets.
///
/// Tap an item to select it, then tap a category to move it there. An item
/// already in a bucket can be selected again and moved; it is never in two
/// buckets at once.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorizationHandler {
    question: CategorizationQuestion,
    buckets: Vec<(String, Vec<String>)>,
    selected_item: Option<String>,
    gate: WriteOnce,
}

impl CategorizationHandler {
    /// Categories sharing a name become one bucket.
    pub fn new(question: &CategorizationQuestion) -> Self {
        let mut buckets: Vec<(String, Vec<String>)> = Vec::new();
        for category in &question.categories {
            if !buckets.iter().any(|(name, _)| *name == category.name) {
                buckets.push((category.name.clone(), Vec::new()));
            }
        }
        Self {
            question: question.clone(),
            buckets,
            selected_item: None,
            gate: WriteOnce::default(),
        }
    }

    pub fn items(&self) -> &[String] {
        &self.question.items
    }

    /// Buckets in category order.
    pub fn buckets(&self) -> &[(String, Vec<String>)] {
        &self.buckets
    }

    pub fn bucket(&self, category: &str) -> Option<&[String]> {
        self.buckets
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, items)| items.as_slice())
    }

    pub fn selected_item(&self) -> Option<&str> {
        self.selected_item.as_deref()
    }

    /// Items not yet in any bucket, in `items` order.
    ///
    /// Duplicated items are counted, so two copies of `"Apple"` need two
    /// placements.
    pub fn uncategorized(&self) -> Vec<&str> {
        let mut placed: Vec<&str> = self
            .buckets
            .iter()
            .flat_map(|(_, items)| items.iter().map(String::as_str))
            .collect();
        let mut remaining = Vec::new();
        for item in &self.question.items {
            match placed.iter().position(|p| p == item) {
                Some(index) => {
                    placed.swap_remove(index);
                }
                None => remaining.push(item.as_str()),
            }
        }
        remaining
    }

    /// Whether `item` sits in the bucket that lists it, once feedback is shown.
    pub fn item_correct(&self, item: &str, props: &HostProps) -> Option<bool> {
        if !props.show_feedback {
            return None;
        }
        let bucket = self.bucket_of(item)?;
        Some(self.question.expected_category(item) == Some(bucket))
    }

    fn bucket_of(&self, item: &str) -> Option<&str> {
        self.buckets
            .iter()
            .find(|(_, items)| items.iter().any(|i| i == item))
            .map(|(name, _)| name.as_str())
    }

    fn categorize(&mut self, item: String, category: &str) -> Outcome {
        let Some(target) = self.buckets.iter().position(|(name, _)| name == category) else {
            return Outcome::Inert;
        };
        // An uncategorized copy goes in first; otherwise this is a move.
        if !self.uncategorized().contains(&item.as_str()) {
            for (_, items) in &mut self.buckets {
                if let Some(index) = items.iter().position(|i| *i == item) {
                    items.remove(index);
                    break;
                }
            }
        }
        tracing::trace!(%item, category, "item categorized");
        self.buckets[target].1.push(item);
        Outcome::Changed
    }
}

impl Capture for CategorizationHandler {
    fn is_ready(&self) -> bool {
        self.uncategorized().is_empty()
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
            Interaction::TapItem(item) => {
                if !self.question.items.contains(item) {
                    return Outcome::Inert;
                }
                if self.selected_item.as_ref() == Some(item) {
                    self.selected_item = None;
                } else {
                    self.selected_item = Some(item.clone());
                }
                Outcome::Changed
            }
            Interaction::TapCategory(category) => {
                if !self.buckets.iter().any(|(name, _)| name == category) {
                    return Outcome::Inert;
                }
                match self.selected_item.take() {
                    Some(item) => self.categorize(item, category),
                    None => Outcome::Inert,
                }
            }
            Interaction::Submit if self.is_ready() => {
                let buckets: BTreeMap<String, Vec<String>> = self.buckets.iter().cloned().collect();
                self.gate.submit(AnswerValue::Buckets(buckets), sink)
            }
            Interaction::Submit => Outcome::NotReady,
            _ => Outcome::Unsupported,
        }
    }

    fn restore(&mut self, answer: &AnswerValue) -> bool {
        let Some(mut restored) = answer.as_buckets() else {
            return false;
        };
        for (name, items) in &mut self.buckets {
            *items = restored.remove(name.as_str()).unwrap_or_default();
        }
        self.selected_item = None;
        self.gate.close();
        true
    }
}
