use quizkit_types::{AnswerSink, AnswerValue, HostProps, SubmitPolicy};

use crate::capture::WriteOnce;
use crate::{Capture, Interaction, Outcome};

/// How an option should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChoiceMark {
    /// Not selected.
    Idle,

    /// Selected, no feedback shown.
    Selected,

    /// Selected and judged correct by the host.
    Correct,

    /// Selected and judged incorrect by the host.
    Incorrect,
}

impl ChoiceMark {
    pub(crate) fn for_selection(selected: bool, props: &HostProps) -> Self {
        match (selected, props.verdict()) {
            (false, _) => Self::Idle,
            (true, None) => Self::Selected,
            (true, Some(true)) => Self::Correct,
            (true, Some(false)) => Self::Incorrect,
        }
    }
}

/// Single selection from a list of options, submitted on tap.
///
/// Handles `multiple_choice` and unknown tags that carry options.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceHandler {
    options: Vec<String>,
    selected: Option<String>,
    gate: WriteOnce,
}

impl ChoiceHandler {
    pub fn new(options: Vec<String>) -> Self {
        Self {
            options,
            selected: None,
            gate: WriteOnce::default(),
        }
    }

    /// The options, in display order.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// The selected option, if any.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Presentation state of one option.
    pub fn mark(&self, option: &str, props: &HostProps) -> ChoiceMark {
        ChoiceMark::for_selection(self.selected() == Some(option), props)
    }
}

impl Capture for ChoiceHandler {
    fn is_ready(&self) -> bool {
        self.selected.as_ref().is_some_and(|s| !s.is_empty())
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
                if option.is_empty() || !self.options.contains(option) {
                    return Outcome::Inert;
                }
                self.selected = Some(option.clone());
                self.gate.submit(AnswerValue::Text(option.clone()), sink)
            }
            Interaction::Submit => Outcome::NotReady,
            _ => Outcome::Unsupported,
        }
    }

    fn restore(&mut self, answer: &AnswerValue) -> bool {
        let Some(text) = answer.as_text() else {
            return false;
        };
        self.selected = Some(text.to_string());
        self.gate.close();
        true
    }
}
