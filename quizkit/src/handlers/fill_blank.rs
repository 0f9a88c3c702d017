use quizkit_types::{
    AnswerSink, AnswerValue, FillBlankQuestion, HostProps, SentenceTemplate, SubmitPolicy,
};

use crate::capture::WriteOnce;
use crate::handlers::ChoiceMark;
use crate::{Capture, Interaction, Outcome};

#[derive(Debug, Clone, PartialEq)]
enum Mode {
    WordBank {
        options: Vec<String>,
        selected: Option<String>,
    },
    FreeText {
        buffer: String,
    },
}

/// One blank in a sentence.
///
/// With a word bank, tapping a word fills the blank and submits it. Without
/// one, the blank is a text field submitted on an explicit action.
#[derive(Debug, Clone, PartialEq)]
pub struct FillBlankHandler {
    template: SentenceTemplate,
    mode: Mode,
    gate: WriteOnce,
}

impl FillBlankHandler {
    pub fn new(question: &FillBlankQuestion) -> Self {
        let mode = match &question.options {
            Some(options) => Mode::WordBank {
                options: options.clone(),
                selected: None,
            },
            None => Mode::FreeText {
                buffer: String::new(),
            },
        };
        Self {
            template: SentenceTemplate::single(&question.sentence),
            mode,
            gate: WriteOnce::default(),
        }
    }

    pub fn template(&self) -> &SentenceTemplate {
        &self.template
    }

    pub fn is_word_bank(&self) -> bool {
        matches!(self.mode, Mode::WordBank { .. })
    }

    /// The word bank, empty in free-text mode.
    pub fn options(&self) -> &[String] {
        match &self.mode {
            Mode::WordBank { options, .. } => options,
            Mode::FreeText { .. } => &[],
        }
    }

    /// What currently fills the blank.
    pub fn current(&self) -> Option<&str> {
        match &self.mode {
            Mode::WordBank { selected, .. } => selected.as_deref(),
            Mode::FreeText { buffer } => (!buffer.is_empty()).then_some(buffer.as_str()),
        }
    }

    /// The sentence with the blank filled in as far as possible.
    pub fn rendered(&self) -> String {
        let current = self.current();
        self.template.render(|_| current)
    }

    /// Presentation state of one word-bank option.
    pub fn mark(&self, option: &str, props: &HostProps) -> ChoiceMark {
        ChoiceMark::for_selection(
            self.is_word_bank() && self.current() == Some(option),
            props,
        )
    }
}

impl Capture for FillBlankHandler {
    fn is_ready(&self) -> bool {
        match &self.mode {
            Mode::WordBank { selected, .. } => selected.as_ref().is_some_and(|s| !s.is_empty()),
            Mode::FreeText { buffer } => !buffer.trim().is_empty(),
        }
    }

    fn submit_policy(&self) -> SubmitPolicy {
        match self.mode {
            Mode::WordBank { .. } => SubmitPolicy::Implicit,
            Mode::FreeText { .. } => SubmitPolicy::Explicit,
        }
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
        let ready = self.is_ready();
        match (&mut self.mode, interaction) {
            (
                Mode::WordBank { options, selected },
                Interaction::Choose(word) | Interaction::TapBankWord(word),
            ) => {
                if word.is_empty() || !options.contains(word) {
                    return Outcome::Inert;
                }
                *selected = Some(word.clone());
                self.gate.submit(AnswerValue::Text(word.clone()), sink)
            }
            (Mode::FreeText { buffer }, Interaction::Edit(text)) => {
                if *text == *buffer {
                    return Outcome::Inert;
                }
                buffer.clone_from(text);
                Outcome::Changed
            }
            (Mode::FreeText { buffer }, Interaction::Submit) if ready => {
                let value = AnswerValue::Text(buffer.clone());
                self.gate.submit(value, sink)
            }
            (_, Interaction::Submit) => Outcome::NotReady,
            _ => Outcome::Unsupported,
        }
    }

    fn restore(&mut self, answer: &AnswerValue) -> bool {
        let Some(text) = answer.as_text() else {
            return false;
        };
        match &mut self.mode {
            Mode::WordBank { selected, .. } => *selected = Some(text.to_string()),
            Mode::FreeText { buffer } => *buffer = text.to_string(),
        }
        self.gate.close();
        true
    }
}
