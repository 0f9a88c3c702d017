use std::collections::BTreeMap;

use quizkit_types::{
    AnswerSink, AnswerValue, FillBlanksMultiQuestion, HostProps, SentenceTemplate, SubmitPolicy,
};

use crate::capture::WriteOnce;
use crate::{Capture, Interaction, Outcome};

/// How blanks are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlankMode {
    /// Words are tapped from a shared bank into the active blank. Each bank
    /// entry can fill one blank at a time.
    WordBank,

    /// Each blank is its own text field.
    FreeText,
}

/// Several named blanks in one sentence.
#[derive(Debug, Clone, PartialEq)]
pub struct FillBlanksMultiHandler {
    template: SentenceTemplate,
    blanks: Vec<String>,
    options: Vec<String>,
    mode: BlankMode,
    answers: BTreeMap<String, String>,
    active: Option<String>,
    gate: WriteOnce,
}

impl FillBlanksMultiHandler {
    pub fn new(question: &FillBlanksMultiQuestion) -> Self {
        let blanks: Vec<String> = question.blanks.iter().map(|b| b.id.clone()).collect();
        let (mode, options, active) = match &question.options {
            Some(options) => (BlankMode::WordBank, options.clone(), blanks.first().cloned()),
            None => (BlankMode::FreeText, Vec::new(), None),
        };
        Self {
            template: SentenceTemplate::named(&question.sentence),
            blanks,
            options,
            mode,
            answers: BTreeMap::new(),
            active,
            gate: WriteOnce::default(),
        }
    }

    pub fn mode(&self) -> BlankMode {
        self.mode
    }

    pub fn template(&self) -> &SentenceTemplate {
        &self.template
    }

    /// Blank ids in declaration order.
    pub fn blanks(&self) -> &[String] {
        &self.blanks
    }

    /// The word bank, empty in free-text mode.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn answer(&self, blank: &str) -> Option<&str> {
        self.answers.get(blank).map(String::as_str)
    }

    /// The blank the next bank word goes into.
    pub fn active_blank(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Whether `word` can still be tapped into the active blank.
    ///
    /// A word is used up once every bank copy of it sits in some other blank.
    pub fn bank_word_available(&self, word: &str) -> bool {
        let copies = self.options.iter().filter(|o| *o == word).count();
        let used = self
            .answers
            .iter()
            .filter(|(blank, answer)| {
                *answer == word && self.active.as_deref() != Some(blank.as_str())
            })
            .count();
        copies > used
    }

    /// The sentence with filled blanks substituted.
    pub fn rendered(&self) -> String {
        self.template.render(|id| self.answer(id))
    }

    fn has_blank(&self, id: &str) -> bool {
        self.blanks.iter().any(|b| b == id)
    }

    fn is_filled(&self, blank: &str) -> bool {
        self.answers.get(blank).is_some_and(|a| !a.trim().is_empty())
    }

    /// The next unfilled blank after `from`, wrapping around.
    fn next_unfilled(&self, from: &str) -> Option<String> {
        let start = self.blanks.iter().position(|b| b == from)?;
        let count = self.blanks.len();
        (1..count)
            .map(|offset| &self.blanks[(start + offset) % count])
            .find(|blank| !self.is_filled(blank))
            .cloned()
    }

    fn tap_bank_word(&mut self, word: &str) -> Outcome {
        let Some(active) = self.active.clone() else {
            return Outcome::Inert;
        };
        if !self.options.iter().any(|o| o == word)
            || self.answer(&active) == Some(word)
            || !self.bank_word_available(word)
        {
            return Outcome::Inert;
        }
        self.answers.insert(active.clone(), word.to_string());
        self.active = self.next_unfilled(&active);
        tracing::trace!(blank = %active, word, next = ?self.active, "bank word placed");
        Outcome::Changed
    }
}

impl Capture for FillBlanksMultiHandler {
    fn is_ready(&self) -> bool {
        self.blanks.iter().all(|blank| self.is_filled(blank))
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
        match (self.mode, interaction) {
            (BlankMode::WordBank, Interaction::FocusBlank(blank)) => {
                if !self.has_blank(blank) || self.active.as_ref() == Some(blank) {
                    return Outcome::Inert;
                }
                self.active = Some(blank.clone());
                Outcome::Changed
            }
            (BlankMode::WordBank, Interaction::TapBankWord(word)) => self.tap_bank_word(word),
            (BlankMode::FreeText, Interaction::EditBlank { blank, text }) => {
                if !self.has_blank(blank) || self.answers.get(blank) == Some(text) {
                    return Outcome::Inert;
                }
                self.answers.insert(blank.clone(), text.clone());
                Outcome::Changed
            }
            (mode, Interaction::ClearBlank(blank)) => {
                if self.answers.remove(blank).is_none() {
                    return Outcome::Inert;
                }
                if mode == BlankMode::WordBank {
                    self.active = Some(blank.clone());
                }
                Outcome::Changed
            }
            (_, Interaction::Submit) if self.is_ready() => {
                self.gate.submit(AnswerValue::Map(self.answers.clone()), sink)
            }
            (_, Interaction::Submit) => Outcome::NotReady,
            _ => Outcome::Unsupported,
        }
    }

    fn restore(&mut self, answer: &AnswerValue) -> bool {
        let Some(answers) = answer.as_map() else {
            return false;
        };
        self.answers = answers.clone();
        self.active = None;
        self.gate.close();
        true
    }
}
