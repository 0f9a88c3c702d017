use quizkit_types::{AnswerSink, AnswerValue, HostProps, SubmitPolicy};

use crate::capture::WriteOnce;
use crate::{Capture, Interaction, Outcome};

/// Count whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Where a draft stands against advisory word limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordLimit {
    Within,
    TooShort { min: usize },
    TooLong { max: usize },
}

impl WordLimit {
    pub(crate) fn check(words: usize, min: Option<usize>, max: Option<usize>) -> Self {
        match (min, max) {
            (Some(min), _) if words < min => Self::TooShort { min },
            (_, Some(max)) if words > max => Self::TooLong { max },
            _ => Self::Within,
        }
    }
}

/// A free-text buffer submitted on an explicit action.
///
/// Handles `writing_short` and unknown tags without options. The buffer is
/// submitted verbatim; trimming only applies to the readiness check.
#[derive(Debug, Clone, PartialEq)]
pub struct TextHandler {
    buffer: String,
    max_words: Option<usize>,
    gate: WriteOnce,
}

impl TextHandler {
    pub fn new(max_words: Option<usize>) -> Self {
        Self {
            buffer: String::new(),
            max_words,
            gate: WriteOnce::default(),
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn max_words(&self) -> Option<usize> {
        self.max_words
    }

    pub fn word_count(&self) -> usize {
        word_count(&self.buffer)
    }

    /// Advisory only; an over-long draft can still be submitted.
    pub fn word_limit(&self) -> WordLimit {
        WordLimit::check(self.word_count(), None, self.max_words)
    }
}

impl Capture for TextHandler {
    fn is_ready(&self) -> bool {
        !self.buffer.trim().is_empty()
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
            Interaction::Edit(text) => {
                if *text == self.buffer {
                    return Outcome::Inert;
                }
                self.buffer.clone_from(text);
                Outcome::Changed
            }
            Interaction::Submit if self.is_ready() => {
                self.gate.submit(AnswerValue::Text(self.buffer.clone()), sink)
            }
            Interaction::Submit => Outcome::NotReady,
            _ => Outcome::Unsupported,
        }
    }

    fn restore(&mut self, answer: &AnswerValue) -> bool {
        let Some(text) = answer.as_text() else {
            return false;
        };
        self.buffer = text.to_string();
        self.gate.close();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_is_not_ready() {
        let mut handler = TextHandler::new(None);
        let mut received = Vec::new();
        let mut sink = |v: AnswerValue| received.push(v);

        handler.handle(&Interaction::edit("   "), &HostProps::new(), &mut sink);
        assert_eq!(
            handler.handle(&Interaction::Submit, &HostProps::new(), &mut sink),
            Outcome::NotReady
        );
        assert!(received.is_empty());
    }

    #[test]
    fn submits_untrimmed_text() {
        let mut handler = TextHandler::new(None);
        let mut received = Vec::new();
        let mut sink = |v: AnswerValue| received.push(v);

        handler.handle(&Interaction::edit("  I like Rust "), &HostProps::new(), &mut sink);
        handler.handle(&Interaction::Submit, &HostProps::new(), &mut sink);
        assert_eq!(received, vec![AnswerValue::from("  I like Rust ")]);
    }

    #[test]
    fn word_limit_is_advisory() {
        let mut handler = TextHandler::new(Some(2));
        handler.handle(
            &Interaction::edit("one two three"),
            &HostProps::new(),
            &mut |_: AnswerValue| {},
        );
        assert_eq!(handler.word_limit(), WordLimit::TooLong { max: 2 });
        assert!(handler.is_ready());
    }
}
