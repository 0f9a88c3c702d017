//! Test host for driving questions without a UI.
//!
//! `TestHost` replays scripted interactions against a question and records
//! what the engine did with them. This is useful for testing question content
//! and hosts that build on the engine.
//!
//! # Example
//!
//! ```rust
//! use quizkit::{AnswerValue, Interaction, OrderingQuestion, Question, TestHost};
//!
//! let question = Question::new(
//!     "letters",
//!     "Put the letters in order",
//!     OrderingQuestion::new(["b", "a", "c"], ["a", "b", "c"]),
//! );
//!
//! let answer = TestHost::new()
//!     .with(Interaction::MoveUp(1))
//!     .with(Interaction::Submit)
//!     .run_to_answer(&question)
//!     .unwrap();
//!
//! assert_eq!(answer, AnswerValue::Sequence(vec!["a".into(), "b".into(), "c".into()]));
//! ```

use std::collections::HashMap;

use quizkit_types::{AnswerValue, HostProps, Question, QuestionSet};

use crate::{Interaction, Outcome, QuestionSession};

/// A host that plays back pre-configured interactions.
#[derive(Debug, Clone, Default)]
pub struct TestHost {
    props: HostProps,
    script: Vec<Interaction>,
    scripts: HashMap<String, Vec<Interaction>>,
}

/// Everything observed while replaying a script.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    /// Every value handed to the sink, in order.
    pub answers: Vec<AnswerValue>,

    /// The outcome of each scripted interaction.
    pub outcomes: Vec<Outcome>,
}

impl Transcript {
    /// The answer, if exactly one was submitted.
    pub fn answer(&self) -> Option<&AnswerValue> {
        match self.answers.as_slice() {
            [answer] => Some(answer),
            _ => None,
        }
    }
}

/// Error type for TestHost.
#[derive(Debug, thiserror::Error)]
pub enum TestHostError {
    #[error("No answer submitted for question: {id}")]
    NoAnswer { id: String },

    #[error("{count} answers submitted for question '{id}'")]
    MultipleAnswers { id: String, count: usize },
}

impl TestHost {
    /// Create a host with default props and an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use these props for every question.
    pub fn with_props(mut self, props: HostProps) -> Self {
        self.props = props;
        self
    }

    /// Append one interaction to the default script.
    pub fn with(mut self, interaction: Interaction) -> Self {
        self.script.push(interaction);
        self
    }

    /// Append several interactions to the default script.
    pub fn with_all(mut self, interactions: impl IntoIterator<Item = Interaction>) -> Self {
        self.script.extend(interactions);
        self
    }

    /// Set the script for the question with this id, used by [`TestHost::run_set`].
    pub fn with_script(
        mut self,
        id: impl Into<String>,
        interactions: impl IntoIterator<Item = Interaction>,
    ) -> Self {
        self.scripts
            .insert(id.into(), interactions.into_iter().collect());
        self
    }

    /// Replay the script for `question` and record what happened.
    ///
    /// Uses the question's own script if one was set, the default script
    /// otherwise.
    pub fn run(&self, question: &Question) -> Transcript {
        let script = self.scripts.get(question.id()).unwrap_or(&self.script);
        let mut session = QuestionSession::new(question.clone(), self.props.clone());
        let mut transcript = Transcript::default();
        for interaction in script {
            let outcome = session.interact(interaction.clone(), &mut |value: AnswerValue| {
                transcript.answers.push(value)
            });
            transcript.outcomes.push(outcome);
        }
        transcript
    }

    /// Replay the script and return the single submitted answer.
    pub fn run_to_answer(&self, question: &Question) -> Result<AnswerValue, TestHostError> {
        let mut transcript = self.run(question);
        match transcript.answers.len() {
            0 => Err(TestHostError::NoAnswer {
                id: question.id().to_string(),
            }),
            1 => Ok(transcript.answers.remove(0)),
            count => Err(TestHostError::MultipleAnswers {
                id: question.id().to_string(),
                count,
            }),
        }
    }

    /// Run every question in a set, collecting answers keyed by question id.
    ///
    /// Malformed questions never answer and are skipped.
    pub fn run_set(&self, set: &QuestionSet) -> Result<Vec<(String, AnswerValue)>, TestHostError> {
        let mut answers = Vec::new();
        for question in set.questions() {
            if crate::dispatch(question, &HostProps::new()).is_malformed() {
                continue;
            }
            let answer = self.run_to_answer(question)?;
            answers.push((question.id().to_string(), answer));
        }
        Ok(answers)
    }
}
