//! # quizkit
//!
//! A question variant engine. Hosts hand it a [`Question`], forward learner
//! input as [`Interaction`]s, and receive exactly one [`AnswerValue`] back
//! through an [`AnswerSink`] once the question's readiness predicate holds.
//!
//! The engine does not grade, persist, or decide flow. Feedback flows back in
//! as [`HostProps`] flags, which only change presentation.
//!
//! ## Usage
//!
//! ```rust
//! use quizkit::{
//!     AnswerValue, HostProps, Interaction, MatchItem, MatchPair, MatchingQuestion, Question,
//!     QuestionSession,
//! };
//!
//! let question = Question::new(
//!     "animals",
//!     "Match each animal to its sound",
//!     MatchingQuestion::new(
//!         vec![MatchItem::new("1", "Dog"), MatchItem::new("2", "Cat")],
//!         vec![MatchItem::new("A", "Bark"), MatchItem::new("B", "Meow")],
//!         vec![MatchPair::new("1", "A"), MatchPair::new("2", "B")],
//!     ),
//! );
//!
//! let mut answers = Vec::new();
//! let mut session = QuestionSession::new(question, HostProps::new());
//! for interaction in [
//!     Interaction::TapLeft("1".into()),
//!     Interaction::TapRight("A".into()),
//!     Interaction::TapLeft("2".into()),
//!     Interaction::TapRight("B".into()),
//! ] {
//!     session.interact(interaction, &mut |value: AnswerValue| answers.push(value));
//! }
//! assert_eq!(answers.len(), 1);
//! ```
//!
//! ## Variants
//!
//! Each question kind has its own handler in [`handlers`]. The [`dispatch`]
//! function picks one, falling back to choice or free-text handling for
//! unknown tags and to an inert placeholder for incomplete matching content.

pub use quizkit_types::*;

mod capture;
pub use capture::Capture;

mod interaction;
pub use interaction::{Interaction, Outcome};

pub mod handlers;
pub use handlers::{INVALID_CONTENT_MESSAGE, MALFORMED_MATCHING_MESSAGE, WordLimit};

mod dispatch;
pub use dispatch::{Handler, dispatch};

mod session;
pub use session::QuestionSession;

// Test host for driving questions without a UI
mod test_host;
pub use test_host::{TestHost, TestHostError, Transcript};
