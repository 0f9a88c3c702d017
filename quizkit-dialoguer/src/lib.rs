//! # quizkit-dialoguer
//!
//! Dialoguer host for quizkit.
//!
//! This crate answers question sets on the command line using the `dialoguer`
//! library. Each question is presented as a series of prompts, and every
//! prompt result is forwarded to the engine as an interaction. The engine
//! decides when a question is answered.
//!
//! ## Example
//!
//! ```rust,ignore
//! use quizkit::QuestionSet;
//! use quizkit_dialoguer::DialoguerHost;
//!
//! fn main() -> anyhow::Result<()> {
//!     let set = QuestionSet::from_path("lesson.json")?;
//!     let answers = DialoguerHost::new().with_feedback(true).run(&set)?;
//!     for (id, answer) in answers {
//!         println!("{id}: {}", answer.coerce_to_string());
//!     }
//!     Ok(())
//! }
//! ```

mod host;

pub use host::{DialoguerError, DialoguerHost};
