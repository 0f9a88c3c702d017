//! Core types for the quizkit crate.
//!
//! This crate provides the foundational types for presenting questions:
//! - `Question` and `QuestionKind` - The closed set of question variants
//! - `AnswerValue` and `CompositeAnswer` - The shapes a submitted answer can take
//! - `HostProps` and `AnswerSink` - The narrow contract between engine and host
//! - `QuestionSet` - An ordered list of questions loaded from JSON
//! - `SentenceTemplate` - Blank markers in fill-in sentences

mod answer_value;
pub use answer_value::AnswerValue;

mod composite;
pub use composite::CompositeAnswer;

mod question;
pub use question::{
    Blank, CategorizationQuestion, Category, CorrectionEdit, CorrectionQuestion,
    FillBlankQuestion, FillBlanksMultiQuestion, InvalidQuestion, MatchItem, MatchPair, MatchingQuestion,
    MultipleChoiceQuestion, OrderingQuestion, Question, QuestionKind, QuestionType,
    ReadingComprehensionQuestion, TrueFalseQuestion, UnknownQuestion, WritingSentenceQuestion,
    WritingShortQuestion,
};

mod question_set;
pub use question_set::QuestionSet;

mod template;
pub use template::{BLANK_MARKER, Segment, SentenceTemplate};

mod host;
pub use host::{AnswerSink, HostProps, SubmitPolicy};

mod error;
pub use error::QuestionError;
