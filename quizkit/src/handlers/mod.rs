//! One handler per question variant.
//!
//! Flat handlers (choice, fill-in, writing, true/false, correction) keep a
//! selection or a text buffer. Matching, ordering, categorization and
//! multi-blank fill-in keep richer partial state. Reading comprehension
//! composes the others through the dispatcher.

mod choice;
pub use choice::{ChoiceHandler, ChoiceMark};

mod true_false;
pub use true_false::TrueFalseHandler;

mod text;
pub use text::{TextHandler, WordLimit, word_count};

mod fill_blank;
pub use fill_blank::FillBlankHandler;

mod writing_sentence;
pub use writing_sentence::WritingSentenceHandler;

mod correction;
pub use correction::CorrectionHandler;

mod matching;
pub use matching::{MatchingHandler, PairMark};

mod ordering;
pub use ordering::OrderingHandler;

mod categorization;
pub use categorization::CategorizationHandler;

mod fill_blanks_multi;
pub use fill_blanks_multi::{BlankMode, FillBlanksMultiHandler};

mod reading;
pub use reading::ReadingComprehensionHandler;

mod placeholder;
pub use placeholder::{INVALID_CONTENT_MESSAGE, MALFORMED_MATCHING_MESSAGE, Placeholder};
