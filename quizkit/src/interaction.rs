/// A single learner input event.
///
/// Handlers ignore events that do not apply to their variant and answer them
/// with [`Outcome::Unsupported`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    /// Tap an option: a choice, a single-blank word-bank word, or `"true"`/`"false"`.
    Choose(String),

    /// Replace the text buffer with the given contents.
    Edit(String),

    /// Tap a left-column item by id (matching).
    TapLeft(String),

    /// Tap a right-column item by id (matching).
    TapRight(String),

    /// Move the item at this index one position up (ordering).
    MoveUp(usize),

    /// Move the item at this index one position down (ordering).
    MoveDown(usize),

    /// Tap an item (categorization).
    TapItem(String),

    /// Tap a category by name (categorization).
    TapCategory(String),

    /// Put the cursor on a blank (multi-blank fill-in).
    FocusBlank(String),

    /// Tap a word in the bank (multi-blank fill-in).
    TapBankWord(String),

    /// Replace the text of one blank (multi-blank fill-in, free-text mode).
    EditBlank { blank: String, text: String },

    /// Empty a blank and return its word to the bank (multi-blank fill-in).
    ClearBlank(String),

    /// The explicit submit action.
    Submit,
}

impl Interaction {
    /// Tap an option.
    pub fn choose(option: impl Into<String>) -> Self {
        Self::Choose(option.into())
    }

    /// Judge a true/false statement.
    pub fn judge(value: bool) -> Self {
        Self::Choose(if value { "true" } else { "false" }.to_string())
    }

    /// Replace the text buffer.
    pub fn edit(text: impl Into<String>) -> Self {
        Self::Edit(text.into())
    }

    /// Replace the text of one blank.
    pub fn edit_blank(blank: impl Into<String>, text: impl Into<String>) -> Self {
        Self::EditBlank {
            blank: blank.into(),
            text: text.into(),
        }
    }
}

/// What a handler did with an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Capture state changed; nothing was submitted.
    Changed,

    /// The answer was handed to the sink.
    Submitted,

    /// An explicit submit arrived before the readiness predicate held.
    NotReady,

    /// Nothing happened: input is disabled, the question is already answered,
    /// or the event was a no-op for the current state.
    Inert,

    /// The event does not apply to this variant.
    Unsupported,
}

impl Outcome {
    pub fn is_submitted(self) -> bool {
        self == Self::Submitted
    }

    /// Whether the event changed anything.
    pub fn is_effective(self) -> bool {
        matches!(self, Self::Changed | Self::Submitted)
    }
}
