use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::QuestionError;

/// A single question presented to a learner.
///
/// Questions are immutable input. On the wire a question is a JSON object
/// tagged by `type`, with camelCase field names:
///
/// ```
/// use quizkit_types::{Question, QuestionType};
///
/// let question = Question::from_json(
///     r#"{"type": "true_false", "id": "q1", "text": "Water is wet.", "correctValue": true}"#,
/// )
/// .unwrap();
/// assert_eq!(question.question_type(), Some(QuestionType::TrueFalse));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    /// Stable identifier, unique within a question set.
    id: String,

    /// The prompt text shown to the learner.
    text: String,

    /// The variant, carrying its distinguishing fields.
    kind: QuestionKind,
}

impl Question {
    /// Create a new question.
    pub fn new(id: impl Into<String>, text: impl Into<String>, kind: impl Into<QuestionKind>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            kind: kind.into(),
        }
    }

    /// Get the question id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the prompt text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the question kind.
    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    /// The variant tag as it appears on the wire (including unknown tags).
    pub fn tag(&self) -> &str {
        match &self.kind {
            QuestionKind::Unknown(unknown) => &unknown.tag,
            QuestionKind::Invalid(invalid) => &invalid.tag,
            kind => kind.question_type().map_or("", QuestionType::as_str),
        }
    }

    /// The known variant, or `None` for an unrecognized tag.
    pub fn question_type(&self) -> Option<QuestionType> {
        self.kind.question_type()
    }

    /// Parse a question from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, QuestionError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Build a question from an already-parsed JSON value.
    ///
    /// Unrecognized `type` tags are not an error: they become
    /// [`QuestionKind::Unknown`], keeping only `options` if present.
    pub fn from_value(value: Value) -> Result<Self, QuestionError> {
        let Value::Object(map) = value else {
            return Err(QuestionError::NotAnObject);
        };
        let tag = match map.get("type") {
            Some(Value::String(tag)) => tag.clone(),
            Some(_) => return Err(QuestionError::InvalidType),
            None => return Err(QuestionError::MissingType),
        };

        if QuestionType::from_tag(&tag).is_some() {
            let tagged: TaggedQuestion = serde_json::from_value(Value::Object(map))
                .map_err(|source| QuestionError::InvalidFields {
                    tag: tag.clone(),
                    source,
                })?;
            Ok(Self {
                id: tagged.id,
                text: tagged.text,
                kind: tagged.kind,
            })
        } else {
            let unknown: UnknownWire = serde_json::from_value(Value::Object(map))
                .map_err(|source| QuestionError::InvalidFields {
                    tag: tag.clone(),
                    source,
                })?;
            Ok(Self {
                id: unknown.id,
                text: unknown.text,
                kind: QuestionKind::Unknown(UnknownQuestion {
                    tag,
                    options: unknown.options,
                }),
            })
        }
    }

    /// Build a question, keeping content that does not parse as
    /// [`QuestionKind::Invalid`] instead of failing.
    ///
    /// `position` names the question when the content has no string `id`.
    pub fn from_value_or_invalid(value: Value, position: usize) -> Self {
        match Self::from_value(value.clone()) {
            Ok(question) => question,
            Err(error) => {
                let field = |name: &str| value.get(name).and_then(Value::as_str).map(str::to_string);
                let id = field("id").unwrap_or_else(|| format!("question-{}", position + 1));
                let text = field("text").or_else(|| field("prompt")).unwrap_or_default();
                let tag = field("type").unwrap_or_default();
                Self {
                    id,
                    text,
                    kind: QuestionKind::Invalid(InvalidQuestion {
                        tag,
                        reason: error.to_string(),
                        raw: value,
                    }),
                }
            }
        }
    }

    /// Serialize this question to its JSON wire form.
    pub fn to_json(&self) -> Result<String, QuestionError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[derive(Deserialize)]
struct TaggedQuestion {
    id: String,
    #[serde(default, alias = "prompt")]
    text: String,
    #[serde(flatten)]
    kind: QuestionKind,
}

#[derive(Serialize)]
struct TaggedQuestionRef<'a> {
    id: &'a str,
    text: &'a str,
    #[serde(flatten)]
    kind: &'a QuestionKind,
}

#[derive(Deserialize)]
struct UnknownWire {
    id: String,
    #[serde(default, alias = "prompt")]
    text: String,
    #[serde(default)]
    options: Option<Vec<String>>,
}

#[derive(Serialize)]
struct UnknownRef<'a> {
    #[serde(rename = "type")]
    tag: &'a str,
    id: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<&'a [String]>,
}

impl Serialize for Question {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.kind {
            QuestionKind::Unknown(unknown) => UnknownRef {
                tag: &unknown.tag,
                id: &self.id,
                text: &self.text,
                options: unknown.options.as_deref(),
            }
            .serialize(serializer),
            QuestionKind::Invalid(invalid) => invalid.raw.serialize(serializer),
            kind => TaggedQuestionRef {
                id: &self.id,
                text: &self.text,
                kind,
            }
            .serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Question {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}

/// The known variant tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionType {
    MultipleChoice,
    FillBlank,
    WritingShort,
    TrueFalse,
    Matching,
    Ordering,
    ReadingComprehension,
    FillBlanksMulti,
    WritingSentence,
    Correction,
    Categorization,
}

impl QuestionType {
    /// Every known variant, in declaration order.
    pub const ALL: [QuestionType; 11] = [
        Self::MultipleChoice,
        Self::FillBlank,
        Self::WritingShort,
        Self::TrueFalse,
        Self::Matching,
        Self::Ordering,
        Self::ReadingComprehension,
        Self::FillBlanksMulti,
        Self::WritingSentence,
        Self::Correction,
        Self::Categorization,
    ];

    /// The wire tag for this variant.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MultipleChoice => "multiple_choice",
            Self::FillBlank => "fill_blank",
            Self::WritingShort => "writing_short",
            Self::TrueFalse => "true_false",
            Self::Matching => "matching",
            Self::Ordering => "ordering",
            Self::ReadingComprehension => "reading_comprehension",
            Self::FillBlanksMulti => "fill_blanks_multi",
            Self::WritingSentence => "writing_sentence",
            Self::Correction => "correction",
            Self::Categorization => "categorization",
        }
    }

    /// Look up a variant by its wire tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.as_str() == tag)
    }

    /// Whether this variant may appear inside a reading comprehension question.
    pub fn is_allowed_in_reading(self) -> bool {
        matches!(
            self,
            Self::MultipleChoice | Self::WritingShort | Self::FillBlank | Self::TrueFalse
        )
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of question, determining interaction style and answer shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    /// Pick exactly one option.
    MultipleChoice(MultipleChoiceQuestion),

    /// One blank in a sentence, answered from a word bank or as free text.
    FillBlank(FillBlankQuestion),

    /// A short free-text answer.
    WritingShort(WritingShortQuestion),

    /// A statement judged true or false.
    TrueFalse(TrueFalseQuestion),

    /// Pair every left item with a right item.
    Matching(MatchingQuestion),

    /// Put items into the right order.
    Ordering(OrderingQuestion),

    /// A passage followed by embedded sub-questions.
    ReadingComprehension(ReadingComprehensionQuestion),

    /// One sentence with several named blanks.
    FillBlanksMulti(FillBlanksMultiQuestion),

    /// Write a full sentence under word-count and content constraints.
    WritingSentence(WritingSentenceQuestion),

    /// Fix the mistakes in a piece of text.
    Correction(CorrectionQuestion),

    /// Sort items into named categories.
    Categorization(CategorizationQuestion),

    /// A tag this version does not recognize.
    #[serde(skip)]
    Unknown(UnknownQuestion),

    /// Content that could not be parsed, kept as found.
    #[serde(skip)]
    Invalid(InvalidQuestion),
}

impl QuestionKind {
    /// The known variant, or `None` for unknown and invalid content.
    pub fn question_type(&self) -> Option<QuestionType> {
        Some(match self {
            Self::MultipleChoice(_) => QuestionType::MultipleChoice,
            Self::FillBlank(_) => QuestionType::FillBlank,
            Self::WritingShort(_) => QuestionType::WritingShort,
            Self::TrueFalse(_) => QuestionType::TrueFalse,
            Self::Matching(_) => QuestionType::Matching,
            Self::Ordering(_) => QuestionType::Ordering,
            Self::ReadingComprehension(_) => QuestionType::ReadingComprehension,
            Self::FillBlanksMulti(_) => QuestionType::FillBlanksMulti,
            Self::WritingSentence(_) => QuestionType::WritingSentence,
            Self::Correction(_) => QuestionType::Correction,
            Self::Categorization(_) => QuestionType::Categorization,
            Self::Unknown(_) | Self::Invalid(_) => return None,
        })
    }

    /// The option list, for variants that carry one.
    pub fn options(&self) -> Option<&[String]> {
        match self {
            Self::MultipleChoice(q) => Some(&q.options),
            Self::FillBlank(q) => q.options.as_deref(),
            Self::FillBlanksMulti(q) => q.options.as_deref(),
            Self::Unknown(q) => q.options.as_deref(),
            _ => None,
        }
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for QuestionKind {
                fn from(question: $ty) -> Self {
                    Self::$variant(question)
                }
            }
        )*
    };
}

impl_from_variant!(
    MultipleChoice(MultipleChoiceQuestion),
    FillBlank(FillBlankQuestion),
    WritingShort(WritingShortQuestion),
    TrueFalse(TrueFalseQuestion),
    Matching(MatchingQuestion),
    Ordering(OrderingQuestion),
    ReadingComprehension(ReadingComprehensionQuestion),
    FillBlanksMulti(FillBlanksMultiQuestion),
    WritingSentence(WritingSentenceQuestion),
    Correction(CorrectionQuestion),
    Categorization(CategorizationQuestion),
    Unknown(UnknownQuestion),
);

/// Configuration for a multiple choice question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultipleChoiceQuestion {
    /// The options, in display order.
    pub options: Vec<String>,
}

impl MultipleChoiceQuestion {
    /// Create a new multiple choice question with the given options.
    pub fn new<S: Into<String>>(options: impl IntoIterator<Item = S>) -> Self {
        Self {
            options: options.into_iter().map(Into::into).collect(),
        }
    }
}

/// Configuration for a single-blank fill-in question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillBlankQuestion {
    /// Sentence containing one `___` marker.
    pub sentence: String,

    /// Word bank. Free-text mode when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl FillBlankQuestion {
    /// Create a free-text fill-in question.
    pub fn new(sentence: impl Into<String>) -> Self {
        Self {
            sentence: sentence.into(),
            options: None,
        }
    }

    /// Attach a word bank.
    pub fn with_options<S: Into<String>>(mut self, options: impl IntoIterator<Item = S>) -> Self {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }
}

/// Configuration for a short free-text question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WritingShortQuestion {
    /// Advisory word limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_words: Option<usize>,
}

/// Configuration for a true/false question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrueFalseQuestion {
    /// The correct judgement. Only used for feedback presentation.
    pub correct_value: bool,
}

/// An item in one column of a matching question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchItem {
    pub id: String,
    pub text: String,
}

impl MatchItem {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// A correct (left, right) pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPair {
    pub left: String,
    pub right: String,
}

impl MatchPair {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }
}

/// Configuration for a matching question.
///
/// All three columns are optional on the wire so that incomplete content can
/// still be loaded; the dispatcher renders an inert placeholder for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingQuestion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_column: Option<Vec<MatchItem>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_column: Option<Vec<MatchItem>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_pairs: Option<Vec<MatchPair>>,
}

impl MatchingQuestion {
    /// Create a complete matching question.
    pub fn new(left: Vec<MatchItem>, right: Vec<MatchItem>, correct_pairs: Vec<MatchPair>) -> Self {
        Self {
            left_column: Some(left),
            right_column: Some(right),
            correct_pairs: Some(correct_pairs),
        }
    }

    /// Names of the required columns that are absent.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.left_column.is_none() {
            missing.push("leftColumn");
        }
        if self.right_column.is_none() {
            missing.push("rightColumn");
        }
        if self.correct_pairs.is_none() {
            missing.push("correctPairs");
        }
        missing
    }
}

/// Configuration for an ordering question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderingQuestion {
    /// Items in their initial (shuffled) order.
    pub items: Vec<String>,

    #[serde(default)]
    pub correct_order: Vec<String>,
}

impl OrderingQuestion {
    pub fn new<S: Into<String>>(
        items: impl IntoIterator<Item = S>,
        correct_order: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            correct_order: correct_order.into_iter().map(Into::into).collect(),
        }
    }
}

/// Configuration for a reading comprehension question.
///
/// Sub-questions are ordinary questions, answered one at a time, in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingComprehensionQuestion {
    pub passage: String,

    pub sub_questions: Vec<Question>,
}

impl ReadingComprehensionQuestion {
    pub fn new(passage: impl Into<String>, sub_questions: Vec<Question>) -> Self {
        Self {
            passage: passage.into(),
            sub_questions,
        }
    }

    /// Sub-questions whose variant is not meant to be embedded in a passage.
    pub fn unsupported_sub_questions(&self) -> impl Iterator<Item = &Question> {
        self.sub_questions.iter().filter(|q| {
            !q.question_type()
                .is_some_and(QuestionType::is_allowed_in_reading)
        })
    }
}

/// A named blank in a multi-blank sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blank {
    pub id: String,
}

impl Blank {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Configuration for a multi-blank fill-in question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillBlanksMultiQuestion {
    /// Sentence with `___id___` markers.
    pub sentence: String,

    /// Blanks in declaration order.
    pub blanks: Vec<Blank>,

    /// Word bank shared by all blanks. Free-text mode when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl FillBlanksMultiQuestion {
    pub fn new<S: Into<String>>(
        sentence: impl Into<String>,
        blanks: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            sentence: sentence.into(),
            blanks: blanks.into_iter().map(Blank::new).collect(),
            options: None,
        }
    }

    /// Attach a word bank.
    pub fn with_options<S: Into<String>>(mut self, options: impl IntoIterator<Item = S>) -> Self {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }
}

/// Configuration for a sentence-writing question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WritingSentenceQuestion {
    /// Words or phrases the sentence is expected to use.
    #[serde(default)]
    pub key_elements: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_words: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_words: Option<usize>,

    /// Example answer revealed with feedback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_answer: Option<String>,
}

/// One mistake in a correction question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionEdit {
    pub original: String,
    pub correction: String,
}

/// Configuration for a correction question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionQuestion {
    /// The text containing mistakes; seeds the editor.
    pub error_text: String,

    pub corrected_text: String,

    #[serde(default)]
    pub errors: Vec<CorrectionEdit>,
}

impl CorrectionQuestion {
    pub fn new(error_text: impl Into<String>, corrected_text: impl Into<String>) -> Self {
        Self {
            error_text: error_text.into(),
            corrected_text: corrected_text.into(),
            errors: Vec::new(),
        }
    }
}

/// A category bucket and the items that belong in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub name: String,

    #[serde(default)]
    pub correct_items: Vec<String>,
}

impl Category {
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        correct_items: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            name: name.into(),
            correct_items: correct_items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Configuration for a categorization question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorizationQuestion {
    pub items: Vec<String>,

    pub categories: Vec<Category>,
}

impl CategorizationQuestion {
    pub fn new<S: Into<String>>(items: impl IntoIterator<Item = S>, categories: Vec<Category>) -> Self {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            categories,
        }
    }

    /// The category an item is expected in, if any.
    pub fn expected_category(&self, item: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.correct_items.iter().any(|i| i == item))
            .map(|c| c.name.as_str())
    }
}

/// A question whose content could not be parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidQuestion {
    /// The `type` tag, empty if there was none.
    pub tag: String,

    /// Why parsing failed.
    pub reason: String,

    /// The content exactly as it was received.
    pub raw: Value,
}

/// A question whose tag is not one of the known variants.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnknownQuestion {
    /// The unrecognized tag, as found on the wire.
    pub tag: String,

    /// Options, if the content carried any.
    pub options: Option<Vec<String>>,
}
