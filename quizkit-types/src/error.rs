use std::path::PathBuf;

/// Error type for loading question content.
///
/// The engine itself never fails; these errors only surface at the content
/// boundary, when JSON is turned into `Question` values.
#[derive(Debug, thiserror::Error)]
pub enum QuestionError {
    /// The input was not valid JSON, or a question set had the wrong shape.
    #[error("Invalid question JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A question was not a JSON object.
    #[error("Question must be a JSON object")]
    NotAnObject,

    /// A question object had no `type` tag.
    #[error("Question is missing its `type` tag")]
    MissingType,

    /// The `type` tag was present but not a string.
    #[error("Question `type` must be a string")]
    InvalidType,

    /// A known variant had missing or mistyped fields.
    #[error("Invalid fields for `{tag}` question: {source}")]
    InvalidFields {
        tag: String,
        #[source]
        source: serde_json::Error,
    },

    /// A question set file could not be read.
    #[error("Failed to read question set from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl QuestionError {
    /// Check if this error came from the content itself rather than I/O.
    pub fn is_content_error(&self) -> bool {
        !matches!(self, Self::Io { .. })
    }
}
