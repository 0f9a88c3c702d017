//! Blank markers in fill-in sentences.
//!
//! Single-blank sentences use a bare `___`; multi-blank sentences name each
//! blank as `___id___`.

/// The marker delimiting a blank.
pub const BLANK_MARKER: &str = "___";

/// A piece of a parsed sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text.
    Text(String),

    /// A blank. The id is empty for single-blank sentences.
    Blank(String),
}

/// A sentence split into text and blanks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentenceTemplate {
    segments: Vec<Segment>,
}

impl SentenceTemplate {
    /// Parse a sentence with one unnamed `___` blank.
    ///
    /// The first run of three or more underscores is the blank; a sentence
    /// without one yields only text.
    pub fn single(sentence: &str) -> Self {
        let mut segments = Vec::new();
        match sentence.find(BLANK_MARKER) {
            Some(start) => {
                let after = sentence[start..].trim_start_matches('_');
                push_text(&mut segments, &sentence[..start]);
                segments.push(Segment::Blank(String::new()));
                push_text(&mut segments, after);
            }
            None => push_text(&mut segments, sentence),
        }
        Self { segments }
    }

    /// Parse a sentence with named `___id___` blanks.
    ///
    /// A marker pair enclosing something that is not a valid id is kept as text.
    ///
    /// ```
    /// use quizkit_types::{Segment, SentenceTemplate};
    ///
    /// let template = SentenceTemplate::named("The ___x___ jumped over the ___y___.");
    /// let ids: Vec<_> = template.blank_ids().collect();
    /// assert_eq!(ids, vec!["x", "y"]);
    /// assert_eq!(template.segments()[0], Segment::Text("The ".to_string()));
    /// ```
    pub fn named(sentence: &str) -> Self {
        let mut segments = Vec::new();
        let mut text = String::new();
        let mut rest = sentence;

        while let Some(start) = rest.find(BLANK_MARKER) {
            let after = &rest[start + BLANK_MARKER.len()..];
            match after.find(BLANK_MARKER) {
                Some(end) if is_blank_id(&after[..end]) => {
                    text.push_str(&rest[..start]);
                    push_text(&mut segments, &std::mem::take(&mut text));
                    segments.push(Segment::Blank(after[..end].to_string()));
                    rest = &after[end + BLANK_MARKER.len()..];
                }
                _ => {
                    text.push_str(&rest[..start + BLANK_MARKER.len()]);
                    rest = after;
                }
            }
        }
        text.push_str(rest);
        push_text(&mut segments, &text);

        Self { segments }
    }

    /// The parsed segments, in sentence order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Blank ids in sentence order.
    pub fn blank_ids(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Blank(id) => Some(id.as_str()),
            Segment::Text(_) => None,
        })
    }

    /// Render the sentence, substituting filled blanks.
    ///
    /// Unfilled blanks render as the bare marker.
    pub fn render<'a>(&self, fill: impl Fn(&str) -> Option<&'a str>) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Blank(id) => out.push_str(fill(id).unwrap_or(BLANK_MARKER)),
            }
        }
        out
    }
}

fn push_text(segments: &mut Vec<Segment>, text: &str) {
    if !text.is_empty() {
        segments.push(Segment::Text(text.to_string()));
    }
}

fn is_blank_id(candidate: &str) -> bool {
    !candidate.is_empty()
        && !candidate.starts_with('_')
        && candidate
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}
