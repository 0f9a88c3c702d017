use std::fmt;

/// The folded answer of a reading comprehension question.
///
/// Each sub-answer becomes one line labelled by its zero-based position:
/// `a) ...`, `b) ...`, and so on. Graders split the string back apart with
/// [`CompositeAnswer::parse`].
///
/// ```
/// use quizkit_types::CompositeAnswer;
///
/// let composite = CompositeAnswer::from_parts(["Paris", "true"]);
/// assert_eq!(composite.fold(), "a) Paris\nb) true");
/// assert_eq!(CompositeAnswer::parse("a) Paris\nb) true"), composite);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompositeAnswer {
    parts: Vec<String>,
}

impl CompositeAnswer {
    /// Create an empty composite.
    pub fn new() -> Self {
        Self { parts: Vec::new() }
    }

    /// Create a composite from sub-answers in sub-question order.
    pub fn from_parts<S: Into<String>>(parts: impl IntoIterator<Item = S>) -> Self {
        Self {
            parts: parts.into_iter().map(Into::into).collect(),
        }
    }

    /// The ordinal label for the sub-answer at `index` (`a` for 0).
    ///
    /// Labels continue past `z` through the following code points.
    pub fn label(index: usize) -> char {
        u32::try_from(index)
            .ok()
            .and_then(|i| i.checked_add(97))
            .and_then(char::from_u32)
            .unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    /// Append the next sub-answer.
    pub fn push(&mut self, answer: impl Into<String>) {
        self.parts.push(answer.into());
    }

    /// The sub-answers, in order.
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Get the number of sub-answers.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Check if there are no sub-answers.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Fold into the wire string: labelled lines joined by `\n`.
    pub fn fold(&self) -> String {
        self.to_string()
    }

    /// Split a folded string back into sub-answers.
    ///
    /// A line that does not start with the next expected label continues the
    /// previous sub-answer. Text before the first label is dropped.
    pub fn parse(folded: &str) -> Self {
        let mut composite = Self::new();
        for line in folded.split('\n') {
            let label = Self::label(composite.len());
            let prefix = format!("{label})");
            if let Some(rest) = line.strip_prefix(&prefix) {
                let answer = rest.strip_prefix(' ').unwrap_or(rest);
                composite.push(answer);
            } else if let Some(last) = composite.parts.last_mut() {
                last.push('\n');
                last.push_str(line);
            }
        }
        composite
    }
}

impl fmt::Display for CompositeAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, part) in self.parts.iter().enumerate() {
            if index > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}) {}", Self::label(index), part)?;
        }
        Ok(())
    }
}
