//! Question sets stored as JSON, the way hosts receive them.

use anyhow::Context;
use quizkit_types::QuestionSet;

const ENGLISH_BASICS: &str = include_str!("../fixtures/english_basics.json");
const EDGE_CASES: &str = include_str!("../fixtures/edge_cases.json");

/// One question of every variant, ending with a reading passage.
pub fn english_basics() -> anyhow::Result<QuestionSet> {
    QuestionSet::from_json(ENGLISH_BASICS).context("parsing english_basics.json")
}

/// Content the engine has to degrade gracefully on: a matching question
/// without its right column or answer key, two unknown tags and a
/// multiple-choice question with no options.
pub fn edge_cases() -> anyhow::Result<QuestionSet> {
    let set = QuestionSet::from_json(EDGE_CASES).context("parsing edge_cases.json")?;
    Ok(set.with_title("Edge cases"))
}
