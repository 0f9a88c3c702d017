//! Dialoguer host implementation.

use dialoguer::{Input, Select, theme::ColorfulTheme};
use quizkit::{
    AnswerValue, Capture, Handler, HostProps, Interaction, Outcome, Question, QuestionError,
    QuestionSession, QuestionSet, WordLimit, handlers::BlankMode,
};
use thiserror::Error;

/// Error type for the Dialoguer host.
#[derive(Debug, Error)]
pub enum DialoguerError {
    /// User cancelled the quiz (e.g., pressed Ctrl+C or Escape).
    #[error("Quiz cancelled by user")]
    Cancelled,

    /// An I/O error occurred during prompting.
    #[error("Dialoguer error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    /// The question set could not be loaded.
    #[error("Content error: {0}")]
    Content(#[from] QuestionError),
}

/// Helper to check if a dialoguer error is a cancellation (Ctrl+C / Escape)
fn is_cancelled(err: &dialoguer::Error) -> bool {
    matches!(err, dialoguer::Error::IO(io_err) if io_err.kind() == std::io::ErrorKind::Interrupted)
}

fn prompt_error(err: dialoguer::Error) -> DialoguerError {
    if is_cancelled(&err) {
        DialoguerError::Cancelled
    } else {
        DialoguerError::Dialoguer(err)
    }
}

/// Dialoguer host for answering question sets on the command line.
///
/// Every prompt answer is forwarded to the engine as an [`Interaction`]; the
/// host never builds answers itself.
#[derive(Debug, Default, Clone)]
pub struct DialoguerHost {
    /// Use colorful theme for prompts.
    colorful: bool,

    /// Reveal model answers and corrections after each question.
    feedback: bool,
}

impl DialoguerHost {
    /// Create a new Dialoguer host with default (colorful) theme.
    pub fn new() -> Self {
        Self {
            colorful: true,
            feedback: false,
        }
    }

    /// Create a host with plain (no color) theme.
    pub fn plain() -> Self {
        Self {
            colorful: false,
            feedback: false,
        }
    }

    /// Reveal what the content carries for feedback after each answer.
    pub fn with_feedback(mut self, feedback: bool) -> Self {
        self.feedback = feedback;
        self
    }

    /// Ask every question in the set, in order.
    ///
    /// Returns the answers keyed by question id. Questions that cannot be
    /// answered are reported and left out.
    pub fn run(&self, set: &QuestionSet) -> Result<Vec<(String, AnswerValue)>, DialoguerError> {
        if let Some(title) = &set.title {
            println!("{title}");
            println!("{}", "=".repeat(title.chars().count()));
        }
        if let Some(prelude) = &set.prelude {
            println!("{prelude}");
            println!();
        }

        let mut answers = Vec::new();
        for question in set.questions() {
            if let Some(answer) = self.ask(question)? {
                answers.push((question.id().to_string(), answer));
            }
        }

        if let Some(epilogue) = &set.epilogue {
            println!();
            println!("{epilogue}");
        }
        Ok(answers)
    }

    /// Ask a single question until the engine submits an answer.
    pub fn ask(&self, question: &Question) -> Result<Option<AnswerValue>, DialoguerError> {
        let mut session = QuestionSession::new(question.clone(), HostProps::new());
        let prompt = prompt_for(question);

        match session.handler() {
            Handler::Malformed(placeholder) => {
                println!("{prompt}");
                println!("  {}", placeholder.message());
                return Ok(None);
            }
            Handler::ReadingComprehension(reading) => {
                println!();
                println!("{}", reading.passage());
                println!();
            }
            _ => {}
        }

        let mut answer = None;
        while answer.is_none() {
            let steps = self.next_step(session.handler(), &prompt)?;
            if steps.is_empty() {
                tracing::warn!(id = question.id(), "question offers nothing to answer, skipping");
                return Ok(None);
            }
            for interaction in steps {
                let outcome =
                    session.interact(interaction, &mut |value: AnswerValue| answer = Some(value));
                if outcome == Outcome::NotReady {
                    println!("  {}", not_ready_hint(session.handler()));
                }
            }
        }

        if let Some(hint) = limit_hint(word_limit(session.handler())) {
            println!("  {hint}");
        }
        if self.feedback {
            session.set_props(|props| props.show_feedback = true);
            if let Some(reveal) = reveal(session.handler(), session.props()) {
                println!("  {reveal}");
            }
        }
        Ok(answer)
    }

    /// Prompt for the next piece of input the handler needs.
    fn next_step(&self, handler: &Handler, prompt: &str) -> Result<Vec<Interaction>, DialoguerError> {
        match handler {
            Handler::MultipleChoice(choice) | Handler::FallbackChoice(choice) => {
                Ok(self.pick(prompt, choice.options())?.map(Interaction::Choose).into_iter().collect())
            }

            Handler::TrueFalse(_) => {
                let index = self.select(prompt, &["True", "False"])?;
                Ok(vec![Interaction::judge(index == 0)])
            }

            Handler::FillBlank(fill) => {
                let prompt = format!("{prompt}\n  {}", fill.rendered());
                if fill.is_word_bank() {
                    Ok(self.pick(&prompt, fill.options())?.map(Interaction::Choose).into_iter().collect())
                } else {
                    let text = self.input(&prompt, "")?;
                    Ok(vec![Interaction::Edit(text), Interaction::Submit])
                }
            }

            Handler::WritingShort(text) | Handler::FallbackText(text) => {
                if let Some(max) = text.max_words() {
                    println!("  (up to {max} words)");
                }
                let draft = self.input(prompt, text.text())?;
                Ok(vec![Interaction::Edit(draft), Interaction::Submit])
            }

            Handler::WritingSentence(sentence) => {
                if !sentence.key_elements().is_empty() {
                    println!("  Try to use: {}", sentence.key_elements().join(", "));
                }
                let draft = self.input(prompt, sentence.text())?;
                Ok(vec![Interaction::Edit(draft), Interaction::Submit])
            }

            Handler::Correction(correction) => {
                let draft = self.input(prompt, correction.text())?;
                Ok(vec![Interaction::Edit(draft), Interaction::Submit])
            }

            Handler::Matching(matching) => {
                let left: Vec<_> = matching
                    .left_column()
                    .iter()
                    .filter(|item| !matching.pairs().contains_key(&item.id))
                    .collect();
                if left.is_empty() {
                    return Ok(vec![Interaction::Submit]);
                }
                let right: Vec<_> = matching
                    .right_column()
                    .iter()
                    .filter(|item| matching.right_available(&item.id))
                    .collect();
                if right.is_empty() {
                    return Ok(vec![]);
                }

                let left_texts: Vec<&str> = left.iter().map(|item| item.text.as_str()).collect();
                let l = self.select(prompt, &left_texts)?;
                let right_texts: Vec<&str> = right.iter().map(|item| item.text.as_str()).collect();
                let r = self.select(&format!("{} matches", left_texts[l]), &right_texts)?;

                Ok(vec![
                    Interaction::TapLeft(left[l].id.clone()),
                    Interaction::TapRight(right[r].id.clone()),
                ])
            }

            Handler::Ordering(ordering) => {
                let mut menu = ordering_menu(ordering.working_order());
                menu.push("Check order".to_string());
                let index = self.select(prompt, &menu)?;
                if index == ordering.working_order().len() {
                    return Ok(vec![Interaction::Submit]);
                }
                let direction = self.select("Move", &["Up", "Down"])?;
                Ok(vec![if direction == 0 {
                    Interaction::MoveUp(index)
                } else {
                    Interaction::MoveDown(index)
                }])
            }

            Handler::Categorization(categorization) => {
                let uncategorized = categorization.uncategorized();
                if uncategorized.is_empty() {
                    return Ok(vec![Interaction::Submit]);
                }
                let names: Vec<&str> = categorization
                    .buckets()
                    .iter()
                    .map(|(name, _)| name.as_str())
                    .collect();
                if names.is_empty() {
                    return Ok(vec![]);
                }
                let item = self.select(prompt, &uncategorized)?;
                let category = self.select(&format!("Where does {} go?", uncategorized[item]), &names)?;
                Ok(vec![
                    Interaction::TapItem(uncategorized[item].to_string()),
                    Interaction::TapCategory(names[category].to_string()),
                ])
            }

            Handler::FillBlanksMulti(multi) => {
                if multi.is_ready() {
                    return Ok(vec![Interaction::Submit]);
                }
                let prompt = format!("{prompt}\n  {}", multi.rendered());
                match multi.mode() {
                    BlankMode::WordBank => {
                        let Some(target) = multi
                            .active_blank()
                            .or_else(|| multi.blanks().iter().map(String::as_str).find(|b| multi.answer(b).is_none()))
                        else {
                            return Ok(vec![]);
                        };
                        let mut words: Vec<String> = Vec::new();
                        for word in multi.options() {
                            if multi.bank_word_available(word) && !words.contains(word) {
                                words.push(word.clone());
                            }
                        }
                        let Some(word) = self.pick(&format!("{prompt}\n  Blank {target}"), &words)? else {
                            return Ok(vec![]);
                        };
                        Ok(vec![
                            Interaction::FocusBlank(target.to_string()),
                            Interaction::TapBankWord(word),
                        ])
                    }
                    BlankMode::FreeText => {
                        println!("{prompt}");
                        let mut steps = Vec::new();
                        for blank in multi.blanks() {
                            let text = self.input(&format!("Blank {blank}"), multi.answer(blank).unwrap_or(""))?;
                            steps.push(Interaction::edit_blank(blank.clone(), text));
                        }
                        steps.push(Interaction::Submit);
                        Ok(steps)
                    }
                }
            }

            Handler::ReadingComprehension(reading) => {
                match (reading.current_question(), reading.current_handler()) {
                    (Some(question), Some(sub)) => {
                        let label = quizkit::CompositeAnswer::label(reading.current_index());
                        self.next_step(sub, &format!("{label}) {}", prompt_for(question)))
                    }
                    _ => Ok(vec![Interaction::Submit]),
                }
            }

            Handler::Malformed(_) => Ok(vec![]),
        }
    }

    /// Select one of `items` and return it.
    fn pick(&self, prompt: &str, items: &[String]) -> Result<Option<String>, DialoguerError> {
        if items.is_empty() {
            return Ok(None);
        }
        let index = self.select(prompt, items)?;
        Ok(items.get(index).cloned())
    }

    fn select<T: ToString>(&self, prompt: &str, items: &[T]) -> Result<usize, DialoguerError> {
        let mut builder: Select;
        let _theme;
        if self.colorful {
            _theme = ColorfulTheme::default();
            builder = Select::with_theme(&_theme);
        } else {
            builder = Select::new();
        }

        builder = builder.with_prompt(prompt).items(items).default(0);

        builder.interact().map_err(prompt_error)
    }

    fn input(&self, prompt: &str, initial: &str) -> Result<String, DialoguerError> {
        let _theme;
        let mut builder: Input<String>;
        if self.colorful {
            _theme = ColorfulTheme::default();
            builder = Input::with_theme(&_theme);
        } else {
            builder = Input::new();
        }

        builder = builder.with_prompt(prompt).allow_empty(true);
        if !initial.is_empty() {
            builder = builder.with_initial_text(initial);
        }

        builder.interact_text().map_err(prompt_error)
    }
}

/// The question's text, or a title-cased version of its id.
fn prompt_for(question: &Question) -> String {
    if !question.text().is_empty() {
        return question.text().to_string();
    }
    question
        .id()
        .split(['_', '-'])
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().chain(chars).collect(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn ordering_menu(order: &[String]) -> Vec<String> {
    order
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {item}", i + 1))
        .collect()
}

fn word_limit(handler: &Handler) -> WordLimit {
    match handler {
        Handler::WritingShort(text) | Handler::FallbackText(text) => text.word_limit(),
        Handler::WritingSentence(sentence) => sentence.word_limit(),
        _ => WordLimit::Within,
    }
}

fn limit_hint(limit: WordLimit) -> Option<String> {
    match limit {
        WordLimit::Within => None,
        WordLimit::TooShort { min } => Some(format!("(aim for at least {min} words)")),
        WordLimit::TooLong { max } => Some(format!("(that is more than {max} words)")),
    }
}

fn not_ready_hint(handler: &Handler) -> &'static str {
    match handler {
        Handler::Correction(_) => "Make at least one correction first.",
        Handler::Categorization(_) => "Place every item first.",
        Handler::FillBlanksMulti(_) => "Fill every blank first.",
        _ => "An answer is required.",
    }
}

/// What the content reveals once feedback is shown.
fn reveal(handler: &Handler, props: &HostProps) -> Option<String> {
    match handler {
        Handler::TrueFalse(judgement) => judgement
            .revealed_answer(props)
            .map(|value| format!("Answer: {value}")),
        Handler::Correction(correction) => correction
            .corrected_text(props)
            .map(|text| format!("Corrected: {text}")),
        Handler::WritingSentence(sentence) => sentence
            .model_answer(props)
            .map(|text| format!("Model answer: {text}")),
        _ => None,
    }
}
