//! Answer the English basics lesson. Run with: cargo run --example english_basics
//!
//! Set `RUST_LOG=quizkit=debug` to see which handler each question gets.

use quizkit_dialoguer::DialoguerHost;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("quizkit=info".parse()?))
        .init();

    let set = example_quizzes::english_basics()?;
    let answers = DialoguerHost::new().with_feedback(true).run(&set)?;

    println!();
    for (id, answer) in answers {
        println!("{id}: {}", one_line(&answer));
    }
    Ok(())
}

fn one_line(answer: &quizkit::AnswerValue) -> String {
    answer.coerce_to_string().replace('\n', " | ")
}
