//! Content the engine has to degrade gracefully on. Run with: cargo run --example edge_cases

use quizkit_dialoguer::DialoguerHost;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("quizkit=warn".parse()?))
        .init();

    let set = example_quizzes::edge_cases()?;
    let answers = DialoguerHost::plain().run(&set)?;
    println!("{answers:#?}");
    Ok(())
}
