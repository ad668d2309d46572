//! Ask one question from the command line and print the answer as JSON.
//!
//! Run with: `cargo run --bin ask -- who visited the white house`

use std::process::ExitCode;

use anyhow::{Context, bail};
use civic_query::config::AnswersConfig;
use civic_query::query::Dispatcher;
use civic_query::start;

fn main() -> ExitCode {
    start::init_logging();

    match ask() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn ask() -> anyhow::Result<()> {
    let question = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if question.trim().is_empty() {
        bail!("usage: ask <question>");
    }

    let config = AnswersConfig::from_env();
    let registry = start::live_registry(&config).context("failed to build recognizers")?;
    let dispatcher = Dispatcher::new(std::sync::Arc::new(registry));

    let runtime = tokio::runtime::Runtime::new().context("failed to create runtime")?;
    match runtime.block_on(dispatcher.answer(&question))? {
        Some(dispatched) => {
            let json = serde_json::to_string_pretty(&dispatched.answer.export())?;
            println!("{json}");
        }
        None => println!("no answer"),
    }

    Ok(())
}
