use clap::Parser;
use rforth::runtime::{
    built_ins::register_builtin_words,
    error,
    interpreter::{SessionEnd, SourceManagement, forth_interpreter::ForthInterpreter},
};
use std::{
    path::PathBuf,
    process::{ExitCode, Termination},
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// A small threaded-word Forth interpreter.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Script to run.  Without one, words are read from standard input.
    script: Option<PathBuf>,
}

/// Log to stderr so the interpreter's own output on stdout stays clean.  `RUST_LOG` overrides the
/// default filter.
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rforth=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Register the built-in words and run the script, or the REPL when there is none.
fn run_session(args: &Args) -> error::Result<SessionEnd> {
    let mut interpreter = ForthInterpreter::from_stdio();

    // Primitives go in before any user input is looked at.  A broken alias in the tables is a
    // startup failure.
    register_builtin_words(&mut interpreter)?;

    let result = match &args.script {
        Some(script) => interpreter.process_source_file(&script.to_string_lossy()),
        None => interpreter.run(),
    };

    // Whatever happened, make sure everything printed so far reaches the user.
    let _ = interpreter.flush_output();

    result
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    match run_session(&args) {
        Ok(end) => {
            info!(?end, "session finished");
            ExitCode::SUCCESS
        }

        Err(err) => {
            tracing::error!(%err, "session aborted");
            err.report()
        }
    }
}
