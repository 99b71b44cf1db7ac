use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod document;
mod env;
mod files;
mod inject;
mod mapping;
mod util;
mod value_spec;
mod verify;
mod workflow;

use cli::{Command, RootArgs};

/// Environment variable overriding the log filter (`tracing` directives).
const LOG_ENV: &str = "SWIRE_LOG";

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "info" } else { "warn" }));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    let args = RootArgs::parse();
    init_tracing(args.command.verbose());

    let result = match args.command {
        Command::Inject(args) => workflow::run_inject(args),
        Command::Verify(args) => workflow::run_verify(args),
    };
    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(workflow::EXIT_FAILURE)
        }
    }
}
