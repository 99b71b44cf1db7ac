//! CLI argument parsing for injection and verification.
//!
//! The CLI stays thin: each command maps onto one workflow entry point.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "swire",
    version,
    about = "Inject environment values into config files and verify the wiring",
    after_help = "Commands:\n  inject --mapping <file> [--require-all]  Apply a mapping descriptor\n  verify                                   Check that injected values are populated\n\nExamples:\n  swire inject --mapping mapping.json\n  swire inject --mapping mapping.json --require-all\n  swire verify --root ./deploy",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Inject(InjectArgs),
    Verify(VerifyArgs),
}

/// Inject command inputs.
#[derive(Parser, Debug)]
#[command(about = "Inject environment values into structured files and token templates")]
pub struct InjectArgs {
    /// Mapping descriptor (JSON) listing targets, value specs, and templates
    #[arg(long, value_name = "PATH")]
    pub mapping: PathBuf,

    /// Fail if any referenced environment variable is missing
    #[arg(long)]
    pub require_all: bool,

    /// Directory that relative target and template paths are resolved against
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Log each file as it is processed
    #[arg(long)]
    pub verbose: bool,
}

/// Verify command inputs.
#[derive(Parser, Debug)]
#[command(about = "Verify that injected values are present and non-empty")]
pub struct VerifyArgs {
    /// Project root containing config.json, settings.yaml, and app/app.py
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Emit the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Log each check as it runs
    #[arg(long)]
    pub verbose: bool,
}

impl Command {
    pub fn verbose(&self) -> bool {
        match self {
            Self::Inject(args) => args.verbose,
            Self::Verify(args) => args.verbose,
        }
    }
}
