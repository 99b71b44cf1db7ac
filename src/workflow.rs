use crate::cli::{InjectArgs, VerifyArgs};
use crate::env::MapEnv;
use crate::inject::inject_all;
use crate::mapping::load_mapping;
use crate::util::display_path;
use crate::verify::{verify_wiring, WiringPaths};
use anyhow::{Context, Result};
use std::process::ExitCode;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_MISSING_MAPPING: u8 = 2;

pub fn run_inject(args: InjectArgs) -> Result<ExitCode> {
    if !args.mapping.is_file() {
        eprintln!("mapping file not found: {}", args.mapping.display());
        return Ok(ExitCode::from(EXIT_MISSING_MAPPING));
    }
    let mapping = load_mapping(&args.mapping)?;
    let env = MapEnv::from_process();

    let report = inject_all(&mapping, &args.root, &env)?;
    for path in &report.written {
        println!("wrote {}", display_path(path, Some(args.root.as_path())));
    }
    for path in &report.skipped {
        println!("skipped {} (not found)", display_path(path, Some(args.root.as_path())));
    }

    if report.missing.is_empty() {
        return Ok(ExitCode::SUCCESS);
    }
    if args.require_all {
        eprintln!("{}", report.missing.summary());
        return Ok(ExitCode::from(EXIT_FAILURE));
    }
    tracing::warn!(
        vars = %report.missing.joined(),
        "unresolved environment variables injected as empty values"
    );
    Ok(ExitCode::SUCCESS)
}

pub fn run_verify(args: VerifyArgs) -> Result<ExitCode> {
    let paths = WiringPaths::new(args.root);
    tracing::info!(root = %paths.root().display(), "verifying secret wiring");
    let env = MapEnv::from_process();

    let report = verify_wiring(&paths, &env);
    if args.json {
        println!("{}", report.render_json().context("serialize verification report")?);
    } else {
        print!("{}", report.render_text());
    }

    if report.ok() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_FAILURE))
    }
}
