//! CLI binary for `ican_checklist`.
//!
//! This binary is a thin wrapper that parses arguments and delegates to the library.

use std::process::ExitCode;

use clap::Parser;
use ican_checklist::cli::{run, Cli, RunContext};
use ican_checklist::error::Error;
use ican_checklist::paths;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let Some(data_dir) = cli.data_dir.or_else(paths::data_dir) else {
        eprintln!("Error: {}", Error::NoDataDir);
        return ExitCode::from(1);
    };

    let ctx = match RunContext::load(data_dir, chrono::Local::now().date_naive()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            return ExitCode::from(1);
        }
    };

    init_logging(ctx.config.log_level.as_deref().unwrap_or("warn"));

    let output = run(cli.command, &ctx);

    for msg in output.stdout {
        println!("{msg}");
    }
    for msg in output.stderr {
        eprintln!("{msg}");
    }

    output.exit_code
}

fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
