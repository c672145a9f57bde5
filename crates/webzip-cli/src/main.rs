//! Webzip CLI - packages a game web build into a zip archive.

mod cli;
mod error;
mod output;
mod progress;

use anyhow::Result;
use clap::Parser;
use output::OutputFormatter;
use progress::CliProgress;
use std::process::ExitCode;
use webzip_core::NoopProgress;
use webzip_core::ProgressCallback;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    match execute(&cli, &*formatter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            formatter.format_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: &cli::Cli, formatter: &dyn OutputFormatter) -> Result<()> {
    let config = cli.to_config();

    let show_progress = !cli.quiet && !cli.json && CliProgress::should_show();
    let mut progress: Box<dyn ProgressCallback> = if show_progress {
        Box::new(CliProgress::new())
    } else {
        Box::new(NoopProgress)
    };

    let report = error::add_root_context(
        webzip_core::package_with_progress(&config, progress.as_mut()),
        &config.root,
    )?;
    drop(progress);

    formatter.format_pack_result(&config.output, &report)
}
