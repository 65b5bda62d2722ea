//! `generate-license-file` command-line entry point.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load the optional config file ([`load_config`]) and merge it with the flags.
//! 3. Collect and group dependency licenses ([`LicenseCollector`]).
//! 4. Stream the report to the output file ([`report::write_report`]).
//! 5. Print a summary unless `--quiet`.

mod cli;

use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error};

use cli::{default_output, Cli};
use generate_license_file::config::load_config;
use generate_license_file::report::{self, terminal};
use generate_license_file::{LicenseCollector, NpmScanner};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    run(cli).inspect_err(|e| error!("{:#}", e))
}

fn run(cli: Cli) -> Result<()> {
    let path = cli
        .input
        .canonicalize()
        .unwrap_or_else(|_| cli.input.clone());

    let config = load_config(&path, cli.config.as_deref())?;

    let format = cli.format(config.json);
    let output = cli
        .output
        .clone()
        .or_else(|| config.output.clone())
        .unwrap_or_else(|| default_output(format));
    let eol = cli
        .eol
        .as_ref()
        .map(Into::into)
        .or(config.eol)
        .unwrap_or_default();

    if output.exists() && !(cli.overwrite || config.overwrite) {
        bail!(
            "{} already exists, pass --overwrite to replace it",
            output.display()
        );
    }

    debug!(
        "input={} output={} format={} eol={:?}",
        path.display(),
        output.display(),
        format,
        eol
    );

    let spinner = if !cli.quiet {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
        pb.set_message(format!("Resolving licenses in {}", path.display()));
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let collector = LicenseCollector::with_options(
        NpmScanner::new(),
        config.collect_options(&path, &cli.exclude),
    );
    let result = collector.collect(&path).and_then(|records| {
        report::write_report(&records, &output, format, eol)?;
        Ok(records)
    });

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let records = result.with_context(|| format!("failed to generate {}", output.display()))?;

    if !cli.quiet {
        terminal::render(&records, &output, cli.verbose);
    }

    Ok(())
}
