// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// process — HPHEX batch filter.
//
// Entry point. Parses arguments, loads configuration, initialises logging, and
// runs every input/output pair through blur and normalize, stopping at the
// first failure.

mod args;

use std::process::ExitCode;

use clap::Parser;
use hphex_core::HphexError;
use hphex_core::human_errors::{Severity, humanize_error};
use hphex_filter::{FileReport, NormalizeOutcome, run_batch};

use args::Cli;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version land here too and are not failures.
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let pairs = match cli.pairs() {
        Ok(pairs) => pairs,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(err) => {
            report_error(&err);
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(pairs = pairs.len(), "HPHEX batch starting");

    let result = run_batch(&pairs, &config, |file| {
        if config.report_range {
            report_range(file);
        }
    });

    match result {
        Ok(report) => {
            tracing::info!(files = report.files.len(), "All images processed");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "Batch aborted");
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}

/// Print the range normalize stretched, or note that it left the image alone.
fn report_range(file: &FileReport) {
    match file.outcome {
        NormalizeOutcome::Stretched { min, max } => {
            println!("Minimum value: {min}");
            println!("Maximum value: {max}");
        }
        NormalizeOutcome::AlreadyNormalized => eprintln!("Image is already normalised."),
    }
}

fn report_error(err: &HphexError) {
    let human = humanize_error(err);
    let label = match human.severity {
        Severity::Permanent => "error",
        Severity::ActionRequired => "action required",
        Severity::Transient => "transient error",
    };
    eprintln!("{label}: {}", human.message);
    eprintln!("  cause: {}", err.root());
    eprintln!("  hint: {}", human.suggestion);
}
