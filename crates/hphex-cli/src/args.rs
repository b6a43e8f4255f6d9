// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line surface of the `process` binary.

use std::path::PathBuf;

use clap::Parser;
use hphex_core::config::AppConfig;
use hphex_core::error::Result;
use hphex_filter::FilePair;

/// Blur and normalize HPHEX images, writing each result to its paired output.
#[derive(Parser, Debug)]
#[command(
    name = "process",
    version,
    override_usage = "process [OPTIONS] INPUTFILE1 OUTPUTFILE1 [INPUTFILE2 OUTPUTFILE2 ...]"
)]
pub struct Cli {
    /// JSON configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Decode every input before writing any output
    #[arg(long)]
    pub preload: bool,

    /// Do not print the per-image minimum/maximum report
    #[arg(short, long)]
    pub quiet: bool,

    /// Input and output files, in pairs
    #[arg(value_name = "PATHS")]
    pub paths: Vec<PathBuf>,
}

impl Cli {
    /// The positional paths grouped into input/output pairs.
    pub fn pairs(&self) -> Result<Vec<FilePair>> {
        FilePair::from_args(self.paths.iter().cloned())
    }

    /// Settings from `--config` (or defaults) with command-line flags applied
    /// on top.
    pub fn resolve_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };
        if self.preload {
            config.preload_inputs = true;
        }
        if self.quiet {
            config.report_range = false;
        }
        Ok(config)
    }
}
