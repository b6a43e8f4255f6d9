// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Batch pipeline — decode, blur, normalize, and write each input/output pair
// in order, stopping at the first failure.

use std::path::PathBuf;

use hphex_core::config::AppConfig;
use hphex_core::error::{HphexError, Result};
use tracing::{debug, info, instrument};

use crate::filter::normalize::NormalizeOutcome;
use crate::filter::processor::ImageProcessor;

/// Usage line printed when the path arguments do not form pairs.
pub const USAGE: &str = "Usage: process INPUTFILE1 OUTPUTFILE1 [INPUTFILE2 OUTPUTFILE2 ...]";

/// One input file and the path its filtered result is written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePair {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl FilePair {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }

    /// Group `INPUT OUTPUT [INPUT OUTPUT ...]` arguments into pairs.
    ///
    /// Fails with [`HphexError::Usage`] unless there is at least one pair and
    /// the count is even.
    pub fn from_args<I>(args: I) -> Result<Vec<Self>>
    where
        I: IntoIterator,
        I::Item: Into<PathBuf>,
    {
        let paths: Vec<PathBuf> = args.into_iter().map(Into::into).collect();
        if paths.is_empty() || paths.len() % 2 != 0 {
            return Err(HphexError::Usage(USAGE.into()));
        }

        let mut pairs = Vec::with_capacity(paths.len() / 2);
        let mut paths = paths.into_iter();
        while let (Some(input), Some(output)) = (paths.next(), paths.next()) {
            pairs.push(Self::new(input, output));
        }
        Ok(pairs)
    }
}

/// Summary of one successfully processed pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub height: usize,
    pub width: usize,
    pub outcome: NormalizeOutcome,
    /// Size of the written file.
    pub bytes: usize,
    /// Lowercase hex SHA-256 of the written file.
    pub sha256: String,
}

/// Reports for every pair of a batch that completed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
}

/// Process every pair in order.
///
/// Each input is decoded, blurred, normalized, and written to its output.
/// The first failure aborts the batch and is returned wrapped with the file
/// and stage it came from; pairs after it are not touched. `on_file` is
/// called after each pair is written.
///
/// With [`AppConfig::preload_inputs`] every input is decoded before any output
/// is written, so a malformed later input leaves no outputs behind.
#[instrument(skip_all, fields(pairs = pairs.len(), preload = config.preload_inputs))]
pub fn run_batch(
    pairs: &[FilePair],
    config: &AppConfig,
    mut on_file: impl FnMut(&FileReport),
) -> Result<BatchReport> {
    let mut files = Vec::with_capacity(pairs.len());

    if config.preload_inputs {
        let loaded = pairs.iter().map(load).collect::<Result<Vec<_>>>()?;
        debug!(loaded = loaded.len(), "All inputs decoded");
        for (pair, processor) in pairs.iter().zip(loaded) {
            let report = filter_and_save(pair, processor, config)?;
            on_file(&report);
            files.push(report);
        }
    } else {
        for pair in pairs {
            let report = filter_and_save(pair, load(pair)?, config)?;
            on_file(&report);
            files.push(report);
        }
    }

    info!(files = files.len(), "Batch complete");
    Ok(BatchReport { files })
}

/// Decode, blur, normalize, and write a single pair.
pub fn process_pair(pair: &FilePair, config: &AppConfig) -> Result<FileReport> {
    filter_and_save(pair, load(pair)?, config)
}

fn load(pair: &FilePair) -> Result<ImageProcessor> {
    ImageProcessor::open(&pair.input).map_err(|err| err.while_loading(&pair.input))
}

#[instrument(skip_all, fields(input = %pair.input.display(), output = %pair.output.display()))]
fn filter_and_save(
    pair: &FilePair,
    processor: ImageProcessor,
    config: &AppConfig,
) -> Result<FileReport> {
    let mut processor = processor
        .blur()
        .map_err(|err| err.while_blurring(&pair.input))?;
    let outcome = processor.normalize_in_place();

    if config.create_output_dirs {
        if let Some(parent) = pair.output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| {
                HphexError::Write {
                    path: parent.to_path_buf(),
                    source,
                }
                .while_saving(&pair.output)
            })?;
        }
    }

    let summary = processor
        .save(&pair.output)
        .map_err(|err| err.while_saving(&pair.output))?;

    info!(
        height = processor.height(),
        width = processor.width(),
        bytes = summary.bytes,
        sha256 = %summary.sha256,
        "Image processed"
    );

    Ok(FileReport {
        input: pair.input.clone(),
        output: pair.output.clone(),
        height: processor.height(),
        width: processor.width(),
        outcome,
        bytes: summary.bytes,
        sha256: summary.sha256,
    })
}
