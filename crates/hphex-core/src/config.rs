// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{HphexError, Result};

/// Settings for a batch run. Filter behaviour itself is fixed; these only
/// shape how the batch is driven and reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Tracing filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Print the min/max found by normalization for each image.
    pub report_range: bool,
    /// Decode every input before writing any output.
    pub preload_inputs: bool,
    /// Create missing parent directories of output paths.
    pub create_output_dirs: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: "warn".into(),
            report_range: true,
            preload_inputs: false,
            create_output_dirs: false,
        }
    }
}

impl AppConfig {
    /// Load settings from a JSON file. Missing keys keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| HphexError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|err| {
            HphexError::Config(format!("{}: {}", path.display(), err))
        })
    }

    /// Parse settings from a JSON document.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        if config.log_filter.trim().is_empty() {
            return Err(HphexError::Config("log_filter must not be empty".into()));
        }
        Ok(config)
    }
}
