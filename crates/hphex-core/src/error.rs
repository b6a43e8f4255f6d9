// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for HPHEX.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all HPHEX operations.
#[derive(Debug, Error)]
pub enum HphexError {
    // -- I/O --
    #[error("file {} could not be opened: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("file {} could not be written: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -- Image data --
    #[error("malformed HPHEX data: {0}")]
    Format(String),

    #[error("allocation failed: {0}")]
    Allocation(String),

    #[error("pixel buffer holds {actual} pixels but a {height}x{width} image needs {expected}")]
    DimensionMismatch {
        height: usize,
        width: usize,
        expected: usize,
        actual: usize,
    },

    // -- Configuration / invocation --
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Usage(String),

    // -- Per-file pipeline stages --
    #[error("failed to load image {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: Box<HphexError>,
    },

    #[error("blur failed for image {}: {source}", path.display())]
    Blur {
        path: PathBuf,
        #[source]
        source: Box<HphexError>,
    },

    #[error("saving image to {} failed: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: Box<HphexError>,
    },
}

impl HphexError {
    /// Wrap `self` as a load failure for the file at `path`.
    pub fn while_loading(self, path: impl Into<PathBuf>) -> Self {
        Self::Load {
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// Wrap `self` as a blur failure for the image read from `path`.
    pub fn while_blurring(self, path: impl Into<PathBuf>) -> Self {
        Self::Blur {
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// Wrap `self` as a save failure for the output at `path`.
    pub fn while_saving(self, path: impl Into<PathBuf>) -> Self {
        Self::Save {
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping any per-file stage wrappers.
    pub fn root(&self) -> &HphexError {
        match self {
            Self::Load { source, .. } | Self::Blur { source, .. } | Self::Save { source, .. } => {
                source.root()
            }
            other => other,
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, HphexError>;
