// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Operator-facing error messages.
//
// Every technical error is mapped to a short plain statement plus a concrete
// next step. Severity tells the caller whether the operator has to change
// something before re-running the batch.

use crate::error::HphexError;

/// Severity of an error from the operator's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Something outside the input data went wrong (disk full, out of memory).
    Transient,
    /// The operator must fix the invocation or the filesystem.
    ActionRequired,
    /// The input data itself is unusable.
    Permanent,
}

/// A readable error with a plain message and an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    pub message: String,
    pub suggestion: String,
    pub severity: Severity,
}

/// Convert an `HphexError` into a `HumanError`.
///
/// Stage wrappers (`Load`, `Blur`, `Save`) keep the file name in the message
/// and take their suggestion from the underlying cause.
pub fn humanize_error(err: &HphexError) -> HumanError {
    match err {
        HphexError::Load { path, source } => HumanError {
            message: format!("Failed to load image {}.", path.display()),
            ..humanize_error(source)
        },
        HphexError::Blur { path, source } => HumanError {
            message: format!("First process failed for image {}.", path.display()),
            ..humanize_error(source)
        },
        HphexError::Save { path, source } => HumanError {
            message: format!("Saving image to {} failed.", path.display()),
            ..humanize_error(source)
        },

        HphexError::Open { path, source } => humanize_io(&format!("file {}", path.display()), source),
        HphexError::Write { path, source } => HumanError {
            message: format!("File {} could not be written.", path.display()),
            ..humanize_io(&format!("file {}", path.display()), source)
        },

        HphexError::Format(detail) => HumanError {
            message: "The image data is not valid HPHEX.".into(),
            suggestion: format!(
                "Expected 'HPHEX <height> <width>' followed by height*width triples of hex values. ({detail})"
            ),
            severity: Severity::Permanent,
        },

        HphexError::DimensionMismatch { .. } => HumanError {
            message: "The image dimensions do not match its pixel data.".into(),
            suggestion: err.to_string(),
            severity: Severity::Permanent,
        },

        HphexError::Allocation(_) => HumanError {
            message: "There was not enough memory to hold the image.".into(),
            suggestion: "Close other programs or process fewer or smaller images at a time.".into(),
            severity: Severity::Transient,
        },

        HphexError::Config(detail) => HumanError {
            message: "The configuration file could not be used.".into(),
            suggestion: format!("Fix the configuration file and try again. ({detail})"),
            severity: Severity::ActionRequired,
        },

        HphexError::Serialization(detail) => HumanError {
            message: "The configuration file is not valid JSON.".into(),
            suggestion: format!("Fix the configuration file and try again. ({detail})"),
            severity: Severity::ActionRequired,
        },

        HphexError::Usage(usage) => HumanError {
            message: usage.clone(),
            suggestion: "Pass input and output files in pairs.".into(),
            severity: Severity::ActionRequired,
        },
    }
}

fn humanize_io(what: &str, io_err: &std::io::Error) -> HumanError {
    match io_err.kind() {
        std::io::ErrorKind::NotFound => HumanError {
            message: format!("Could not find {what}."),
            suggestion: "Check that the path exists and is spelled correctly.".into(),
            severity: Severity::ActionRequired,
        },
        std::io::ErrorKind::PermissionDenied => HumanError {
            message: format!("Permission denied for {what}."),
            suggestion: "Check the file and directory permissions.".into(),
            severity: Severity::ActionRequired,
        },
        _ => HumanError {
            message: format!("There was a problem reading or writing {what}."),
            suggestion: format!("Try again. If this keeps happening, check free disk space. ({io_err})"),
            severity: Severity::Transient,
        },
    }
}
