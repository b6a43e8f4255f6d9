// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// hphex-filter — HPHEX image processing.
//
// Provides the HPHEX text codec (decode, encode, file helpers), the 3x3 blur
// and min-max normalization filters, a chainable image processor, and the
// fail-fast batch pipeline used by the `process` binary.

pub mod codec;
pub mod filter;
pub mod pipeline;

// Re-export the primary entry points so callers can use `hphex_filter::blur` etc.
pub use codec::{decode, encode};
pub use filter::blur::blur;
pub use filter::normalize::{NormalizeOutcome, normalize};
pub use filter::processor::ImageProcessor;
pub use pipeline::{BatchReport, FilePair, FileReport, USAGE, process_pair, run_batch};
