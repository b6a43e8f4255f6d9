// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Filters — 3x3 neighbourhood blur, global min-max normalization, and the
// chainable processor that strings them together.

pub mod blur;
pub mod normalize;
pub mod processor;

pub use processor::ImageProcessor;
