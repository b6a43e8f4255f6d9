// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// HPHEX codec — the ASCII "HPHEX <height> <width> rrrr gggg bbbb ..." format.

pub mod reader;
pub mod writer;

pub use reader::{decode, read_file};
pub use writer::{WriteSummary, encode, hash_bytes, write_file};

/// Leading token of every HPHEX file.
pub const MAGIC: &str = "HPHEX";
