// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// HPHEX reader — strict, fail-fast parsing of the text format into an `Image`.

use std::path::Path;

use hphex_core::error::{HphexError, Result};
use hphex_core::types::{Image, Pixel, try_alloc};
use tracing::{debug, instrument, warn};

use super::MAGIC;

/// Minimum bytes a pixel record can occupy: three 1-digit tokens, each
/// preceded by a separator.
const MIN_RECORD_LEN: usize = 6;

/// Hex digits allowed per channel token.
const MAX_CHANNEL_DIGITS: usize = 4;

const CHANNEL_NAMES: [&str; 3] = ["red", "green", "blue"];

/// Parse HPHEX bytes into an [`Image`].
///
/// The input must start with the `HPHEX` magic, then height and width as
/// non-negative decimal integers, then exactly `height * width` records of
/// three hexadecimal channel tokens (at most four digits each). Tokens are
/// separated by any run of ASCII whitespace, vertical tab included.
///
/// Any missing or malformed token fails with [`HphexError::Format`]; no
/// partially populated image is ever returned. Bytes after the last record
/// are ignored.
#[instrument(skip_all, fields(bytes_len = bytes.len()))]
pub fn decode(bytes: &[u8]) -> Result<Image> {
    if !bytes.starts_with(MAGIC.as_bytes()) {
        return Err(HphexError::Format(format!(
            "input does not start with {MAGIC}"
        )));
    }

    let mut tokens = Tokens::new(bytes);
    let magic = tokens.next().unwrap_or_default();
    if magic != MAGIC.as_bytes() {
        return Err(HphexError::Format(format!(
            "expected {MAGIC} magic, found {:?}",
            preview(magic)
        )));
    }

    let height = parse_dimension(tokens.next(), "height")?;
    let width = parse_dimension(tokens.next(), "width")?;
    let count = height.checked_mul(width).ok_or_else(|| {
        HphexError::Format(format!("{height}x{width} dimensions overflow"))
    })?;
    debug!(height, width, "HPHEX header parsed");

    // Never reserve more than the remaining bytes could possibly hold, so a
    // lying header cannot force a huge allocation before truncation is seen.
    let mut pixels = try_alloc(count.min(tokens.remaining() / MIN_RECORD_LEN))?;

    for index in 0..count {
        let mut channels = [0u16; 3];
        for (slot, name) in channels.iter_mut().zip(CHANNEL_NAMES) {
            *slot = parse_channel(tokens.next(), index, width, name)?;
        }
        pixels.push(Pixel::from(channels));
    }

    if tokens.next().is_some() {
        warn!(height, width, "Ignoring trailing data after the last pixel record");
    }

    Image::from_pixels(height, width, pixels)
}

/// Read and decode the HPHEX file at `path`.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn read_file(path: impl AsRef<Path>) -> Result<Image> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| HphexError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let image = decode(&bytes)?;
    debug!(
        height = image.height(),
        width = image.width(),
        "Image loaded"
    );
    Ok(image)
}

// -- Tokenizer ----------------------------------------------------------------

/// Whitespace-separated tokens over raw bytes.
struct Tokens<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Bytes not yet consumed.
    fn remaining(&self) -> usize {
        self.input.len() - self.pos
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        let rest = &self.input[self.pos..];
        let start = rest.iter().position(|&b| !is_separator(b))?;
        let len = rest[start..]
            .iter()
            .position(|&b| is_separator(b))
            .unwrap_or(rest.len() - start);
        self.pos += start + len;
        Some(&rest[start..start + len])
    }
}

/// ASCII whitespace including vertical tab.
fn is_separator(byte: u8) -> bool {
    byte.is_ascii_whitespace() || byte == 0x0b
}

// -- Field parsers ------------------------------------------------------------

fn parse_dimension(token: Option<&[u8]>, field: &str) -> Result<usize> {
    let token = token.ok_or_else(|| HphexError::Format(format!("missing image {field}")))?;
    if !token.iter().all(u8::is_ascii_digit) {
        return Err(HphexError::Format(format!(
            "image {field} must be a non-negative decimal integer, found {:?}",
            preview(token)
        )));
    }
    token.iter().try_fold(0usize, |acc, &digit| {
        acc.checked_mul(10)
            .and_then(|acc| acc.checked_add(usize::from(digit - b'0')))
            .ok_or_else(|| HphexError::Format(format!("image {field} is too large")))
    })
}

fn parse_channel(token: Option<&[u8]>, index: usize, width: usize, channel: &str) -> Result<u16> {
    let locate = || format!("pixel {index} (row {}, column {})", index / width, index % width);

    let token = token.ok_or_else(|| {
        HphexError::Format(format!("{}: missing {channel} channel", locate()))
    })?;
    if token.len() > MAX_CHANNEL_DIGITS {
        return Err(HphexError::Format(format!(
            "{}: {channel} value {:?} has more than {MAX_CHANNEL_DIGITS} hex digits",
            locate(),
            preview(token)
        )));
    }
    token.iter().try_fold(0u16, |acc, &byte| -> Result<u16> {
        let digit = char::from(byte).to_digit(16).ok_or_else(|| {
            HphexError::Format(format!(
                "{}: {channel} value {:?} is not hexadecimal",
                locate(),
                preview(token)
            ))
        })?;
        // At most four digits, so this never exceeds u16::MAX.
        Ok((acc << 4) | digit as u16)
    })
}

/// Short printable excerpt of a token for error messages.
fn preview(token: &[u8]) -> String {
    String::from_utf8_lossy(token).chars().take(16).collect()
}
