// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// HPHEX writer — serialize an `Image` back to the text format and fingerprint
// what was written.

use std::path::Path;

use hphex_core::error::{HphexError, Result};
use hphex_core::types::{Image, Pixel};
use sha2::{Digest, Sha256};
use tracing::{debug, instrument};

use super::MAGIC;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Bytes per encoded pixel: three 4-digit tokens, each followed by a space.
const RECORD_LEN: usize = 15;

/// Size and SHA-256 of an encoded image written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    pub bytes: usize,
    /// Lowercase hex SHA-256 of the written bytes.
    pub sha256: String,
}

/// Encode `image` as HPHEX bytes.
///
/// Emits `HPHEX <height> <width> ` followed by every pixel in row-major order
/// as three zero-padded, lowercase, 4-digit hex tokens, each followed by a
/// single space.
pub fn encode(image: &Image) -> Vec<u8> {
    let header = format!("{MAGIC} {} {} ", image.height(), image.width());
    let mut out = Vec::with_capacity(header.len() + image.pixels().len() * RECORD_LEN);
    out.extend_from_slice(header.as_bytes());
    for row in image.rows() {
        for value in row.iter().flat_map(Pixel::channels) {
            push_channel(&mut out, value);
        }
    }
    out
}

/// Encode `image` and write it to `path`, replacing any existing file.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn write_file(image: &Image, path: impl AsRef<Path>) -> Result<WriteSummary> {
    let path = path.as_ref();
    let bytes = encode(image);
    std::fs::write(path, &bytes).map_err(|source| HphexError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    let summary = WriteSummary {
        bytes: bytes.len(),
        sha256: hash_bytes(&bytes),
    };
    debug!(bytes = summary.bytes, sha256 = %summary.sha256, "Image written");
    Ok(summary)
}

/// SHA-256 of `data` as a lowercase hex string.
pub fn hash_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

fn push_channel(out: &mut Vec<u8>, value: u16) {
    for shift in [12, 8, 4, 0] {
        out.push(HEX_DIGITS[usize::from((value >> shift) & 0xf)]);
    }
    out.push(b' ');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode;

    #[test]
    fn encodes_fixed_width_lowercase_tokens() {
        let image = Image::from_pixels(
            1,
            2,
            vec![Pixel::new(0x0001, 0xff00, 0xabcd), Pixel::new(0, 0x0a0b, 0xffff)],
        )
        .expect("valid");
        let text = String::from_utf8(encode(&image)).expect("ascii");
        assert_eq!(text, "HPHEX 1 2 0001 ff00 abcd 0000 0a0b ffff ");
    }

    #[test]
    fn rows_are_written_top_to_bottom() {
        let image = Image::from_fn(2, 2, |y, x| Pixel::splat((y * 2 + x) as u16)).expect("alloc");
        let text = String::from_utf8(encode(&image)).expect("ascii");
        assert_eq!(
            text,
            "HPHEX 2 2 0000 0000 0000 0001 0001 0001 0002 0002 0002 0003 0003 0003 "
        );
    }

    #[test]
    fn empty_image_is_header_only() {
        let image = Image::new(0, 3).expect("alloc");
        assert_eq!(encode(&image), b"HPHEX 0 3 ");
    }

    #[test]
    fn round_trips_through_decode() {
        let image = Image::from_fn(3, 4, |y, x| {
            Pixel::new((y * 4 + x) as u16, u16::MAX - x as u16, (y as u16) << 12)
        })
        .expect("alloc");
        let decoded = decode(&encode(&image)).expect("decode");
        assert_eq!(decoded, image);
    }

    #[test]
    fn write_file_reports_size_and_digest() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.hphex");
        let image = Image::filled(1, 1, Pixel::WHITE).expect("alloc");

        let summary = write_file(&image, &path).expect("write");
        let on_disk = std::fs::read(&path).expect("read back");
        assert_eq!(on_disk, b"HPHEX 1 1 ffff ffff ffff ");
        assert_eq!(summary.bytes, on_disk.len());
        assert_eq!(summary.sha256, hash_bytes(&on_disk));
    }

    #[test]
    fn write_file_into_missing_directory_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("out.hphex");
        let image = Image::new(1, 1).expect("alloc");
        let err = write_file(&image, &path).unwrap_err();
        assert!(matches!(err, HphexError::Write { .. }));
    }

    #[test]
    fn hash_of_empty_input() {
        assert_eq!(
            hash_bytes(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
