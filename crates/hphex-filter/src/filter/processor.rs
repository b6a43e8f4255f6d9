// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — chains decode, blur, normalize, and encode over a single
// in-memory HPHEX image.

use std::path::Path;

use hphex_core::error::Result;
use hphex_core::types::Image;
use tracing::{info, instrument};

use crate::codec::{self, WriteSummary};
use crate::filter::blur::blur;
use crate::filter::normalize::{NormalizeOutcome, normalize};

/// Processing pipeline operating on a single in-memory image.
///
/// Every step consumes `self` and returns the processor for the next step, so
/// exactly one image is owned at a time and superseded images are dropped as
/// soon as the next one exists.
///
/// ```ignore
/// let summary = ImageProcessor::open("in.hphex")?
///     .blur()?
///     .normalize()
///     .save("out.hphex")?;
/// ```
#[derive(Debug)]
pub struct ImageProcessor {
    /// The current working image.
    image: Image,
    /// Result of the most recent [`ImageProcessor::normalize`] step.
    normalized: Option<NormalizeOutcome>,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Load and decode an HPHEX file.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let image = codec::read_file(path)?;
        info!(
            height = image.height(),
            width = image.width(),
            "Image loaded"
        );
        Ok(Self::from_image(image))
    }

    /// Decode HPHEX bytes already in memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        codec::decode(data).map(Self::from_image)
    }

    /// Wrap an already-decoded image.
    pub fn from_image(image: Image) -> Self {
        Self {
            image,
            normalized: None,
        }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn height(&self) -> usize {
        self.image.height()
    }

    pub fn width(&self) -> usize {
        self.image.width()
    }

    /// Borrow the current image.
    pub fn as_image(&self) -> &Image {
        &self.image
    }

    /// Outcome of the last normalize step, if one has run.
    pub fn normalize_outcome(&self) -> Option<NormalizeOutcome> {
        self.normalized
    }

    // -- Filters (consume self, return new Self) ------------------------------

    /// Replace the image with its 3x3 blur. The previous image is dropped once
    /// the blurred copy exists.
    pub fn blur(self) -> Result<Self> {
        let blurred = blur(&self.image)?;
        Ok(Self {
            image: blurred,
            normalized: None,
        })
    }

    /// Stretch the image's dynamic range.
    pub fn normalize(mut self) -> Self {
        self.normalize_in_place();
        self
    }

    /// Stretch the image's dynamic range without giving up the processor,
    /// returning what was done.
    pub fn normalize_in_place(&mut self) -> NormalizeOutcome {
        let outcome = normalize(&mut self.image);
        self.normalized = Some(outcome);
        outcome
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the current image as HPHEX bytes.
    pub fn to_hphex_bytes(&self) -> Vec<u8> {
        codec::encode(&self.image)
    }

    /// Write the current image to `path`.
    ///
    /// Borrows rather than consumes so callers can still read dimensions and
    /// the normalize outcome after the file is written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<WriteSummary> {
        codec::write_file(&self.image, path)
    }
}
