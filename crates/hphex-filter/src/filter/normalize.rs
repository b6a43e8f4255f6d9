// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Global min-max normalization (contrast stretch) to the full 16-bit range.

use hphex_core::types::{Image, MAX_CHANNEL};
use tracing::{debug, info, instrument};

/// What [`normalize`] did to an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeOutcome {
    /// Every channel of every pixel holds the same value (or the image is
    /// empty); nothing was changed.
    AlreadyNormalized,
    /// Channels were rescaled from `min..=max` onto `0..=65535`.
    Stretched { min: u16, max: u16 },
}

/// Stretch the dynamic range of `image` in place.
///
/// One minimum and one maximum are taken across all three channels of all
/// pixels, and every channel is rewritten as `trunc((value - min) * scale)`
/// with `scale = 65535 / (max - min)`. Both the scale and the product are
/// computed in `f32` and the result is truncated toward zero, so the new
/// maximum can land one unit short of 65535 for some ranges.
///
/// Flat images are left untouched and reported as
/// [`NormalizeOutcome::AlreadyNormalized`].
#[instrument(skip_all, fields(height = image.height(), width = image.width()))]
pub fn normalize(image: &mut Image) -> NormalizeOutcome {
    let Some((min, max)) = image.channel_range().filter(|(min, max)| min != max) else {
        debug!("Image is already normalised");
        return NormalizeOutcome::AlreadyNormalized;
    };

    let scale = f32::from(MAX_CHANNEL) / f32::from(max - min);
    info!(min, max, scale, "Stretching dynamic range");

    for pixel in image.pixels_mut() {
        *pixel = pixel.map(|value| stretch(value, min, scale));
    }

    NormalizeOutcome::Stretched { min, max }
}

fn stretch(value: u16, min: u16, scale: f32) -> u16 {
    // trunc() keeps the result in 0..=65535, so the cast is lossless.
    (f32::from(value - min) * scale).trunc() as u16
}
