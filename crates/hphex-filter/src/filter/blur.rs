// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// 3x3 box blur with edge-aware divisors.

use hphex_core::error::Result;
use hphex_core::types::{Image, Pixel};
use tracing::{debug, instrument};

/// Blur `source` with a 3x3 box filter, returning a new image.
///
/// Each output channel is the truncated integer mean of that channel over the
/// in-bounds cells of the 3x3 neighbourhood around the pixel. Border pixels
/// divide by the number of cells actually summed (4 in a corner, 6 along an
/// edge) rather than 9, so edges are not darkened.
///
/// `source` is only read; all writes go to the freshly allocated output. The
/// only failure is [`HphexError::Allocation`](hphex_core::HphexError::Allocation).
#[instrument(skip_all, fields(height = source.height(), width = source.width()))]
pub fn blur(source: &Image) -> Result<Image> {
    let output = Image::from_fn(source.height(), source.width(), |y, x| {
        neighbourhood_mean(source, y, x)
    })?;
    debug!("Blur complete");
    Ok(output)
}

fn neighbourhood_mean(source: &Image, y: usize, x: usize) -> Pixel {
    let mut sums = [0u32; 3];
    let mut count = 0u32;

    for dy in -1..=1 {
        for dx in -1..=1 {
            let (Some(ny), Some(nx)) = (y.checked_add_signed(dy), x.checked_add_signed(dx)) else {
                continue;
            };
            let Some(pixel) = source.get(ny, nx) else {
                continue;
            };
            for (sum, value) in sums.iter_mut().zip(pixel.channels()) {
                *sum += u32::from(value);
            }
            count += 1;
        }
    }

    // The centre cell is always in bounds, so count >= 1, and a mean of u16
    // values fits back into u16.
    let [red, green, blue] = sums.map(|sum| (sum / count) as u16);
    Pixel::new(red, green, blue)
}
