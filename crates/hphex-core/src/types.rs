// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core image types — 16-bit RGB pixels and the row-major image grid.

use crate::error::{HphexError, Result};

/// Largest value a single channel can hold.
pub const MAX_CHANNEL: u16 = u16::MAX;

/// One RGB pixel with three independent 16-bit channels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel::splat(0);
    pub const WHITE: Pixel = Pixel::splat(MAX_CHANNEL);

    pub const fn new(red: u16, green: u16, blue: u16) -> Self {
        Self { red, green, blue }
    }

    /// A gray pixel with every channel set to `value`.
    pub const fn splat(value: u16) -> Self {
        Self::new(value, value, value)
    }

    /// Channels in `[red, green, blue]` order.
    pub const fn channels(&self) -> [u16; 3] {
        [self.red, self.green, self.blue]
    }

    /// Apply `f` to each channel independently.
    pub fn map(self, mut f: impl FnMut(u16) -> u16) -> Self {
        Self::new(f(self.red), f(self.green), f(self.blue))
    }
}

impl From<[u16; 3]> for Pixel {
    fn from([red, green, blue]: [u16; 3]) -> Self {
        Self::new(red, green, blue)
    }
}

/// A raster image held entirely in memory.
///
/// Pixels are stored densely in row-major order; the buffer length always
/// equals `height * width`. A zero-sized image has an empty buffer and is
/// valid.
#[derive(Debug, PartialEq, Eq)]
pub struct Image {
    height: usize,
    width: usize,
    pixels: Vec<Pixel>,
}

impl Image {
    // -- Construction ---------------------------------------------------------

    /// Create a `height` x `width` image filled with `fill`.
    ///
    /// Fails with [`HphexError::Allocation`] when the buffer cannot be
    /// reserved, including when `height * width` overflows.
    pub fn filled(height: usize, width: usize, fill: Pixel) -> Result<Self> {
        let len = pixel_count(height, width)?;
        let mut pixels = try_alloc(len)?;
        pixels.resize(len, fill);
        Ok(Self {
            height,
            width,
            pixels,
        })
    }

    /// Create a black `height` x `width` image.
    pub fn new(height: usize, width: usize) -> Result<Self> {
        Self::filled(height, width, Pixel::BLACK)
    }

    /// Wrap an existing row-major pixel buffer.
    pub fn from_pixels(height: usize, width: usize, pixels: Vec<Pixel>) -> Result<Self> {
        let expected = height
            .checked_mul(width)
            .ok_or_else(|| HphexError::DimensionMismatch {
                height,
                width,
                expected: usize::MAX,
                actual: pixels.len(),
            })?;
        if pixels.len() != expected {
            return Err(HphexError::DimensionMismatch {
                height,
                width,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            height,
            width,
            pixels,
        })
    }

    /// Build an image by evaluating `f(y, x)` for every pixel.
    pub fn from_fn(
        height: usize,
        width: usize,
        mut f: impl FnMut(usize, usize) -> Pixel,
    ) -> Result<Self> {
        let len = pixel_count(height, width)?;
        let mut pixels = try_alloc(len)?;
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(y, x));
            }
        }
        Ok(Self {
            height,
            width,
            pixels,
        })
    }

    /// Copy this image into a freshly allocated one.
    pub fn try_clone(&self) -> Result<Self> {
        let mut pixels = try_alloc(self.pixels.len())?;
        pixels.extend_from_slice(&self.pixels);
        Ok(Self {
            height: self.height,
            width: self.width,
            pixels,
        })
    }

    // -- Accessors ------------------------------------------------------------

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Flat buffer offset of `(y, x)`, or `None` when out of bounds.
    pub fn index_of(&self, y: usize, x: usize) -> Option<usize> {
        (y < self.height && x < self.width).then(|| y * self.width + x)
    }

    pub fn get(&self, y: usize, x: usize) -> Option<&Pixel> {
        self.index_of(y, x).map(|i| &self.pixels[i])
    }

    pub fn get_mut(&mut self, y: usize, x: usize) -> Option<&mut Pixel> {
        self.index_of(y, x).map(move |i| &mut self.pixels[i])
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    /// Iterate over rows, top to bottom. Yields nothing for zero-width images.
    pub fn rows(&self) -> impl Iterator<Item = &[Pixel]> {
        // chunks_exact panics on a zero chunk size.
        self.pixels.chunks_exact(self.width.max(1))
    }

    /// Smallest and largest channel value across the whole image, or `None`
    /// for an empty image.
    pub fn channel_range(&self) -> Option<(u16, u16)> {
        self.pixels
            .iter()
            .flat_map(Pixel::channels)
            .fold(None, |range, value| match range {
                None => Some((value, value)),
                Some((lo, hi)) => Some((lo.min(value), hi.max(value))),
            })
    }
}

/// `height * width`, failing instead of wrapping.
fn pixel_count(height: usize, width: usize) -> Result<usize> {
    height.checked_mul(width).ok_or_else(|| {
        HphexError::Allocation(format!("{height}x{width} image exceeds addressable size"))
    })
}

/// An empty pixel buffer with room for exactly `len` pixels.
pub fn try_alloc(len: usize) -> Result<Vec<Pixel>> {
    let mut pixels = Vec::new();
    pixels.try_reserve_exact(len).map_err(|err| {
        HphexError::Allocation(format!("cannot reserve {len} pixels: {err}"))
    })?;
    Ok(pixels)
}
