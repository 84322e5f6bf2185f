// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Owned RGBA8 pixel grid.
//!
//! Pixels are stored row-major, four bytes each (R, G, B, A), with no row
//! padding. Row-major storage order is also the embedding traversal order.

use image::error::{ParameterError, ParameterErrorKind};
use image::ImageError;

use crate::stego::error::StegoError;

/// Bytes per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// An owned, mutable 2-D grid of RGBA8 pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// All-zero buffer (transparent black).
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * CHANNELS;
        Self { width, height, data: vec![0u8; len] }
    }

    /// Wrap raw RGBA8 bytes.
    ///
    /// # Errors
    /// [`StegoError::InvalidImage`] if `data.len() != width * height * 4`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, StegoError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|p| p.checked_mul(CHANNELS));
        if expected != Some(data.len()) {
            return Err(dimension_mismatch());
        }
        Ok(Self { width, height, data })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// RGBA value at `(x, y)`. Panics if out of bounds.
    pub fn get(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Overwrite the pixel at `(x, y)`. Panics if out of bounds.
    pub fn set(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = self.offset(x, y);
        self.data[i..i + CHANNELS].copy_from_slice(&rgba);
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// True if every pixel has R == G == B.
    pub fn is_grayscale(&self) -> bool {
        self.data
            .chunks_exact(CHANNELS)
            .all(|px| px[0] == px[1] && px[1] == px[2])
    }

    /// Opaque 4x2 grid of red, green, blue, yellow / cyan, magenta, white, black.
    ///
    /// Pixels right of `4 * (width / 4)` or below `2 * (height / 2)` stay
    /// transparent black.
    pub fn color_grid(width: u32, height: u32) -> Self {
        const COLORS: [[u8; 4]; 8] = [
            [255, 0, 0, 255],
            [0, 255, 0, 255],
            [0, 0, 255, 255],
            [255, 255, 0, 255],
            [0, 255, 255, 255],
            [255, 0, 255, 255],
            [255, 255, 255, 255],
            [0, 0, 0, 255],
        ];

        let mut img = Self::new(width, height);
        let bw = width / 4;
        let bh = height / 2;
        for (idx, color) in COLORS.iter().enumerate() {
            let gx = idx as u32 % 4;
            let gy = idx as u32 / 4;
            for y in gy * bh..(gy + 1) * bh {
                for x in gx * bw..(gx + 1) * bw {
                    img.set(x, y, *color);
                }
            }
        }
        img
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }
}

fn dimension_mismatch() -> StegoError {
    StegoError::InvalidImage(ImageError::Parameter(ParameterError::from_kind(
        ParameterErrorKind::DimensionMismatch,
    )))
}

impl From<image::RgbaImage> for PixelBuffer {
    fn from(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self { width, height, data: img.into_raw() }
    }
}

impl TryFrom<PixelBuffer> for image::RgbaImage {
    type Error = StegoError;

    fn try_from(buf: PixelBuffer) -> Result<Self, StegoError> {
        let (width, height) = (buf.width, buf.height);
        image::RgbaImage::from_raw(width, height, buf.data).ok_or_else(dimension_mismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_validates_length() {
        assert!(PixelBuffer::from_raw(2, 2, vec![0; 16]).is_ok());
        assert!(matches!(
            PixelBuffer::from_raw(2, 2, vec![0; 15]),
            Err(StegoError::InvalidImage(_))
        ));
    }

    #[test]
    fn get_set_row_major() {
        let mut img = PixelBuffer::new(3, 2);
        img.set(2, 1, [1, 2, 3, 4]);
        assert_eq!(img.get(2, 1), [1, 2, 3, 4]);
        // (2, 1) is the last pixel of a 3x2 grid.
        assert_eq!(&img.as_raw()[20..24], &[1, 2, 3, 4]);
    }

    #[test]
    fn color_grid_corners() {
        let img = PixelBuffer::color_grid(8, 4);
        assert_eq!(img.get(0, 0), [255, 0, 0, 255]);
        assert_eq!(img.get(7, 0), [255, 255, 0, 255]);
        assert_eq!(img.get(0, 3), [0, 255, 255, 255]);
        assert_eq!(img.get(7, 3), [0, 0, 0, 255]);
        assert!(!img.is_grayscale());
    }

    #[test]
    fn grayscale_detection() {
        let mut img = PixelBuffer::new(2, 1);
        img.set(0, 0, [10, 10, 10, 255]);
        img.set(1, 0, [200, 200, 200, 0]);
        assert!(img.is_grayscale());
        img.set(1, 0, [200, 201, 200, 0]);
        assert!(!img.is_grayscale());
    }

    #[test]
    fn rgba_image_conversion_roundtrip() {
        let img = PixelBuffer::color_grid(4, 2);
        let rgba = image::RgbaImage::try_from(img.clone()).unwrap();
        assert_eq!(rgba.dimensions(), (4, 2));
        assert_eq!(PixelBuffer::from(rgba), img);
    }

    #[test]
    fn rgba_image_conversion_keeps_every_pixel() {
        let img = PixelBuffer::color_grid(8, 4);
        let rgba = image::RgbaImage::try_from(img.clone()).unwrap();
        for (x, y, px) in rgba.enumerate_pixels() {
            assert_eq!(px.0, img.get(x, y));
        }
    }
}
