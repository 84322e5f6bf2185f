// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Image file loading and saving.
//!
//! Decoding accepts anything the `image` crate recognises (PNG, JPEG, GIF,
//! BMP, TIFF, WEBP). Saving picks the encoder from the file extension and
//! falls back to PNG. Note that JPEG output is lossy and destroys LSB data.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, ImageReader};
use log::debug;

use crate::stego::error::StegoError;
use crate::stego::pixels::PixelBuffer;

/// JPEG quality used when saving `.jpg` / `.jpeg`.
pub const JPEG_QUALITY: u8 = 95;

/// Output encoding chosen for a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
    Gif,
}

/// Pick the output format from the (case-insensitive) extension.
pub fn output_format(path: &Path) -> OutputFormat {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg" | "jpeg") => OutputFormat::Jpeg,
        Some("gif") => OutputFormat::Gif,
        _ => OutputFormat::Png,
    }
}

/// Load and decode an image file into an RGBA8 buffer.
///
/// # Errors
/// [`StegoError::InvalidImage`] if the file is missing, unreadable, or not a
/// supported image.
pub fn load_image(path: impl AsRef<Path>) -> Result<PixelBuffer, StegoError> {
    let path = path.as_ref();
    // Sniff the content so files with unusual extensions still load.
    let img = ImageReader::open(path)
        .and_then(ImageReader::with_guessed_format)
        .map_err(image::ImageError::IoError)?
        .decode()?;
    debug!("loaded {} ({}x{})", path.display(), img.width(), img.height());
    Ok(PixelBuffer::from(img.into_rgba8()))
}

/// Encode `img` and write it to `path`.
///
/// # Errors
/// [`StegoError::InvalidImage`] on I/O or encoder failure.
pub fn save_image(img: &PixelBuffer, path: impl AsRef<Path>) -> Result<(), StegoError> {
    let path = path.as_ref();
    let format = output_format(path);
    let rgba = image::RgbaImage::try_from(img.clone())?;

    let file = File::create(path).map_err(image::ImageError::IoError)?;
    let mut writer = BufWriter::new(file);

    match format {
        OutputFormat::Png => rgba.write_to(&mut writer, ImageFormat::Png)?,
        OutputFormat::Jpeg => {
            // JPEG has no alpha channel.
            let rgb = DynamicImage::ImageRgba8(rgba).into_rgb8();
            rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY))?;
        }
        OutputFormat::Gif => {
            let mut encoder = GifEncoder::new(&mut writer);
            encoder.encode_frame(image::Frame::new(rgba))?;
        }
    }
    writer.flush().map_err(image::ImageError::IoError)?;

    debug!("saved {} as {format:?}", path.display());
    Ok(())
}
