// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! File I/O round trips through the `image` crate.

use mosquito_core::io::{load_image, save_image};
use mosquito_core::{decode, encode, EncodeOptions, Mode, PixelBuffer};

#[test]
fn png_preserves_hidden_payload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stego.png");

    let cover = PixelBuffer::color_grid(64, 32);
    let opts = EncodeOptions::new(Mode::Lsb8).with_password("hunter2");
    let stego = encode(&cover, b"written to disk", &opts).unwrap();
    save_image(&stego, &path).unwrap();

    let loaded = load_image(&path).unwrap();
    assert_eq!(loaded, stego);
    assert_eq!(decode(&loaded, "hunter2").unwrap().payload, b"written to disk");
}

#[test]
fn unknown_extension_written_as_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stego.out");

    let cover = PixelBuffer::color_grid(16, 8);
    let stego = encode(&cover, b"hi", &EncodeOptions::new(Mode::Lsb4)).unwrap();
    save_image(&stego, &path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    assert_eq!(decode(&load_image(&path).unwrap(), "").unwrap().payload, b"hi");
}

#[test]
fn jpeg_output_is_loadable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cover.jpg");

    let cover = PixelBuffer::color_grid(32, 16);
    save_image(&cover, &path).unwrap();
    let loaded = load_image(&path).unwrap();
    assert_eq!((loaded.width(), loaded.height()), (32, 16));
}

#[test]
fn gif_output_is_loadable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cover.gif");

    let cover = PixelBuffer::color_grid(16, 8);
    save_image(&cover, &path).unwrap();
    let loaded = load_image(&path).unwrap();
    assert_eq!((loaded.width(), loaded.height()), (16, 8));
}
