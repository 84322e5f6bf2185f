// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Mosquito CLI - hide and extract data in image pixels.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use log::LevelFilter;
use simple_logger::SimpleLogger;

use mosquito_core::{io, EncodeOptions, Mode, PixelBuffer, StegoError};

#[derive(Parser)]
#[command(name = "mosquito")]
#[command(version)]
#[command(about = "Hide messages and images inside images.", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hide a text message inside an image
    HideMsg {
        /// Input image path
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Output image path
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Text message to hide
        #[arg(short, long, conflicts_with = "file", required_unless_present = "file")]
        message: Option<String>,

        /// File containing the message to hide
        #[arg(short, long, value_name = "FILE")]
        file: Option<PathBuf>,

        /// Password for encrypting the message
        #[arg(short, long, default_value = "")]
        password: String,

        /// Steganography mode (0=LSB1, 1=LSB3, 2=LSB4, 3=LSB8)
        #[arg(short = 'M', long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=3))]
        mode: u8,
    },

    /// Hide an image file inside another image
    HideImg {
        /// Carrier image path
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Output image path
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Image file to hide
        #[arg(short, long, value_name = "FILE")]
        secret: PathBuf,

        /// Password for encrypting the hidden image
        #[arg(short, long, default_value = "")]
        password: String,

        /// Steganography mode (0=LSB1, 1=LSB3, 2=LSB4, 3=LSB8)
        #[arg(short = 'M', long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(0..=3))]
        mode: u8,
    },

    /// Extract hidden data from an image
    Extract {
        /// Steganographic image path
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Output file for the extracted data
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Display extracted data as text
        #[arg(short, long)]
        text: bool,

        /// Password for decrypting the data
        #[arg(short, long, default_value = "")]
        password: String,

        /// Only show the header information
        #[arg(long)]
        info: bool,
    },

    /// Describe an image: hidden-data header, or per-mode capacity
    #[command(visible_alias = "capacity")]
    Info {
        /// Image path
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
    },
}

/// Failure of a CLI command.
#[derive(Debug)]
enum CliError {
    Stego(StegoError),
    /// Reading or writing a non-image file.
    File(PathBuf, std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Stego(e) => write!(f, "{e}"),
            CliError::File(path, e) => write!(f, "{}: {e}", path.display()),
        }
    }
}

impl From<StegoError> for CliError {
    fn from(e: StegoError) -> Self {
        CliError::Stego(e)
    }
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    if let Err(e) = SimpleLogger::new().with_level(level).init() {
        eprintln!("Error: could not initialise logging: {e}");
    }

    let result = match cli.command {
        Commands::HideMsg { input, output, message, file, password, mode } => {
            read_message(message, file.as_deref())
                .and_then(|msg| hide(&input, &output, &msg, &password, mode, false))
        }
        Commands::HideImg { input, output, secret, password, mode } => {
            read_file(&secret).and_then(|bytes| hide(&input, &output, &bytes, &password, mode, true))
        }
        Commands::Extract { input, output, text, password, info } => {
            extract(&input, output.as_deref(), text, &password, info)
        }
        Commands::Info { input } => show_info(&input),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn read_message(message: Option<String>, file: Option<&Path>) -> Result<Vec<u8>, CliError> {
    match (message, file) {
        (_, Some(path)) => read_file(path),
        (Some(text), None) => Ok(text.into_bytes()),
        (None, None) => Ok(Vec::new()),
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, CliError> {
    fs::read(path).map_err(|e| CliError::File(path.to_path_buf(), e))
}

fn hide(
    input: &Path,
    output: &Path,
    payload: &[u8],
    password: &str,
    mode: u8,
    is_image: bool,
) -> Result<(), CliError> {
    let mode = Mode::from_tag(mode)?;
    let cover = io::load_image(input)?;

    let opts = EncodeOptions::new(mode).with_password(password).with_image_flag(is_image);
    let stego = match mosquito_core::encode(&cover, payload, &opts) {
        Err(StegoError::ImageTooSmall { available, required }) => {
            println!("Image too small to hide the payload");
            println!("  Required: {required} bytes, Available: {available} bytes");
            println!("  Try a mode with higher capacity (current: {mode})");
            return Err(StegoError::ImageTooSmall { available, required }.into());
        }
        other => other?,
    };
    if !password.is_empty() {
        println!("Payload encrypted with the provided password");
    }

    io::save_image(&stego, output)?;
    if io::output_format(output) == io::OutputFormat::Jpeg {
        println!("Warning: JPEG output is lossy and will likely destroy the hidden data");
    }

    let what = if is_image { "Image" } else { "Message" };
    println!("{what} hidden in {} using {mode}", output.display());
    let diff = mosquito_core::image_difference(&cover, &stego);
    println!("Image difference: {:.2}% (lower is better)", diff * 100.0);
    Ok(())
}

fn extract(
    input: &Path,
    output: Option<&Path>,
    text: bool,
    password: &str,
    info: bool,
) -> Result<(), CliError> {
    let img = io::load_image(input)?;

    if !mosquito_core::probe(&img) {
        println!("The image does not appear to contain hidden data");
        return Err(StegoError::InvalidHeader.into());
    }

    if info {
        print_info(&img)?;
        return Ok(());
    }

    let decoded = mosquito_core::decode(&img, password)?;
    let is_image = decoded.is_image();

    match output {
        Some(path) if !(text && !is_image) => {
            fs::write(path, &decoded.payload).map_err(|e| CliError::File(path.to_path_buf(), e))?;
            println!("Data extracted to {}", path.display());
            if is_image {
                println!("Extracted data is an image");
                let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
                if ext.is_empty() || ext == "bin" || ext == "dat" {
                    println!("Note: rename the file with an image extension (.png, .jpg, ...)");
                }
            }
        }
        _ if is_image => {
            println!("Extracted data is an image. Specify an output file with -o to save it.");
        }
        _ => {
            println!("Extracted message:");
            println!("{}", String::from_utf8_lossy(&decoded.payload));
        }
    }
    Ok(())
}

fn print_info(img: &PixelBuffer) -> Result<(), StegoError> {
    let header = mosquito_core::header_info(img)?;
    let mode = match header.mode() {
        Ok(m) => m.to_string(),
        Err(_) => format!("unknown ({})", header.mode),
    };

    println!("Steganographic image information:");
    println!("  Mode: {mode}");
    println!("  Payload size: {} bytes", header.payload_len);
    println!(
        "  Contains: {}",
        if header.is_image() { "Image data" } else { "Text/binary data" }
    );
    println!(
        "  Encryption: {}",
        if header.is_encrypted() { "Encrypted (password required)" } else { "Not encrypted" }
    );
    println!(
        "  Compression: {}",
        if header.is_compressed() { "Compressed" } else { "Not compressed" }
    );
    Ok(())
}

fn show_info(input: &Path) -> Result<(), CliError> {
    let img = io::load_image(input)?;
    let pixels = img.pixel_count();

    println!("Image information:");
    println!("  Dimensions: {}x{} pixels", img.width(), img.height());
    println!("  Total pixels: {pixels}");
    println!("  Type: {}", if img.is_grayscale() { "Grayscale" } else { "Color" });

    if mosquito_core::probe(&img) {
        println!();
        return Ok(print_info(&img)?);
    }

    println!();
    println!("Capacity per mode:");
    for mode in Mode::ALL {
        let bytes = mosquito_core::max_payload_size(pixels, mode);
        println!("  {}: {mode}: {bytes} bytes ({:.1} KB)", mode.tag(), bytes as f64 / 1024.0);
    }

    let advice = match Mode::recommended(pixels) {
        Mode::Lsb8 => "very small. Use LSB8 for maximum capacity.",
        Mode::Lsb3 | Mode::Lsb4 => "small. LSB3 or LSB4 recommended for balance.",
        Mode::Lsb1 => "large enough for LSB1 to hide most messages securely.",
    };
    println!();
    println!("Recommendation: this image is {advice}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_message_file_is_a_file_error() {
        let path = Path::new("/nonexistent/definitely/missing.txt");
        let err = read_message(None, Some(path)).unwrap_err();
        assert!(matches!(err, CliError::File(ref p, _) if p == path));
        let text = err.to_string();
        assert!(text.starts_with("/nonexistent/definitely/missing.txt: "), "{text}");
        assert!(!text.contains("image"), "{text}");
    }

    #[test]
    fn stego_errors_pass_through() {
        let err = CliError::from(StegoError::InvalidHeader);
        assert_eq!(err.to_string(), StegoError::InvalidHeader.to_string());
    }

    #[test]
    fn inline_message_wins_without_file() {
        assert_eq!(read_message(Some("hi".into()), None).unwrap(), b"hi");
        assert!(read_message(None, None).unwrap().is_empty());
    }
}
