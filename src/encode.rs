//! Encoding primitives and atomic output writes.
//!
//! Trial encodes land in locally-scoped in-memory buffers that are dropped
//! as soon as their length has been measured. Final outputs are staged to
//! a temporary file beside the destination and persisted atomically, so a
//! failed operation never leaves a partial file behind.

use std::io::{Cursor, Write};
use std::path::Path;

use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::format::OutputFormat;

/// Encode an image at a scalar quality setting.
///
/// Only [`OutputFormat::Jpeg`] and [`OutputFormat::WebP`] accept a quality
/// parameter; other formats are rejected.
pub fn encode_with_quality(
    image: &DynamicImage,
    format: OutputFormat,
    quality: u8,
) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Jpeg => {
            let rgb = image.to_rgb8();
            let mut buf = Cursor::new(Vec::new());
            let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality);
            encoder.encode_image(&rgb).map_err(|e| Error::Encode {
                format: "jpeg",
                reason: e.to_string(),
            })?;
            Ok(buf.into_inner())
        }
        OutputFormat::WebP => {
            // libwebp wants tightly-packed RGB8 or RGBA8 rows.
            if image.color().has_alpha() {
                let rgba = image.to_rgba8();
                let (width, height) = rgba.dimensions();
                let encoder = webp::Encoder::from_rgba(rgba.as_raw(), width, height);
                Ok(encoder.encode(f32::from(quality)).to_vec())
            } else {
                let rgb = image.to_rgb8();
                let (width, height) = rgb.dimensions();
                let encoder = webp::Encoder::from_rgb(rgb.as_raw(), width, height);
                Ok(encoder.encode(f32::from(quality)).to_vec())
            }
        }
        other => Err(Error::Encode {
            format: other.name(),
            reason: "format has no quality parameter".to_string(),
        }),
    }
}

/// Single-shot encode for formats without a quality knob.
///
/// PNG gets best-effort structural compression (the `optimize` analog);
/// the remaining lossless formats are written at codec defaults.
pub fn encode_lossless(image: &DynamicImage, format: OutputFormat) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    match format {
        OutputFormat::Png => {
            let encoder =
                PngEncoder::new_with_quality(&mut buf, CompressionType::Best, FilterType::Adaptive);
            image.write_with_encoder(encoder).map_err(|e| Error::Encode {
                format: "png",
                reason: e.to_string(),
            })?;
        }
        other => {
            image
                .write_to(&mut buf, other.image_format())
                .map_err(|e| Error::Encode {
                    format: other.name(),
                    reason: e.to_string(),
                })?;
        }
    }
    Ok(buf.into_inner())
}

/// Encode at codec defaults, used by plain format conversion.
pub fn encode_default(image: &DynamicImage, format: OutputFormat) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    image
        .write_to(&mut buf, format.image_format())
        .map_err(|e| Error::Encode {
            format: format.name(),
            reason: e.to_string(),
        })?;
    Ok(buf.into_inner())
}

/// Stage encoded bytes beside the destination and persist atomically.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir).map_err(|e| Error::OutputUnwritable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    staged.write_all(bytes).map_err(|e| Error::OutputUnwritable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    staged.persist(path).map_err(|e| Error::OutputUnwritable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(())
}
