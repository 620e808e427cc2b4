//! Image loading and color preprocessing.
//!
//! Loading produces an immutable in-memory raster for the duration of one
//! operation. Preprocessing normalizes the raster for the requested output
//! format before any encode happens, so every trial encode in the quality
//! search sees identical pixel data.

use std::path::Path;

use image::{DynamicImage, RgbImage};

use crate::error::{Error, Result};
use crate::format::OutputFormat;

/// Decode an image from disk.
///
/// # Errors
///
/// Returns [`Error::InputUnreadable`] when the file is missing, corrupt,
/// or in a format the codec library cannot decode.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|e| Error::InputUnreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Composite an image onto an opaque white background of identical size,
/// using its alpha channel as the blend mask.
///
/// Fully transparent pixels come out white, fully opaque pixels keep their
/// color, partial alpha blends linearly.
pub fn flatten_onto_white(image: &DynamicImage) -> RgbImage {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut out = RgbImage::new(width, height);
    for (dst, src) in out.pixels_mut().zip(rgba.pixels()) {
        let alpha = u16::from(src[3]);
        for channel in 0..3 {
            let blended = (u16::from(src[channel]) * alpha + 255 * (255 - alpha)) / 255;
            dst[channel] = blended as u8;
        }
    }
    out
}

/// Normalize a decoded image for the requested output format.
///
/// JPEG cannot carry alpha, so alpha and luminance-alpha sources are
/// flattened onto white and everything else is converted to opaque RGB.
/// Alpha-capable formats pass through untouched.
pub fn prepare_for_output(image: DynamicImage, format: OutputFormat) -> DynamicImage {
    if format.supports_alpha() {
        return image;
    }

    if image.color().has_alpha() {
        DynamicImage::ImageRgb8(flatten_onto_white(&image))
    } else {
        DynamicImage::ImageRgb8(image.to_rgb8())
    }
}
