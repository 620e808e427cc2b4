//! Typed output-format resolution.
//!
//! The destination extension is parsed exactly once, at the operation
//! boundary, into an [`OutputFormat`] tag. Core code branches on the tag
//! and never re-parses path strings.

use std::path::Path;

use image::ImageFormat;

use crate::error::{Error, Result};

/// Raster formats the sidecar can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Lossy, quality-adjustable, no alpha channel.
    Jpeg,
    /// Lossy, quality-adjustable, alpha-capable.
    WebP,
    /// Lossless; saved with best compression (the `optimize` analog).
    Png,
    /// Lossless single-shot save.
    Bmp,
    /// Lossless single-shot save.
    Gif,
    /// Lossless single-shot save.
    Tiff,
}

impl OutputFormat {
    /// Resolve the output format from a destination path's extension.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] when the extension is missing
    /// or does not name a writable raster format.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| Error::UnsupportedFormat(path.display().to_string()))?;

        match ext.as_str() {
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "webp" => Ok(Self::WebP),
            "png" => Ok(Self::Png),
            "bmp" => Ok(Self::Bmp),
            "gif" => Ok(Self::Gif),
            "tif" | "tiff" => Ok(Self::Tiff),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }

    /// Whether the encoder takes a scalar quality parameter.
    #[must_use]
    pub fn quality_adjustable(self) -> bool {
        matches!(self, Self::Jpeg | Self::WebP)
    }

    /// Whether the encoded format can carry an alpha channel.
    #[must_use]
    pub fn supports_alpha(self) -> bool {
        !matches!(self, Self::Jpeg)
    }

    /// The corresponding `image` crate format tag.
    #[must_use]
    pub fn image_format(self) -> ImageFormat {
        match self {
            Self::Jpeg => ImageFormat::Jpeg,
            Self::WebP => ImageFormat::WebP,
            Self::Png => ImageFormat::Png,
            Self::Bmp => ImageFormat::Bmp,
            Self::Gif => ImageFormat::Gif,
            Self::Tiff => ImageFormat::Tiff,
        }
    }

    /// Short format name for diagnostics.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::WebP => "webp",
            Self::Png => "png",
            Self::Bmp => "bmp",
            Self::Gif => "gif",
            Self::Tiff => "tiff",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_extensions() {
        assert_eq!(
            OutputFormat::from_path(Path::new("out.jpg")).unwrap(),
            OutputFormat::Jpeg
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("out.JPEG")).unwrap(),
            OutputFormat::Jpeg
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("dir/out.webp")).unwrap(),
            OutputFormat::WebP
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("out.tif")).unwrap(),
            OutputFormat::Tiff
        );
    }

    #[test]
    fn test_from_path_rejects_unknown() {
        assert!(OutputFormat::from_path(Path::new("out.xyz")).is_err());
        assert!(OutputFormat::from_path(Path::new("no_extension")).is_err());
    }

    #[test]
    fn test_quality_adjustable() {
        assert!(OutputFormat::Jpeg.quality_adjustable());
        assert!(OutputFormat::WebP.quality_adjustable());
        assert!(!OutputFormat::Png.quality_adjustable());
        assert!(!OutputFormat::Bmp.quality_adjustable());
    }

    #[test]
    fn test_alpha_support() {
        assert!(!OutputFormat::Jpeg.supports_alpha());
        assert!(OutputFormat::WebP.supports_alpha());
        assert!(OutputFormat::Png.supports_alpha());
    }
}
