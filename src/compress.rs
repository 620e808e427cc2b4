//! Size-constrained lossy re-encoding.
//!
//! Given a source image and a byte ceiling, finds the highest quality in a
//! bounded integer domain whose encoded size fits the ceiling, using a
//! fixed-round binary search over trial encodes, then commits one final
//! encode at the winning quality. Formats without a quality parameter skip
//! the search and are saved once with lossless optimization.

use std::path::Path;

use crate::decode::{load_image, prepare_for_output};
use crate::encode::{encode_lossless, encode_with_quality, write_atomic};
use crate::error::Result;
use crate::format::OutputFormat;

/// Lower bound of the quality search domain.
pub const MIN_QUALITY: u8 = 5;

/// Upper bound of the quality search domain, and the fallback committed
/// when no trial ever fits the ceiling.
pub const MAX_QUALITY: u8 = 95;

/// Fixed number of search rounds. `log2` of the 90-wide domain rounds up
/// to 7, enough to converge to a single quality value; the loop always
/// runs all rounds rather than checking for early convergence.
pub const SEARCH_ROUNDS: u32 = 7;

/// Outcome of one quality search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Highest quality whose trial encode fit the ceiling, or
    /// [`MAX_QUALITY`] if none did.
    pub quality: u8,
    /// Number of trial encodes performed.
    pub trials: u32,
    /// Whether any trial fit the ceiling.
    pub fit: bool,
}

/// What [`compress_image`] committed to disk, for diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct CompressReport {
    /// Quality written, or `None` on the lossless path.
    pub quality: Option<u8>,
    /// Trial encodes performed before the final commit.
    pub trials: u32,
    /// Size of the committed output in bytes.
    pub output_bytes: u64,
}

/// Binary-search the quality domain for the highest value whose encoded
/// size fits `target_bytes`.
///
/// `encode` is invoked once per round with a candidate quality and returns
/// the resulting encoded length; the buffer itself stays with the caller
/// and is dropped after measurement. The search favors maximum quality
/// under the ceiling, not minimum file size: a fitting trial raises the
/// lower bound to look for an even higher quality that still fits.
///
/// When no candidate fits, the outcome degrades to [`MAX_QUALITY`] with
/// `fit == false`; the caller commits an over-budget encode. The host
/// application accepts that silently rather than treating it as an error.
pub fn search_quality<F>(mut encode: F, target_bytes: u64) -> Result<SearchOutcome>
where
    F: FnMut(u8) -> Result<usize>,
{
    let mut min_q = MIN_QUALITY;
    let mut max_q = MAX_QUALITY;
    let mut best = MAX_QUALITY;
    let mut fit = false;
    let mut trials = 0;

    for _ in 0..SEARCH_ROUNDS {
        let mid = (min_q + max_q) / 2;
        let size = encode(mid)?;
        trials += 1;

        if size as u64 <= target_bytes {
            // Acceptable; a higher quality might still fit.
            best = mid;
            fit = true;
            min_q = mid + 1;
        } else {
            max_q = mid - 1;
        }
    }

    Ok(SearchOutcome { quality: best, trials, fit })
}

/// Re-encode `input_path` into `output_path`, keeping the encoded size at
/// or under `target_bytes` when the output format is quality-adjustable.
///
/// JPEG and WEBP run the quality search; every other supported raster
/// format is saved exactly once with lossless optimization and no size
/// guarantee. Alpha sources headed for JPEG are flattened onto white
/// before any trial encode. The final file is produced by a fresh encode
/// at the winning quality, not by reusing a trial buffer, and is staged
/// and persisted atomically so a failure leaves nothing at `output_path`.
pub fn compress_image(
    input_path: &Path,
    output_path: &Path,
    target_bytes: u64,
) -> Result<CompressReport> {
    let format = OutputFormat::from_path(output_path)?;
    let image = load_image(input_path)?;
    let image = prepare_for_output(image, format);

    if format.quality_adjustable() {
        let outcome = search_quality(
            |quality| encode_with_quality(&image, format, quality).map(|bytes| bytes.len()),
            target_bytes,
        )?;

        let bytes = encode_with_quality(&image, format, outcome.quality)?;
        write_atomic(output_path, &bytes)?;

        Ok(CompressReport {
            quality: Some(outcome.quality),
            trials: outcome.trials,
            output_bytes: bytes.len() as u64,
        })
    } else {
        let bytes = encode_lossless(&image, format)?;
        write_atomic(output_path, &bytes)?;

        Ok(CompressReport {
            quality: None,
            trials: 0,
            output_bytes: bytes.len() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};

    fn noisy_rgb(width: u32, height: u32) -> DynamicImage {
        // Pseudo-random texture so JPEG sizes vary meaningfully with quality.
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            let seed = x.wrapping_mul(31).wrapping_add(y.wrapping_mul(57));
            Rgb([
                (seed.wrapping_mul(2654435761) >> 24) as u8,
                (seed.wrapping_mul(40503) >> 8) as u8,
                (seed ^ (seed >> 3)) as u8,
            ])
        }))
    }

    #[test]
    fn test_search_finds_highest_fitting_quality() {
        // Synthetic monotone codec: size is quality * 100.
        let outcome = search_quality(|q| Ok(usize::from(q) * 100), 5_000).unwrap();
        assert_eq!(outcome.quality, 50);
        assert_eq!(outcome.trials, SEARCH_ROUNDS);
        assert!(outcome.fit);
    }

    #[test]
    fn test_search_always_runs_all_rounds() {
        // Everything fits immediately; the loop still runs to completion.
        let mut calls = 0;
        let outcome = search_quality(
            |_| {
                calls += 1;
                Ok(1)
            },
            1_000_000,
        )
        .unwrap();
        assert_eq!(calls, SEARCH_ROUNDS);
        assert_eq!(outcome.quality, MAX_QUALITY);
        assert!(outcome.fit);
    }

    #[test]
    fn test_search_impossible_budget_degrades_to_max_quality() {
        let outcome = search_quality(|_| Ok(10_000), 1).unwrap();
        assert_eq!(outcome.quality, MAX_QUALITY);
        assert_eq!(outcome.trials, SEARCH_ROUNDS);
        assert!(!outcome.fit);
    }

    #[test]
    fn test_search_candidates_stay_in_domain_envelope() {
        let mut candidates = Vec::new();
        search_quality(
            |q| {
                candidates.push(q);
                Ok(usize::from(q) * 10)
            },
            400,
        )
        .unwrap();
        assert_eq!(candidates.len(), SEARCH_ROUNDS as usize);
        assert_eq!(candidates[0], (MIN_QUALITY + MAX_QUALITY) / 2);
    }

    #[test]
    fn test_search_propagates_encode_errors() {
        let result = search_quality(
            |_| Err(crate::Error::Encode { format: "jpeg", reason: "boom".into() }),
            1_000,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_compress_jpeg_fits_budget() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.png");
        let output = dir.path().join("result.jpg");
        noisy_rgb(128, 128).save(&input).unwrap();

        // Budget between the smallest and largest achievable sizes.
        let img = noisy_rgb(128, 128);
        let floor = encode_with_quality(&img, OutputFormat::Jpeg, MIN_QUALITY)
            .unwrap()
            .len() as u64;
        let ceiling = encode_with_quality(&img, OutputFormat::Jpeg, MAX_QUALITY)
            .unwrap()
            .len() as u64;
        let target = (floor + ceiling) / 2;

        let report = compress_image(&input, &output, target).unwrap();
        assert_eq!(report.trials, SEARCH_ROUNDS);
        assert!(report.output_bytes <= target);
        assert_eq!(std::fs::metadata(&output).unwrap().len(), report.output_bytes);
    }

    #[test]
    fn test_compress_rgba_to_jpeg_renders_transparent_as_white() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.png");
        let output = dir.path().join("result.jpg");
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(16, 16, Rgba([0, 0, 0, 0])))
            .save(&input)
            .unwrap();

        compress_image(&input, &output, 1_000_000).unwrap();

        let decoded = image::open(&output).unwrap();
        assert!(!decoded.color().has_alpha());
        for pixel in decoded.to_rgb8().pixels() {
            // JPEG is lossy; allow a small deviation from pure white.
            assert!(pixel.0.iter().all(|&c| c >= 250), "pixel {:?}", pixel.0);
        }
    }

    #[test]
    fn test_compress_impossible_budget_commits_max_quality() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("tiny.png");
        let output = dir.path().join("tiny.webp");
        noisy_rgb(10, 10).save(&input).unwrap();

        let report = compress_image(&input, &output, 1).unwrap();
        // Documented limitation: the over-budget output is accepted.
        assert_eq!(report.quality, Some(MAX_QUALITY));
        assert_eq!(report.trials, SEARCH_ROUNDS);
        assert!(report.output_bytes > 1);
        assert!(output.exists());
    }

    #[test]
    fn test_compress_png_bypasses_search() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.png");
        let output = dir.path().join("out.png");
        noisy_rgb(32, 32).save(&input).unwrap();

        let report = compress_image(&input, &output, 10).unwrap();
        assert_eq!(report.quality, None);
        assert_eq!(report.trials, 0);
        assert!(output.exists());
    }

    #[test]
    fn test_compress_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.png");
        noisy_rgb(48, 48).save(&input).unwrap();

        let out_a = dir.path().join("a.jpg");
        let out_b = dir.path().join("b.jpg");
        compress_image(&input, &out_a, 2_000).unwrap();
        compress_image(&input, &out_b, 2_000).unwrap();
        assert_eq!(std::fs::read(out_a).unwrap(), std::fs::read(out_b).unwrap());
    }

    #[test]
    fn test_compress_missing_input_leaves_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("absent.png");
        let output = dir.path().join("out.jpg");

        let result = compress_image(&input, &output, 1_000);
        assert!(matches!(result, Err(crate::Error::InputUnreadable { .. })));
        assert!(!output.exists());
        // No staged temp files left behind either.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
