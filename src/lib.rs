//! # media-tools
//!
//! Image sidecar operations for a host application: format conversion,
//! size-constrained lossy re-encoding, and multi-image PDF assembly.
//!
//! Each operation is a single synchronous call that reads its inputs,
//! writes exactly one output file, and returns a [`Result`]. The library
//! never prints and never exits the process; the CLI binary translates
//! errors into the stdout token / exit-code contract the host expects.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use media_tools::compress_image;
//!
//! // Fit photo.png into 200 KB as a JPEG.
//! let report = compress_image(
//!     "photo.png".as_ref(),
//!     "result.jpg".as_ref(),
//!     200_000,
//! )?;
//! println!("committed quality {:?}", report.quality);
//! ```
//!
//! ## Modules
//!
//! - [`error`]: Error types for all operations
//! - [`format`]: Typed output-format resolution from destination paths
//! - [`decode`]: Image loading and alpha preprocessing
//! - [`encode`]: Encoding primitives and atomic output writes
//! - [`compress`]: Size-constrained re-encoding (quality binary search)
//! - [`convert`]: Single-shot format conversion
//! - [`pdf`]: Images-to-PDF page assembly

pub mod compress;
pub mod convert;
pub mod decode;
pub mod encode;
pub mod error;
pub mod format;
pub mod pdf;

// Re-export commonly used types
pub use compress::{
    CompressReport, SearchOutcome, compress_image, search_quality, MAX_QUALITY, MIN_QUALITY,
    SEARCH_ROUNDS,
};
pub use convert::convert_image;
pub use error::{Error, Result};
pub use format::OutputFormat;
pub use pdf::images_to_pdf;
