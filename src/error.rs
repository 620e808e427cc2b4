//! Error types for media-tools operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for media-tools operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during a sidecar operation.
///
/// Every failure is terminal for the invocation: the caller prints the
/// message and exits non-zero, with no retry or partial recovery.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Source file missing, unreadable, or undecodable.
    #[error("Cannot read input: {path}: {reason}")]
    InputUnreadable {
        /// Path to the input that failed to load.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// Destination path not creatable or not writable.
    #[error("Cannot write output: {path}: {reason}")]
    OutputUnwritable {
        /// Destination path that could not be written.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// Output extension does not map to a supported raster format.
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// Codec-level failure while encoding.
    #[error("Encode failed ({format}): {reason}")]
    Encode {
        /// Format being encoded.
        format: &'static str,
        /// Error message from the codec.
        reason: String,
    },

    /// Failure while building or serializing the PDF document.
    #[error("PDF assembly failed: {0}")]
    PdfAssembly(String),

    /// `images_to_pdf` was invoked with an empty input list.
    #[error("No input images provided")]
    NoInputImages,

    /// I/O error wrapper.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
