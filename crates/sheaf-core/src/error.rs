//! Error types for the sheaf-core library.

use thiserror::Error;

/// Main error type for the sheaf library.
#[derive(Error, Debug)]
pub enum SheafError {
    /// Batch validation error (user-facing, pre-processing).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Image decode error during conversion.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Internal contract breach (programmer error, not recoverable).
    #[error("precondition violation: {0}")]
    Precondition(#[from] PreconditionViolation),

    /// PDF assembly error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Image processing error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised at the ingestion boundary before any state is mutated.
///
/// These are whole-batch rejections: when one is returned, nothing from
/// the offending batch has been admitted.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// The batch contained no files.
    #[error("batch contains no files")]
    EmptyBatch,

    /// The batch exceeded the configured maximum size.
    #[error("batch of {count} files exceeds the limit of {limit}")]
    TooManyFiles { count: usize, limit: usize },

    /// A file's declared type is not one of png/jpeg/webp.
    #[error("unsupported file type {declared:?} for {identifier}")]
    UnsupportedType {
        identifier: String,
        declared: String,
    },

    /// Conversion was requested on an empty image set.
    #[error("image set is empty, nothing to convert")]
    EmptySet,
}

/// Errors raised when an accepted image fails to yield usable pixels.
///
/// Aborts the in-progress conversion as a whole; no partial document is
/// ever emitted and the image set itself is left untouched.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The image data could not be decoded to intrinsic dimensions.
    #[error("cannot determine dimensions of {identifier}: {reason}")]
    Undecodable { identifier: String, reason: String },
}

/// Internal contract breaches.
///
/// These indicate caller or engine state corruption and are surfaced
/// distinctly from user-facing validation errors. They are never
/// retried or recovered at runtime.
#[derive(Error, Debug)]
pub enum PreconditionViolation {
    /// A source index was outside the collection bounds.
    #[error("index {index} out of range for set of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A reorder target index was outside the collection bounds.
    #[error("move target {index} out of range for set of {len}")]
    MoveTargetOutOfRange { index: usize, len: usize },
}

/// Errors related to PDF document assembly.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to serialize the assembled document.
    #[error("failed to write PDF: {0}")]
    Write(String),

    /// A dimension-resolution task failed to complete.
    #[error("dimension resolution task failed: {0}")]
    Join(String),
}

/// Result type for the sheaf library.
pub type Result<T> = std::result::Result<T, SheafError>;
