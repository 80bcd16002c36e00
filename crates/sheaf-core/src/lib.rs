//! Core library for composing images into multi-page PDF documents.
//!
//! This crate provides:
//! - An ordered, user-reorderable image collection with paired
//!   full-resolution and preview data
//! - A batch ingestion boundary (type and count validation, preview
//!   generation)
//! - A deterministic layout engine mapping each image onto one output
//!   page under a selected fit policy
//! - PDF assembly via lopdf

pub mod collection;
pub mod compose;
pub mod error;
pub mod ingest;
pub mod layout;
pub mod models;
pub mod pdf;

pub use collection::ImageSet;
pub use compose::Composer;
pub use error::{DecodeError, PdfError, PreconditionViolation, Result, SheafError, ValidationError};
pub use ingest::{ingest_batch, RawFile};
pub use layout::{place, FitPolicy, Orientation, Page, Placement};
pub use models::{ImageEntry, ImageKind, ResolvedImage, SheafConfig};
pub use pdf::{DocumentWriter, PdfWriter};
