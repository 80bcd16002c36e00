//! Ingestion boundary: batch validation and preview generation.
//!
//! A batch is admitted or rejected as a whole. Validation (count and
//! declared type checks) happens before any work, so a rejected batch
//! leaves no trace. Previews are generated concurrently on the blocking
//! pool and joined in order, keeping the admitted entries in ingestion
//! order.

use std::collections::HashSet;
use std::io::Cursor;

use image::DynamicImage;
use tracing::{debug, warn};

use crate::error::{PdfError, Result, ValidationError};
use crate::models::{ImageEntry, ImageKind, IngestConfig};

/// One file offered to the ingestion boundary.
#[derive(Debug, Clone)]
pub struct RawFile {
    /// Original filename; identifiers are derived from it.
    pub name: String,

    /// Declared MIME type or bare format name.
    pub declared_type: String,

    /// Raw file bytes.
    pub bytes: Vec<u8>,
}

/// Validate and admit a batch of raw files.
///
/// Rejections are whole-batch: an empty batch, a batch over
/// `max_batch_size`, or any file with a declared type outside
/// png/jpeg/webp fails the entire call with a [`ValidationError`] and
/// nothing is admitted.
pub async fn ingest_batch(files: Vec<RawFile>, config: &IngestConfig) -> Result<Vec<ImageEntry>> {
    if files.is_empty() {
        return Err(ValidationError::EmptyBatch.into());
    }
    if files.len() > config.max_batch_size {
        return Err(ValidationError::TooManyFiles {
            count: files.len(),
            limit: config.max_batch_size,
        }
        .into());
    }

    // Type-check every file before touching any pixel data.
    let mut kinds = Vec::with_capacity(files.len());
    for file in &files {
        kinds.push(ImageKind::from_declared(&file.name, &file.declared_type)?);
    }

    debug!(count = files.len(), "ingesting batch");

    let preview_max = config.preview_max_dimension;
    let mut handles = Vec::with_capacity(files.len());
    for (file, kind) in files.into_iter().zip(kinds) {
        handles.push(tokio::task::spawn_blocking(move || {
            let preview = build_preview(&file.bytes, kind, preview_max).unwrap_or_else(|| {
                warn!(name = %file.name, "preview generation failed, keeping full bytes");
                file.bytes.clone()
            });
            (file, kind, preview)
        }));
    }

    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(handles.len());
    for handle in handles {
        let (file, kind, preview) = handle
            .await
            .map_err(|e| PdfError::Join(e.to_string()))?;
        let identifier = unique_identifier(&file.name, &mut seen);
        entries.push(ImageEntry::new(identifier, kind, file.bytes, preview));
    }

    Ok(entries)
}

/// Derive a unique identifier from a filename, suffixing duplicates.
fn unique_identifier(name: &str, seen: &mut HashSet<String>) -> String {
    if seen.insert(name.to_string()) {
        return name.to_string();
    }
    let mut n = 1;
    loop {
        let candidate = format!("{name}-{n}");
        if seen.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

/// Decode, downscale to `max_dimension` on the longer side, and
/// re-encode as JPEG. Returns `None` when the source does not decode;
/// the caller falls back to the full bytes and the decode failure
/// surfaces later as a conversion-time error.
fn build_preview(bytes: &[u8], kind: ImageKind, max_dimension: u32) -> Option<Vec<u8>> {
    let decoded = image::load_from_memory_with_format(bytes, kind.as_format()).ok()?;
    let thumb = decoded.thumbnail(max_dimension, max_dimension);

    // JPEG carries no alpha channel.
    let rgb = DynamicImage::ImageRgb8(thumb.to_rgb8());
    let mut out = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Jpeg)
        .ok()?;
    Some(out)
}
