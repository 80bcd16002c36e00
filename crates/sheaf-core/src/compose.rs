//! The layout and composition engine.
//!
//! Conversion runs in three strictly ordered phases:
//!
//! 1. every image's intrinsic dimensions are resolved concurrently on
//!    the blocking pool and joined before any layout decision is made,
//! 2. a single synchronous pass places each image in collection order,
//! 3. the document is serialized as one unit.
//!
//! Phase 1 completing before phase 2 starts is what makes page geometry
//! a pure function of the input set; there is no page-size state shared
//! between in-flight decodes.

use tracing::{debug, info};

use crate::error::{DecodeError, PdfError, Result, ValidationError};
use crate::layout::{place, FitPolicy};
use crate::models::{ImageEntry, PageConfig, ResolvedImage, SheafConfig};
use crate::pdf::{DocumentWriter, PdfWriter};

/// Composes an ordered image snapshot into a finished PDF byte stream.
pub struct Composer {
    page: PageConfig,
}

impl Composer {
    pub fn new(config: &SheafConfig) -> Self {
        Self {
            page: config.page.clone(),
        }
    }

    /// Convert a point-in-time snapshot of the image set into a PDF.
    ///
    /// Exactly one page per image, in snapshot order. An empty snapshot
    /// is rejected, and a single undecodable image aborts the whole
    /// conversion with its identifier; in both cases no output bytes are
    /// produced.
    pub async fn compose(&self, entries: Vec<ImageEntry>, policy: FitPolicy) -> Result<Vec<u8>> {
        if entries.is_empty() {
            return Err(ValidationError::EmptySet.into());
        }

        let count = entries.len();
        info!(count, ?policy, "starting conversion");

        let resolved = resolve_dimensions(entries).await?;

        let mut writer = PdfWriter::new();
        for image in &resolved {
            let placement = place(
                image.width(),
                image.height(),
                policy,
                self.page.width,
                self.page.height,
            );
            writer.add_page(&placement, image)?;
        }
        debug_assert_eq!(writer.page_count(), count);

        let bytes = writer.finish()?;
        info!(pages = count, bytes = bytes.len(), "conversion complete");
        Ok(bytes)
    }
}

/// Decode every entry concurrently and join all results, preserving
/// input order. The first failure aborts with a [`DecodeError`] naming
/// the offending image.
async fn resolve_dimensions(entries: Vec<ImageEntry>) -> Result<Vec<ResolvedImage>> {
    let mut handles = Vec::with_capacity(entries.len());
    for entry in entries {
        handles.push(tokio::task::spawn_blocking(move || {
            let pixels = image::load_from_memory_with_format(&entry.full_data, entry.kind.as_format())
                .map_err(|e| DecodeError::Undecodable {
                    identifier: entry.identifier.clone(),
                    reason: e.to_string(),
                })?;
            debug!(
                identifier = %entry.identifier,
                width = pixels.width(),
                height = pixels.height(),
                "resolved dimensions"
            );
            Ok::<_, DecodeError>(ResolvedImage {
                identifier: entry.identifier,
                kind: entry.kind,
                data: entry.full_data,
                pixels,
            })
        }));
    }

    let mut resolved = Vec::with_capacity(handles.len());
    for handle in handles {
        let image = handle.await.map_err(|e| PdfError::Join(e.to_string()))??;
        resolved.push(image);
    }
    Ok(resolved)
}
