//! PDF document assembly.

mod writer;

pub use writer::PdfWriter;

use crate::error::Result;
use crate::layout::Placement;
use crate::models::ResolvedImage;

/// Sink for placed pages.
///
/// The composition engine drives this once per image in collection
/// order; `finish` serializes the whole document as a single unit, so a
/// partially built document is never observable outside the writer.
pub trait DocumentWriter {
    /// Append one page with its placed image.
    fn add_page(&mut self, placement: &Placement, image: &ResolvedImage) -> Result<()>;

    /// Number of pages appended so far.
    fn page_count(&self) -> usize;

    /// Build the page tree and serialize the document to bytes.
    fn finish(self) -> Result<Vec<u8>>;
}
