//! lopdf-backed document writer.

use chrono::Utc;
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use tracing::{debug, trace};

use super::DocumentWriter;
use crate::error::{PdfError, Result};
use crate::layout::Placement;
use crate::models::{ImageKind, ResolvedImage};

/// Builds a multi-page PDF where each page carries one image XObject.
pub struct PdfWriter {
    document: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
}

impl PdfWriter {
    pub fn new() -> Self {
        let mut document = Document::with_version("1.5");
        // Reserved up front so page dicts can reference their parent.
        let pages_id = document.new_object_id();
        Self {
            document,
            pages_id,
            page_ids: Vec::new(),
        }
    }

    /// Embed the image as an XObject, returning its object id.
    ///
    /// JPEG sources keep their compressed bytes behind a `DCTDecode`
    /// filter. Everything else goes in as raw 8-bit samples, with the
    /// alpha channel split into an `SMask` when present.
    fn embed_image(&mut self, image: &ResolvedImage) -> ObjectId {
        let width = image.width() as i64;
        let height = image.height() as i64;

        if image.kind == ImageKind::Jpeg {
            let color_space: &[u8] = if image.pixels.color().channel_count() == 1 {
                b"DeviceGray"
            } else {
                b"DeviceRGB"
            };
            let stream = Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => width,
                    "Height" => height,
                    "ColorSpace" => Object::Name(color_space.to_vec()),
                    "BitsPerComponent" => 8,
                    "Filter" => "DCTDecode",
                },
                image.data.clone(),
            )
            .with_compression(false);
            return self.document.add_object(stream);
        }

        let rgba = image.pixels.to_rgba8();
        let mut rgb = Vec::with_capacity((rgba.width() * rgba.height() * 3) as usize);
        let mut alpha = Vec::with_capacity((rgba.width() * rgba.height()) as usize);
        for pixel in rgba.pixels() {
            rgb.push(pixel[0]);
            rgb.push(pixel[1]);
            rgb.push(pixel[2]);
            alpha.push(pixel[3]);
        }

        let mut dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width,
            "Height" => height,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        };

        if image.pixels.color().has_alpha() {
            let smask = Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => width,
                    "Height" => height,
                    "ColorSpace" => "DeviceGray",
                    "BitsPerComponent" => 8,
                },
                alpha,
            );
            let smask_id = self.document.add_object(smask);
            dict.set("SMask", smask_id);
        }

        self.document.add_object(Stream::new(dict, rgb))
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentWriter for PdfWriter {
    fn add_page(&mut self, placement: &Placement, image: &ResolvedImage) -> Result<()> {
        let image_id = self.embed_image(image);
        let name = format!("Im{}", self.page_ids.len());

        // Placement offsets are from the top-left corner; PDF user space
        // has its origin at the bottom-left.
        let pdf_y = placement.page.height - placement.offset_y - placement.draw_height;
        let content = format!(
            "q {} 0 0 {} {} {} cm /{} Do Q",
            placement.draw_width, placement.draw_height, placement.offset_x, pdf_y, name
        );
        let content_id = self
            .document
            .add_object(Stream::new(dictionary! {}, content.into_bytes()));

        let resources = dictionary! {
            "XObject" => dictionary! { name.as_str() => image_id },
        };
        let page_id = self.document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(placement.page.width as f32),
                Object::Real(placement.page.height as f32),
            ],
            "Resources" => resources,
            "Contents" => content_id,
        });

        trace!(
            identifier = %image.identifier,
            page = self.page_ids.len() + 1,
            width = placement.page.width,
            height = placement.page.height,
            "placed page"
        );
        self.page_ids.push(page_id);
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    fn finish(mut self) -> Result<Vec<u8>> {
        if self.page_ids.is_empty() {
            return Err(PdfError::Write("document has no pages".to_string()).into());
        }

        let kids: Vec<Object> = self.page_ids.iter().map(|id| (*id).into()).collect();
        let pages = dictionary! {
            "Type" => "Pages",
            "Count" => self.page_ids.len() as i64,
            "Kids" => kids,
        };
        self.document
            .objects
            .insert(self.pages_id, Object::Dictionary(pages));

        let catalog_id = self.document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.document.trailer.set("Root", catalog_id);

        let info_id = self.document.add_object(dictionary! {
            "Producer" => Object::string_literal("sheaf"),
            "CreationDate" => Object::string_literal(
                Utc::now().format("D:%Y%m%d%H%M%SZ").to_string(),
            ),
        });
        self.document.trailer.set("Info", info_id);

        self.document.compress();

        let mut out = Vec::new();
        self.document
            .save_to(&mut out)
            .map_err(|e| PdfError::Write(e.to_string()))?;
        debug!(pages = self.page_ids.len(), bytes = out.len(), "serialized document");
        Ok(out)
    }
}
