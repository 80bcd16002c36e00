//! Pure placement math: maps image dimensions and a fit policy onto an
//! output page.
//!
//! Everything here is stateless. The composition engine resolves all
//! image dimensions up front and then calls [`place`] once per image in
//! collection order, so page geometry never depends on evaluation order.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Rule governing how an image is scaled and positioned on its page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum FitPolicy {
    /// Scale to fit entirely within the page, centered.
    #[default]
    Default,
    /// Scale to fill the page, centered; overflow is not clipped.
    Cover,
    /// Stretch to the exact page size, ignoring aspect ratio.
    Stretch,
    /// Resize the page itself to the image's aspect ratio.
    FitToImage,
}

/// Page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// Output page geometry in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Page {
    pub width: f64,
    pub height: f64,
    pub orientation: Orientation,
}

impl Page {
    pub fn new(width: f64, height: f64) -> Self {
        let orientation = if width > height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        };
        Self {
            width,
            height,
            orientation,
        }
    }
}

/// The resolved rectangle into which one image is drawn on its page.
///
/// Offsets are measured from the top-left page corner; the PDF writer
/// flips them into PDF bottom-left coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub page: Page,
    pub offset_x: f64,
    pub offset_y: f64,
    pub draw_width: f64,
    pub draw_height: f64,
}

/// Compute the placement of an image with intrinsic dimensions
/// `(iw, ih)` under `policy`, against the fixed reference page
/// `(page_width, page_height)`.
///
/// Under `FitToImage` the page itself is resized to the image's aspect
/// ratio; every other policy keeps the reference page.
pub fn place(iw: u32, ih: u32, policy: FitPolicy, page_width: f64, page_height: f64) -> Placement {
    let iw = iw as f64;
    let ih = ih as f64;

    match policy {
        FitPolicy::Default => {
            let scale = (page_width / iw).min(page_height / ih);
            let draw_width = iw * scale;
            let draw_height = ih * scale;
            Placement {
                page: Page::new(page_width, page_height),
                offset_x: (page_width - draw_width) / 2.0,
                offset_y: (page_height - draw_height) / 2.0,
                draw_width,
                draw_height,
            }
        }
        FitPolicy::Cover => {
            // The oversized dimension overflows the page edge and is
            // intentionally left unclipped.
            let scale = (page_width / iw).max(page_height / ih);
            let draw_width = iw * scale;
            let draw_height = ih * scale;
            Placement {
                page: Page::new(page_width, page_height),
                offset_x: (page_width - draw_width) / 2.0,
                offset_y: (page_height - draw_height) / 2.0,
                draw_width,
                draw_height,
            }
        }
        FitPolicy::Stretch => Placement {
            page: Page::new(page_width, page_height),
            offset_x: 0.0,
            offset_y: 0.0,
            draw_width: page_width,
            draw_height: page_height,
        },
        FitPolicy::FitToImage => {
            let (pw, ph) = if iw / ih > page_width / page_height {
                (page_width, page_width * ih / iw)
            } else {
                (page_height * iw / ih, page_height)
            };
            Placement {
                page: Page::new(pw, ph),
                offset_x: 0.0,
                offset_y: 0.0,
                draw_width: pw,
                draw_height: ph,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PW: f64 = 595.0;
    const PH: f64 = 842.0;
    const EPS: f64 = 1e-6;

    #[test]
    fn test_default_fits_within_page_and_centers() {
        for &(iw, ih) in &[(800u32, 600u32), (600, 800), (1000, 1000), (1, 5000)] {
            let p = place(iw, ih, FitPolicy::Default, PW, PH);
            assert!(p.draw_width <= PW + EPS);
            assert!(p.draw_height <= PH + EPS);
            assert!(p.offset_x >= 0.0);
            assert!(p.offset_y >= 0.0);
            assert!((p.offset_x - (PW - p.draw_width) / 2.0).abs() < EPS);
            assert!((p.offset_y - (PH - p.draw_height) / 2.0).abs() < EPS);
        }
    }

    #[test]
    fn test_cover_fills_page_and_centers() {
        for &(iw, ih) in &[(800u32, 600u32), (600, 800), (1000, 1000)] {
            let p = place(iw, ih, FitPolicy::Cover, PW, PH);
            assert!(p.draw_width >= PW - EPS);
            assert!(p.draw_height >= PH - EPS);
            // Centering law holds even when the draw rect overflows.
            assert!((p.offset_x - (PW - p.draw_width) / 2.0).abs() < EPS);
            assert!((p.offset_y - (PH - p.draw_height) / 2.0).abs() < EPS);
        }
    }

    #[test]
    fn test_cover_overflow_is_not_clipped() {
        let p = place(800, 600, FitPolicy::Cover, PW, PH);
        // Wide image scaled by height: width overflows, offset goes negative.
        assert!(p.draw_width > PW);
        assert!(p.offset_x < 0.0);
    }

    #[test]
    fn test_stretch_is_exact() {
        let p = place(123, 4567, FitPolicy::Stretch, PW, PH);
        assert_eq!(p.draw_width, PW);
        assert_eq!(p.draw_height, PH);
        assert_eq!(p.offset_x, 0.0);
        assert_eq!(p.offset_y, 0.0);
    }

    #[test]
    fn test_fit_to_image_preserves_aspect_ratio() {
        for &(iw, ih) in &[(800u32, 600u32), (600, 800), (1000, 1000), (3000, 77)] {
            let p = place(iw, ih, FitPolicy::FitToImage, PW, PH);
            let page_aspect = p.page.width / p.page.height;
            let image_aspect = iw as f64 / ih as f64;
            assert!((page_aspect - image_aspect).abs() < EPS);
            assert_eq!(p.offset_x, 0.0);
            assert_eq!(p.offset_y, 0.0);
            assert_eq!(p.draw_width, p.page.width);
            assert_eq!(p.draw_height, p.page.height);
        }
    }

    #[test]
    fn test_fit_to_image_orientation() {
        let wide = place(800, 600, FitPolicy::FitToImage, PW, PH);
        assert_eq!(wide.page.orientation, Orientation::Landscape);

        let tall = place(600, 800, FitPolicy::FitToImage, PW, PH);
        assert_eq!(tall.page.orientation, Orientation::Portrait);

        let square = place(500, 500, FitPolicy::FitToImage, PW, PH);
        assert_eq!(square.page.orientation, Orientation::Portrait);
    }

    #[test]
    fn test_default_known_values() {
        // 800x600 on 595x842: width-bound, scale = 595/800.
        let p = place(800, 600, FitPolicy::Default, PW, PH);
        assert!((p.draw_width - 595.0).abs() < EPS);
        assert!((p.draw_height - 446.25).abs() < EPS);
        assert!((p.offset_x - 0.0).abs() < EPS);
        assert!((p.offset_y - (842.0 - 446.25) / 2.0).abs() < EPS);

        // 600x800 on 595x842: still width-bound, scale = 595/600.
        let p = place(600, 800, FitPolicy::Default, PW, PH);
        let scale = 595.0 / 600.0;
        assert!((p.draw_width - 595.0).abs() < EPS);
        assert!((p.draw_height - 800.0 * scale).abs() < EPS);
        assert!((p.offset_y - (842.0 - 800.0 * scale) / 2.0).abs() < EPS);

        // 1000x1000 on 595x842: width-bound, square stays square.
        let p = place(1000, 1000, FitPolicy::Default, PW, PH);
        assert!((p.draw_width - 595.0).abs() < EPS);
        assert!((p.draw_height - 595.0).abs() < EPS);
        assert!((p.offset_x - 0.0).abs() < EPS);
        assert!((p.offset_y - (842.0 - 595.0) / 2.0).abs() < EPS);
    }
}
