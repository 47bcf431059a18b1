//! Rasterizes a rendered document into an opaque RGB bitmap.

use std::sync::Arc;

use image::RgbImage;
use resvg::tiny_skia::{Color, Pixmap, Transform};
use resvg::usvg;

use crate::export::{ExportError, FontDatabase};
use crate::render::RenderedDocument;

/// Supersampling factor relative to the 96 DPI layout.
pub const CAPTURE_SCALE: f32 = 2.0;

/// Captures `document` at its natural size times [`CAPTURE_SCALE`] on a white
/// background. Any on-screen view scale is dropped first.
pub fn capture(document: &RenderedDocument, fonts: Arc<FontDatabase>) -> Result<RgbImage, ExportError> {
    let svg = document.without_view_transform().to_svg();

    let options = usvg::Options {
        fontdb: fonts,
        // Inline data only; never resolve hrefs against the filesystem.
        image_href_resolver: usvg::ImageHrefResolver {
            resolve_data: usvg::ImageHrefResolver::default_data_resolver(),
            resolve_string: Box::new(|_, _| None),
        },
        ..usvg::Options::default()
    };
    let tree = usvg::Tree::from_str(&svg, &options)
        .map_err(|e| ExportError::RenderCapture(format!("Failed to parse rendered SVG: {e}")))?;

    let size = tree.size();
    let width = (size.width() * CAPTURE_SCALE).ceil() as u32;
    let height = (size.height() * CAPTURE_SCALE).ceil() as u32;
    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
        ExportError::RenderCapture(format!("Cannot allocate a {width}x{height} bitmap"))
    })?;
    pixmap.fill(Color::WHITE);
    resvg::render(
        &tree,
        Transform::from_scale(CAPTURE_SCALE, CAPTURE_SCALE),
        &mut pixmap.as_mut(),
    );

    // Opaque background, so premultiplied RGBA is plain RGBA here.
    let rgb: Vec<u8> = pixmap
        .data()
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();
    RgbImage::from_raw(width, height, rgb).ok_or_else(|| {
        ExportError::RenderCapture("Captured pixel buffer has the wrong length".to_string())
    })
}
