// Export Pipeline: rendered resume -> 2x bitmap -> JPEG -> paginated A4 PDF.
// Every stage is CPU-bound; callers run `export_pdf` inside spawn_blocking.

pub mod capture;
pub mod handlers;
pub mod paginate;
pub mod pdf;

use std::path::Path;
use std::sync::Arc;

use image::codecs::jpeg::JpegEncoder;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::PersonalInfo;
use crate::render::RenderedDocument;
use paginate::PageLayout;

/// Font collection used when rasterizing text.
pub type FontDatabase = resvg::usvg::fontdb::Database;

const JPEG_QUALITY: u8 = 92;

#[derive(Debug, Error, PartialEq)]
pub enum ExportError {
    #[error("Failed to capture rendered resume: {0}")]
    RenderCapture(String),

    #[error("Failed to build PDF: {0}")]
    Export(String),
}

/// A finished PDF ready to be sent as an attachment.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    /// Includes the `.pdf` extension.
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// System fonts plus every font under `font_dir`, if given.
pub fn load_fonts(font_dir: Option<&Path>) -> FontDatabase {
    let mut fonts = FontDatabase::new();
    fonts.load_system_fonts();
    if let Some(dir) = font_dir {
        if dir.is_dir() {
            fonts.load_fonts_dir(dir);
        } else {
            warn!("FONT_DIR {} is not a directory; using system fonts only", dir.display());
        }
    }
    if fonts.is_empty() {
        warn!("No fonts found; exported PDFs will contain no text");
    }
    fonts
}

/// `{first}_{last}_Resume`. Whitespace runs become `_`, blank parts are
/// skipped and characters that are unsafe in a header value are dropped.
pub fn export_file_name(info: &PersonalInfo) -> String {
    let mut parts: Vec<String> = [info.first_name.as_str(), info.last_name.as_str()]
        .into_iter()
        .map(|part| {
            part.split_whitespace()
                .collect::<Vec<_>>()
                .join("_")
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
                .collect::<String>()
        })
        .filter(|part| !part.is_empty())
        .collect();
    parts.push("Resume".to_string());
    parts.join("_")
}

/// Runs the whole pipeline on an already rendered document.
pub fn export_pdf(
    document: &RenderedDocument,
    file_name: &str,
    fonts: Arc<FontDatabase>,
) -> Result<ExportArtifact, ExportError> {
    let bitmap = capture::capture(document, fonts)?;
    let (width, height) = bitmap.dimensions();

    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY)
        .encode_image(&bitmap)
        .map_err(|e| ExportError::Export(format!("Failed to encode captured bitmap: {e}")))?;

    let layout = PageLayout::for_bitmap(width, height);
    let bytes = pdf::assemble(jpeg, width, height, &layout)?;

    info!(
        "Exported {} resume: {}x{} px, {} page(s), {} bytes",
        document.template.as_str(),
        width,
        height,
        layout.page_count,
        bytes.len()
    );

    Ok(ExportArtifact {
        file_name: format!("{file_name}.pdf"),
        bytes,
        page_count: layout.page_count,
    })
}
