//! Document Importer: turns an uploaded PDF or Word file into a partial resume.
//!
//! Two stages. The declared media type picks a [`TextExtractor`] (and rejects
//! anything else before the upload body is touched), then the heuristics in
//! [`heuristics`] scan the extracted text. The result is returned to the caller;
//! nothing here touches the store.

pub mod extract;
pub mod handlers;
pub mod heuristics;

use std::future::Future;

use bytes::Bytes;
use thiserror::Error;
use tracing::info;

use extract::{DocxExtractor, LegacyWordExtractor, PdfExtractor, TextExtractor};
pub use heuristics::{extract_resume, DetectedFields, ImportedResume};

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOC: &str = "application/msword";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Error, PartialEq)]
pub enum ImportError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Failed to parse resume file: {0}")]
    ParseFailure(String),
}

/// Upload formats the importer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Doc,
    Docx,
}

impl DocumentKind {
    /// Maps a declared media type to a format. Parameters such as
    /// `; charset=...` are ignored.
    pub fn from_media_type(media_type: &str) -> Result<Self, ImportError> {
        let essence = media_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            MIME_PDF => Ok(DocumentKind::Pdf),
            MIME_DOC => Ok(DocumentKind::Doc),
            MIME_DOCX => Ok(DocumentKind::Docx),
            _ => Err(ImportError::UnsupportedFileType(media_type.to_string())),
        }
    }

    fn extractor(&self) -> &'static dyn TextExtractor {
        match self {
            DocumentKind::Pdf => &PdfExtractor,
            DocumentKind::Doc => &LegacyWordExtractor,
            DocumentKind::Docx => &DocxExtractor,
        }
    }
}

/// Extracts text from `bytes` and runs the heuristics over it.
pub fn import_bytes(kind: DocumentKind, bytes: &[u8]) -> Result<ImportedResume, ImportError> {
    if bytes.is_empty() {
        return Err(ImportError::ParseFailure("Uploaded file is empty".to_string()));
    }

    let text = kind.extractor().extract(bytes)?;
    let imported = extract_resume(&text);
    info!(
        "Imported {:?} document: {} chars of text, detected {:?}",
        kind,
        text.len(),
        imported.detected
    );
    Ok(imported)
}

/// Checks `media_type` first and only then awaits `read_bytes` for the content,
/// so unsupported uploads are refused without being read. Extraction runs on
/// the blocking pool.
pub async fn import_document<F, Fut, E>(media_type: &str, read_bytes: F) -> Result<ImportedResume, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Bytes, E>>,
    E: From<ImportError>,
{
    let kind = DocumentKind::from_media_type(media_type)?;
    let bytes = read_bytes().await?;
    let imported = tokio::task::spawn_blocking(move || import_bytes(kind, &bytes))
        .await
        .map_err(|e| ImportError::ParseFailure(format!("extraction task failed: {e}")))??;
    Ok(imported)
}
