//! Plain-text extraction for the supported upload formats.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::import::ImportError;

const ZIP_SIGNATURE: &[u8] = b"PK\x03\x04";
const OLE_SIGNATURE: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Shortest run of printable characters kept when scraping a legacy Word file.
const MIN_LEGACY_RUN: usize = 12;

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ImportError>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ImportError> {
        // pdf-extract panics on some malformed inputs; treat that like any other parse error.
        let outcome = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes));
        match outcome {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(ImportError::ParseFailure(format!(
                "Failed to extract text from PDF: {e}"
            ))),
            Err(_) => Err(ImportError::ParseFailure(
                "PDF text extraction aborted on malformed content".to_string(),
            )),
        }
    }
}

/// Reads the paragraphs of `word/document.xml` from an Office Open XML package.
pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ImportError> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| ImportError::ParseFailure(format!("Not a valid DOCX package: {e}")))?;

        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .map_err(|e| ImportError::ParseFailure(format!("DOCX has no document body: {e}")))?
            .read_to_string(&mut xml)
            .map_err(|e| ImportError::ParseFailure(format!("Failed to read DOCX body: {e}")))?;

        document_xml_text(&xml)
    }
}

fn document_xml_text(xml: &str) -> Result<String, ImportError> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if e.local_name().as_ref() == b"t" {
                    in_text_run = true;
                }
            }
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"tab" => text.push('\t'),
                b"br" | b"cr" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text_run => {
                let unescaped = t
                    .unescape()
                    .map_err(|e| ImportError::ParseFailure(format!("Bad DOCX text: {e}")))?;
                text.push_str(&unescaped);
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text_run = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(ImportError::ParseFailure(format!(
                    "Malformed DOCX XML at position {}: {e}",
                    reader.buffer_position()
                )))
            }
        }
    }

    Ok(text)
}

/// Best-effort reader for `application/msword` uploads.
///
/// Files that are really DOCX packages (a common mislabel) go through
/// [`DocxExtractor`]. Genuine Word 97-2003 files are scraped for printable text
/// runs, either UTF-16LE or 8-bit, whichever yields more.
pub struct LegacyWordExtractor;

impl TextExtractor for LegacyWordExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ImportError> {
        if bytes.starts_with(ZIP_SIGNATURE) {
            return DocxExtractor.extract(bytes);
        }
        if !bytes.starts_with(OLE_SIGNATURE) {
            return Err(ImportError::ParseFailure(
                "Not a Word document (missing compound file header)".to_string(),
            ));
        }

        let body = &bytes[OLE_SIGNATURE.len()..];
        let wide = utf16_runs(body);
        let narrow = ascii_runs(body);
        let runs = if wide.iter().map(String::len).sum::<usize>()
            >= narrow.iter().map(String::len).sum::<usize>()
        {
            wide
        } else {
            narrow
        };

        Ok(runs.join("\n"))
    }
}

fn is_text_byte(b: u8) -> bool {
    (0x20..=0x7E).contains(&b) || b == b'\t' || b == b'\r'
}

fn utf16_runs(bytes: &[u8]) -> Vec<String> {
    let mut runs = Vec::new();
    let mut current = String::new();
    for pair in bytes.chunks_exact(2) {
        if pair[1] == 0 && is_text_byte(pair[0]) {
            current.push(if pair[0] == b'\r' { '\n' } else { pair[0] as char });
        } else {
            flush_run(&mut current, &mut runs);
        }
    }
    flush_run(&mut current, &mut runs);
    runs
}

fn ascii_runs(bytes: &[u8]) -> Vec<String> {
    let mut runs = Vec::new();
    let mut current = String::new();
    for &b in bytes {
        if is_text_byte(b) {
            current.push(if b == b'\r' { '\n' } else { b as char });
        } else {
            flush_run(&mut current, &mut runs);
        }
    }
    flush_run(&mut current, &mut runs);
    runs
}

fn flush_run(current: &mut String, runs: &mut Vec<String>) {
    if current.trim().chars().count() >= MIN_LEGACY_RUN {
        runs.push(current.trim().to_string());
    }
    current.clear();
}
