use crate::error::SiftError;
use crate::extraction::DocumentLoader;
use crate::model::{Paragraph, TextRun};
use quick_xml::events::{BytesStart, Event};
use std::io::{Cursor, Read};

const DOCUMENT_PART: &str = "word/document.xml";

/// Loader for Office Open XML word-processing files (.docx).
///
/// Reads the main document part and keeps run-level bold/italic flags.
/// Paragraph styles are not resolved, so emphasis inherited from a style
/// (e.g. a bold "Heading 1") is not reported.
#[derive(Debug, Default)]
pub struct DocxLoader;

impl DocxLoader {
    pub fn new() -> Self {
        DocxLoader
    }
}

impl DocumentLoader for DocxLoader {
    fn load_paragraphs(&self, bytes: &[u8]) -> Result<Vec<Paragraph>, SiftError> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| SiftError::DocumentRead(format!("not a docx container: {e}")))?;

        let mut part = archive
            .by_name(DOCUMENT_PART)
            .map_err(|e| SiftError::DocumentRead(format!("missing {DOCUMENT_PART}: {e}")))?;

        let mut xml = String::new();
        part.read_to_string(&mut xml)
            .map_err(|e| SiftError::DocumentRead(format!("unreadable {DOCUMENT_PART}: {e}")))?;

        parse_document_xml(&xml)
    }

    fn backend_name(&self) -> &str {
        "docx"
    }
}

/// Parse a WordprocessingML body into paragraphs.
pub fn parse_document_xml(xml: &str) -> Result<Vec<Paragraph>, SiftError> {
    let mut reader = quick_xml::Reader::from_str(xml);
    let mut buf = Vec::new();

    let mut paragraphs = Vec::new();
    // Stacks, because text boxes nest paragraphs inside runs
    let mut open_paragraphs: Vec<Paragraph> = Vec::new();
    let mut open_runs: Vec<TextRun> = Vec::new();
    let mut in_text = false;
    let mut in_paragraph_props = false;

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| SiftError::DocumentRead(format!("malformed document XML: {e}")))?;

        match event {
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => open_paragraphs.push(Paragraph::default()),
                b"w:r" => open_runs.push(TextRun::plain("")),
                b"w:t" => in_text = true,
                b"w:pPr" => in_paragraph_props = true,
                b"w:b" | b"w:i" => apply_toggle(&e, &mut open_runs, in_paragraph_props),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:p" => paragraphs.push(Paragraph::default()),
                b"w:b" | b"w:i" => apply_toggle(&e, &mut open_runs, in_paragraph_props),
                b"w:tab" | b"w:br" | b"w:cr" => {
                    if let Some(run) = open_runs.last_mut() {
                        run.text.push(' ');
                    }
                }
                _ => {}
            },
            Event::Text(t) if in_text => {
                let text = t
                    .unescape()
                    .map_err(|e| SiftError::DocumentRead(format!("bad text content: {e}")))?;
                if let Some(run) = open_runs.last_mut() {
                    run.text.push_str(&text);
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:pPr" => in_paragraph_props = false,
                b"w:r" => {
                    if let Some(run) = open_runs.pop() {
                        if let Some(paragraph) = open_paragraphs.last_mut() {
                            paragraph.runs.push(run);
                        }
                    }
                }
                b"w:p" => {
                    if let Some(paragraph) = open_paragraphs.pop() {
                        paragraphs.push(paragraph);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

/// Apply a `<w:b/>` or `<w:i/>` run property to the innermost open run.
fn apply_toggle(e: &BytesStart, open_runs: &mut [TextRun], in_paragraph_props: bool) {
    if in_paragraph_props {
        return;
    }
    let Some(run) = open_runs.last_mut() else {
        return;
    };
    let on = toggle_value(e);
    match e.name().as_ref() {
        b"w:b" => run.bold = on,
        b"w:i" => run.italic = on,
        _ => {}
    }
}

/// `w:val` of an on/off property. Absent means on.
fn toggle_value(e: &BytesStart) -> bool {
    match e.try_get_attribute("w:val").ok().flatten() {
        Some(attr) => !matches!(attr.value.as_ref(), b"0" | b"false" | b"off"),
        None => true,
    }
}
