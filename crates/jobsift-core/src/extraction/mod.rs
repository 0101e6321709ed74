pub mod docx;

use crate::error::SiftError;
use crate::model::Paragraph;

pub use docx::DocxLoader;

/// Trait for document-format backends that yield a paragraph stream.
pub trait DocumentLoader: Send + Sync {
    /// Decode document bytes into paragraphs, in reading order.
    fn load_paragraphs(&self, bytes: &[u8]) -> Result<Vec<Paragraph>, SiftError>;

    /// Name of this loader (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Reads a pre-parsed paragraph stream:
/// `[{"runs": [{"text": "Skills", "bold": true}]}, ...]`.
#[derive(Debug, Default)]
pub struct JsonLoader;

impl DocumentLoader for JsonLoader {
    fn load_paragraphs(&self, bytes: &[u8]) -> Result<Vec<Paragraph>, SiftError> {
        serde_json::from_slice(bytes)
            .map_err(|e| SiftError::DocumentRead(format!("invalid paragraph JSON: {e}")))
    }

    fn backend_name(&self) -> &str {
        "json"
    }
}

/// Treats each line of UTF-8 text as an unstyled paragraph.
#[derive(Debug, Default)]
pub struct TextLoader;

impl DocumentLoader for TextLoader {
    fn load_paragraphs(&self, bytes: &[u8]) -> Result<Vec<Paragraph>, SiftError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| SiftError::DocumentRead(format!("text is not valid UTF-8: {e}")))?;
        Ok(text.lines().map(Paragraph::plain).collect())
    }

    fn backend_name(&self) -> &str {
        "text"
    }
}
