use crate::classify::SectionClassifier;
use crate::model::{DocumentKind, Paragraph, ParsedDocument, SectionType};
use crate::parsing::contact::extract_contact;
use crate::parsing::markup::render_runs;
use crate::parsing::SectionBuilder;
use tracing::{debug, info};

/// Segments a CV paragraph stream into labelled sections.
pub struct CvExtractor<'a> {
    classifier: &'a SectionClassifier,
}

impl<'a> CvExtractor<'a> {
    pub fn new(classifier: &'a SectionClassifier) -> Self {
        CvExtractor { classifier }
    }

    /// Extractor using the builtin CV vocabulary.
    pub fn builtin() -> CvExtractor<'static> {
        CvExtractor::new(SectionClassifier::builtin(DocumentKind::Cv))
    }

    pub fn extract(&self, paragraphs: &[Paragraph]) -> ParsedDocument {
        let mut builder = SectionBuilder::new();

        for paragraph in paragraphs {
            let text = paragraph.text();
            let text = text.trim();
            if text.is_empty() {
                continue;
            }

            match self.classifier.classify(text) {
                Some(section) => {
                    info!(section = %section, title = text, "found CV section");
                    builder.open(section, text);
                }
                None => {
                    let rendered = render_runs(&paragraph.runs);
                    debug!(line = %rendered, "CV content line");
                    builder.push(rendered);
                }
            }
        }

        let (sections, preamble) = builder.finish();

        // Only the contact block is searched, so addresses in references or
        // project descriptions are not picked up
        let metadata = sections
            .get(SectionType::Contact)
            .map(|contact| extract_contact(&contact.content))
            .unwrap_or_default();

        info!(
            sections = sections.len(),
            metadata = metadata.len(),
            "CV extraction completed"
        );

        ParsedDocument {
            metadata,
            sections,
            preamble,
        }
    }
}
