pub mod contact;
pub mod cv;
pub mod job_text;
pub mod markup;

use crate::model::{SectionType, Sections};

pub use cv::CvExtractor;
pub use job_text::segment_job_text;

/// Accumulates classified lines into sections.
///
/// Lines are buffered under the currently open section and flushed when the
/// next heading opens. A section that never receives content is not
/// recorded. Lines seen before any heading go to the default section when
/// one was given, otherwise to the preamble.
#[derive(Debug, Default)]
pub(crate) struct SectionBuilder {
    sections: Sections,
    current: Option<(SectionType, String)>,
    buffer: Vec<String>,
    preamble: Vec<String>,
}

impl SectionBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Start with `section` open and untitled.
    pub(crate) fn with_default(section: SectionType) -> Self {
        SectionBuilder {
            current: Some((section, String::new())),
            ..Self::default()
        }
    }

    pub(crate) fn open(&mut self, section: SectionType, title: &str) {
        self.flush();
        self.current = Some((section, title.to_string()));
    }

    pub(crate) fn push(&mut self, line: String) {
        if self.current.is_some() {
            self.buffer.push(line);
        } else {
            self.preamble.push(line);
        }
    }

    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        if let Some((section, title)) = &self.current {
            self.sections
                .append(*section, title, self.buffer.join("\n"));
        }
        self.buffer.clear();
    }

    /// Flush the open section and return the sections with any preamble.
    pub(crate) fn finish(mut self) -> (Sections, Option<String>) {
        self.flush();
        let preamble = if self.preamble.is_empty() {
            None
        } else {
            Some(self.preamble.join("\n"))
        };
        (self.sections, preamble)
    }
}
