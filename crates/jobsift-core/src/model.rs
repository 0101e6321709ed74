use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Which vocabulary a document is segmented with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Cv,
    Job,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Cv => write!(f, "cv"),
            DocumentKind::Job => write!(f, "job"),
        }
    }
}

/// Canonical section types. Declaration order is the tie-break order used
/// by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Education,
    Experience,
    Skills,
    Summary,
    Contact,
    Projects,
    Certifications,
    Languages,
    Interests,
    Requirements,
    Responsibilities,
    Benefits,
    About,
    Description,
}

impl SectionType {
    pub const CV: &'static [SectionType] = &[
        SectionType::Education,
        SectionType::Experience,
        SectionType::Skills,
        SectionType::Summary,
        SectionType::Contact,
        SectionType::Projects,
        SectionType::Certifications,
        SectionType::Languages,
        SectionType::Interests,
    ];

    pub const JOB: &'static [SectionType] = &[
        SectionType::Requirements,
        SectionType::Responsibilities,
        SectionType::Benefits,
        SectionType::About,
        SectionType::Description,
    ];

    pub fn kind(self) -> DocumentKind {
        if SectionType::CV.contains(&self) {
            DocumentKind::Cv
        } else {
            DocumentKind::Job
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SectionType::Education => "education",
            SectionType::Experience => "experience",
            SectionType::Skills => "skills",
            SectionType::Summary => "summary",
            SectionType::Contact => "contact",
            SectionType::Projects => "projects",
            SectionType::Certifications => "certifications",
            SectionType::Languages => "languages",
            SectionType::Interests => "interests",
            SectionType::Requirements => "requirements",
            SectionType::Responsibilities => "responsibilities",
            SectionType::Benefits => "benefits",
            SectionType::About => "about",
            SectionType::Description => "description",
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A styled text run inside a paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
}

impl TextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        TextRun {
            text: text.into(),
            bold: false,
            italic: false,
        }
    }
}

/// One paragraph of a flowed document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub runs: Vec<TextRun>,
}

impl Paragraph {
    /// A paragraph made of a single unstyled run.
    pub fn plain(text: impl Into<String>) -> Self {
        Paragraph {
            runs: vec![TextRun::plain(text)],
        }
    }

    /// Raw paragraph text: the runs concatenated without separators.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Heading text as it appeared in the source. Empty for the default bucket.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    pub content: String,
}

/// Sections keyed by canonical type, kept in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    entries: Vec<(SectionType, Section)>,
}

impl Sections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: SectionType) -> Option<&Section> {
        self.entries
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, s)| s)
    }

    pub fn contains(&self, kind: SectionType) -> bool {
        self.get(kind).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SectionType, &Section)> {
        self.entries.iter().map(|(k, s)| (*k, s))
    }

    pub fn keys(&self) -> Vec<SectionType> {
        self.entries.iter().map(|(k, _)| *k).collect()
    }

    /// Add content under `kind`. A repeated type appends to the existing
    /// content and keeps the first title.
    pub fn append(&mut self, kind: SectionType, title: &str, content: String) {
        if let Some((_, existing)) = self.entries.iter_mut().find(|(k, _)| *k == kind) {
            if !existing.content.is_empty() {
                existing.content.push('\n');
            }
            existing.content.push_str(&content);
        } else {
            self.entries.push((
                kind,
                Section {
                    title: title.to_string(),
                    content,
                },
            ));
        }
    }
}

impl Serialize for Sections {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (kind, section) in &self.entries {
            map.serialize_entry(kind, section)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Sections {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SectionsVisitor;

        impl<'de> Visitor<'de> for SectionsVisitor {
            type Value = Sections;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of section type to section")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Sections, A::Error> {
                let mut sections = Sections::new();
                while let Some((kind, section)) = access.next_entry::<SectionType, Section>()? {
                    sections.append(kind, &section.title, section.content);
                }
                Ok(sections)
            }
        }

        deserializer.deserialize_map(SectionsVisitor)
    }
}

/// Structured result of a CV extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDocument {
    /// Contact details found by pattern matching (`email`, `phone`).
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    #[serde(default)]
    pub sections: Sections,
    /// Text appearing before the first recognised heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preamble: Option<String>,
}

/// Top-level fields located by a site adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobFields {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl JobFields {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.company.is_none()
            && self.location.is_none()
            && self.description.is_none()
    }
}

/// Structured result of a job-posting extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub sections: Sections,
}
