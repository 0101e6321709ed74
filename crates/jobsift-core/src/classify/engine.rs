use crate::model::{DocumentKind, SectionType};
use crate::rules::builtin;
use crate::rules::schema::SectionRules;
use std::sync::LazyLock;

static CV_CLASSIFIER: LazyLock<SectionClassifier> =
    LazyLock::new(|| SectionClassifier::new(builtin::rules_for(DocumentKind::Cv)));

static JOB_CLASSIFIER: LazyLock<SectionClassifier> =
    LazyLock::new(|| SectionClassifier::new(builtin::rules_for(DocumentKind::Job)));

/// Classify a line with the builtin vocabulary for `kind`.
pub fn classify(line: &str, kind: DocumentKind) -> Option<SectionType> {
    SectionClassifier::builtin(kind).classify(line)
}

/// Decides whether a short line is a section heading, and of which type.
///
/// Matching runs in three passes of decreasing strictness: exact phrase,
/// phrase contained in the line as whole words, then (CV only) loose keyword
/// groups matched anywhere in the line. A stricter pass always wins over a
/// looser one, and within a pass the first section type in declaration order
/// wins.
#[derive(Debug, Clone)]
pub struct SectionClassifier {
    kind: DocumentKind,
    max_chars: usize,
    max_tokens: usize,
    phrases: Vec<(SectionType, Vec<String>)>,
    keywords: Vec<(SectionType, Vec<String>)>,
}

impl SectionClassifier {
    pub fn new(rules: &SectionRules) -> Self {
        let phrases = rules
            .phrases
            .iter()
            .map(|(section, list)| (*section, lowercase_all(list)))
            .collect();

        let keywords = match rules.kind {
            DocumentKind::Cv => rules
                .keywords
                .iter()
                .map(|g| (g.section, lowercase_all(&g.words)))
                .collect(),
            DocumentKind::Job => Vec::new(),
        };

        SectionClassifier {
            kind: rules.kind,
            max_chars: rules.max_heading_chars,
            max_tokens: rules.max_heading_tokens,
            phrases,
            keywords,
        }
    }

    /// Shared classifier built from the embedded presets.
    pub fn builtin(kind: DocumentKind) -> &'static SectionClassifier {
        match kind {
            DocumentKind::Cv => &CV_CLASSIFIER,
            DocumentKind::Job => &JOB_CLASSIFIER,
        }
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn classify(&self, line: &str) -> Option<SectionType> {
        let text = normalize(line);
        if text.is_empty() {
            return None;
        }

        // Headings are short
        if text.chars().count() > self.max_chars {
            return None;
        }
        if text.split_whitespace().count() > self.max_tokens {
            return None;
        }

        let exact = self
            .phrases
            .iter()
            .find(|(_, list)| list.iter().any(|p| *p == text));
        if let Some((section, _)) = exact {
            return Some(*section);
        }

        let partial = self
            .phrases
            .iter()
            .find(|(_, list)| list.iter().any(|p| contains_phrase(&text, p)));
        if let Some((section, _)) = partial {
            return Some(*section);
        }

        self.keywords
            .iter()
            .find(|(_, words)| words.iter().any(|w| text.contains(w.as_str())))
            .map(|(section, _)| *section)
    }
}

/// Trim, lower-case and fold typographic apostrophes to `'`.
fn normalize(line: &str) -> String {
    line.trim()
        .to_lowercase()
        .replace(['\u{2019}', '\u{2018}'], "'")
}

/// True if `phrase` occurs in `text` with no letter or digit directly
/// before it, and none after it other than a plural `s`.
fn contains_phrase(text: &str, phrase: &str) -> bool {
    text.match_indices(phrase).any(|(start, _)| {
        let before = text[..start].chars().next_back();
        let mut rest = text[start + phrase.len()..].chars();
        let after = match rest.next() {
            Some('s') => rest.next(),
            other => other,
        };
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

fn lowercase_all(items: &[String]) -> Vec<String> {
    items.iter().map(|s| normalize(s)).collect()
}
