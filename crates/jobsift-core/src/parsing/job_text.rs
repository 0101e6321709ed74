use crate::classify::SectionClassifier;
use crate::model::{SectionType, Sections};
use crate::parsing::SectionBuilder;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

const BULLETS: &[char] = &['•', '·', '●', '▪', '◦', '‣', '-', '*', '–'];

static NUMBERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}[.)]\s+").expect("numbered list pattern is valid"));

/// Split posting text into logical lines.
///
/// Blank lines are dropped. A bulleted or numbered line loses its marker
/// and is further split on inline bullets, so `• Rust • Go` yields two lines.
pub fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let item = if let Some(rest) = line.strip_prefix(BULLETS) {
            Some(rest)
        } else {
            NUMBERED.find(line).map(|m| &line[m.end()..])
        };

        match item {
            Some(rest) => lines.extend(
                rest.split('•')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string),
            ),
            None => lines.push(line.to_string()),
        }
    }

    lines
}

/// Segment job-description text into sections.
///
/// Content before the first heading lands in `description`. When fewer than
/// two sections come out, the whole text is returned as a single
/// `description` section instead.
pub fn segment_job_text(text: &str, classifier: &SectionClassifier) -> Sections {
    let lines = split_lines(text);
    if lines.is_empty() {
        return Sections::new();
    }

    let mut builder = SectionBuilder::with_default(SectionType::Description);
    for line in &lines {
        match classifier.classify(line) {
            Some(section) => {
                debug!(section = %section, title = %line, "found job section");
                builder.open(section, line);
            }
            None => builder.push(line.clone()),
        }
    }

    let (sections, _) = builder.finish();
    if sections.len() >= 2 {
        return sections;
    }

    let full_text = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    let mut collapsed = Sections::new();
    collapsed.append(SectionType::Description, "", full_text);
    collapsed
}
