use crate::model::{JobPosting, ParsedDocument, SectionType};
use regex::{Captures, Regex};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::LazyLock;
use tracing::info;

/// Lines shorter than this (in characters) are not key points.
const MIN_KEY_POINT_CHARS: usize = 11;

/// Coverage of a posting's key points by a CV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    /// Percentage of key points covered, 0 to 100, two decimal places.
    pub match_score: Decimal,
    pub matches: Vec<String>,
    pub opportunities: Vec<String>,
}

fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty())
}

/// Requirement and responsibility lines of a posting.
///
/// Falls back to the description section, then the description field, when
/// the posting has neither requirements nor responsibilities.
pub fn key_points(posting: &JobPosting) -> Vec<String> {
    let mut points: Vec<&str> = [SectionType::Requirements, SectionType::Responsibilities]
        .into_iter()
        .filter_map(|kind| posting.sections.get(kind))
        .flat_map(|section| lines(&section.content))
        .collect();

    if points.is_empty() {
        let fallback = posting
            .sections
            .get(SectionType::Description)
            .map(|s| s.content.as_str())
            .or(posting.description.as_deref())
            .unwrap_or("");
        points.extend(lines(fallback));
    }

    points
        .into_iter()
        .filter(|p| p.chars().count() >= MIN_KEY_POINT_CHARS)
        .map(str::to_string)
        .collect()
}

/// Lower-cased text of every CV field: metadata, preamble and section content.
pub fn cv_text(cv: &ParsedDocument) -> String {
    cv.metadata
        .values()
        .map(String::as_str)
        .chain(cv.preamble.as_deref())
        .chain(cv.sections.iter().map(|(_, s)| s.content.as_str()))
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Score how well `cv` covers the key points of `posting`.
///
/// A key point matches when any of its words occurs anywhere in the CV text.
/// With no key points the score is zero.
pub fn score_match(cv: &ParsedDocument, posting: &JobPosting) -> MatchReport {
    let haystack = cv_text(cv);
    let mut matches = Vec::new();
    let mut opportunities = Vec::new();

    for point in key_points(posting) {
        let lowered = point.to_lowercase();
        let words: BTreeSet<&str> = lowered.split_whitespace().collect();
        if words.iter().any(|w| haystack.contains(w)) {
            matches.push(point);
        } else {
            opportunities.push(point);
        }
    }

    let total = matches.len() + opportunities.len();
    let match_score = if total == 0 {
        Decimal::ZERO
    } else {
        (Decimal::from(matches.len()) * Decimal::ONE_HUNDRED / Decimal::from(total))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
    };

    info!(
        score = %match_score,
        matches = matches.len(),
        opportunities = opportunities.len(),
        "match scored"
    );

    MatchReport {
        match_score,
        matches,
        opportunities,
    }
}

/// CV sections reworked to suit one posting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tailoring {
    /// Skill lines, those the posting mentions first.
    pub skills: Vec<String>,
    /// Experience content with words the posting uses upper-cased.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
}

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("word pattern is valid"));

/// Lower-cased words used anywhere in the posting's sections, with
/// surrounding punctuation removed.
pub fn job_terms(posting: &JobPosting) -> BTreeSet<String> {
    posting
        .sections
        .iter()
        .flat_map(|(_, s)| s.content.split_whitespace())
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Skill lines reordered so those mentioned in the posting come first.
///
/// Order is otherwise preserved; blank lines are dropped.
pub fn prioritize_skills(skills: &str, posting: &JobPosting) -> Vec<String> {
    let job_text = posting
        .sections
        .iter()
        .map(|(_, s)| s.content.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    let mut ordered: Vec<String> = lines(skills).map(str::to_string).collect();
    ordered.sort_by_key(|skill| !job_text.contains(&skill.to_lowercase()));
    ordered
}

/// Upper-case every word of `experience` that appears in `terms`.
pub fn highlight_terms(experience: &str, terms: &BTreeSet<String>) -> String {
    WORD.replace_all(experience, |caps: &Captures| {
        let word = &caps[0];
        if terms.contains(&word.to_lowercase()) {
            word.to_uppercase()
        } else {
            word.to_string()
        }
    })
    .into_owned()
}

/// Reorder the CV's skills and highlight its experience for `posting`.
pub fn tailor(cv: &ParsedDocument, posting: &JobPosting) -> Tailoring {
    let skills = cv
        .sections
        .get(SectionType::Skills)
        .map(|s| prioritize_skills(&s.content, posting))
        .unwrap_or_default();

    let terms = job_terms(posting);
    let experience = cv
        .sections
        .get(SectionType::Experience)
        .map(|s| highlight_terms(&s.content, &terms));

    info!(
        skills = skills.len(),
        terms = terms.len(),
        "tailored CV to posting"
    );

    Tailoring { skills, experience }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Sections;
    use rust_decimal_macros::dec;

    fn posting(sections: &[(SectionType, &str)]) -> JobPosting {
        let mut all = Sections::new();
        for (kind, content) in sections {
            all.append(*kind, "", content.to_string());
        }
        JobPosting {
            sections: all,
            ..Default::default()
        }
    }

    fn cv(skills: &str) -> ParsedDocument {
        let mut sections = Sections::new();
        sections.append(SectionType::Skills, "Skills", skills.to_string());
        ParsedDocument {
            sections,
            ..Default::default()
        }
    }

    #[test]
    fn test_key_points_skip_short_lines() {
        let job = posting(&[
            (SectionType::Requirements, "Rust\n5 years of Rust\n\n"),
            (SectionType::Responsibilities, "Own the API layer"),
            (SectionType::Benefits, "Free lunch every day"),
        ]);
        assert_eq!(key_points(&job), vec!["5 years of Rust", "Own the API layer"]);
    }

    #[test]
    fn test_key_points_fall_back_to_description() {
        let job = posting(&[(SectionType::Description, "Write services in Go\nShip")]);
        assert_eq!(key_points(&job), vec!["Write services in Go"]);

        let field_only = JobPosting {
            description: Some("Maintain the billing pipeline".into()),
            ..Default::default()
        };
        assert_eq!(key_points(&field_only), vec!["Maintain the billing pipeline"]);
    }

    #[test]
    fn test_score_partial_match() {
        let job = posting(&[(
            SectionType::Requirements,
            "Experience with PostgreSQL\nKubernetes operations\nFluent Japanese speaker",
        )]);
        let report = score_match(&cv("PostgreSQL, Docker\nKubernetes"), &job);
        assert_eq!(
            report.matches,
            vec!["Experience with PostgreSQL", "Kubernetes operations"]
        );
        assert_eq!(report.opportunities, vec!["Fluent Japanese speaker"]);
        assert_eq!(report.match_score, dec!(66.67));
    }

    #[test]
    fn test_score_substring_semantics() {
        // Words match as substrings of the CV text, so "go" hits "google"
        let job = posting(&[(SectionType::Requirements, "Go microservices")]);
        let report = score_match(&cv("Worked at Google"), &job);
        assert_eq!(report.match_score, dec!(100));
    }

    #[test]
    fn test_score_no_key_points() {
        let report = score_match(&cv("Rust"), &JobPosting::default());
        assert_eq!(report.match_score, Decimal::ZERO);
        assert!(report.matches.is_empty());
        assert!(report.opportunities.is_empty());
    }

    #[test]
    fn test_cv_text_includes_metadata_and_preamble() {
        let mut doc = cv("Rust");
        doc.metadata.insert("email".into(), "Ada@Example.com".into());
        doc.preamble = Some("Ada Lovelace".into());
        let text = cv_text(&doc);
        assert!(text.contains("ada@example.com"));
        assert!(text.contains("ada lovelace"));
        assert!(text.contains("rust"));
    }

    #[test]
    fn test_prioritize_skills() {
        let job = posting(&[(SectionType::Requirements, "Strong SQL and Python skills")]);
        let ordered = prioritize_skills("Excel\nPython\n\nTableau\nSQL", &job);
        assert_eq!(ordered, vec!["Python", "SQL", "Excel", "Tableau"]);
    }

    #[test]
    fn test_job_terms() {
        let job = posting(&[
            (SectionType::Requirements, "Rust and Go"),
            (SectionType::Benefits, "Remote RUST meetups"),
        ]);
        let terms: Vec<_> = job_terms(&job).into_iter().collect();
        assert_eq!(terms, vec!["and", "go", "meetups", "remote", "rust"]);
    }

    #[test]
    fn test_job_terms_strip_punctuation() {
        let job = posting(&[(SectionType::Requirements, "Kubernetes, (Helm) and CI/CD.")]);
        let terms = job_terms(&job);
        assert!(terms.contains("kubernetes"));
        assert!(terms.contains("helm"));
        assert!(terms.contains("ci/cd"));
        assert!(!terms.contains("kubernetes,"));
    }

    #[test]
    fn test_highlight_terms_whole_words() {
        let terms: BTreeSet<String> = ["rust", "api"].iter().map(|s| s.to_string()).collect();
        assert_eq!(
            highlight_terms("Built a Rust API; trusted by rapid teams", &terms),
            "Built a RUST API; trusted by rapid teams"
        );
    }

    #[test]
    fn test_tailor_uses_skills_and_experience() {
        let mut doc = cv("Excel\nKubernetes\nTerraform");
        doc.sections.append(
            SectionType::Experience,
            "Experience",
            "Ran kubernetes clusters at **Acme**".to_string(),
        );
        let job = posting(&[(SectionType::Requirements, "Kubernetes and Terraform in production")]);

        let tailored = tailor(&doc, &job);
        assert_eq!(tailored.skills, vec!["Kubernetes", "Terraform", "Excel"]);
        assert_eq!(
            tailored.experience.as_deref(),
            Some("Ran KUBERNETES clusters at **Acme**")
        );
    }

    #[test]
    fn test_tailor_without_sections() {
        let tailored = tailor(&ParsedDocument::default(), &JobPosting::default());
        assert!(tailored.skills.is_empty());
        assert_eq!(tailored.experience, None);
        let json = serde_json::to_value(&tailored).unwrap();
        assert!(json.get("experience").is_none());
    }
}
