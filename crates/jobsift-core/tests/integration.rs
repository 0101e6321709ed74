//! Integration tests for the parse_cv() and scrape_job() pipelines.
//!
//! Uses a MockLoader and MockFetcher that return canned paragraphs and markup,
//! so nothing here touches the network. DOCX fixtures are zipped in memory.

use jobsift_core::classify::SectionClassifier;
use jobsift_core::error::SiftError;
use jobsift_core::extraction::{DocumentLoader, DocxLoader};
use jobsift_core::model::{DocumentKind, Paragraph, SectionType, TextRun};
use jobsift_core::scrape::adapters::{AdapterDef, FieldSelectors};
use jobsift_core::scrape::{AdapterRegistry, BoardAdapter, PageFetcher};
use jobsift_core::{parse_cv, score_match, scrape_job, tailor};
use rust_decimal_macros::dec;
use std::io::{Cursor, Write};

struct MockLoader {
    paragraphs: Vec<Paragraph>,
}

impl DocumentLoader for MockLoader {
    fn load_paragraphs(&self, _bytes: &[u8]) -> Result<Vec<Paragraph>, SiftError> {
        Ok(self.paragraphs.clone())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

enum MockFetcher {
    Page(&'static str),
    NotFound,
}

impl PageFetcher for MockFetcher {
    fn fetch(&self, url: &str) -> Result<String, SiftError> {
        match self {
            MockFetcher::Page(html) => Ok(html.to_string()),
            MockFetcher::NotFound => Err(SiftError::FetchStatus {
                url: url.to_string(),
                status: 404,
            }),
        }
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

fn loader(lines: &[&str]) -> MockLoader {
    MockLoader {
        paragraphs: lines.iter().map(|l| Paragraph::plain(*l)).collect(),
    }
}

fn cv_classifier() -> &'static SectionClassifier {
    SectionClassifier::builtin(DocumentKind::Cv)
}

fn job_classifier() -> &'static SectionClassifier {
    SectionClassifier::builtin(DocumentKind::Job)
}

fn docx(body: &str) -> Vec<u8> {
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    );
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("word/document.xml", zip::write::SimpleFileOptions::default())
        .unwrap();
    writer.write_all(xml.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

// ---------------------------------------------------------------------------
// CV pipeline
// ---------------------------------------------------------------------------
#[test]
fn cv_end_to_end_sections_and_contact() {
    let doc = parse_cv(
        &[],
        &loader(&[
            "Summary",
            "Experienced engineer.",
            "Skills",
            "Python, Go",
            "Contact",
            "jane@x.com 555-123-4567",
        ]),
        cv_classifier(),
    )
    .unwrap();

    assert_eq!(
        doc.sections.keys(),
        vec![SectionType::Summary, SectionType::Skills, SectionType::Contact]
    );
    assert_eq!(
        doc.sections.get(SectionType::Summary).unwrap().content,
        "Experienced engineer."
    );
    assert_eq!(doc.sections.get(SectionType::Skills).unwrap().content, "Python, Go");
    assert_eq!(
        doc.sections.get(SectionType::Contact).unwrap().content,
        "jane@x.com 555-123-4567"
    );
    assert_eq!(doc.metadata.get("email").map(String::as_str), Some("jane@x.com"));
    assert_eq!(doc.metadata.get("phone").map(String::as_str), Some("555-123-4567"));
    assert_eq!(doc.preamble, None);

    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(json["sections"]["summary"]["title"], "Summary");
    assert_eq!(json["sections"]["contact"]["content"], "jane@x.com 555-123-4567");
}

#[test]
fn cv_extraction_is_idempotent() {
    let source = MockLoader {
        paragraphs: vec![
            Paragraph::plain("Jane Doe"),
            Paragraph::plain("Work Experience"),
            Paragraph {
                runs: vec![
                    TextRun {
                        text: "Acme".into(),
                        bold: true,
                        italic: false,
                    },
                    TextRun::plain("2019-2024"),
                ],
            },
            Paragraph::plain("Education"),
            Paragraph::plain("BSc Physics"),
        ],
    };
    let first = parse_cv(&[], &source, cv_classifier()).unwrap();
    let second = parse_cv(&[], &source, cv_classifier()).unwrap();
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
    assert_eq!(
        first.sections.get(SectionType::Experience).unwrap().content,
        "**Acme** 2019-2024"
    );
    assert_eq!(first.preamble.as_deref(), Some("Jane Doe"));
}

#[test]
fn cv_without_contact_has_empty_metadata() {
    let doc = parse_cv(
        &[],
        &loader(&["Skills", "Rust", "mail me: jane@x.com"]),
        cv_classifier(),
    )
    .unwrap();
    assert!(doc.metadata.is_empty());
    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(json["metadata"], serde_json::json!({}));
}

#[test]
fn cv_from_docx_file() {
    let bytes = docx(concat!(
        r#"<w:p><w:r><w:rPr><w:b/></w:rPr><w:t>Professional Summary</w:t></w:r></w:p>"#,
        r#"<w:p><w:r><w:t xml:space="preserve">Backend engineer with </w:t></w:r><w:r><w:rPr><w:i/></w:rPr><w:t>ten</w:t></w:r><w:r><w:t xml:space="preserve"> years.</w:t></w:r></w:p>"#,
        r#"<w:p/>"#,
        r#"<w:p><w:r><w:t>Contact Information</w:t></w:r></w:p>"#,
        r#"<w:p><w:r><w:t>+44 20 7946 0958 | ada@example.org</w:t></w:r></w:p>"#,
    ));
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cv.docx");
    std::fs::write(&path, &bytes).unwrap();

    let on_disk = std::fs::read(&path).unwrap();
    let doc = parse_cv(&on_disk, &DocxLoader::new(), cv_classifier()).unwrap();

    assert_eq!(
        doc.sections.keys(),
        vec![SectionType::Summary, SectionType::Contact]
    );
    assert_eq!(
        doc.sections.get(SectionType::Summary).unwrap().content,
        "Backend engineer with *ten* years."
    );
    assert_eq!(
        doc.metadata.get("email").map(String::as_str),
        Some("ada@example.org")
    );
    assert_eq!(
        doc.metadata.get("phone").map(String::as_str),
        Some("+44 20 7946 0958")
    );
}

#[test]
fn cv_from_corrupt_docx_is_document_error() {
    let err = parse_cv(b"PK\x03\x04 not really", &DocxLoader::new(), cv_classifier()).unwrap_err();
    assert!(matches!(err, SiftError::DocumentRead(_)));
}

// ---------------------------------------------------------------------------
// Job pipeline
// ---------------------------------------------------------------------------
const SEEK_PAGE: &str = r#"<!DOCTYPE html><html><body>
<h1 data-automation="job-detail-title">Senior Rust Developer</h1>
<span data-automation="advertiser-name">Harbour Labs</span>
<span data-automation="job-detail-location">Sydney NSW</span>
<div data-automation="jobAdDetails">
  <p>Harbour Labs builds trading infrastructure.</p>
  <p><strong>Responsibilities</strong></p>
  <ul><li>Design low-latency services</li><li>Review pull requests</li></ul>
  <p><strong>Requirements</strong></p>
  <ul><li>5+ years of Rust in production</li><li>Strong Linux networking</li></ul>
  <p><strong>Benefits</strong></p>
  <ul><li>Flexible hours</li></ul>
</div>
</body></html>"#;

#[test]
fn job_site_adapter_fields_and_sections() {
    let posting = scrape_job(
        "https://www.seek.com.au/job/81234567",
        &MockFetcher::Page(SEEK_PAGE),
        &AdapterRegistry::builtin(),
        job_classifier(),
    )
    .unwrap();

    assert_eq!(posting.title.as_deref(), Some("Senior Rust Developer"));
    assert_eq!(posting.company.as_deref(), Some("Harbour Labs"));
    assert_eq!(posting.location.as_deref(), Some("Sydney NSW"));
    assert_eq!(
        posting.sections.keys(),
        vec![
            SectionType::Description,
            SectionType::Responsibilities,
            SectionType::Requirements,
            SectionType::Benefits
        ]
    );
    assert_eq!(
        posting.sections.get(SectionType::Requirements).unwrap().content,
        "5+ years of Rust in production\nStrong Linux networking"
    );
    assert_eq!(
        posting.sections.get(SectionType::Description).unwrap().content,
        "Harbour Labs builds trading infrastructure."
    );

    let json = serde_json::to_value(&posting).unwrap();
    assert!(json["sections"]["description"].get("title").is_none());
}

#[test]
fn job_without_headings_collapses_to_description() {
    let posting = scrape_job(
        "https://jobs.example.net/123",
        &MockFetcher::Page(
            r#"<h1>Support Engineer</h1><div class="job-description"><p>Help our customers.</p><p>Shifts are flexible.</p></div>"#,
        ),
        &AdapterRegistry::builtin(),
        job_classifier(),
    )
    .unwrap();

    assert_eq!(posting.sections.len(), 1);
    assert_eq!(
        posting.sections.get(SectionType::Description).unwrap().content,
        "Help our customers.\nShifts are flexible."
    );
}

#[test]
fn job_fetch_failure_is_fetch_error() {
    let err = scrape_job(
        "https://www.indeed.com/viewjob?jk=gone",
        &MockFetcher::NotFound,
        &AdapterRegistry::builtin(),
        job_classifier(),
    )
    .unwrap_err();
    assert!(err.is_fetch());
    assert!(err.to_string().contains("viewjob?jk=gone"));
}

#[test]
fn job_unrecognised_layout_is_extraction_error() {
    let err = scrape_job(
        "https://www.indeed.com/viewjob?jk=1",
        &MockFetcher::Page("<html><body><span>Loading…</span></body></html>"),
        &AdapterRegistry::builtin(),
        job_classifier(),
    )
    .unwrap_err();
    assert!(matches!(err, SiftError::Extraction { .. }));
    assert!(!err.is_fetch());
}

#[test]
fn job_custom_adapter_registered_ahead_of_builtins() {
    let def: AdapterDef = serde_json::from_str(
        r##"{"name": "harbour", "domain": "seek.com.au", "title": ["span[data-automation=advertiser-name]"]}"##,
    )
    .unwrap();
    let mut adapters = AdapterRegistry::builtin();
    adapters.register(Box::new(BoardAdapter::from(def)));

    let posting = scrape_job(
        "https://www.seek.com.au/job/1",
        &MockFetcher::Page(SEEK_PAGE),
        &adapters,
        job_classifier(),
    )
    .unwrap();
    assert_eq!(posting.title.as_deref(), Some("Harbour Labs"));
    assert_eq!(posting.company, None);
    assert!(posting.sections.is_empty());

    let custom = BoardAdapter::new("empty", "example.com", FieldSelectors::default());
    assert_eq!(custom.domain(), "example.com");
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------
#[test]
fn match_cv_against_scraped_posting() {
    let cv = parse_cv(
        &[],
        &loader(&[
            "Skills",
            "Rust, Tokio, Linux",
            "Experience",
            "Built exchange gateways",
        ]),
        cv_classifier(),
    )
    .unwrap();
    let posting = scrape_job(
        "https://www.seek.com.au/job/81234567",
        &MockFetcher::Page(SEEK_PAGE),
        &AdapterRegistry::builtin(),
        job_classifier(),
    )
    .unwrap();

    let report = score_match(&cv, &posting);
    // Requirements first, then responsibilities
    assert_eq!(
        report.matches,
        vec!["5+ years of Rust in production", "Strong Linux networking"]
    );
    assert_eq!(
        report.opportunities,
        vec!["Design low-latency services", "Review pull requests"]
    );
    assert_eq!(report.match_score, dec!(50));
}

#[test]
fn match_with_no_key_points_scores_zero() {
    let cv = parse_cv(&[], &loader(&["Skills", "Rust"]), cv_classifier()).unwrap();
    let posting = jobsift_core::model::JobPosting {
        title: Some("Barista".into()),
        ..Default::default()
    };
    let report = score_match(&cv, &posting);
    assert_eq!(report.match_score, dec!(0));
    assert!(report.matches.is_empty());
    assert!(report.opportunities.is_empty());
}

#[test]
fn tailor_cv_for_scraped_posting() {
    let cv = parse_cv(
        &[],
        &loader(&[
            "Skills",
            "Excel",
            "Linux",
            "Rust",
            "Experience",
            "Built Rust gateways in production",
        ]),
        cv_classifier(),
    )
    .unwrap();
    let posting = scrape_job(
        "https://www.seek.com.au/job/81234567",
        &MockFetcher::Page(SEEK_PAGE),
        &AdapterRegistry::builtin(),
        job_classifier(),
    )
    .unwrap();

    let tailored = tailor(&cv, &posting);
    assert_eq!(tailored.skills, vec!["Linux", "Rust", "Excel"]);
    assert_eq!(
        tailored.experience.as_deref(),
        Some("Built RUST gateways IN PRODUCTION")
    );
}
