pub mod classify;
pub mod error;
pub mod extraction;
pub mod matching;
pub mod model;
pub mod parsing;
pub mod rules;
pub mod scrape;

use classify::SectionClassifier;
use error::SiftError;
use extraction::DocumentLoader;
use model::{JobPosting, ParsedDocument};
use parsing::CvExtractor;
use scrape::{AdapterRegistry, JobPostingExtractor, PageFetcher};
use tracing::info;

pub use matching::{score_match, tailor, MatchReport, Tailoring};

/// Main API entry point for CVs: decode a document and split it into sections.
///
/// `loader` decides the input format; `classifier` supplies the heading
/// vocabulary (normally [`SectionClassifier::builtin`] for CVs).
pub fn parse_cv(
    bytes: &[u8],
    loader: &dyn DocumentLoader,
    classifier: &SectionClassifier,
) -> Result<ParsedDocument, SiftError> {
    let paragraphs = loader.load_paragraphs(bytes)?;
    info!(
        loader = loader.backend_name(),
        paragraphs = paragraphs.len(),
        "loaded CV document"
    );
    Ok(CvExtractor::new(classifier).extract(&paragraphs))
}

/// Main API entry point for job postings: fetch `url` and extract its fields
/// and sections.
///
/// Fails with a fetch error when the page cannot be retrieved, and with
/// [`SiftError::Extraction`] when it was retrieved but nothing recognisable
/// was found on it.
pub fn scrape_job(
    url: &str,
    fetcher: &dyn PageFetcher,
    adapters: &AdapterRegistry,
    classifier: &SectionClassifier,
) -> Result<JobPosting, SiftError> {
    info!(url, fetcher = fetcher.backend_name(), "scraping job posting");
    JobPostingExtractor::new(fetcher, adapters, classifier).extract(url)
}
