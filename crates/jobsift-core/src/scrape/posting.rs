use crate::classify::SectionClassifier;
use crate::error::SiftError;
use crate::model::{JobFields, JobPosting, Sections};
use crate::parsing::segment_job_text;
use crate::scrape::adapters::{AdapterRegistry, SiteAdapter};
use crate::scrape::fetcher::PageFetcher;
use scraper::Html;
use tracing::{info, warn};

/// Fetches a job page and turns it into a [`JobPosting`].
pub struct JobPostingExtractor<'a> {
    fetcher: &'a dyn PageFetcher,
    adapters: &'a AdapterRegistry,
    classifier: &'a SectionClassifier,
}

impl<'a> JobPostingExtractor<'a> {
    pub fn new(
        fetcher: &'a dyn PageFetcher,
        adapters: &'a AdapterRegistry,
        classifier: &'a SectionClassifier,
    ) -> Self {
        JobPostingExtractor {
            fetcher,
            adapters,
            classifier,
        }
    }

    pub fn extract(&self, url: &str) -> Result<JobPosting, SiftError> {
        let html = self.fetcher.fetch(url)?;
        self.extract_html(url, &html)
    }

    /// Extract from markup already in hand. `url` only drives adapter selection.
    pub fn extract_html(&self, url: &str, html: &str) -> Result<JobPosting, SiftError> {
        let page = Html::parse_document(html);

        let adapter = self.adapters.select(url);
        let (mut fields, mut sections) = self.apply(adapter, &page);

        let fallback = self.adapters.fallback();
        if fields.is_empty() && sections.is_empty() && adapter.name() != fallback.name() {
            warn!(
                url,
                adapter = adapter.name(),
                "site adapter found nothing, trying generic"
            );
            (fields, sections) = self.apply(fallback, &page);
        }

        if fields.is_empty() && sections.is_empty() {
            return Err(SiftError::Extraction {
                url: url.to_string(),
                reason: "no title, company, location or description matched".to_string(),
            });
        }

        info!(
            url,
            title = fields.title.as_deref().unwrap_or(""),
            sections = sections.len(),
            "extracted job posting"
        );

        Ok(JobPosting {
            title: fields.title,
            company: fields.company,
            location: fields.location,
            description: fields.description,
            sections,
        })
    }

    fn apply(&self, adapter: &dyn SiteAdapter, page: &Html) -> (JobFields, Sections) {
        let fields = adapter.extract_fields(page);
        let sections = adapter
            .description_text(page)
            .map(|text| segment_job_text(&text, self.classifier))
            .unwrap_or_default();
        (fields, sections)
    }
}
