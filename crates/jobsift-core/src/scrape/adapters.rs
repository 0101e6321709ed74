use crate::error::SiftError;
use crate::model::JobFields;
use crate::scrape::html::{block_text, first_match, first_text};
use scraper::Html;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Ordered selector candidates for each field of a posting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldSelectors {
    #[serde(default)]
    pub title: Vec<String>,
    #[serde(default)]
    pub company: Vec<String>,
    #[serde(default)]
    pub location: Vec<String>,
    #[serde(default)]
    pub description: Vec<String>,
    /// Containers whose text is segmented into sections.
    /// Falls back to the `description` candidates when empty.
    #[serde(default)]
    pub container: Vec<String>,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Site-specific extraction strategy.
pub trait SiteAdapter: Send + Sync {
    fn name(&self) -> &str;

    /// Whether this adapter handles pages on `domain` (a lower-cased host).
    fn matches(&self, domain: &str) -> bool;

    fn selectors(&self) -> &FieldSelectors;

    fn extract_fields(&self, page: &Html) -> JobFields {
        let selectors = self.selectors();
        JobFields {
            title: first_text(page, &selectors.title),
            company: first_text(page, &selectors.company),
            location: first_text(page, &selectors.location),
            description: first_text(page, &selectors.description),
        }
    }

    /// Line-broken text of the description container, if one is found.
    fn description_text(&self, page: &Html) -> Option<String> {
        let selectors = self.selectors();
        let candidates = if selectors.container.is_empty() {
            &selectors.description
        } else {
            &selectors.container
        };
        first_match(page, candidates).map(block_text)
    }
}

/// Adapter for one job board, identified by a domain substring.
#[derive(Debug, Clone)]
pub struct BoardAdapter {
    name: String,
    domain: String,
    selectors: FieldSelectors,
}

impl BoardAdapter {
    pub fn new(name: impl Into<String>, domain: &str, selectors: FieldSelectors) -> Self {
        BoardAdapter {
            name: name.into(),
            domain: domain.to_lowercase(),
            selectors,
        }
    }

    pub fn seek() -> Self {
        Self::new(
            "seek",
            "seek.com.au",
            FieldSelectors {
                title: owned(&[
                    r#"[data-automation="job-detail-title"]"#,
                    "h1.jobtitle",
                    ".job-title",
                ]),
                company: owned(&[
                    r#"[data-automation="advertiser-name"]"#,
                    ".company-name",
                    ".employer-name",
                ]),
                location: owned(&[r#"[data-automation="job-detail-location"]"#, ".location"]),
                description: owned(&[
                    r#"[data-automation="jobAdDetails"]"#,
                    ".job-details",
                    "#jobDescription",
                ]),
                container: owned(&[
                    r#"div[data-automation="jobAdDetails"]"#,
                    "div.job-details",
                    "div#jobDescription",
                ]),
            },
        )
    }

    pub fn linkedin() -> Self {
        Self::new(
            "linkedin",
            "linkedin.com",
            FieldSelectors {
                title: owned(&[
                    "h1.job-title",
                    "h1.top-card-layout__title",
                    ".job-details-jobs-unified-top-card__job-title",
                ]),
                company: owned(&[
                    ".company-name",
                    ".employer-name",
                    ".job-details-jobs-unified-top-card__company-name",
                    "a.topcard__org-name-link",
                ]),
                location: owned(&[
                    ".job-location",
                    ".location",
                    ".job-details-jobs-unified-top-card__bullet",
                    ".topcard__flavor--bullet",
                ]),
                description: owned(&[
                    "#job-details",
                    ".description__text",
                    ".job-details-jobs-unified-top-card__description-container",
                ]),
                container: owned(&["div.description__text", "div#job-details"]),
            },
        )
    }

    pub fn indeed() -> Self {
        Self::new(
            "indeed",
            "indeed.com",
            FieldSelectors {
                title: owned(&["h1.jobsearch-JobInfoHeader-title"]),
                company: owned(&[
                    ".jobsearch-InlineCompanyRating-companyHeader",
                    ".company-name",
                ]),
                location: owned(&[".jobsearch-JobInfoHeader-subtitle", ".location"]),
                description: owned(&["#jobDescriptionText", ".job-description"]),
                container: owned(&["div#jobDescriptionText", "div.job-description"]),
            },
        )
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }
}

impl SiteAdapter for BoardAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, domain: &str) -> bool {
        domain.contains(&self.domain)
    }

    fn selectors(&self) -> &FieldSelectors {
        &self.selectors
    }
}

/// Fallback for unknown sites, using common class and id conventions.
#[derive(Debug, Clone)]
pub struct GenericAdapter {
    selectors: FieldSelectors,
}

impl GenericAdapter {
    pub fn new() -> Self {
        GenericAdapter {
            selectors: FieldSelectors {
                title: owned(&["h1", ".job-title", ".position-title"]),
                company: owned(&[".company", ".organization", ".employer"]),
                location: owned(&[".location", ".job-location", ".workplace"]),
                description: owned(&[".description", ".job-description", "#job-details"]),
                container: owned(&[
                    "div.description",
                    "section.description",
                    "div.job-description",
                    "section.job-description",
                    "div#job-details",
                ]),
            },
        }
    }
}

impl Default for GenericAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteAdapter for GenericAdapter {
    fn name(&self) -> &str {
        "generic"
    }

    fn matches(&self, _domain: &str) -> bool {
        true
    }

    fn selectors(&self) -> &FieldSelectors {
        &self.selectors
    }
}

/// A job-board adapter declared in JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterDef {
    pub name: String,
    /// Case-insensitive substring of the host this adapter handles.
    pub domain: String,
    #[serde(flatten)]
    pub selectors: FieldSelectors,
}

impl From<AdapterDef> for BoardAdapter {
    fn from(def: AdapterDef) -> Self {
        BoardAdapter::new(def.name, &def.domain, def.selectors)
    }
}

/// Load adapter definitions from a JSON array file.
pub fn load_adapters(path: &Path) -> Result<Vec<BoardAdapter>, SiftError> {
    let content = std::fs::read_to_string(path).map_err(|e| SiftError::RulesLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let defs: Vec<AdapterDef> = serde_json::from_str(&content).map_err(|e| SiftError::RulesLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    for def in &defs {
        if def.domain.trim().is_empty() {
            return Err(SiftError::RulesInvalid(format!(
                "adapter '{}' has an empty domain",
                def.name
            )));
        }
    }

    Ok(defs.into_iter().map(BoardAdapter::from).collect())
}

/// Lower-cased host of `url`, or the whole lower-cased string if it does not parse.
pub fn domain_of(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_lowercase))
        .unwrap_or_else(|| url.to_lowercase())
}

/// Site adapters in lookup order, with a generic fallback.
pub struct AdapterRegistry {
    adapters: Vec<Box<dyn SiteAdapter>>,
    fallback: Box<dyn SiteAdapter>,
}

impl AdapterRegistry {
    /// Registry with no site adapters, only the generic fallback.
    pub fn empty() -> Self {
        AdapterRegistry {
            adapters: Vec::new(),
            fallback: Box::new(GenericAdapter::new()),
        }
    }

    /// The builtin job boards.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.adapters = vec![
            Box::new(BoardAdapter::seek()),
            Box::new(BoardAdapter::linkedin()),
            Box::new(BoardAdapter::indeed()),
        ];
        registry
    }

    /// Add an adapter. It is consulted before every adapter registered earlier.
    pub fn register(&mut self, adapter: Box<dyn SiteAdapter>) {
        self.adapters.insert(0, adapter);
    }

    /// Pick the adapter for `url` by its domain.
    pub fn select(&self, url: &str) -> &dyn SiteAdapter {
        let domain = domain_of(url);
        let adapter = self
            .adapters
            .iter()
            .find(|a| a.matches(&domain))
            .map(|a| a.as_ref())
            .unwrap_or(self.fallback.as_ref());
        debug!(domain = %domain, adapter = adapter.name(), "selected site adapter");
        adapter
    }

    pub fn fallback(&self) -> &dyn SiteAdapter {
        self.fallback.as_ref()
    }

    pub fn names(&self) -> Vec<&str> {
        self.adapters
            .iter()
            .map(|a| a.name())
            .chain(std::iter::once(self.fallback.name()))
            .collect()
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
