pub mod cv;
pub mod job;
pub mod match_cmd;
pub mod rules;

use jobsift_core::classify::SectionClassifier;
use jobsift_core::error::SiftError;
use jobsift_core::extraction::{DocumentLoader, DocxLoader, JsonLoader, TextLoader};
use jobsift_core::model::DocumentKind;
use jobsift_core::rules::builtin;
use jobsift_core::scrape::{load_adapters, AdapterRegistry, FetchConfig, HttpFetcher};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::FetchArgs;

/// Classifier for `kind`, from a custom rules file or the builtin preset.
pub fn classifier(kind: DocumentKind, rules: Option<&Path>) -> Result<SectionClassifier, SiftError> {
    let Some(path) = rules else {
        return Ok(SectionClassifier::new(builtin::rules_for(kind)));
    };
    let rules = jobsift_core::rules::load_rules(path)?;
    if rules.kind != kind {
        return Err(SiftError::RulesInvalid(format!(
            "{} holds {} rules, expected {}",
            path.display(),
            rules.kind,
            kind
        )));
    }
    Ok(SectionClassifier::new(&rules))
}

/// Pick a document loader from the file extension.
pub fn loader_for(path: &Path) -> Box<dyn DocumentLoader> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let loader: Box<dyn DocumentLoader> = match ext.as_deref() {
        Some("docx") => Box::new(DocxLoader::new()),
        Some("json") => Box::new(JsonLoader),
        _ => Box::new(TextLoader),
    };
    debug!(path = %path.display(), loader = loader.backend_name(), "picked document loader");
    loader
}

/// Whether `path` is a posting saved as JSON rather than a URL.
pub fn is_saved_posting(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false)
}

pub fn fetcher(args: &FetchArgs) -> Result<HttpFetcher, SiftError> {
    let mut config = FetchConfig {
        timeout: Duration::from_secs(args.timeout),
        ..FetchConfig::default()
    };
    if let Some(ref ua) = args.user_agent {
        config.user_agent = ua.clone();
    }
    HttpFetcher::new(&config)
}

pub fn registry(args: &FetchArgs) -> Result<AdapterRegistry, SiftError> {
    let mut registry = AdapterRegistry::builtin();
    if let Some(ref path) = args.adapters {
        // Registering prepends, so reverse to keep file order
        for adapter in load_adapters(path)?.into_iter().rev() {
            registry.register(Box::new(adapter));
        }
    }
    Ok(registry)
}
