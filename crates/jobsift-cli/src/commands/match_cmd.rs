use jobsift_core::error::SiftError;
use jobsift_core::model::{DocumentKind, JobPosting};
use jobsift_core::{MatchReport, Tailoring};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::commands;
use crate::output;
use crate::FetchArgs;

/// Match report, plus the tailored CV sections when requested.
#[derive(Serialize)]
pub struct MatchOutput {
    #[serde(flatten)]
    pub report: MatchReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tailoring: Option<Tailoring>,
}

pub fn run(
    cv_file: PathBuf,
    job: &str,
    fetch: &FetchArgs,
    output_format: &str,
    tailor: bool,
) -> Result<(), SiftError> {
    let cv_classifier = commands::classifier(DocumentKind::Cv, None)?;
    let bytes = std::fs::read(&cv_file)?;
    let loader = commands::loader_for(&cv_file);
    let cv = jobsift_core::parse_cv(&bytes, loader.as_ref(), &cv_classifier)?;

    let posting = load_posting(job, fetch)?;
    let result = MatchOutput {
        report: jobsift_core::score_match(&cv, &posting),
        tailoring: tailor.then(|| jobsift_core::tailor(&cv, &posting)),
    };

    match output_format {
        "json" => output::json::print(&result)?,
        _ => output::table::print_match(&result),
    }

    Ok(())
}

/// A saved posting when `job` names an existing JSON file, otherwise a URL to scrape.
fn load_posting(job: &str, fetch: &FetchArgs) -> Result<JobPosting, SiftError> {
    let path = Path::new(job);
    if commands::is_saved_posting(path) {
        info!(path = %path.display(), "using saved job posting");
        let json = std::fs::read(path)?;
        return Ok(serde_json::from_slice(&json)?);
    }

    let classifier = commands::classifier(DocumentKind::Job, None)?;
    let fetcher = commands::fetcher(fetch)?;
    let adapters = commands::registry(fetch)?;
    jobsift_core::scrape_job(job, &fetcher, &adapters, &classifier)
}
