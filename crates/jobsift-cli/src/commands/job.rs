use jobsift_core::error::SiftError;
use jobsift_core::model::DocumentKind;
use jobsift_core::scrape::SiteAdapter;
use std::path::PathBuf;

use crate::commands;
use crate::output;
use crate::FetchArgs;

pub fn run(
    url: &str,
    rules: Option<PathBuf>,
    fetch: &FetchArgs,
    output_format: &str,
    output_file: Option<PathBuf>,
) -> Result<(), SiftError> {
    let classifier = commands::classifier(DocumentKind::Job, rules.as_deref())?;
    let fetcher = commands::fetcher(fetch)?;
    let adapters = commands::registry(fetch)?;
    let posting = jobsift_core::scrape_job(url, &fetcher, &adapters, &classifier)?;

    match output_file {
        Some(path) => {
            output::json::write(&path, &posting)?;
            eprintln!(
                "Extracted {} section(s) from {}, written to {}",
                posting.sections.len(),
                adapters.select(url).name(),
                path.display()
            );
        }
        None => match output_format {
            "json" => output::json::print(&posting)?,
            _ => output::table::print_job(&posting),
        },
    }

    Ok(())
}
