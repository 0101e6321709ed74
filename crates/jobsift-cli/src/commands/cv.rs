use jobsift_core::error::SiftError;
use jobsift_core::model::DocumentKind;
use std::path::PathBuf;

use crate::commands;
use crate::output;

pub fn run(
    input_file: PathBuf,
    rules: Option<PathBuf>,
    output_format: &str,
    output_file: Option<PathBuf>,
) -> Result<(), SiftError> {
    let classifier = commands::classifier(DocumentKind::Cv, rules.as_deref())?;
    let bytes = std::fs::read(&input_file)?;
    let loader = commands::loader_for(&input_file);
    let parsed = jobsift_core::parse_cv(&bytes, loader.as_ref(), &classifier)?;

    match output_file {
        Some(path) => {
            output::json::write(&path, &parsed)?;
            eprintln!(
                "Parsed {} section(s), written to {}",
                parsed.sections.len(),
                path.display()
            );
        }
        None => match output_format {
            "json" => output::json::print(&parsed)?,
            _ => output::table::print_cv(&parsed),
        },
    }

    Ok(())
}
