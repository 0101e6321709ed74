use crate::commands::match_cmd::MatchOutput;
use jobsift_core::model::{JobPosting, ParsedDocument, Sections};

pub fn print_cv(doc: &ParsedDocument) {
    if !doc.metadata.is_empty() {
        let width = doc.metadata.keys().map(String::len).max().unwrap_or(5);
        for (key, value) in &doc.metadata {
            println!("  {:<width$}  {}", key, value, width = width);
        }
        println!();
    }

    if let Some(ref preamble) = doc.preamble {
        print_block(preamble);
        println!();
    }

    print_sections(&doc.sections);
}

pub fn print_job(posting: &JobPosting) {
    let fields = [
        ("Title", &posting.title),
        ("Company", &posting.company),
        ("Location", &posting.location),
    ];
    for (label, value) in fields {
        println!("  {:<8}  {}", label, value.as_deref().unwrap_or("-"));
    }
    println!();

    print_sections(&posting.sections);
}

pub fn print_match(result: &MatchOutput) {
    let report = &result.report;
    let total = report.matches.len() + report.opportunities.len();
    println!(
        "=== Match: {}% ({} of {} key points) ===\n",
        report.match_score,
        report.matches.len(),
        total
    );

    if total == 0 {
        println!("  No key points found in the posting.");
    } else {
        for point in &report.matches {
            println!("  [x] {}", point);
        }
        for point in &report.opportunities {
            println!("  [ ] {}", point);
        }
    }

    if let Some(ref tailoring) = result.tailoring {
        println!("\n=== Skills (posting matches first) ===\n");
        if tailoring.skills.is_empty() {
            println!("  (no skills section)");
        }
        for skill in &tailoring.skills {
            println!("  {}", skill);
        }
        if let Some(ref experience) = tailoring.experience {
            println!("\n=== Experience (posting terms upper-cased) ===\n");
            print_block(experience);
        }
    }
}

fn print_sections(sections: &Sections) {
    if sections.is_empty() {
        println!("  (no sections found)");
        return;
    }

    for (kind, section) in sections.iter() {
        if section.title.is_empty() {
            println!("=== {} ===\n", kind);
        } else {
            println!("=== {} ({}) ===\n", kind, section.title);
        }
        print_block(&section.content);
        println!();
    }
}

fn print_block(text: &str) {
    for line in text.lines() {
        println!("  {}", line);
    }
}
