use jobsift_core::error::SiftError;
use jobsift_core::rules::builtin;
use jobsift_core::rules::schema::SectionRules;
use std::path::Path;

pub fn list() -> Result<(), SiftError> {
    println!("Available rule presets:\n");
    for name in builtin::PRESETS {
        let rules = builtin::load_preset(name)?;
        println!("  {:<6} {} (v{}) [{}]", name, rules.name, rules.version, rules.kind);
        if let Some(ref desc) = rules.description {
            println!("         {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn show(preset: &str) -> Result<(), SiftError> {
    let rules = builtin::load_preset(preset)?;
    describe(&rules);
    Ok(())
}

fn describe(rules: &SectionRules) {
    println!("{} (version {})\n", rules.name, rules.version);
    if let Some(ref desc) = rules.description {
        println!("{}\n", desc);
    }

    println!(
        "A line is a heading candidate when it has at most {} characters and {} words.\n",
        rules.max_heading_chars, rules.max_heading_tokens
    );

    let width = rules
        .phrases
        .keys()
        .map(|s| s.as_str().len())
        .max()
        .unwrap_or(10);

    println!("Headings:");
    for (section, phrases) in &rules.phrases {
        println!("  {:<width$}  {}", section.as_str(), phrases.join(", "), width = width);
    }
    println!();

    if !rules.keywords.is_empty() {
        println!("Keywords (checked in order when no heading matches):");
        for group in &rules.keywords {
            println!(
                "  {:<width$}  {}",
                group.section.as_str(),
                group.words.join(", "),
                width = width
            );
        }
        println!();
    }
}

pub fn validate(file: &Path) -> Result<(), SiftError> {
    let rules = jobsift_core::rules::load_rules(file)?;

    println!("Rules '{}' (v{}) are valid.", rules.name, rules.version);
    println!("  Kind: {}", rules.kind);
    println!("  Section types: {}", rules.phrases.len());
    println!(
        "  Phrases: {}",
        rules.phrases.values().map(Vec::len).sum::<usize>()
    );

    // Warnings for phrases the length guard will never let through
    let mut warnings = Vec::new();
    for (section, phrases) in &rules.phrases {
        for phrase in phrases {
            let chars = phrase.trim().chars().count();
            let tokens = phrase.split_whitespace().count();
            if chars > rules.max_heading_chars || tokens > rules.max_heading_tokens {
                warnings.push(format!(
                    "phrase '{}' for {} exceeds the heading length limits and can never match",
                    phrase, section
                ));
            }
        }
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}
