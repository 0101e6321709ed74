pub mod builtin;
pub mod schema;

use crate::error::SiftError;
use crate::model::DocumentKind;
use schema::SectionRules;
use std::path::Path;

/// Load heading rules from a JSON file.
pub fn load_rules(path: &Path) -> Result<SectionRules, SiftError> {
    let content = std::fs::read_to_string(path).map_err(|e| SiftError::RulesLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_rules(&content, path)
}

/// Parse heading rules from a JSON string.
pub fn parse_rules(json: &str, source: &Path) -> Result<SectionRules, SiftError> {
    let rules: SectionRules = serde_json::from_str(json).map_err(|e| SiftError::RulesLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_rules(&rules)?;
    Ok(rules)
}

/// Parse heading rules from a JSON string (no file path context).
pub fn parse_rules_str(json: &str) -> Result<SectionRules, SiftError> {
    let rules: SectionRules = serde_json::from_str(json).map_err(SiftError::Json)?;
    validate_rules(&rules)?;
    Ok(rules)
}

/// Validate that a rule set is well-formed.
pub fn validate_rules(rules: &SectionRules) -> Result<(), SiftError> {
    if rules.max_heading_chars == 0 || rules.max_heading_tokens == 0 {
        return Err(SiftError::RulesInvalid(
            "heading thresholds must be greater than zero".into(),
        ));
    }

    if rules.phrases.is_empty() {
        return Err(SiftError::RulesInvalid("phrases must not be empty".into()));
    }

    for (section, phrases) in &rules.phrases {
        if section.kind() != rules.kind {
            return Err(SiftError::RulesInvalid(format!(
                "section '{}' is not a {} section",
                section, rules.kind
            )));
        }
        if phrases.is_empty() {
            return Err(SiftError::RulesInvalid(format!(
                "section '{}' has no phrases",
                section
            )));
        }
        if phrases.iter().any(|p| p.trim().is_empty()) {
            return Err(SiftError::RulesInvalid(format!(
                "section '{}' has an empty phrase",
                section
            )));
        }
    }

    if !rules.keywords.is_empty() && rules.kind != DocumentKind::Cv {
        return Err(SiftError::RulesInvalid(
            "keyword heuristics are only supported for cv rules".into(),
        ));
    }

    for group in &rules.keywords {
        if group.section.kind() != rules.kind {
            return Err(SiftError::RulesInvalid(format!(
                "keyword group targets '{}', which is not a {} section",
                group.section, rules.kind
            )));
        }
        if group.words.is_empty() || group.words.iter().any(|w| w.trim().is_empty()) {
            return Err(SiftError::RulesInvalid(format!(
                "keyword group for '{}' has no usable words",
                group.section
            )));
        }
    }

    Ok(())
}
