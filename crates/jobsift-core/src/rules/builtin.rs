use crate::error::SiftError;
use crate::model::DocumentKind;
use crate::rules::schema::SectionRules;
use std::sync::LazyLock;

const CV_SECTIONS_JSON: &str = include_str!("../../../../rules/cv-sections.json");
const JOB_SECTIONS_JSON: &str = include_str!("../../../../rules/job-sections.json");

/// Available predefined rule sets.
pub const PRESETS: &[&str] = &["cv", "job"];

static CV_RULES: LazyLock<SectionRules> = LazyLock::new(|| {
    serde_json::from_str(CV_SECTIONS_JSON).expect("embedded cv-sections.json is valid")
});

static JOB_RULES: LazyLock<SectionRules> = LazyLock::new(|| {
    serde_json::from_str(JOB_SECTIONS_JSON).expect("embedded job-sections.json is valid")
});

/// The builtin rules for a document kind.
pub fn rules_for(kind: DocumentKind) -> &'static SectionRules {
    match kind {
        DocumentKind::Cv => &CV_RULES,
        DocumentKind::Job => &JOB_RULES,
    }
}

/// Load a predefined rule set by name.
pub fn load_preset(name: &str) -> Result<SectionRules, SiftError> {
    match name {
        "cv" => Ok(rules_for(DocumentKind::Cv).clone()),
        "job" => Ok(rules_for(DocumentKind::Job).clone()),
        _ => Err(SiftError::RulesInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}
