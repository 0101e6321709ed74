use crate::model::{DocumentKind, SectionType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_MAX_HEADING_CHARS: usize = 50;
pub const DEFAULT_MAX_HEADING_TOKENS: usize = 5;

/// Heading vocabulary and thresholds for one document kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionRules {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    pub kind: DocumentKind,
    /// Lines longer than this (in characters) are never headings.
    #[serde(default = "default_max_heading_chars")]
    pub max_heading_chars: usize,
    /// Lines with more whitespace-separated tokens than this are never headings.
    #[serde(default = "default_max_heading_tokens")]
    pub max_heading_tokens: usize,
    /// Canonical phrases per section type. Iterates in declaration order.
    pub phrases: BTreeMap<SectionType, Vec<String>>,
    /// Loose keyword groups, tried in listed order after phrase matching.
    #[serde(default)]
    pub keywords: Vec<KeywordGroupDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordGroupDef {
    pub section: SectionType,
    pub words: Vec<String>,
}

fn default_max_heading_chars() -> usize {
    DEFAULT_MAX_HEADING_CHARS
}

fn default_max_heading_tokens() -> usize {
    DEFAULT_MAX_HEADING_TOKENS
}
