use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\w.+-]+@[\w-]+(?:\.[\w-]+)+").expect("email pattern is valid")
});

// Optional country code, then (area) 123-4567, 12 3456 7890 style groups, or a bare 123-4567
static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:\+\d{1,3}[\s.-]?)?(?:\(\d{2,4}\)\s*\d{3,4}[\s.-]?\d{3,4}|\d{2,4}[\s.-]?\d{3,4}[\s.-]?\d{3,4}|\d{3}[\s.-]?\d{4})",
    )
    .expect("phone pattern is valid")
});

pub fn find_email(text: &str) -> Option<String> {
    EMAIL.find(text).map(|m| m.as_str().to_string())
}

pub fn find_phone(text: &str) -> Option<String> {
    PHONE.find(text).map(|m| m.as_str().trim().to_string())
}

/// Extract `email` and `phone` from contact text. Keys are only present when
/// a value was found.
pub fn extract_contact(text: &str) -> BTreeMap<String, String> {
    let mut metadata = BTreeMap::new();
    if let Some(email) = find_email(text) {
        metadata.insert("email".to_string(), email);
    }
    if let Some(phone) = find_phone(text) {
        metadata.insert("phone".to_string(), phone);
    }
    metadata
}
