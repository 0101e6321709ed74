use scraper::{ElementRef, Html, Selector};
use tracing::warn;

/// Elements that start a new line when flattened to text.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "footer", "h1", "h2",
    "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section",
    "table", "td", "th", "tr", "ul",
];

/// Elements whose text is never content.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Text of an element with all whitespace collapsed to single spaces.
pub fn element_text(element: ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text of an element with one line per block-level element.
///
/// Whitespace inside a block collapses as a browser would; lines are trimmed
/// and blank lines dropped.
pub fn block_text(element: ElementRef) -> String {
    let mut raw = String::new();
    collect_block_text(element, &mut raw);
    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collect_block_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            for c in text.chars() {
                out.push(if c.is_whitespace() { ' ' } else { c });
            }
        } else if let Some(child_element) = ElementRef::wrap(child) {
            let name = child_element.value().name();
            if SKIPPED_ELEMENTS.contains(&name) {
                continue;
            }
            if name == "br" {
                out.push('\n');
                continue;
            }
            let block = BLOCK_ELEMENTS.contains(&name);
            if block {
                out.push('\n');
            }
            collect_block_text(child_element, out);
            if block {
                out.push('\n');
            }
        }
    }
}

/// Parse a selector, logging and skipping ones that do not parse.
pub fn parse_selector(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!(selector, error = %e, "skipping invalid selector");
            None
        }
    }
}

/// First element matching any candidate, tried in order, whose text is non-empty.
pub fn first_match<'a>(page: &'a Html, candidates: &[String]) -> Option<ElementRef<'a>> {
    candidates
        .iter()
        .filter_map(|candidate| parse_selector(candidate))
        .find_map(|selector| {
            page.select(&selector)
                .next()
                .filter(|element| !element_text(*element).is_empty())
        })
}

/// Collapsed text of the first non-empty candidate match.
pub fn first_text(page: &Html, candidates: &[String]) -> Option<String> {
    first_match(page, candidates).map(element_text)
}
