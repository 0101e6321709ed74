use crate::model::TextRun;

/// Render runs as light markdown: `***both***`, `**bold**`, `*italic*`.
/// Runs are trimmed, blank runs dropped, and the rest joined with single spaces.
pub fn render_runs(runs: &[TextRun]) -> String {
    runs.iter()
        .filter_map(|run| {
            let text = run.text.trim();
            if text.is_empty() {
                return None;
            }
            Some(match (run.bold, run.italic) {
                (true, true) => format!("***{text}***"),
                (true, false) => format!("**{text}**"),
                (false, true) => format!("*{text}*"),
                (false, false) => text.to_string(),
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
