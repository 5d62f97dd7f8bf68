const MAX_VISIBLE_CHARS: usize = 100;

/// Shortens user text for log lines. Cuts on char boundaries.
pub fn sanitize_for_log(text: &str) -> String {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total = trimmed.chars().count();
    let single_line: String = trimmed
        .chars()
        .take(MAX_VISIBLE_CHARS)
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();

    if total > MAX_VISIBLE_CHARS {
        format!("{}... ({} chars total)", single_line, total)
    } else {
        single_line
    }
}
