use vaani::infrastructure::observability::sanitize_for_log;

#[test]
fn given_empty_text_when_sanitizing_then_returns_placeholder() {
    assert_eq!(sanitize_for_log("   "), "[EMPTY]");
}

#[test]
fn given_short_text_when_sanitizing_then_returns_it_trimmed() {
    assert_eq!(sanitize_for_log("  bonjour  "), "bonjour");
}

#[test]
fn given_control_characters_when_sanitizing_then_replaced_with_spaces() {
    assert_eq!(sanitize_for_log("line one\nline two"), "line one line two");
}

#[test]
fn given_long_text_when_sanitizing_then_truncates_with_total_count() {
    let text = "a".repeat(150);

    let sanitized = sanitize_for_log(&text);

    assert!(sanitized.starts_with(&"a".repeat(100)));
    assert!(sanitized.ends_with("... (150 chars total)"));
}

#[test]
fn given_multibyte_text_when_truncating_then_cuts_on_char_boundary() {
    let text = "नमस्ते ".repeat(40);

    let sanitized = sanitize_for_log(&text);

    assert!(sanitized.contains("chars total"));
}
