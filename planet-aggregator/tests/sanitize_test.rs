use planet_aggregator::sanitize::{sanitize, truncate_snippet, ELLIPSIS, SNIPPET_MAX_CHARS};

#[test]
fn test_sanitize_absent_input_is_empty() {
    assert_eq!(sanitize(None), "");
    assert_eq!(sanitize(Some("")), "");
}

#[test]
fn test_sanitize_strips_tags_and_decodes_entities() {
    assert_eq!(sanitize(Some("<p>Hello &amp; welcome</p>")), "Hello & welcome");
    assert_eq!(
        sanitize(Some(r#"<a href="https://x.example">&quot;quoted&quot; &#39;single&#39;</a>"#)),
        r#""quoted" 'single'"#
    );
    assert_eq!(sanitize(Some("1 &lt; 2 &gt; 0")), "1 < 2 > 0");
}

#[test]
fn test_sanitize_decodes_in_fixed_order() {
    // &amp; is decoded before &lt;, so an escaped entity collapses twice.
    assert_eq!(sanitize(Some("&amp;lt;b&amp;gt;")), "<b>");
}

#[test]
fn test_sanitize_leaves_other_entities_verbatim() {
    assert_eq!(sanitize(Some("caf&eacute; &#233; &nbsp;x")), "caf&eacute; &#233; &nbsp;x");
}

#[test]
fn test_sanitize_trims_whitespace() {
    assert_eq!(sanitize(Some("\n  <div>\n  text  </div>\n")), "text");
}

#[test]
fn test_sanitize_removes_literal_angle_ranges() {
    // Heuristic strip: anything between < and > goes, markup or not.
    assert_eq!(sanitize(Some("a < b and c > d")), "a  d");
}

#[test]
fn test_sanitize_is_idempotent_on_clean_text() {
    for text in ["plain text", "  padded  ", "Ünïcödé words 123", ""] {
        let once = sanitize(Some(text));
        assert_eq!(sanitize(Some(once.as_str())), once);
    }
}

#[test]
fn test_truncate_snippet_short_text_untouched() {
    let text = "a".repeat(SNIPPET_MAX_CHARS);
    assert_eq!(truncate_snippet(&text), text);
    assert_eq!(truncate_snippet(""), "");
}

#[test]
fn test_truncate_snippet_long_text_gets_ellipsis() {
    let text = "b".repeat(SNIPPET_MAX_CHARS + 1);
    let snippet = truncate_snippet(&text);
    assert_eq!(snippet, format!("{}{}", "b".repeat(SNIPPET_MAX_CHARS), ELLIPSIS));
    assert_eq!(snippet.chars().count(), SNIPPET_MAX_CHARS + 3);
}

#[test]
fn test_truncate_snippet_counts_characters_not_bytes() {
    let text = "é".repeat(300);
    let snippet = truncate_snippet(&text);
    assert!(snippet.ends_with(ELLIPSIS));
    assert_eq!(snippet.chars().count(), SNIPPET_MAX_CHARS + 3);
    assert!(snippet.starts_with(&"é".repeat(SNIPPET_MAX_CHARS)));
}
