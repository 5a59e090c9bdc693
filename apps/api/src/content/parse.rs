//! Tagline extraction from raw model output.
//!
//! Models are told to return a bare JSON array of strings, but real output
//! arrives wrapped in code fences, prefixed with "json", or as a bulleted
//! list. Parsing is strict-then-loose, surfaced as an explicit two-variant
//! result so each branch's filtering rules are testable in isolation.

/// Tokens that are structural noise, never taglines. The heuristic branch
/// additionally rejects "error" since failure text often leaks into lines.
const RESERVED_TOKENS: [&str; 7] = ["json", "[", "]", "{", "}", "null", "undefined"];

/// Minimum trimmed length for a kept tagline.
const MIN_TAGLINE_LEN: usize = 4;

/// How the raw response was interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedTaglines {
    /// The response was a well-formed JSON array of strings.
    Structured(Vec<String>),
    /// Line-split recovery from free-form text.
    Heuristic(Vec<String>),
}

impl ParsedTaglines {
    pub fn into_items(self) -> Vec<String> {
        match self {
            ParsedTaglines::Structured(items) | ParsedTaglines::Heuristic(items) => items,
        }
    }
}

/// Strips code-fence backticks and a leading case-insensitive "json" token.
pub fn preprocess(raw: &str) -> String {
    let without_ticks: String = raw.trim().chars().filter(|c| *c != '`').collect();
    let trimmed = without_ticks.trim();
    match trimmed.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("json") => {
            trimmed[4..].trim_start().to_string()
        }
        _ => trimmed.to_string(),
    }
}

/// Parses raw model output into at most `max_items` taglines.
///
/// Strict branch: JSON array of strings, each trimmed, kept when longer
/// than 3 chars and not a reserved token. Loose branch: line splitting with
/// bullet/quote stripping and a `max_words` cap.
pub fn parse_taglines(raw: &str, max_items: usize, max_words: usize) -> ParsedTaglines {
    let cleaned = preprocess(raw);

    if let Ok(values) = serde_json::from_str::<Vec<String>>(&cleaned) {
        let items = values
            .into_iter()
            .take(max_items)
            .map(|s| s.trim().to_string())
            .filter(|s| keep_structured(s))
            .collect();
        return ParsedTaglines::Structured(items);
    }

    let mut items = Vec::new();
    for line in cleaned.lines() {
        let candidate = clean_line(line);
        if keep_heuristic(&candidate, max_words) {
            items.push(candidate);
        }
    }
    ParsedTaglines::Heuristic(items)
}

fn keep_structured(s: &str) -> bool {
    s.len() >= MIN_TAGLINE_LEN && !is_reserved(s)
}

fn keep_heuristic(s: &str, max_words: usize) -> bool {
    s.len() >= MIN_TAGLINE_LEN
        && !is_reserved(s)
        && s.to_lowercase() != "error"
        && s.split_whitespace().count() <= max_words
}

fn is_reserved(s: &str) -> bool {
    let lower = s.to_lowercase();
    RESERVED_TOKENS.contains(&lower.as_str())
}

/// Removes list bullets and quote characters anywhere in the line, then
/// trims. Commas and other JSON remnants survive deliberately: a trailing
/// comma on a useful line is better than dropping it.
fn clean_line(line: &str) -> String {
    line.trim()
        .chars()
        .filter(|c| !matches!(c, '-' | '•' | '*' | '"' | '\''))
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preprocess_strips_fences_and_json_token() {
        let raw = "```json\n[\"Go faster\"]\n```";
        assert_eq!(preprocess(raw), "[\"Go faster\"]");
    }

    #[test]
    fn test_preprocess_strips_uppercase_json_token() {
        assert_eq!(preprocess("JSON [\"a tag\"]"), "[\"a tag\"]");
    }

    #[test]
    fn test_preprocess_plain_text_unchanged() {
        assert_eq!(preprocess("  Go faster  "), "Go faster");
    }

    #[test]
    fn test_strict_array_parses_structured() {
        let raw = r#"["Go faster", "Save more", "Think smart", "Act now", "Win big"]"#;
        let parsed = parse_taglines(raw, 5, 8);
        assert_eq!(
            parsed,
            ParsedTaglines::Structured(vec![
                "Go faster".to_string(),
                "Save more".to_string(),
                "Think smart".to_string(),
                "Act now".to_string(),
                "Win big".to_string(),
            ])
        );
    }

    #[test]
    fn test_strict_array_truncates_to_max_items() {
        let raw = r#"["one one", "two two", "three three", "four four", "five five", "six six"]"#;
        let items = parse_taglines(raw, 5, 8).into_items();
        assert_eq!(items.len(), 5);
        assert_eq!(items[4], "five five");
    }

    #[test]
    fn test_strict_array_drops_reserved_and_short_tokens() {
        let raw = r#"["null", "JSON", "ok", "A real tagline"]"#;
        let items = parse_taglines(raw, 5, 8).into_items();
        assert_eq!(items, vec!["A real tagline".to_string()]);
    }

    #[test]
    fn test_non_string_elements_fall_back_to_heuristic() {
        let raw = r#"[1, 2, "Go faster today"]"#;
        let parsed = parse_taglines(raw, 5, 8);
        assert!(matches!(parsed, ParsedTaglines::Heuristic(_)));
    }

    #[test]
    fn test_heuristic_splits_lines_and_filters() {
        let raw = "Go faster\nJSON\nSave more";
        let parsed = parse_taglines(raw, 5, 8);
        assert_eq!(
            parsed,
            ParsedTaglines::Heuristic(vec!["Go faster".to_string(), "Save more".to_string()])
        );
    }

    #[test]
    fn test_heuristic_strips_bullets_and_quotes() {
        let raw = "- \"Fresh ideas daily\"\n• 'Bold moves win'";
        let items = parse_taglines(raw, 5, 8).into_items();
        assert_eq!(
            items,
            vec!["Fresh ideas daily".to_string(), "Bold moves win".to_string()]
        );
    }

    #[test]
    fn test_heuristic_rejects_lines_over_word_limit() {
        let raw = "one two three four five six seven eight nine\nShort and sweet";
        let items = parse_taglines(raw, 5, 8).into_items();
        assert_eq!(items, vec!["Short and sweet".to_string()]);
    }

    #[test]
    fn test_heuristic_rejects_error_token() {
        let raw = "Error\nA usable tagline";
        let items = parse_taglines(raw, 5, 8).into_items();
        assert_eq!(items, vec!["A usable tagline".to_string()]);
    }

    #[test]
    fn test_heuristic_rejects_braces_and_short_lines() {
        let raw = "{\n}\nab\nKeep this one";
        let items = parse_taglines(raw, 5, 8).into_items();
        assert_eq!(items, vec!["Keep this one".to_string()]);
    }

    #[test]
    fn test_reserved_tokens_never_survive_either_branch() {
        for token in ["null", "undefined", "JSON", "[", "]", "{", "}"] {
            let strict = format!(r#"["{token}"]"#);
            assert!(
                parse_taglines(&strict, 5, 8).into_items().is_empty(),
                "strict branch kept {token}"
            );
            assert!(
                parse_taglines(token, 5, 8).into_items().is_empty(),
                "heuristic branch kept {token}"
            );
        }
    }
}
