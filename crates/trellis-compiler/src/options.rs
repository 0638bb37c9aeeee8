//! Sigil-marked option parsing.
//!
//! A caption may carry a leading `^` marking the default entry. The
//! sigil is stripped from every caption, but only the first marked
//! entry in declaration order keeps its default flag; later marks
//! are ignored. Parsing runs before any selection logic so the
//! "first wins" rule is testable in isolation.

use serde_json::{Map, Value};

/// The default-marker prefix.
pub const SIGIL: char = '^';

/// One parsed option caption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionEntry {
    /// Caption with the sigil stripped.
    pub caption: String,
    /// Whether this entry is the resolved default.
    pub default: bool,
}

/// Split one caption into `(marked, cleaned)`.
pub fn strip_sigil(caption: &str) -> (bool, &str) {
    match caption.strip_prefix(SIGIL) {
        Some(rest) => (true, rest),
        None => (false, caption),
    }
}

fn scalar_caption(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parse a flat options array (list/datalist fields). Non-scalar
/// entries are dropped.
pub fn parse_list(options: &[Value]) -> Vec<OptionEntry> {
    let mut seen_default = false;
    options
        .iter()
        .filter_map(scalar_caption)
        .map(|caption| {
            let (marked, cleaned) = strip_sigil(&caption);
            let default = marked && !seen_default;
            seen_default |= marked;
            OptionEntry {
                caption: cleaned.to_string(),
                default,
            }
        })
        .collect()
}

/// Parse an options mapping (select fields) into `(value, entry)`
/// pairs in declaration order. Non-scalar captions are dropped.
pub fn parse_select(options: &Map<String, Value>) -> Vec<(String, OptionEntry)> {
    let mut seen_default = false;
    options
        .iter()
        .filter_map(|(value, caption)| scalar_caption(caption).map(|c| (value.clone(), c)))
        .map(|(value, caption)| {
            let (marked, cleaned) = strip_sigil(&caption);
            let default = marked && !seen_default;
            seen_default |= marked;
            (
                value,
                OptionEntry {
                    caption: cleaned.to_string(),
                    default,
                },
            )
        })
        .collect()
}

/// Whether any parsed entry carries the default flag.
pub fn has_default(entries: &[OptionEntry]) -> bool {
    entries.iter().any(|e| e.default)
}

/// Whether any raw caption in an options array carries the sigil.
pub fn list_has_marked(options: &[Value]) -> bool {
    options
        .iter()
        .filter_map(scalar_caption)
        .any(|c| c.starts_with(SIGIL))
}

/// Whether any raw caption in an options mapping carries the sigil.
pub fn select_has_marked(options: &Map<String, Value>) -> bool {
    options
        .values()
        .filter_map(scalar_caption)
        .any(|c| c.starts_with(SIGIL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_sigil() {
        assert_eq!(strip_sigil("^Alpha"), (true, "Alpha"));
        assert_eq!(strip_sigil("Alpha"), (false, "Alpha"));
        assert_eq!(strip_sigil("^"), (true, ""));
    }

    #[test]
    fn test_first_marked_entry_wins() {
        let options = vec![json!("a"), json!("^b"), json!("^c")];
        let parsed = parse_list(&options);

        assert_eq!(parsed.len(), 3);
        assert!(!parsed[0].default);
        assert!(parsed[1].default);
        // Later sigils are stripped but ignored.
        assert!(!parsed[2].default);
        assert_eq!(parsed[2].caption, "c");
    }

    #[test]
    fn test_parse_select_keeps_order_and_strips() {
        let Value::Object(map) = json!({"a": "^Alpha", "b": "Beta"}) else {
            unreachable!()
        };
        let parsed = parse_select(&map);

        assert_eq!(parsed[0].0, "a");
        assert_eq!(parsed[0].1.caption, "Alpha");
        assert!(parsed[0].1.default);
        assert!(!parsed[1].1.default);
    }

    #[test]
    fn test_numeric_captions_are_stringified() {
        let parsed = parse_list(&[json!(1), json!("^2")]);
        assert_eq!(parsed[0].caption, "1");
        assert!(parsed[1].default);
    }

    #[test]
    fn test_has_default() {
        assert!(!has_default(&parse_list(&[json!("a")])));
        assert!(has_default(&parse_list(&[json!("^a")])));
    }
}
