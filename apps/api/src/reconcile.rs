//! Response reconciliation primitives shared by both pipeline stages.
//!
//! The model is never trusted to return only JSON. These helpers locate balanced
//! `{…}` spans inside arbitrary prose or code fences without allocating.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

static FENCED_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```[ \t]*([A-Za-z0-9_+-]*)[ \t]*\r?\n(.*?)```").expect("Invalid fence regex")
});

/// Returns the first balanced-looking JSON object in `text`, or `None`.
pub fn first_json_object(text: &str) -> Option<&str> {
    json_objects(text).next()
}

/// Iterates over successive top-level balanced `{…}` spans in `text`.
///
/// Braces inside string literals are ignored. An opening brace that never balances is
/// skipped and the scan resumes at the next one.
pub fn json_objects(text: &str) -> JsonObjects<'_> {
    JsonObjects { text, pos: 0 }
}

pub struct JsonObjects<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Iterator for JsonObjects<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        while self.pos < self.text.len() {
            let start = self.pos + self.text[self.pos..].find('{')?;
            match balanced_end(&self.text[start..]) {
                Some(len) => {
                    self.pos = start + len;
                    return Some(&self.text[start..start + len]);
                }
                None => self.pos = start + 1,
            }
        }
        None
    }
}

/// Byte length of the balanced object starting at `s[0] == '{'`.
fn balanced_end(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, b) in s.bytes().enumerate() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

/// First balanced span that parses as a JSON object accepted by `accept`.
pub fn find_object<F>(text: &str, accept: F) -> Option<Map<String, Value>>
where
    F: Fn(&Map<String, Value>) -> bool,
{
    json_objects(text).find_map(|span| match serde_json::from_str::<Value>(span) {
        Ok(Value::Object(map)) if accept(&map) => Some(map),
        _ => None,
    })
}

/// Body of the first fenced code block tagged `lang` (case-insensitive).
pub fn fenced_block<'a>(text: &'a str, lang: &str) -> Option<&'a str> {
    FENCED_BLOCK
        .captures_iter(text)
        .find(|caps| caps[1].eq_ignore_ascii_case(lang))
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str().trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_json_object_bare() {
        let input = r#"{"key": "value"}"#;
        assert_eq!(first_json_object(input), Some(input));
    }

    #[test]
    fn test_first_json_object_inside_prose() {
        let input = "Sure! Here you go:\n{\"a\": {\"b\": 1}} Hope that helps.";
        assert_eq!(first_json_object(input), Some("{\"a\": {\"b\": 1}}"));
    }

    #[test]
    fn test_first_json_object_inside_fence() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(first_json_object(input), Some("{\"key\": \"value\"}"));
    }

    #[test]
    fn test_braces_inside_strings_are_ignored() {
        let input = r#"{"text": "use {} and \"}\" freely", "n": 1} trailing"#;
        assert_eq!(
            first_json_object(input),
            Some(r#"{"text": "use {} and \"}\" freely", "n": 1}"#)
        );
    }

    #[test]
    fn test_unbalanced_brace_is_skipped() {
        let input = "a { stray opener\n{\"ok\": true}";
        // the stray `{` never closes, so the scan resumes after it
        assert_eq!(first_json_object(input), Some("{\"ok\": true}"));
    }

    #[test]
    fn test_no_object() {
        assert_eq!(first_json_object("I cannot help with that."), None);
        assert_eq!(first_json_object(""), None);
        assert_eq!(first_json_object("} {"), None);
    }

    #[test]
    fn test_json_objects_yields_each_top_level_span() {
        let input = "{\"a\":1} and then {\"b\":{\"c\":2}}";
        let spans: Vec<_> = json_objects(input).collect();
        assert_eq!(spans, vec!["{\"a\":1}", "{\"b\":{\"c\":2}}"]);
    }

    #[test]
    fn test_find_object_skips_non_matching() {
        let input = "{\"meta\": 1}\n```json\n{\"questions\": []}\n```";
        let map = find_object(input, |m| m.contains_key("questions")).unwrap();
        assert!(map["questions"].is_array());
        assert!(find_object(input, |m| m.contains_key("missing")).is_none());
    }

    #[test]
    fn test_find_object_ignores_invalid_json() {
        let input = "{not json, \"questions\"} {\"questions\": [1]}";
        let map = find_object(input, |m| m.contains_key("questions")).unwrap();
        assert_eq!(map["questions"][0], 1);
    }

    #[test]
    fn test_find_object_keeps_scanning_past_rejected_objects() {
        let input = r#"{"questions": "see below"} {"questions": [1, 2]}"#;
        let map = find_object(input, |m| m.get("questions").is_some_and(Value::is_array)).unwrap();
        assert_eq!(map["questions"][1], 2);
    }

    #[test]
    fn test_fenced_block_by_language() {
        let input = "```json\n{}\n```\n\n```markdown\n# Assessment Case\nBuild it.\n```";
        assert_eq!(
            fenced_block(input, "markdown"),
            Some("# Assessment Case\nBuild it.")
        );
        assert_eq!(fenced_block(input, "json"), Some("{}"));
        assert_eq!(fenced_block(input, "yaml"), None);
    }
}
