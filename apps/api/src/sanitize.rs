//! Markup stripping for caller-supplied text.
//!
//! Everything that ends up inside a prompt or a rendered document passes through here first.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<.*?>").expect("Invalid markup tag regex"));

/// Removes every `<...>` tag-shaped substring and trims surrounding whitespace.
///
/// Removal is repeated until nothing tag-shaped is left, so input such as `<<b>script>`
/// cannot reassemble a tag after a single pass.
pub fn sanitize(text: &str) -> String {
    let mut current = text.to_string();
    while TAG_REGEX.is_match(&current) {
        current = TAG_REGEX.replace_all(&current, "").into_owned();
    }
    current.trim().to_string()
}

/// Applies [`sanitize`] to every string leaf of a JSON tree.
pub fn sanitize_tree(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(sanitize(&s)),
        Value::Array(items) => Value::Array(items.into_iter().map(sanitize_tree).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, sanitize_tree(v)))
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sanitize_strips_tags_and_trims() {
        assert_eq!(
            sanitize("  <script>alert(1)</script> Rust <b>engineer</b>  "),
            "alert(1) Rust engineer"
        );
    }

    #[test]
    fn test_sanitize_empty_input() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("   "), "");
    }

    #[test]
    fn test_sanitize_leaves_plain_comparisons_alone() {
        // A lone '<' with no closing '>' is not a tag.
        assert_eq!(sanitize("latency < 50ms"), "latency < 50ms");
    }

    #[test]
    fn test_sanitize_nested_tag_does_not_reassemble() {
        let once = sanitize("<<b>script>payload");
        assert!(!TAG_REGEX.is_match(&once), "got {once:?}");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let inputs = [
            "<p>Senior <i>Rust</i> developer</p>",
            "<<b>b>>text<",
            " a < b > c ",
            "čćžšđ <span>Beograd</span>",
            "",
        ];
        for input in inputs {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once, "not idempotent for {input:?}");
            assert!(!TAG_REGEX.is_match(&once));
        }
    }

    #[test]
    fn test_sanitize_tree_recurses_and_keeps_non_strings() {
        let dirty = json!({
            "full_name": " <b>Ana</b> Petrović ",
            "projects": ["<i>Compiler</i>", {"name": "<u>Cache</u>", "stars": 42}],
            "remote": true,
            "manager": null
        });
        let clean = sanitize_tree(dirty);
        assert_eq!(
            clean,
            json!({
                "full_name": "Ana Petrović",
                "projects": ["Compiler", {"name": "Cache", "stars": 42}],
                "remote": true,
                "manager": null
            })
        );
    }
}
