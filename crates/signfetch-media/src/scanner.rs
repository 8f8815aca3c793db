//! Schema-free candidate discovery.
//!
//! The response document has no fixed shape, so the scanner walks every
//! mapping and sequence and applies heuristic predicates at string leaves.
//! Two rules exist:
//!
//! - **base64**: the key contains `base64`, `image`, or `binary`
//!   (case-insensitive), or the string is at least 512 characters with no
//!   space, `\n`, or `\r`.
//! - **url**: the key contains `url`, `image_url`, or `image_urls`
//!   (case-insensitive), or the string starts with `http://` / `https://`.
//!
//! Strings directly inside a sequence have no key, so only the key-less half
//! of each rule applies to them.

use std::collections::HashSet;

use serde_json::{Map, Value};

/// Minimum length (in characters) of a key-less base64 candidate.
pub const MIN_BASE64_CANDIDATE_LEN: usize = 512;

const BASE64_KEY_HINTS: [&str; 3] = ["base64", "image", "binary"];
const URL_KEY_HINTS: [&str; 3] = ["url", "image_url", "image_urls"];

/// Tagged view over a JSON value, independent of the deserializer's types.
#[derive(Debug, Clone, Copy)]
enum Node<'a> {
    Mapping(&'a Map<String, Value>),
    Sequence(&'a [Value]),
    Text(&'a str),
    Other,
}

impl<'a> From<&'a Value> for Node<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => Node::Mapping(map),
            Value::Array(items) => Node::Sequence(items),
            Value::String(text) => Node::Text(text),
            Value::Null | Value::Bool(_) | Value::Number(_) => Node::Other,
        }
    }
}

/// A predicate deciding whether a string leaf is a candidate.
trait CandidateRule {
    /// Test a string stored under `key` in a mapping.
    fn matches_keyed(&self, key: &str, text: &str) -> bool;

    /// Test a string stored directly in a sequence.
    fn matches_unkeyed(&self, text: &str) -> bool;
}

struct Base64Rule;

impl CandidateRule for Base64Rule {
    fn matches_keyed(&self, key: &str, text: &str) -> bool {
        key_contains_any(key, &BASE64_KEY_HINTS) || self.matches_unkeyed(text)
    }

    fn matches_unkeyed(&self, text: &str) -> bool {
        looks_like_long_token(text)
    }
}

struct UrlRule;

impl CandidateRule for UrlRule {
    fn matches_keyed(&self, key: &str, text: &str) -> bool {
        key_contains_any(key, &URL_KEY_HINTS) || self.matches_unkeyed(text)
    }

    fn matches_unkeyed(&self, text: &str) -> bool {
        text.starts_with("http://") || text.starts_with("https://")
    }
}

/// Collect possible base64 payloads, in discovery order, duplicates kept.
///
/// Returns an empty list unless `document` is a JSON object.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use signfetch_media::scanner::collect_base64_candidates;
///
/// let doc = json!({"data": {"binary_data_base64": ["...", "x"]}, "image": "abc"});
/// assert_eq!(collect_base64_candidates(&doc), vec!["abc"]);
/// ```
#[must_use]
pub fn collect_base64_candidates(document: &Value) -> Vec<&str> {
    collect(document, &Base64Rule)
}

/// Collect possible media URLs, in first-seen order, duplicates removed.
///
/// Returns an empty list unless `document` is a JSON object.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use signfetch_media::scanner::collect_url_candidates;
///
/// let doc = json!({"results": [{"url": "https://x/y.png"}, {"url": "https://x/y.png"}]});
/// assert_eq!(collect_url_candidates(&doc), vec!["https://x/y.png"]);
/// ```
#[must_use]
pub fn collect_url_candidates(document: &Value) -> Vec<&str> {
    let mut seen = HashSet::new();
    collect(document, &UrlRule)
        .into_iter()
        .filter(|url| seen.insert(*url))
        .collect()
}

fn collect<'a>(document: &'a Value, rule: &impl CandidateRule) -> Vec<&'a str> {
    let mut found = Vec::new();
    if let node @ Node::Mapping(_) = Node::from(document) {
        walk(node, rule, &mut found);
    }
    found
}

fn walk<'a>(node: Node<'a>, rule: &impl CandidateRule, found: &mut Vec<&'a str>) {
    match node {
        Node::Mapping(map) => {
            for (key, value) in map {
                match Node::from(value) {
                    Node::Text(text) => {
                        if rule.matches_keyed(key, text) {
                            found.push(text);
                        }
                    }
                    child => walk(child, rule, found),
                }
            }
        }
        Node::Sequence(items) => {
            for item in items {
                match Node::from(item) {
                    Node::Text(text) => {
                        if rule.matches_unkeyed(text) {
                            found.push(text);
                        }
                    }
                    child => walk(child, rule, found),
                }
            }
        }
        Node::Text(_) | Node::Other => {}
    }
}

fn key_contains_any(key: &str, hints: &[&str]) -> bool {
    let key = key.to_lowercase();
    hints.iter().any(|hint| key.contains(hint))
}

fn looks_like_long_token(text: &str) -> bool {
    // Byte length bounds char count from above; skip counting short strings.
    text.len() >= MIN_BASE64_CANDIDATE_LEN
        && text.chars().count() >= MIN_BASE64_CANDIDATE_LEN
        && !text.contains(['\n', ' ', '\r'])
}
