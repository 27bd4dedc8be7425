//! Extraction over Jira's Atlassian Document Format (ADF).
//!
//! Both walkers visit the document tree depth-first, left-to-right, and
//! treat the node's own match and its children independently. Legacy Server
//! payloads carry plain strings instead of ADF trees; a bare JSON string is
//! handled as a single text leaf so callers stay variant-agnostic.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::model::issue::{Mention, MentionKind, MentionSource};

static ISSUE_KEY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Z]+-\d+").unwrap());
static BROWSE_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/browse/([A-Z]+-\d+)").unwrap());

/// Flatten an ADF document into plain text.
///
/// Concatenates every `"text"` leaf in traversal order with NO separator:
/// paragraph and block boundaries add no whitespace, so adjacent blocks can
/// visually run together. That matches what Jira consumers observe and is a
/// known limitation, not a bug.
pub fn extract_text(value: &Value) -> String {
    let mut out = String::new();
    collect_text(value, &mut out);
    out
}

fn collect_text(value: &Value, out: &mut String) {
    match value {
        Value::String(s) => out.push_str(s),
        Value::Array(items) => {
            for item in items {
                collect_text(item, out);
            }
        }
        Value::Object(obj) => {
            if obj.get("type").and_then(Value::as_str) == Some("text") {
                if let Some(text) = obj.get("text").and_then(Value::as_str) {
                    out.push_str(text);
                }
            }
            if let Some(content) = obj.get("content") {
                collect_text(content, out);
            }
        }
        _ => {}
    }
}

/// Collect cross-issue references from an ADF document.
///
/// Two node shapes produce mentions: `inlineCard` nodes whose `attrs.url`
/// points at `/browse/<KEY>`, and `text` leaves containing bare issue keys
/// (`[A-Z]+-\d+`, case-sensitive). Children are walked regardless of whether
/// the node itself matched.
///
/// The result is deduplicated by key: the first-encountered mention wins and
/// later duplicates are dropped even when their provenance differs. Dedup
/// applies only within this single call.
pub fn extract_mentions(
    value: &Value,
    source: MentionSource,
    comment_id: Option<&str>,
) -> Vec<Mention> {
    let mut found = Vec::new();
    collect_mentions(value, source, comment_id, &mut found);

    let mut seen = HashSet::new();
    found.retain(|m| seen.insert(m.key.clone()));
    found
}

fn collect_mentions(
    value: &Value,
    source: MentionSource,
    comment_id: Option<&str>,
    out: &mut Vec<Mention>,
) {
    match value {
        Value::String(s) => scan_keys(s, source, comment_id, out),
        Value::Array(items) => {
            for item in items {
                collect_mentions(item, source, comment_id, out);
            }
        }
        Value::Object(obj) => {
            match obj.get("type").and_then(Value::as_str) {
                Some("inlineCard") => {
                    let url = obj
                        .get("attrs")
                        .and_then(|attrs| attrs.get("url"))
                        .and_then(Value::as_str);
                    if let Some(caps) = url.and_then(|u| BROWSE_URL_RE.captures(u)) {
                        out.push(text_mention(caps[1].to_string(), source, comment_id));
                    }
                }
                Some("text") => {
                    if let Some(text) = obj.get("text").and_then(Value::as_str) {
                        scan_keys(text, source, comment_id, out);
                    }
                }
                _ => {}
            }
            if let Some(content) = obj.get("content") {
                collect_mentions(content, source, comment_id, out);
            }
        }
        _ => {}
    }
}

fn scan_keys(text: &str, source: MentionSource, comment_id: Option<&str>, out: &mut Vec<Mention>) {
    for found in ISSUE_KEY_RE.find_iter(text) {
        out.push(text_mention(found.as_str().to_string(), source, comment_id));
    }
}

fn text_mention(key: String, source: MentionSource, comment_id: Option<&str>) -> Mention {
    Mention {
        key,
        kind: MentionKind::Mention,
        source,
        comment_id: comment_id.map(String::from),
        summary: None,
        relationship: None,
    }
}
