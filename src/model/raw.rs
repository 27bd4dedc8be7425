//! Deserialization targets for raw Jira payloads.
//!
//! Only the fields the normalizer consumes are modeled; everything else in
//! an issue's `fields` object lands in the flattened `custom` map so the
//! configured epic-link custom field can be looked up by id.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct RawIssue {
    pub id: String,
    pub key: String,
    pub fields: RawFields,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFields {
    pub summary: Option<String>,
    /// ADF document on Cloud, plain string on Server.
    pub description: Option<Value>,
    pub status: Option<StatusField>,
    pub created: Option<String>,
    pub updated: Option<String>,
    #[serde(default)]
    pub issuelinks: Vec<RawIssueLink>,
    pub parent: Option<RawLinkedIssue>,
    #[serde(default)]
    pub subtasks: Vec<RawLinkedIssue>,
    #[serde(flatten)]
    pub custom: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusField {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawIssueLink {
    #[serde(rename = "type")]
    pub link_type: RawLinkType,
    #[serde(rename = "inwardIssue")]
    pub inward_issue: Option<RawLinkedIssue>,
    #[serde(rename = "outwardIssue")]
    pub outward_issue: Option<RawLinkedIssue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLinkType {
    pub inward: Option<String>,
    pub outward: Option<String>,
}

/// Nested issue slice as it appears under `parent`, `subtasks`, and both
/// sides of an issue link.
#[derive(Debug, Clone, Deserialize)]
pub struct RawLinkedIssue {
    pub id: String,
    pub key: String,
    pub fields: Option<RawLinkedFields>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLinkedFields {
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawComment {
    pub id: String,
    /// ADF document on Cloud, plain string on Server.
    #[serde(default)]
    pub body: Value,
    pub author: Option<RawAuthor>,
    pub created: Option<String>,
    pub updated: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAuthor {
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub issues: Vec<RawIssue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedIssue {
    pub id: String,
    pub key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Transition {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Attachment {
    pub id: String,
    pub filename: String,
}
