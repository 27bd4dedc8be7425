use serde::{Deserialize, Serialize};

/// A detected reference from one issue to another: either an explicit typed
/// link or a bare key found in free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mention {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: MentionKind,
    pub source: MentionSource,
    #[serde(rename = "commentId", skip_serializing_if = "Option::is_none")]
    pub comment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MentionKind {
    Mention,
    Link,
}

/// Which field a mention was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MentionSource {
    Description,
    Comment,
}

/// Minimal identifying slice of an issue (parent, epic, subtask).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRef {
    pub id: String,
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Flat, application-friendly view of a Jira issue.
///
/// Timestamps are passed through verbatim; Cloud and Server emit different
/// datetime formats and callers rarely need more than display ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedIssue {
    pub id: String,
    pub key: String,
    pub summary: String,
    pub status: Option<String>,
    pub created: Option<String>,
    pub updated: Option<String>,
    pub description: String,
    pub related_issues: Vec<Mention>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<IssueRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epic_link: Option<IssueRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<IssueRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<NormalizedComment>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedComment {
    pub id: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub created: Option<String>,
    pub updated: Option<String>,
    pub mentions: Vec<Mention>,
}
