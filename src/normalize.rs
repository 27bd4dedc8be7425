//! Flattens raw Jira payloads into [`NormalizedIssue`] records.
//!
//! Mentions are merged from three places: the description text, explicit
//! issue links, and comment bodies. Dedup happens only inside each single
//! extractor call; link mentions and comment mentions are appended as-is, so
//! an issue can legitimately carry the same key more than once across
//! sources. That mirrors the upstream behavior consumers already depend on.

use serde_json::Value;

use crate::model::issue::{
    IssueRef, Mention, MentionKind, MentionSource, NormalizedComment, NormalizedIssue,
};
use crate::model::raw::{RawComment, RawIssue, RawIssueLink, RawLinkedIssue};
use crate::util::adf::{extract_mentions, extract_text};

pub fn normalize_issue(raw: &RawIssue, epic_link_field: Option<&str>) -> NormalizedIssue {
    let description_value = raw.fields.description.as_ref().unwrap_or(&Value::Null);
    let description = extract_text(description_value);
    let mut related_issues =
        extract_mentions(description_value, MentionSource::Description, None);

    for link in &raw.fields.issuelinks {
        if let Some(mention) = link_mention(link) {
            related_issues.push(mention);
        }
    }

    let epic_link = epic_link_field
        .and_then(|field| raw.fields.custom.get(field))
        .and_then(Value::as_str)
        .map(|value| IssueRef {
            // The custom field holds only the epic's key; the fetch layer
            // fills in summary (and the real id) with a separate lookup.
            id: value.to_string(),
            key: value.to_string(),
            summary: None,
        });

    let children = if raw.fields.subtasks.is_empty() {
        None
    } else {
        Some(raw.fields.subtasks.iter().map(issue_ref).collect())
    };

    NormalizedIssue {
        id: raw.id.clone(),
        key: raw.key.clone(),
        summary: raw.fields.summary.clone().unwrap_or_default(),
        status: raw.fields.status.as_ref().map(|s| s.name.clone()),
        created: raw.fields.created.clone(),
        updated: raw.fields.updated.clone(),
        description,
        related_issues,
        parent: raw.fields.parent.as_ref().map(issue_ref),
        epic_link,
        children,
        comments: None,
    }
}

/// Extract each comment's body text and mentions, appending the mentions to
/// the issue's relation list. No dedup against existing entries.
pub fn attach_comments(issue: &mut NormalizedIssue, comments: &[RawComment]) {
    let mut normalized = Vec::with_capacity(comments.len());
    for comment in comments {
        let mentions = extract_mentions(&comment.body, MentionSource::Comment, Some(&comment.id));
        issue.related_issues.extend(mentions.iter().cloned());
        normalized.push(NormalizedComment {
            id: comment.id.clone(),
            body: extract_text(&comment.body),
            author: comment
                .author
                .as_ref()
                .and_then(|a| a.display_name.clone()),
            created: comment.created.clone(),
            updated: comment.updated.clone(),
            mentions,
        });
    }
    issue.comments = Some(normalized);
}

fn link_mention(link: &RawIssueLink) -> Option<Mention> {
    let (issue, relationship) = if let Some(inward) = &link.inward_issue {
        (inward, link.link_type.inward.clone())
    } else if let Some(outward) = &link.outward_issue {
        (outward, link.link_type.outward.clone())
    } else {
        return None;
    };

    Some(Mention {
        key: issue.key.clone(),
        kind: MentionKind::Link,
        source: MentionSource::Description,
        comment_id: None,
        summary: issue.fields.as_ref().and_then(|f| f.summary.clone()),
        relationship,
    })
}

fn issue_ref(issue: &RawLinkedIssue) -> IssueRef {
    IssueRef {
        id: issue.id.clone(),
        key: issue.key.clone(),
        summary: issue.fields.as_ref().and_then(|f| f.summary.clone()),
    }
}
