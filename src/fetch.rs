//! Caller-facing fetch orchestration: joins an issue with its comments,
//! resolves the epic summary best-effort, and fans out over multiple keys.

use futures::future::try_join_all;

use crate::error::Result;
use crate::model::issue::NormalizedIssue;
use crate::normalize::{attach_comments, normalize_issue};
use crate::providers::IssueTracker;

/// Fetch one issue and its comments, returning the normalized record.
///
/// When the issue carries an epic link, a secondary lookup fills in the
/// epic's summary and real id. That lookup is best-effort: its failure is
/// logged and swallowed, leaving `epic_link.summary` unset.
pub async fn fetch_issue(
    tracker: &dyn IssueTracker,
    key: &str,
    epic_link_field: Option<&str>,
) -> Result<NormalizedIssue> {
    let (raw, comments) = tokio::try_join!(tracker.get_issue(key), tracker.get_comments(key))?;

    let mut issue = normalize_issue(&raw, epic_link_field);
    attach_comments(&mut issue, &comments);

    if let Some(epic) = issue.epic_link.as_mut() {
        match tracker.get_issue(&epic.key).await {
            Ok(epic_raw) => {
                epic.id = epic_raw.id;
                epic.summary = epic_raw.fields.summary;
            }
            Err(err) => {
                tracing::warn!(
                    issue = %issue.key,
                    epic = %epic.key,
                    %err,
                    "epic summary lookup failed"
                );
            }
        }
    }

    Ok(issue)
}

/// Fetch several issues concurrently. Results come back in input-key order,
/// not completion order; the first branch failure fails the whole call.
pub async fn fetch_issues(
    tracker: &dyn IssueTracker,
    keys: &[&str],
    epic_link_field: Option<&str>,
) -> Result<Vec<NormalizedIssue>> {
    try_join_all(
        keys.iter()
            .map(|key| fetch_issue(tracker, key, epic_link_field)),
    )
    .await
}
