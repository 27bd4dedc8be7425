pub mod jira;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::model::raw::{
    Attachment, CreatedIssue, RawComment, RawIssue, SearchResult, Transition,
};

/// The abstract issue-tracker API the normalization layer consumes.
///
/// [`jira::JiraClient`] implements this for both Jira Cloud and
/// Server/Data Center; tests substitute a mock. Everything above this trait
/// is variant-agnostic.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    async fn search_issues(&self, jql: &str) -> Result<SearchResult>;

    async fn get_issue(&self, key: &str) -> Result<RawIssue>;

    async fn get_comments(&self, key: &str) -> Result<Vec<RawComment>>;

    async fn create_issue(
        &self,
        project: &str,
        issue_type: &str,
        summary: &str,
        description: Option<&str>,
        extra_fields: Option<Value>,
    ) -> Result<CreatedIssue>;

    async fn update_issue(&self, key: &str, fields: Value) -> Result<()>;

    async fn get_transitions(&self, key: &str) -> Result<Vec<Transition>>;

    async fn transition_issue(
        &self,
        key: &str,
        transition_id: &str,
        comment: Option<&str>,
    ) -> Result<()>;

    async fn add_attachment(
        &self,
        key: &str,
        bytes: Vec<u8>,
        filename: &str,
    ) -> Result<Attachment>;

    async fn add_comment(&self, key: &str, body: &str) -> Result<RawComment>;
}

#[cfg(test)]
pub mod tests;
