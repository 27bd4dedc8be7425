use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::IssueTracker;
use crate::error::{Error, Result};
use crate::model::raw::{
    Attachment, CreatedIssue, RawComment, RawIssue, SearchResult, Transition,
};

/// In-memory tracker for exercising the normalization and fetch layers
/// without HTTP. Write operations record their call and return canned data.
pub struct MockTracker {
    issues: HashMap<String, RawIssue>,
    comments: HashMap<String, Vec<RawComment>>,
    pub calls: Mutex<Vec<String>>,
}

impl MockTracker {
    pub fn new() -> Self {
        Self {
            issues: HashMap::new(),
            comments: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_issue(mut self, payload: Value) -> Self {
        let issue: RawIssue = serde_json::from_value(payload).expect("valid raw issue");
        self.issues.insert(issue.key.clone(), issue);
        self
    }

    pub fn with_comments(mut self, key: &str, payload: Value) -> Self {
        let comments: Vec<RawComment> =
            serde_json::from_value(payload).expect("valid raw comments");
        self.comments.insert(key.to_string(), comments);
        self
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl IssueTracker for MockTracker {
    async fn search_issues(&self, jql: &str) -> Result<SearchResult> {
        self.record(format!("search:{jql}"));
        let issues: Vec<RawIssue> = self.issues.values().cloned().collect();
        Ok(SearchResult {
            total: issues.len() as u64,
            issues,
        })
    }

    async fn get_issue(&self, key: &str) -> Result<RawIssue> {
        self.record(format!("get_issue:{key}"));
        self.issues
            .get(key)
            .cloned()
            .ok_or_else(|| Error::IssueNotFound {
                key: key.to_string(),
            })
    }

    async fn get_comments(&self, key: &str) -> Result<Vec<RawComment>> {
        self.record(format!("get_comments:{key}"));
        Ok(self.comments.get(key).cloned().unwrap_or_default())
    }

    async fn create_issue(
        &self,
        project: &str,
        _issue_type: &str,
        _summary: &str,
        _description: Option<&str>,
        _extra_fields: Option<Value>,
    ) -> Result<CreatedIssue> {
        self.record(format!("create_issue:{project}"));
        Ok(serde_json::from_value(serde_json::json!({
            "id": "90000",
            "key": format!("{project}-999")
        }))
        .unwrap())
    }

    async fn update_issue(&self, key: &str, _fields: Value) -> Result<()> {
        self.record(format!("update_issue:{key}"));
        Ok(())
    }

    async fn get_transitions(&self, key: &str) -> Result<Vec<Transition>> {
        self.record(format!("get_transitions:{key}"));
        Ok(vec![])
    }

    async fn transition_issue(
        &self,
        key: &str,
        transition_id: &str,
        _comment: Option<&str>,
    ) -> Result<()> {
        self.record(format!("transition_issue:{key}:{transition_id}"));
        Ok(())
    }

    async fn add_attachment(
        &self,
        key: &str,
        _bytes: Vec<u8>,
        filename: &str,
    ) -> Result<Attachment> {
        self.record(format!("add_attachment:{key}:{filename}"));
        Ok(serde_json::from_value(serde_json::json!({
            "id": "80000",
            "filename": filename
        }))
        .unwrap())
    }

    async fn add_comment(&self, key: &str, body: &str) -> Result<RawComment> {
        self.record(format!("add_comment:{key}"));
        Ok(serde_json::from_value(serde_json::json!({
            "id": "70000",
            "body": body
        }))
        .unwrap())
    }
}

#[tokio::test]
async fn mock_get_issue_not_found_names_key() {
    let tracker = MockTracker::new();
    let err = tracker.get_issue("GHOST-1").await.unwrap_err();
    assert!(matches!(err, Error::IssueNotFound { ref key } if key == "GHOST-1"));
    assert!(err.to_string().contains("GHOST-1"));
}

#[tokio::test]
async fn tracker_usable_as_trait_object() {
    let tracker: Box<dyn IssueTracker> = Box::new(MockTracker::new().with_issue(
        serde_json::json!({ "id": "1", "key": "ABC-1", "fields": { "summary": "hi" } }),
    ));
    let result = tracker.search_issues("project = ABC").await.unwrap();
    assert_eq!(result.total, 1);
    assert_eq!(result.issues[0].key, "ABC-1");
}

#[tokio::test]
async fn write_operations_are_recorded() {
    let tracker = MockTracker::new();
    tracker
        .update_issue("ABC-1", serde_json::json!({}))
        .await
        .unwrap();
    tracker.transition_issue("ABC-1", "31", None).await.unwrap();
    let calls = tracker.calls.lock().unwrap();
    assert_eq!(
        calls.as_slice(),
        &["update_issue:ABC-1", "transition_issue:ABC-1:31"]
    );
}
