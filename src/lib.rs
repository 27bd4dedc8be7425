//! Jira client adapter.
//!
//! Talks to Jira Cloud or Server/Data Center, fetches issues, comments, and
//! attachments, and flattens the verbose native representation into
//! [`model::issue::NormalizedIssue`] records with cross-issue mentions
//! extracted from ADF content.

pub mod config;
pub mod error;
pub mod fetch;
pub mod model;
pub mod normalize;
pub mod providers;
pub mod util;

pub use config::{load_config, JiraConfig, JiraVariant};
pub use error::{Error, Result};
pub use fetch::{fetch_issue, fetch_issues};
pub use model::issue::{
    IssueRef, Mention, MentionKind, MentionSource, NormalizedComment, NormalizedIssue,
};
pub use normalize::{attach_comments, normalize_issue};
pub use providers::jira::JiraClient;
pub use providers::IssueTracker;
