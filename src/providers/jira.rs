use async_trait::async_trait;
use base64::Engine;
use serde::Deserialize;
use serde_json::{json, Value};

use super::IssueTracker;
use crate::config::{JiraConfig, JiraVariant};
use crate::error::{Error, Result};
use crate::model::raw::{
    Attachment, CreatedIssue, RawComment, RawIssue, SearchResult, Transition,
};

/// Fixed page size for search and comment listings.
const PAGE_SIZE: u32 = 50;

impl JiraVariant {
    fn api_prefix(&self) -> &'static str {
        match self {
            JiraVariant::Cloud => "/rest/api/3",
            JiraVariant::Server => "/rest/api/2",
        }
    }

    /// Shape a text body the way the variant's API expects: an ADF document
    /// on Cloud, a plain string on Server.
    fn text_body(&self, text: &str) -> Value {
        match self {
            JiraVariant::Cloud => json!({
                "type": "doc",
                "version": 1,
                "content": [{
                    "type": "paragraph",
                    "content": [{ "type": "text", "text": text }]
                }]
            }),
            JiraVariant::Server => json!(text),
        }
    }
}

pub struct JiraClient {
    base_url: String,
    auth_header: String,
    variant: JiraVariant,
    client: reqwest::Client,
}

impl JiraClient {
    pub fn new(config: &JiraConfig) -> Self {
        let creds = format!("{}:{}", config.email, config.api_token);
        let encoded = base64::engine::general_purpose::STANDARD.encode(creds);
        Self {
            base_url: config.resolved_base_url(),
            auth_header: format!("Basic {encoded}"),
            variant: config.variant,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, self.variant.api_prefix(), path)
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
    }

    async fn expect_success(resp: reqwest::Response) -> Result<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            Ok(resp)
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(Error::from_response(status, body))
        }
    }
}

#[derive(Deserialize)]
struct CommentsResponse {
    #[serde(default)]
    comments: Vec<RawComment>,
}

#[derive(Deserialize)]
struct TransitionsResponse {
    #[serde(default)]
    transitions: Vec<Transition>,
}

#[async_trait]
impl IssueTracker for JiraClient {
    async fn search_issues(&self, jql: &str) -> Result<SearchResult> {
        let url = format!(
            "{}?jql={}&maxResults={PAGE_SIZE}",
            self.api_url("/search"),
            urlencoding::encode(jql)
        );
        let resp = self.request(reqwest::Method::GET, &url).send().await?;
        let resp = Self::expect_success(resp).await?;
        Ok(resp.json().await?)
    }

    async fn get_issue(&self, key: &str) -> Result<RawIssue> {
        let url = self.api_url(&format!("/issue/{key}"));
        let resp = self.request(reqwest::Method::GET, &url).send().await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::IssueNotFound {
                key: key.to_string(),
            });
        }
        let resp = Self::expect_success(resp).await?;
        Ok(resp.json().await?)
    }

    async fn get_comments(&self, key: &str) -> Result<Vec<RawComment>> {
        let url = format!(
            "{}?maxResults={PAGE_SIZE}",
            self.api_url(&format!("/issue/{key}/comment"))
        );
        let resp = self.request(reqwest::Method::GET, &url).send().await?;
        let resp = Self::expect_success(resp).await?;
        let parsed: CommentsResponse = resp.json().await?;
        Ok(parsed.comments)
    }

    async fn create_issue(
        &self,
        project: &str,
        issue_type: &str,
        summary: &str,
        description: Option<&str>,
        extra_fields: Option<Value>,
    ) -> Result<CreatedIssue> {
        let mut fields = json!({
            "project": { "key": project },
            "issuetype": { "name": issue_type },
            "summary": summary,
        });
        if let Some(text) = description {
            fields["description"] = self.variant.text_body(text);
        }
        if let Some(Value::Object(extra)) = extra_fields {
            for (name, value) in extra {
                fields[name] = value;
            }
        }

        let url = self.api_url("/issue");
        let resp = self
            .request(reqwest::Method::POST, &url)
            .json(&json!({ "fields": fields }))
            .send()
            .await?;
        let resp = Self::expect_success(resp).await?;
        Ok(resp.json().await?)
    }

    async fn update_issue(&self, key: &str, fields: Value) -> Result<()> {
        let url = self.api_url(&format!("/issue/{key}"));
        let resp = self
            .request(reqwest::Method::PUT, &url)
            .json(&json!({ "fields": fields }))
            .send()
            .await?;
        Self::expect_success(resp).await?;
        Ok(())
    }

    async fn get_transitions(&self, key: &str) -> Result<Vec<Transition>> {
        let url = self.api_url(&format!("/issue/{key}/transitions"));
        let resp = self.request(reqwest::Method::GET, &url).send().await?;
        let resp = Self::expect_success(resp).await?;
        let parsed: TransitionsResponse = resp.json().await?;
        Ok(parsed.transitions)
    }

    async fn transition_issue(
        &self,
        key: &str,
        transition_id: &str,
        comment: Option<&str>,
    ) -> Result<()> {
        let mut body = json!({ "transition": { "id": transition_id } });
        if let Some(text) = comment {
            body["update"] = json!({
                "comment": [{ "add": { "body": self.variant.text_body(text) } }]
            });
        }

        let url = self.api_url(&format!("/issue/{key}/transitions"));
        let resp = self
            .request(reqwest::Method::POST, &url)
            .json(&body)
            .send()
            .await?;
        Self::expect_success(resp).await?;
        Ok(())
    }

    async fn add_attachment(
        &self,
        key: &str,
        bytes: Vec<u8>,
        filename: &str,
    ) -> Result<Attachment> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let url = self.api_url(&format!("/issue/{key}/attachments"));
        let resp = self
            .request(reqwest::Method::POST, &url)
            // Required by Jira to bypass XSRF protection on uploads.
            .header("X-Atlassian-Token", "no-check")
            .multipart(form)
            .send()
            .await?;
        let resp = Self::expect_success(resp).await?;

        let status = resp.status();
        let uploaded: Vec<Attachment> = resp.json().await?;
        uploaded.into_iter().next().ok_or_else(|| Error::Api {
            status: status.as_u16(),
            message: "attachment upload returned no entries".to_string(),
            body: String::new(),
        })
    }

    async fn add_comment(&self, key: &str, body: &str) -> Result<RawComment> {
        let url = self.api_url(&format!("/issue/{key}/comment"));
        let resp = self
            .request(reqwest::Method::POST, &url)
            .json(&json!({ "body": self.variant.text_body(body) }))
            .send()
            .await?;
        let resp = Self::expect_success(resp).await?;
        Ok(resp.json().await?)
    }
}
