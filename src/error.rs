use serde_json::Value;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Non-success response from the Jira API.
    #[error("Jira API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        /// Raw error body, kept for diagnostics.
        body: String,
    },

    #[error("issue {key} not found")]
    IssueNotFound { key: String },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("config error: {0}")]
    Config(String),
}

impl Error {
    /// Build an `Api` error from a non-2xx response body.
    ///
    /// The message is assembled best-effort from Jira's error payload,
    /// checking `errorMessages`, then `message`, then `errorMessage`. An
    /// unparseable body falls back to the HTTP status's canonical reason.
    pub(crate) fn from_response(status: reqwest::StatusCode, body: String) -> Self {
        let message = parse_error_message(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        });
        Error::Api {
            status: status.as_u16(),
            message,
            body,
        }
    }
}

fn parse_error_message(body: &str) -> Option<String> {
    let value: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(err) => {
            tracing::warn!(%err, "unparseable Jira error body");
            return None;
        }
    };

    if let Some(messages) = value.get("errorMessages").and_then(Value::as_array) {
        let joined: Vec<&str> = messages.iter().filter_map(Value::as_str).collect();
        if !joined.is_empty() {
            return Some(joined.join("; "));
        }
    }
    if let Some(message) = value.get("message").and_then(Value::as_str) {
        return Some(message.to_string());
    }
    value
        .get("errorMessage")
        .and_then(Value::as_str)
        .map(String::from)
}
