use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Immutable connection settings, passed at client construction.
#[derive(Debug, Clone, Deserialize)]
pub struct JiraConfig {
    /// Atlassian site name; expands to `https://{domain}.atlassian.net`
    /// unless `base_url` overrides it.
    pub domain: String,
    pub email: String,
    pub api_token: String,
    #[serde(default)]
    pub variant: JiraVariant,
    /// Custom field id holding the epic link (e.g. "customfield_10014").
    /// Differs per Jira instance, so it is configuration, not code.
    pub epic_link_field: Option<String>,
    /// Full base URL for Server/Data Center installs hosted anywhere.
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JiraVariant {
    #[default]
    Cloud,
    Server,
}

impl JiraConfig {
    pub fn resolved_base_url(&self) -> String {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}.atlassian.net", self.domain),
        }
    }
}

fn config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".jiralink")
        .join("config.toml")
}

pub fn load_config() -> Result<JiraConfig> {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> Result<JiraConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|err| Error::Config(format!("failed to read {}: {err}", path.display())))?;
    toml::from_str(&contents)
        .map_err(|err| Error::Config(format!("failed to parse {}: {err}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_minimal_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "domain = \"acme\"\nemail = \"me@acme.com\"\napi_token = \"secret\""
        )
        .unwrap();

        let config = load_config_from(file.path()).unwrap();
        assert_eq!(config.domain, "acme");
        assert_eq!(config.variant, JiraVariant::Cloud);
        assert_eq!(config.resolved_base_url(), "https://acme.atlassian.net");
        assert!(config.epic_link_field.is_none());
    }

    #[test]
    fn server_variant_with_base_url() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "domain = \"ignored\"\nemail = \"me@corp.com\"\napi_token = \"secret\"\n\
             variant = \"server\"\nbase_url = \"https://jira.corp.internal/\"\n\
             epic_link_field = \"customfield_10014\""
        )
        .unwrap();

        let config = load_config_from(file.path()).unwrap();
        assert_eq!(config.variant, JiraVariant::Server);
        assert_eq!(config.resolved_base_url(), "https://jira.corp.internal");
        assert_eq!(
            config.epic_link_field.as_deref(),
            Some("customfield_10014")
        );
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = load_config_from(Path::new("/nonexistent/jiralink.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "domain = ").unwrap();
        let err = load_config_from(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
