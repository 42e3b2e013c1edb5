// dependabot-errors/src/source.rs
//! Repository source descriptors carried by [`crate::DependabotError::RepoNotFound`].

use std::fmt;

use serde::Serialize;

use crate::sanitizer::ErrorMessageSanitizer;

/// A repository location on a hosting provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Source {
    /// Hosting provider identifier, e.g. `github` or `gitlab`.
    pub provider: String,
    /// `owner/name` path of the repository.
    pub repo: String,
    pub hostname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

impl Source {
    pub fn new(provider: impl Into<String>, repo: impl Into<String>, hostname: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            repo: repo.into(),
            hostname: hostname.into(),
            directory: None,
            branch: None,
        }
    }

    pub fn with_directory(mut self, directory: impl Into<String>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    pub fn url(&self) -> String {
        format!("https://{}/{}", self.hostname, self.repo)
    }
}

/// Either a bare URL or a structured [`Source`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum RepoSource {
    Url(String),
    Repository(Source),
}

impl RepoSource {
    pub fn url(&self) -> String {
        match self {
            RepoSource::Url(url) => url.clone(),
            RepoSource::Repository(source) => source.url(),
        }
    }

    /// Returns a copy with credentials and provider-path tokens removed.
    pub(crate) fn sanitized(self, sanitizer: &ErrorMessageSanitizer) -> Self {
        match self {
            RepoSource::Url(url) => RepoSource::Url(sanitizer.sanitize_source(&url).into_string()),
            RepoSource::Repository(mut source) => {
                // Credentials only match behind a scheme separator, so lend the hostname one.
                let hostname = sanitizer.filter_sensitive_data(&format!("://{}", source.hostname));
                source.hostname = hostname.strip_prefix("://").unwrap_or(&hostname).to_string();
                RepoSource::Repository(source)
            }
        }
    }
}

impl fmt::Display for RepoSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url())
    }
}

impl From<String> for RepoSource {
    fn from(url: String) -> Self {
        RepoSource::Url(url)
    }
}

impl From<&str> for RepoSource {
    fn from(url: &str) -> Self {
        RepoSource::Url(url.to_string())
    }
}

impl From<Source> for RepoSource {
    fn from(source: Source) -> Self {
        RepoSource::Repository(source)
    }
}
