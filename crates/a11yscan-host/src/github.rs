//! GitHub implementation of the repo-host contract
//!
//! Talks to the GitHub REST API: compare two revisions, read file content via
//! the contents endpoint (base64 transport encoding), and create pull-request
//! or commit comments. The token is passed only to `bearer_auth()` and never
//! appears in logs or error messages.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::error::{HostError, HostResult};
use crate::traits::RepoHost;
use a11yscan_domain::{
    ChangeKind, ChangedFile, CommentTarget, CompareStatus, Comparison, RepoCoordinates,
    RevisionRange,
};

const DEFAULT_API_URL: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("a11yscan/", env!("CARGO_PKG_VERSION"));

/// GitHub REST client
pub struct GitHubHost {
    client: Client,
    base_url: String,
    token: String,
}

impl GitHubHost {
    /// Create a client against the public GitHub API
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_API_URL, token)
    }

    /// Create a client against a specific API base URL (GitHub Enterprise,
    /// or a stub server in tests)
    pub fn with_base_url(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let base_url = base_url.into();
        GitHubHost {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT)
    }

    /// Contents-endpoint URL for a file path. Each path segment is
    /// percent-encoded, so paths containing spaces or reserved characters
    /// still address the intended file.
    fn contents_url(&self, repo: &RepoCoordinates, path: &str) -> HostResult<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|err| HostError::Http(format!("invalid API base URL: {}", err)))?;
        url.path_segments_mut()
            .map_err(|_| HostError::Http(format!("invalid API base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["repos", repo.owner.as_str(), repo.repo.as_str(), "contents"])
            .extend(path.split('/'));
        Ok(url)
    }
}

// Wire shapes, trimmed to the fields the pipeline consumes.

#[derive(Debug, Deserialize)]
struct CompareResponse {
    status: CompareStatus,
    #[serde(default)]
    files: Vec<CompareFileEntry>,
}

#[derive(Debug, Deserialize)]
struct CompareFileEntry {
    filename: String,
    status: ChangeKind,
    #[serde(default)]
    blob_url: String,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    content: String,
    #[serde(default)]
    encoding: String,
}

/// Decode the contents-endpoint payload: base64 with embedded line breaks.
fn decode_content(path: &str, raw: &str) -> HostResult<String> {
    let compact: String = raw.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|err| HostError::ContentDecode {
            path: path.to_string(),
            message: err.to_string(),
        })?;
    String::from_utf8(bytes).map_err(|_| HostError::ContentNotText {
        path: path.to_string(),
    })
}

#[async_trait]
impl RepoHost for GitHubHost {
    async fn compare(
        &self,
        repo: &RepoCoordinates,
        range: &RevisionRange,
    ) -> HostResult<Comparison> {
        let url = format!(
            "{}/repos/{}/{}/compare/{}...{}",
            self.base_url, repo.owner, repo.repo, range.base, range.head
        );
        debug!(%repo, %range, "comparing revisions");

        let response = self.authorized(self.client.get(&url)).send().await?;
        if !response.status().is_success() {
            return Err(HostError::UnexpectedStatus {
                operation: "compare".to_string(),
                status: response.status().as_u16(),
            });
        }

        let parsed: CompareResponse =
            response
                .json()
                .await
                .map_err(|err| HostError::MalformedResponse {
                    operation: "compare".to_string(),
                    message: err.to_string(),
                })?;

        let files = parsed
            .files
            .into_iter()
            .map(|entry| ChangedFile::new(entry.filename, entry.status, entry.blob_url))
            .collect();

        Ok(Comparison {
            status: parsed.status,
            files,
        })
    }

    async fn file_content(
        &self,
        repo: &RepoCoordinates,
        path: &str,
        revision: &str,
    ) -> HostResult<String> {
        let url = self.contents_url(repo, path)?;
        debug!(%repo, path, revision, "fetching file content");

        let response = self
            .authorized(self.client.get(url).query(&[("ref", revision)]))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(HostError::UnexpectedStatus {
                operation: "contents".to_string(),
                status: response.status().as_u16(),
            });
        }

        let parsed: ContentResponse =
            response
                .json()
                .await
                .map_err(|err| HostError::MalformedResponse {
                    operation: "contents".to_string(),
                    message: err.to_string(),
                })?;

        if parsed.encoding != "base64" {
            return Err(HostError::MalformedResponse {
                operation: "contents".to_string(),
                message: format!("unexpected encoding {:?}", parsed.encoding),
            });
        }

        decode_content(path, &parsed.content)
    }

    async fn publish_comment(
        &self,
        repo: &RepoCoordinates,
        target: &CommentTarget,
        body: &str,
    ) -> HostResult<()> {
        let url = match target {
            CommentTarget::PullRequest(number) => format!(
                "{}/repos/{}/{}/issues/{}/comments",
                self.base_url, repo.owner, repo.repo, number
            ),
            CommentTarget::Commit(revision) => format!(
                "{}/repos/{}/{}/commits/{}/comments",
                self.base_url, repo.owner, repo.repo, revision
            ),
        };
        debug!(%repo, %target, "publishing comment");

        let response = self
            .authorized(self.client.post(&url).json(&json!({ "body": body })))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(HostError::UnexpectedStatus {
                operation: "comment".to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(())
    }
}
