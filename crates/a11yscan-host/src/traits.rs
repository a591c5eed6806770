//! The repo-host trait consumed by the pipeline

use async_trait::async_trait;

use crate::error::HostResult;
use a11yscan_domain::{CommentTarget, Comparison, RepoCoordinates, RevisionRange};

/// Narrow source-host contract.
///
/// Guarantees:
/// - `compare` preserves the file order the host reported.
/// - `file_content` returns decoded text, not transport encoding.
/// - `publish_comment` posts exactly once per call; the caller decides when.
///
/// No retries or caching behind this seam; a failed call is the caller's to
/// handle.
#[async_trait]
pub trait RepoHost: Send + Sync {
    /// Compare two revisions and list the files that changed between them.
    async fn compare(
        &self,
        repo: &RepoCoordinates,
        range: &RevisionRange,
    ) -> HostResult<Comparison>;

    /// Fetch one file's text content as it exists at the given revision.
    async fn file_content(
        &self,
        repo: &RepoCoordinates,
        path: &str,
        revision: &str,
    ) -> HostResult<String>;

    /// Publish a comment on the given pull request or commit.
    async fn publish_comment(
        &self,
        repo: &RepoCoordinates,
        target: &CommentTarget,
        body: &str,
    ) -> HostResult<()>;
}
