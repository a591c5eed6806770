//! In-memory fake for the repo-host trait (testing only)
//!
//! `FakeRepoHost` satisfies the trait contract without any network access.
//! Tests script the comparison result and file contents up front, then
//! observe which content fetches happened and which comments were posted.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{HostError, HostResult};
use crate::traits::RepoHost;
use a11yscan_domain::{
    CommentTarget, CompareStatus, Comparison, RepoCoordinates, RevisionRange,
};

/// A comment the fake recorded instead of posting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedComment {
    pub target: CommentTarget,
    pub body: String,
}

/// In-memory repo host backed by scripted responses.
///
/// Defaults to an `ahead` comparison with no changed files.
pub struct FakeRepoHost {
    comparison: Mutex<Comparison>,
    contents: Mutex<HashMap<(String, String), String>>,
    failing_paths: Mutex<HashSet<String>>,
    fail_publish: Mutex<bool>,
    content_requests: Mutex<Vec<(String, String)>>,
    posted: Mutex<Vec<PostedComment>>,
}

impl Default for FakeRepoHost {
    fn default() -> Self {
        FakeRepoHost {
            comparison: Mutex::new(Comparison {
                status: CompareStatus::Ahead,
                files: vec![],
            }),
            contents: Mutex::new(HashMap::new()),
            failing_paths: Mutex::new(HashSet::new()),
            fail_publish: Mutex::new(false),
            content_requests: Mutex::new(Vec::new()),
            posted: Mutex::new(Vec::new()),
        }
    }
}

impl FakeRepoHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the comparison the next `compare` call returns
    pub fn with_comparison(self, comparison: Comparison) -> Self {
        *self.comparison.lock().unwrap() = comparison;
        self
    }

    /// Script one file's content at one revision
    pub fn with_content(
        self,
        path: impl Into<String>,
        revision: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        self.contents
            .lock()
            .unwrap()
            .insert((path.into(), revision.into()), content.into());
        self
    }

    /// Make every content fetch for this path fail
    pub fn with_failing_path(self, path: impl Into<String>) -> Self {
        self.failing_paths.lock().unwrap().insert(path.into());
        self
    }

    /// Make comment publishing fail
    pub fn with_failing_publish(self) -> Self {
        *self.fail_publish.lock().unwrap() = true;
        self
    }

    /// Every (path, revision) pair `file_content` was called with, in order
    pub fn content_requests(&self) -> Vec<(String, String)> {
        self.content_requests.lock().unwrap().clone()
    }

    /// How many content fetches happened
    pub fn content_fetch_count(&self) -> usize {
        self.content_requests.lock().unwrap().len()
    }

    /// Every comment recorded so far, in posting order
    pub fn posted_comments(&self) -> Vec<PostedComment> {
        self.posted.lock().unwrap().clone()
    }
}

#[async_trait]
impl RepoHost for FakeRepoHost {
    async fn compare(
        &self,
        _repo: &RepoCoordinates,
        _range: &RevisionRange,
    ) -> HostResult<Comparison> {
        Ok(self.comparison.lock().unwrap().clone())
    }

    async fn file_content(
        &self,
        _repo: &RepoCoordinates,
        path: &str,
        revision: &str,
    ) -> HostResult<String> {
        self.content_requests
            .lock()
            .unwrap()
            .push((path.to_string(), revision.to_string()));

        if self.failing_paths.lock().unwrap().contains(path) {
            return Err(HostError::Http(format!("scripted failure for {}", path)));
        }

        self.contents
            .lock()
            .unwrap()
            .get(&(path.to_string(), revision.to_string()))
            .cloned()
            .ok_or_else(|| HostError::UnexpectedStatus {
                operation: "contents".to_string(),
                status: 404,
            })
    }

    async fn publish_comment(
        &self,
        _repo: &RepoCoordinates,
        target: &CommentTarget,
        body: &str,
    ) -> HostResult<()> {
        if *self.fail_publish.lock().unwrap() {
            return Err(HostError::Http("scripted publish failure".to_string()));
        }

        self.posted.lock().unwrap().push(PostedComment {
            target: target.clone(),
            body: body.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use a11yscan_domain::{ChangeKind, ChangedFile};

    fn repo() -> RepoCoordinates {
        RepoCoordinates::new("octocat", "hello-world")
    }

    #[tokio::test]
    async fn test_fake_returns_scripted_comparison() {
        let host = FakeRepoHost::new().with_comparison(Comparison {
            status: CompareStatus::Ahead,
            files: vec![ChangedFile::new(
                "page.tpl",
                ChangeKind::Added,
                "https://example/view",
            )],
        });

        let comparison = host
            .compare(&repo(), &RevisionRange::new("c1", "c2"))
            .await
            .expect("should compare");
        assert_eq!(comparison.files.len(), 1);
        assert_eq!(comparison.files[0].path, "page.tpl");
    }

    #[tokio::test]
    async fn test_fake_records_content_requests() {
        let host = FakeRepoHost::new().with_content("page.tpl", "c2", "<p>ok</p>");

        let content = host
            .file_content(&repo(), "page.tpl", "c2")
            .await
            .expect("should fetch");
        assert_eq!(content, "<p>ok</p>");
        assert_eq!(
            host.content_requests(),
            vec![("page.tpl".to_string(), "c2".to_string())]
        );
    }

    #[tokio::test]
    async fn test_fake_missing_content_is_not_found() {
        let host = FakeRepoHost::new();
        let err = host
            .file_content(&repo(), "missing.tpl", "c2")
            .await
            .expect_err("unscripted content should fail");
        assert!(matches!(
            err,
            HostError::UnexpectedStatus { status: 404, .. }
        ));
        // The failed fetch still counts as a request
        assert_eq!(host.content_fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_fake_scripted_path_failure() {
        let host = FakeRepoHost::new()
            .with_content("page.tpl", "c2", "<p>ok</p>")
            .with_failing_path("page.tpl");

        let err = host
            .file_content(&repo(), "page.tpl", "c2")
            .await
            .expect_err("scripted failure should win");
        assert!(matches!(err, HostError::Http(_)));
    }

    #[tokio::test]
    async fn test_fake_records_posted_comments() {
        let host = FakeRepoHost::new();
        host.publish_comment(&repo(), &CommentTarget::PullRequest(42), "report body")
            .await
            .expect("should post");

        let posted = host.posted_comments();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0].target, CommentTarget::PullRequest(42));
        assert_eq!(posted[0].body, "report body");
    }

    #[tokio::test]
    async fn test_fake_scripted_publish_failure() {
        let host = FakeRepoHost::new().with_failing_publish();
        let err = host
            .publish_comment(&repo(), &CommentTarget::Commit("bbb".to_string()), "body")
            .await
            .expect_err("publish should fail");
        assert!(matches!(err, HostError::Http(_)));
        assert!(host.posted_comments().is_empty());
    }
}
