//! Trigger events and comment targets
//!
//! A run is started by exactly one source-host webhook event. Only two kinds
//! are supported: pull_request (compare base branch tip vs. source branch tip)
//! and push (compare previous tip vs. new tip). Every other kind is rejected
//! before any remote call is made.

use crate::change::RevisionRange;
use crate::error::TriggerError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Repository coordinates in `owner/repo` form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoCoordinates {
    pub owner: String,
    pub repo: String,
}

impl RepoCoordinates {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        RepoCoordinates {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl FromStr for RepoCoordinates {
    type Err = TriggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        match parts.as_slice() {
            [owner, repo] if !owner.is_empty() && !repo.is_empty() => {
                Ok(RepoCoordinates::new(*owner, *repo))
            }
            _ => Err(TriggerError::InvalidRepository {
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for RepoCoordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Where the finished report is published
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommentTarget {
    /// Comment on a pull request, by number
    PullRequest(u64),
    /// Comment on a single commit, by revision
    Commit(String),
}

impl std::fmt::Display for CommentTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommentTarget::PullRequest(number) => write!(f, "pull request #{}", number),
            CommentTarget::Commit(revision) => write!(f, "commit {}", revision),
        }
    }
}

/// The event that started this run
///
/// Matching on this enum is exhaustive by construction; unsupported webhook
/// kinds never produce a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerEvent {
    PullRequest {
        number: u64,
        base: String,
        head: String,
    },
    Push {
        before: String,
        after: String,
    },
}

// Payload shapes as delivered by the source host. Only the fields the
// pipeline needs are modeled; everything else in the payload is ignored.

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    pull_request: PullRequestInfo,
}

#[derive(Debug, Deserialize)]
struct PullRequestInfo {
    number: u64,
    base: RevisionRef,
    head: RevisionRef,
}

#[derive(Debug, Deserialize)]
struct RevisionRef {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct PushPayload {
    #[serde(default)]
    before: String,
    #[serde(default)]
    after: String,
}

impl TriggerEvent {
    /// Resolve the trigger from a webhook event name and its JSON payload.
    ///
    /// Fails on unsupported event kinds, payloads that do not match the
    /// documented shape, and empty revision identifiers.
    pub fn from_webhook(
        event_name: &str,
        payload: &serde_json::Value,
    ) -> Result<Self, TriggerError> {
        let event = match event_name {
            "pull_request" => {
                let parsed: PullRequestPayload = serde_json::from_value(payload.clone())?;
                TriggerEvent::PullRequest {
                    number: parsed.pull_request.number,
                    base: parsed.pull_request.base.sha,
                    head: parsed.pull_request.head.sha,
                }
            }
            "push" => {
                let parsed: PushPayload = serde_json::from_value(payload.clone())?;
                TriggerEvent::Push {
                    before: parsed.before,
                    after: parsed.after,
                }
            }
            other => {
                return Err(TriggerError::UnsupportedEvent {
                    kind: other.to_string(),
                })
            }
        };

        let range = event.revision_range();
        if range.base.is_empty() || range.head.is_empty() {
            return Err(TriggerError::MissingRevisions {
                kind: event.kind().to_string(),
            });
        }

        Ok(event)
    }

    /// The webhook event-kind name this trigger came from
    pub fn kind(&self) -> &'static str {
        match self {
            TriggerEvent::PullRequest { .. } => "pull_request",
            TriggerEvent::Push { .. } => "push",
        }
    }

    /// The (base, head) window this run compares
    pub fn revision_range(&self) -> RevisionRange {
        match self {
            TriggerEvent::PullRequest { base, head, .. } => {
                RevisionRange::new(base.clone(), head.clone())
            }
            TriggerEvent::Push { before, after } => {
                RevisionRange::new(before.clone(), after.clone())
            }
        }
    }

    /// Where the report comment is published for this trigger
    pub fn comment_target(&self) -> CommentTarget {
        match self {
            TriggerEvent::PullRequest { number, .. } => CommentTarget::PullRequest(*number),
            TriggerEvent::Push { after, .. } => CommentTarget::Commit(after.clone()),
        }
    }
}
