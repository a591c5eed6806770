//! Source-host capability for a11yscan
//!
//! Defines the narrow contract the pipeline consumes:
//! - `compare`: how do two revisions relate, and which files changed
//! - `file_content`: one file's text at a revision
//! - `publish_comment`: attach the report to a pull request or commit
//!
//! The trait is async and host-agnostic. `GitHubHost` is the production
//! implementation; an in-memory fake is provided for testing via the
//! `fakes` module.

pub mod error;
pub mod fakes;
pub mod github;
mod traits;

pub use error::{HostError, HostResult};
pub use github::GitHubHost;
pub use traits::RepoHost;
