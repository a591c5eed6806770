//! a11yscan domain model
//!
//! Pure data types for the diff-to-report pipeline:
//! - TriggerEvent: the pull-request or push event that started the run
//! - RevisionRange: the (base, head) comparison window
//! - ChangedFile: one file's change record, with the template scope filter
//! - Violation / FileReport: normalized accessibility findings per file
//!
//! No I/O lives here. Everything is serializable and immutable once built.

pub mod change;
pub mod error;
pub mod event;
pub mod violation;

pub use change::{
    ChangeKind, ChangedFile, CompareStatus, Comparison, RevisionRange, TEMPLATE_SUFFIX,
};
pub use error::TriggerError;
pub use event::{CommentTarget, RepoCoordinates, TriggerEvent};
pub use violation::{FileReport, Impact, Violation, ViolationNode};

/// a11yscan domain version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
