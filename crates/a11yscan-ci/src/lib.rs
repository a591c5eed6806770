//! a11yscan diff-to-report pipeline
//!
//! Drives the end-to-end flow for one run: resolve the revision range from
//! the trigger, fetch the diff, filter template files into scope, validate
//! each one at head, assemble the markdown report, and publish it as a
//! comment. Strictly sequential, no retries, no partial publication: either
//! the whole report goes out or nothing does.

pub mod error;
pub mod pipeline;
pub mod report;

pub use error::ScanError;
pub use pipeline::{ScanContext, ScanOutcome, ScanPipeline};
pub use report::{render_report, NO_VIOLATIONS_MARKER, REPORT_TITLE};
