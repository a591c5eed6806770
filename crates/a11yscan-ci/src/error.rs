//! Error types for the scan pipeline
//!
//! Every failure here is terminal for the run; the computed report (if any)
//! is discarded rather than partially published.

use thiserror::Error;

use a11yscan_domain::CompareStatus;
use a11yscan_engine::EngineError;
use a11yscan_host::HostError;

#[derive(Error, Debug)]
pub enum ScanError {
    /// The revision comparison request itself failed
    #[error("Revision comparison failed")]
    Compare(#[source] HostError),

    /// The comparison succeeded but head is not strictly ahead of base
    #[error("Head is not strictly ahead of base (status: {status}); nothing to validate")]
    NonForwardRange { status: CompareStatus },

    /// One file's content could not be fetched; the whole run aborts
    #[error("Could not fetch content of {path}")]
    FileContent {
        path: String,
        #[source]
        source: HostError,
    },

    /// One file's validation failed; the whole run aborts
    #[error("Validation failed for {path}")]
    Validation {
        path: String,
        #[source]
        source: EngineError,
    },

    /// The assembled report could not be posted
    #[error("Could not publish the report comment")]
    Publish(#[source] HostError),
}
