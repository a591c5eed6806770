//! The validation seam the pipeline consumes

use async_trait::async_trait;
use thiserror::Error;

use crate::config::RuleConfig;
use crate::dom::ScanRootKind;
use a11yscan_domain::Violation;

/// Errors that can occur inside a rule engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// The engine itself failed; this is not a clean "zero violations" pass
    #[error("Rule engine failure: {message}")]
    Internal { message: String },
}

/// An accessibility rule engine.
///
/// One call is one logical unit of asynchronous work: it settles exactly once
/// with either a violation list or a failure. The configuration is applied
/// per call, never cached across calls. For identical markup, root, and
/// configuration the violation list is identical, ordering included.
///
/// The seam takes raw markup rather than a parsed handle; implementations
/// parse internally, which keeps calls `Send` across await points.
#[async_trait]
pub trait RuleEngine: Send + Sync {
    /// Run every enabled rule against the markup under the given scan root.
    async fn validate(
        &self,
        markup: &str,
        root: ScanRootKind,
        config: &RuleConfig,
    ) -> Result<Vec<Violation>, EngineError>;

    /// Engine name for logs
    fn name(&self) -> &str;
}
