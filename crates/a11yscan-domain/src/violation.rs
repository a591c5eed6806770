//! Normalized accessibility findings
//!
//! The rule engine produces violations in a fixed order; nothing downstream
//! may reorder them. A file with zero violations is a distinct, successful
//! outcome, not an absent one.

use crate::change::ChangedFile;
use serde::{Deserialize, Serialize};

/// Severity of a violation, as reported by the rule engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Minor,
    Moderate,
    Serious,
    Critical,
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Impact::Minor => "minor",
            Impact::Moderate => "moderate",
            Impact::Serious => "serious",
            Impact::Critical => "critical",
        };
        write!(f, "{}", label)
    }
}

/// One DOM node affected by a violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationNode {
    /// CSS selector path locating the node in its document
    pub selector: String,
    /// The node's outer markup as parsed
    pub outer_html: String,
}

impl ViolationNode {
    pub fn new(selector: impl Into<String>, outer_html: impl Into<String>) -> Self {
        ViolationNode {
            selector: selector.into(),
            outer_html: outer_html.into(),
        }
    }
}

/// One accessibility rule failure with its affected nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub rule_id: String,
    /// Engines may omit impact for some findings
    pub impact: Option<Impact>,
    pub description: String,
    pub help: String,
    pub help_url: String,
    /// Affected nodes in document order
    pub nodes: Vec<ViolationNode>,
}

/// All violations found in one in-scope file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    pub file: ChangedFile,
    /// Engine order, preserved
    pub violations: Vec<Violation>,
}

impl FileReport {
    pub fn new(file: ChangedFile, violations: Vec<Violation>) -> Self {
        FileReport { file, violations }
    }

    /// True when validation found nothing to report
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}
