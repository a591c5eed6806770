//! Accessibility rule engine for a11yscan
//!
//! Three pieces, layered:
//! - `dom`: wraps raw template markup into a traversable document and picks
//!   the scan root (full document vs. body only)
//! - `config`: the rule-id overrides applied on top of engine defaults
//! - `engine` / `rules`: the validation seam and the builtin rule catalog
//!
//! Validation is a single suspend-until-settled operation returning either a
//! violation list or an engine failure, never both and never neither. For
//! identical markup, root, and configuration the output is identical.

pub mod config;
pub mod dom;
pub mod engine;
pub mod rules;

pub use config::{RuleConfig, RuleOverride};
pub use dom::{ScanRootKind, TemplateDom};
pub use engine::{EngineError, RuleEngine};
pub use rules::BuiltinEngine;
