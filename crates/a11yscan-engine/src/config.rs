//! Rule configuration
//!
//! A static set of {rule id -> enabled} overrides layered onto the engine's
//! defaults. Built once per run, passed by reference into every validation
//! call, and never mutated in between, so every file in one run is judged by
//! the same rules.

use serde::{Deserialize, Serialize};

/// One override applied on top of a rule's default
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOverride {
    pub id: String,
    pub enabled: bool,
}

/// Ordered rule overrides; later entries win
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    overrides: Vec<RuleOverride>,
}

impl RuleConfig {
    /// No overrides: every rule keeps its default
    pub fn new() -> Self {
        Self::default()
    }

    /// The fixed configuration this checker runs with in CI.
    ///
    /// Contrast needs computed styles and landmark analysis needs full-page
    /// context; both misfire on isolated templates, so they are off.
    pub fn standard() -> Self {
        Self::new().disable("color-contrast").disable("region")
    }

    pub fn disable(mut self, id: impl Into<String>) -> Self {
        self.overrides.push(RuleOverride {
            id: id.into(),
            enabled: false,
        });
        self
    }

    pub fn enable(mut self, id: impl Into<String>) -> Self {
        self.overrides.push(RuleOverride {
            id: id.into(),
            enabled: true,
        });
        self
    }

    /// Resolve one rule: the last override for the id wins, otherwise the
    /// rule's own default applies.
    pub fn is_enabled(&self, id: &str, default: bool) -> bool {
        self.overrides
            .iter()
            .rev()
            .find(|o| o.id == id)
            .map(|o| o.enabled)
            .unwrap_or(default)
    }

    pub fn overrides(&self) -> &[RuleOverride] {
        &self.overrides
    }
}
