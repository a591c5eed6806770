//! Builtin rule catalog
//!
//! Rules are checked in a fixed catalog order and each rule visits elements
//! in document order, which together make validation deterministic. A rule
//! with no affected nodes contributes no violation.

mod content;
mod contrast;
mod page;

use async_trait::async_trait;

use crate::config::RuleConfig;
use crate::dom::{ScanRootKind, TemplateDom};
use crate::engine::{EngineError, RuleEngine};
use a11yscan_domain::{Impact, Violation, ViolationNode};

/// One accessibility rule
trait Rule: Send + Sync {
    fn id(&self) -> &'static str;
    fn impact(&self) -> Impact;
    fn description(&self) -> &'static str;
    fn help(&self) -> &'static str;

    fn default_enabled(&self) -> bool {
        true
    }

    /// Document-level rules are skipped for body-only scans
    fn document_only(&self) -> bool {
        false
    }

    /// Elements violating this rule, in document order
    fn affected_nodes(&self, dom: &TemplateDom) -> Vec<ViolationNode>;
}

fn help_url(id: &str) -> String {
    format!("https://docs.stevedores.org/a11yscan/rules/{}", id)
}

/// The builtin engine with its fixed rule catalog
pub struct BuiltinEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl BuiltinEngine {
    pub fn new() -> Self {
        BuiltinEngine {
            rules: vec![
                Box::new(content::ImageAlt),
                Box::new(page::HtmlHasLang),
                Box::new(page::DocumentTitle),
                Box::new(content::LinkName),
                Box::new(content::Label),
                Box::new(contrast::ColorContrast),
                Box::new(page::Region),
            ],
        }
    }

    /// Catalog rule ids, in check order
    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.id()).collect()
    }
}

impl Default for BuiltinEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RuleEngine for BuiltinEngine {
    async fn validate(
        &self,
        markup: &str,
        root: ScanRootKind,
        config: &RuleConfig,
    ) -> Result<Vec<Violation>, EngineError> {
        let dom = TemplateDom::with_root(markup, root);
        let mut violations = Vec::new();

        for rule in &self.rules {
            if rule.document_only() && root != ScanRootKind::Document {
                continue;
            }
            if !config.is_enabled(rule.id(), rule.default_enabled()) {
                continue;
            }

            let nodes = rule.affected_nodes(&dom);
            if nodes.is_empty() {
                continue;
            }

            violations.push(Violation {
                rule_id: rule.id().to_string(),
                impact: Some(rule.impact()),
                description: rule.description().to_string(),
                help: rule.help().to_string(),
                help_url: help_url(rule.id()),
                nodes,
            });
        }

        Ok(violations)
    }

    fn name(&self) -> &str {
        "builtin"
    }
}
