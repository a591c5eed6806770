//! Scan pipeline orchestration
//!
//! Linear state machine with early exits: resolve range, fetch diff, filter
//! scope, validate each file at head, assemble, publish. The per-file loop is
//! strictly sequential; the first failure aborts the run before anything is
//! posted.

use std::sync::Arc;

use tracing::info;

use crate::error::ScanError;
use crate::report::render_report;
use a11yscan_domain::{
    ChangedFile, CommentTarget, CompareStatus, FileReport, RepoCoordinates, TriggerEvent,
};
use a11yscan_engine::{RuleConfig, RuleEngine, ScanRootKind};
use a11yscan_host::RepoHost;

/// Everything one run needs as input
#[derive(Debug, Clone)]
pub struct ScanContext {
    pub repo: RepoCoordinates,
    pub trigger: TriggerEvent,
    /// One configuration for every file in the run
    pub rules: RuleConfig,
}

impl ScanContext {
    pub fn new(repo: RepoCoordinates, trigger: TriggerEvent, rules: RuleConfig) -> Self {
        ScanContext {
            repo,
            trigger,
            rules,
        }
    }
}

/// How a successful run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The report was posted
    Published {
        target: CommentTarget,
        files_scanned: usize,
        violations: usize,
    },
    /// The diff contained no in-scope template changes; not an error
    NothingToValidate,
}

/// Scan pipeline orchestrator
pub struct ScanPipeline;

impl ScanPipeline {
    /// Execute one full scan run.
    ///
    /// Publishes exactly one comment on success with in-scope files, nothing
    /// on any failure. File order in the report matches the diff order.
    pub async fn run(
        host: Arc<dyn RepoHost>,
        engine: Arc<dyn RuleEngine>,
        ctx: &ScanContext,
    ) -> Result<ScanOutcome, ScanError> {
        let range = ctx.trigger.revision_range();
        info!(
            repo = %ctx.repo,
            trigger = ctx.trigger.kind(),
            range = %range,
            "starting accessibility scan"
        );

        let comparison = host
            .compare(&ctx.repo, &range)
            .await
            .map_err(ScanError::Compare)?;
        if comparison.status != CompareStatus::Ahead {
            return Err(ScanError::NonForwardRange {
                status: comparison.status,
            });
        }

        let in_scope: Vec<ChangedFile> = comparison
            .files
            .into_iter()
            .filter(ChangedFile::in_scope)
            .collect();
        if in_scope.is_empty() {
            info!("no template changes in range, nothing to validate");
            return Ok(ScanOutcome::NothingToValidate);
        }

        info!(
            files = in_scope.len(),
            engine = engine.name(),
            "validating changed templates"
        );

        let mut reports = Vec::with_capacity(in_scope.len());
        for file in in_scope {
            // Changed files are judged by their new state, so content comes
            // from head
            let markup = host
                .file_content(&ctx.repo, &file.path, &range.head)
                .await
                .map_err(|source| ScanError::FileContent {
                    path: file.path.clone(),
                    source,
                })?;

            let root = ScanRootKind::for_markup(&markup);
            let violations = engine
                .validate(&markup, root, &ctx.rules)
                .await
                .map_err(|source| ScanError::Validation {
                    path: file.path.clone(),
                    source,
                })?;

            info!(
                path = %file.path,
                root = %root,
                violations = violations.len(),
                "validated template"
            );
            reports.push(FileReport::new(file, violations));
        }

        let body = render_report(&reports);
        let target = ctx.trigger.comment_target();
        let violations: usize = reports.iter().map(|report| report.violations.len()).sum();

        host.publish_comment(&ctx.repo, &target, &body)
            .await
            .map_err(ScanError::Publish)?;

        info!(
            %target,
            files = reports.len(),
            violations,
            "published accessibility report"
        );

        Ok(ScanOutcome::Published {
            target,
            files_scanned: reports.len(),
            violations,
        })
    }
}
