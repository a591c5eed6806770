//! Revision ranges and changed-file records
//!
//! These mirror what the revision-comparison capability returns. The pipeline
//! treats them as read-only input; the only decision logic here is the scope
//! filter that picks which changed files get validated.

use serde::{Deserialize, Serialize};

/// Path suffix marking a file as a template in scope for validation
pub const TEMPLATE_SUFFIX: &str = ".tpl";

/// The (base, head) pair defining a comparison window
///
/// Both fields are non-empty by the time a range reaches the pipeline;
/// trigger resolution rejects events with missing revisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionRange {
    pub base: String,
    pub head: String,
}

impl RevisionRange {
    pub fn new(base: impl Into<String>, head: impl Into<String>) -> Self {
        RevisionRange {
            base: base.into(),
            head: head.into(),
        }
    }
}

impl std::fmt::Display for RevisionRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}...{}", self.base, self.head)
    }
}

/// How head relates to base according to the comparison capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareStatus {
    Ahead,
    Behind,
    Identical,
    Diverged,
}

impl std::fmt::Display for CompareStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            CompareStatus::Ahead => "ahead",
            CompareStatus::Behind => "behind",
            CompareStatus::Identical => "identical",
            CompareStatus::Diverged => "diverged",
        };
        write!(f, "{}", label)
    }
}

/// What happened to a file within the comparison window
///
/// Hosts report statuses beyond the modeled set (copied, unchanged); those
/// land on `Other` and are never in scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Modified,
    Removed,
    Renamed,
    #[serde(other)]
    Other,
}

/// One file's change record within a revision range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedFile {
    pub path: String,
    pub change_kind: ChangeKind,
    /// Platform URL where this file's change can be viewed
    pub view_url: String,
}

impl ChangedFile {
    pub fn new(
        path: impl Into<String>,
        change_kind: ChangeKind,
        view_url: impl Into<String>,
    ) -> Self {
        ChangedFile {
            path: path.into(),
            change_kind,
            view_url: view_url.into(),
        }
    }

    /// Whether this file gets validated.
    ///
    /// True iff the change kind is added, modified, or renamed AND the path
    /// carries the template suffix. Removed files are never in scope since
    /// their content no longer exists at head.
    pub fn in_scope(&self) -> bool {
        matches!(
            self.change_kind,
            ChangeKind::Added | ChangeKind::Modified | ChangeKind::Renamed
        ) && self.path.ends_with(TEMPLATE_SUFFIX)
    }
}

/// Result of comparing two revisions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    pub status: CompareStatus,
    /// Changed files in the order the capability reported them
    pub files: Vec<ChangedFile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_filter_by_change_kind() {
        let kinds = [
            (ChangeKind::Added, true),
            (ChangeKind::Modified, true),
            (ChangeKind::Renamed, true),
            (ChangeKind::Removed, false),
            (ChangeKind::Other, false),
        ];

        for (kind, expected) in kinds {
            let file = ChangedFile::new("templates/card.tpl", kind, "https://example/view");
            assert_eq!(
                file.in_scope(),
                expected,
                "{:?} template should have in_scope == {}",
                kind,
                expected
            );
        }
    }

    #[test]
    fn test_scope_filter_by_suffix() {
        let cases = [
            ("templates/card.tpl", true),
            ("page.tpl", true),
            ("readme.md", false),
            ("templates/card.tpl.bak", false),
            ("tpl", false),
            ("src/main.rs", false),
        ];

        for (path, expected) in cases {
            let file = ChangedFile::new(path, ChangeKind::Modified, "https://example/view");
            assert_eq!(
                file.in_scope(),
                expected,
                "{:?} should have in_scope == {}",
                path,
                expected
            );
        }
    }

    #[test]
    fn test_removed_template_never_in_scope() {
        let file = ChangedFile::new("page.tpl", ChangeKind::Removed, "https://example/view");
        assert!(!file.in_scope());
    }

    #[test]
    fn test_change_kind_wire_format() {
        let kind: ChangeKind = serde_json::from_str("\"modified\"").expect("should deserialize");
        assert_eq!(kind, ChangeKind::Modified);

        // Statuses outside the contract fall through to Other
        let kind: ChangeKind = serde_json::from_str("\"copied\"").expect("should deserialize");
        assert_eq!(kind, ChangeKind::Other);
    }

    #[test]
    fn test_compare_status_wire_format() {
        let status: CompareStatus = serde_json::from_str("\"ahead\"").expect("should deserialize");
        assert_eq!(status, CompareStatus::Ahead);
        assert_eq!(status.to_string(), "ahead");
    }

    #[test]
    fn test_revision_range_display() {
        let range = RevisionRange::new("aaa", "bbb");
        assert_eq!(range.to_string(), "aaa...bbb");
    }
}
