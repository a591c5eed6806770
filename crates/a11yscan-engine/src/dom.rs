//! Template DOM building and scan-root selection
//!
//! Parsing is permissive: malformed markup produces a best-effort tree, never
//! an error. Root selection is a pure function of the raw text, so the same
//! markup always validates against the same subtree.

use scraper::{ElementRef, Html, Selector};

/// Which subtree validation runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanRootKind {
    /// The whole parsed document, html element included
    Document,
    /// The body-equivalent root only
    Body,
}

impl ScanRootKind {
    /// Pick the root for a piece of raw markup.
    ///
    /// Full-document scans require the literal closing tag `</html>`; exact
    /// substring match, no case folding. Everything else is treated as a
    /// fragment and scanned body-only.
    pub fn for_markup(markup: &str) -> Self {
        if markup.contains("</html>") {
            ScanRootKind::Document
        } else {
            ScanRootKind::Body
        }
    }
}

impl std::fmt::Display for ScanRootKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanRootKind::Document => write!(f, "document"),
            ScanRootKind::Body => write!(f, "body"),
        }
    }
}

/// A parsed template with its chosen scan root
pub struct TemplateDom {
    document: Html,
    root: ScanRootKind,
}

impl TemplateDom {
    /// Parse markup and derive the scan root from the text itself
    pub fn parse(markup: &str) -> Self {
        Self::with_root(markup, ScanRootKind::for_markup(markup))
    }

    /// Parse markup with an explicit scan root
    pub fn with_root(markup: &str, root: ScanRootKind) -> Self {
        TemplateDom {
            document: Html::parse_document(markup),
            root,
        }
    }

    pub fn root_kind(&self) -> ScanRootKind {
        self.root
    }

    pub fn document(&self) -> &Html {
        &self.document
    }

    /// The element rules traverse.
    ///
    /// Fragment input still yields a usable root: the parser synthesizes a
    /// body element, and if even that is missing the document root stands in.
    pub fn scan_root(&self) -> ElementRef<'_> {
        match self.root {
            ScanRootKind::Document => self.document.root_element(),
            ScanRootKind::Body => {
                let body = Selector::parse("body").expect("valid selector");
                self.document
                    .select(&body)
                    .next()
                    .unwrap_or_else(|| self.document.root_element())
            }
        }
    }
}

/// Build a CSS selector path from the document root down to the element.
///
/// Positions are disambiguated with `:nth-child` only when the element shares
/// its tag name with a sibling, keeping paths short but still unique.
pub(crate) fn css_path(element: ElementRef<'_>) -> String {
    let mut segments: Vec<String> = Vec::new();
    let mut node = *element;

    loop {
        let el = match ElementRef::wrap(node) {
            Some(el) => el,
            None => break,
        };
        let name = el.value().name().to_string();

        let segment = match node.parent().and_then(ElementRef::wrap) {
            Some(parent) => {
                let siblings: Vec<_> = parent
                    .children()
                    .filter(|child| child.value().is_element())
                    .collect();
                let same_name = siblings
                    .iter()
                    .filter(|child| {
                        ElementRef::wrap(**child)
                            .map(|e| e.value().name() == name)
                            .unwrap_or(false)
                    })
                    .count();
                if same_name > 1 {
                    let position = siblings
                        .iter()
                        .position(|child| child.id() == node.id())
                        .map(|idx| idx + 1)
                        .unwrap_or(1);
                    format!("{}:nth-child({})", name, position)
                } else {
                    name
                }
            }
            None => name,
        };
        segments.push(segment);

        match node.parent() {
            Some(parent) => node = parent,
            None => break,
        }
    }

    segments.reverse();
    segments.join(" > ")
}

/// Reconstruct an element's start tag from its name and attributes.
///
/// Used where full outer markup would drag entire subtrees into the report.
pub(crate) fn start_tag(element: ElementRef<'_>) -> String {
    let el = element.value();
    let mut tag = format!("<{}", el.name());
    for (key, value) in el.attrs() {
        tag.push_str(&format!(" {}=\"{}\"", key, value));
    }
    tag.push('>');
    tag
}
