//! Document-level rules: page language, title, landmark containment
//!
//! All three only make sense for full-document scans; the engine skips them
//! when the scan root is body-only.

use scraper::{ElementRef, Selector};

use super::Rule;
use crate::dom::{css_path, start_tag, TemplateDom};
use a11yscan_domain::{Impact, ViolationNode};

/// Elements that establish a landmark region by tag name
const LANDMARK_TAGS: &[&str] = &["header", "nav", "main", "footer", "aside"];

/// Roles that establish a landmark region
const LANDMARK_ROLES: &[&str] = &[
    "banner",
    "navigation",
    "main",
    "contentinfo",
    "complementary",
    "search",
    "form",
    "region",
];

/// Tags that never hold visible content
const NON_CONTENT_TAGS: &[&str] = &["script", "style", "template", "noscript", "link", "meta"];

/// The html element must declare the page language
pub(super) struct HtmlHasLang;

impl Rule for HtmlHasLang {
    fn id(&self) -> &'static str {
        "html-has-lang"
    }

    fn impact(&self) -> Impact {
        Impact::Serious
    }

    fn description(&self) -> &'static str {
        "The html element must have a lang attribute"
    }

    fn help(&self) -> &'static str {
        "Add a lang attribute identifying the page language, e.g. lang=\"en\""
    }

    fn document_only(&self) -> bool {
        true
    }

    fn affected_nodes(&self, dom: &TemplateDom) -> Vec<ViolationNode> {
        let html = dom.document().root_element();
        let lang_missing = html
            .value()
            .attr("lang")
            .map(|lang| lang.trim().is_empty())
            .unwrap_or(true);

        if lang_missing {
            vec![ViolationNode::new("html", start_tag(html))]
        } else {
            vec![]
        }
    }
}

/// Documents need a non-empty title
pub(super) struct DocumentTitle;

impl Rule for DocumentTitle {
    fn id(&self) -> &'static str {
        "document-title"
    }

    fn impact(&self) -> Impact {
        Impact::Serious
    }

    fn description(&self) -> &'static str {
        "Documents must have a title element"
    }

    fn help(&self) -> &'static str {
        "Add a non-empty title element inside head"
    }

    fn document_only(&self) -> bool {
        true
    }

    fn affected_nodes(&self, dom: &TemplateDom) -> Vec<ViolationNode> {
        let title = Selector::parse("title").expect("valid selector");
        let has_title = dom
            .document()
            .select(&title)
            .any(|t| !t.text().collect::<String>().trim().is_empty());

        if has_title {
            vec![]
        } else {
            // The missing element has no node of its own; report the document
            vec![ViolationNode::new(
                "html",
                start_tag(dom.document().root_element()),
            )]
        }
    }
}

/// Top-level page content should live inside landmark regions
pub(super) struct Region;

impl Region {
    fn is_landmark(element: ElementRef<'_>) -> bool {
        let el = element.value();
        LANDMARK_TAGS.contains(&el.name())
            || el
                .attr("role")
                .map(|role| LANDMARK_ROLES.contains(&role))
                .unwrap_or(false)
    }
}

impl Rule for Region {
    fn id(&self) -> &'static str {
        "region"
    }

    fn impact(&self) -> Impact {
        Impact::Moderate
    }

    fn description(&self) -> &'static str {
        "All page content must be contained by landmarks"
    }

    fn help(&self) -> &'static str {
        "Wrap top-level content in landmark elements such as main, nav, or header"
    }

    fn document_only(&self) -> bool {
        true
    }

    fn affected_nodes(&self, dom: &TemplateDom) -> Vec<ViolationNode> {
        let body = Selector::parse("body").expect("valid selector");
        let body = match dom.document().select(&body).next() {
            Some(body) => body,
            None => return vec![],
        };

        body.children()
            .filter_map(ElementRef::wrap)
            .filter(|element| {
                let name = element.value().name();
                if NON_CONTENT_TAGS.contains(&name) || Self::is_landmark(*element) {
                    return false;
                }
                // Only flag children that actually hold visible text
                !element.text().collect::<String>().trim().is_empty()
            })
            .map(|element| ViolationNode::new(css_path(element), start_tag(element)))
            .collect()
    }
}
