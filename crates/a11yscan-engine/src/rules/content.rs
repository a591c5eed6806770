//! Element-level content rules: images, links, form controls

use scraper::{ElementRef, Selector};

use super::Rule;
use crate::dom::{css_path, TemplateDom};
use a11yscan_domain::{Impact, ViolationNode};

/// Input types that carry their own labelling or are invisible
const EXEMPT_INPUT_TYPES: &[&str] = &["hidden", "submit", "reset", "button", "image"];

fn attr_non_empty(element: ElementRef<'_>, name: &str) -> bool {
    element
        .value()
        .attr(name)
        .map(|v| !v.trim().is_empty())
        .unwrap_or(false)
}

/// Every img needs alternate text or an explicit decorative role
pub(super) struct ImageAlt;

impl Rule for ImageAlt {
    fn id(&self) -> &'static str {
        "image-alt"
    }

    fn impact(&self) -> Impact {
        Impact::Critical
    }

    fn description(&self) -> &'static str {
        "Images must have alternate text"
    }

    fn help(&self) -> &'static str {
        "Add an alt attribute, an aria-label, or role=\"presentation\" for decorative images"
    }

    fn affected_nodes(&self, dom: &TemplateDom) -> Vec<ViolationNode> {
        let img = Selector::parse("img").expect("valid selector");
        dom.scan_root()
            .select(&img)
            .filter(|element| {
                // An empty alt marks a decorative image and passes
                let labelled = element.value().attr("alt").is_some()
                    || attr_non_empty(*element, "aria-label")
                    || attr_non_empty(*element, "aria-labelledby")
                    || matches!(
                        element.value().attr("role"),
                        Some("presentation") | Some("none")
                    );
                !labelled
            })
            .map(|element| ViolationNode::new(css_path(element), element.html()))
            .collect()
    }
}

/// Links need discernible text for screen readers
pub(super) struct LinkName;

impl Rule for LinkName {
    fn id(&self) -> &'static str {
        "link-name"
    }

    fn impact(&self) -> Impact {
        Impact::Serious
    }

    fn description(&self) -> &'static str {
        "Links must have discernible text"
    }

    fn help(&self) -> &'static str {
        "Give the link text content, an aria-label, or an image with alt text"
    }

    fn affected_nodes(&self, dom: &TemplateDom) -> Vec<ViolationNode> {
        let link = Selector::parse("a[href]").expect("valid selector");
        let img = Selector::parse("img").expect("valid selector");

        dom.scan_root()
            .select(&link)
            .filter(|element| {
                let has_text = !element.text().collect::<String>().trim().is_empty();
                let has_labelled_image = element
                    .select(&img)
                    .any(|i| attr_non_empty(i, "alt"));
                let named = has_text
                    || has_labelled_image
                    || attr_non_empty(*element, "aria-label")
                    || attr_non_empty(*element, "aria-labelledby")
                    || attr_non_empty(*element, "title");
                !named
            })
            .map(|element| ViolationNode::new(css_path(element), element.html()))
            .collect()
    }
}

/// Form controls need an associated label
pub(super) struct Label;

impl Rule for Label {
    fn id(&self) -> &'static str {
        "label"
    }

    fn impact(&self) -> Impact {
        Impact::Critical
    }

    fn description(&self) -> &'static str {
        "Form elements must have labels"
    }

    fn help(&self) -> &'static str {
        "Associate a label element, aria-label, or aria-labelledby with the control"
    }

    fn affected_nodes(&self, dom: &TemplateDom) -> Vec<ViolationNode> {
        let controls = Selector::parse("input, select, textarea").expect("valid selector");
        let labels = Selector::parse("label").expect("valid selector");

        // label[for] targets are collected document-wide so a label outside
        // the scan root still counts
        let label_fors: Vec<&str> = dom
            .document()
            .select(&labels)
            .filter_map(|l| l.value().attr("for"))
            .collect();

        dom.scan_root()
            .select(&controls)
            .filter(|element| {
                if element.value().name() == "input" {
                    let input_type = element.value().attr("type").unwrap_or("text");
                    if EXEMPT_INPUT_TYPES.contains(&input_type) {
                        return false;
                    }
                }

                let has_for_label = element
                    .value()
                    .attr("id")
                    .map(|id| label_fors.contains(&id))
                    .unwrap_or(false);
                let wrapped_in_label = element.ancestors().any(|node| {
                    node.value()
                        .as_element()
                        .map(|el| el.name() == "label")
                        .unwrap_or(false)
                });
                let labelled = has_for_label
                    || wrapped_in_label
                    || attr_non_empty(*element, "aria-label")
                    || attr_non_empty(*element, "aria-labelledby")
                    || attr_non_empty(*element, "title");
                !labelled
            })
            .map(|element| ViolationNode::new(css_path(element), element.html()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes_for(rule: &dyn Rule, markup: &str) -> Vec<ViolationNode> {
        rule.affected_nodes(&TemplateDom::parse(markup))
    }

    #[test]
    fn test_image_alt_flags_bare_img() {
        let nodes = nodes_for(&ImageAlt, "<div><img></div>");
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].outer_html, "<img>");
    }

    #[test]
    fn test_image_alt_accepts_alternatives() {
        for markup in [
            "<img alt=\"a cat\">",
            "<img alt=\"\">",
            "<img aria-label=\"a cat\">",
            "<img aria-labelledby=\"caption\">",
            "<img role=\"presentation\">",
            "<img role=\"none\">",
        ] {
            assert!(
                nodes_for(&ImageAlt, markup).is_empty(),
                "{:?} should pass",
                markup
            );
        }
    }

    #[test]
    fn test_link_name_flags_empty_link() {
        let nodes = nodes_for(&LinkName, "<a href=\"/\"></a>");
        assert_eq!(nodes.len(), 1);
    }

    #[test]
    fn test_link_name_accepts_named_links() {
        for markup in [
            "<a href=\"/\">home</a>",
            "<a href=\"/\"> <span>home</span> </a>",
            "<a href=\"/\" aria-label=\"home\"></a>",
            "<a href=\"/\" title=\"home\"></a>",
            "<a href=\"/\"><img alt=\"home\"></a>",
        ] {
            assert!(
                nodes_for(&LinkName, markup).is_empty(),
                "{:?} should pass",
                markup
            );
        }
    }

    #[test]
    fn test_link_name_ignores_anchors_without_href() {
        assert!(nodes_for(&LinkName, "<a name=\"top\"></a>").is_empty());
    }

    #[test]
    fn test_link_with_unlabelled_image_is_flagged() {
        let nodes = nodes_for(&LinkName, "<a href=\"/\"><img></a>");
        assert_eq!(nodes.len(), 1);
    }

    #[test]
    fn test_label_flags_bare_input() {
        let nodes = nodes_for(&Label, "<form><input type=\"text\"></form>");
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].outer_html, "<input type=\"text\">");
    }

    #[test]
    fn test_label_accepts_labelled_controls() {
        for markup in [
            "<label for=\"name\">Name</label><input id=\"name\" type=\"text\">",
            "<label>Name <input type=\"text\"></label>",
            "<input type=\"text\" aria-label=\"Name\">",
            "<input type=\"text\" aria-labelledby=\"name-heading\">",
            "<input type=\"text\" title=\"Name\">",
            "<label for=\"pet\">Pet</label><select id=\"pet\"></select>",
            "<textarea aria-label=\"Notes\"></textarea>",
        ] {
            assert!(
                nodes_for(&Label, markup).is_empty(),
                "{:?} should pass",
                markup
            );
        }
    }

    #[test]
    fn test_label_exempts_non_visible_input_types() {
        for input_type in EXEMPT_INPUT_TYPES {
            let markup = format!("<input type=\"{}\">", input_type);
            assert!(
                nodes_for(&Label, &markup).is_empty(),
                "type {:?} should be exempt",
                input_type
            );
        }
    }

    #[test]
    fn test_label_flags_unlabelled_select_and_textarea() {
        assert_eq!(nodes_for(&Label, "<select></select>").len(), 1);
        assert_eq!(nodes_for(&Label, "<textarea></textarea>").len(), 1);
    }

    #[test]
    fn test_label_placeholder_alone_is_not_enough() {
        let nodes = nodes_for(&Label, "<input type=\"text\" placeholder=\"Name\">");
        assert_eq!(nodes.len(), 1);
    }
}
