//! Inline-style color contrast checks
//!
//! Checks the WCAG AA minimum of 4.5:1 for elements whose inline style sets
//! both a foreground and a background color. Colors inherited from
//! stylesheets are invisible to a template-level scan, which is why the
//! standard CI configuration keeps this rule disabled.

use scraper::Selector;

use super::Rule;
use crate::dom::{css_path, start_tag, TemplateDom};
use a11yscan_domain::{Impact, ViolationNode};

/// WCAG 2.x AA minimum for normal text
const MIN_CONTRAST_RATIO: f64 = 4.5;

/// Elements must meet the AA contrast minimum
pub(super) struct ColorContrast;

impl Rule for ColorContrast {
    fn id(&self) -> &'static str {
        "color-contrast"
    }

    fn impact(&self) -> Impact {
        Impact::Serious
    }

    fn description(&self) -> &'static str {
        "Elements must have sufficient color contrast"
    }

    fn help(&self) -> &'static str {
        "Keep foreground and background contrast at or above the WCAG AA 4.5:1 ratio"
    }

    fn affected_nodes(&self, dom: &TemplateDom) -> Vec<ViolationNode> {
        let styled = Selector::parse("[style]").expect("valid selector");

        dom.scan_root()
            .select(&styled)
            .filter_map(|element| {
                let style = element.value().attr("style")?;
                let fg = style_property(style, "color").and_then(|v| parse_color(&v))?;
                let bg = style_property(style, "background-color")
                    .or_else(|| style_property(style, "background"))
                    .and_then(|v| parse_color(&v))?;

                if contrast_ratio(fg, bg) < MIN_CONTRAST_RATIO {
                    Some(ViolationNode::new(css_path(element), start_tag(element)))
                } else {
                    None
                }
            })
            .collect()
    }
}

/// Last declaration of a property within an inline style, if any
fn style_property(style: &str, name: &str) -> Option<String> {
    style
        .split(';')
        .filter_map(|declaration| declaration.split_once(':'))
        .filter(|(key, _)| key.trim().eq_ignore_ascii_case(name))
        .map(|(_, value)| value.trim().to_string())
        .last()
}

/// Parse a CSS color value into (r, g, b)
fn parse_color(value: &str) -> Option<(u8, u8, u8)> {
    let value = value.trim().to_lowercase();
    if value.starts_with('#') {
        parse_hex_color(&value)
    } else if value.starts_with("rgb") {
        parse_rgb_color(&value)
    } else {
        parse_named_color(&value)
    }
}

/// Parse a #rgb or #rrggbb hex color
fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    // The byte-index slicing below is only safe on all-ASCII input
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            Some((r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        _ => None,
    }
}

/// Parse an rgb() or rgba() color, ignoring any alpha component
fn parse_rgb_color(value: &str) -> Option<(u8, u8, u8)> {
    let rest = value
        .strip_prefix("rgba")
        .or_else(|| value.strip_prefix("rgb"))?;
    let inner = rest.trim().strip_prefix('(')?.split(')').next()?;
    let mut channels = inner.split(',').map(str::trim);
    let r = channels.next()?.parse().ok()?;
    let g = channels.next()?.parse().ok()?;
    let b = channels.next()?.parse().ok()?;
    Some((r, g, b))
}

/// The base CSS named colors templates actually use
fn parse_named_color(name: &str) -> Option<(u8, u8, u8)> {
    match name {
        "white" => Some((255, 255, 255)),
        "black" => Some((0, 0, 0)),
        "red" => Some((255, 0, 0)),
        "green" => Some((0, 128, 0)),
        "blue" => Some((0, 0, 255)),
        "yellow" => Some((255, 255, 0)),
        "gray" | "grey" => Some((128, 128, 128)),
        "silver" => Some((192, 192, 192)),
        "maroon" => Some((128, 0, 0)),
        "olive" => Some((128, 128, 0)),
        "lime" => Some((0, 255, 0)),
        "aqua" | "cyan" => Some((0, 255, 255)),
        "teal" => Some((0, 128, 128)),
        "navy" => Some((0, 0, 128)),
        "fuchsia" | "magenta" => Some((255, 0, 255)),
        "purple" => Some((128, 0, 128)),
        "orange" => Some((255, 165, 0)),
        _ => None,
    }
}

/// Relative luminance per WCAG 2.x
/// <https://www.w3.org/TR/WCAG21/#dfn-relative-luminance>
fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    let channel = |c: u8| {
        let v = c as f64 / 255.0;
        if v <= 0.04045 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    };
    0.2126 * channel(r) + 0.7152 * channel(g) + 0.0722 * channel(b)
}

/// Contrast ratio between two colors, >= 1.0
fn contrast_ratio(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> f64 {
    let l1 = relative_luminance(fg.0, fg.1, fg.2);
    let l2 = relative_luminance(bg.0, bg.1, bg.2);
    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes_for(markup: &str) -> Vec<ViolationNode> {
        ColorContrast.affected_nodes(&TemplateDom::parse(markup))
    }

    #[test]
    fn test_parse_color_variants() {
        assert_eq!(parse_color("#fff"), Some((255, 255, 255)));
        assert_eq!(parse_color("#1a2b3c"), Some((26, 43, 60)));
        assert_eq!(parse_color("rgb(12, 34, 56)"), Some((12, 34, 56)));
        assert_eq!(parse_color("rgba(12, 34, 56, 0.5)"), Some((12, 34, 56)));
        assert_eq!(parse_color("White"), Some((255, 255, 255)));
        assert_eq!(parse_color("navy"), Some((0, 0, 128)));
        assert_eq!(parse_color("transparent"), None);
        assert_eq!(parse_color("#12345"), None);
    }

    #[test]
    fn test_multibyte_color_candidates_are_rejected() {
        // Both byte lengths match a hex arm while a char straddles the
        // slice boundaries
        assert_eq!(parse_color("#aé"), None);
        assert_eq!(parse_color("#féfff"), None);
    }

    #[test]
    fn test_multibyte_style_value_is_skipped() {
        let nodes = nodes_for("<span style=\"color: #aé; background-color: #fff\">x</span>");
        assert!(nodes.is_empty());
    }

    #[test]
    fn test_style_property_last_declaration_wins() {
        let style = "color: #000; padding: 1px; color: #fff";
        assert_eq!(style_property(style, "color"), Some("#fff".to_string()));
        assert_eq!(
            style_property(style, "background-color"),
            None,
            "color must not match background-color"
        );
    }

    #[test]
    fn test_contrast_ratio_extremes() {
        let ratio = contrast_ratio((0, 0, 0), (255, 255, 255));
        assert!((ratio - 21.0).abs() < 0.01, "black on white is 21:1, got {}", ratio);

        let ratio = contrast_ratio((255, 255, 255), (255, 255, 255));
        assert!((ratio - 1.0).abs() < 0.001, "white on white is 1:1, got {}", ratio);
    }

    #[test]
    fn test_contrast_ratio_aa_boundary() {
        // #767676 on white is the canonical AA-passing gray, #777 just fails
        assert!(contrast_ratio((0x76, 0x76, 0x76), (255, 255, 255)) >= MIN_CONTRAST_RATIO);
        assert!(contrast_ratio((0x77, 0x77, 0x77), (255, 255, 255)) < MIN_CONTRAST_RATIO);
    }

    #[test]
    fn test_low_contrast_inline_style_is_flagged() {
        let nodes =
            nodes_for("<span style=\"color: #fff; background-color: #fff\">ghost</span>");
        assert_eq!(nodes.len(), 1);
        assert_eq!(
            nodes[0].outer_html,
            "<span style=\"color: #fff; background-color: #fff\">"
        );
    }

    #[test]
    fn test_high_contrast_inline_style_passes() {
        assert!(nodes_for(
            "<span style=\"color: #000; background-color: #fff\">readable</span>"
        )
        .is_empty());
    }

    #[test]
    fn test_background_shorthand_is_considered() {
        let nodes = nodes_for("<span style=\"color: white; background: white\">ghost</span>");
        assert_eq!(nodes.len(), 1);
    }

    #[test]
    fn test_partial_color_information_is_skipped() {
        // Without both colors on the element the check cannot run
        assert!(nodes_for("<span style=\"color: #fff\">text</span>").is_empty());
        assert!(nodes_for("<span style=\"background-color: #fff\">text</span>").is_empty());
        assert!(nodes_for("<span style=\"font-size: 12px\">text</span>").is_empty());
    }
}
