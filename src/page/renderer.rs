// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Report rendering
//!
//! Every server-supplied string enters the page as a text node.

use super::surface::UiSurface;
use crate::dom::Element;
use crate::network::AnalysisResults;

const PLACEHOLDER_CLASS: &str = "placeholder";
const PLACEHOLDER_STYLE: &str = "color: #fff; border-left-color: #aaa";

/// Remove the first occurrence of `marker` and surrounding whitespace
pub fn strip_marker(message: &str, marker: &str) -> String {
    if marker.is_empty() {
        return message.trim().to_string();
    }
    message.replacen(marker, "", 1).trim().to_string()
}

/// Draws an [`AnalysisResults`] into the report region
#[derive(Debug, Clone)]
pub struct ResultRenderer {
    surface: UiSurface,
    vulnerability_marker: String,
    safe_marker: String,
    placeholder_text: String,
    status_complete: String,
}

impl ResultRenderer {
    pub fn new(
        surface: UiSurface,
        vulnerability_marker: impl Into<String>,
        safe_marker: impl Into<String>,
        placeholder_text: impl Into<String>,
        status_complete: impl Into<String>,
    ) -> Self {
        Self {
            surface,
            vulnerability_marker: vulnerability_marker.into(),
            safe_marker: safe_marker.into(),
            placeholder_text: placeholder_text.into(),
            status_complete: status_complete.into(),
        }
    }

    /// Replace the report with `results`
    ///
    /// Idempotent: rendering the same results twice leaves the same lists.
    /// The flagged-findings panel is revealed in both branches, so the
    /// placeholder is never written into a hidden panel.
    pub fn render(&self, results: &AnalysisResults) {
        let vulnerability_list = self.surface.vulnerability_list();
        let safe_list = self.surface.safe_list();
        vulnerability_list.clear_children();
        safe_list.clear_children();

        if results.vulnerabilities.is_empty() {
            let item = self.append_item(vulnerability_list, &self.placeholder_text);
            item.add_class(PLACEHOLDER_CLASS);
            item.set_attribute("style", PLACEHOLDER_STYLE);
        } else {
            for message in &results.vulnerabilities {
                self.append_item(
                    vulnerability_list,
                    &strip_marker(message, &self.vulnerability_marker),
                );
            }
        }
        self.surface.set_vulnerability_panel_visible(true);

        for message in &results.safe {
            self.append_item(safe_list, &strip_marker(message, &self.safe_marker));
        }

        self.surface.show_results();
        self.surface.set_status(&self.status_complete);

        tracing::debug!(
            vulnerabilities = results.vulnerabilities.len(),
            safe = results.safe.len(),
            "report rendered"
        );
    }

    fn append_item(&self, list: &Element, text: &str) -> Element {
        let document = self.surface.document();
        let item = document.create_element("li");
        item.append_child(&document.create_text_node(text));
        list.append_child(&item);
        item
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::config::{SessionTexts, SurfaceIds};

    fn renderer() -> (ResultRenderer, UiSurface) {
        let surface = UiSurface::from_template(&SurfaceIds::default()).unwrap();
        let texts = SessionTexts::default();
        let renderer = ResultRenderer::new(
            surface.clone(),
            "⚠️",
            "✅",
            texts.no_vulnerabilities,
            texts.status_complete,
        );
        (renderer, surface)
    }

    #[test]
    fn test_strip_marker() {
        assert_eq!(strip_marker("⚠️ SQL injection risk", "⚠️"), "SQL injection risk");
        assert_eq!(strip_marker("  ✅ no eval  ", "✅"), "no eval");
        assert_eq!(strip_marker("plain", "⚠️"), "plain");
        assert_eq!(strip_marker("⚠️ a ⚠️ b", "⚠️"), "a ⚠️ b");
        assert_eq!(strip_marker(" x ", ""), "x");
    }

    #[test]
    fn test_render_findings() {
        let (renderer, surface) = renderer();
        renderer.render(&AnalysisResults::new(
            ["⚠️ eval() used", "⚠️ os.system call"],
            ["✅ no hardcoded secrets"],
        ));

        assert_eq!(surface.vulnerability_items(), vec!["eval() used", "os.system call"]);
        assert_eq!(surface.safe_items(), vec!["no hardcoded secrets"]);
        assert!(surface.results_visible());
        assert!(surface.vulnerability_panel_visible());
        assert_eq!(surface.status(), "Complete");
    }

    #[test]
    fn test_empty_vulnerabilities_placeholder() {
        let (renderer, surface) = renderer();
        renderer.render(&AnalysisResults::new(Vec::<String>::new(), ["check1"]));

        let items = surface.vulnerability_list().children();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text_content(), "No vulnerabilities detected.");
        assert!(items[0].has_class("placeholder"));
        assert_eq!(items[0].style_property("border-left-color").as_deref(), Some("#aaa"));
        assert_eq!(surface.safe_items(), vec!["check1"]);
        assert!(surface.vulnerability_panel_visible());
    }

    #[test]
    fn test_empty_safe_renders_nothing() {
        let (renderer, surface) = renderer();
        renderer.render(&AnalysisResults::new(["⚠️ x"], Vec::<String>::new()));
        assert!(surface.safe_items().is_empty());
    }

    #[test]
    fn test_render_is_idempotent() {
        let (renderer, surface) = renderer();
        let results = AnalysisResults::new(["⚠️ b", "⚠️ a"], ["✅ c"]);

        renderer.render(&results);
        let first = (surface.vulnerability_items(), surface.safe_items());
        renderer.render(&results);
        let second = (surface.vulnerability_items(), surface.safe_items());

        assert_eq!(first, second);
        // Server order is display order.
        assert_eq!(second.0, vec!["b", "a"]);
    }

    #[test]
    fn test_render_replaces_previous_report() {
        let (renderer, surface) = renderer();
        renderer.render(&AnalysisResults::new(["⚠️ old"], ["✅ old"]));
        renderer.render(&AnalysisResults::new(Vec::<String>::new(), Vec::<String>::new()));

        assert_eq!(surface.vulnerability_items(), vec!["No vulnerabilities detected."]);
        assert!(surface.safe_items().is_empty());
    }

    #[test]
    fn test_server_markup_is_inert() {
        let (renderer, surface) = renderer();
        renderer.render(&AnalysisResults::new(
            ["<script>alert(1)</script>"],
            ["<img src=x onerror=alert(1)>"],
        ));

        let list = surface.vulnerability_list();
        assert!(list.query_selector_all("script").is_empty());
        assert!(surface.safe_list().query_selector_all("img").is_empty());
        assert_eq!(surface.vulnerability_items(), vec!["<script>alert(1)</script>"]);
        assert_eq!(
            list.inner_html(),
            "<li>&lt;script&gt;alert(1)&lt;/script&gt;</li>"
        );
    }
}
