// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Page surface: the DOM elements the session drives, addressed by role

use super::config::SurfaceIds;
use crate::dom::{parse_html, Document, Element};
use crate::error::{Error, Result};

/// Bundled page template
pub const DEFAULT_PAGE: &str = include_str!("index.html");

const HIDDEN_CLASS: &str = "hidden";
const DRAG_OVER_CLASS: &str = "dragover";

/// Role-based handles into the page document
#[derive(Debug, Clone)]
pub struct UiSurface {
    document: Document,
    drop_zone: Element,
    file_input: Element,
    trigger: Element,
    results: Element,
    file_label: Element,
    status: Element,
    vulnerability_list: Element,
    safe_list: Element,
    vulnerability_panel: Element,
}

impl UiSurface {
    /// Resolve every role in `document`
    pub fn bind(document: Document, ids: &SurfaceIds) -> Result<Self> {
        let find = |id: &str| {
            document
                .get_element_by_id(id)
                .ok_or_else(|| Error::dom(format!("page has no element #{}", id)))
        };

        Ok(Self {
            drop_zone: find(&ids.drop_zone)?,
            file_input: find(&ids.file_input)?,
            trigger: find(&ids.trigger)?,
            results: find(&ids.results)?,
            file_label: find(&ids.file_label)?,
            status: find(&ids.status)?,
            vulnerability_list: find(&ids.vulnerability_list)?,
            safe_list: find(&ids.safe_list)?,
            vulnerability_panel: find(&ids.vulnerability_panel)?,
            document,
        })
    }

    /// Parse `html` and bind it
    pub fn from_html(html: &str, ids: &SurfaceIds) -> Result<Self> {
        Self::bind(parse_html(html)?, ids)
    }

    /// Bind the bundled page template
    pub fn from_template(ids: &SurfaceIds) -> Result<Self> {
        Self::from_html(DEFAULT_PAGE, ids)
    }

    /// The underlying document
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Hidden file-picker input
    pub fn file_input(&self) -> &Element {
        &self.file_input
    }

    pub fn set_drag_highlight(&self, on: bool) {
        if on {
            self.drop_zone.add_class(DRAG_OVER_CLASS);
        } else {
            self.drop_zone.remove_class(DRAG_OVER_CLASS);
        }
    }

    pub fn drag_highlighted(&self) -> bool {
        self.drop_zone.has_class(DRAG_OVER_CLASS)
    }

    pub fn set_trigger_enabled(&self, enabled: bool) {
        self.trigger.set_disabled(!enabled);
    }

    pub fn trigger_enabled(&self) -> bool {
        !self.trigger.disabled()
    }

    /// Replace the trigger label with plain text
    pub fn set_trigger_text(&self, label: &str) {
        self.trigger.set_text_content(label);
    }

    /// Restore the idle trigger label: icon followed by text
    pub fn set_trigger_idle(&self, icon_class: &str, label: &str) {
        self.trigger.clear_children();
        let icon = self.document.create_element("i");
        icon.set_attribute("class", icon_class);
        self.trigger.append_child(&icon);
        let text = self.document.create_text_node(&format!(" {}", label));
        self.trigger.append_child(&text);
    }

    /// Visible trigger label
    pub fn trigger_label(&self) -> String {
        self.trigger.text_content().trim().to_string()
    }

    /// Whether the trigger currently shows an icon
    pub fn trigger_has_icon(&self) -> bool {
        !self.trigger.query_selector_all("i").is_empty()
    }

    pub fn set_file_label(&self, text: &str) {
        self.file_label.set_text_content(text);
    }

    pub fn file_label(&self) -> String {
        self.file_label.text_content()
    }

    pub fn hide_results(&self) {
        self.results.add_class(HIDDEN_CLASS);
    }

    pub fn show_results(&self) {
        self.results.remove_class(HIDDEN_CLASS);
    }

    pub fn results_visible(&self) -> bool {
        !self.results.has_class(HIDDEN_CLASS)
    }

    pub fn set_status(&self, text: &str) {
        self.status.set_text_content(text);
    }

    pub fn status(&self) -> String {
        self.status.text_content()
    }

    /// Flagged-findings list container
    pub fn vulnerability_list(&self) -> &Element {
        &self.vulnerability_list
    }

    /// Passed-checks list container
    pub fn safe_list(&self) -> &Element {
        &self.safe_list
    }

    pub fn set_vulnerability_panel_visible(&self, visible: bool) {
        self.vulnerability_panel
            .set_style_property("display", if visible { "block" } else { "none" });
    }

    pub fn vulnerability_panel_visible(&self) -> bool {
        self.vulnerability_panel.style_property("display").as_deref() != Some("none")
    }

    /// Item texts of the flagged-findings list
    pub fn vulnerability_items(&self) -> Vec<String> {
        self.vulnerability_list.child_texts()
    }

    /// Item texts of the passed-checks list
    pub fn safe_items(&self) -> Vec<String> {
        self.safe_list.child_texts()
    }
}
