// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Element handles: classes, inline style, disabled flag, scoped queries

use super::node::{Node, NodeId, NodeStore};
use super::selector::Selector;

/// A node known to be an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub node: Node,
}

impl Element {
    /// `None` unless `node` is an element
    pub fn new(node: Node) -> Option<Self> {
        node.is_element().then_some(Self { node })
    }

    pub(crate) fn from_id(id: NodeId, store: NodeStore) -> Option<Self> {
        Self::new(Node::new(id, store))
    }

    /// Lowercase tag name
    pub fn local_name(&self) -> String {
        self.node.local_name().unwrap_or_default()
    }

    /// Class names in attribute order
    pub fn classes(&self) -> Vec<String> {
        self.node
            .get_attribute("class")
            .map(|c| c.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().iter().any(|c| c == class)
    }

    /// Add or remove `class`; other classes keep their order
    pub fn toggle_class(&self, class: &str, on: bool) {
        let mut classes = self.classes();
        let present = classes.iter().any(|c| c == class);
        match (on, present) {
            (true, false) => classes.push(class.to_string()),
            (false, true) => classes.retain(|c| c != class),
            _ => return,
        }
        self.node.set_attribute("class", classes.join(" "));
    }

    pub fn add_class(&self, class: &str) {
        self.toggle_class(class, true);
    }

    pub fn remove_class(&self, class: &str) {
        self.toggle_class(class, false);
    }

    /// Inline style property (`style="display: none"`, `display` -> `none`)
    pub fn style_property(&self, property: &str) -> Option<String> {
        let style = self.node.get_attribute("style")?;
        declarations(&style)
            .into_iter()
            .find_map(|(k, v)| (k == property).then_some(v))
    }

    /// Set one inline style property, keeping the others in place
    pub fn set_style_property(&self, property: &str, value: &str) {
        let mut style = self
            .node
            .get_attribute("style")
            .map(|s| declarations(&s))
            .unwrap_or_default();

        match style.iter_mut().find(|(k, _)| k == property) {
            Some((_, v)) => *v = value.to_string(),
            None => style.push((property.to_string(), value.to_string())),
        }

        let rendered: Vec<String> = style.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
        self.node.set_attribute("style", rendered.join("; "));
    }

    pub fn disabled(&self) -> bool {
        self.node.has_attribute("disabled")
    }

    pub fn set_disabled(&self, disabled: bool) {
        match disabled {
            true => self.node.set_attribute("disabled", ""),
            false => self.node.remove_attribute("disabled"),
        }
    }

    /// Child elements; text and comment children are skipped
    pub fn children(&self) -> Vec<Element> {
        self.node.children().into_iter().filter_map(Element::new).collect()
    }

    /// Descendants matching `selector`, in tree order, excluding `self`
    pub fn query_selector_all(&self, selector: &str) -> Vec<Element> {
        let Ok(selector) = Selector::parse(selector) else {
            return Vec::new();
        };
        let mut found = Vec::new();
        let mut pending: Vec<Element> = self.children().into_iter().rev().collect();
        while let Some(next) = pending.pop() {
            pending.extend(next.children().into_iter().rev());
            if selector.matches(&next) {
                found.push(next);
            }
        }
        found
    }

    /// Text of each child element, in order
    pub fn child_texts(&self) -> Vec<String> {
        self.children().iter().map(|c| c.text_content()).collect()
    }
}

impl std::ops::Deref for Element {
    type Target = Node;

    fn deref(&self) -> &Node {
        &self.node
    }
}

/// `a: b; c: d` into ordered pairs, names lowercased
fn declarations(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| {
            let (name, value) = decl.split_once(':')?;
            let name = name.trim().to_lowercase();
            (!name.is_empty()).then(|| (name, value.trim().to_string()))
        })
        .collect()
}
