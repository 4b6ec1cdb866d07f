// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! DOM nodes
//!
//! Every node of a document lives in one shared store keyed by [`NodeId`].
//! A [`Node`] is a cheap handle: an id plus the store.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

pub(crate) type NodeStore = Arc<RwLock<HashMap<NodeId, NodeData>>>;

/// Unique node identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u64);

impl NodeId {
    pub(crate) fn new() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Node type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Document,
    DocumentType,
    Element,
    Text,
    Comment,
}

#[derive(Debug, Clone)]
pub(crate) enum NodeKind {
    Document,
    Doctype,
    /// Lowercase tag, attributes in source order
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
    },
    Text(String),
    Comment(String),
}

#[derive(Debug)]
pub(crate) struct NodeData {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl NodeData {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
        }
    }

    pub(crate) fn document() -> Self {
        Self::new(NodeKind::Document)
    }

    pub(crate) fn doctype() -> Self {
        Self::new(NodeKind::Doctype)
    }

    pub(crate) fn element(tag: impl Into<String>) -> Self {
        Self::new(NodeKind::Element {
            tag: tag.into().to_lowercase(),
            attributes: Vec::new(),
        })
    }

    pub(crate) fn text(content: impl Into<String>) -> Self {
        Self::new(NodeKind::Text(content.into()))
    }

    pub(crate) fn comment(content: impl Into<String>) -> Self {
        Self::new(NodeKind::Comment(content.into()))
    }

    /// Replace the attribute list of an element; no-op on other kinds
    pub(crate) fn with_attributes(mut self, list: impl IntoIterator<Item = (String, String)>) -> Self {
        if let NodeKind::Element { attributes, .. } = &mut self.kind {
            *attributes = list
                .into_iter()
                .map(|(k, v)| (k.to_lowercase(), v))
                .collect();
        }
        self
    }

    pub(crate) fn node_type(&self) -> NodeType {
        match self.kind {
            NodeKind::Document => NodeType::Document,
            NodeKind::Doctype => NodeType::DocumentType,
            NodeKind::Element { .. } => NodeType::Element,
            NodeKind::Text(_) => NodeType::Text,
            NodeKind::Comment(_) => NodeType::Comment,
        }
    }

    pub(crate) fn tag(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    /// Attribute value by lowercase name
    pub(crate) fn attribute(&self, name: &str) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    fn attributes_mut(&mut self) -> Option<&mut Vec<(String, String)>> {
        match &mut self.kind {
            NodeKind::Element { attributes, .. } => Some(attributes),
            _ => None,
        }
    }
}

/// Handle to a node in a document
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    store: NodeStore,
}

impl Node {
    pub(crate) fn new(id: NodeId, store: NodeStore) -> Self {
        Self { id, store }
    }

    fn with<R>(&self, f: impl FnOnce(&NodeData) -> R) -> Option<R> {
        self.store.read().get(&self.id).map(f)
    }

    fn with_mut<R>(&self, f: impl FnOnce(&mut NodeData) -> R) -> Option<R> {
        self.store.write().get_mut(&self.id).map(f)
    }

    fn handle(&self, id: NodeId) -> Node {
        Node::new(id, self.store.clone())
    }

    /// `None` once the node has been discarded from its document
    pub fn node_type(&self) -> Option<NodeType> {
        self.with(NodeData::node_type)
    }

    pub fn is_element(&self) -> bool {
        self.node_type() == Some(NodeType::Element)
    }

    pub fn is_text(&self) -> bool {
        self.node_type() == Some(NodeType::Text)
    }

    /// Lowercase tag name of an element
    pub fn local_name(&self) -> Option<String> {
        self.with(|n| n.tag().map(str::to_string)).flatten()
    }

    /// Concatenated text of the subtree
    pub fn text_content(&self) -> String {
        let nodes = self.store.read();
        let mut out = String::new();
        collect_text(&nodes, self.id, &mut out);
        out
    }

    /// Replace every child with a single text node holding `content`
    ///
    /// The content is stored verbatim and never interpreted as markup. The
    /// replaced subtree is discarded from the store.
    pub fn set_text_content(&self, content: impl Into<String>) {
        let content = content.into();
        let mut nodes = self.store.write();

        let old = match nodes.get_mut(&self.id) {
            Some(NodeData {
                kind: NodeKind::Text(text),
                ..
            }) => {
                *text = content;
                return;
            }
            Some(node) => std::mem::take(&mut node.children),
            None => return,
        };
        for child in old {
            discard(&mut nodes, child);
        }

        let mut text = NodeData::text(content);
        text.parent = Some(self.id);
        let text_id = NodeId::new();
        nodes.insert(text_id, text);
        if let Some(node) = nodes.get_mut(&self.id) {
            node.children.push(text_id);
        }
    }

    pub fn get_attribute(&self, name: &str) -> Option<String> {
        let name = name.to_lowercase();
        self.with(|n| n.attribute(&name).map(str::to_string)).flatten()
    }

    /// Set an attribute, keeping its position if it already exists
    pub fn set_attribute(&self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into().to_lowercase();
        let value = value.into();
        self.with_mut(|n| {
            if let Some(attributes) = n.attributes_mut() {
                match attributes.iter_mut().find(|(k, _)| *k == name) {
                    Some((_, slot)) => *slot = value,
                    None => attributes.push((name, value)),
                }
            }
        });
    }

    pub fn remove_attribute(&self, name: &str) {
        let name = name.to_lowercase();
        self.with_mut(|n| {
            if let Some(attributes) = n.attributes_mut() {
                attributes.retain(|(k, _)| *k != name);
            }
        });
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.get_attribute(name).is_some()
    }

    pub fn parent(&self) -> Option<Node> {
        self.with(|n| n.parent)
            .flatten()
            .map(|id| self.handle(id))
    }

    pub fn children(&self) -> Vec<Node> {
        self.with(|n| n.children.clone())
            .unwrap_or_default()
            .into_iter()
            .map(|id| self.handle(id))
            .collect()
    }

    /// Append `child` as the last child, moving it out of its old parent
    pub fn append_child(&self, child: &Node) {
        let mut nodes = self.store.write();

        let old_parent = nodes.get(&child.id).and_then(|c| c.parent);
        if let Some(old) = old_parent.and_then(|p| nodes.get_mut(&p)) {
            old.children.retain(|&id| id != child.id);
        }
        if let Some(c) = nodes.get_mut(&child.id) {
            c.parent = Some(self.id);
        }
        if let Some(p) = nodes.get_mut(&self.id) {
            p.children.push(child.id);
        }
    }

    /// Discard every child subtree
    pub fn clear_children(&self) {
        let mut nodes = self.store.write();
        let old = nodes
            .get_mut(&self.id)
            .map(|n| std::mem::take(&mut n.children))
            .unwrap_or_default();
        for child in old {
            discard(&mut nodes, child);
        }
    }

    /// Serialized markup of the children
    pub fn inner_html(&self) -> String {
        let nodes = self.store.read();
        let mut out = String::new();
        for &child in nodes.get(&self.id).map(|n| n.children.as_slice()).unwrap_or_default() {
            write_html(&nodes, child, &mut out);
        }
        out
    }

    /// Serialized markup of the node itself
    pub fn outer_html(&self) -> String {
        let nodes = self.store.read();
        let mut out = String::new();
        write_html(&nodes, self.id, &mut out);
        out
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && Arc::ptr_eq(&self.store, &other.store)
    }
}

impl Eq for Node {}

fn collect_text(nodes: &HashMap<NodeId, NodeData>, id: NodeId, out: &mut String) {
    let Some(node) = nodes.get(&id) else {
        return;
    };
    match &node.kind {
        NodeKind::Text(text) => out.push_str(text),
        NodeKind::Element { .. } | NodeKind::Document => {
            for &child in &node.children {
                collect_text(nodes, child, out);
            }
        }
        NodeKind::Doctype | NodeKind::Comment(_) => {}
    }
}

fn discard(nodes: &mut HashMap<NodeId, NodeData>, id: NodeId) {
    if let Some(node) = nodes.remove(&id) {
        for child in node.children {
            discard(nodes, child);
        }
    }
}

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

fn write_html(nodes: &HashMap<NodeId, NodeData>, id: NodeId, out: &mut String) {
    let Some(node) = nodes.get(&id) else {
        return;
    };
    match &node.kind {
        NodeKind::Document => {
            for &child in &node.children {
                write_html(nodes, child, out);
            }
        }
        NodeKind::Doctype => out.push_str("<!DOCTYPE html>"),
        NodeKind::Comment(text) => {
            let _ = write!(out, "<!--{}-->", text);
        }
        NodeKind::Text(text) => push_escaped(out, text, false),
        NodeKind::Element { tag, attributes } => {
            out.push('<');
            out.push_str(tag);
            for (name, value) in attributes {
                out.push(' ');
                out.push_str(name);
                if !value.is_empty() {
                    out.push_str("=\"");
                    push_escaped(out, value, true);
                    out.push('"');
                }
            }
            out.push('>');
            if VOID_ELEMENTS.contains(&tag.as_str()) {
                return;
            }
            for &child in &node.children {
                write_html(nodes, child, out);
            }
            let _ = write!(out, "</{}>", tag);
        }
    }
}

fn push_escaped(out: &mut String, text: &str, attribute: bool) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detached(data: NodeData) -> (Node, NodeStore) {
        let store: NodeStore = Arc::default();
        let id = NodeId::new();
        store.write().insert(id, data);
        (Node::new(id, store.clone()), store)
    }

    #[test]
    fn test_set_text_content_is_not_markup() {
        let (li, store) = detached(NodeData::element("li"));
        li.set_text_content("<img src=x onerror=alert(1)>");

        assert_eq!(li.text_content(), "<img src=x onerror=alert(1)>");
        assert_eq!(li.children().len(), 1);
        assert!(li.children()[0].is_text());
        assert_eq!(li.inner_html(), "&lt;img src=x onerror=alert(1)&gt;");

        li.set_text_content("again");
        // Old text node is gone from the store.
        assert_eq!(store.read().len(), 2);
    }

    #[test]
    fn test_attributes_keep_order() {
        let (div, _) = detached(NodeData::element("DIV"));
        div.set_attribute("id", "a");
        div.set_attribute("Class", "x\"y");
        div.set_attribute("id", "b");
        assert_eq!(div.outer_html(), "<div id=\"b\" class=\"x&quot;y\"></div>");
        div.remove_attribute("CLASS");
        assert!(!div.has_attribute("class"));
    }

    #[test]
    fn test_text_nodes_have_no_attributes() {
        let (text, _) = detached(NodeData::text("plain"));
        text.set_attribute("id", "x");
        assert!(text.get_attribute("id").is_none());
        assert!(text.local_name().is_none());
    }

    #[test]
    fn test_clear_children_discards_subtree() {
        let (ul, store) = detached(NodeData::element("ul"));
        for label in ["a", "b"] {
            let id = NodeId::new();
            store.write().insert(id, NodeData::element("li"));
            let li = Node::new(id, store.clone());
            li.set_text_content(label);
            ul.append_child(&li);
        }
        assert_eq!(ul.text_content(), "ab");
        assert_eq!(ul.children()[1].parent(), Some(ul.clone()));

        let first = ul.children()[0].clone();
        ul.clear_children();
        assert!(ul.children().is_empty());
        assert_eq!(first.node_type(), None);
        assert_eq!(store.read().len(), 1);
    }
}
