// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Page document: owner of the node store

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::element::Element;
use super::node::{Node, NodeData, NodeId, NodeStore};
use super::selector::Selector;

/// A page document
///
/// Cloning shares the tree; every handle taken from it sees later mutations.
#[derive(Debug, Clone)]
pub struct Document {
    store: NodeStore,
    root: NodeId,
}

impl Document {
    /// Empty document with only a root node
    pub fn new() -> Self {
        let root = NodeId::new();
        let mut nodes = HashMap::new();
        nodes.insert(root, NodeData::document());
        Self {
            store: Arc::new(RwLock::new(nodes)),
            root,
        }
    }

    /// The document node
    pub fn root(&self) -> Node {
        Node::new(self.root, self.store.clone())
    }

    /// Text of the first `<title>`, empty when there is none
    pub fn title(&self) -> String {
        self.query_selector("title")
            .map(|t| t.text_content().trim().to_string())
            .unwrap_or_default()
    }

    pub fn body(&self) -> Option<Element> {
        self.query_selector("body")
    }

    /// First element in tree order matching `selector`; `None` on a bad selector
    pub fn query_selector(&self, selector: &str) -> Option<Element> {
        let selector = Selector::parse(selector).ok()?;
        self.elements().find(|e| selector.matches(e))
    }

    /// Every element in tree order matching `selector`; empty on a bad selector
    pub fn query_selector_all(&self, selector: &str) -> Vec<Element> {
        match Selector::parse(selector) {
            Ok(selector) => self.elements().filter(|e| selector.matches(e)).collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<Element> {
        let found = {
            let nodes = self.store.read();
            tree_order(&nodes, self.root).into_iter().find(|nid| {
                nodes
                    .get(nid)
                    .is_some_and(|n| n.attribute("id") == Some(id))
            })
        };
        found.and_then(|nid| Element::from_id(nid, self.store.clone()))
    }

    /// New element, not yet attached
    pub fn create_element(&self, tag: &str) -> Element {
        let id = self.insert(NodeData::element(tag));
        Element {
            node: Node::new(id, self.store.clone()),
        }
    }

    /// New text node, not yet attached; `content` is never parsed
    pub fn create_text_node(&self, content: &str) -> Node {
        let id = self.insert(NodeData::text(content));
        Node::new(id, self.store.clone())
    }

    /// Serialized markup of the whole document
    pub fn to_html(&self) -> String {
        self.root().inner_html()
    }

    /// Store `data` as the last child of `parent`
    pub(crate) fn append_data(&self, parent: NodeId, mut data: NodeData) -> NodeId {
        let id = NodeId::new();
        data.parent = Some(parent);
        let mut nodes = self.store.write();
        nodes.insert(id, data);
        if let Some(parent) = nodes.get_mut(&parent) {
            parent.children.push(id);
        }
        id
    }

    fn insert(&self, data: NodeData) -> NodeId {
        let id = NodeId::new();
        self.store.write().insert(id, data);
        id
    }

    fn elements(&self) -> impl Iterator<Item = Element> + '_ {
        let order = tree_order(&self.store.read(), self.root);
        order
            .into_iter()
            .filter_map(move |id| Element::from_id(id, self.store.clone()))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Ids below `id` in preorder, `id` included
fn tree_order(nodes: &HashMap<NodeId, NodeData>, id: NodeId) -> Vec<NodeId> {
    let mut order = Vec::new();
    let mut stack = vec![id];
    while let Some(next) = stack.pop() {
        if let Some(data) = nodes.get(&next) {
            order.push(next);
            stack.extend(data.children.iter().rev());
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    #[test]
    fn test_empty_document() {
        let doc = Document::new();
        assert!(doc.title().is_empty());
        assert!(doc.body().is_none());
        assert!(doc.to_html().is_empty());
    }

    #[test]
    fn test_detached_nodes() {
        let doc = Document::new();
        let li = doc.create_element("LI");
        assert_eq!(li.local_name(), "li");
        li.append_child(&doc.create_text_node("<b>check</b>"));
        assert_eq!(li.text_content(), "<b>check</b>");
        // Not reachable from the root until attached.
        assert!(doc.query_selector("li").is_none());

        doc.root().append_child(&li);
        assert_eq!(doc.to_html(), "<li>&lt;b&gt;check&lt;/b&gt;</li>");
    }

    #[test]
    fn test_lookup_in_tree_order() {
        let doc = parse_html(
            "<ul><li id='a'>one</li><li><span id='b'>two</span></li></ul><p id='a'>dup</p>",
        )
        .unwrap();
        assert_eq!(doc.get_element_by_id("a").unwrap().text_content(), "one");
        assert_eq!(doc.get_element_by_id("b").unwrap().local_name(), "span");
        assert!(doc.get_element_by_id("missing").is_none());

        let texts: Vec<_> = doc
            .query_selector_all("li, p")
            .iter()
            .map(|e| e.text_content())
            .collect();
        assert_eq!(texts, vec!["one", "two", "dup"]);
        assert!(doc.query_selector_all("ul li").is_empty());
    }
}
