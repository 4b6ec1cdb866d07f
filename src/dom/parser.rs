// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTML parser using html5ever
//!
//! Only trusted page templates come through here. Server-supplied strings
//! never do.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::ParseOpts;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

use super::document::Document;
use super::node::{NodeData, NodeId};
use crate::error::{Error, Result};

/// Parse an HTML string into a Document
pub fn parse_html(html: &str) -> Result<Document> {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: false,
            ..Default::default()
        },
        ..Default::default()
    };

    let dom = parse_document(RcDom::default(), opts)
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .map_err(|e| Error::HtmlParse(e.to_string()))?;

    let doc = Document::new();
    let root = doc.root().id;
    for child in dom.document.children.borrow().iter() {
        copy_into(&doc, child, root);
    }
    Ok(doc)
}

/// Copy one rcdom subtree under `parent`
fn copy_into(doc: &Document, handle: &Handle, parent: NodeId) {
    let data = match &handle.data {
        RcNodeData::Document | RcNodeData::ProcessingInstruction { .. } => return,
        RcNodeData::Doctype { .. } => NodeData::doctype(),
        RcNodeData::Comment { contents } => NodeData::comment(contents.to_string()),
        RcNodeData::Text { contents } => {
            let text = contents.borrow().to_string();
            // Indentation between tags carries no content
            if text.len() > 1 && text.trim().is_empty() {
                return;
            }
            NodeData::text(text)
        }
        RcNodeData::Element { name, attrs, .. } => NodeData::element(name.local.to_string())
            .with_attributes(
                attrs
                    .borrow()
                    .iter()
                    .map(|a| (a.name.local.to_string(), a.value.to_string())),
            ),
    };

    let id = doc.append_data(parent, data);
    for child in handle.children.borrow().iter() {
        copy_into(doc, child, id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_and_attributes() {
        let doc = parse_html("<div id=\"test\" class=\"foo bar\">content</div>").unwrap();
        assert_eq!(doc.body().unwrap().text_content(), "content");

        let div = doc.query_selector("div").unwrap();
        assert_eq!(div.get_attribute("id").as_deref(), Some("test"));
        assert!(div.has_class("bar"));
    }

    #[test]
    fn test_indentation_is_dropped() {
        let doc = parse_html("<ul>\n    <li>a</li>\n    <li>b</li>\n</ul>").unwrap();
        let list = doc.query_selector("ul").unwrap();
        assert_eq!(list.children().len(), 2);
        assert_eq!(list.node.children().len(), 2);
    }

    #[test]
    fn test_parse_page_template() {
        let html = r#"
            <!DOCTYPE html>
            <html>
            <head><title>Analyzer</title></head>
            <body>
                <div id="drop-zone">Drop a file</div>
                <input type="file" id="file-input" hidden>
                <button id="analyze-btn" disabled>Run</button>
            </body>
            </html>
        "#;
        let doc = parse_html(html).unwrap();

        assert_eq!(doc.title(), "Analyzer");
        assert!(doc.to_html().starts_with("<!DOCTYPE html>"));
        let input = doc.get_element_by_id("file-input").unwrap();
        assert!(input.has_attribute("hidden"));
        assert!(doc.get_element_by_id("analyze-btn").unwrap().disabled());
    }
}
