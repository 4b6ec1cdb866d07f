// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! CSS Selector parsing and matching
//!
//! Compound selectors only (`li`, `#vuln-list`, `li.placeholder`,
//! `button[disabled]`) plus comma-separated groups. Combinators are not
//! supported; the page surface addresses elements by role and id.

use crate::error::{Error, Result};

use super::node::Node;

/// A parsed selector group (`a, b, c`)
#[derive(Debug, Clone)]
pub struct Selector {
    alternatives: Vec<Vec<SelectorPart>>,
}

/// A part of a compound selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorPart {
    /// Universal selector (*)
    Universal,
    /// Tag name
    Tag(String),
    /// ID selector (#id)
    Id(String),
    /// Class selector (.class)
    Class(String),
    /// Attribute presence ([attr]) or equality ([attr=value])
    Attribute { name: String, value: Option<String> },
}

impl Selector {
    /// Parse a selector string
    pub fn parse(selector: &str) -> Result<Self> {
        let selector = selector.trim();
        if selector.is_empty() {
            return Err(Error::selector(selector, "empty selector"));
        }

        let alternatives = selector
            .split(',')
            .map(|alt| parse_compound(selector, alt.trim()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { alternatives })
    }

    /// Check whether an element node matches any alternative
    pub fn matches(&self, node: &Node) -> bool {
        if !node.is_element() {
            return false;
        }
        self.alternatives
            .iter()
            .any(|parts| parts.iter().all(|part| part_matches(part, node)))
    }
}

fn parse_compound(full: &str, input: &str) -> Result<Vec<SelectorPart>> {
    if input.is_empty() {
        return Err(Error::selector(full, "empty alternative"));
    }
    if input.contains(char::is_whitespace) || input.contains(['>', '+', '~']) {
        return Err(Error::selector(full, "combinators are not supported"));
    }

    let mut parts = Vec::new();
    let mut rest = input;

    while let Some(c) = rest.chars().next() {
        match c {
            '*' => {
                parts.push(SelectorPart::Universal);
                rest = &rest[1..];
            }
            '#' | '.' => {
                let (name, tail) = take_ident(&rest[1..]);
                if name.is_empty() {
                    return Err(Error::selector(full, format!("missing name after '{}'", c)));
                }
                parts.push(if c == '#' {
                    SelectorPart::Id(name.to_string())
                } else {
                    SelectorPart::Class(name.to_string())
                });
                rest = tail;
            }
            '[' => {
                let end = rest
                    .find(']')
                    .ok_or_else(|| Error::selector(full, "unterminated attribute selector"))?;
                let body = &rest[1..end];
                let part = match body.split_once('=') {
                    Some((name, value)) => SelectorPart::Attribute {
                        name: name.trim().to_lowercase(),
                        value: Some(value.trim().trim_matches(['"', '\'']).to_string()),
                    },
                    None => SelectorPart::Attribute {
                        name: body.trim().to_lowercase(),
                        value: None,
                    },
                };
                parts.push(part);
                rest = &rest[end + 1..];
            }
            _ => {
                let (name, tail) = take_ident(rest);
                if name.is_empty() {
                    return Err(Error::selector(full, format!("unexpected character '{}'", c)));
                }
                parts.push(SelectorPart::Tag(name.to_lowercase()));
                rest = tail;
            }
        }
    }

    Ok(parts)
}

fn take_ident(input: &str) -> (&str, &str) {
    let end = input
        .find(|c: char| !(c.is_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(input.len());
    input.split_at(end)
}

fn part_matches(part: &SelectorPart, node: &Node) -> bool {
    match part {
        SelectorPart::Universal => true,
        SelectorPart::Tag(tag) => node.local_name().as_deref() == Some(tag.as_str()),
        SelectorPart::Id(id) => node.get_attribute("id").as_deref() == Some(id.as_str()),
        SelectorPart::Class(class) => node
            .get_attribute("class")
            .map(|c| c.split_whitespace().any(|c| c == class))
            .unwrap_or(false),
        SelectorPart::Attribute { name, value } => match (node.get_attribute(name), value) {
            (Some(actual), Some(expected)) => actual == *expected,
            (Some(_), None) => true,
            (None, _) => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    #[test]
    fn test_parse_compound() {
        let sel = Selector::parse("li.placeholder[data-kind=empty]").unwrap();
        assert_eq!(
            sel.alternatives[0],
            vec![
                SelectorPart::Tag("li".into()),
                SelectorPart::Class("placeholder".into()),
                SelectorPart::Attribute {
                    name: "data-kind".into(),
                    value: Some("empty".into())
                },
            ]
        );
    }

    #[test]
    fn test_rejects_combinators() {
        assert!(Selector::parse("ul li").is_err());
        assert!(Selector::parse("").is_err());
        assert!(Selector::parse("#").is_err());
    }

    #[test]
    fn test_matching() {
        let doc = parse_html(
            r#"<ul id="list"><li class="a b">one</li><li>two</li></ul><button disabled>go</button>"#,
        )
        .unwrap();
        assert_eq!(doc.query_selector_all("li").len(), 2);
        assert_eq!(doc.query_selector_all("li.b").len(), 1);
        assert_eq!(doc.query_selector_all("#list, button[disabled]").len(), 2);
    }
}
