//! Markup fragments produced by widget renderers.
//!
//! Widgets never build raw HTML strings. They build a small tree of
//! [`Element`] and text nodes, and text is escaped when the tree is
//! serialized, so question and option strings can never inject markup.

use std::fmt::Write as _;

use crate::sanitize::escape_html;

/// Elements serialized without a closing tag.
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "meta", "link"];

/// A markup node: an element or a run of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

/// An element with its attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    /// Remaining attributes in insertion order. Boolean attributes carry an
    /// empty value.
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            classes: Vec::new(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add one or more space-separated classes.
    pub fn class(mut self, classes: &str) -> Self {
        self.classes
            .extend(classes.split_whitespace().map(str::to_string));
        self
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.push((name.to_string(), value.into()));
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children<I>(mut self, nodes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::text(text))
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn is_void(&self) -> bool {
        VOID_TAGS.contains(&self.tag.as_str())
    }

    /// Serialize the opening tag, including `id` and `class`.
    pub fn open_tag(&self) -> String {
        let mut out = format!("<{}", self.tag);
        if let Some(id) = &self.id {
            let _ = write!(out, " id=\"{}\"", escape_html(id));
        }
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape_html(&self.classes.join(" ")));
        }
        for (name, value) in &self.attrs {
            if value.is_empty() {
                let _ = write!(out, " {name}");
            } else {
                let _ = write!(out, " {}=\"{}\"", name, escape_html(value));
            }
        }
        out.push('>');
        out
    }

    pub fn close_tag(&self) -> Option<String> {
        (!self.is_void()).then(|| format!("</{}>", self.tag))
    }

    pub fn to_html(&self) -> String {
        let mut out = self.open_tag();
        if let Some(close) = self.close_tag() {
            out.push_str(&render(&self.children));
            out.push_str(&close);
        }
        out
    }
}

/// Serialize a fragment to HTML.
pub fn render(nodes: &[Node]) -> String {
    nodes
        .iter()
        .map(|node| match node {
            Node::Element(el) => el.to_html(),
            Node::Text(text) => escape_html(text),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_nested_elements() {
        let card = Element::new("div")
            .id("q1")
            .class("qCard")
            .attr("data-answered", "false")
            .child(Element::new("strong").text("Q1."))
            .text(" Is water wet?");
        assert_eq!(
            card.to_html(),
            r#"<div id="q1" class="qCard" data-answered="false"><strong>Q1.</strong> Is water wet?</div>"#
        );
    }

    #[test]
    fn text_and_attributes_are_escaped() {
        let btn = Element::new("button")
            .attr("title", "\"quoted\"")
            .text("<script>alert('x')</script>");
        let html = btn.to_html();
        assert!(html.contains("&quot;quoted&quot;"));
        assert!(html.contains("&lt;script&gt;alert(&#039;x&#039;)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn void_elements_and_boolean_attributes() {
        let input = Element::new("input")
            .attr("type", "checkbox")
            .attr("disabled", "");
        assert_eq!(input.to_html(), r#"<input type="checkbox" disabled>"#);
    }

    #[test]
    fn class_splits_whitespace() {
        let el = Element::new("button").class("btn  tfBtn");
        assert!(el.has_class("btn"));
        assert!(el.has_class("tfBtn"));
        assert_eq!(el.classes.len(), 2);
    }
}
