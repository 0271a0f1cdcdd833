//! In-memory [`Page`] implementation.
//!
//! An arena of nodes indexed by [`ElementRef`]. Good enough to host every
//! widget: id lookup, class lookup, injection, classes, form state,
//! listeners and click dispatch, plus serialization back to HTML.
//!
//! Replaced subtrees are released onto a free list and their slots reused,
//! so a long-lived page stays the size of its current document.

use std::collections::HashMap;

use crate::markup::{self, Node};
use crate::sanitize::escape_html;
use crate::traits::{Activation, ElementRef, Listener, Page};

#[derive(Debug, Clone)]
enum NodeKind {
    Element(ElementData),
    Text(String),
}

#[derive(Debug, Clone)]
struct ElementData {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, String)>,
    checked: bool,
    disabled: bool,
}

impl ElementData {
    fn from_markup(el: &markup::Element) -> Self {
        let mut checked = false;
        let mut disabled = false;
        let attrs = el
            .attrs
            .iter()
            .filter(|(name, _)| match name.as_str() {
                "checked" => {
                    checked = true;
                    false
                }
                "disabled" => {
                    disabled = true;
                    false
                }
                _ => true,
            })
            .cloned()
            .collect();
        Self {
            tag: el.tag.clone(),
            id: el.id.clone(),
            classes: el.classes.clone(),
            attrs,
            checked,
            disabled,
        }
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn is_checkbox(&self) -> bool {
        self.tag == "input" && self.attr("type") == Some("checkbox")
    }

    /// Rebuild a markup element (without children) so serialization shares
    /// one code path with [`markup::Element`].
    fn to_markup(&self) -> markup::Element {
        let mut el = markup::Element::new(&self.tag);
        el.id = self.id.clone();
        el.classes = self.classes.clone();
        el.attrs = self.attrs.clone();
        if self.checked {
            el.attrs.push(("checked".into(), String::new()));
        }
        if self.disabled {
            el.attrs.push(("disabled".into(), String::new()));
        }
        el
    }
}

#[derive(Debug, Clone)]
struct PageNode {
    parent: Option<ElementRef>,
    children: Vec<ElementRef>,
    kind: NodeKind,
}

/// A document held entirely in memory.
#[derive(Debug, Clone)]
pub struct MemoryPage {
    nodes: Vec<PageNode>,
    body: ElementRef,
    id_index: HashMap<String, ElementRef>,
    listeners: HashMap<ElementRef, Vec<Listener>>,
    free: Vec<ElementRef>,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    /// An empty document with a `<body>` root.
    pub fn new() -> Self {
        let body = PageNode {
            parent: None,
            children: Vec::new(),
            kind: NodeKind::Element(ElementData::from_markup(&markup::Element::new("body"))),
        };
        Self {
            nodes: vec![body],
            body: ElementRef(0),
            id_index: HashMap::new(),
            listeners: HashMap::new(),
            free: Vec::new(),
        }
    }

    /// Build a page whose body holds `markup`.
    pub fn from_markup(markup: Vec<Node>) -> Self {
        let mut page = Self::new();
        let body = page.body;
        for node in markup {
            page.append(body, node);
        }
        page
    }

    pub fn body(&self) -> ElementRef {
        self.body
    }

    /// Append `node` (and its subtree) under `parent`; returns the new node.
    pub fn append(&mut self, parent: ElementRef, node: Node) -> ElementRef {
        match node {
            Node::Text(text) => self.push_node(Some(parent), NodeKind::Text(text)),
            Node::Element(el) => {
                let handle =
                    self.push_node(Some(parent), NodeKind::Element(ElementData::from_markup(&el)));
                if let Some(id) = &el.id {
                    self.id_index.entry(id.clone()).or_insert(handle);
                }
                for child in el.children {
                    self.append(handle, child);
                }
                handle
            }
        }
    }

    fn push_node(&mut self, parent: Option<ElementRef>, kind: NodeKind) -> ElementRef {
        let node = PageNode {
            parent,
            children: Vec::new(),
            kind,
        };
        let handle = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot.0] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                ElementRef(self.nodes.len() - 1)
            }
        };
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(handle);
        }
        handle
    }

    fn node(&self, el: ElementRef) -> Option<&PageNode> {
        self.nodes.get(el.0)
    }

    fn element(&self, el: ElementRef) -> Option<&ElementData> {
        match &self.node(el)?.kind {
            NodeKind::Element(data) => Some(data),
            NodeKind::Text(_) => None,
        }
    }

    fn element_mut(&mut self, el: ElementRef) -> Option<&mut ElementData> {
        match &mut self.nodes.get_mut(el.0)?.kind {
            NodeKind::Element(data) => Some(data),
            NodeKind::Text(_) => None,
        }
    }

    /// Detach the children of `parent` and release their subtrees.
    fn clear_children(&mut self, parent: ElementRef) {
        let Some(node) = self.nodes.get_mut(parent.0) else {
            return;
        };
        let old = std::mem::take(&mut node.children);
        for child in old {
            self.release(child);
        }
    }

    /// Free `root` and everything below it, dropping the ids and listeners
    /// that point into the subtree.
    fn release(&mut self, root: ElementRef) {
        let mut stack = vec![root];
        while let Some(el) = stack.pop() {
            let Some(node) = self.nodes.get_mut(el.0) else {
                continue;
            };
            let children = std::mem::take(&mut node.children);
            node.parent = None;
            let kind = std::mem::replace(&mut node.kind, NodeKind::Text(String::new()));
            if let NodeKind::Element(ElementData { id: Some(id), .. }) = kind {
                if self.id_index.get(&id) == Some(&el) {
                    self.id_index.remove(&id);
                }
            }
            self.listeners.remove(&el);
            self.free.push(el);
            stack.extend(children);
        }
    }

    fn descendants(&self, scope: ElementRef, out: &mut Vec<ElementRef>) {
        if let Some(node) = self.node(scope) {
            for child in &node.children {
                out.push(*child);
                self.descendants(*child, out);
            }
        }
    }

    /// Every descendant of `scope` carrying `class`, in document order.
    pub fn find_all_by_class(&self, scope: ElementRef, class: &str) -> Vec<ElementRef> {
        let mut all = Vec::new();
        self.descendants(scope, &mut all);
        all.into_iter()
            .filter(|el| self.has_class(*el, class))
            .collect()
    }

    pub fn has_class(&self, el: ElementRef, class: &str) -> bool {
        self.element(el)
            .is_some_and(|data| data.classes.iter().any(|c| c == class))
    }

    pub fn is_disabled(&self, el: ElementRef) -> bool {
        self.element(el).is_some_and(|data| data.disabled)
    }

    pub fn attr(&self, el: ElementRef, name: &str) -> Option<String> {
        self.element(el)?.attr(name).map(str::to_string)
    }

    pub fn set_checked(&mut self, el: ElementRef, checked: bool) {
        if let Some(data) = self.element_mut(el) {
            data.checked = checked;
        }
    }

    /// Concatenated text of `el` and its descendants.
    pub fn text_content(&self, el: ElementRef) -> String {
        match self.node(el) {
            Some(PageNode {
                kind: NodeKind::Text(text),
                ..
            }) => text.clone(),
            Some(node) => node
                .children
                .iter()
                .map(|child| self.text_content(*child))
                .collect(),
            None => String::new(),
        }
    }

    /// Text content of the element with the given id, if present.
    pub fn text_of(&self, id: &str) -> Option<String> {
        self.element_by_id(id).map(|el| self.text_content(el))
    }

    pub fn inner_html(&self, el: ElementRef) -> String {
        self.node(el)
            .map(|node| node.children.iter().map(|c| self.dump(*c)).collect())
            .unwrap_or_default()
    }

    /// Serialize the body's children.
    pub fn to_html(&self) -> String {
        self.inner_html(self.body)
    }

    fn dump(&self, el: ElementRef) -> String {
        match self.node(el).map(|n| &n.kind) {
            Some(NodeKind::Text(text)) => escape_html(text),
            Some(NodeKind::Element(data)) => {
                let shell = data.to_markup();
                let mut out = shell.open_tag();
                if let Some(close) = shell.close_tag() {
                    out.push_str(&self.inner_html(el));
                    out.push_str(&close);
                }
                out
            }
            None => String::new(),
        }
    }

    /// Simulate a user click on `el`.
    ///
    /// Disabled controls swallow the click. Checkboxes toggle before the
    /// listeners run. Returns one activation per registered listener.
    pub fn click(&mut self, el: ElementRef) -> Vec<Activation> {
        let Some(data) = self.element_mut(el) else {
            return Vec::new();
        };
        if data.disabled {
            tracing::debug!("click on disabled control {:?} ignored", el);
            return Vec::new();
        }
        if data.is_checkbox() {
            data.checked = !data.checked;
        }
        self.listeners
            .get(&el)
            .map(|listeners| {
                listeners
                    .iter()
                    .map(|l| Activation {
                        widget: l.widget.clone(),
                        control: el,
                        action: l.action,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Click the element with the given id; no-op when absent.
    pub fn click_id(&mut self, id: &str) -> Vec<Activation> {
        match self.element_by_id(id) {
            Some(el) => self.click(el),
            None => Vec::new(),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }

    /// Live nodes, the body included.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }
}

impl Page for MemoryPage {
    fn element_by_id(&self, id: &str) -> Option<ElementRef> {
        self.id_index.get(id).copied()
    }

    fn find_by_class(&self, scope: ElementRef, class: &str) -> Option<ElementRef> {
        let mut all = Vec::new();
        self.descendants(scope, &mut all);
        all.into_iter().find(|el| self.has_class(*el, class))
    }

    fn inject(&mut self, parent: ElementRef, markup: Vec<Node>) {
        if self.element(parent).is_none() {
            return;
        }
        self.clear_children(parent);
        for node in markup {
            self.append(parent, node);
        }
    }

    fn set_text(&mut self, el: ElementRef, text: &str) {
        if self.element(el).is_none() {
            return;
        }
        self.clear_children(el);
        if !text.is_empty() {
            self.push_node(Some(el), NodeKind::Text(text.to_string()));
        }
    }

    fn add_class(&mut self, el: ElementRef, class: &str) {
        if let Some(data) = self.element_mut(el) {
            if !data.classes.iter().any(|c| c == class) {
                data.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, el: ElementRef, class: &str) {
        if let Some(data) = self.element_mut(el) {
            data.classes.retain(|c| c != class);
        }
    }

    fn set_disabled(&mut self, el: ElementRef, disabled: bool) {
        if let Some(data) = self.element_mut(el) {
            data.disabled = disabled;
        }
    }

    fn is_checked(&self, el: ElementRef) -> bool {
        self.element(el).is_some_and(|data| data.checked)
    }

    fn set_attr(&mut self, el: ElementRef, name: &str, value: &str) {
        if let Some(data) = self.element_mut(el) {
            match data.attrs.iter_mut().find(|(k, _)| k == name) {
                Some((_, v)) => *v = value.to_string(),
                None => data.attrs.push((name.to_string(), value.to_string())),
            }
        }
    }

    fn listen(&mut self, el: ElementRef, listener: Listener) {
        if self.element(el).is_some() {
            self.listeners.entry(el).or_default().push(listener);
        }
    }

    fn unlisten(&mut self, el: ElementRef, widget: &str) {
        if let Some(listeners) = self.listeners.get_mut(&el) {
            listeners.retain(|l| l.widget != widget);
            if listeners.is_empty() {
                self.listeners.remove(&el);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::Element;
    use crate::traits::Action;

    fn skeleton() -> MemoryPage {
        MemoryPage::from_markup(vec![Element::new("section")
            .id("game")
            .child(Element::new("div").class("gameOut"))
            .child(Element::new("div").class("result"))
            .into()])
    }

    #[test]
    fn lookup_by_id_and_class() {
        let page = skeleton();
        let root = page.element_by_id("game").unwrap();
        assert!(page.find_by_class(root, "gameOut").is_some());
        assert!(page.find_by_class(root, "finishBtn").is_none());
        assert!(page.element_by_id("missing").is_none());
    }

    #[test]
    fn inject_replaces_children_and_reindexes() {
        let mut page = skeleton();
        let root = page.element_by_id("game").unwrap();
        let out = page.find_by_class(root, "gameOut").unwrap();

        page.inject(out, vec![Element::new("button").id("b1").text("A").into()]);
        let b1 = page.element_by_id("b1").unwrap();
        page.listen(
            b1,
            Listener {
                widget: "game".into(),
                action: Action::Finish,
            },
        );
        assert_eq!(page.listener_count(), 1);

        page.inject(out, vec![Element::new("button").id("b2").text("B").into()]);
        assert!(page.element_by_id("b1").is_none());
        assert!(page.element_by_id("b2").is_some());
        assert_eq!(page.listener_count(), 0);
        assert_eq!(page.inner_html(out), r#"<button id="b2">B</button>"#);
    }

    #[test]
    fn set_text_escapes_on_serialization() {
        let mut page = skeleton();
        let root = page.element_by_id("game").unwrap();
        let result = page.find_by_class(root, "result").unwrap();
        page.set_text(result, "<b>hi</b>");
        assert_eq!(page.text_content(result), "<b>hi</b>");
        assert_eq!(page.inner_html(result), "&lt;b&gt;hi&lt;/b&gt;");
    }

    #[test]
    fn click_dispatches_to_listeners() {
        let mut page = MemoryPage::from_markup(vec![Element::new("button").id("go").into()]);
        let go = page.element_by_id("go").unwrap();
        page.listen(
            go,
            Listener {
                widget: "w".into(),
                action: Action::Answer { question: 2 },
            },
        );
        let activations = page.click_id("go");
        assert_eq!(activations.len(), 1);
        assert_eq!(activations[0].control, go);
        assert_eq!(activations[0].action, Action::Answer { question: 2 });
    }

    #[test]
    fn disabled_controls_swallow_clicks() {
        let mut page = MemoryPage::from_markup(vec![Element::new("button").id("go").into()]);
        let go = page.element_by_id("go").unwrap();
        page.listen(
            go,
            Listener {
                widget: "w".into(),
                action: Action::Finish,
            },
        );
        page.set_disabled(go, true);
        assert!(page.click(go).is_empty());
        assert!(page.to_html().contains("disabled"));
    }

    #[test]
    fn checkbox_click_toggles_checked() {
        let mut page = MemoryPage::from_markup(vec![Element::new("input")
            .id("cb")
            .attr("type", "checkbox")
            .into()]);
        let cb = page.element_by_id("cb").unwrap();
        assert!(!page.is_checked(cb));
        page.click(cb);
        assert!(page.is_checked(cb));
        assert_eq!(page.to_html(), r#"<input id="cb" type="checkbox" checked>"#);
        page.click(cb);
        assert!(!page.is_checked(cb));
    }

    #[test]
    fn repeated_set_text_reuses_slots() {
        let mut page = skeleton();
        let root = page.element_by_id("game").unwrap();
        let result = page.find_by_class(root, "result").unwrap();
        page.set_text(result, "Progress: 0/4");
        let live = page.node_count();
        let arena = page.nodes.len();

        for n in 0..10_000 {
            page.set_text(result, &format!("Progress: {n}/10000"));
        }
        assert_eq!(page.node_count(), live);
        assert_eq!(page.nodes.len(), arena);
        assert_eq!(page.text_content(result), "Progress: 9999/10000");
    }

    #[test]
    fn repeated_inject_keeps_arena_bounded() {
        let mut page = skeleton();
        let root = page.element_by_id("game").unwrap();
        let out = page.find_by_class(root, "gameOut").unwrap();
        let cards = || {
            (0..3)
                .map(|i| {
                    Node::from(
                        Element::new("div")
                            .id(format!("card{i}"))
                            .child(Element::new("button").id(format!("card{i}-ok")).text("OK")),
                    )
                })
                .collect::<Vec<_>>()
        };

        page.inject(out, cards());
        let arena = page.nodes.len();
        for _ in 0..100 {
            page.inject(out, cards());
        }
        assert_eq!(page.nodes.len(), arena);
        assert!(page.element_by_id("card2-ok").is_some());
        assert_eq!(page.find_all_by_class(root, "gameOut").len(), 1);
    }

    #[test]
    fn unlisten_drops_only_the_named_widget() {
        let mut page = MemoryPage::from_markup(vec![Element::new("button").id("go").into()]);
        let go = page.element_by_id("go").unwrap();
        for widget in ["a", "b"] {
            page.listen(
                go,
                Listener {
                    widget: widget.into(),
                    action: Action::Finish,
                },
            );
        }
        page.unlisten(go, "a");
        let activations = page.click(go);
        assert_eq!(activations.len(), 1);
        assert_eq!(activations[0].widget, "b");
    }

    #[test]
    fn class_add_and_remove() {
        let mut page = skeleton();
        let root = page.element_by_id("game").unwrap();
        let result = page.find_by_class(root, "result").unwrap();
        page.add_class(result, "ok");
        page.add_class(result, "ok");
        assert_eq!(page.find_all_by_class(root, "ok").len(), 1);
        page.remove_class(result, "ok");
        assert!(!page.has_class(result, "ok"));
    }
}
