//! The page seam.
//!
//! Widgets talk to the hosting document only through [`Page`]. A browser
//! binding implements it over the real DOM; [`crate::page::MemoryPage`]
//! implements it in memory for previews, the terminal player and tests.

use serde::{Deserialize, Serialize};

use crate::markup::Node;

/// Opaque handle to an element owned by a [`Page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementRef(pub usize);

/// What a registered control does when activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Answer the question at this index.
    Answer { question: usize },
    /// Grade the whole widget.
    Finish,
}

/// A handler registration: which widget owns the control and what it does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listener {
    /// Container id of the owning widget.
    pub widget: String,
    pub action: Action,
}

/// An activation delivered to the owning widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activation {
    pub widget: String,
    /// The control that was activated.
    pub control: ElementRef,
    pub action: Action,
}

/// Element lookup, HTML injection and event subscription.
pub trait Page {
    /// Look up an element by its `id` attribute.
    fn element_by_id(&self, id: &str) -> Option<ElementRef>;

    /// First descendant of `scope` (document order) carrying `class`.
    fn find_by_class(&self, scope: ElementRef, class: &str) -> Option<ElementRef>;

    /// Replace the children of `parent` with `markup`.
    fn inject(&mut self, parent: ElementRef, markup: Vec<Node>);

    /// Replace the children of `el` with a single text node.
    fn set_text(&mut self, el: ElementRef, text: &str);

    fn add_class(&mut self, el: ElementRef, class: &str);

    fn remove_class(&mut self, el: ElementRef, class: &str);

    fn set_disabled(&mut self, el: ElementRef, disabled: bool);

    fn is_checked(&self, el: ElementRef) -> bool;

    fn set_attr(&mut self, el: ElementRef, name: &str, value: &str);

    /// Subscribe `listener` to activations of `el`.
    fn listen(&mut self, el: ElementRef, listener: Listener);

    /// Drop every listener on `el` owned by `widget`.
    fn unlisten(&mut self, el: ElementRef, widget: &str);
}
