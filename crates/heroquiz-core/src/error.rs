//! Structural error types.
//!
//! The only failure a widget recognizes is a page that lacks an element the
//! widget expects. Callers log it and carry on with reduced functionality.

use std::fmt;

use thiserror::Error;

/// A structural element a widget looks for inside the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// The widget root carrying the container id.
    Root,
    /// The `.gameOut` region receiving generated markup.
    Output,
    /// The `.result` region receiving status messages.
    Feedback,
    /// The `.finishBtn` control of a checklist.
    FinishAction,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Root => write!(f, "root element"),
            ElementKind::Output => write!(f, "output region (.gameOut)"),
            ElementKind::Feedback => write!(f, "feedback region (.result)"),
            ElementKind::FinishAction => write!(f, "finish action (.finishBtn)"),
        }
    }
}

/// Errors raised while resolving a widget's page structure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StructureError {
    /// An expected element is absent.
    #[error("widget '{container}': missing {element}")]
    MissingElement {
        container: String,
        element: ElementKind,
    },
}

impl StructureError {
    pub fn missing(container: &str, element: ElementKind) -> Self {
        StructureError::MissingElement {
            container: container.to_string(),
            element,
        }
    }

    /// The element kind that was not found.
    pub fn element(&self) -> ElementKind {
        match self {
            StructureError::MissingElement { element, .. } => *element,
        }
    }
}
