//! Container resolution and the result reporter.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ElementKind, StructureError};
use crate::traits::{ElementRef, Page};

/// Class of the region receiving generated markup.
pub const OUTPUT_CLASS: &str = "gameOut";
/// Class of the region receiving status messages.
pub const RESULT_CLASS: &str = "result";
/// Class of the checklist's finish control.
pub const FINISH_CLASS: &str = "finishBtn";

/// Visual mode of a status message; rendered as a CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Ok,
    Bad,
    Info,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Ok, Mode::Bad, Mode::Info];

    pub fn class(self) -> &'static str {
        match self {
            Mode::Ok => "ok",
            Mode::Bad => "bad",
            Mode::Info => "info",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ok" => Ok(Mode::Ok),
            "bad" => Ok(Mode::Bad),
            "info" => Ok(Mode::Info),
            other => Err(format!("unknown mode: {other}")),
        }
    }
}

/// A resolved widget container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Container {
    pub root: ElementRef,
    pub out: ElementRef,
}

/// Locate the root element for `container_id` and its output region.
pub fn resolve_container(
    page: &dyn Page,
    container_id: &str,
) -> Result<Container, StructureError> {
    let root = page
        .element_by_id(container_id)
        .ok_or_else(|| StructureError::missing(container_id, ElementKind::Root))?;
    let out = page
        .find_by_class(root, OUTPUT_CLASS)
        .ok_or_else(|| StructureError::missing(container_id, ElementKind::Output))?;
    Ok(Container { root, out })
}

/// Write `message` into the root's feedback region and set its mode.
///
/// All mode classes are cleared first so at most one is ever present.
pub fn show_result(
    page: &mut dyn Page,
    container_id: &str,
    root: ElementRef,
    message: &str,
    mode: Option<Mode>,
) -> Result<(), StructureError> {
    let el = page
        .find_by_class(root, RESULT_CLASS)
        .ok_or_else(|| StructureError::missing(container_id, ElementKind::Feedback))?;

    page.set_text(el, message);
    for m in Mode::ALL {
        page.remove_class(el, m.class());
    }
    if let Some(mode) = mode {
        page.add_class(el, mode.class());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::Element;
    use crate::page::MemoryPage;

    fn page_with(children: Vec<Element>) -> MemoryPage {
        MemoryPage::from_markup(vec![Element::new("section")
            .id("game")
            .children(children)
            .into()])
    }

    #[test]
    fn resolves_root_and_output() {
        let page = page_with(vec![
            Element::new("div").class(OUTPUT_CLASS),
            Element::new("div").class(RESULT_CLASS),
        ]);
        let container = resolve_container(&page, "game").unwrap();
        assert!(page.has_class(container.out, OUTPUT_CLASS));
    }

    #[test]
    fn missing_root_or_output_is_reported() {
        let page = page_with(vec![Element::new("div").class(RESULT_CLASS)]);
        assert_eq!(
            resolve_container(&page, "nope").unwrap_err().element(),
            ElementKind::Root
        );
        assert_eq!(
            resolve_container(&page, "game").unwrap_err().element(),
            ElementKind::Output
        );
    }

    #[test]
    fn show_result_sets_exactly_one_mode() {
        let mut page = page_with(vec![Element::new("div").class(RESULT_CLASS)]);
        let root = page.element_by_id("game").unwrap();
        show_result(&mut page, "game", root, "first", Some(Mode::Info)).unwrap();
        show_result(&mut page, "game", root, "second", Some(Mode::Ok)).unwrap();

        let result = page.find_by_class(root, RESULT_CLASS).unwrap();
        assert_eq!(page.text_content(result), "second");
        assert!(page.has_class(result, "ok"));
        assert!(!page.has_class(result, "info"));

        show_result(&mut page, "game", root, "plain", None).unwrap();
        assert!(Mode::ALL.iter().all(|m| !page.has_class(result, m.class())));
    }

    #[test]
    fn show_result_without_feedback_region() {
        let mut page = page_with(vec![Element::new("div").class(OUTPUT_CLASS)]);
        let root = page.element_by_id("game").unwrap();
        let err = show_result(&mut page, "game", root, "hi", Some(Mode::Ok)).unwrap_err();
        assert_eq!(err.element(), ElementKind::Feedback);
    }

    #[test]
    fn mode_parse_and_display() {
        assert_eq!("OK".parse::<Mode>().unwrap(), Mode::Ok);
        assert_eq!(Mode::Bad.to_string(), "bad");
        assert!("loud".parse::<Mode>().is_err());
    }
}
