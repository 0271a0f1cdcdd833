//! Checklist widget.
//!
//! Items are toggled freely; nothing is graded until the finish control is
//! activated, at which point every toggle is compared with the item's
//! classification in one pass.

use serde::{Deserialize, Serialize};

use crate::container::{resolve_container, Mode, FINISH_CLASS};
use crate::error::{ElementKind, StructureError};
use crate::markup::Element;
use crate::model::{ChecklistItem, GameKind};
use crate::score::{percent, ScoreCard, Tier};
use crate::theme::Theme;
use crate::traits::{Action, Activation, ElementRef, Listener, Page};

use super::{item_id, report, Game};

/// Result of one finish activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistGrade {
    pub matches: usize,
    pub total: usize,
    pub percent: u32,
    pub tier: Tier,
}

/// A mounted checklist.
#[derive(Debug)]
pub struct ChecklistGame {
    container_id: String,
    root: ElementRef,
    items: Vec<ChecklistItem>,
    boxes: Vec<Option<ElementRef>>,
    finish: Option<ElementRef>,
    last_grade: Option<ChecklistGrade>,
    theme: Theme,
}

/// Mount a checklist into `container_id`.
///
/// A page without a finish control still gets the checklist; it just can
/// never be graded, and the status says so.
pub fn setup_checklist(
    page: &mut dyn Page,
    container_id: &str,
    items: Vec<ChecklistItem>,
    theme: &Theme,
) -> Result<ChecklistGame, StructureError> {
    let container = resolve_container(page, container_id).inspect_err(|e| {
        tracing::warn!("checklist setup skipped: {e}");
    })?;

    let rows = items.iter().enumerate().map(|(idx, item)| {
        Element::new("label")
            .class("checkRow")
            .child(
                Element::new("input")
                    .id(item_id(container_id, idx))
                    .attr("type", "checkbox")
                    .attr("data-idx", idx.to_string()),
            )
            .child(Element::new("span").class("small").text(item.text.clone()))
    });
    page.inject(
        container.out,
        vec![Element::new("div").class("checkList").children(rows).into()],
    );

    let boxes = (0..items.len())
        .map(|idx| page.element_by_id(&item_id(container_id, idx)))
        .collect();

    let finish = page.find_by_class(container.root, FINISH_CLASS);
    match finish {
        Some(button) => {
            // The finish control lives outside the injected region, so a
            // previous mount's handler is still attached.
            page.unlisten(button, container_id);
            page.listen(
                button,
                Listener {
                    widget: container_id.to_string(),
                    action: Action::Finish,
                },
            );
            report(
                page,
                container_id,
                container.root,
                &theme.sparkled("Check the habits, then click the button"),
                Mode::Info,
            );
        }
        None => {
            let missing = StructureError::missing(container_id, ElementKind::FinishAction);
            tracing::info!("{missing}; checklist cannot be graded");
            report(
                page,
                container_id,
                container.root,
                &theme.hearted("Checklist loaded"),
                Mode::Info,
            );
        }
    }

    Ok(ChecklistGame {
        container_id: container_id.to_string(),
        root: container.root,
        items,
        boxes,
        finish,
        last_grade: None,
        theme: theme.clone(),
    })
}

impl ChecklistGame {
    pub fn items(&self) -> &[ChecklistItem] {
        &self.items
    }

    pub fn has_finish_action(&self) -> bool {
        self.finish.is_some()
    }

    pub fn last_grade(&self) -> Option<ChecklistGrade> {
        self.last_grade
    }

    /// Grade the current toggles without reporting.
    ///
    /// An item matches when its checked state equals `!undesirable`.
    pub fn grade(&self, page: &dyn Page) -> ChecklistGrade {
        let matches = self
            .items
            .iter()
            .zip(&self.boxes)
            .filter(|(item, el)| {
                let checked = el.is_some_and(|el| page.is_checked(el));
                checked == item.should_check()
            })
            .count();
        let total = self.items.len();
        let percent = percent(matches, total);
        ChecklistGrade {
            matches,
            total,
            percent,
            tier: Tier::from_percent(percent),
        }
    }

    /// Grade and report the hero score.
    pub fn finish(&mut self, page: &mut dyn Page) -> ChecklistGrade {
        let grade = self.grade(page);
        let message = format!(
            "{} — {}",
            self.theme.hearted(&format!(
                "Hero Score: {}/{} ({}%)",
                grade.matches, grade.total, grade.percent
            )),
            self.theme.tier_message(grade.tier)
        );
        report(page, &self.container_id, self.root, &message, Mode::Ok);
        self.last_grade = Some(grade);
        grade
    }
}

impl Game for ChecklistGame {
    fn container(&self) -> &str {
        &self.container_id
    }

    fn kind(&self) -> GameKind {
        GameKind::Checklist
    }

    fn activate(&mut self, page: &mut dyn Page, activation: &Activation) {
        match activation.action {
            Action::Finish if Some(activation.control) == self.finish => {
                self.finish(page);
            }
            _ => tracing::debug!(
                "'{}': ignoring activation {:?}",
                self.container_id,
                activation.action
            ),
        }
    }

    fn score_card(&self) -> ScoreCard {
        let grade = self.last_grade;
        ScoreCard {
            widget: self.container_id.clone(),
            kind: self.kind().to_string(),
            total: self.items.len(),
            answered: grade.map_or(0, |g| g.total),
            correct: grade.map_or(0, |g| g.matches),
            percent: grade.map_or(0, |g| g.percent),
            finished: grade.is_some(),
        }
    }
}
