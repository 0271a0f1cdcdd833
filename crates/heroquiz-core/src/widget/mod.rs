//! Widget renderers.
//!
//! Each setup function resolves its container, injects markup, registers
//! one listener per control and returns the widget instance that owns the
//! score state. A missing structural element is logged and returned as a
//! [`StructureError`]; callers treat it as a no-op.

use crate::container::{show_result, Mode};
use crate::error::StructureError;
use crate::model::{GameContent, GameKind, GameSpec};
use crate::score::ScoreCard;
use crate::theme::Theme;
use crate::traits::{Activation, ElementRef, Page};

pub mod checklist;
pub mod choice;
mod deck;
pub mod true_false;

pub use checklist::{setup_checklist, ChecklistGame, ChecklistGrade};
pub use choice::{setup_multiple_choice, setup_tap_quiz, ChoiceGame, ChoiceStyle};
pub use true_false::{setup_true_false, TrueFalseGame};

/// A mounted widget instance.
pub trait Game {
    /// Container id the widget was mounted into.
    fn container(&self) -> &str;

    fn kind(&self) -> GameKind;

    /// Handle an activation of one of this widget's controls.
    fn activate(&mut self, page: &mut dyn Page, activation: &Activation);

    fn score_card(&self) -> ScoreCard;
}

/// Mount the widget described by `spec`.
pub fn setup(
    page: &mut dyn Page,
    spec: &GameSpec,
    theme: &Theme,
) -> Result<Box<dyn Game>, StructureError> {
    let id = spec.container.as_str();
    let game: Box<dyn Game> = match &spec.content {
        GameContent::TrueFalse { questions } => {
            Box::new(setup_true_false(page, id, questions.clone(), theme)?)
        }
        GameContent::MultipleChoice { questions } => {
            Box::new(setup_multiple_choice(page, id, questions.clone(), theme)?)
        }
        GameContent::TapQuiz { questions } => {
            Box::new(setup_tap_quiz(page, id, questions.clone(), theme)?)
        }
        GameContent::Checklist { items } => {
            Box::new(setup_checklist(page, id, items.clone(), theme)?)
        }
    };
    Ok(game)
}

/// Report through the result region, logging when it is absent.
pub(crate) fn report(
    page: &mut dyn Page,
    container_id: &str,
    root: ElementRef,
    message: &str,
    mode: Mode,
) {
    if let Err(e) = show_result(page, container_id, root, message, Some(mode)) {
        tracing::warn!("{e}; status not shown: {message}");
    }
}

/// Element id for a piece of a widget, scoped by its container.
fn scoped_id(container_id: &str, suffix: &str) -> String {
    format!("{container_id}-{suffix}")
}

/// Id of the card holding `question`.
pub fn card_id(container_id: &str, question: usize) -> String {
    scoped_id(container_id, &format!("q{question}"))
}

/// Id of control `choice` of `question`. For true/false, 0 is true.
pub fn control_id(container_id: &str, question: usize, choice: usize) -> String {
    scoped_id(container_id, &format!("q{question}-c{choice}"))
}

/// Id of the feedback line under `question`.
pub fn feedback_id(container_id: &str, question: usize) -> String {
    scoped_id(container_id, &format!("q{question}-feedback"))
}

/// Id of checklist checkbox `idx`.
pub fn item_id(container_id: &str, idx: usize) -> String {
    scoped_id(container_id, &format!("item{idx}"))
}
