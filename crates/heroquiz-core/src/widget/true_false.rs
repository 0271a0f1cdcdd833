//! True/false widget.

use crate::container::{resolve_container, Mode};
use crate::error::StructureError;
use crate::model::{GameKind, TrueFalseQuestion};
use crate::score::{Progress, ScoreCard, Scoreboard};
use crate::theme::Theme;
use crate::traits::{Activation, Page};

use super::deck::{CardSpec, ControlSpec, Deck, Verdict};
use super::{report, Game};

/// A mounted true/false quiz.
#[derive(Debug)]
pub struct TrueFalseGame {
    deck: Deck,
    questions: Vec<TrueFalseQuestion>,
    theme: Theme,
}

/// Mount a true/false quiz into `container_id`.
pub fn setup_true_false(
    page: &mut dyn Page,
    container_id: &str,
    questions: Vec<TrueFalseQuestion>,
    theme: &Theme,
) -> Result<TrueFalseGame, StructureError> {
    let container = resolve_container(page, container_id).inspect_err(|e| {
        tracing::warn!("true/false setup skipped: {e}");
    })?;

    let specs: Vec<CardSpec> = questions
        .iter()
        .map(|q| CardSpec {
            prompt: q.prompt.clone(),
            layout: "qBtns qBtns-row",
            controls: [true, false]
                .into_iter()
                .map(|value| ControlSpec {
                    label: theme.bool_label(value).to_string(),
                    class: "tfBtn",
                    data: ("data-choice", value.to_string()),
                })
                .collect(),
        })
        .collect();

    let deck = Deck::mount(page, container_id, container, &specs);
    report(
        page,
        container_id,
        container.root,
        &theme.hearted(&format!("Click {}/{} to start", theme.true_label, theme.false_label)),
        Mode::Info,
    );

    Ok(TrueFalseGame {
        deck,
        questions,
        theme: theme.clone(),
    })
}

impl TrueFalseGame {
    pub fn board(&self) -> &Scoreboard {
        self.deck.board()
    }

    /// The boolean picked for `question`, once answered.
    pub fn picked(&self, question: usize) -> Option<bool> {
        self.deck.chosen(question).map(|choice| choice == 0)
    }

    /// Apply an activation; see [`Game::activate`].
    pub fn answer(&mut self, page: &mut dyn Page, activation: &Activation) -> Option<Progress> {
        let questions = &self.questions;
        let theme = &self.theme;
        self.deck.answer(page, activation, theme, |question, choice| {
            let picked = choice == 0;
            let expected = questions[question].answer;
            if picked == expected {
                Verdict {
                    correct: true,
                    feedback: theme.correct(),
                }
            } else {
                Verdict {
                    correct: false,
                    feedback: theme.wrong(&format!(
                        "The correct answer is {}.",
                        theme.bool_label(expected)
                    )),
                }
            }
        })
    }
}

impl Game for TrueFalseGame {
    fn container(&self) -> &str {
        self.deck.container_id()
    }

    fn kind(&self) -> GameKind {
        GameKind::TrueFalse
    }

    fn activate(&mut self, page: &mut dyn Page, activation: &Activation) {
        self.answer(page, activation);
    }

    fn score_card(&self) -> ScoreCard {
        self.deck.score_card(&self.kind().to_string())
    }
}
