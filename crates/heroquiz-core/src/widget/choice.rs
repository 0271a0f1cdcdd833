//! Multiple-choice and tap-quiz widgets.
//!
//! Both share one renderer; [`ChoiceStyle`] only changes the control
//! classes and the start prompt.

use crate::container::{resolve_container, Mode};
use crate::error::StructureError;
use crate::model::{ChoiceQuestion, GameKind};
use crate::score::{Progress, ScoreCard, Scoreboard};
use crate::theme::Theme;
use crate::traits::{Activation, Page};

use super::deck::{CardSpec, ControlSpec, Deck, Verdict};
use super::{report, Game};

/// Presentation of a choice widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceStyle {
    /// Options stacked as a list of buttons.
    List,
    /// Options laid out as tap cards in a grid.
    Tap,
}

impl ChoiceStyle {
    fn button_class(self) -> &'static str {
        match self {
            ChoiceStyle::List => "mcBtn",
            ChoiceStyle::Tap => "tapBtn",
        }
    }

    fn layout(self) -> &'static str {
        match self {
            ChoiceStyle::List => "qBtns qBtns-list",
            ChoiceStyle::Tap => "qBtns qBtns-grid",
        }
    }

    fn start_prompt(self) -> &'static str {
        match self {
            ChoiceStyle::List => "Choose an answer to start",
            ChoiceStyle::Tap => "Tap an answer to start",
        }
    }

    fn kind(self) -> GameKind {
        match self {
            ChoiceStyle::List => GameKind::MultipleChoice,
            ChoiceStyle::Tap => GameKind::TapQuiz,
        }
    }
}

/// A mounted multiple-choice or tap quiz.
#[derive(Debug)]
pub struct ChoiceGame {
    deck: Deck,
    questions: Vec<ChoiceQuestion>,
    style: ChoiceStyle,
    theme: Theme,
}

/// Mount a multiple-choice quiz into `container_id`.
pub fn setup_multiple_choice(
    page: &mut dyn Page,
    container_id: &str,
    questions: Vec<ChoiceQuestion>,
    theme: &Theme,
) -> Result<ChoiceGame, StructureError> {
    setup_choice(page, container_id, questions, ChoiceStyle::List, theme)
}

/// Mount a tap quiz into `container_id`.
pub fn setup_tap_quiz(
    page: &mut dyn Page,
    container_id: &str,
    questions: Vec<ChoiceQuestion>,
    theme: &Theme,
) -> Result<ChoiceGame, StructureError> {
    setup_choice(page, container_id, questions, ChoiceStyle::Tap, theme)
}

pub fn setup_choice(
    page: &mut dyn Page,
    container_id: &str,
    questions: Vec<ChoiceQuestion>,
    style: ChoiceStyle,
    theme: &Theme,
) -> Result<ChoiceGame, StructureError> {
    let container = resolve_container(page, container_id).inspect_err(|e| {
        tracing::warn!("{} setup skipped: {e}", style.kind());
    })?;

    let specs: Vec<CardSpec> = questions
        .iter()
        .map(|q| CardSpec {
            prompt: q.prompt.clone(),
            layout: style.layout(),
            controls: q
                .options
                .iter()
                .enumerate()
                .map(|(i, opt)| ControlSpec {
                    label: opt.clone(),
                    class: style.button_class(),
                    data: ("data-index", i.to_string()),
                })
                .collect(),
        })
        .collect();

    let deck = Deck::mount(page, container_id, container, &specs);
    report(
        page,
        container_id,
        container.root,
        &theme.hearted(style.start_prompt()),
        Mode::Info,
    );

    Ok(ChoiceGame {
        deck,
        questions,
        style,
        theme: theme.clone(),
    })
}

impl ChoiceGame {
    pub fn style(&self) -> ChoiceStyle {
        self.style
    }

    pub fn board(&self) -> &Scoreboard {
        self.deck.board()
    }

    /// The option index picked for `question`, once answered.
    pub fn picked(&self, question: usize) -> Option<usize> {
        self.deck.chosen(question)
    }

    /// Apply an activation; see [`Game::activate`].
    pub fn answer(&mut self, page: &mut dyn Page, activation: &Activation) -> Option<Progress> {
        let questions = &self.questions;
        let theme = &self.theme;
        self.deck.answer(page, activation, theme, |question, choice| {
            let q = &questions[question];
            if choice == q.correct {
                Verdict {
                    correct: true,
                    feedback: theme.correct(),
                }
            } else {
                let answer = q.correct_text().unwrap_or(theme.fallback_answer.as_str());
                Verdict {
                    correct: false,
                    feedback: theme.wrong(&format!("Correct answer: {answer}.")),
                }
            }
        })
    }
}

impl Game for ChoiceGame {
    fn container(&self) -> &str {
        self.deck.container_id()
    }

    fn kind(&self) -> GameKind {
        self.style.kind()
    }

    fn activate(&mut self, page: &mut dyn Page, activation: &Activation) {
        self.answer(page, activation);
    }

    fn score_card(&self) -> ScoreCard {
        self.deck.score_card(&self.kind().to_string())
    }
}
