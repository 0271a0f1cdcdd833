//! Question cards shared by the true/false and choice widgets.
//!
//! A deck renders one card per question, each with N exclusive controls,
//! and runs the `Unanswered -> Answered` lock for every card.

use crate::container::{Container, Mode};
use crate::markup::{Element, Node};
use crate::score::{Progress, ScoreCard, Scoreboard};
use crate::theme::Theme;
use crate::traits::{Action, Activation, ElementRef, Listener, Page};

use super::{card_id, control_id, feedback_id, report};

/// One control of a card, before rendering.
pub(crate) struct ControlSpec {
    pub label: String,
    pub class: &'static str,
    pub data: (&'static str, String),
}

/// One card, before rendering.
pub(crate) struct CardSpec {
    pub prompt: String,
    /// Classes of the control row.
    pub layout: &'static str,
    pub controls: Vec<ControlSpec>,
}

/// Outcome of grading one answer.
pub(crate) struct Verdict {
    pub correct: bool,
    pub feedback: String,
}

#[derive(Debug)]
struct Card {
    card: Option<ElementRef>,
    controls: Vec<ElementRef>,
    feedback: Option<ElementRef>,
    chosen: Option<usize>,
}

#[derive(Debug)]
pub(crate) struct Deck {
    container_id: String,
    root: ElementRef,
    cards: Vec<Card>,
    board: Scoreboard,
}

fn card_markup(container_id: &str, question: usize, spec: &CardSpec) -> Node {
    let controls = spec.controls.iter().enumerate().map(|(i, c)| {
        Element::new("button")
            .id(control_id(container_id, question, i))
            .class("btn")
            .class(c.class)
            .attr("type", "button")
            .attr(c.data.0, c.data.1.clone())
            .text(c.label.clone())
    });

    Element::new("div")
        .id(card_id(container_id, question))
        .class("qCard")
        .attr("data-answered", "false")
        .child(
            Element::new("div")
                .class("qTitle")
                .child(Element::new("strong").text(format!("Q{}.", question + 1)))
                .text(format!(" {}", spec.prompt)),
        )
        .child(Element::new("div").class(spec.layout).children(controls))
        .child(
            Element::new("div")
                .id(feedback_id(container_id, question))
                .class("small feedback"),
        )
        .into()
}

impl Deck {
    /// Render every card into the output region and register listeners.
    pub fn mount(
        page: &mut dyn Page,
        container_id: &str,
        container: Container,
        specs: &[CardSpec],
    ) -> Self {
        let list = Element::new("div").class("qList").children(
            specs
                .iter()
                .enumerate()
                .map(|(idx, spec)| card_markup(container_id, idx, spec)),
        );
        page.inject(container.out, vec![list.into()]);

        let cards = specs
            .iter()
            .enumerate()
            .map(|(idx, spec)| {
                let controls: Vec<ElementRef> = (0..spec.controls.len())
                    .filter_map(|i| page.element_by_id(&control_id(container_id, idx, i)))
                    .collect();
                for control in &controls {
                    page.listen(
                        *control,
                        Listener {
                            widget: container_id.to_string(),
                            action: Action::Answer { question: idx },
                        },
                    );
                }
                Card {
                    card: page.element_by_id(&card_id(container_id, idx)),
                    controls,
                    feedback: page.element_by_id(&feedback_id(container_id, idx)),
                    chosen: None,
                }
            })
            .collect();

        tracing::debug!(
            "mounted {} question card(s) into '{}'",
            specs.len(),
            container_id
        );

        Self {
            container_id: container_id.to_string(),
            root: container.root,
            cards,
            board: Scoreboard::new(specs.len()),
        }
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    pub fn root(&self) -> ElementRef {
        self.root
    }

    pub fn board(&self) -> &Scoreboard {
        &self.board
    }

    /// The control index chosen for `question`, once answered.
    pub fn chosen(&self, question: usize) -> Option<usize> {
        self.cards.get(question).and_then(|c| c.chosen)
    }

    /// Apply an activation: grade it, lock the card, and report.
    ///
    /// Returns `None` for activations that change nothing: unknown
    /// controls, finish actions, or questions that are already answered.
    pub fn answer<F>(
        &mut self,
        page: &mut dyn Page,
        activation: &Activation,
        theme: &Theme,
        grade: F,
    ) -> Option<Progress>
    where
        F: FnOnce(usize, usize) -> Verdict,
    {
        let Action::Answer { question } = activation.action else {
            return None;
        };
        let card = self.cards.get_mut(question)?;
        let Some(choice) = card.controls.iter().position(|c| *c == activation.control) else {
            tracing::debug!(
                "'{}': control {:?} does not belong to question {}",
                self.container_id,
                activation.control,
                question
            );
            return None;
        };
        if self.board.is_answered(question) {
            return None;
        }

        let verdict = grade(question, choice);
        let progress = self.board.record(question, verdict.correct)?;
        card.chosen = Some(choice);

        if let Some(el) = card.card {
            page.set_attr(el, "data-answered", "true");
        }
        if let Some(el) = card.feedback {
            page.set_text(el, &verdict.feedback);
        }
        for control in &card.controls {
            page.set_disabled(*control, true);
        }

        let (message, mode) = match progress {
            Progress::Partial { answered, total } => {
                (format!("Progress: {answered}/{total}"), Mode::Info)
            }
            Progress::Complete { correct, total } => {
                (theme.hearted(&format!("Score: {correct}/{total}")), Mode::Ok)
            }
        };
        report(page, &self.container_id, self.root, &message, mode);
        Some(progress)
    }

    pub fn score_card(&self, kind: &str) -> ScoreCard {
        ScoreCard {
            widget: self.container_id.clone(),
            kind: kind.to_string(),
            total: self.board.total(),
            answered: self.board.answered(),
            correct: self.board.correct(),
            percent: self.board.percent(),
            finished: self.board.is_complete() && self.board.total() > 0,
        }
    }
}
