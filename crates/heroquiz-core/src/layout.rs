//! Host markup for a quiz set.
//!
//! Each game gets a `<section>` carrying the container id, with an output
//! region, an optional finish control and a result region: exactly the
//! structure the widgets resolve at setup.

use crate::container::{FINISH_CLASS, OUTPUT_CLASS, RESULT_CLASS};
use crate::markup::{Element, Node};
use crate::model::{GameKind, GameSpec, QuizSet};

/// Label of the checklist finish control.
pub const FINISH_LABEL: &str = "Check my hero score";

/// Skeleton for one game.
pub fn game_skeleton(spec: &GameSpec) -> Element {
    let mut section = Element::new("section")
        .id(spec.container.clone())
        .class("card")
        .attr("data-kind", spec.content.kind().to_string());
    if let Some(title) = &spec.title {
        section = section.child(Element::new("h2").text(title.clone()));
    }
    section = section.child(Element::new("div").class(OUTPUT_CLASS));
    if spec.content.kind() == GameKind::Checklist && spec.finish_button {
        section = section.child(
            Element::new("button")
                .class("btn")
                .class(FINISH_CLASS)
                .attr("type", "button")
                .text(FINISH_LABEL),
        );
    }
    section.child(Element::new("div").class(RESULT_CLASS).class("small"))
}

/// Skeleton for a whole quiz set: a header followed by one section per game.
pub fn quiz_skeleton(quiz: &QuizSet) -> Vec<Node> {
    let mut header = Element::new("header").child(Element::new("h1").text(quiz.title.clone()));
    if !quiz.description.is_empty() {
        header = header.child(Element::new("p").class("small").text(quiz.description.clone()));
    }
    let mut nodes: Vec<Node> = vec![header.into()];
    nodes.extend(quiz.games.iter().map(|g| Node::from(game_skeleton(g))));
    nodes
}
