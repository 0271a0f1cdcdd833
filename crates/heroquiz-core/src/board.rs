//! Board: a page plus every widget mounted on it.
//!
//! The board owns the page and routes each activation to the widget that
//! registered the control. Widgets never see each other.

use std::collections::BTreeMap;

use crate::error::StructureError;
use crate::model::{GameSpec, QuizSet};
use crate::page::MemoryPage;
use crate::score::ScoreCard;
use crate::theme::Theme;
use crate::traits::{Activation, Page};
use crate::widget::{self, Game};

/// Progress reporting hook for board activity.
pub trait BoardObserver {
    fn on_mount(&self, container: &str, kind: &str, units: usize);
    fn on_skip(&self, error: &StructureError);
    fn on_activation(&self, activation: &Activation, card: &ScoreCard);
}

/// Observer that ignores everything.
pub struct NoopObserver;

impl BoardObserver for NoopObserver {
    fn on_mount(&self, _: &str, _: &str, _: usize) {}
    fn on_skip(&self, _: &StructureError) {}
    fn on_activation(&self, _: &Activation, _: &ScoreCard) {}
}

/// Observer that reports through `tracing`.
pub struct LogObserver;

impl BoardObserver for LogObserver {
    fn on_mount(&self, container: &str, kind: &str, units: usize) {
        tracing::info!("mounted {kind} '{container}' ({units} to answer)");
    }

    fn on_skip(&self, error: &StructureError) {
        tracing::debug!("skipped: {error}");
    }

    fn on_activation(&self, activation: &Activation, card: &ScoreCard) {
        tracing::debug!(
            "'{}' {:?}: {}/{} answered, {} correct",
            activation.widget,
            activation.action,
            card.answered,
            card.total,
            card.correct
        );
    }
}

/// Owns a page and the widgets mounted on it.
pub struct Board<P: Page> {
    page: P,
    games: BTreeMap<String, Box<dyn Game>>,
    theme: Theme,
}

impl<P: Page> Board<P> {
    pub fn new(page: P, theme: Theme) -> Self {
        Self {
            page,
            games: BTreeMap::new(),
            theme,
        }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Mount one widget. Re-mounting a container replaces its widget and
    /// resets its score.
    pub fn mount(&mut self, spec: &GameSpec) -> Result<(), StructureError> {
        let game = widget::setup(&mut self.page, spec, &self.theme)?;
        self.games.insert(spec.container.clone(), game);
        Ok(())
    }

    /// Mount every widget of `quiz`, skipping the ones whose structure is
    /// missing. Returns how many were mounted.
    pub fn mount_all(&mut self, quiz: &QuizSet, observer: &dyn BoardObserver) -> usize {
        let mut mounted = 0;
        for spec in &quiz.games {
            match self.mount(spec) {
                Ok(()) => {
                    observer.on_mount(
                        &spec.container,
                        &spec.content.kind().to_string(),
                        spec.content.len(),
                    );
                    mounted += 1;
                }
                Err(e) => observer.on_skip(&e),
            }
        }
        mounted
    }

    pub fn game(&self, container: &str) -> Option<&dyn Game> {
        self.games.get(container).map(|g| g.as_ref())
    }

    /// Deliver `activation` to its owning widget.
    pub fn dispatch(&mut self, activation: &Activation, observer: &dyn BoardObserver) {
        let Some(game) = self.games.get_mut(&activation.widget) else {
            tracing::debug!("no widget mounted as '{}'", activation.widget);
            return;
        };
        game.activate(&mut self.page, activation);
        observer.on_activation(activation, &game.score_card());
    }

    /// Score cards in container order.
    pub fn score_cards(&self) -> Vec<ScoreCard> {
        self.games.values().map(|g| g.score_card()).collect()
    }
}

impl Board<MemoryPage> {
    /// Build an in-memory board laid out for `quiz` and mount its widgets.
    pub fn for_quiz(quiz: &QuizSet, theme: Theme, observer: &dyn BoardObserver) -> Self {
        let page = MemoryPage::from_markup(crate::layout::quiz_skeleton(quiz));
        let mut board = Board::new(page, theme);
        board.mount_all(quiz, observer);
        board
    }

    /// Click the element with `id` and dispatch the resulting activations.
    /// Returns how many activations were delivered.
    pub fn click(&mut self, id: &str, observer: &dyn BoardObserver) -> usize {
        let activations = self.page.click_id(id);
        self.deliver(activations, observer)
    }

    /// Activate the finish control of `container`, if it has one.
    pub fn press_finish(&mut self, container: &str, observer: &dyn BoardObserver) -> usize {
        let Some(button) = self
            .page
            .element_by_id(container)
            .and_then(|root| self.page.find_by_class(root, crate::container::FINISH_CLASS))
        else {
            tracing::debug!("'{container}' has no finish control");
            return 0;
        };
        let activations = self.page.click(button);
        self.deliver(activations, observer)
    }

    fn deliver(&mut self, activations: Vec<Activation>, observer: &dyn BoardObserver) -> usize {
        for activation in &activations {
            self.dispatch(activation, observer);
        }
        activations.len()
    }

    /// Text of the `.result` region of `container`.
    pub fn status(&self, container: &str) -> Option<String> {
        let root = self.page.element_by_id(container)?;
        let el = self
            .page
            .find_by_class(root, crate::container::RESULT_CLASS)?;
        Some(self.page.text_content(el))
    }

    /// Serialized page body.
    pub fn to_html(&self) -> String {
        self.page.to_html()
    }
}
