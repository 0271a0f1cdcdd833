//! Core data model types for heroquiz.
//!
//! Questions, checklist items, and the quiz sets that group several widgets
//! onto one page.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Marker that classifies a checklist item as undesirable (any case).
pub const UNDESIRABLE_MARKER: &str = "(not a hero habit)";

/// A true/false question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrueFalseQuestion {
    pub prompt: String,
    pub answer: bool,
}

impl TrueFalseQuestion {
    pub fn new(prompt: impl Into<String>, answer: bool) -> Self {
        Self {
            prompt: prompt.into(),
            answer,
        }
    }
}

/// A multiple-choice or tap-quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceQuestion {
    pub prompt: String,
    pub options: Vec<String>,
    /// Index of the correct option. Not guaranteed to be in range.
    pub correct: usize,
}

impl ChoiceQuestion {
    pub fn new<I, S>(prompt: impl Into<String>, options: I, correct: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prompt: prompt.into(),
            options: options.into_iter().map(Into::into).collect(),
            correct,
        }
    }

    /// Text of the correct option, if the index points at one.
    pub fn correct_text(&self) -> Option<&str> {
        self.options.get(self.correct).map(String::as_str)
    }
}

/// A checklist entry with its derived classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub text: String,
    pub undesirable: bool,
}

impl ChecklistItem {
    /// Classify `text` by looking for [`UNDESIRABLE_MARKER`].
    pub fn classify(text: impl Into<String>) -> Self {
        let text = text.into();
        let undesirable = text.to_lowercase().contains(UNDESIRABLE_MARKER);
        Self { text, undesirable }
    }

    /// The checked state a correct response leaves this item in.
    pub fn should_check(&self) -> bool {
        !self.undesirable
    }
}

/// Supported widget kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    TrueFalse,
    MultipleChoice,
    TapQuiz,
    Checklist,
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameKind::TrueFalse => write!(f, "true_false"),
            GameKind::MultipleChoice => write!(f, "multiple_choice"),
            GameKind::TapQuiz => write!(f, "tap_quiz"),
            GameKind::Checklist => write!(f, "checklist"),
        }
    }
}

impl FromStr for GameKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "true_false" | "tf" => Ok(GameKind::TrueFalse),
            "multiple_choice" | "mc" => Ok(GameKind::MultipleChoice),
            "tap_quiz" | "tap" => Ok(GameKind::TapQuiz),
            "checklist" => Ok(GameKind::Checklist),
            other => Err(format!("unknown game kind: {other}")),
        }
    }
}

/// The questions or items of one widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameContent {
    TrueFalse { questions: Vec<TrueFalseQuestion> },
    MultipleChoice { questions: Vec<ChoiceQuestion> },
    TapQuiz { questions: Vec<ChoiceQuestion> },
    Checklist { items: Vec<ChecklistItem> },
}

impl GameContent {
    pub fn kind(&self) -> GameKind {
        match self {
            GameContent::TrueFalse { .. } => GameKind::TrueFalse,
            GameContent::MultipleChoice { .. } => GameKind::MultipleChoice,
            GameContent::TapQuiz { .. } => GameKind::TapQuiz,
            GameContent::Checklist { .. } => GameKind::Checklist,
        }
    }

    /// Number of gradable units.
    pub fn len(&self) -> usize {
        match self {
            GameContent::TrueFalse { questions } => questions.len(),
            GameContent::MultipleChoice { questions } | GameContent::TapQuiz { questions } => {
                questions.len()
            }
            GameContent::Checklist { items } => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One widget placed on a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSpec {
    /// Id of the root element hosting the widget.
    pub container: String,
    /// Optional heading shown above the widget.
    #[serde(default)]
    pub title: Option<String>,
    /// Whether the page carries a finish control (checklists only).
    #[serde(default = "default_true")]
    pub finish_button: bool,
    /// Fields from the quiz file that this kind of game has no use for.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unused_fields: Vec<String>,
    pub content: GameContent,
}

fn default_true() -> bool {
    true
}

/// A page's worth of widgets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSet {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Theme preset requested by the quiz file.
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub games: Vec<GameSpec>,
}

impl QuizSet {
    pub fn game(&self, container: &str) -> Option<&GameSpec> {
        self.games.iter().find(|g| g.container == container)
    }
}
