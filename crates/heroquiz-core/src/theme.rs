//! Presentation copy shared by every widget.
//!
//! Two presets exist: `hero` (emoji marks, the default) and `classic`
//! (plain text). Config files may override individual strings.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::score::Tier;

/// Icons and wording used in markup and status messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Preset name this theme was derived from.
    pub name: String,
    /// Prefix for a correct answer, e.g. "✅".
    pub correct_mark: String,
    /// Prefix for a wrong answer, e.g. "❌".
    pub wrong_mark: String,
    /// Suffix for scores and start prompts, e.g. "💗".
    pub heart: String,
    /// Suffix for encouragement, e.g. "✨".
    pub sparkle: String,
    pub true_label: String,
    pub false_label: String,
    /// Used when a question's correct option cannot be named.
    pub fallback_answer: String,
    pub tiers: TierCopy,
}

/// One message per checklist score band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierCopy {
    pub legendary: String,
    pub strong: String,
    pub nice: String,
    pub learning: String,
}

impl Default for TierCopy {
    fn default() -> Self {
        Self {
            legendary: "LEGENDARY HERO!".into(),
            strong: "Super strong hero!".into(),
            nice: "Nice! Keep going!".into(),
            learning: "You’re learning! Try again".into(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::hero()
    }
}

impl Theme {
    pub fn hero() -> Self {
        Self {
            name: "hero".into(),
            correct_mark: "✅".into(),
            wrong_mark: "❌".into(),
            heart: "💗".into(),
            sparkle: "✨".into(),
            true_label: "True".into(),
            false_label: "False".into(),
            fallback_answer: "the correct answer".into(),
            tiers: TierCopy::default(),
        }
    }

    pub fn classic() -> Self {
        Self {
            name: "classic".into(),
            correct_mark: String::new(),
            wrong_mark: String::new(),
            heart: String::new(),
            sparkle: String::new(),
            ..Self::hero()
        }
    }

    /// Names of the built-in presets.
    pub fn presets() -> &'static [&'static str] {
        &["hero", "classic"]
    }

    pub fn bool_label(&self, value: bool) -> &str {
        if value {
            &self.true_label
        } else {
            &self.false_label
        }
    }

    pub fn tier_message(&self, tier: Tier) -> String {
        match tier {
            Tier::Legendary => self.tiers.legendary.clone(),
            Tier::Strong => self.tiers.strong.clone(),
            Tier::Nice => self.tiers.nice.clone(),
            Tier::Learning => with_suffix(&self.tiers.learning, &self.sparkle),
        }
    }

    pub fn correct(&self) -> String {
        with_prefix(&self.correct_mark, "Correct!")
    }

    pub fn wrong(&self, detail: &str) -> String {
        with_prefix(&self.wrong_mark, &format!("Not quite. {detail}"))
    }

    /// `text` followed by the heart, when the theme has one.
    pub fn hearted(&self, text: &str) -> String {
        with_suffix(text, &self.heart)
    }

    pub fn sparkled(&self, text: &str) -> String {
        with_suffix(text, &self.sparkle)
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hero" => Ok(Theme::hero()),
            "classic" | "plain" => Ok(Theme::classic()),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

fn with_prefix(mark: &str, text: &str) -> String {
    if mark.is_empty() {
        text.to_string()
    } else {
        format!("{mark} {text}")
    }
}

fn with_suffix(text: &str, mark: &str) -> String {
    if mark.is_empty() {
        text.to_string()
    } else {
        format!("{text} {mark}")
    }
}
