//! Tool configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::QuizSet;
use crate::theme::Theme;

/// Environment variable that overrides the configured theme.
pub const THEME_ENV: &str = "HEROQUIZ_THEME";

/// Top-level heroquiz configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroquizConfig {
    /// Theme used when neither the command line nor the quiz names one.
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Output directory for rendered pages.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Custom themes keyed by name. Unset strings fall back to the hero preset.
    #[serde(default)]
    pub themes: BTreeMap<String, Theme>,
    /// Theme forced from the environment; outranks the quiz file.
    #[serde(skip)]
    pub theme_override: Option<String>,
}

fn default_theme() -> String {
    "hero".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./heroquiz-out")
}

impl Default for HeroquizConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            output_dir: default_output_dir(),
            themes: BTreeMap::new(),
            theme_override: None,
        }
    }
}

impl HeroquizConfig {
    /// Look up a theme by name: custom themes first, then the presets.
    pub fn theme_named(&self, name: &str) -> Result<Theme> {
        if let Some(theme) = self.themes.get(name) {
            return Ok(theme.clone());
        }
        name.parse::<Theme>().map_err(|e| {
            let mut known: Vec<&str> = Theme::presets().to_vec();
            known.extend(self.themes.keys().map(String::as_str));
            anyhow::anyhow!("{e} (known: {})", known.join(", "))
        })
    }

    /// Pick the theme for `quiz`: an explicit name wins, then
    /// `HEROQUIZ_THEME`, then the quiz's own choice, then the configured
    /// default.
    pub fn theme_for(&self, explicit: Option<&str>, quiz: &QuizSet) -> Result<Theme> {
        let name = explicit
            .or(self.theme_override.as_deref())
            .or(quiz.theme.as_deref())
            .unwrap_or(self.theme.as_str());
        self.theme_named(name)
            .with_context(|| format!("cannot theme quiz '{}'", quiz.id))
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `heroquiz.toml` in the current directory
/// 2. `~/.config/heroquiz/config.toml`
///
/// Environment variable override: `HEROQUIZ_THEME`.
pub fn load_config() -> Result<HeroquizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<HeroquizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("heroquiz.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => HeroquizConfig::default(),
    };

    if let Ok(theme) = std::env::var(THEME_ENV) {
        let theme = theme.trim();
        if !theme.is_empty() {
            tracing::debug!("{THEME_ENV} forces theme {theme}");
            config.theme_override = Some(theme.to_string());
        }
    }

    Ok(config)
}

/// Parse a config document. Custom themes take their table name.
pub fn parse_config_str(content: &str) -> Result<HeroquizConfig> {
    let mut config: HeroquizConfig = toml::from_str(content)?;
    for (name, theme) in config.themes.iter_mut() {
        theme.name = name.clone();
    }
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("heroquiz"))
}
