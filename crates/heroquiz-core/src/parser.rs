//! TOML quiz parser.
//!
//! Loads quiz sets from TOML files and directories, and validates them.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::model::{
    ChecklistItem, ChoiceQuestion, GameContent, GameKind, GameSpec, QuizSet, TrueFalseQuestion,
};

/// Intermediate TOML structure for parsing quiz files.
#[derive(Debug, Deserialize)]
struct TomlQuizFile {
    quiz: TomlQuizHeader,
    #[serde(default)]
    games: Vec<TomlGame>,
}

#[derive(Debug, Deserialize)]
struct TomlQuizHeader {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    theme: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TomlGame {
    kind: String,
    container: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default = "default_true")]
    finish_button: bool,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
    #[serde(default)]
    items: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    q: String,
    #[serde(default)]
    options: Vec<String>,
    a: TomlAnswer,
}

/// `a = true` for true/false, `a = 2` for a choice index.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TomlAnswer {
    Bool(bool),
    Index(i64),
}

fn default_true() -> bool {
    true
}

fn true_false_questions(container: &str, questions: Vec<TomlQuestion>) -> Result<Vec<TrueFalseQuestion>> {
    questions
        .into_iter()
        .enumerate()
        .map(|(i, q)| match q.a {
            TomlAnswer::Bool(answer) => Ok(TrueFalseQuestion::new(q.q, answer)),
            TomlAnswer::Index(_) => bail!(
                "game '{container}' question {}: answer must be true or false",
                i + 1
            ),
        })
        .collect()
}

fn choice_questions(container: &str, questions: Vec<TomlQuestion>) -> Result<Vec<ChoiceQuestion>> {
    questions
        .into_iter()
        .enumerate()
        .map(|(i, q)| match q.a {
            TomlAnswer::Index(idx) => {
                let correct = usize::try_from(idx).with_context(|| {
                    format!("game '{container}' question {}: negative answer index", i + 1)
                })?;
                Ok(ChoiceQuestion::new(q.q, q.options, correct))
            }
            TomlAnswer::Bool(_) => bail!(
                "game '{container}' question {}: answer must be an option index",
                i + 1
            ),
        })
        .collect()
}

/// Fields present in `g` that a game of `kind` never reads.
fn unused_fields(kind: GameKind, g: &TomlGame) -> Vec<String> {
    let mut unused = Vec::new();
    match kind {
        GameKind::Checklist => {
            if !g.questions.is_empty() {
                unused.push("questions".to_string());
            }
        }
        GameKind::TrueFalse | GameKind::MultipleChoice | GameKind::TapQuiz => {
            if !g.items.is_empty() {
                unused.push("items".to_string());
            }
            if kind == GameKind::TrueFalse && g.questions.iter().any(|q| !q.options.is_empty()) {
                unused.push("options".to_string());
            }
        }
    }
    unused
}

fn game_spec(g: TomlGame) -> Result<GameSpec> {
    let kind: GameKind = g.kind.parse().map_err(|e: String| anyhow::anyhow!("{}", e))?;
    let unused_fields = unused_fields(kind, &g);
    let content = match kind {
        GameKind::TrueFalse => GameContent::TrueFalse {
            questions: true_false_questions(&g.container, g.questions)?,
        },
        GameKind::MultipleChoice => GameContent::MultipleChoice {
            questions: choice_questions(&g.container, g.questions)?,
        },
        GameKind::TapQuiz => GameContent::TapQuiz {
            questions: choice_questions(&g.container, g.questions)?,
        },
        GameKind::Checklist => GameContent::Checklist {
            items: g.items.into_iter().map(ChecklistItem::classify).collect(),
        },
    };
    Ok(GameSpec {
        container: g.container,
        title: g.title,
        finish_button: g.finish_button,
        unused_fields,
        content,
    })
}

/// Parse a single TOML file into a `QuizSet`.
pub fn parse_quiz_set(path: &Path) -> Result<QuizSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz file: {}", path.display()))?;

    parse_quiz_set_str(&content, path)
}

/// Parse a TOML string into a `QuizSet` (useful for testing).
pub fn parse_quiz_set_str(content: &str, source_path: &Path) -> Result<QuizSet> {
    let parsed: TomlQuizFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let games = parsed
        .games
        .into_iter()
        .map(game_spec)
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("invalid game in {}", source_path.display()))?;

    Ok(QuizSet {
        id: parsed.quiz.id,
        title: parsed.quiz.title,
        description: parsed.quiz.description,
        theme: parsed.quiz.theme,
        games,
    })
}

/// Recursively load all `.toml` quiz files from a directory.
pub fn load_quiz_directory(dir: &Path) -> Result<Vec<QuizSet>> {
    let mut sets = Vec::new();

    if !dir.is_dir() {
        bail!("not a directory: {}", dir.display());
    }

    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();

    for path in paths {
        if path.is_dir() {
            sets.extend(load_quiz_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_quiz_set(&path) {
                Ok(set) => sets.push(set),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(sets)
}

/// Load a single file or every quiz under a directory.
pub fn load_quizzes(path: &Path) -> Result<Vec<QuizSet>> {
    if path.is_dir() {
        load_quiz_directory(path)
    } else {
        Ok(vec![parse_quiz_set(path)?])
    }
}

/// A warning from quiz validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The game container (if applicable).
    pub container: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn game(container: &str, message: impl Into<String>) -> Self {
        Self {
            container: Some(container.to_string()),
            message: message.into(),
        }
    }
}

fn validate_choices(container: &str, questions: &[ChoiceQuestion], warnings: &mut Vec<ValidationWarning>) {
    for (i, q) in questions.iter().enumerate() {
        let n = i + 1;
        if q.prompt.trim().is_empty() {
            warnings.push(ValidationWarning::game(container, format!("question {n}: prompt is empty")));
        }
        if q.options.len() < 2 {
            warnings.push(ValidationWarning::game(
                container,
                format!("question {n}: fewer than 2 options"),
            ));
        }
        if q.correct_text().is_none() {
            warnings.push(ValidationWarning::game(
                container,
                format!(
                    "question {n}: answer index {} is out of range ({} options)",
                    q.correct,
                    q.options.len()
                ),
            ));
        }
    }
}

/// Validate a quiz set for common issues.
pub fn validate_quiz_set(set: &QuizSet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if set.games.is_empty() {
        warnings.push(ValidationWarning {
            container: None,
            message: "quiz has no games".into(),
        });
    }

    // Check for duplicate containers
    let mut seen = HashSet::new();
    for game in &set.games {
        if !seen.insert(&game.container) {
            warnings.push(ValidationWarning::game(
                &game.container,
                format!("duplicate container: {}", game.container),
            ));
        }
    }

    // Generated ids are `<container>-...`, so `a` and `a-q0` can collide.
    for game in &set.games {
        for other in &set.games {
            if game.container != other.container
                && game
                    .container
                    .strip_prefix(other.container.as_str())
                    .is_some_and(|rest| rest.starts_with('-'))
            {
                warnings.push(ValidationWarning::game(
                    &game.container,
                    format!(
                        "container id may clash with element ids generated for '{}'",
                        other.container
                    ),
                ));
            }
        }
    }

    for game in &set.games {
        let container = game.container.as_str();
        for field in &game.unused_fields {
            warnings.push(ValidationWarning::game(
                container,
                format!("`{field}` is ignored by {} games", game.content.kind()),
            ));
        }
        if game.content.is_empty() {
            warnings.push(ValidationWarning::game(container, "game has nothing to answer"));
        }
        match &game.content {
            GameContent::TrueFalse { questions } => {
                for (i, q) in questions.iter().enumerate() {
                    if q.prompt.trim().is_empty() {
                        warnings.push(ValidationWarning::game(
                            container,
                            format!("question {}: prompt is empty", i + 1),
                        ));
                    }
                }
            }
            GameContent::MultipleChoice { questions } | GameContent::TapQuiz { questions } => {
                validate_choices(container, questions, &mut warnings);
            }
            GameContent::Checklist { items } => {
                if !items.is_empty() && items.iter().all(|i| i.undesirable) {
                    warnings.push(ValidationWarning::game(
                        container,
                        "every item is marked undesirable",
                    ));
                }
                if !game.finish_button {
                    warnings.push(ValidationWarning::game(
                        container,
                        "checklist has no finish button and can never be graded",
                    ));
                }
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[quiz]
id = "hormones"
title = "Hormone Adventure"
description = "Meet the messengers"
theme = "hero"

[[games]]
kind = "true_false"
container = "tfGame"
title = "True or False?"
questions = [
    { q = "Insulin lowers blood sugar.", a = true },
    { q = "Adrenaline makes you sleepy.", a = false },
]

[[games]]
kind = "multiple_choice"
container = "mcGame"
questions = [
    { q = "Which gland makes insulin?", options = ["Thyroid", "Pancreas"], a = 1 },
]

[[games]]
kind = "tap-quiz"
container = "tapGame"
questions = [
    { q = "Sleep hormone?", options = ["Melatonin", "Cortisol"], a = 0 },
]

[[games]]
kind = "checklist"
container = "heroHabits"
items = ["Stay hydrated", "Skip meals (not a hero habit)"]
"#;

    #[test]
    fn parse_valid_toml() {
        let set = parse_quiz_set_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(set.id, "hormones");
        assert_eq!(set.theme.as_deref(), Some("hero"));
        assert_eq!(set.games.len(), 4);
        assert_eq!(set.games[0].title.as_deref(), Some("True or False?"));
        assert_eq!(set.games[2].content.kind(), GameKind::TapQuiz);

        match &set.games[1].content {
            GameContent::MultipleChoice { questions } => {
                assert_eq!(questions[0].correct_text(), Some("Pancreas"));
            }
            other => panic!("unexpected content: {other:?}"),
        }
        match &set.games[3].content {
            GameContent::Checklist { items } => {
                assert!(!items[0].undesirable);
                assert!(items[1].undesirable);
            }
            other => panic!("unexpected content: {other:?}"),
        }
        assert!(set.games[3].finish_button);
        assert!(validate_quiz_set(&set).is_empty());
    }

    #[test]
    fn parse_missing_optional_fields() {
        let toml = r#"
[quiz]
id = "minimal"
title = "Minimal"

[[games]]
kind = "tf"
container = "tf"
"#;
        let set = parse_quiz_set_str(toml, &PathBuf::from("test.toml")).unwrap();
        assert!(set.description.is_empty());
        assert!(set.theme.is_none());
        assert!(set.games[0].content.is_empty());
    }

    #[test]
    fn wrong_answer_type_is_an_error() {
        let toml = r#"
[quiz]
id = "bad"
title = "Bad"

[[games]]
kind = "true_false"
container = "tf"
questions = [{ q = "Is it?", a = 1 }]
"#;
        let err = parse_quiz_set_str(toml, &PathBuf::from("bad.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("true or false"));
    }

    #[test]
    fn negative_index_is_an_error() {
        let toml = r#"
[quiz]
id = "bad"
title = "Bad"

[[games]]
kind = "multiple_choice"
container = "mc"
questions = [{ q = "Pick", options = ["a", "b"], a = -1 }]
"#;
        assert!(parse_quiz_set_str(toml, &PathBuf::from("bad.toml")).is_err());
    }

    #[test]
    fn unknown_kind_is_an_error() {
        let toml = r#"
[quiz]
id = "bad"
title = "Bad"

[[games]]
kind = "crossword"
container = "x"
"#;
        assert!(parse_quiz_set_str(toml, &PathBuf::from("bad.toml")).is_err());
    }

    #[test]
    fn validate_flags_common_mistakes() {
        let toml = r#"
[quiz]
id = "sloppy"
title = "Sloppy"

[[games]]
kind = "multiple_choice"
container = "mc"
questions = [{ q = " ", options = ["only"], a = 3 }]

[[games]]
kind = "checklist"
container = "mc"
finish_button = false
items = ["Skip meals (not a hero habit)"]
"#;
        let set = parse_quiz_set_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_quiz_set(&set);
        let has = |needle: &str| warnings.iter().any(|w| w.message.contains(needle));
        assert!(has("duplicate container"));
        assert!(has("prompt is empty"));
        assert!(has("fewer than 2 options"));
        assert!(has("out of range"));
        assert!(has("undesirable"));
        assert!(has("no finish button"));
    }

    #[test]
    fn validate_flags_fields_the_kind_ignores() {
        let toml = r#"
[quiz]
id = "mixed"
title = "Mixed up"

[[games]]
kind = "checklist"
container = "habits"
questions = [{ q = "Hydrated?", a = true }]

[[games]]
kind = "true_false"
container = "tf"
items = ["Stay hydrated"]
questions = [{ q = "Is it?", options = ["yes", "no"], a = true }]
"#;
        let set = parse_quiz_set_str(toml, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(set.games[0].unused_fields, ["questions"]);
        assert_eq!(set.games[1].unused_fields, ["items", "options"]);

        let warnings = validate_quiz_set(&set);
        let messages: Vec<_> = warnings
            .iter()
            .map(|w| (w.container.as_deref().unwrap(), w.message.as_str()))
            .collect();
        assert!(messages.contains(&("habits", "`questions` is ignored by checklist games")));
        assert!(messages.contains(&("tf", "`items` is ignored by true_false games")));
        assert!(messages.contains(&("tf", "`options` is ignored by true_false games")));
        assert!(messages.contains(&("habits", "game has nothing to answer")));
    }

    #[test]
    fn validate_flags_container_prefix_clash() {
        let toml = r#"
[quiz]
id = "clash"
title = "Clash"

[[games]]
kind = "true_false"
container = "a"
questions = [{ q = "Is it?", a = true }]

[[games]]
kind = "true_false"
container = "a-q0"
questions = [{ q = "Is it?", a = false }]

[[games]]
kind = "true_false"
container = "ab"
questions = [{ q = "Is it?", a = false }]
"#;
        let set = parse_quiz_set_str(toml, &PathBuf::from("test.toml")).unwrap();
        let clashes: Vec<_> = validate_quiz_set(&set)
            .into_iter()
            .filter(|w| w.message.contains("clash"))
            .collect();
        assert_eq!(clashes.len(), 1);
        assert_eq!(clashes[0].container.as_deref(), Some("a-q0"));
        assert!(clashes[0].message.contains("'a'"));
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        let result = parse_quiz_set_str(bad, &PathBuf::from("bad.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn load_directory_skips_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("good.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("bad.toml"), "nope = [").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let sets = load_quiz_directory(dir.path()).unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].id, "hormones");

        let single = load_quizzes(&dir.path().join("good.toml")).unwrap();
        assert_eq!(single.len(), 1);
    }
}
