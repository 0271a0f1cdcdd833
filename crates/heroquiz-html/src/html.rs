//! HTML preview generator.
//!
//! Mounts every widget of a quiz set onto an in-memory page and writes the
//! result as a self-contained HTML file with the CSS inlined.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

use heroquiz_core::board::{Board, LogObserver};
use heroquiz_core::model::QuizSet;
use heroquiz_core::sanitize::escape_html;
use heroquiz_core::Theme;

/// Generate a preview page for `quiz`, stamped with the current time.
pub fn generate_page(quiz: &QuizSet, theme: &Theme) -> String {
    generate_page_at(quiz, theme, Utc::now())
}

/// Generate a preview page for `quiz` with an explicit timestamp.
pub fn generate_page_at(quiz: &QuizSet, theme: &Theme, generated_at: DateTime<Utc>) -> String {
    let board = Board::for_quiz(quiz, theme.clone(), &LogObserver);
    let mounted = board.score_cards().len();
    if mounted < quiz.games.len() {
        tracing::warn!(
            "quiz '{}': {} of {} games could not be mounted",
            quiz.id,
            quiz.games.len() - mounted,
            quiz.games.len()
        );
    }

    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape_html(&quiz.title)));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n");
    html.push_str(&format!(
        "<body data-quiz=\"{}\" data-theme=\"{}\">\n",
        escape_html(&quiz.id),
        escape_html(&theme.name)
    ));

    html.push_str("<main>\n");
    html.push_str(&board.to_html());
    html.push_str("\n</main>\n");

    html.push_str(&format!(
        "<footer class=\"small\">{} game(s) | theme {} | generated {}</footer>\n",
        mounted,
        escape_html(&theme.name),
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    html.push_str("</body>\n</html>");
    html
}

/// Write a preview page to a file.
pub fn write_page(quiz: &QuizSet, theme: &Theme, path: &Path) -> Result<()> {
    let html = generate_page(quiz, theme);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, html).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// File name used for a quiz preview inside `output_dir`.
pub fn page_path(output_dir: &Path, quiz: &QuizSet) -> PathBuf {
    let stem: String = quiz
        .id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    output_dir.join(format!("{stem}.html"))
}

const CSS: &str = r#"
:root { --bg: #fff7fb; --fg: #2d1b2e; --card: #ffffff; --border: #f3c4dc; --ok: #dcfce7; --bad: #fde2e2; --info: #eef2ff; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #1f1320; --fg: #fbeff6; --card: #2b1a2c; --border: #5b3553; --ok: #064e3b; --bad: #7f1d1d; --info: #312e81; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
main { max-width: 48rem; margin: 0 auto; }
.card { background: var(--card); border: 1px solid var(--border); border-radius: 16px; padding: 1rem 1.5rem; margin: 1.5rem 0; }
.small { font-size: 0.9rem; }
.qCard { border-top: 1px dashed var(--border); padding: 0.75rem 0; }
.qTitle { margin-bottom: 0.5rem; }
.qBtns { display: flex; gap: 0.5rem; flex-wrap: wrap; }
.qBtns-list { flex-direction: column; align-items: flex-start; }
.qBtns-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(10rem, 1fr)); }
.btn { border: 1px solid var(--border); border-radius: 999px; background: var(--card); color: inherit; padding: 0.4rem 1rem; cursor: pointer; }
.btn:disabled { opacity: 0.6; cursor: default; }
.checkRow { display: flex; gap: 0.5rem; align-items: center; padding: 0.25rem 0; }
.result { margin-top: 1rem; padding: 0.5rem 0.75rem; border-radius: 8px; }
.result.ok { background: var(--ok); }
.result.bad { background: var(--bad); }
.result.info { background: var(--info); }
footer { text-align: center; opacity: 0.7; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use heroquiz_core::model::{
        ChecklistItem, ChoiceQuestion, GameContent, GameSpec, TrueFalseQuestion,
    };

    fn make_test_quiz() -> QuizSet {
        QuizSet {
            id: "hormones".into(),
            title: "Hormone <Adventure>".into(),
            description: "Meet the messengers".into(),
            theme: None,
            games: vec![
                GameSpec {
                    container: "tfGame".into(),
                    title: Some("True or False?".into()),
                    finish_button: true,
                    unused_fields: Vec::new(),
                    content: GameContent::TrueFalse {
                        questions: vec![TrueFalseQuestion::new("Insulin lowers blood sugar.", true)],
                    },
                },
                GameSpec {
                    container: "tapGame".into(),
                    title: None,
                    finish_button: true,
                    unused_fields: Vec::new(),
                    content: GameContent::TapQuiz {
                        questions: vec![ChoiceQuestion::new(
                            "Sleep hormone?",
                            ["Melatonin", "<b>Cortisol</b>"],
                            0,
                        )],
                    },
                },
                GameSpec {
                    container: "heroHabits".into(),
                    title: Some("Hero Habits".into()),
                    finish_button: true,
                    unused_fields: Vec::new(),
                    content: GameContent::Checklist {
                        items: vec![
                            ChecklistItem::classify("Stay hydrated"),
                            ChecklistItem::classify("Skip meals (not a hero habit)"),
                        ],
                    },
                },
            ],
        }
    }

    #[test]
    fn generate_page_contains_widgets() {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let html = generate_page_at(&make_test_quiz(), &Theme::hero(), at);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Hormone &lt;Adventure&gt;</title>"));
        assert!(html.contains("Click True/False to start 💗"));
        assert!(html.contains("Tap an answer to start 💗"));
        assert!(html.contains("Check the habits, then click the button ✨"));
        assert!(html.contains(r#"id="heroHabits-item1""#));
        assert!(html.contains("&lt;b&gt;Cortisol&lt;/b&gt;"));
        assert!(html.contains("3 game(s)"));
        assert!(html.contains("generated 2026-03-01 12:00:00 UTC"));
        assert!(html.contains("</html>"));
    }

    #[test]
    fn classic_theme_drops_emoji() {
        let html = generate_page(&make_test_quiz(), &Theme::classic());
        assert!(html.contains("Click True/False to start<"));
        assert!(!html.contains('💗'));
        assert!(html.contains(r#"data-theme="classic""#));
    }

    #[test]
    fn write_page_creates_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let quiz = make_test_quiz();
        let path = page_path(&dir.path().join("nested").join("out"), &quiz);
        write_page(&quiz, &Theme::hero(), &path).unwrap();
        assert!(path.ends_with("hormones.html"));
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Hormone"));
    }

    #[test]
    fn page_path_sanitizes_id() {
        let mut quiz = make_test_quiz();
        quiz.id = "../week 1".into();
        let path = page_path(Path::new("out"), &quiz);
        assert_eq!(path, PathBuf::from("out/___week_1.html"));
    }
}
