//! The `heroquiz render` command.

use std::path::PathBuf;

use anyhow::Result;

use heroquiz_core::config::load_config_from;
use heroquiz_core::parser;
use heroquiz_html::{page_path, write_page};

pub fn execute(
    quiz_path: PathBuf,
    output: Option<PathBuf>,
    theme: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let output = output.unwrap_or_else(|| config.output_dir.clone());

    let sets = parser::load_quizzes(&quiz_path)?;
    anyhow::ensure!(!sets.is_empty(), "no quiz files found in {}", quiz_path.display());

    let mut rows = Vec::new();
    for quiz in &sets {
        let theme = config.theme_for(theme.as_deref(), quiz)?;
        let path = page_path(&output, quiz);
        write_page(quiz, &theme, &path)?;
        tracing::debug!("rendered '{}' with theme {}", quiz.id, theme.name);
        rows.push((quiz.title.clone(), quiz.games.len(), theme.name, path));
    }

    print_summary(&rows);
    Ok(())
}

fn print_summary(rows: &[(String, usize, String, PathBuf)]) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Quiz", "Games", "Theme", "Page"]);

    for (title, games, theme, path) in rows {
        table.add_row(vec![
            Cell::new(title),
            Cell::new(games),
            Cell::new(theme),
            Cell::new(path.display()),
        ]);
    }

    println!("{table}");
}
