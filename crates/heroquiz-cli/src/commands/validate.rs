//! The `heroquiz validate` command.

use std::path::PathBuf;

use anyhow::Result;

use heroquiz_core::parser;

pub fn execute(quiz_path: PathBuf) -> Result<()> {
    let sets = parser::load_quizzes(&quiz_path)?;
    anyhow::ensure!(!sets.is_empty(), "no quiz files found in {}", quiz_path.display());

    let mut total_warnings = 0;

    for set in &sets {
        println!("Quiz: {} ({} games)", set.title, set.games.len());

        let warnings = parser::validate_quiz_set(set);
        for w in &warnings {
            let prefix = w
                .container
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All quizzes valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
