//! The `heroquiz play` command.
//!
//! Mounts the quiz on an in-memory page and drives it from stdin: `t`/`f`
//! for true/false, a 1-based option number for choice questions, and a
//! comma-separated list of item numbers for checklists.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use heroquiz_core::board::{Board, LogObserver};
use heroquiz_core::config::load_config_from;
use heroquiz_core::model::{GameContent, GameSpec, QuizSet};
use heroquiz_core::page::MemoryPage;
use heroquiz_core::parser;
use heroquiz_core::score::ScoreCard;
use heroquiz_core::widget::{control_id, feedback_id, item_id};

/// Final output of `play --json`.
#[derive(Debug, Serialize)]
struct PlayReport<'a> {
    quiz: &'a str,
    theme: &'a str,
    games: Vec<ScoreCard>,
}

pub fn execute(
    quiz_path: PathBuf,
    game: Option<String>,
    theme: Option<String>,
    json: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let quiz = parser::parse_quiz_set(&quiz_path)?;
    let theme = config.theme_for(theme.as_deref(), &quiz)?;
    let theme_name = theme.name.clone();

    let mut board = Board::for_quiz(&quiz, theme, &LogObserver);
    let selected = select_games(&quiz, game.as_deref())?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    if json {
        let mut ui = io::stderr();
        play(&mut board, &selected, &mut input, &mut ui)?;
    } else {
        let mut ui = io::stdout();
        play(&mut board, &selected, &mut input, &mut ui)?;
    }

    let cards: Vec<ScoreCard> = board
        .score_cards()
        .into_iter()
        .filter(|c| selected.iter().any(|g| g.container == c.widget))
        .collect();

    if json {
        let report = PlayReport {
            quiz: &quiz.id,
            theme: &theme_name,
            games: cards,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&cards);
    }

    Ok(())
}

fn select_games<'a>(quiz: &'a QuizSet, only: Option<&str>) -> Result<Vec<&'a GameSpec>> {
    match only {
        Some(container) => {
            let spec = quiz.game(container).with_context(|| {
                let known: Vec<&str> = quiz.games.iter().map(|g| g.container.as_str()).collect();
                format!(
                    "quiz '{}' has no game '{container}' (games: {})",
                    quiz.id,
                    known.join(", ")
                )
            })?;
            Ok(vec![spec])
        }
        None => Ok(quiz.games.iter().collect()),
    }
}

/// Reads one answer line; `None` once input is exhausted.
fn next_line(input: &mut dyn BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    let read = input.read_line(&mut line).context("failed to read answer")?;
    Ok((read > 0).then(|| line.trim().to_string()))
}

/// Play `games` in order. Stops early when input runs out.
fn play(
    board: &mut Board<MemoryPage>,
    games: &[&GameSpec],
    input: &mut dyn BufRead,
    ui: &mut dyn Write,
) -> Result<()> {
    for spec in games {
        if board.game(&spec.container).is_none() {
            writeln!(ui, "Skipping '{}': it could not be mounted.", spec.container)?;
            continue;
        }

        let heading = spec.title.as_deref().unwrap_or(&spec.container);
        writeln!(ui, "\n== {heading} ({}) ==", spec.content.kind())?;
        if let Some(status) = board.status(&spec.container) {
            writeln!(ui, "{status}")?;
        }

        let finished = match &spec.content {
            GameContent::TrueFalse { questions } => {
                let mut done = true;
                for (i, q) in questions.iter().enumerate() {
                    writeln!(ui, "Q{}. {} [t/f]", i + 1, q.prompt)?;
                    // Control 0 is "true".
                    let pick = |line: &str| parse_bool(line).map(|b| usize::from(!b));
                    let Some(choice) = ask(input, ui, pick, "Please answer t or f.")? else {
                        done = false;
                        break;
                    };
                    answer(board, &spec.container, i, choice, ui)?;
                }
                done
            }
            GameContent::MultipleChoice { questions } | GameContent::TapQuiz { questions } => {
                let mut done = true;
                for (i, q) in questions.iter().enumerate() {
                    writeln!(ui, "Q{}. {}", i + 1, q.prompt)?;
                    if q.options.is_empty() {
                        writeln!(ui, "  (no options, skipped)")?;
                        continue;
                    }
                    for (n, option) in q.options.iter().enumerate() {
                        writeln!(ui, "  {}) {option}", n + 1)?;
                    }
                    let count = q.options.len();
                    let hint = format!("Please answer with a number from 1 to {count}.");
                    let parse = |line: &str| parse_option(line, count);
                    let Some(choice) = ask(input, ui, parse, &hint)? else {
                        done = false;
                        break;
                    };
                    answer(board, &spec.container, i, choice, ui)?;
                }
                done
            }
            GameContent::Checklist { items } => {
                for (n, item) in items.iter().enumerate() {
                    writeln!(ui, "  {}) {}", n + 1, item.text)?;
                }
                writeln!(ui, "Which habits do you have? (e.g. 1,3; empty for none)")?;
                let count = items.len();
                let hint = format!("Please list numbers from 1 to {count}, separated by commas.");
                match ask(input, ui, |line| parse_selection(line, count), &hint)? {
                    Some(picked) => {
                        for idx in picked {
                            board.click(&item_id(&spec.container, idx), &LogObserver);
                        }
                        if board.press_finish(&spec.container, &LogObserver) == 0 {
                            writeln!(
                                ui,
                                "This checklist has no finish button; it cannot be graded."
                            )?;
                        }
                        if let Some(status) = board.status(&spec.container) {
                            writeln!(ui, "{status}")?;
                        }
                        true
                    }
                    None => false,
                }
            }
        };

        if !finished {
            writeln!(ui, "\nInput ended; stopping.")?;
            return Ok(());
        }
    }
    Ok(())
}

/// Prompt until `parse` accepts a line. `None` on end of input.
fn ask<T>(
    input: &mut dyn BufRead,
    ui: &mut dyn Write,
    parse: impl Fn(&str) -> Option<T>,
    hint: &str,
) -> Result<Option<T>> {
    loop {
        write!(ui, "> ")?;
        ui.flush()?;
        let Some(line) = next_line(input)? else {
            return Ok(None);
        };
        match parse(&line) {
            Some(value) => return Ok(Some(value)),
            None => writeln!(ui, "{hint}")?,
        }
    }
}

fn answer(
    board: &mut Board<MemoryPage>,
    container: &str,
    question: usize,
    choice: usize,
    ui: &mut dyn Write,
) -> Result<()> {
    board.click(&control_id(container, question, choice), &LogObserver);
    if let Some(feedback) = board.page().text_of(&feedback_id(container, question)) {
        writeln!(ui, "  {feedback}")?;
    }
    if let Some(status) = board.status(container) {
        writeln!(ui, "  {status}")?;
    }
    Ok(())
}

fn parse_bool(line: &str) -> Option<bool> {
    match line.to_lowercase().as_str() {
        "t" | "true" | "y" | "yes" => Some(true),
        "f" | "false" | "n" | "no" => Some(false),
        _ => None,
    }
}

fn parse_option(line: &str, count: usize) -> Option<usize> {
    let n: usize = line.parse().ok()?;
    (1..=count).contains(&n).then(|| n - 1)
}

fn parse_selection(line: &str, count: usize) -> Option<Vec<usize>> {
    let mut picked = Vec::new();
    for part in line.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let idx = parse_option(part, count)?;
        if !picked.contains(&idx) {
            picked.push(idx);
        }
    }
    Some(picked)
}

fn print_summary(cards: &[ScoreCard]) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Game", "Kind", "Answered", "Correct", "Score"]);

    for card in cards {
        let score = if card.finished {
            format!("{}%", card.percent)
        } else {
            "-".to_string()
        };
        table.add_row(vec![
            Cell::new(&card.widget),
            Cell::new(&card.kind),
            Cell::new(format!("{}/{}", card.answered, card.total)),
            Cell::new(card.correct),
            Cell::new(score),
        ]);
    }

    println!("\n{table}");
}
