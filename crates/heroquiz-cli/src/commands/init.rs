//! The `heroquiz init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create heroquiz.toml
    if std::path::Path::new("heroquiz.toml").exists() {
        println!("heroquiz.toml already exists, skipping.");
    } else {
        std::fs::write("heroquiz.toml", SAMPLE_CONFIG)?;
        println!("Created heroquiz.toml");
    }

    // Create example quiz
    std::fs::create_dir_all("quizzes")?;
    let example_path = std::path::Path::new("quizzes/example.toml");
    if example_path.exists() {
        println!("quizzes/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUIZ)?;
        println!("Created quizzes/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit quizzes/example.toml with your own questions");
    println!("  2. Run: heroquiz validate --quiz quizzes/example.toml");
    println!("  3. Run: heroquiz render --quiz quizzes");
    println!("  4. Run: heroquiz play --quiz quizzes/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# heroquiz configuration

# Default theme: "hero" (emoji marks) or "classic" (plain text),
# or any custom theme declared below. HEROQUIZ_THEME overrides it.
theme = "hero"

# Where `heroquiz render` writes preview pages.
output_dir = "./heroquiz-out"

# Custom themes start from the hero preset; set only what you want to change.
[themes.calm]
heart = "🌿"
sparkle = "🌱"

[themes.calm.tiers]
legendary = "Wonderfully balanced!"
"#;

const EXAMPLE_QUIZ: &str = r#"[quiz]
id = "example"
title = "Hormone Hero Warm-up"
description = "A tiny example quiz to get started"

[[games]]
kind = "true_false"
container = "tfGame"
title = "True or False?"
questions = [
    { q = "Insulin helps lower blood sugar.", a = true },
    { q = "Melatonin makes you feel wide awake.", a = false },
]

[[games]]
kind = "multiple_choice"
container = "mcGame"
title = "Pick the hormone"
questions = [
    { q = "Which hormone is released when you are stressed?", options = ["Cortisol", "Melatonin", "Insulin"], a = 0 },
]

[[games]]
kind = "checklist"
container = "heroHabits"
title = "Hero Habits"
items = [
    "Drink water through the day",
    "Skip breakfast every day (not a hero habit)",
    "Get 8 hours of sleep",
]
"#;
