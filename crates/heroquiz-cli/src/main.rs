//! heroquiz CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "heroquiz", version, about = "Interactive quiz widgets: validate, render, play")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate quiz TOML files
    Validate {
        /// Path to quiz file or directory
        #[arg(long)]
        quiz: PathBuf,
    },

    /// Render HTML preview pages
    Render {
        /// Path to quiz file or directory
        #[arg(long)]
        quiz: PathBuf,

        /// Output directory (default: from config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Theme name: hero, classic, or a custom theme from the config
        #[arg(long)]
        theme: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Play a quiz in the terminal, reading answers from stdin
    Play {
        /// Path to quiz file
        #[arg(long)]
        quiz: PathBuf,

        /// Only play the game mounted in this container
        #[arg(long)]
        game: Option<String>,

        /// Theme name
        #[arg(long)]
        theme: Option<String>,

        /// Print score cards as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example quiz
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("heroquiz=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { quiz } => commands::validate::execute(quiz),
        Commands::Render {
            quiz,
            output,
            theme,
            config,
        } => commands::render::execute(quiz, output, theme, config),
        Commands::Play {
            quiz,
            game,
            theme,
            json,
            config,
        } => commands::play::execute(quiz, game, theme, json, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
