//! CLI entry point for Recall: list notes and print the flashcards extracted from them.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use recall_core::{
    app_data_dir, cards_for_note, cards_for_notes, get_notes_root, load_config, read_note,
    scan_notes, set_notes_root, split_sides, status, watch_cards, NoteCard, ParserSettings,
};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "recall")]
#[command(about = "Recall: flashcards from tagged markdown notes")]
struct Cli {
    /// Log extraction details to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Show backend status (for dev).
    Status,
    /// Show where Recall stores its config (app data directory).
    DataDir,
    /// List markdown notes and how many cards each one has.
    Scan {
        /// Root directory to scan. Defaults to the configured notes root.
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
    },
    /// Print the cards of a single note.
    Extract {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
        /// Also split each card into front and back.
        #[arg(long)]
        sides: bool,
    },
    /// Print the cards of every note under a directory.
    Cards {
        /// Root directory. Defaults to the configured notes root.
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
        #[arg(long)]
        sides: bool,
    },
    /// Remember a directory as the notes root.
    SetRoot {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
    /// Watch a directory and report card counts whenever notes change.
    Watch {
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    Yaml,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CardOutput<'a> {
    #[serde(flatten)]
    card: &'a NoteCard,
    #[serde(skip_serializing_if = "Option::is_none")]
    front: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    back: Option<&'a str>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = load_config().parser;
    debug!(?settings, "loaded parser settings");

    match cli.command.unwrap_or(Commands::Status) {
        Commands::Status => {
            println!("Recall backend");
            println!("  core: {}", status());
            ExitCode::SUCCESS
        }
        Commands::DataDir => match app_data_dir() {
            Some(p) => {
                println!("{}", p.display());
                ExitCode::SUCCESS
            }
            None => fail("Could not determine app data directory."),
        },
        Commands::Scan { path } => {
            let Some(root) = resolve_root(path) else {
                return fail("No path given and no notes root configured (see `recall set-root`).");
            };
            match scan_notes(&root) {
                Ok(notes) => {
                    println!("Scanned {} note(s) under {}", notes.len(), root.display());
                    for n in &notes {
                        let count = cards_for_note(n, &settings).len();
                        let p = n.body().lines().next().unwrap_or("").trim();
                        let preview = if p.chars().count() > 60 {
                            format!("{}...", p.chars().take(60).collect::<String>())
                        } else {
                            p.to_string()
                        };
                        println!("  {}  [{} card(s)]  {}", n.path.display(), count, preview);
                    }
                    ExitCode::SUCCESS
                }
                Err(e) => fail(e),
            }
        }
        Commands::Extract { file, format, sides } => match read_note(&file) {
            Ok(note) => print_cards(&cards_for_note(&note, &settings), format, sides, &settings),
            Err(e) => fail(e),
        },
        Commands::Cards { path, format, sides } => {
            let Some(root) = resolve_root(path) else {
                return fail("No path given and no notes root configured (see `recall set-root`).");
            };
            match scan_notes(&root) {
                Ok(notes) => print_cards(&cards_for_notes(&notes, &settings), format, sides, &settings),
                Err(e) => fail(e),
            }
        }
        Commands::SetRoot { path } => match set_notes_root(&path) {
            Ok(()) => {
                println!("Notes root set to {}", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => fail(e),
        },
        Commands::Watch { path } => {
            let Some(root) = resolve_root(path) else {
                return fail("No path given and no notes root configured (see `recall set-root`).");
            };
            println!("Watching {} (Ctrl+C to stop)", root.display());
            let res = watch_cards(&root, settings, |cards| match cards {
                Ok(cards) => println!("{} card(s)", cards.len()),
                Err(e) => eprintln!("Error: {}", e),
            });
            match res {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => fail(e),
            }
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_root(path: Option<PathBuf>) -> Option<PathBuf> {
    path.or_else(get_notes_root)
}

fn fail(e: impl std::fmt::Display) -> ExitCode {
    eprintln!("Error: {}", e);
    ExitCode::FAILURE
}

fn print_cards(cards: &[NoteCard], format: Format, sides: bool, settings: &ParserSettings) -> ExitCode {
    let outputs: Vec<CardOutput> = cards
        .iter()
        .map(|card| {
            let (front, back) = if sides {
                let (f, b) = split_sides(&card.card.body, &settings.multi_line_card_separator);
                (Some(f), Some(b))
            } else {
                (None, None)
            };
            CardOutput { card, front, back }
        })
        .collect();

    match format {
        Format::Text => {
            for out in &outputs {
                println!("{}:{}", out.card.note_path.display(), out.card.card.line_number);
                match (out.front, out.back) {
                    (Some(front), Some(back)) => {
                        println!("  front: {}", front);
                        for line in back.lines() {
                            println!("  back:  {}", line);
                        }
                    }
                    _ => {
                        for line in out.card.card.body.lines() {
                            println!("  {}", line);
                        }
                    }
                }
            }
            ExitCode::SUCCESS
        }
        Format::Json => match serde_json::to_string_pretty(&outputs) {
            Ok(s) => {
                println!("{}", s);
                ExitCode::SUCCESS
            }
            Err(e) => fail(e),
        },
        Format::Yaml => match serde_yaml::to_string(&outputs) {
            Ok(s) => {
                print!("{}", s);
                ExitCode::SUCCESS
            }
            Err(e) => fail(e),
        },
    }
}
