//! All backend logic independent of how the app is run.
//!
//! Notes live in a folder the user chooses. Recall reads them, extracts the
//! flashcards opted in with a recall tag (see [parser]), and stores only its
//! config in its own app data directory (see [app_data]).

pub mod app_data;
pub mod cards;
pub mod config;
pub mod line;
pub mod notes;
pub mod parser;
pub mod settings;
pub mod tags;
pub mod watcher;

pub use app_data::app_data_dir;
pub use cards::{cards_for_note, cards_for_notes, split_sides, NoteCard};
pub use config::{get_notes_root, load_config, set_notes_root, Config, ConfigError};
pub use notes::{read_note, scan_notes, Note, ScanError};
pub use parser::{extract, CardType, ExtractedCard, CONTEXT_LINES};
pub use settings::ParserSettings;
pub use tags::TagConfig;
pub use watcher::{watch_cards, WatchError};

/// Returns a short status string. Used to verify the backend is wired up.
pub fn status() -> &'static str {
    "recall-core ready"
}
