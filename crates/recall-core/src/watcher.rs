//! File watcher for the notes directory. Re-extracts cards when files change.

use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use notify_debouncer_mini::notify;
use notify_debouncer_mini::{new_debouncer, DebounceEventResult};
use tracing::{debug, warn};

use crate::cards::{cards_for_notes, NoteCard};
use crate::notes::{scan_notes, ScanError};
use crate::settings::ParserSettings;

const DEBOUNCE: Duration = Duration::from_millis(400);

/// Watches `root` and calls `on_change` with every card under it whenever files change (debounced).
/// Blocks until the process is stopped (e.g. Ctrl+C). Returns Err on setup failure.
pub fn watch_cards(
    root: &Path,
    settings: ParserSettings,
    on_change: impl Fn(Result<Vec<NoteCard>, ScanError>) + Send + 'static,
) -> Result<(), WatchError> {
    if !root.is_dir() {
        return Err(WatchError::NotADirectory(root.to_path_buf()));
    }
    let root = root.canonicalize().map_err(WatchError::Canonicalize)?;
    let root_for_callback = root.clone();

    let mut debouncer = new_debouncer(DEBOUNCE, move |res: DebounceEventResult| match res {
        Ok(events) => {
            debug!(events = events.len(), "notes changed");
            on_change(rescan(&root_for_callback, &settings));
        }
        Err(e) => warn!(error = %e, "watcher error"),
    })
    .map_err(|e| WatchError::Notify(e.to_string()))?;

    debouncer
        .watcher()
        .watch(&root, notify::RecursiveMode::Recursive)
        .map_err(|e| WatchError::Watch(e.to_string()))?;

    let (_tx, rx) = mpsc::channel::<()>();
    rx.recv().ok();
    Ok(())
}

/// Every card under `root`, as handed to the watch callback.
fn rescan(root: &Path, settings: &ParserSettings) -> Result<Vec<NoteCard>, ScanError> {
    scan_notes(root).map(|notes| cards_for_notes(&notes, settings))
}

#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("not a directory: {0}")]
    NotADirectory(std::path::PathBuf),
    #[error("failed to resolve path: {0}")]
    Canonicalize(std::io::Error),
    #[error("watcher init: {0}")]
    Notify(String),
    #[error("watch failed: {0}")]
    Watch(String),
}
