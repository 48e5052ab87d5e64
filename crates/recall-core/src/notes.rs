//! Discovering and reading markdown notes from a user-chosen directory.
//!
//! The notes root is chosen by the user; we only read it.

use std::path::{Path, PathBuf};

use tracing::info;
use walkdir::WalkDir;

/// A note file we found: its path and full content.
#[derive(Debug, Clone)]
pub struct Note {
    pub path: PathBuf,
    /// Raw file content, frontmatter included. Card line numbers refer to this.
    pub raw: String,
}

impl Note {
    /// Content without YAML frontmatter (the main markdown body).
    pub fn body(&self) -> &str {
        strip_frontmatter(&self.raw)
    }
}

/// Scans `root` for all `.md` files and returns their path and content, sorted by path.
/// Hidden files and directories are skipped. Does not follow symlinks into directories (walkdir default).
pub fn scan_notes(root: &Path) -> Result<Vec<Note>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }
    let mut notes = Vec::new();
    for entry in WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
    {
        let entry = entry.map_err(|e| ScanError::Walk(e.to_string()))?;
        let path = entry.path();
        if path.extension().is_some_and(|e| e == "md") && path.is_file() {
            notes.push(read_note(path)?);
        }
    }
    info!(count = notes.len(), root = %root.display(), "scanned notes");
    Ok(notes)
}

/// Reads a single note.
pub fn read_note(path: &Path) -> Result<Note, ScanError> {
    let raw = std::fs::read_to_string(path).map_err(|e| ScanError::Read(path.to_path_buf(), e))?;
    Ok(Note {
        path: path.to_path_buf(),
        raw,
    })
}

fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    // depth 0 is the root itself, which may legitimately be a dot directory
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|s| s.starts_with('.'))
            .unwrap_or(false)
}

/// Removes optional YAML frontmatter (lines between first --- and second ---).
fn strip_frontmatter(content: &str) -> &str {
    let s = content.trim_start();
    let Some(after_first) = s.strip_prefix("---") else {
        return content;
    };
    let after_first = after_first.trim_start();
    if let Some(rest) = after_first.find("\n---") {
        after_first[rest + 4..].trim_start()
    } else {
        content
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("walk error: {0}")]
    Walk(String),
    #[error("read error for {0}: {1}")]
    Read(PathBuf, std::io::Error),
}
