//! Cards across notes: runs the extractor per note and keeps the note's path with each card.

use std::path::PathBuf;

use serde::Serialize;

use crate::notes::Note;
use crate::parser::{extract, ExtractedCard};
use crate::settings::ParserSettings;

/// A card together with the note it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteCard {
    pub note_path: PathBuf,
    #[serde(flatten)]
    pub card: ExtractedCard,
}

/// Extract the cards of a single note. Uses the raw text, so line numbers match the file.
pub fn cards_for_note(note: &Note, settings: &ParserSettings) -> Vec<NoteCard> {
    extract(&note.raw, settings)
        .into_iter()
        .map(|card| NoteCard {
            note_path: note.path.clone(),
            card,
        })
        .collect()
}

/// Extract cards from all notes. Returns cards from all notes in order.
pub fn cards_for_notes(notes: &[Note], settings: &ParserSettings) -> Vec<NoteCard> {
    notes
        .iter()
        .flat_map(|n| cards_for_note(n, settings))
        .collect()
}

/// Splits a card body into front and back.
///
/// A line that is exactly `separator` (ignoring surrounding whitespace) divides
/// the two; without one, the first line is the front and the rest the back.
pub fn split_sides<'a>(body: &'a str, separator: &str) -> (&'a str, &'a str) {
    let separator = separator.trim();
    if !separator.is_empty() {
        let mut offset = 0;
        for line in body.split_inclusive('\n') {
            if line.trim() == separator {
                let front = body[..offset].trim_end_matches('\n');
                let back = &body[offset + line.len()..];
                return (front, back);
            }
            offset += line.len();
        }
    }
    match body.split_once('\n') {
        Some((front, back)) => (front, back),
        None => (body, ""),
    }
}
