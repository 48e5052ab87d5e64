//! Separator and cloze-conversion settings shared by every card extractor.
//!
//! Only the tags and the multi-line separator are read by the multi-line path
//! (see [crate::parser] and [crate::cards::split_sides]); the rest is carried for
//! the single-line and cloze extractors so one bundle can be stored and passed around.

use serde::{Deserialize, Serialize};

use crate::tags::TagConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserSettings {
    pub single_line_card_separator: String,
    pub single_line_reversed_card_separator: String,
    /// A line holding only this separator divides a multi-line card into front and back.
    pub multi_line_card_separator: String,
    pub multi_line_reversed_card_separator: String,
    pub convert_highlights_to_clozes: bool,
    pub convert_bold_text_to_clozes: bool,
    pub convert_curly_brackets_to_clozes: bool,
    pub tags: TagConfig,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            single_line_card_separator: "::".to_string(),
            single_line_reversed_card_separator: ":::".to_string(),
            multi_line_card_separator: "?".to_string(),
            multi_line_reversed_card_separator: "??".to_string(),
            convert_highlights_to_clozes: true,
            convert_bold_text_to_clozes: true,
            convert_curly_brackets_to_clozes: false,
            tags: TagConfig::default(),
        }
    }
}

impl ParserSettings {
    pub fn with_tags(mut self, tags: TagConfig) -> Self {
        self.tags = tags;
        self
    }
}
