//! Recall tags: the markers that opt a note or a section into card extraction.

use serde::{Deserialize, Serialize};

/// Markers recognized when no config overrides them.
pub const DEFAULT_MARKERS: [&str; 2] = ["#recall/", "#/recall"];

/// Which substrings count as a recall tag, and how they are matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagConfig {
    /// A line carries the tag if it contains any of these anywhere.
    pub markers: Vec<String>,
    pub case_sensitive: bool,
}

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            markers: DEFAULT_MARKERS.iter().map(|m| m.to_string()).collect(),
            case_sensitive: true,
        }
    }
}

impl TagConfig {
    pub fn new(markers: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            markers: markers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn case_insensitive(mut self) -> Self {
        self.case_sensitive = false;
        self
    }

    /// Whether `line` contains one of the markers. Empty markers never match.
    pub fn has_tag(&self, line: &str) -> bool {
        let mut markers = self.markers.iter().filter(|m| !m.is_empty());
        if self.case_sensitive {
            return markers.any(|m| line.contains(m.as_str()));
        }
        let line = line.to_lowercase();
        markers.any(|m| line.contains(m.to_lowercase().as_str()))
    }
}
