//! Extracts multi-line flashcards from a note's text in a single forward pass.
//!
//! Two independent state machines run over the lines:
//! - [Scope] tracks whether extraction is enabled. A recall tag on a first line
//!   that is not a header enables it for the whole note; a tagged header (the
//!   first line included) enables it until the next header at the same or a
//!   higher level.
//! - [CardState] tracks the card being accumulated. A card starts at a qualifying
//!   top-level bullet (see [line::is_card_start]) and ends at the next line with
//!   no indentation, or at the end of the note.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::line;
use crate::settings::ParserSettings;

/// How many lines before a card's first line are kept as its context.
pub const CONTEXT_LINES: usize = 10;

/// Kind of flashcard. This module only produces [CardType::MultiLineBasic];
/// the other kinds come from the single-line and cloze extractors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CardType {
    SingleLineBasic,
    MultiLineBasic,
    Cloze,
}

/// A card found in a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedCard {
    pub card_type: CardType,
    /// The card's raw lines joined with `\n`. Never blank.
    pub body: String,
    /// 1-based line of the card's first line.
    pub line_number: usize,
    /// Up to [CONTEXT_LINES] lines preceding the card, joined with `\n`.
    pub context: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Inactive,
    /// Enabled by a tag on a first line that is not a header; no header ends it.
    ActiveUnbounded,
    /// Enabled by a tagged header of this level.
    ActiveAt(usize),
}

impl Scope {
    fn is_active(self) -> bool {
        !matches!(self, Scope::Inactive)
    }

    fn advance(self, first_line: bool, header_level: usize, tagged: bool) -> Scope {
        let mut scope = self;
        if first_line && tagged {
            scope = if header_level > 0 {
                Scope::ActiveAt(header_level)
            } else {
                Scope::ActiveUnbounded
            };
        }
        if let Scope::ActiveAt(depth) = scope {
            if header_level != 0 && header_level <= depth {
                scope = Scope::Inactive;
            }
        }
        if scope == Scope::Inactive && header_level != 0 && tagged {
            scope = Scope::ActiveAt(header_level);
        }
        scope
    }
}

enum CardState<'a> {
    Idle,
    Accumulating {
        start_line: usize,
        context: String,
        body: Vec<&'a str>,
    },
}

impl CardState<'_> {
    fn is_idle(&self) -> bool {
        matches!(self, CardState::Idle)
    }

    /// Returns to idle, yielding the accumulated card unless its body is blank.
    fn close(&mut self) -> Option<ExtractedCard> {
        let CardState::Accumulating {
            start_line,
            context,
            body,
        } = std::mem::replace(self, CardState::Idle)
        else {
            return None;
        };
        let body = body.join("\n");
        if body.trim().is_empty() {
            return None;
        }
        Some(ExtractedCard {
            card_type: CardType::MultiLineBasic,
            body,
            line_number: start_line,
            context,
        })
    }
}

/// Returns the multi-line cards in `text`, in document order.
///
/// Never fails: an empty text gives no cards, and a card still open at the end
/// of the text is closed and returned with whatever it has collected.
pub fn extract(text: &str, settings: &ParserSettings) -> Vec<ExtractedCard> {
    let text: Cow<'_, str> = if text.contains("\r\n") {
        Cow::Owned(text.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(text)
    };
    let lines: Vec<&str> = text.split('\n').collect();

    let mut cards = Vec::new();
    let mut scope = Scope::Inactive;
    let mut card = CardState::Idle;

    for (i, &text_line) in lines.iter().enumerate() {
        let tagged = settings.tags.has_tag(text_line);
        let indent = line::indentation_level(text_line);

        let next = scope.advance(i == 0, line::header_level(text_line), tagged);
        if next != scope {
            debug!(line = i + 1, from = ?scope, to = ?next, "recall scope changed");
            scope = next;
        }

        if indent == 0 {
            cards.extend(card.close());
        }

        if scope.is_active() && card.is_idle() && indent == 0 && line::is_card_start(text_line) {
            card = CardState::Accumulating {
                start_line: i + 1,
                context: lines[i.saturating_sub(CONTEXT_LINES)..i].join("\n"),
                body: Vec::new(),
            };
        }

        if let CardState::Accumulating { body, .. } = &mut card {
            body.push(text_line);
        }
    }
    cards.extend(card.close());

    debug!(cards = cards.len(), lines = lines.len(), "extracted cards");
    cards
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::tags::TagConfig;

    fn cards(text: &str) -> Vec<(String, usize)> {
        extract(text, &ParserSettings::default())
            .into_iter()
            .map(|c| (c.body, c.line_number))
            .collect()
    }

    fn owned(expected: &[(&str, usize)]) -> Vec<(String, usize)> {
        expected.iter().map(|(b, n)| (b.to_string(), *n)).collect()
    }

    #[test]
    fn empty_text_has_no_cards() {
        assert!(extract("", &ParserSettings::default()).is_empty());
    }

    #[test]
    fn tagged_header_scopes_cards() {
        let got = cards("# Topic #recall/x\n- Q1\n  - sub\n- Q2\n");
        assert_eq!(got, owned(&[("- Q1\n  - sub", 2), ("- Q2", 4)]));
    }

    #[test]
    fn tagged_first_line_scopes_whole_note() {
        let got = cards("#recall/x Summary\n- A\n- B\n");
        assert_eq!(got, owned(&[("- A", 2), ("- B", 3)]));
    }

    #[test]
    fn first_line_scope_ignores_later_headers() {
        let got = cards("see #recall/x\n# One\n- A\n# Two\n- B\n");
        assert_eq!(got, owned(&[("- A", 3), ("- B", 5)]));
    }

    #[test]
    fn tagged_header_on_first_line_is_header_scoped() {
        let got = cards("#recall/x\n- A\n# Two\n- not a card\n");
        assert_eq!(got, owned(&[("- A", 2)]));
    }

    #[test]
    fn nested_header_keeps_scope_until_ancestor() {
        let got = cards("intro\n## A #recall/x\n- Q1\n### Sub\n- Q2\n# B\n- no\n");
        assert_eq!(got, owned(&[("- Q1", 3), ("- Q2", 5)]));
    }

    #[test]
    fn untagged_note_has_no_cards() {
        assert!(cards("# Topic\n- Q1\n  - A1\n- Q2\n").is_empty());
    }

    #[test]
    fn tag_outside_header_does_not_open_scope() {
        assert!(cards("intro\nsee #recall/x\n- Q1\n").is_empty());
    }

    #[test]
    fn sibling_header_closes_scope() {
        let got = cards("# A #recall/x\n- Q1\n# B\n- not a card\n");
        assert_eq!(got, owned(&[("- Q1", 2)]));
    }

    #[test]
    fn ancestor_header_closes_scope() {
        let got = cards("# Root\n## A #recall/x\n- Q1\n# Root 2\n- not a card\n");
        assert_eq!(got, owned(&[("- Q1", 3)]));
    }

    #[test]
    fn deeper_header_keeps_scope() {
        let got = cards("## A #recall/x\n- Q1\n### Sub\n- Q2\n#### Deeper\n- Q3\n");
        assert_eq!(got, owned(&[("- Q1", 2), ("- Q2", 4), ("- Q3", 6)]));
    }

    #[test]
    fn closing_header_can_reopen_scope() {
        let got = cards("# A #recall/x\n- Q1\n# B #recall/y\n- Q2\n# C\n- no\n");
        assert_eq!(got, owned(&[("- Q1", 2), ("- Q2", 4)]));
    }

    #[test]
    fn excluded_shapes_never_start_cards() {
        let got = cards("#recall/x\n- {foo}\n- // note\n- Label:\n- real\n");
        assert_eq!(got, owned(&[("- real", 5)]));
    }

    #[test]
    fn blank_line_ends_card() {
        let got = cards("#recall/x\n- Q\n  A\n\n  stray\n- Q2");
        assert_eq!(got, owned(&[("- Q\n  A", 2), ("- Q2", 6)]));
    }

    #[test]
    fn whitespace_only_line_stays_in_card() {
        let got = cards("#recall/x\n- Q\n  \n  A\n");
        assert_eq!(got, owned(&[("- Q\n  \n  A", 2)]));
    }

    #[test]
    fn non_bullet_top_level_line_ends_card_without_starting_one() {
        let got = cards("#recall/x\n- Q\n  A\nparagraph\n  indented\n");
        assert_eq!(got, owned(&[("- Q\n  A", 2)]));
    }

    #[test]
    fn unterminated_card_is_flushed() {
        let got = cards("# T #recall/x\n- Q\n  - partial");
        assert_eq!(got, owned(&[("- Q\n  - partial", 2)]));
    }

    #[test]
    fn card_starting_on_last_line_is_flushed() {
        let got = cards("# T #recall/x\n- Q1\n- Q2");
        assert_eq!(got, owned(&[("- Q1", 2), ("- Q2", 3)]));
    }

    #[test]
    fn crlf_is_normalized() {
        let got = cards("# T #recall/x\r\n- Q\r\n  A\r\n");
        assert_eq!(got, owned(&[("- Q\n  A", 2)]));
    }

    #[test]
    fn context_is_capped_at_ten_lines() {
        let mut text = String::from("#recall/x\n");
        for n in 1..=12 {
            text.push_str(&format!("line {n}\n"));
        }
        text.push_str("- Q\n");
        let found = extract(&text, &ParserSettings::default());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].line_number, 14);
        let expected: Vec<String> = (3..=12).map(|n| format!("line {n}")).collect();
        assert_eq!(found[0].context, expected.join("\n"));
    }

    #[test]
    fn context_near_top_of_note() {
        let found = extract("# T #recall/x\n- Q\n", &ParserSettings::default());
        assert_eq!(found[0].context, "# T #recall/x");
        assert_eq!(found[0].card_type, CardType::MultiLineBasic);
    }

    #[test]
    fn custom_case_insensitive_tags() {
        let settings =
            ParserSettings::default().with_tags(TagConfig::new(["#cards"]).case_insensitive());
        let found = extract("## Verbs #Cards\n- ser\n  - to be\n", &settings);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].body, "- ser\n  - to be");
        assert!(extract("## Verbs #recall/x\n- ser\n", &settings).is_empty());
    }

    #[test]
    fn serializes_camel_case() {
        let card = &extract("#recall/x\n- Q\n", &ParserSettings::default())[0];
        let s = toml::to_string(card).unwrap();
        assert!(s.contains("cardType = \"multiLineBasic\""));
        assert!(s.contains("lineNumber = 2"));
    }

    fn untagged_line() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-z ]{0,8}",
            "- [a-z{}:/ ]{0,8}",
            "  - [a-z ]{0,8}",
            "#{1,3} [a-z ]{0,6}",
            Just(String::new()),
        ]
    }

    fn any_line() -> impl Strategy<Value = String> {
        prop_oneof![
            4 => untagged_line(),
            1 => "#{1,3} [a-z]{0,4} #recall/[a-z]{1,3}",
        ]
    }

    fn doc_strategy(line: impl Strategy<Value = String>) -> impl Strategy<Value = String> {
        (prop::collection::vec(line, 0..30), any::<bool>())
            .prop_map(|(lines, trailing)| {
                let mut doc = lines.join("\n");
                if trailing {
                    doc.push('\n');
                }
                doc
            })
    }

    fn non_header_line() -> impl Strategy<Value = String> {
        prop_oneof!["[a-z ]{0,8}", "- [a-z ]{0,8}", "  - [a-z ]{0,8}"]
    }

    /// Lines with one tagged header at `tag_index`, of level `depth`; no other tags.
    fn header_scoped_doc() -> impl Strategy<Value = (Vec<String>, usize, usize)> {
        (
            prop::collection::vec(non_header_line(), 0..5),
            1..=3usize,
            prop::collection::vec(untagged_line(), 0..30),
        )
            .prop_map(|(prefix, depth, rest)| {
                let tag_index = prefix.len();
                let mut lines = prefix;
                lines.push(format!("{} Topic #recall/x", "#".repeat(depth)));
                lines.extend(rest);
                (lines, tag_index, depth)
            })
    }

    proptest! {
        #[test]
        fn no_tag_means_no_cards(doc in doc_strategy(untagged_line())) {
            prop_assert!(extract(&doc, &ParserSettings::default()).is_empty());
        }

        #[test]
        fn cards_are_never_blank(doc in doc_strategy(any_line())) {
            let line_count = doc.split('\n').count();
            for card in extract(&doc, &ParserSettings::default()) {
                prop_assert!(!card.body.trim().is_empty());
                prop_assert!(card.body.starts_with("- "));
                prop_assert!(card.line_number >= 1 && card.line_number <= line_count);
                prop_assert!(card.context.split('\n').count() <= CONTEXT_LINES);
            }
        }

        #[test]
        fn cards_stay_inside_header_scope((lines, tag_index, depth) in header_scoped_doc()) {
            let closing_line = lines
                .iter()
                .enumerate()
                .skip(tag_index + 1)
                .find(|(_, l)| {
                    let level = line::header_level(l);
                    level > 0 && level <= depth
                })
                .map_or(usize::MAX, |(i, _)| i + 1);
            for card in extract(&lines.join("\n"), &ParserSettings::default()) {
                prop_assert!(card.line_number > tag_index + 1);
                prop_assert!(card.line_number < closing_line);
            }
        }

        #[test]
        fn extraction_is_deterministic(doc in doc_strategy(any_line())) {
            let settings = ParserSettings::default();
            prop_assert_eq!(extract(&doc, &settings), extract(&doc, &settings));
        }
    }
}
