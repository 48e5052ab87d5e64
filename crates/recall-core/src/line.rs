//! Per-line facts the extractor looks at: indentation, header level, bullet shape.

/// Marker a top-level list item starts with.
pub const LIST_MARKER: &str = "- ";

/// Number of leading whitespace characters. A blank line's level is its own length.
pub fn indentation_level(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Number of leading `#` characters; 0 when the line is not a header.
/// e.g. `"## Header"` is 2.
pub fn header_level(line: &str) -> usize {
    line.bytes().take_while(|&b| b == b'#').count()
}

/// Whether `line` has the shape of a card's first line: a top-level bullet that is
/// not a lone `- {...}` cloze line, not a `- //` comment, and not a `label:` line.
pub fn is_card_start(line: &str) -> bool {
    if !line.starts_with(LIST_MARKER) {
        return false;
    }
    let lone_braces = line.starts_with("- {") && line.ends_with('}');
    !lone_braces && !line.starts_with("- //") && !line.ends_with(':')
}
