//! Wrapping helpers and dimensions for the InputBox text field.

/// Border (2) + padding (2) consumed horizontally by the bordered field
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders consumed vertically
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Content lines shown before the field scrolls internally
pub(super) const MAX_VISIBLE_LINES: u16 = 4;
/// Offset from the field edge to its text (border + padding)
pub(super) const TEXT_OFFSET: u16 = 2;
/// Width of the Send button next to the field, borders included
pub(super) const SEND_BUTTON_WIDTH: u16 = 10;

/// Textwrap options matching how the field's paragraph wraps.
pub(super) fn wrap_options(inner_width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(inner_width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Text width inside the field; 0 if the field is too narrow.
pub(super) fn inner_width(field_width: u16) -> u16 {
    field_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Wrapped line count, counting a trailing newline as its own empty line.
pub(super) fn wrap_line_count(text: &str, width: u16) -> u16 {
    if width == 0 || text.is_empty() {
        return 1;
    }

    let lines = textwrap::wrap(text, wrap_options(width));
    let mut count = (lines.len() as u16).max(1);
    if text.ends_with('\n') && !lines.last().is_some_and(|l| l.is_empty()) {
        count += 1;
    }
    count
}

pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_count_of_empty_text_is_one() {
        assert_eq!(wrap_line_count("", 20), 1);
        assert_eq!(wrap_line_count("anything", 0), 1);
    }

    #[test]
    fn line_count_wraps_long_text() {
        // "hello world" at width 5 → "hello" | "world"
        assert_eq!(wrap_line_count("hello world", 5), 2);
    }

    #[test]
    fn line_count_includes_trailing_newline() {
        assert_eq!(wrap_line_count("hello\n", 20), 2);
        assert_eq!(wrap_line_count("a\nb\nc", 20), 3);
    }

    #[test]
    fn char_boundaries_respect_multibyte() {
        let text = "aé😀";
        assert_eq!(next_char_boundary(text, 0), 1);
        assert_eq!(next_char_boundary(text, 1), 3);
        assert_eq!(next_char_boundary(text, 3), text.len());
        assert_eq!(prev_char_boundary(text, text.len()), 3);
        assert_eq!(prev_char_boundary(text, 3), 1);
        assert_eq!(prev_char_boundary(text, 0), 0);
    }
}
