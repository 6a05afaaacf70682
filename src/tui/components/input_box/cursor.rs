//! Cursor position and internal scroll of the text field.
//!
//! The text itself is owned by `InputBox`; every method takes it as `buffer`.

use ratatui::layout::Rect;

use super::text_wrap::{MAX_VISIBLE_LINES, TEXT_OFFSET, inner_width, wrap_line_count, wrap_options};

pub(super) struct CursorState {
    /// Byte offset into the buffer (0..=buffer.len())
    pub pos: usize,
    /// First visible wrapped line when the text outgrows the field
    pub scroll_offset: u16,
    /// Field width from the last render, used for vertical movement
    pub last_field_width: u16,
}

impl CursorState {
    const DEFAULT_WIDTH: u16 = 80;

    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
            last_field_width: Self::DEFAULT_WIDTH,
        }
    }

    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll_offset = 0;
    }

    /// (line, column) of the cursor in wrapped coordinates.
    fn wrapped_position(&self, buffer: &str, width: u16) -> (u16, u16) {
        let before = &buffer[..self.pos];
        let options = wrap_options(width);
        let lines = textwrap::wrap(before, &options);
        let mut line = lines.len().saturating_sub(1) as u16;

        // textwrap drops a trailing empty line after '\n'
        if before.ends_with('\n') && !lines.last().is_some_and(|l| l.is_empty()) {
            line += 1;
        }

        // Count chars from the last newline so trailing spaces are kept.
        let logical = before.rfind('\n').map_or(before, |i| &before[i + 1..]);
        let segments = textwrap::wrap(logical, &options);
        let column = match segments.split_last() {
            None => 0,
            Some((_, earlier)) => {
                let consumed: usize = earlier.iter().map(|s| s.chars().count()).sum();
                logical.chars().count().saturating_sub(consumed) as u16
            }
        };

        (line, column)
    }

    /// Move up (`-1`) or down (`1`) one wrapped line, keeping the column if possible.
    /// Returns `false` at the first/last line.
    pub fn move_vertically(&mut self, buffer: &str, direction: i16) -> bool {
        let width = inner_width(self.last_field_width);
        if width == 0 || buffer.is_empty() {
            return false;
        }

        // Byte span of every wrapped line, newline included.
        let lines = textwrap::wrap(buffer, wrap_options(width));
        let mut starts = Vec::with_capacity(lines.len());
        let mut offset = 0;
        for line in &lines {
            starts.push(offset);
            offset += line.len();
            if buffer.as_bytes().get(offset) == Some(&b'\n') {
                offset += 1;
            }
        }

        let current = starts
            .iter()
            .rposition(|&start| start <= self.pos)
            .unwrap_or(0);
        let target = match direction {
            d if d < 0 && current > 0 => current - 1,
            d if d > 0 && current + 1 < lines.len() => current + 1,
            _ => return false,
        };

        let column = self.pos - starts[current];
        self.pos = starts[target] + column.min(lines[target].len());
        // Stay on a char boundary when lines hold multibyte text.
        while !buffer.is_char_boundary(self.pos) {
            self.pos -= 1;
        }
        true
    }

    /// Keep the cursor line inside the visible window.
    pub fn update_scroll_offset(&mut self, buffer: &str, field_width: u16) {
        let width = inner_width(field_width);
        if width == 0 || wrap_line_count(buffer, width) <= MAX_VISIBLE_LINES {
            self.scroll_offset = 0;
            return;
        }

        let (line, _) = self.wrapped_position(buffer, width);
        if line < self.scroll_offset {
            self.scroll_offset = line;
        } else if line >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = line + 1 - MAX_VISIBLE_LINES;
        }
    }

    /// Screen (column, row) of the cursor inside `area`.
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let width = inner_width(area.width);
        if width == 0 {
            return (area.x + TEXT_OFFSET, area.y + 1);
        }
        let (line, column) = self.wrapped_position(buffer, width);
        let visible_line = line.saturating_sub(self.scroll_offset);
        (area.x + TEXT_OFFSET + column, area.y + 1 + visible_line)
    }
}
