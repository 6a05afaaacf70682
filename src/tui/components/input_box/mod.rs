//! # InputBox Component
//!
//! The text field and its Send button.
//!
//! ## Responsibilities
//!
//! - Capture text input (typing, paste, Ctrl+J newlines)
//! - Handle editing (backspace, delete, cursor movement)
//! - Emit `Submit` on Enter or on a click on the Send button
//! - Show a placeholder while empty
//!
//! ## State Management
//!
//! The buffer is internal state, but the component never clears it on its
//! own: the parent calls [`InputBox::clear`] when the core says so. That
//! lets the text stay visible until the request settles.

mod cursor;
mod text_wrap;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::CursorState;
use text_wrap::{
    MAX_VISIBLE_LINES, SEND_BUTTON_WIDTH, VERTICAL_OVERHEAD, inner_width, next_char_boundary,
    prev_char_boundary, wrap_line_count, wrap_options,
};

pub const PLACEHOLDER: &str = "Type your message...";

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Enter pressed or Send clicked with non-blank text
    Submit(String),
    ContentChanged,
}

/// Text field + Send button.
///
/// # Props
///
/// - `busy`: requests are in flight; only changes the button styling
pub struct InputBox {
    pub buffer: String,
    pub busy: bool,
    cursor: CursorState,
    /// Screen rect of the Send button from the last render (for clicks)
    send_button: Rect,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            busy: false,
            cursor: CursorState::new(),
            send_button: Rect::default(),
        }
    }

    /// Empty the field and reset the cursor.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor.reset();
    }

    /// Height for the current buffer, clamped to the visible-line limit.
    pub fn calculate_height(&self, total_width: u16) -> u16 {
        let width = inner_width(total_width.saturating_sub(SEND_BUTTON_WIDTH));
        let lines = wrap_line_count(&self.buffer, width).min(MAX_VISIBLE_LINES);
        lines + VERTICAL_OVERHEAD
    }

    /// Submission is allowed whenever the trimmed text is non-empty.
    fn submit(&self) -> Option<InputEvent> {
        (!self.buffer.trim().is_empty()).then(|| InputEvent::Submit(self.buffer.clone()))
    }

    fn visible_text(&self, field_width: u16) -> String {
        if self.cursor.scroll_offset == 0 {
            return self.buffer.clone();
        }
        let width = inner_width(field_width);
        if width == 0 {
            return String::new();
        }
        let lines = textwrap::wrap(&self.buffer, wrap_options(width));
        let start = (self.cursor.scroll_offset as usize).min(lines.len());
        let end = (start + MAX_VISIBLE_LINES as usize).min(lines.len());
        lines[start..end].join("\n")
    }

    fn render_scrollbar(&self, frame: &mut Frame, field: Rect) {
        let total_lines = wrap_line_count(&self.buffer, inner_width(field.width));
        if total_lines <= MAX_VISIBLE_LINES {
            return;
        }

        // content_length is the max scroll position, not the line count
        let mut state = ScrollbarState::default()
            .content_length(total_lines.saturating_sub(MAX_VISIBLE_LINES) as usize)
            .position(self.cursor.scroll_offset as usize);

        let bar = Rect {
            x: field.x + field.width.saturating_sub(1),
            y: field.y + 1,
            width: 1,
            height: field.height.saturating_sub(2),
        };
        frame.render_stateful_widget(Scrollbar::new(ScrollbarOrientation::VerticalRight), bar, &mut state);
    }

    fn render_send_button(&self, frame: &mut Frame, area: Rect) {
        let style = if self.busy {
            Style::default().fg(Color::Blue).add_modifier(Modifier::DIM)
        } else {
            Style::default().fg(Color::White).bg(Color::Blue).add_modifier(Modifier::BOLD)
        };
        let button = Paragraph::new("Send")
            .centered()
            .style(style)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::Blue)),
            );
        frame.render_widget(button, area);
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [field, _gap, button] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(SEND_BUTTON_WIDTH - 1),
        ])
        .areas(area);
        self.send_button = button;

        self.cursor.last_field_width = field.width;
        self.cursor.update_scroll_offset(&self.buffer, field.width);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .padding(Padding::horizontal(1));

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(PLACEHOLDER).style(Style::default().fg(Color::DarkGray))
        } else {
            Paragraph::new(self.visible_text(field.width))
        };
        frame.render_widget(paragraph.block(block), field);
        self.render_scrollbar(frame, field);
        self.render_send_button(frame, button);

        let (x, y) = self.cursor.screen_pos(&self.buffer, field);
        frame.set_cursor_position((x, y));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor.pos, *c);
                self.cursor.pos += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                self.buffer.insert_str(self.cursor.pos, text);
                self.cursor.pos += text.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => (self.cursor.pos > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(prev..self.cursor.pos);
                self.cursor.pos = prev;
                InputEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor.pos < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(self.cursor.pos..next);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => (self.cursor.pos > 0).then(|| {
                self.cursor.pos = prev_char_boundary(&self.buffer, self.cursor.pos);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor.pos < self.buffer.len()).then(|| {
                self.cursor.pos = next_char_boundary(&self.buffer, self.cursor.pos);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor.pos]
                    .rfind('\n')
                    .map_or(0, |i| i + 1);
                (self.cursor.pos != line_start).then(|| {
                    self.cursor.pos = line_start;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor.pos..]
                    .find('\n')
                    .map_or(self.buffer.len(), |i| self.cursor.pos + i);
                (self.cursor.pos != line_end).then(|| {
                    self.cursor.pos = line_end;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::CursorUp => self
                .cursor
                .move_vertically(&self.buffer, -1)
                .then_some(InputEvent::ContentChanged),
            TuiEvent::CursorDown => self
                .cursor
                .move_vertically(&self.buffer, 1)
                .then_some(InputEvent::ContentChanged),
            TuiEvent::Submit => self.submit(),
            TuiEvent::MouseClick(col, row)
                if self.send_button.contains(Position::new(*col, *row)) =>
            {
                self.submit()
            }
            _ => None,
        }
    }
}
