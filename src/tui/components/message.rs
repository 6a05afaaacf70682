use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::core::state::{ChatMessage, Source};

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;
/// Bubbles never take more than this share of the list width.
const MAX_WIDTH_PERCENT: u16 = 80;

/// A single transcript entry drawn as a chat bubble.
///
/// `Message` is transient: built each frame from a borrowed `ChatMessage`.
/// User bubbles sit on the right in the primary color, bot bubbles on the
/// left in grey. [`Message::layout`] sizes the bubble without rendering it,
/// so the parent list can compute scroll extents up front.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub message: &'a ChatMessage,
}

/// Where a bubble goes inside a row of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BubbleLayout {
    pub x_offset: u16,
    pub width: u16,
    pub height: u16,
}

impl<'a> Message<'a> {
    pub fn new(message: &'a ChatMessage) -> Self {
        Self { message }
    }

    fn wrap_options(width: u16) -> textwrap::Options<'static> {
        // Must match Paragraph's wrapping so heights agree with the render.
        textwrap::Options::new(width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace)
    }

    /// Size and position of the bubble in a row `row_width` columns wide.
    pub fn layout(message: &ChatMessage, row_width: u16) -> BubbleLayout {
        let max_width = (row_width as u32 * MAX_WIDTH_PERCENT as u32 / 100) as u16;
        let max_text_width = max_width.saturating_sub(HORIZONTAL_OVERHEAD);
        if max_text_width == 0 {
            // Degenerate case: too narrow for borders + padding.
            return BubbleLayout {
                x_offset: 0,
                width: row_width,
                height: 1,
            };
        }

        let text = message.text.trim();
        let lines = textwrap::wrap(text, Self::wrap_options(max_text_width));
        let text_width = lines
            .iter()
            .map(|line| line.width() as u16)
            .max()
            .unwrap_or(0)
            .clamp(1, max_text_width);
        let text_height = u16::try_from(lines.len()).unwrap_or(u16::MAX).max(1);

        let width = text_width.saturating_add(HORIZONTAL_OVERHEAD);
        let x_offset = match message.source {
            Source::User => row_width.saturating_sub(width),
            Source::Bot => 0,
        };

        BubbleLayout {
            x_offset,
            width,
            height: text_height.saturating_add(VERTICAL_OVERHEAD),
        }
    }

    fn style(source: Source) -> Style {
        match source {
            Source::User => Style::default().fg(Color::White).bg(Color::Blue),
            Source::Bot => Style::default().fg(Color::Black).bg(Color::Gray),
        }
    }
}

impl<'a> Widget for Message<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = Self::style(self.message.source);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(style)
            .style(style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.message.text.trim())
            .style(style)
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn short_user_message_hugs_the_right_edge() {
        let msg = ChatMessage::user("Hello");
        let layout = Message::layout(&msg, 100);
        assert_eq!(layout.width, 5 + HORIZONTAL_OVERHEAD);
        assert_eq!(layout.x_offset, 100 - layout.width);
        assert_eq!(layout.height, 1 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn bot_message_starts_at_the_left_edge() {
        let msg = ChatMessage::bot("Hi there");
        let layout = Message::layout(&msg, 100);
        assert_eq!(layout.x_offset, 0);
        assert_eq!(layout.width, 8 + HORIZONTAL_OVERHEAD);
    }

    #[test]
    fn long_text_is_capped_at_eighty_percent_and_wraps() {
        let msg = ChatMessage::bot("word ".repeat(40));
        let layout = Message::layout(&msg, 50);
        // 80% of 50 = 40 columns; 36 of them for text.
        assert!(layout.width <= 40);
        assert!(layout.width > 30);
        assert!(layout.height > 1 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn wide_characters_are_measured_by_display_width() {
        let msg = ChatMessage::user("こんにちは");
        let layout = Message::layout(&msg, 100);
        assert_eq!(layout.width, 10 + HORIZONTAL_OVERHEAD);
    }

    #[test]
    fn empty_text_still_gets_a_bubble() {
        let msg = ChatMessage::bot("");
        let layout = Message::layout(&msg, 100);
        assert_eq!(layout.width, 1 + HORIZONTAL_OVERHEAD);
        assert_eq!(layout.height, 1 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn too_narrow_row_degenerates_to_one_line() {
        let msg = ChatMessage::user("Hello");
        let layout = Message::layout(&msg, 4);
        assert_eq!(layout.height, 1);
    }

    #[test]
    fn very_long_reply_height_saturates() {
        let msg = ChatMessage::bot("x\n".repeat(70_000));
        let layout = Message::layout(&msg, 60);
        assert_eq!(layout.height, u16::MAX);
    }

    #[test]
    fn styles_follow_the_source() {
        assert_eq!(Message::style(Source::User).bg, Some(Color::Blue));
        assert_eq!(Message::style(Source::Bot).bg, Some(Color::Gray));
    }

    #[test]
    fn renders_text_inside_the_bubble() {
        let msg = ChatMessage::bot("No response");
        let layout = Message::layout(&msg, 40);
        let mut terminal = Terminal::new(TestBackend::new(40, layout.height)).unwrap();
        terminal
            .draw(|f| {
                let area = Rect::new(layout.x_offset, 0, layout.width, layout.height);
                f.render_widget(Message::new(&msg), area);
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("No response"));
    }
}
