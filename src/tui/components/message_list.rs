//! # MessageList Component
//!
//! Scrollable view of the transcript.
//!
//! ## Responsibilities
//!
//! - Lay out one bubble per message, user on the right and bot on the left
//! - Cache bubble sizes so only new entries are measured each frame
//! - Scroll smoothly to the latest entry whenever the list changes
//! - Manual scrolling (wheel, PageUp/PageDown)
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the message slice
//! (props). The transcript is append-only, so cached sizes stay valid until
//! the width changes.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::state::ChatMessage;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::{BubbleLayout, Message};
use crate::tui::event::TuiEvent;

/// Blank rows below each bubble.
const MESSAGE_GAP: u16 = 1;
/// Each animation frame covers this fraction (1/n) of the remaining distance.
const SMOOTH_SCROLL_DIVISOR: u16 = 3;

/// Scroll and layout state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// True while the view is gliding toward the latest entry
    pub auto_scroll: bool,
    /// Message count at the last render; a change triggers auto-scroll
    seen_count: usize,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            auto_scroll: false,
            seen_count: 0,
            viewport_height: 0,
        }
    }

    /// Whether more frames are needed to finish a smooth scroll.
    pub fn is_animating(&self) -> bool {
        self.auto_scroll
    }

    fn max_scroll(&self) -> u16 {
        self.layout.total_height().saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never goes past the last message.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_scroll();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Advance one frame toward the bottom; stops auto-scroll on arrival.
    pub fn step_auto_scroll(&mut self) {
        let target = self.max_scroll();
        let current = self.scroll_state.offset().y;

        let next = if current >= target {
            target
        } else {
            let remaining = target - current;
            current + (remaining / SMOOTH_SCROLL_DIVISOR).max(1)
        };

        self.scroll_state.set_offset(Position { x: 0, y: next });
        if next == target {
            self.auto_scroll = false;
        }
    }

    /// Note the current message count; start auto-scroll if it changed.
    fn observe_len(&mut self, len: usize) {
        if len != self.seen_count {
            self.seen_count = len;
            self.auto_scroll = true;
        }
    }
}

/// Scrollable transcript component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub messages: &'a [ChatMessage],
}

impl<'a> MessageList<'a> {
    pub fn new(state: &'a mut MessageListState, messages: &'a [ChatMessage]) -> Self {
        Self { state, messages }
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar

        // 1. Measure new entries
        self.state.layout.update(self.messages, content_width);

        // 2. Scroll: glide to the bottom after a change, otherwise just clamp
        self.state.viewport_height = area.height;
        self.state.observe_len(self.messages.len());
        if self.state.auto_scroll {
            self.state.step_auto_scroll();
        } else {
            self.state.clamp_scroll();
        }

        // 3. Render only what is near the viewport
        let total_height = self.state.layout.total_height();
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let scroll_offset = self.state.scroll_state.offset().y;
        let visible = self.state.layout.visible_range(scroll_offset, area.height);

        for i in visible {
            let bubble = self.state.layout.bubbles[i];
            let top = self.state.layout.row_top(i);
            let rect = Rect::new(bubble.x_offset, top, bubble.width, bubble.height);
            scroll_view.render_widget(Message::new(&self.messages[i]), rect);
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// EventHandler lives on the state: it persists across frames, the
/// component does not.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.auto_scroll = false;
                self.scroll_state.scroll_up();
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.clamp_scroll();
            }
            TuiEvent::ScrollPageUp => {
                self.auto_scroll = false;
                self.scroll_state.scroll_page_up();
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.clamp_scroll();
            }
            TuiEvent::ScrollToBottom => {
                self.auto_scroll = true;
            }
            _ => {}
        }
        None
    }
}

/// Cached bubble measurements.
pub struct LayoutCache {
    pub bubbles: Vec<BubbleLayout>,
    /// Running sum of row heights (bubble + gap); `prefix_heights[i]` is the bottom of row i
    pub prefix_heights: Vec<u16>,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            bubbles: Vec::new(),
            prefix_heights: Vec::new(),
            content_width: 0,
        }
    }

    /// Measure entries not yet cached. A width change invalidates everything.
    pub fn update(&mut self, messages: &[ChatMessage], content_width: u16) {
        if content_width != self.content_width || messages.len() < self.bubbles.len() {
            self.bubbles.clear();
            self.prefix_heights.clear();
            self.content_width = content_width;
        }

        for message in &messages[self.bubbles.len()..] {
            let bubble = Message::layout(message, content_width);
            let bottom = self
                .total_height()
                .saturating_add(bubble.height)
                .saturating_add(MESSAGE_GAP);
            self.bubbles.push(bubble);
            self.prefix_heights.push(bottom);
        }
    }

    pub fn total_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Top edge of row `index` in content coordinates.
    pub fn row_top(&self, index: usize) -> u16 {
        if index == 0 {
            0
        } else {
            self.prefix_heights[index - 1]
        }
    }

    /// Rows overlapping the viewport, padded by half a viewport each side.
    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn transcript(n: usize) -> Vec<ChatMessage> {
        (0..n)
            .map(|i| {
                if i % 2 == 0 {
                    ChatMessage::user(format!("question {i}"))
                } else {
                    ChatMessage::bot(format!("answer {i}"))
                }
            })
            .collect()
    }

    fn draw(state: &mut MessageListState, messages: &[ChatMessage], width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| MessageList::new(state, messages).render(f, f.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn cache_measures_only_new_entries() {
        let mut cache = LayoutCache::new();
        let messages = transcript(3);
        cache.update(&messages[..2], 60);
        assert_eq!(cache.bubbles.len(), 2);

        cache.update(&messages, 60);
        assert_eq!(cache.bubbles.len(), 3);
        // Each one-line bubble is 3 rows plus the gap.
        assert_eq!(cache.prefix_heights, vec![4, 8, 12]);
        assert_eq!(cache.total_height(), 12);
        assert_eq!(cache.row_top(2), 8);
    }

    #[test]
    fn tall_transcript_height_saturates_instead_of_overflowing() {
        let mut cache = LayoutCache::new();
        let messages: Vec<ChatMessage> = (0..20)
            .map(|_| ChatMessage::bot("line\n".repeat(4000)))
            .collect();
        cache.update(&messages, 60);

        assert_eq!(cache.bubbles.len(), 20);
        assert_eq!(cache.total_height(), u16::MAX);
        assert!(cache.prefix_heights.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn width_change_rebuilds_cache() {
        let mut cache = LayoutCache::new();
        let messages = vec![ChatMessage::bot("a fairly long answer that needs wrapping")];
        cache.update(&messages, 100);
        let wide = cache.total_height();

        cache.update(&messages, 20);
        assert_eq!(cache.bubbles.len(), 1);
        assert!(cache.total_height() > wide);
    }

    #[test]
    fn visible_range_covers_viewport() {
        let mut cache = LayoutCache::new();
        cache.update(&transcript(10), 60); // rows of 4

        let range = cache.visible_range(0, 8);
        assert_eq!(range.start, 0);
        assert!(range.end >= 2);

        let range = cache.visible_range(20, 8);
        assert!(range.start <= 5 && range.end > 6);
    }

    #[test]
    fn new_entry_triggers_smooth_scroll_to_bottom() {
        let mut state = MessageListState::new();
        let messages = transcript(10); // 40 rows
        state.layout.update(&messages, 60);
        state.viewport_height = 10;
        state.observe_len(messages.len());
        assert!(state.is_animating());

        // First frame moves part of the way, not all of it.
        state.step_auto_scroll();
        let first = state.scroll_state.offset().y;
        assert!(first > 0 && first < 30);

        // Keep stepping: reaches the bottom and stops animating.
        for _ in 0..50 {
            if !state.is_animating() {
                break;
            }
            state.step_auto_scroll();
        }
        assert!(!state.is_animating());
        assert_eq!(state.scroll_state.offset().y, 30);
    }

    #[test]
    fn unchanged_list_does_not_restart_scroll() {
        let mut state = MessageListState::new();
        state.observe_len(2);
        state.auto_scroll = false;
        state.observe_len(2);
        assert!(!state.is_animating());
        state.observe_len(3);
        assert!(state.is_animating());
    }

    #[test]
    fn scrolling_up_cancels_auto_scroll() {
        let mut state = MessageListState::new();
        state.auto_scroll = true;
        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.is_animating());

        state.handle_event(&TuiEvent::ScrollToBottom);
        assert!(state.is_animating());
    }

    #[test]
    fn renders_latest_entry_after_scrolling_settles() {
        let mut state = MessageListState::new();
        let messages = transcript(12);

        let mut text = String::new();
        for _ in 0..30 {
            text = draw(&mut state, &messages, 60, 12);
            if !state.is_animating() {
                break;
            }
        }
        assert!(text.contains("answer 11"));
        assert!(!text.contains("question 0 "));
    }

    #[test]
    fn user_bubbles_render_right_aligned() {
        let mut state = MessageListState::new();
        let messages = vec![ChatMessage::user("hi")];
        let mut terminal = Terminal::new(TestBackend::new(40, 5)).unwrap();
        terminal
            .draw(|f| MessageList::new(&mut state, &messages).render(f, f.area()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        // Row 1 holds the text line of the bubble.
        let row: String = (0..40u16).map(|x| buffer[(x, 1u16)].symbol().to_string()).collect();
        let col = row.find("hi").unwrap();
        assert!(col > 20, "user text should sit on the right, found at {col}");
    }
}
