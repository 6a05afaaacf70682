use crate::core::state::ChatSession;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{MessageList, TitleBar};

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Padding};

/// The chat "paper" never grows wider than this.
const MAX_PAPER_WIDTH: u16 = 100;

/// Areas of the page shell for a given terminal size and input height.
pub struct PageLayout {
    pub title: Rect,
    pub paper: Rect,
    pub messages: Rect,
    pub input: Rect,
}

impl PageLayout {
    pub fn new(area: Rect, input_height: u16) -> Self {
        use Constraint::{Length, Min};

        let [title, paper_row] = Layout::vertical([Length(1), Min(0)]).areas(area);
        let [paper] = Layout::horizontal([Constraint::Max(MAX_PAPER_WIDTH)])
            .flex(Flex::Center)
            .areas(paper_row);

        let inner = paper_block().inner(paper);
        let [messages, input] = Layout::vertical([Min(0), Length(input_height)]).areas(inner);

        Self {
            title,
            paper,
            messages,
            input,
        }
    }
}

fn paper_block() -> Block<'static> {
    Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
        .padding(Padding::horizontal(1))
}

/// Inner width of the paper for a terminal `width` columns wide.
fn paper_inner_width(width: u16) -> u16 {
    // 2 border columns + 2 padding columns
    width.min(MAX_PAPER_WIDTH).saturating_sub(4)
}

pub fn draw_ui(frame: &mut Frame, session: &ChatSession, tui: &mut TuiState, spinner_frame: usize) {
    let area = frame.area();
    let input_height = tui.input_box.calculate_height(paper_inner_width(area.width));
    let page = PageLayout::new(area, input_height);

    TitleBar::new(&session.title, &session.status_message, spinner_frame).render(frame, page.title);

    frame.render_widget(paper_block(), page.paper);

    MessageList::new(&mut tui.message_list, &session.messages).render(frame, page.messages);
    tui.input_box.render(frame, page.input);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::ChatMessage;
    use crate::test_support::test_session;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen(session: &ChatSession, tui: &mut TuiState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw_ui(f, session, tui, 0)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn empty_chat_shows_title_placeholder_and_send() {
        let session = test_session();
        let mut tui = TuiState::new();
        let text = screen(&session, &mut tui, 80, 24);
        assert!(text.contains("AI Customer Support"));
        assert!(text.contains("Type your message..."));
        assert!(text.contains("Send"));
    }

    #[test]
    fn transcript_and_status_are_drawn() {
        let mut session = test_session();
        session.messages.push(ChatMessage::user("Hello"));
        session.messages.push(ChatMessage::bot("Hi"));
        session.status_message = "Waiting for reply...".to_string();
        let mut tui = TuiState::new();
        let text = screen(&session, &mut tui, 80, 24);
        assert!(text.contains("Hello"));
        assert!(text.contains("Hi"));
        assert!(text.contains("Waiting for reply..."));
    }

    #[test]
    fn paper_is_capped_and_centered_on_wide_terminals() {
        let page = PageLayout::new(Rect::new(0, 0, 200, 40), 3);
        // Paper is 100 wide centered in 200: inner area starts after border + padding.
        assert_eq!(page.messages.x, 50 + 2);
        assert_eq!(page.messages.width, MAX_PAPER_WIDTH - 4);
        assert_eq!(page.input.height, 3);
        assert_eq!(page.title.width, 200);
    }

    #[test]
    fn input_sits_below_messages() {
        let page = PageLayout::new(Rect::new(0, 0, 80, 24), 3);
        assert_eq!(page.title.y, 0);
        assert!(page.messages.y > page.title.y);
        assert_eq!(page.messages.y + page.messages.height, page.input.y);
        // Bottom border of the paper sits below the input.
        assert_eq!(page.input.y + page.input.height, 23);
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let session = test_session();
        let mut tui = TuiState::new();
        screen(&session, &mut tui, 10, 4);
    }
}
