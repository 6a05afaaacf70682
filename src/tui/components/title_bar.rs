//! # TitleBar Component
//!
//! The page title, centered, plus a right-aligned status while replies are
//! pending. Purely presentational: every field is a prop.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

pub struct TitleBar<'a> {
    pub title: &'a str,
    /// Empty when nothing is pending
    pub status_message: &'a str,
    pub spinner_frame: usize,
}

impl<'a> TitleBar<'a> {
    pub fn new(title: &'a str, status_message: &'a str, spinner_frame: usize) -> Self {
        Self {
            title,
            status_message,
            spinner_frame,
        }
    }
}

impl<'a> Component for TitleBar<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = Paragraph::new(Line::from(Span::styled(
            self.title,
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(title, area);

        if !self.status_message.is_empty() {
            let spinner = SPINNER[self.spinner_frame % SPINNER.len()];
            let status = Paragraph::new(Line::from(vec![
                Span::styled(spinner, Style::default().fg(Color::Blue)),
                Span::raw(" "),
                Span::styled(self.status_message, Style::default().fg(Color::DarkGray)),
            ]))
            .alignment(Alignment::Right);
            frame.render_widget(status, area);
        }
    }
}
