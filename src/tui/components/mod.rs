//! # TUI Components
//!
//! ## Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: page title and pending-reply status
//! - `Message`: one chat bubble
//!
//! ## Stateful Components (Event-Driven)
//!
//! - `InputBox`: text field with a Send button
//! - `MessageList`: scrollable transcript with layout caching
//!
//! Each component file holds its state type, events, rendering and tests.
//! Components receive external data as props instead of reaching into the
//! chat session:
//!
//! ```rust,ignore
//! // Good: dependencies are explicit
//! TitleBar::new(&session.title, &session.status_message, frame_no).render(frame, area);
//! ```
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (page title + status)
//! ├── message.rs       (single bubble)
//! ├── message_list.rs  (scrollable transcript)
//! └── input_box/       (text field + Send button)
//! ```

pub mod input_box;
pub mod message;
pub mod message_list;
mod title_bar;

pub use input_box::{InputBox, InputEvent};
pub use message_list::{MessageList, MessageListState};
pub use title_bar::TitleBar;
