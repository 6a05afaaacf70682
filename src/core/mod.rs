//! # Core Chat Logic
//!
//! The chat component's behavior, independent of any UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • ChatSession (state)  │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI.         │
//!                    └───────────┬─────────────┘
//!                                │
//!                    ┌───────────┴───────────┐
//!                    ▼                       ▼
//!             ┌────────────┐          ┌──────────────┐
//!             │    TUI     │          │ Conversation │
//!             │  Adapter   │          │    client    │
//!             │ (ratatui)  │          │  (reqwest)   │
//!             └────────────┘          └──────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `ChatSession` and the transcript types
//! - [`action`]: `Action`, `Effect` and `update()`
//! - [`session_id`]: per-mount session identity
//! - [`config`]: settings resolution

pub mod action;
pub mod config;
pub mod session_id;
pub mod state;
