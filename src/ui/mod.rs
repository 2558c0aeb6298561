//! Terminal User Interface module.
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling per view
//! - `events` - Background task event processing
//! - `helpers` - Task spawning and shared utilities
//! - `render` - View rendering dispatch
//! - `categories` - Category list widget
//! - `detail` - Category detail overlay
//! - `login` - Login and signup forms
//! - `help` - Keybinding overlay
//! - `status` - Notification and hint bar

mod categories;
mod detail;
mod events;
mod help;
mod helpers;
mod input;
mod login;
mod loop_runner;
mod render;
mod status;

pub use loop_runner::{run, Action};
