//! Terminal User Interface module
//!
//! Full-screen wizard built on ratatui: one step form at a time under a
//! stepper header, with the redirect countdown on the final step.

pub mod app;
pub mod event;
pub mod handler;
pub mod layout;
pub mod steps;
pub mod terminal;
pub mod views;
pub mod widgets;

pub use app::App;
pub use terminal::run_tui;
