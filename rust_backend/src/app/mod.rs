//! Terminal front end: commands in, text and chart JSON out.

pub mod commands;
pub mod display;
pub mod session;

pub use commands::Command;
pub use display::TerminalCanvas;
pub use session::{Outcome, Session};
