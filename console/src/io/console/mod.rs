//! # Console Interface
//!
//! The operator-facing surface: a numbered menu, line prompts that re-ask on
//! malformed input, and fixed-width tables. It only talks to the backend
//! services and turns their errors into messages.

pub mod menu;
pub mod prompt;
pub mod table;

pub use menu::{login, ConsoleApp, MenuChoice};
pub use prompt::{InputClosed, Prompter};
