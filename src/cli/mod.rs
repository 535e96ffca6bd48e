//! Handles Command Line Interface (CLI) related functionalities.
//!
//! Includes the main menu loop and its actions, the operator prompts, and the plain text
//! tables the view actions print.

mod commands;
mod prompt;
mod table;

pub use commands::*;
pub use prompt::*;
pub use table::*;
