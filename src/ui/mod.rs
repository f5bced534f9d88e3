//! User interface and interaction
//!
//! This module contains CLI parsing, operator-facing output, sync progress
//! reporting and shell completion generation.

pub mod cli;
pub mod completion;
pub mod output;
pub mod progress;

// Re-export commonly used items
pub use cli::{Cli, Commands, cli_to_config};
pub use completion::print_completions;
pub use progress::ProgressReporter;
