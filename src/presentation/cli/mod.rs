//! CLI module

mod commands;
mod progress;
mod prompt;

pub use commands::Cli;
pub use progress::ProgressReporter;
pub use prompt::confirm_frame_extraction;
