//! Presentation layer
//!
//! Command-line surface: argument parsing, progress and prompts.

pub mod cli;
