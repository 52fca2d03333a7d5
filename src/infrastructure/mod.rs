//! Infrastructure layer
//!
//! Concrete implementations of the domain repositories.
//! This layer contains all filesystem and subprocess access.

pub mod frames;
pub mod persistence;
pub mod source;
