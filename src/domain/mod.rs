//! Domain layer - Core scanning logic
//!
//! This module contains the motion-photo entities, the repository traits
//! for everything that touches the outside world, and the byte-level
//! scanning services. Nothing here performs I/O.

pub mod entities;
pub mod repositories;
pub mod services;
