//! Shared helpers for the CLI layer

pub mod path;
pub mod strings;
