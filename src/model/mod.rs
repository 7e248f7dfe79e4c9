//! Core data models for lscmd

mod config;
mod definition;
mod dialect;

pub use config::{Config, ScanConfig, UiConfig};
pub use definition::{Definition, DefinitionKind, SourceFile};
pub use dialect::Dialect;
