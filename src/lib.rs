//! lscmd - Shell command visualization tool
//!
//! Scans shell startup files (bash, zsh, POSIX sh, PowerShell) and lists the
//! aliases and functions they define, without executing anything.
//!
//! # Features
//!
//! - Quote-, comment- and here-document-aware scanning of shell text
//! - Dialect detection from shebang and file name
//! - Last-write-wins inventory with shadow history across files
//! - Parallel scanning with a deterministic merge order
//! - Table and JSON output

pub mod cli;
pub mod config;
pub mod error;
pub mod inventory;
pub mod model;
pub mod parser;
pub mod scan;
pub mod utils;

pub use error::ScanError;
pub use inventory::{Inventory, InventoryBuilder, Record};
pub use model::{Config, Definition, DefinitionKind, Dialect, SourceFile};
pub use parser::{detect, parse_source, Extractor, LineReader, LogicalLine};
pub use scan::{scan_paths, scan_sources, FileOrder, ScanOptions, ScanReport};
