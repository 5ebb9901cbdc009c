//! Configuration file support
//!
//! Discovers and parses the TOML config file, then layers command-line
//! values over it (CLI > file > defaults).

pub mod loader;
pub mod merge;

pub use loader::{load_config, FileConfig};
pub use merge::{merge_cli_with_config, CliOverrides};
