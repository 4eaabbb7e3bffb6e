//! Foundation module - Shared utilities
//!
//! Currently just the logging setup used by the library and the CLI.

pub mod logging;
