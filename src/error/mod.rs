//! Error handling module for h5sh.
//!
//! This module provides error handling for shell operations with:
//! - Structured error kinds for parsing, expression resolution, snapshot
//!   loading and configuration
//! - A single top-level error type and crate-wide `Result` alias
//!
//! Completion code never propagates these errors to the line editor; a failed
//! completion attempt always degrades to an empty candidate list.

pub mod kinds;

// Re-export commonly used types
pub use kinds::{ConfigError, EvalError, H5shError, ParseError, Result, SnapshotError};
