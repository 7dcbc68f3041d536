//! Hierarchical tree model for h5sh.
//!
//! This is the object model the shell and its completer operate on: groups,
//! datasets and attributes, addressed by POSIX-style `/` paths. Trees are
//! loaded from JSON snapshot files and shared immutably across the session.

pub mod loader;
pub mod node;
pub mod path;

pub use node::{Node, NodeKind, NodeRef};
