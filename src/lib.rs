//! GDScript declaration organizer.
//!
//! [`organize`] takes a whole script and returns it with its top-level
//! declarations grouped into canonical sections. The `commands` and `cli`
//! modules wrap it as the `gdorganize` binary.
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod io;

pub use crate::core::{organize, organize_with, DeclarationKind, Organized, RuleSet};
