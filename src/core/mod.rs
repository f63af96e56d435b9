//! Core module tree for the declaration organizer.
//! Everything here is pure text-in, text-out; I/O lives in `commands`.

pub mod assembler;
pub mod classifier;
pub mod diagnostics;
pub mod docstring;
pub mod error;
pub mod extractor;
pub mod kind;
pub mod multiline;
pub mod organizer;
pub mod rules;
pub mod sorter;
pub mod debug; // GDORGANIZE_DEBUG=1 gate for the logger

pub use kind::DeclarationKind;
pub use organizer::{organize, organize_with, Organized};
pub use rules::RuleSet;
