// src/core/diagnostics.rs
//! Best-effort notes recorded while organizing, and colored printing of them.

use std::fmt;

use colored::Colorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A `"""` string never closed; everything after it was kept as one unit.
    UnterminatedString,
    /// Top-level text before the first declaration that is neither a comment
    /// nor a declaration; it travels with the next declaration.
    StrayCode,
    /// Comment text with no declaration after it.
    DanglingComment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Zero-based index into the normalized input lines.
    pub line: usize,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(line: usize, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self { line, kind, message: message.into() }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line + 1, self.message)
    }
}

pub fn print_warning(filename: &str, source: &str, diag: &Diagnostic) {
    eprintln!(
        "{} {}",
        "warning:".bright_yellow().bold(),
        diag.message.bright_white()
    );
    let ln = diag.line + 1;
    let line_text = source.lines().nth(diag.line).unwrap_or_default();

    let ln_str = format!("{:>4}", ln);
    eprintln!("{} {}", "-->".bright_blue(), format!("{}:{}", filename, ln).bright_white());
    eprintln!(" {} {}", " ".repeat(ln_str.len()).dimmed(), "|".dimmed());
    eprintln!("{} {} {}", ln_str.dimmed(), "|".dimmed(), line_text);
    eprintln!();
}
