//! src/commands/organize.rs
//! Batch organizer for .gd files with --check mode.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use crate::core::diagnostics::{print_warning, Diagnostic};
use crate::core::multiline::convert_multiline;
use crate::core::organizer::{normalize_newlines, organize_with};
use crate::core::rules::RuleSet;
use crate::io::atomic::atomic_write;

/// Per-invocation settings shared by every input.
pub struct Options<'a> {
    pub rules: &'a RuleSet,
    pub check: bool,
    pub convert_multiline: bool,
    pub pretty_errors: bool,
}

/// Organizes each input. Returns the process exit code: in check mode 1
/// when any file would change, otherwise 0.
pub fn main(paths: Vec<PathBuf>, opts: &Options<'_>) -> Result<i32> {
    run_batch(paths, opts.check, |name, src| {
        let prepared = if opts.convert_multiline {
            convert_multiline(src)
        } else {
            src.to_string()
        };
        let organized = organize_with(&prepared, opts.rules);
        report(name, &prepared, &organized.diagnostics, opts.pretty_errors);
        organized.text
    })
}

/// Shared read-transform-write loop for the file commands.
pub fn run_batch<F>(paths: Vec<PathBuf>, check: bool, mut transform: F) -> Result<i32>
where
    F: FnMut(&str, &str) -> String,
{
    let mut changed = 0usize;
    for p in paths {
        if is_stdin(&p) {
            let mut orig = String::new();
            io::stdin()
                .read_to_string(&mut orig)
                .context("read script from stdin")?;
            let out = restore_line_endings(&orig, transform("<stdin>", &orig));
            if check {
                if normalized(&orig) != normalized(&out) {
                    println!("<stdin>");
                    changed += 1;
                }
            } else {
                io::stdout()
                    .write_all(out.as_bytes())
                    .context("write organized script to stdout")?;
            }
            continue;
        }

        let Ok(orig) = fs::read_to_string(&p) else {
            eprintln!("{} cannot read {}", "warn:".yellow().bold(), p.display());
            continue;
        };
        let name = p.display().to_string();
        let out = restore_line_endings(&orig, transform(&name, &orig));

        if normalized(&orig) == normalized(&out) {
            log::debug!("{name} already organized");
            continue;
        }
        changed += 1;
        if check {
            println!("{}", p.display());
        } else {
            atomic_write(&p, out.as_bytes())
                .with_context(|| format!("write {}", p.display()))?;
            println!("{} {}", "organized".green(), p.display());
        }
    }
    Ok(if check && changed > 0 { 1 } else { 0 })
}

fn report(name: &str, source: &str, diagnostics: &[Diagnostic], pretty: bool) {
    if !pretty {
        return;
    }
    for d in diagnostics {
        print_warning(name, source, d);
    }
}

fn is_stdin(p: &Path) -> bool {
    p.as_os_str() == "-"
}

/// The core speaks `\n`; files that used `\r\n` get it back.
pub fn restore_line_endings(orig: &str, out: String) -> String {
    if orig.contains("\r\n") {
        out.replace('\n', "\r\n")
    } else {
        out
    }
}

/// Content compared by `--check`: line endings and one final newline
/// do not count as a change.
fn normalized(s: &str) -> String {
    let mut text = normalize_newlines(s);
    if text.ends_with('\n') {
        text.pop();
    }
    text
}
