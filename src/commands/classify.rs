use std::path::PathBuf;

use anyhow::Context;
use colored::Colorize;

use crate::core::classifier::{classify_lines, LineClass};
use crate::core::organizer::normalize_newlines;
use crate::core::rules::RuleSet;

pub fn main(input: PathBuf, rules: &RuleSet) -> anyhow::Result<()> {
    let src = std::fs::read_to_string(&input)
        .with_context(|| format!("read {}", input.display()))?;
    let normalized = normalize_newlines(&src);
    let lines: Vec<&str> = normalized.lines().collect();
    let classified = classify_lines(&lines, rules);

    for (i, (line, class)) in lines.iter().zip(&classified.classes).enumerate() {
        println!("{:>4} {} {}", i + 1, label(*class, line, rules), line.dimmed());
    }
    for d in &classified.diagnostics {
        eprintln!("{} {}", "warn:".yellow().bold(), d);
    }
    Ok(())
}

fn label(class: LineClass, line: &str, rules: &RuleSet) -> colored::ColoredString {
    let pad = |s: &str| format!("{s:<18}");
    match class {
        LineClass::Declaration(kind) => pad(rules.refine(kind, line).as_str()).bright_cyan(),
        LineClass::Comment => pad("comment").green(),
        LineClass::Blank => pad("").normal(),
        LineClass::Structural => pad("body").normal(),
        LineClass::Code => pad("code").yellow(),
    }
}
