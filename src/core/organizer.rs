//! `organize`: classify, take the class docstring, extract, sort, render.
//!
//! Pure and synchronous. Every call works on its own line index; nothing is
//! shared between calls except the read-only rule table.

use super::assembler::assemble;
use super::classifier::classify_lines;
use super::diagnostics::Diagnostic;
use super::docstring::extract_class_docstring;
use super::extractor::{extract_blocks, Block};
use super::rules::RuleSet;
use super::sorter::sort_blocks;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organized {
    pub text: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Reorganizes a script with the default Godot rules.
pub fn organize(script: &str) -> String {
    organize_with(script, RuleSet::godot()).text
}

pub fn organize_with(script: &str, rules: &RuleSet) -> Organized {
    let normalized = normalize_newlines(script);
    let lines: Vec<&str> = normalized.lines().collect();

    let classified = classify_lines(&lines, rules);
    let (docstring, start) = extract_class_docstring(&classified.classes);
    let extraction = extract_blocks(&lines, &classified.classes, start, rules);

    let mut blocks: Vec<Block> = extraction.blocks;
    sort_blocks(&mut blocks);
    let text = assemble(&lines, &classified.classes, docstring.as_ref(), &blocks);

    let mut diagnostics = classified.diagnostics;
    diagnostics.extend(extraction.diagnostics);
    diagnostics.sort_by_key(|d| d.line);

    Organized { text, diagnostics }
}

/// Converts `\r\n` and lone `\r` to `\n`.
pub fn normalize_newlines(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reorders_fields_and_functions() {
        let src = "\
extends Node

var _x = 1
var y = 2

func _ready():
    pass

func do_thing():
    pass
";
        let expected = "\
extends Node

var y = 2

var _x = 1

func _ready():
    pass

func do_thing():
    pass
";
        assert_eq!(organize(src), expected);
    }

    #[test]
    fn class_docstring_is_glued_to_the_first_section() {
        assert_eq!(organize("# Class doc\n\nextends Node\n"), "# Class doc\nextends Node\n");
    }

    #[test]
    fn crlf_is_normalized() {
        assert_eq!(organize("var _a\r\nvar b\r\n"), "var b\n\nvar _a\n");
    }

    #[test]
    fn empty_script() {
        assert_eq!(organize(""), "");
        assert_eq!(organize("\n\n"), "");
    }

    #[test]
    fn diagnostics_are_collected_in_line_order() {
        let out = organize_with("print(1)\nvar a\n\"\"\" open\n", RuleSet::godot());
        let lines: Vec<usize> = out.diagnostics.iter().map(|d| d.line).collect();
        assert_eq!(lines, vec![0, 2, 2]);
    }
}
