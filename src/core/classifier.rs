//! Line classification.
//!
//! `classify` is the pure per-line rule lookup. `classify_lines` runs it over
//! a whole script while keeping track of `"""` strings, so that text inside
//! a docstring or a multi-line string literal is never mistaken for a
//! declaration.

use super::diagnostics::{Diagnostic, DiagnosticKind};
use super::kind::DeclarationKind;
use super::rules::RuleSet;

pub const TRIPLE_QUOTE: &str = "\"\"\"";

/// First rule in `rules` whose pattern matches the start of `line`.
pub fn classify(line: &str, rules: &RuleSet) -> Option<DeclarationKind> {
    rules
        .rules()
        .iter()
        .find(|rule| rule.pattern.is_match(line))
        .map(|rule| rule.kind)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    Blank,
    /// `#` or `"""` at column 0, or any line inside a `"""` comment unit.
    Comment,
    Declaration(DeclarationKind),
    /// Indented, or starting with a closing bracket.
    Structural,
    /// Anything else at column 0, including lines inside a string literal.
    Code,
}

impl LineClass {
    pub fn is_comment(self) -> bool {
        self == LineClass::Comment
    }

    pub fn is_blank(self) -> bool {
        self == LineClass::Blank
    }
}

pub fn is_comment_line(line: &str) -> bool {
    line.starts_with('#') || line.starts_with(TRIPLE_QUOTE)
}

pub fn is_structural_line(line: &str) -> bool {
    line.starts_with(|c: char| c.is_whitespace() || matches!(c, '}' | ')' | ']'))
}

/// Class of a single line seen outside any open `"""` string.
pub fn classify_line(line: &str, rules: &RuleSet) -> LineClass {
    if line.trim().is_empty() {
        LineClass::Blank
    } else if is_comment_line(line) {
        LineClass::Comment
    } else if let Some(kind) = classify(line, rules) {
        LineClass::Declaration(kind)
    } else if is_structural_line(line) {
        LineClass::Structural
    } else {
        LineClass::Code
    }
}

/// Whether a `"""` string is open after `line`, given whether one was open
/// before it. Outside a `"""` string, a `#` ends the scan and ordinary
/// `"..."` / `'...'` strings are skipped, so quotes in comments or string
/// contents do not count.
pub(crate) fn string_open_after(line: &str, open: bool) -> bool {
    let bytes = line.as_bytes();
    let mut open = open;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i..].starts_with(TRIPLE_QUOTE.as_bytes()) {
            open = !open;
            i += TRIPLE_QUOTE.len();
            continue;
        }
        if !open {
            match bytes[i] {
                b'#' => break,
                quote @ (b'"' | b'\'') => {
                    i = skip_quoted(bytes, i, quote);
                    continue;
                }
                _ => {}
            }
        }
        i += 1;
    }
    open
}

/// Index just past the single-line string opened by `quote` at `at`.
fn skip_quoted(bytes: &[u8], at: usize, quote: u8) -> usize {
    let mut i = at + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

#[derive(Debug, Clone, Copy)]
enum OpenString {
    Comment { from: usize },
    Literal { from: usize },
}

#[derive(Debug, Default)]
pub struct ClassifiedLines {
    pub classes: Vec<LineClass>,
    pub diagnostics: Vec<Diagnostic>,
}

pub fn classify_lines(lines: &[&str], rules: &RuleSet) -> ClassifiedLines {
    let mut classes = Vec::with_capacity(lines.len());
    let mut open: Option<OpenString> = None;

    for (i, line) in lines.iter().enumerate() {
        match open {
            Some(unit) => {
                classes.push(match unit {
                    OpenString::Comment { .. } => LineClass::Comment,
                    OpenString::Literal { .. } => LineClass::Code,
                });
                if !string_open_after(line, true) {
                    open = None;
                }
            }
            None => {
                let class = classify_line(line, rules);
                if string_open_after(line, false) {
                    open = Some(if line.starts_with(TRIPLE_QUOTE) {
                        OpenString::Comment { from: i }
                    } else {
                        OpenString::Literal { from: i }
                    });
                }
                classes.push(class);
            }
        }
    }

    let mut diagnostics = Vec::new();
    if let Some(OpenString::Comment { from } | OpenString::Literal { from }) = open {
        log::warn!("unterminated \"\"\" string opened on line {}", from + 1);
        diagnostics.push(Diagnostic::new(
            from,
            DiagnosticKind::UnterminatedString,
            "unterminated \"\"\" string runs to the end of the script",
        ));
    }

    ClassifiedLines { classes, diagnostics }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kind::DeclarationKind::*;

    fn kind(line: &str) -> Option<DeclarationKind> {
        classify(line, RuleSet::godot())
    }

    #[test]
    fn keywords() {
        assert_eq!(kind("tool"), Some(ToolDirective));
        assert_eq!(kind("@tool"), Some(ToolDirective));
        assert_eq!(kind("class_name Player"), Some(ClassName));
        assert_eq!(kind("extends Node2D"), Some(Extends));
        assert_eq!(kind("signal hit(damage)"), Some(Signal));
        assert_eq!(kind("enum State { IDLE, RUN }"), Some(Enum));
        assert_eq!(kind("const SPEED = 10"), Some(Const));
        assert_eq!(kind("export var hp = 3"), Some(Export));
        assert_eq!(kind("@export_range(0, 10) var hp = 3"), Some(Export));
        assert_eq!(kind("onready var label = $Label"), Some(OnReady));
        assert_eq!(kind("@onready var label = $Label"), Some(OnReady));
    }

    #[test]
    fn fields_split_on_underscore() {
        assert_eq!(kind("var y = 2"), Some(PublicVar));
        assert_eq!(kind("var _x = 1"), Some(PrivateVar));
        assert_eq!(kind("static var count = 0"), Some(PublicVar));
    }

    #[test]
    fn functions() {
        assert_eq!(kind("func _init():"), Some(Init));
        assert_eq!(kind("static func _init():"), Some(Init));
        assert_eq!(kind("func _ready():"), Some(Ready));
        assert_eq!(kind("func _ready_up():"), Some(BuiltinCallback));
        assert_eq!(kind("func _process(delta):"), Some(BuiltinCallback));
        assert_eq!(kind("func _helper():"), Some(BuiltinCallback));
        assert_eq!(kind("func do_thing():"), Some(PublicFunc));
    }

    #[test]
    fn no_match() {
        assert_eq!(kind("    var local = 1"), None);
        assert_eq!(kind("# var commented"), None);
        assert_eq!(kind("variable = 3"), None);
        assert_eq!(kind("toolbar.show()"), None);
        assert_eq!(kind("functional()"), None);
        assert_eq!(kind(""), None);
    }

    #[test]
    fn line_classes() {
        let rules = RuleSet::godot();
        assert_eq!(classify_line("", rules), LineClass::Blank);
        assert_eq!(classify_line("   ", rules), LineClass::Blank);
        assert_eq!(classify_line("## doc", rules), LineClass::Comment);
        assert_eq!(classify_line("\"\"\"doc\"\"\"", rules), LineClass::Comment);
        assert_eq!(classify_line("\tpass", rules), LineClass::Structural);
        assert_eq!(classify_line("}", rules), LineClass::Structural);
        assert_eq!(classify_line("print(1)", rules), LineClass::Code);
        assert_eq!(
            classify_line("var a", rules),
            LineClass::Declaration(PublicVar)
        );
    }

    #[test]
    fn docstring_interior_is_comment() {
        let lines = ["\"\"\"", "var not_a_field", "", "\"\"\"", "var real"];
        let out = classify_lines(&lines, RuleSet::godot());
        assert_eq!(
            out.classes,
            vec![
                LineClass::Comment,
                LineClass::Comment,
                LineClass::Comment,
                LineClass::Comment,
                LineClass::Declaration(PublicVar),
            ]
        );
        assert!(out.diagnostics.is_empty());
    }

    #[test]
    fn string_literal_interior_is_code() {
        let lines = ["const HELP = \"\"\"", "func not_a_func():", "\"\"\"", "func real():"];
        let out = classify_lines(&lines, RuleSet::godot());
        assert_eq!(out.classes[0], LineClass::Declaration(Const));
        assert_eq!(out.classes[1], LineClass::Code);
        assert_eq!(out.classes[2], LineClass::Code);
        assert_eq!(out.classes[3], LineClass::Declaration(PublicFunc));
    }

    #[test]
    fn quotes_in_comments_do_not_open_a_string() {
        let lines = [
            "extends Node",
            "# Docs use \"\"\" blocks",
            "func go():",
            "    # a \"\"\" in a note",
            "    pass",
            "var a = 2",
        ];
        let out = classify_lines(&lines, RuleSet::godot());
        assert_eq!(out.classes[1], LineClass::Comment);
        assert_eq!(out.classes[2], LineClass::Declaration(PublicFunc));
        assert_eq!(out.classes[3], LineClass::Structural);
        assert_eq!(out.classes[5], LineClass::Declaration(PublicVar));
        assert!(out.diagnostics.is_empty());
    }

    #[test]
    fn quotes_in_plain_strings_do_not_open_a_string() {
        let lines = ["const Q = '\"\"\"'", "var a = \"a \\\"\\\"\\\" b\"", "var _b"];
        let out = classify_lines(&lines, RuleSet::godot());
        assert_eq!(out.classes[2], LineClass::Declaration(PrivateVar));
        assert!(out.diagnostics.is_empty());
    }

    #[test]
    fn open_state_scanning() {
        assert!(string_open_after("const HELP = \"\"\"", false));
        assert!(!string_open_after("\"\"\"one line\"\"\"", false));
        assert!(!string_open_after("end of text\"\"\" # done", true));
        // inside a string a `#` is plain text
        assert!(!string_open_after("# \"\"\"", true));
        assert!(!string_open_after("# \"\"\"", false));
    }

    #[test]
    fn unterminated_string_is_diagnosed() {
        let lines = ["var a", "\"\"\" open", "var b"];
        let out = classify_lines(&lines, RuleSet::godot());
        assert_eq!(out.classes[2], LineClass::Comment);
        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(out.diagnostics[0].line, 1);
        assert_eq!(out.diagnostics[0].kind, DiagnosticKind::UnterminatedString);
    }
}
