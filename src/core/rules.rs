//! Classification rule table and the virtual-callback allow-list.
//!
//! A `RuleSet` is an immutable value handed to the classifier and the
//! block extractor. The Godot table is built once; alternate tables can be
//! assembled with [`RuleSet::from_patterns`].

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use super::error::OrganizerError;
use super::kind::DeclarationKind;

/// Detection rules in priority order. First match wins, and several rules
/// are deliberately narrower than a later one (`_init` / `_ready` before
/// the generic underscore function rule).
pub const GODOT_PATTERNS: &[(DeclarationKind, &str)] = &[
    (DeclarationKind::ToolDirective, r"^@?tool\b"),
    (DeclarationKind::ClassName, r"^class_name\b"),
    (DeclarationKind::Extends, r"^extends\b"),
    (DeclarationKind::Signal, r"^signal\b"),
    (DeclarationKind::Enum, r"^enum\b"),
    (DeclarationKind::Const, r"^const\b"),
    (DeclarationKind::Export, r"^(?:export\b|@export)"),
    (DeclarationKind::PublicVar, r"^(?:static\s+)?var\s+[A-Za-z]"),
    (DeclarationKind::PrivateVar, r"^(?:static\s+)?var\s+_"),
    (DeclarationKind::OnReady, r"^@?onready\b"),
    (DeclarationKind::Init, r"^(?:static\s+)?func\s+_init\b"),
    (DeclarationKind::Ready, r"^(?:static\s+)?func\s+_ready\b"),
    (DeclarationKind::BuiltinCallback, r"^(?:static\s+)?func\s+_"),
    (DeclarationKind::PublicFunc, r"^(?:static\s+)?func\s+[A-Za-z]"),
    (DeclarationKind::PrivateFunc, r"^(?:static\s+)?func\s+_"),
];

/// Functions the engine calls on its own.
pub const GODOT_CALLBACKS: &[&str] = &[
    "_process",
    "_physics_process",
    "_input",
    "_unhandled_input",
    "_unhandled_key_input",
    "_shortcut_input",
    "_gui_input",
    "_draw",
    "_get_configuration_warning",
    "_get_configuration_warnings",
    "_enter_tree",
    "_exit_tree",
    "_get",
    "_get_property_list",
    "_notification",
    "_set",
    "_to_string",
    "_clips_input",
    "_get_minimum_size",
    "_make_custom_tooltip",
    "_property_can_revert",
    "_property_get_revert",
    "_validate_property",
    "_integrate_forces",
];

static GODOT: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::from_patterns(GODOT_PATTERNS, GODOT_CALLBACKS.iter().copied())
        .expect("built-in rule patterns are valid")
});

#[derive(Debug, Clone)]
pub struct Rule {
    pub kind: DeclarationKind,
    pub pattern: Regex,
}

#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
    callbacks: BTreeSet<String>,
}

impl RuleSet {
    /// The shared default table for Godot scripts.
    pub fn godot() -> &'static RuleSet {
        &GODOT
    }

    pub fn from_patterns<'a, I>(
        patterns: &[(DeclarationKind, &str)],
        callbacks: I,
    ) -> Result<RuleSet, OrganizerError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut rules = Vec::with_capacity(patterns.len());
        for (kind, src) in patterns {
            let pattern = Regex::new(src).map_err(|e| OrganizerError::Rule {
                kind: *kind,
                message: e.to_string(),
            })?;
            rules.push(Rule { kind: *kind, pattern });
        }
        Ok(RuleSet {
            rules,
            callbacks: callbacks.into_iter().map(str::to_string).collect(),
        })
    }

    /// Same rules, different allow-list.
    pub fn with_callbacks<I, S>(&self, callbacks: I) -> RuleSet
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RuleSet {
            rules: self.rules.clone(),
            callbacks: callbacks.into_iter().map(Into::into).collect(),
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn callbacks(&self) -> impl Iterator<Item = &str> {
        self.callbacks.iter().map(String::as_str)
    }

    pub fn is_callback(&self, name: &str) -> bool {
        self.callbacks.contains(name)
    }

    /// Settles the kind of a function declaration. The classifier reports
    /// every underscore function as a callback; only allow-listed names keep
    /// that kind, the rest fall back to the leading-character rule.
    pub fn refine(&self, kind: DeclarationKind, line: &str) -> DeclarationKind {
        if kind != DeclarationKind::BuiltinCallback {
            return kind;
        }
        match function_name(line) {
            Some(name) if self.is_callback(name) => DeclarationKind::BuiltinCallback,
            Some(name) if name.starts_with('_') => DeclarationKind::PrivateFunc,
            Some(_) => DeclarationKind::PublicFunc,
            None => DeclarationKind::PrivateFunc,
        }
    }
}

/// Name of the function declared on `line`, if it is a `func` line.
pub fn function_name(line: &str) -> Option<&str> {
    let rest = line.trim_start();
    let rest = rest.strip_prefix("static").map_or(rest, str::trim_start);
    let rest = rest.strip_prefix("func")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = rest.trim_start();
    let end = rest
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    if end == 0 {
        None
    } else {
        Some(&rest[..end])
    }
}
