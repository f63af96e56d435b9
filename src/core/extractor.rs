//! Block extraction.
//!
//! The scan walks the classified lines once with an explicit cursor state.
//! Each declaration becomes a [`Block`]: its attached leading comments, the
//! declaration line and its body, as an index range into the input.
//!
//! * A comment run that leads (past blank lines) to a declaration belongs to
//!   that declaration. A comment run that does not, for instance commented
//!   out code between two indented lines, stays in the current body.
//! * Trailing blank lines are trimmed; a block never loses its declaration
//!   line to trimming.
//! * A comment run at the very end of the input, after the last body, has
//!   nothing to attach to and becomes a dangling block of its own.

use std::ops::Range;

use super::classifier::LineClass;
use super::diagnostics::{Diagnostic, DiagnosticKind};
use super::kind::DeclarationKind;
use super::rules::RuleSet;

/// A declaration and everything that travels with it, as `from..to` over the
/// input lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub from: usize,
    pub to: usize,
    pub kind: DeclarationKind,
}

impl Block {
    pub fn range(&self) -> Range<usize> {
        self.from..self.to
    }

    pub fn len(&self) -> usize {
        self.to - self.from
    }

    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Nothing pending except unclaimed lines from `floor` on.
    ScanningForDeclaration { floor: usize },
    /// A comment run began at `from`; waiting for its declaration.
    InAttachedComment { floor: usize, from: usize },
    /// Inside the block whose attached text starts at `from` and whose
    /// declaration line is `head`.
    InBlockBody {
        from: usize,
        head: usize,
        kind: DeclarationKind,
    },
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Transition {
    pub block: Option<Block>,
    pub diagnostic: Option<Diagnostic>,
}

/// Read-only view of a script shared by all transitions.
pub struct ScanContext<'a> {
    lines: &'a [&'a str],
    classes: &'a [LineClass],
    rules: &'a RuleSet,
    /// `leads_to_declaration[i]`: the first line at or after `i` that is
    /// neither blank nor a comment is a declaration.
    leads_to_declaration: Vec<bool>,
}

impl<'a> ScanContext<'a> {
    pub fn new(lines: &'a [&'a str], classes: &'a [LineClass], rules: &'a RuleSet) -> Self {
        let mut leads_to_declaration = vec![false; classes.len()];
        let mut next = false;
        for i in (0..classes.len()).rev() {
            next = match classes[i] {
                LineClass::Blank | LineClass::Comment => next,
                LineClass::Declaration(_) => true,
                LineClass::Structural | LineClass::Code => false,
            };
            leads_to_declaration[i] = next;
        }
        Self { lines, classes, rules, leads_to_declaration }
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    fn kind_at(&self, at: usize, kind: DeclarationKind) -> DeclarationKind {
        self.rules.refine(kind, self.lines[at])
    }

    /// Earliest comment line attached to the declaration at `head`, walking
    /// back over comments and blank lines but never below `floor`. Stops at
    /// another declaration or any code line.
    pub fn attachment_start(&self, head: usize, floor: usize) -> usize {
        let mut start = head;
        let mut at = head;
        while at > floor {
            at -= 1;
            match self.classes[at] {
                LineClass::Comment => start = at,
                LineClass::Blank => {}
                _ => break,
            }
        }
        start
    }

    /// Start of the column-0 comment run (with blank lines) that ends the
    /// input after the declaration at `head`, or the input length if the
    /// input ends in code.
    fn trailing_comment_start(&self, head: usize) -> usize {
        let mut start = self.len();
        let mut at = self.len();
        while at > head + 1 {
            at -= 1;
            match self.classes[at] {
                LineClass::Comment => start = at,
                LineClass::Blank => {}
                _ => break,
            }
        }
        start
    }

    fn first_non_blank(&self, range: Range<usize>) -> Option<usize> {
        range.into_iter().find(|&i| !self.classes[i].is_blank())
    }

    /// Block end after dropping trailing blank lines, keeping `keep` lines.
    fn trimmed_end(&self, from: usize, to: usize, keep: usize) -> usize {
        let mut end = to;
        while end > from + keep && self.classes[end - 1].is_blank() {
            end -= 1;
        }
        end
    }

    fn close(&self, from: usize, head: usize, to: usize, kind: DeclarationKind) -> Block {
        let block = Block { from, to: self.trimmed_end(from, to, head - from + 1), kind };
        log::trace!("{} block on lines {}..{}", kind, block.from + 1, block.to);
        block
    }

    /// Opens a block for the declaration at `head`, claiming attached
    /// comments and any stray lines left since `floor`.
    fn open(&self, floor: usize, head: usize, kind: DeclarationKind) -> (ScanState, Option<Diagnostic>) {
        let kind = self.kind_at(head, kind);
        let attached = self.attachment_start(head, floor);
        let mut diagnostic = None;
        let from = match self.first_non_blank(floor..attached) {
            Some(stray) => {
                log::warn!("stray top-level text on line {} kept with `{}`", stray + 1, self.lines[head]);
                diagnostic = Some(Diagnostic::new(
                    stray,
                    DiagnosticKind::StrayCode,
                    format!("top-level text before a declaration kept with line {}", head + 1),
                ));
                stray
            }
            None => attached,
        };
        (ScanState::InBlockBody { from, head, kind }, diagnostic)
    }

    fn dangling(&self, floor: usize) -> Transition {
        let Some(from) = self.first_non_blank(floor..self.len()) else {
            return Transition::default();
        };
        log::warn!("text from line {} has no declaration after it", from + 1);
        Transition {
            block: Some(Block {
                from,
                to: self.trimmed_end(from, self.len(), 1),
                kind: DeclarationKind::ClassDocstring,
            }),
            diagnostic: Some(Diagnostic::new(
                from,
                DiagnosticKind::DanglingComment,
                "comment text with no declaration after it",
            )),
        }
    }
}

/// Consumes line `at` in `state`.
pub fn step(state: ScanState, at: usize, ctx: &ScanContext<'_>) -> (ScanState, Transition) {
    let class = ctx.classes[at];
    match (state, class) {
        (ScanState::ScanningForDeclaration { floor }, LineClass::Declaration(kind))
        | (ScanState::InAttachedComment { floor, .. }, LineClass::Declaration(kind)) => {
            let (next, diagnostic) = ctx.open(floor, at, kind);
            (next, Transition { block: None, diagnostic })
        }
        (ScanState::ScanningForDeclaration { floor }, LineClass::Comment) => {
            (ScanState::InAttachedComment { floor, from: at }, Transition::default())
        }
        (state @ ScanState::ScanningForDeclaration { .. }, _)
        | (state @ ScanState::InAttachedComment { .. }, _) => (state, Transition::default()),

        (ScanState::InBlockBody { from, head, kind }, LineClass::Declaration(next_kind)) => {
            let block = ctx.close(from, head, at, kind);
            let (next, diagnostic) = ctx.open(at, at, next_kind);
            (next, Transition { block: Some(block), diagnostic })
        }
        (ScanState::InBlockBody { from, head, kind }, LineClass::Comment)
            if ctx.leads_to_declaration[at] =>
        {
            let block = ctx.close(from, head, at, kind);
            (
                ScanState::InAttachedComment { floor: at, from: at },
                Transition { block: Some(block), diagnostic: None },
            )
        }
        (state @ ScanState::InBlockBody { .. }, _) => (state, Transition::default()),
    }
}

/// Closes whatever is open at end of input.
pub fn finish(state: ScanState, ctx: &ScanContext<'_>) -> Vec<Transition> {
    match state {
        ScanState::InBlockBody { from, head, kind } => {
            let tail = ctx.trailing_comment_start(head);
            vec![
                Transition {
                    block: Some(ctx.close(from, head, tail, kind)),
                    diagnostic: None,
                },
                ctx.dangling(tail),
            ]
        }
        ScanState::ScanningForDeclaration { floor } | ScanState::InAttachedComment { floor, .. } => {
            vec![ctx.dangling(floor)]
        }
    }
}

#[derive(Debug, Default)]
pub struct Extraction {
    pub blocks: Vec<Block>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Extraction {
    fn record(&mut self, t: Transition) {
        self.blocks.extend(t.block);
        self.diagnostics.extend(t.diagnostic);
    }
}

/// Partitions `lines[start..]` into blocks, in source order.
pub fn extract_blocks(
    lines: &[&str],
    classes: &[LineClass],
    start: usize,
    rules: &RuleSet,
) -> Extraction {
    let ctx = ScanContext::new(lines, classes, rules);
    let mut out = Extraction::default();
    let mut state = ScanState::ScanningForDeclaration { floor: start };

    for at in start..ctx.len() {
        let (next, transition) = step(state, at, &ctx);
        out.record(transition);
        state = next;
    }
    for transition in finish(state, &ctx) {
        out.record(transition);
    }

    log::debug!("extracted {} blocks", out.blocks.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classifier::classify_lines;
    use crate::core::kind::DeclarationKind::*;

    fn extract(src: &[&str]) -> Extraction {
        let rules = RuleSet::godot();
        let classes = classify_lines(src, rules).classes;
        extract_blocks(src, &classes, 0, rules)
    }

    fn shape(src: &[&str]) -> Vec<(usize, usize, DeclarationKind)> {
        extract(src).blocks.iter().map(|b| (b.from, b.to, b.kind)).collect()
    }

    #[test]
    fn back_to_back_declarations() {
        let src = ["extends Node", "var a", "var _b"];
        assert_eq!(
            shape(&src),
            vec![(0, 1, Extends), (1, 2, PublicVar), (2, 3, PrivateVar)]
        );
    }

    #[test]
    fn body_runs_to_next_declaration_and_trims_blanks() {
        let src = ["func a():", "    pass", "", "    return", "", "", "func b():", "    pass", ""];
        assert_eq!(shape(&src), vec![(0, 4, PublicFunc), (6, 8, PublicFunc)]);
    }

    #[test]
    fn comment_attaches_forward() {
        let src = ["var a = 1", "", "# documents b", "", "var b = 2"];
        assert_eq!(shape(&src), vec![(0, 1, PublicVar), (2, 5, PublicVar)]);
    }

    #[test]
    fn column_zero_comment_inside_body_stays() {
        let src = ["func a():", "    pass", "#    print(1)", "    return", "func b():", "    pass"];
        assert_eq!(shape(&src), vec![(0, 4, PublicFunc), (4, 6, PublicFunc)]);
    }

    #[test]
    fn callbacks_are_disambiguated() {
        let src = ["func _process(d):", "    pass", "func _helper():", "    pass", "func _init():", "    pass"];
        assert_eq!(
            shape(&src),
            vec![(0, 2, BuiltinCallback), (2, 4, PrivateFunc), (4, 6, Init)]
        );
    }

    #[test]
    fn attachment_never_crosses_start() {
        let rules = RuleSet::godot();
        let src = ["# class doc", "", "# about extends", "extends Node"];
        let classes = classify_lines(&src, rules).classes;
        let out = extract_blocks(&src, &classes, 1, rules);
        assert_eq!(out.blocks, vec![Block { from: 2, to: 4, kind: Extends }]);
        assert!(out.diagnostics.is_empty());
    }

    #[test]
    fn attachment_walk_stops_at_code() {
        let src = ["var a", "    continued", "# doc", "var b"];
        let classes = classify_lines(&src, RuleSet::godot()).classes;
        let ctx = ScanContext::new(&src, &classes, RuleSet::godot());
        assert_eq!(ctx.attachment_start(3, 0), 2);
        assert_eq!(ctx.attachment_start(1, 0), 1);
    }

    #[test]
    fn stray_text_is_kept_with_the_next_declaration() {
        let out = extract(&["print(1)", "", "var a"]);
        assert_eq!(out.blocks, vec![Block { from: 0, to: 3, kind: PublicVar }]);
        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(out.diagnostics[0].kind, DiagnosticKind::StrayCode);
    }

    #[test]
    fn dangling_comment_is_kept() {
        let out = extract(&["", "# just a note", "# and more", ""]);
        assert_eq!(out.blocks, vec![Block { from: 1, to: 3, kind: ClassDocstring }]);
        assert_eq!(out.diagnostics[0].kind, DiagnosticKind::DanglingComment);
    }

    #[test]
    fn trailing_comment_at_end_of_input_is_split_off() {
        let out = extract(&["func a():", "    pass", "", "# the end", ""]);
        assert_eq!(
            out.blocks,
            vec![
                Block { from: 0, to: 2, kind: PublicFunc },
                Block { from: 3, to: 4, kind: ClassDocstring },
            ]
        );
        assert_eq!(out.diagnostics[0].kind, DiagnosticKind::DanglingComment);
    }

    #[test]
    fn comment_before_more_body_stays_in_body() {
        let src = ["func a():", "    pass", "# note", "    return"];
        assert_eq!(shape(&src), vec![(0, 4, PublicFunc)]);
    }

    #[test]
    fn blank_input_has_no_blocks() {
        assert!(extract(&[]).blocks.is_empty());
        assert!(extract(&["", ""]).blocks.is_empty());
    }

    #[test]
    fn step_is_pure() {
        let src = ["var a", "# doc", "var b"];
        let classes = classify_lines(&src, RuleSet::godot()).classes;
        let ctx = ScanContext::new(&src, &classes, RuleSet::godot());

        let body = ScanState::InBlockBody { from: 0, head: 0, kind: PublicVar };
        let (next, t) = step(body, 1, &ctx);
        assert_eq!(next, ScanState::InAttachedComment { floor: 1, from: 1 });
        assert_eq!(t.block, Some(Block { from: 0, to: 1, kind: PublicVar }));

        let (again, _) = step(body, 1, &ctx);
        assert_eq!(again, next);
    }
}
