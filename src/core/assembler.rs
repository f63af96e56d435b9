//! Rendering organized blocks back to text.
//!
//! Separation rules:
//! - the class docstring is followed directly by the first block;
//! - more generally, the comment run that opens the output is glued to the
//!   line after it, since that run is what the next pass reads as the class
//!   docstring;
//! - a blank line goes between blocks of different kinds;
//! - blocks of the same kind are packed, unless one of them has code past
//!   its declaration line (function bodies, wrapped values). Attached
//!   comments do not count.
//!
//! The result ends with exactly one newline, or is empty.

use super::classifier::LineClass;
use super::docstring::ClassDocstring;
use super::extractor::Block;

/// Output lines as input indices; `None` is a separator blank line.
type Layout = Vec<Option<usize>>;

pub fn assemble(
    lines: &[&str],
    classes: &[LineClass],
    docstring: Option<&ClassDocstring>,
    blocks: &[Block],
) -> String {
    let mut layout: Layout = Vec::with_capacity(lines.len() + blocks.len());

    if let Some(doc) = docstring {
        layout.extend(doc.range.clone().map(Some));
    }

    let mut previous: Option<&Block> = None;
    for block in blocks {
        if let Some(prev) = previous {
            if needs_blank_line(prev, block, classes) {
                layout.push(None);
            }
        }
        layout.extend(block.range().map(Some));
        previous = Some(block);
    }

    glue_opening_comments(&mut layout, classes);

    let capacity = layout.iter().map(|&e| e.map_or(1, |i| lines[i].len() + 1)).sum();
    let mut out = String::with_capacity(capacity);
    for entry in layout {
        if let Some(i) = entry {
            out.push_str(lines[i]);
        }
        out.push('\n');
    }
    out
}

fn needs_blank_line(prev: &Block, next: &Block, classes: &[LineClass]) -> bool {
    prev.kind != next.kind || has_body(prev, classes) || has_body(next, classes)
}

/// Whether the block has code lines after its first one.
fn has_body(block: &Block, classes: &[LineClass]) -> bool {
    let mut code = block
        .range()
        .filter(|&i| !classes[i].is_comment() && !classes[i].is_blank());
    code.next().is_some() && code.next().is_some()
}

/// Drops blank lines between the opening comment run and what follows it.
fn glue_opening_comments(layout: &mut Layout, classes: &[LineClass]) {
    let run = layout
        .iter()
        .take_while(|e| matches!(e, Some(i) if classes[*i].is_comment()))
        .count();
    if run == 0 {
        return;
    }
    let gap = layout[run..]
        .iter()
        .take_while(|e| match e {
            None => true,
            Some(i) => classes[*i].is_blank(),
        })
        .count();
    layout.drain(run..run + gap);
}
