//! Leading class docstring.
//!
//! A comment run is a maximal stretch of comment lines (`#` lines and whole
//! `"""` units). When the script opens with one, that run documents the
//! class no matter which declaration follows it, and it is taken out before
//! block extraction starts. Blank lines after it are not part of it.

use std::ops::Range;

use super::classifier::LineClass;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDocstring {
    pub range: Range<usize>,
}

/// End (exclusive) of the comment run starting at `start`.
pub fn comment_run_end(classes: &[LineClass], start: usize) -> usize {
    classes[start..]
        .iter()
        .position(|c| !c.is_comment())
        .map_or(classes.len(), |n| start + n)
}

/// Splits off the class docstring. Returns it together with the index where
/// block extraction should begin.
pub fn extract_class_docstring(classes: &[LineClass]) -> (Option<ClassDocstring>, usize) {
    let Some(first) = classes.iter().position(|c| !c.is_blank()) else {
        return (None, classes.len());
    };
    if !classes[first].is_comment() {
        return (None, 0);
    }

    let end = comment_run_end(classes, first);
    log::debug!("class docstring on lines {}..{}", first + 1, end);
    (Some(ClassDocstring { range: first..end }), end)
}
