//! Section ordering.

use super::extractor::Block;

/// Orders blocks by canonical rank.
///
/// `sort_by_key` is std's stable merge sort: blocks of equal kind keep their
/// source order, which is what makes organizing idempotent.
pub fn sort_blocks(blocks: &mut [Block]) {
    blocks.sort_by_key(|b| b.kind.rank());
}
