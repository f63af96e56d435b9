use std::path::PathBuf;

use crate::core::multiline::convert_multiline;

use super::organize::run_batch;

pub fn main(paths: Vec<PathBuf>, check: bool) -> anyhow::Result<i32> {
    run_batch(paths, check, |_, src| convert_multiline(src))
}
