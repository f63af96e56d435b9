//! Logger setup. `GDORGANIZE_DEBUG=1` turns on debug output the same way
//! `--verbose` does; `RUST_LOG` still wins when set.
use std::sync::OnceLock;

use log::LevelFilter;

static ENABLED: OnceLock<bool> = OnceLock::new();

pub fn is_enabled() -> bool {
    *ENABLED.get_or_init(|| std::env::var("GDORGANIZE_DEBUG").ok().as_deref() == Some("1"))
}

pub fn level(verbose: bool) -> LevelFilter {
    if verbose || is_enabled() {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

pub fn init_logger(verbose: bool) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level(verbose)).format_timestamp(None);
    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }
    // A second init (tests, embedding hosts) keeps the first logger.
    let _ = builder.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_forces_debug() {
        assert_eq!(level(true), LevelFilter::Debug);
    }
}
