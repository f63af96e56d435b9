//! `gdorganize.toml` loading.
//!
//! ```toml
//! [organizer]
//! builtin_callbacks = ["_process", "_input"]  # replaces the default list
//! extra_callbacks = ["_on_hit"]                # appended to it
//! convert_multiline = false
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::error::OrganizerError;
use crate::core::rules::RuleSet;

pub const LOCAL_CONFIG: &str = "gdorganize.toml";

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub organizer: OrganizerConfig,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OrganizerConfig {
    pub builtin_callbacks: Option<Vec<String>>,
    pub extra_callbacks: Vec<String>,
    pub convert_multiline: bool,
}

impl Config {
    pub fn parse(path: &Path, text: &str) -> Result<Config, OrganizerError> {
        toml::from_str(text).map_err(|source| OrganizerError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Config, OrganizerError> {
        let text = std::fs::read_to_string(path).map_err(|source| OrganizerError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &text)
    }

    /// Loads the resolved config file, or defaults when there is none.
    pub fn load_or_default(cli_path: &Option<PathBuf>) -> Result<Config, OrganizerError> {
        match resolve_config_path(cli_path) {
            Some(path) => {
                log::debug!("using config {}", path.display());
                Self::load(&path)
            }
            None => Ok(Config::default()),
        }
    }

    /// The rule table this config asks for.
    pub fn rules(&self) -> RuleSet {
        let base = RuleSet::godot();
        let org = &self.organizer;
        if org.builtin_callbacks.is_none() && org.extra_callbacks.is_empty() {
            return base.clone();
        }
        let mut callbacks: Vec<String> = match &org.builtin_callbacks {
            Some(list) => list.clone(),
            None => base.callbacks().map(str::to_string).collect(),
        };
        callbacks.extend(org.extra_callbacks.iter().cloned());
        base.with_callbacks(callbacks)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    // ~/.gdorganize/config.toml
    dirs_next::home_dir().map(|h| h.join(".gdorganize").join("config.toml"))
}

/// `--config` wins; then `./gdorganize.toml`; then the per-user file. Only
/// an explicit path is returned when it does not exist, so that a typo is
/// reported instead of silently ignored.
pub fn resolve_config_path(cli_path: &Option<PathBuf>) -> Option<PathBuf> {
    if let Some(p) = cli_path {
        return Some(p.clone());
    }
    let local = PathBuf::from(LOCAL_CONFIG);
    if local.is_file() {
        return Some(local);
    }
    default_config_path().filter(|p| p.is_file())
}
