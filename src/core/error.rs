use std::path::PathBuf;

use thiserror::Error;

use super::kind::DeclarationKind;

/// Failures of the layers around the organizer. Organizing itself is total
/// and never produces one of these.
#[derive(Debug, Error)]
pub enum OrganizerError {
    #[error("invalid rule for {kind}: {message}")]
    Rule {
        kind: DeclarationKind,
        message: String,
    },
    #[error("cannot read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
