//! CLI error types.

use snip_config::ConfigError;
use snip_content::ContentError;
use snip_site::BuildError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Content(#[from] ContentError),

    #[error("{0}")]
    Build(#[from] BuildError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown topic: {0} (run `snip topics` to list them)")]
    UnknownTopic(String),
}
