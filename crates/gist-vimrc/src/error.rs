//! Failure kinds the exit-code mapper must tell apart.

use thiserror::Error;

/// Outcomes with a dedicated exit code. Everything else travels as a plain
/// `anyhow::Error` and exits with the generic code.
#[derive(Debug, Error)]
pub enum SyncError {
    /// No token on the command line and no usable config file.
    #[error("unable to load configuration file: {0}")]
    TokenDiscovery(String),

    /// `pull` found no gist whose description matches the vimrc file name.
    #[error("no gist with description '{0}' to pull")]
    NoGistToPull(String),
}
