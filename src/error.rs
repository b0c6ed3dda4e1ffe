/// Error types for the application
///
/// Errors that travel inside iced `Message`s must be `Clone`,
/// so I/O sources are wrapped in `Arc`.
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Failure while turning a selected file into a data URL
#[derive(Debug, Clone, Error)]
pub enum EncodeError {
    /// The file could not be read from disk
    #[error("failed to read image {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: Arc<std::io::Error>,
    },
}

/// Failure while downloading a remote image
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("request for {url} failed: {reason}")]
    Request { url: String, reason: String },
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },
}

/// Failure while loading the config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
