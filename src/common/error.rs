//! Error types for the relay

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the relay
///
/// Transient transport failures never surface here; the relay loops recover
/// from those in place. These variants cover the few failures that escape a
/// loop entirely, which end the process.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to create pipe server '{name}': {source}")]
    PipeListen {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Relay task failed: {0}")]
    TaskFailed(String),
}

impl Error {
    /// Create a pipe listener creation error
    pub fn pipe_listen(name: &str, source: io::Error) -> Self {
        Self::PipeListen {
            name: name.to_string(),
            source,
        }
    }
}
