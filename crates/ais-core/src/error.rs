//! The one fallible boundary the core exposes: reading from the upstream
//! sample source (§6, §7).

use thiserror::Error;

/// Failure reading a fixed-size sample buffer from the upstream source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("sample source I/O error: {0}")]
    Io(#[from] std::io::Error),
}
