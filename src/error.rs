use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by license collection and report rendering.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Cannot find directory {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// The dependency scanner failed (missing manifest, corrupt lockfile, ...).
    #[error("dependency scan failed: {0:#}")]
    Scanner(anyhow::Error),

    #[error("failed to read license file {}: {source}", path.display())]
    LicenseRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot open {} for writing", path.display())]
    OutputOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write license report")]
    Write(#[from] std::io::Error),

    #[error("failed to serialize license record")]
    Json(#[from] serde_json::Error),
}
