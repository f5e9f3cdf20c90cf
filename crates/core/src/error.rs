use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenameError {
    #[error("folder does not exist or is not a directory: {}", path.display())]
    InvalidFolder { path: PathBuf },
    #[error("failed to read folder {}: {source}", path.display())]
    ReadFolder {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Per-file failure. `commit` records it on the entry instead of returning it.
    #[error("failed to rename {from} -> {to}: {source}")]
    RenameFailed {
        from: String,
        to: String,
        #[source]
        source: io::Error,
    },
}
