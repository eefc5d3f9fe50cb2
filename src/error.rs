use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EditorError>;

/// Errors surfaced by the editing core
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Error reading file {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error writing to file {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A line was requested past the end of the document.
    #[error("line {index} is out of bounds (document has {total} lines)")]
    OutOfBoundsLine { index: isize, total: usize },
}
