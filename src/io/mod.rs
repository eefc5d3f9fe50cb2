use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::error::{EditorError, Result};

/// Byte-level file access used to load and save documents
pub trait FileStore {
    /// Read the whole file. `Ok(None)` means the file does not exist.
    fn read_file(&self, path: &Path) -> Result<Option<Vec<u8>>>;

    /// Replace the file contents with `bytes`
    fn write_file(&self, path: &Path, bytes: &[u8]) -> Result<()>;
}

/// [`FileStore`] backed by the local file system
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskStore;

impl FileStore for DiskStore {
    fn read_file(&self, path: &Path) -> Result<Option<Vec<u8>>> {
        match fs::read(path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "file not found, starting empty");
                Ok(None)
            }
            Err(source) => Err(EditorError::FileRead {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn write_file(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        fs::write(path, bytes).map_err(|source| EditorError::FileWrite {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Decode file bytes into document text. Invalid UTF-8 becomes U+FFFD.
pub fn decode(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Bytes written on save: every line with trailing whitespace trimmed and a
/// `'\n'` after it. The empty segment after a final newline is skipped so a
/// newline-terminated file keeps its length across load and save.
pub fn serialize(content: &str) -> Vec<u8> {
    let body = content.strip_suffix('\n').unwrap_or(content);
    let mut bytes = Vec::with_capacity(content.len() + 1);
    for line in body.split('\n') {
        bytes.extend_from_slice(line.trim_end().as_bytes());
        bytes.push(b'\n');
    }
    bytes
}

/// In-memory [`FileStore`] for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    pub files: std::cell::RefCell<std::collections::HashMap<std::path::PathBuf, Vec<u8>>>,
    pub fail_writes: bool,
}

#[cfg(test)]
impl MemoryStore {
    pub fn with_file(path: &str, contents: &str) -> Self {
        let store = Self::default();
        store
            .files
            .borrow_mut()
            .insert(path.into(), contents.as_bytes().to_vec());
        store
    }

    pub fn contents(&self, path: &str) -> Option<Vec<u8>> {
        self.files.borrow().get(Path::new(path)).cloned()
    }
}

#[cfg(test)]
impl FileStore for MemoryStore {
    fn read_file(&self, path: &Path) -> Result<Option<Vec<u8>>> {
        Ok(self.files.borrow().get(path).cloned())
    }

    fn write_file(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        if self.fail_writes {
            return Err(EditorError::FileWrite {
                path: path.to_path_buf(),
                source: std::io::Error::new(ErrorKind::PermissionDenied, "read-only"),
            });
        }
        self.files.borrow_mut().insert(path.to_path_buf(), bytes.to_vec());
        Ok(())
    }
}
