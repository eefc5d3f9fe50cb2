use std::path::{Path, PathBuf};

use tracing::{info, trace, warn};

use crate::buffer::{Cursor, PieceTable};
use crate::error::{EditorError, Result};
use crate::io::{self, FileStore};

/// Edits the session can apply to a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCommand {
    InsertChar(char),
    InsertNewline,
    InsertSpace,
    Backspace,
}

/// One open document: its text, cursor, path and modified flag.
///
/// The caller owns the `EditFile` and hands it to every controller
/// operation by `&mut`.
#[derive(Debug, Clone)]
pub struct EditFile {
    table: PieceTable,
    cursor: Cursor,
    path: PathBuf,
    modified: bool,
}

impl EditFile {
    /// Empty, unmodified document for `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_table(path.into(), PieceTable::new())
    }

    /// Document whose original buffer is `text`
    pub fn from_text(path: impl Into<PathBuf>, text: &str) -> Self {
        Self::with_table(path.into(), PieceTable::from_text(text))
    }

    fn with_table(path: PathBuf, table: PieceTable) -> Self {
        Self {
            table,
            cursor: Cursor::new(),
            path,
            modified: false,
        }
    }

    /// Load `path` through `store`. A missing file opens as an empty document.
    pub fn open(path: impl Into<PathBuf>, store: &impl FileStore) -> Result<Self> {
        let path = path.into();
        let file = match store.read_file(&path)? {
            Some(bytes) => Self::from_text(path, &io::decode(&bytes)),
            None => Self::new(path),
        };
        info!(
            path = %file.path.display(),
            chars = file.original_len(),
            lines = file.total_lines(),
            "opened file"
        );
        Ok(file)
    }

    /// Bytes a save would write right now
    pub fn saved_bytes(&self) -> Vec<u8> {
        io::serialize(&self.table.text())
    }

    /// Write the document through `store`, returning the byte count.
    ///
    /// On failure the document and its modified flag are left untouched.
    pub fn save(&mut self, store: &impl FileStore) -> Result<usize> {
        let bytes = self.saved_bytes();
        if let Err(err) = store.write_file(&self.path, &bytes) {
            warn!(path = %self.path.display(), error = %err, "save failed");
            return Err(err);
        }
        self.modified = false;
        info!(path = %self.path.display(), bytes = bytes.len(), "saved file");
        Ok(bytes.len())
    }

    pub fn table(&self) -> &PieceTable {
        &self.table
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn content(&self) -> (String, usize) {
        self.table.content()
    }

    pub fn total_lines(&self) -> usize {
        self.table.total_lines()
    }

    /// Sum of all piece lengths
    pub fn file_len(&self) -> usize {
        self.table.len()
    }

    pub fn original_len(&self) -> usize {
        self.table.original_len()
    }

    pub fn add_len(&self) -> usize {
        self.table.add_len()
    }

    /// Line at `cursor.row + offset` with its length. `-1` is the line above
    /// the cursor, `0` the current one.
    pub fn line_relative(&self, offset: isize) -> Result<(Vec<char>, usize)> {
        let index = self
            .cursor
            .row
            .checked_add_signed(offset)
            .ok_or(EditorError::OutOfBoundsLine {
                index: self.cursor.row as isize + offset,
                total: self.total_lines(),
            })?;
        let line = self.table.line(index)?;
        let len = line.len();
        Ok((line, len))
    }

    /// Length of the line the cursor is on
    pub fn current_line_len(&self) -> Result<usize> {
        self.table.line_len(self.cursor.row)
    }

    /// Flat logical offset of the cursor, recomputed from the current lines
    pub fn cursor_offset(&self) -> Result<usize> {
        self.table.offset_of(self.cursor.row, self.cursor.column)
    }

    /// Insert `text` at the cursor offset and mark the document modified.
    /// The cursor itself is left for the caller to move.
    pub fn insert_at_cursor(&mut self, text: &[char]) -> Result<usize> {
        let offset = self.cursor_offset()?;
        self.table.insert(offset, text);
        self.modified = true;
        trace!(offset, len = text.len(), "insert at cursor");
        Ok(offset)
    }

    /// Remove the character before the cursor offset. The document is only
    /// marked modified when something was removed.
    pub fn delete_before_cursor(&mut self) -> Result<Option<char>> {
        let offset = self.cursor_offset()?;
        let removed = self.table.delete(offset);
        if removed.is_some() {
            self.modified = true;
        }
        trace!(offset, ?removed, "delete before cursor");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemoryStore;

    #[test]
    fn test_open_missing_file_is_empty() {
        let store = MemoryStore::default();
        let file = EditFile::open("/docs/new.txt", &store).unwrap();
        assert!(file.table().is_empty());
        assert_eq!(file.total_lines(), 1);
        assert!(!file.is_modified());
    }

    #[test]
    fn test_open_existing_file() {
        let store = MemoryStore::with_file("/docs/a.txt", "x\ny\n");
        let file = EditFile::open("/docs/a.txt", &store).unwrap();
        assert_eq!(file.original_len(), 4);
        assert_eq!(file.file_len(), 4);
        assert_eq!(file.add_len(), 0);
        assert_eq!(file.content(), ("x\ny\n".to_string(), 3));
    }

    #[test]
    fn test_save_clears_modified_and_reports_bytes() {
        let store = MemoryStore::default();
        let mut file = EditFile::from_text("/docs/a.txt", "ab  \ncd");
        file.insert_at_cursor(&['z']).unwrap();
        assert!(file.is_modified());

        let written = file.save(&store).unwrap();
        assert_eq!(written, 7);
        assert!(!file.is_modified());
        assert_eq!(store.contents("/docs/a.txt").unwrap(), b"zab\ncd\n");
    }

    #[test]
    fn test_failed_save_keeps_state() {
        let store = MemoryStore {
            fail_writes: true,
            ..MemoryStore::default()
        };
        let mut file = EditFile::from_text("/docs/a.txt", "abc");
        file.insert_at_cursor(&['!']).unwrap();

        let err = file.save(&store).unwrap_err();
        assert!(matches!(err, EditorError::FileWrite { .. }));
        assert!(file.is_modified());
        assert_eq!(file.table().text(), "!abc");
        assert!(store.contents("/docs/a.txt").is_none());
    }

    #[test]
    fn test_save_is_idempotent() {
        let store = MemoryStore::default();
        let mut file = EditFile::from_text("/docs/a.txt", "one \ntwo\n");
        file.save(&store).unwrap();
        let first = store.contents("/docs/a.txt").unwrap();
        file.save(&store).unwrap();
        let second = store.contents("/docs/a.txt").unwrap();
        assert_eq!(first, second);
        assert_eq!(first, b"one\ntwo\n");
    }

    #[test]
    fn test_line_relative() {
        let mut file = EditFile::from_text("a.txt", "first\nsecond");
        file.cursor_mut().set_position(1, 0);
        assert_eq!(file.line_relative(0).unwrap().1, 6);
        assert_eq!(file.line_relative(-1).unwrap(), ("first".chars().collect(), 5));
        assert!(file.line_relative(1).is_err());

        file.cursor_mut().set_position(0, 0);
        assert!(matches!(
            file.line_relative(-1),
            Err(EditorError::OutOfBoundsLine { index: -1, total: 2 })
        ));
    }

    #[test]
    fn test_cursor_offset_follows_edits() {
        let mut file = EditFile::from_text("a.txt", "ab\ncd");
        file.cursor_mut().set_position(1, 1);
        assert_eq!(file.cursor_offset().unwrap(), 4);

        file.cursor_mut().set_position(0, 0);
        file.insert_at_cursor(&['x', 'y']).unwrap();
        file.cursor_mut().set_position(1, 1);
        assert_eq!(file.cursor_offset().unwrap(), 6);
    }

    #[test]
    fn test_delete_at_start_does_not_modify() {
        let mut file = EditFile::from_text("a.txt", "abc");
        assert_eq!(file.delete_before_cursor().unwrap(), None);
        assert!(!file.is_modified());
    }
}
