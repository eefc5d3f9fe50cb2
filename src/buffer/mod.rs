pub mod cursor;
pub mod piece_table;


pub use cursor::Cursor;
pub use piece_table::PieceTable;

/// Which backing buffer a piece reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Original,
    Add,
}

/// A contiguous range `[start, start + length)` in one of the two buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub source: Source,
    pub start: usize,
    pub length: usize,
}

impl Piece {
    pub fn original(start: usize, length: usize) -> Self {
        Self {
            source: Source::Original,
            start,
            length,
        }
    }

    pub fn add(start: usize, length: usize) -> Self {
        Self {
            source: Source::Add,
            start,
            length,
        }
    }

    /// One past the last buffer index this piece covers
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

/// The two character sequences every piece points into.
///
/// `original` is installed once when the file is loaded. `add` only ever
/// grows: characters removed from the document stay here, unreferenced.
#[derive(Debug, Clone, Default)]
pub struct CharBuffer {
    original: Vec<char>,
    add: Vec<char>,
}

impl CharBuffer {
    pub fn from_original(text: &str) -> Self {
        Self {
            original: text.chars().collect(),
            add: Vec::new(),
        }
    }

    pub fn original_len(&self) -> usize {
        self.original.len()
    }

    pub fn add_len(&self) -> usize {
        self.add.len()
    }

    /// Append to the add buffer, returning the index the new text starts at
    pub fn append(&mut self, text: &[char]) -> usize {
        let start = self.add.len();
        self.add.extend_from_slice(text);
        start
    }

    /// The characters a piece references
    pub fn slice(&self, piece: &Piece) -> &[char] {
        let buffer = match piece.source {
            Source::Original => &self.original,
            Source::Add => &self.add,
        };
        &buffer[piece.start..piece.end()]
    }
}
