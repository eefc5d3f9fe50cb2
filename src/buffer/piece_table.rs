use tracing::trace;

use super::{CharBuffer, Piece, Source};
use crate::error::{EditorError, Result};

/// Document text as an ordered list of pieces over a [`CharBuffer`].
///
/// Edits only touch the piece list; buffer contents are never rewritten.
/// Line boundaries are not indexed, every line query rescans the pieces.
#[derive(Debug, Clone, Default)]
pub struct PieceTable {
    buffers: CharBuffer,
    pieces: Vec<Piece>,
}

impl PieceTable {
    /// Empty document with no pieces
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `text` as the original buffer, covered by a single piece
    pub fn from_text(text: &str) -> Self {
        let buffers = CharBuffer::from_original(text);
        let pieces = match buffers.original_len() {
            0 => Vec::new(),
            len => vec![Piece::original(0, len)],
        };
        Self { buffers, pieces }
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    /// Logical document length in characters
    pub fn len(&self) -> usize {
        self.pieces.iter().map(|piece| piece.length).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn original_len(&self) -> usize {
        self.buffers.original_len()
    }

    pub fn add_len(&self) -> usize {
        self.buffers.add_len()
    }

    /// Find the piece whose range `[cum, cum + length]` holds `offset`,
    /// returning its index and the offset relative to the piece.
    fn piece_at(&self, offset: usize) -> Option<(usize, usize)> {
        let mut cum = 0;
        for (index, piece) in self.pieces.iter().enumerate() {
            if offset <= cum + piece.length {
                return Some((index, offset - cum));
            }
            cum += piece.length;
        }
        None
    }

    /// True when `piece` is an add piece ending where the next append starts
    fn continues_add(piece: &Piece, add_start: usize) -> bool {
        piece.source == Source::Add && piece.end() == add_start
    }

    /// Insert `text` at the logical `offset`.
    ///
    /// Offsets at or past the end append. Typing at the end of a freshly
    /// added run extends that piece instead of adding a new one.
    pub fn insert(&mut self, offset: usize, text: &[char]) {
        if text.is_empty() {
            return;
        }

        let add_start = self.buffers.append(text);
        let new_piece = Piece::add(add_start, text.len());

        if offset >= self.len() {
            match self.pieces.last_mut() {
                Some(last) if Self::continues_add(&*last, add_start) => {
                    last.length += text.len();
                }
                _ => self.pieces.push(new_piece),
            }
            trace!(offset, len = text.len(), pieces = self.pieces.len(), "insert at end");
            return;
        }

        let Some((index, within)) = self.piece_at(offset) else {
            self.pieces.push(new_piece);
            return;
        };
        let piece = self.pieces[index];

        if within == piece.length && Self::continues_add(&piece, add_start) {
            self.pieces[index].length += text.len();
            return;
        }

        let mut expansion = Vec::with_capacity(3);
        // Leading part, absent when inserting at the piece start
        if within > 0 {
            expansion.push(Piece {
                length: within,
                ..piece
            });
        }
        expansion.push(new_piece);
        // Trailing part, absent when inserting at the piece end
        if within < piece.length {
            expansion.push(Piece {
                start: piece.start + within,
                length: piece.length - within,
                ..piece
            });
        }
        self.pieces.splice(index..=index, expansion);

        trace!(offset, len = text.len(), pieces = self.pieces.len(), "insert split");
    }

    /// Backspace: remove the character just before `offset`.
    ///
    /// Returns the removed character, or `None` at offset 0 or in an
    /// empty document.
    pub fn delete(&mut self, offset: usize) -> Option<char> {
        if offset == 0 || self.pieces.is_empty() {
            return None;
        }

        let (index, within) = if offset >= self.len() {
            let index = self.pieces.len() - 1;
            (index, self.pieces[index].length)
        } else {
            self.piece_at(offset)?
        };

        let piece = self.pieces[index];
        let removed = self.buffers.slice(&piece)[within - 1];

        if within == 1 {
            // First character of the piece
            self.pieces[index].start += 1;
            self.pieces[index].length -= 1;
        } else if within == piece.length {
            // Last character of the piece
            self.pieces[index].length -= 1;
        } else {
            // Interior: keep both sides, drop the character at within - 1
            let left = Piece {
                length: within - 1,
                ..piece
            };
            let right = Piece {
                start: piece.start + within,
                length: piece.length - within,
                ..piece
            };
            self.pieces.splice(index..=index, [left, right]);
            trace!(offset, pieces = self.pieces.len(), "delete split");
            return Some(removed);
        }

        if self.pieces[index].is_empty() {
            self.pieces.remove(index);
        }
        trace!(offset, pieces = self.pieces.len(), "delete");
        Some(removed)
    }

    /// Iterate the document characters in order
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.pieces
            .iter()
            .flat_map(|piece| self.buffers.slice(piece).iter().copied())
    }

    /// Full text plus the number of lines.
    ///
    /// Lines are counted per piece as `segments - 1` and finished with `+ 1`,
    /// which matches splitting the whole text on `'\n'` because a line may
    /// span several pieces.
    pub fn content(&self) -> (String, usize) {
        let mut text = String::with_capacity(self.len());
        let mut newlines = 0;
        for piece in &self.pieces {
            let segment = self.buffers.slice(piece);
            newlines += segment.iter().filter(|&&c| c == '\n').count();
            text.extend(segment);
        }
        (text, newlines + 1)
    }

    pub fn text(&self) -> String {
        self.content().0
    }

    pub fn total_lines(&self) -> usize {
        self.pieces
            .iter()
            .map(|piece| self.buffers.slice(piece).iter().filter(|&&c| c == '\n').count())
            .sum::<usize>()
            + 1
    }

    /// Split the document on `'\n'`. Always yields at least one line.
    pub fn lines(&self) -> Vec<Vec<char>> {
        let mut lines = Vec::new();
        let mut current = Vec::new();
        for c in self.chars() {
            if c == '\n' {
                lines.push(std::mem::take(&mut current));
            } else {
                current.push(c);
            }
        }
        lines.push(current);
        lines
    }

    /// The line at `index`, without its newline
    pub fn line(&self, index: usize) -> Result<Vec<char>> {
        let mut lines = self.lines();
        let total = lines.len();
        if index >= total {
            return Err(EditorError::OutOfBoundsLine {
                index: index as isize,
                total,
            });
        }
        Ok(lines.swap_remove(index))
    }

    pub fn line_len(&self, index: usize) -> Result<usize> {
        self.line(index).map(|line| line.len())
    }

    /// Flat logical offset of `(row, column)`: every preceding line plus its
    /// newline, then the column clamped to the line length.
    pub fn offset_of(&self, row: usize, column: usize) -> Result<usize> {
        let lines = self.lines();
        let total = lines.len();
        let line = lines
            .get(row)
            .ok_or(EditorError::OutOfBoundsLine {
                index: row as isize,
                total,
            })?;
        let before: usize = lines[..row].iter().map(|line| line.len() + 1).sum();
        Ok(before + column.min(line.len()))
    }
}
