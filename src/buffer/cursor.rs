/// Cursor position and scroll window in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Line number (0-indexed)
    pub row: usize,
    /// Character offset within the line (0-indexed, excludes the gutter)
    pub column: usize,
    /// First visible line
    pub scroll_row: usize,
    /// First visible column
    pub scroll_column: usize,
    /// Furthest column reached during the current vertical traversal
    pub preferred_column: Option<usize>,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_row_column(row: usize, column: usize) -> Self {
        Self {
            row,
            column,
            ..Self::default()
        }
    }

    /// Record the current column as the memo if it goes further than the
    /// memo already held.
    pub fn remember_column(&mut self) {
        match self.preferred_column {
            Some(memo) if memo >= self.column => {}
            _ => self.preferred_column = Some(self.column),
        }
    }

    /// End the current vertical traversal
    pub fn forget_column(&mut self) {
        self.preferred_column = None;
    }

    /// Column to land on in a line of `line_len` characters after a
    /// vertical move.
    pub fn column_for(&self, line_len: usize) -> usize {
        self.preferred_column.unwrap_or(self.column).min(line_len)
    }

    /// Set cursor to specific row and column
    pub fn set_position(&mut self, row: usize, column: usize) {
        self.row = row;
        self.column = column;
    }

    /// Shift `scroll_row` so `row` is inside `[scroll_row, scroll_row + height)`
    pub fn scroll_to_row(&mut self, height: usize) {
        let height = height.max(1);
        if self.row < self.scroll_row {
            self.scroll_row = self.row;
        } else if self.row >= self.scroll_row + height {
            self.scroll_row = self.row + 1 - height;
        }
    }

    /// Shift `scroll_column` so `column` is inside
    /// `[scroll_column, scroll_column + width)`
    pub fn scroll_to_column(&mut self, width: usize) {
        let width = width.max(1);
        if self.column < self.scroll_column {
            self.scroll_column = self.column;
        } else if self.column >= self.scroll_column + width {
            self.scroll_column = self.column + 1 - width;
        }
    }
}
