use tracing::debug;

use crate::buffer::Cursor;
use crate::edit::{EditCommand, EditFile};
use crate::error::Result;
use crate::input::Command;

/// What the session should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Handled,
    Save,
    Quit,
}

/// One row of the text area
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleLine {
    /// 1-based line number
    pub number: usize,
    /// The part of the line visible under the horizontal scroll
    pub text: String,
}

/// Everything the render surface needs for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub lines: Vec<VisibleLine>,
    /// Caret position relative to the text area origin, gutter included
    pub caret: (usize, usize),
}

/// Size of the editing area and the cursor/scroll controller for it.
///
/// The first `left_margin` columns hold line numbers; text starts after them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: usize,
    pub height: usize,
    pub left_margin: usize,
}

impl Viewport {
    pub fn new(width: usize, height: usize, left_margin: usize) -> Self {
        Self {
            width,
            height,
            left_margin,
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }

    /// Columns available for text
    pub fn text_width(&self) -> usize {
        self.width.saturating_sub(self.left_margin).max(1)
    }

    fn rows(&self) -> usize {
        self.height.max(1)
    }

    fn scroll_into_view(&self, cursor: &mut Cursor) {
        cursor.scroll_to_row(self.rows());
        cursor.scroll_to_column(self.text_width());
    }

    /// Bring the cursor of `file` back inside the window, e.g. after a resize
    pub fn follow_cursor(&self, file: &mut EditFile) {
        self.scroll_into_view(file.cursor_mut());
    }

    /// Run one command against `file`
    pub fn apply(&self, file: &mut EditFile, command: Command) -> Result<CommandOutcome> {
        debug!(?command, "apply");
        if let Some(edit) = command.as_edit() {
            self.edit(file, edit)?;
            return Ok(CommandOutcome::Handled);
        }
        match command {
            Command::MoveUp => self.move_up(file)?,
            Command::MoveDown => self.move_down(file)?,
            Command::MoveLeft => self.move_left(file)?,
            Command::MoveRight => self.move_right(file)?,
            Command::PageUp => self.page_up(file)?,
            Command::PageDown => self.page_down(file)?,
            Command::Save => return Ok(CommandOutcome::Save),
            Command::Quit => return Ok(CommandOutcome::Quit),
            Command::InsertChar(_)
            | Command::InsertSpace
            | Command::InsertNewline
            | Command::Backspace => {}
        }
        Ok(CommandOutcome::Handled)
    }

    pub fn edit(&self, file: &mut EditFile, edit: EditCommand) -> Result<()> {
        match edit {
            EditCommand::InsertChar(c) => self.insert_char(file, c),
            EditCommand::InsertSpace => self.insert_space(file),
            EditCommand::InsertNewline => self.insert_newline(file),
            EditCommand::Backspace => self.backspace(file),
        }
    }

    /// Move one character left, wrapping to the end of the previous line
    pub fn move_left(&self, file: &mut EditFile) -> Result<()> {
        let Cursor { row, column, .. } = *file.cursor();
        let target = if column > 0 {
            Some((row, column - 1))
        } else if row > 0 {
            Some((row - 1, file.table().line_len(row - 1)?))
        } else {
            None
        };

        let cursor = file.cursor_mut();
        if let Some((row, column)) = target {
            cursor.set_position(row, column);
        }
        cursor.forget_column();
        self.scroll_into_view(cursor);
        Ok(())
    }

    /// Move one character right, wrapping to the start of the next line
    pub fn move_right(&self, file: &mut EditFile) -> Result<()> {
        let Cursor { row, column, .. } = *file.cursor();
        let line_len = file.current_line_len()?;
        let total_lines = file.total_lines();

        let cursor = file.cursor_mut();
        if column < line_len {
            cursor.column += 1;
        } else if row + 1 < total_lines {
            cursor.set_position(row + 1, 0);
        }
        cursor.forget_column();
        self.scroll_into_view(cursor);
        Ok(())
    }

    pub fn move_up(&self, file: &mut EditFile) -> Result<()> {
        let row = file.cursor().row;
        if row == 0 {
            return Ok(());
        }
        self.move_vertically(file, row - 1)
    }

    pub fn move_down(&self, file: &mut EditFile) -> Result<()> {
        let row = file.cursor().row;
        if row + 1 >= file.total_lines() {
            return Ok(());
        }
        self.move_vertically(file, row + 1)
    }

    /// Land on `target_row`, keeping the preferred column where the line
    /// is long enough and clamping to the line end where it is not.
    fn move_vertically(&self, file: &mut EditFile, target_row: usize) -> Result<()> {
        let line_len = file.table().line_len(target_row)?;
        let cursor = file.cursor_mut();
        cursor.remember_column();
        cursor.row = target_row;
        cursor.column = cursor.column_for(line_len);
        self.scroll_into_view(cursor);
        Ok(())
    }

    pub fn page_up(&self, file: &mut EditFile) -> Result<()> {
        let rows = self.rows();
        let total_lines = file.total_lines();
        let cursor = *file.cursor();

        let row = cursor.row.saturating_sub(rows);
        let scroll_row = cursor
            .scroll_row
            .saturating_sub(rows)
            .min(total_lines.saturating_sub(rows));
        self.land_page(file, row, scroll_row)
    }

    pub fn page_down(&self, file: &mut EditFile) -> Result<()> {
        let rows = self.rows();
        let total_lines = file.total_lines();
        let cursor = *file.cursor();

        let row = (cursor.row + rows).min(total_lines - 1);
        let scroll_row = (cursor.scroll_row + rows).min(total_lines.saturating_sub(rows));
        self.land_page(file, row, scroll_row)
    }

    fn land_page(&self, file: &mut EditFile, row: usize, scroll_row: usize) -> Result<()> {
        let line_len = file.table().line_len(row)?;
        let cursor = file.cursor_mut();
        cursor.remember_column();
        cursor.row = row;
        cursor.scroll_row = scroll_row;
        cursor.column = cursor.column_for(line_len);
        self.scroll_into_view(cursor);
        Ok(())
    }

    /// Type `c` at the cursor and step past it
    pub fn insert_char(&self, file: &mut EditFile, c: char) -> Result<()> {
        if c == '\n' {
            return self.insert_newline(file);
        }
        file.insert_at_cursor(&[c])?;
        let cursor = file.cursor_mut();
        cursor.column += 1;
        cursor.forget_column();
        self.scroll_into_view(cursor);
        Ok(())
    }

    pub fn insert_space(&self, file: &mut EditFile) -> Result<()> {
        self.insert_char(file, ' ')
    }

    /// Break the line at the cursor; the cursor moves to the new line start
    pub fn insert_newline(&self, file: &mut EditFile) -> Result<()> {
        file.insert_at_cursor(&['\n'])?;
        let cursor = file.cursor_mut();
        cursor.set_position(cursor.row + 1, 0);
        cursor.scroll_column = 0;
        cursor.forget_column();
        self.scroll_into_view(cursor);
        Ok(())
    }

    /// Delete the character before the cursor. At the start of a line the
    /// line is joined onto the one above.
    pub fn backspace(&self, file: &mut EditFile) -> Result<()> {
        let Cursor { row, column, .. } = *file.cursor();
        if row == 0 && column == 0 {
            return Ok(());
        }

        if column == 0 {
            let (_, previous_len) = file.line_relative(-1)?;
            file.delete_before_cursor()?;
            let cursor = file.cursor_mut();
            cursor.set_position(row - 1, previous_len);
            cursor.forget_column();
            self.scroll_into_view(cursor);
            return Ok(());
        }

        file.delete_before_cursor()?;
        let text_width = self.text_width();
        let cursor = file.cursor_mut();
        cursor.column -= 1;
        cursor.forget_column();
        if cursor.column < cursor.scroll_column {
            // Jump back a whole screen rather than one column at a time
            if cursor.scroll_column < text_width {
                cursor.scroll_column = 0;
            } else {
                cursor.scroll_column -= text_width;
            }
        }
        Ok(())
    }

    /// Lines and caret for the current scroll position
    pub fn render(&self, file: &EditFile) -> Screen {
        let cursor = file.cursor();
        let text_width = self.text_width();

        let lines = file
            .table()
            .lines()
            .into_iter()
            .enumerate()
            .skip(cursor.scroll_row)
            .take(self.rows())
            .map(|(index, line)| VisibleLine {
                number: index + 1,
                text: line
                    .into_iter()
                    .skip(cursor.scroll_column)
                    .take(text_width)
                    .collect(),
            })
            .collect();

        let caret = (
            cursor.column.saturating_sub(cursor.scroll_column) + self.left_margin,
            cursor.row.saturating_sub(cursor.scroll_row),
        );

        Screen { lines, caret }
    }

    /// Line number right-aligned in the gutter, leaving one blank column.
    /// Always exactly `left_margin` wide; numbers too long for the gutter
    /// keep their low-order digits.
    pub fn gutter(&self, number: usize) -> String {
        let width = self.left_margin.saturating_sub(1);
        if width == 0 {
            return " ".repeat(self.left_margin);
        }
        let digits = number.to_string();
        let shown = &digits[digits.len().saturating_sub(width)..];
        format!("{:>width$} ", shown, width = width)
    }
}
