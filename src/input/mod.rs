use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::edit::EditCommand;

/// Commands the session takes from the event source, one at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    PageUp,
    PageDown,
    InsertChar(char),
    InsertSpace,
    InsertNewline,
    Backspace,
    Save,
    Quit,
}

impl Command {
    /// Map a key press to a command. Unbound keys give `None`.
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        let command = match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => Command::Quit,
            (KeyCode::Char('q'), KeyModifiers::CONTROL) => Command::Quit,
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => Command::Save,

            (KeyCode::Up, _) => Command::MoveUp,
            (KeyCode::Down, _) => Command::MoveDown,
            (KeyCode::Left, _) => Command::MoveLeft,
            (KeyCode::Right, _) => Command::MoveRight,
            (KeyCode::PageUp, _) => Command::PageUp,
            (KeyCode::PageDown, _) => Command::PageDown,

            (KeyCode::Enter, _) => Command::InsertNewline,
            (KeyCode::Backspace, _) => Command::Backspace,
            (KeyCode::Char(' '), KeyModifiers::NONE) => Command::InsertSpace,
            (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
                Command::InsertChar(c)
            }

            _ => return None,
        };
        Some(command)
    }

    /// The edit this command performs, if it changes the document
    pub fn as_edit(&self) -> Option<EditCommand> {
        match *self {
            Command::InsertChar(c) => Some(EditCommand::InsertChar(c)),
            Command::InsertSpace => Some(EditCommand::InsertSpace),
            Command::InsertNewline => Some(EditCommand::InsertNewline),
            Command::Backspace => Some(EditCommand::Backspace),
            _ => None,
        }
    }
}
