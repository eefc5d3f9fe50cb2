pub mod buffer;
pub mod config;
pub mod edit;
pub mod error;
pub mod input;
pub mod io;
pub mod log;
pub mod session;
pub mod ui;

pub use buffer::{CharBuffer, Cursor, Piece, PieceTable, Source};
pub use config::{Cli, EditorConfig};
pub use edit::{EditCommand, EditFile};
pub use error::{EditorError, Result};
pub use input::Command;
pub use io::{DiskStore, FileStore};
pub use session::{Prompt, Session};
pub use ui::{CommandOutcome, Screen, Viewport, VisibleLine};
