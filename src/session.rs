use crossterm::event::{KeyCode, KeyEvent};
use tracing::{info, warn};

use crate::edit::EditFile;
use crate::input::Command;
use crate::io::FileStore;
use crate::ui::{CommandOutcome, Screen, Viewport};

pub const UNSAVED_CHANGES_PROMPT: &str = "You have unsaved changes. Save before exiting? (y/n)";

/// Key the status bar is waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    /// Any key dismisses the message
    Acknowledge,
    /// `y` saves before quitting, anything else quits
    ConfirmQuit,
}

/// One editing session: the open document, its window, where it is saved to
/// and the status bar state.
pub struct Session<S: FileStore> {
    file: EditFile,
    viewport: Viewport,
    store: S,
    status: Option<String>,
    prompt: Option<Prompt>,
    should_quit: bool,
}

impl<S: FileStore> Session<S> {
    pub fn new(file: EditFile, viewport: Viewport, store: S) -> Self {
        Self {
            file,
            viewport,
            store,
            status: None,
            prompt: None,
            should_quit: false,
        }
    }

    pub fn file(&self) -> &EditFile {
        &self.file
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn prompt(&self) -> Option<Prompt> {
        self.prompt
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Track the terminal size and pull the cursor back into the window
    pub fn resize(&mut self, width: usize, height: usize) {
        self.viewport.resize(width, height);
        self.viewport.follow_cursor(&mut self.file);
    }

    pub fn render(&self) -> Screen {
        self.viewport.render(&self.file)
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.prompt.take() {
            Some(Prompt::Acknowledge) => {
                self.status = None;
                return;
            }
            Some(Prompt::ConfirmQuit) => {
                self.status = None;
                let wants_save = matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y'));
                // A failed save keeps the session open so no edits are lost
                if !wants_save || self.save() {
                    info!(saved = wants_save, "quit");
                    self.should_quit = true;
                }
                return;
            }
            None => {}
        }

        if let Some(command) = Command::from_key(key) {
            self.handle_command(command);
        }
    }

    pub fn handle_command(&mut self, command: Command) {
        self.status = None;

        match self.viewport.apply(&mut self.file, command) {
            Ok(CommandOutcome::Handled) => {}
            Ok(CommandOutcome::Save) => {
                self.save();
            }
            Ok(CommandOutcome::Quit) => {
                if self.file.is_modified() {
                    self.status = Some(UNSAVED_CHANGES_PROMPT.to_string());
                    self.prompt = Some(Prompt::ConfirmQuit);
                } else {
                    info!("quit");
                    self.should_quit = true;
                }
            }
            Err(err) => {
                warn!(?command, error = %err, "command failed");
                self.status = Some(err.to_string());
            }
        }
    }

    /// Save and report the outcome in the status bar
    fn save(&mut self) -> bool {
        match self.file.save(&self.store) {
            Ok(bytes) => {
                self.status = Some(format!(
                    "Written {} bytes to file. Press any key to continue",
                    bytes
                ));
                self.prompt = Some(Prompt::Acknowledge);
                true
            }
            Err(err) => {
                self.status = Some(err.to_string());
                false
            }
        }
    }

    pub fn status_line(&self) -> String {
        if let Some(status) = &self.status {
            return format!(" {}", status);
        }

        let file_name = self
            .file
            .path()
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("<unnamed>");
        let cursor = self.file.cursor();
        format!(
            " {}{} | {}:{} | {} lines | Ctrl+S: save | Esc: quit",
            file_name,
            if self.file.is_modified() { " [+]" } else { "" },
            cursor.row + 1,
            cursor.column + 1,
            self.file.total_lines(),
        )
    }
}
