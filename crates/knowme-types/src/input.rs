//! Front-end-agnostic input events for the terminal line editor.
//!
//! Every front end maps its native key events to [`InputEvent`]. The
//! session layer never sees raw key codes.

use serde::{Deserialize, Serialize};

/// A line-editor input event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Character typed into the input buffer.
    TextInput(char),
    /// Delete the character left of the cursor.
    Backspace,
    /// Submit the input buffer as a command line.
    Submit,
    /// Step back through command history (older entries).
    HistoryPrevious,
    /// Step forward through command history, towards live input.
    HistoryNext,
    /// Tab completion of the command token.
    Complete,
    /// Interrupt the running command (Ctrl+C).
    Cancel,
    /// Flip between the two decorative backgrounds.
    ToggleBackground,
    /// Leave the terminal.
    Quit,
}

impl InputEvent {
    /// Whether the event must be honored while a command is rendering.
    ///
    /// Everything else is swallowed while the session is busy.
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Cancel | Self::ToggleBackground | Self::Quit)
    }
}
