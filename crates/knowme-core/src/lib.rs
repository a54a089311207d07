//! Session engine for the portfolio terminal.
//!
//! Owns the transcript, the line editor and history, the typewriter renderer
//! and the executor that ties them to the command registry. Front ends feed
//! it [`InputEvent`](knowme_types::input::InputEvent)s and paint its state.

pub mod editor;
pub mod history;
pub mod session;
pub mod task;
pub mod terminal;
pub mod transcript;
pub mod typewriter;
pub mod visitors;

pub use session::SessionState;
pub use terminal::{CommandCompleted, PendingCommand, Terminal, TerminalOptions, run_pending};
pub use transcript::{EntryKind, Transcript, TranscriptEntry};
pub use visitors::VisitorStore;
