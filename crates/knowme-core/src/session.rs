//! Per-session mutable state.

use knowme_terminal::SessionEffect;
use knowme_types::theme::{Background, Theme};

use crate::editor::LineEditor;
use crate::history::CommandHistory;
use crate::transcript::Transcript;

/// Everything one running terminal owns.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub transcript: Transcript,
    pub theme: Theme,
    pub background: Background,
    pub history: CommandHistory,
    pub editor: LineEditor,
    /// A command is executing or its output is still being typed.
    pub busy: bool,
    pub cancel_requested: bool,
}

impl SessionState {
    pub fn new(theme: Theme, background: Background, history_limit: usize) -> Self {
        Self {
            transcript: Transcript::new(),
            theme,
            background,
            history: CommandHistory::new(history_limit),
            editor: LineEditor::new(),
            busy: false,
            cancel_requested: false,
        }
    }

    /// Apply a handler effect. Returns a URL the host should open, if any.
    pub fn apply(&mut self, effect: SessionEffect) -> Option<String> {
        match effect {
            SessionEffect::ClearTranscript => self.transcript.clear(),
            SessionEffect::SetTheme(theme) => {
                log::debug!("theme -> {theme}");
                self.theme = theme;
            },
            SessionEffect::SetBackground(bg) => self.background = bg,
            SessionEffect::ToggleBackground => self.background = self.background.toggled(),
            SessionEffect::OpenUrl(url) => return Some(url),
        }
        None
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(Theme::default(), Background::default(), 100)
    }
}
