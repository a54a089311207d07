//! crossterm key events to terminal input events.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use knowme_types::input::InputEvent;

/// Map one crossterm event. Releases, mouse and resize events map to nothing.
pub fn map_event(event: &Event) -> Vec<InputEvent> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => map_key(key).into_iter().collect(),
        Event::Paste(text) => paste_events(text),
        _ => Vec::new(),
    }
}

pub fn map_key(key: &KeyEvent) -> Option<InputEvent> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => Some(InputEvent::Cancel),
        KeyCode::Char('d') if ctrl => Some(InputEvent::Quit),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Char(ch) => Some(InputEvent::TextInput(ch)),
        KeyCode::Backspace => Some(InputEvent::Backspace),
        KeyCode::Enter => Some(InputEvent::Submit),
        KeyCode::Up => Some(InputEvent::HistoryPrevious),
        KeyCode::Down => Some(InputEvent::HistoryNext),
        KeyCode::Tab => Some(InputEvent::Complete),
        KeyCode::F(2) => Some(InputEvent::ToggleBackground),
        KeyCode::Esc => Some(InputEvent::Quit),
        _ => None,
    }
}

/// Expand a paste into text input, dropping control characters.
fn paste_events(text: &str) -> Vec<InputEvent> {
    text.chars()
        .filter(|c| !c.is_control())
        .map(InputEvent::TextInput)
        .collect()
}
