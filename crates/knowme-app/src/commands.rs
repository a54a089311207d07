//! Side effects the front end performs on behalf of commands, and the
//! non-interactive `--exec` path.

use std::sync::Arc;

use knowme_core::{Terminal, run_pending};
use knowme_terminal::SessionEffect;

/// Hand `url` to the system browser. Failures are logged, never fatal.
pub fn open_url(url: &str) {
    log::info!("opening {url}");
    if let Err(e) = open::that_detached(url) {
        log::warn!("could not open {url}: {e}");
    }
}

/// Run one command line without the typewriter and return its output.
///
/// URL effects are honoured. Effects that only change the screen are
/// logged and dropped.
pub async fn exec_line(terminal: &mut Terminal, line: &str) -> Vec<String> {
    let Some(pending) = terminal.begin(line) else {
        return Vec::new();
    };
    let completed = run_pending(Arc::clone(terminal.registry()), pending).await;
    for effect in &completed.effects {
        match effect {
            SessionEffect::OpenUrl(url) => open_url(url),
            other => log::debug!("--exec ignores {other:?}"),
        }
    }
    completed.lines
}
