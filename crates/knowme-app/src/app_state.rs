//! Event loop: input batches, handler tasks, typewriter ticks, painting.

use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use knowme_core::{CommandCompleted, PendingCommand, Terminal, run_pending};
use knowme_types::input::InputEvent;

use crate::{commands, input, render, tty};

/// Interval between background animation frames.
pub const ANIMATION_INTERVAL: Duration = Duration::from_millis(120);

/// Longest single wait in `event::poll`.
const MAX_POLL: Duration = Duration::from_millis(100);

pub struct App {
    pub terminal: Terminal,
    runtime: Handle,
    inbox_tx: UnboundedSender<CommandCompleted>,
    inbox_rx: UnboundedReceiver<CommandCompleted>,
    next_tick: Option<Instant>,
    next_frame: Instant,
    frame: u64,
}

impl App {
    pub fn new(terminal: Terminal, runtime: Handle) -> Self {
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        Self {
            terminal,
            runtime,
            inbox_tx,
            inbox_rx,
            next_tick: None,
            next_frame: Instant::now(),
            frame: 0,
        }
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Run until the user quits.
    pub fn run(&mut self, out: &mut impl Write) -> Result<()> {
        log::info!("interactive session started");
        loop {
            let now = Instant::now();
            self.drain_inbox();
            self.advance(now);
            let (w, h) = tty::Screen::size()?;
            let rows = render::layout(&self.terminal, self.frame, w, h);
            render::paint(out, &rows, self.terminal.theme())?;

            let batch = read_batch(self.poll_timeout(Instant::now()))?;
            if batch.contains(&InputEvent::Quit) {
                log::info!("quit requested");
                return Ok(());
            }
            if !batch.is_empty() {
                self.handle_batch(&batch);
            }
        }
    }

    /// Feed one batch of input to the terminal, spawning any submitted command.
    pub fn handle_batch(&mut self, batch: &[InputEvent]) {
        if let Some(pending) = self.terminal.handle_events(batch) {
            self.spawn(pending);
        }
        if self.terminal.session().cancel_requested {
            // Retire a cancelled render on the next advance.
            self.next_tick = None;
        }
    }

    fn spawn(&self, pending: PendingCommand) {
        let registry = Arc::clone(self.terminal.registry());
        let tx = self.inbox_tx.clone();
        let id = pending.id;
        self.runtime.spawn(async move {
            let completed = match tokio::spawn(run_pending(registry, pending)).await {
                Ok(completed) => completed,
                Err(e) => {
                    log::warn!("command task failed: {e}");
                    CommandCompleted {
                        id,
                        lines: vec![format!("Error: {e}")],
                        effects: Vec::new(),
                    }
                },
            };
            // The receiver is gone only when the app is shutting down.
            let _ = tx.send(completed);
        });
    }

    /// Apply finished handler runs and open any requested URLs.
    pub fn drain_inbox(&mut self) {
        while let Ok(completed) = self.inbox_rx.try_recv() {
            self.terminal.finish_command(completed);
        }
        for url in self.terminal.take_open_requests() {
            commands::open_url(&url);
        }
    }

    /// Step the typewriter and the background animation up to `now`.
    pub fn advance(&mut self, now: Instant) {
        if now >= self.next_frame {
            self.frame = self.frame.wrapping_add(1);
            self.next_frame = now + ANIMATION_INTERVAL;
        }
        if !self.terminal.is_rendering() {
            self.next_tick = None;
            return;
        }
        while self.next_tick.is_none_or(|t| t <= now) {
            match self.terminal.tick() {
                Some(delay) if delay.is_zero() => {},
                Some(delay) => self.next_tick = Some(now + delay),
                None => {
                    self.next_tick = None;
                    break;
                },
            }
        }
    }

    fn poll_timeout(&self, now: Instant) -> Duration {
        let mut deadline = self.next_frame.min(now + MAX_POLL);
        if let Some(tick) = self.next_tick {
            deadline = deadline.min(tick);
        }
        if self.terminal.is_busy() && !self.terminal.is_rendering() {
            // Waiting on a handler: check the inbox at the frame rate.
            deadline = deadline.min(now + ANIMATION_INTERVAL);
        }
        deadline.saturating_duration_since(now)
    }
}

/// Block up to `timeout` for input, then drain everything already queued.
fn read_batch(timeout: Duration) -> Result<Vec<InputEvent>> {
    let mut batch = Vec::new();
    if event::poll(timeout)? {
        batch.extend(input::map_event(&event::read()?));
        while event::poll(Duration::ZERO)? {
            batch.extend(input::map_event(&event::read()?));
        }
    }
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;

    use knowme_core::TerminalOptions;
    use knowme_terminal::{CommandRegistry, register_builtins};
    use knowme_types::config::TypewriterConfig;

    fn app(rt: &tokio::runtime::Runtime) -> App {
        let mut reg = CommandRegistry::new();
        register_builtins(&mut reg);
        let options = TerminalOptions {
            typewriter: TypewriterConfig {
                chars_per_second: 1_000_000,
                line_pause_ms: 0,
                ..TypewriterConfig::default()
            },
            ..TerminalOptions::default()
        };
        App::new(Terminal::new(Arc::new(reg), options), rt.handle().clone())
    }

    fn typed(text: &str) -> Vec<InputEvent> {
        let mut events: Vec<InputEvent> = text.chars().map(InputEvent::TextInput).collect();
        events.push(InputEvent::Submit);
        events
    }

    fn wait_idle(app: &mut App) {
        let start = Instant::now();
        while app.terminal.is_busy() {
            assert!(start.elapsed() < Duration::from_secs(5), "command never finished");
            app.drain_inbox();
            app.advance(Instant::now() + Duration::from_secs(1));
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn echo_round_trip() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&rt);
        app.handle_batch(&typed("echo hello world"));
        assert!(app.terminal.is_busy());
        wait_idle(&mut app);
        let last = app.terminal.transcript().last().unwrap();
        assert_eq!(last.text, "hello world");
    }

    #[test]
    fn cancel_while_waiting_for_handler() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&rt);
        app.handle_batch(&typed("whoami"));
        app.handle_batch(&[InputEvent::Cancel]);
        assert!(!app.terminal.is_busy());
        std::thread::sleep(Duration::from_millis(50));
        app.drain_inbox();
        app.advance(Instant::now());
        let texts = app.terminal.transcript().output_texts();
        assert_eq!(texts.last(), Some(&"Command cancelled."));
        assert!(!texts.contains(&"dyno8426"));
    }

    #[test]
    fn cancel_stops_render_on_next_advance() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&rt);
        app.handle_batch(&typed("help"));
        let start = Instant::now();
        while !app.terminal.is_rendering() {
            assert!(start.elapsed() < Duration::from_secs(5), "help never finished");
            app.drain_inbox();
            std::thread::sleep(Duration::from_millis(5));
        }
        app.advance(Instant::now());
        app.handle_batch(&[InputEvent::Cancel]);
        let before = app.terminal.transcript().len();
        app.advance(Instant::now());
        assert!(!app.terminal.is_rendering());
        assert_eq!(app.terminal.transcript().len(), before);
        let texts = app.terminal.transcript().output_texts();
        assert_eq!(texts.last(), Some(&"Command cancelled."));
    }

    #[test]
    fn frames_advance_over_time() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&rt);
        let start = Instant::now();
        app.advance(start);
        let first = app.frame();
        app.advance(start + ANIMATION_INTERVAL * 2);
        assert!(app.frame() > first);
    }

    #[test]
    fn poll_timeout_is_bounded() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let app = app(&rt);
        assert!(app.poll_timeout(Instant::now()) <= MAX_POLL);
    }
}
