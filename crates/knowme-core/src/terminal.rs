//! Command executor: the terminal a front end drives.
//!
//! The lifecycle is `Idle -> Busy (handler, then typewriter) -> Idle`, with
//! cancellation as the only early way back to `Idle`. Handlers run as
//! separate tasks (see [`run_pending`]) so the front end keeps reading keys
//! while a proxy fetch is in flight. Rendering is stepped through
//! [`Terminal::tick`].

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use knowme_net::SuggestionSource;
use knowme_terminal::{CommandRegistry, Environment, SessionEffect, parse_command, render_prompt};
use knowme_types::config::{KnowmeConfig, TypewriterConfig};
use knowme_types::error::KnowmeError;
use knowme_types::input::InputEvent;
use knowme_types::theme::{Background, Theme};

use crate::editor::{Completion, complete};
use crate::session::SessionState;
use crate::task::{TaskId, TaskSeq, TaskState};
use crate::transcript::Transcript;
use crate::typewriter::{RenderStep, TypewriterJob};

/// First feedback line appended on cancellation.
pub const CANCEL_ECHO: &str = "^C";
/// Second feedback line appended on cancellation.
pub const CANCEL_NOTICE: &str = "Command cancelled.";

/// Static settings for a [`Terminal`].
#[derive(Debug, Clone)]
pub struct TerminalOptions {
    pub user: String,
    pub host: String,
    pub typewriter: TypewriterConfig,
    pub history_limit: usize,
    pub theme: Theme,
    pub background: Background,
}

impl TerminalOptions {
    pub fn from_config(config: &KnowmeConfig) -> Self {
        Self {
            user: config.prompt.user.clone(),
            host: config.prompt.host.clone(),
            typewriter: config.typewriter.clone(),
            history_limit: config.history.limit,
            theme: config.session.theme,
            background: config.session.background,
        }
    }
}

impl Default for TerminalOptions {
    fn default() -> Self {
        Self::from_config(&KnowmeConfig::default())
    }
}

/// A parsed command waiting to be run by [`run_pending`].
pub struct PendingCommand {
    pub id: TaskId,
    pub name: String,
    pub args: Vec<String>,
    pub env: Environment,
}

/// Result of a handler run, fed back through [`Terminal::finish_command`].
#[derive(Debug)]
pub struct CommandCompleted {
    pub id: TaskId,
    pub lines: Vec<String>,
    pub effects: Vec<SessionEffect>,
}

/// Run a handler to completion, turning failures into output lines.
pub async fn run_pending(registry: Arc<CommandRegistry>, pending: PendingCommand) -> CommandCompleted {
    let PendingCommand {
        id,
        name,
        args,
        mut env,
    } = pending;
    let refs: Vec<&str> = args.iter().map(String::as_str).collect();
    let lines = match registry.dispatch(&name, &refs, &mut env).await {
        Ok(out) => out.into_lines(),
        Err(e @ KnowmeError::UnknownCommand(_)) => vec![e.to_string()],
        Err(e) => {
            log::warn!("{name} failed: {e}");
            vec![format!("Error: {e}")]
        },
    };
    CommandCompleted {
        id,
        lines,
        effects: env.take_effects(),
    }
}

/// One interactive terminal session.
pub struct Terminal {
    registry: Arc<CommandRegistry>,
    options: TerminalOptions,
    session: SessionState,
    visits: Option<u64>,
    suggestions: Option<Arc<dyn SuggestionSource>>,
    seq: TaskSeq,
    task: TaskState,
    job: Option<TypewriterJob>,
    open_requests: Vec<String>,
}

impl Terminal {
    pub fn new(registry: Arc<CommandRegistry>, options: TerminalOptions) -> Self {
        let session = SessionState::new(options.theme, options.background, options.history_limit);
        Self {
            registry,
            options,
            session,
            visits: None,
            suggestions: None,
            seq: TaskSeq::default(),
            task: TaskState::default(),
            job: None,
            open_requests: Vec::new(),
        }
    }

    pub fn with_visits(mut self, visits: Option<u64>) -> Self {
        self.visits = visits;
        self
    }

    pub fn with_suggestions(mut self, source: Arc<dyn SuggestionSource>) -> Self {
        self.suggestions = Some(source);
        self
    }

    // -- Accessors --

    pub fn registry(&self) -> &Arc<CommandRegistry> {
        &self.registry
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn transcript(&self) -> &Transcript {
        &self.session.transcript
    }

    pub fn theme(&self) -> Theme {
        self.session.theme
    }

    pub fn background(&self) -> Background {
        self.session.background
    }

    pub fn input(&self) -> &str {
        self.session.editor.text()
    }

    pub fn is_busy(&self) -> bool {
        self.session.busy
    }

    pub fn is_rendering(&self) -> bool {
        self.job.is_some()
    }

    pub fn visits(&self) -> Option<u64> {
        self.visits
    }

    pub fn user(&self) -> &str {
        &self.options.user
    }

    pub fn host(&self) -> &str {
        &self.options.host
    }

    pub fn prompt(&self) -> String {
        render_prompt(&self.options.user, &self.options.host)
    }

    /// URLs handlers asked to open since the last call.
    pub fn take_open_requests(&mut self) -> Vec<String> {
        std::mem::take(&mut self.open_requests)
    }

    // -- Input --

    /// Apply a batch of input events read in the same tick.
    ///
    /// A cancel in the batch drops any completion request in it. While busy,
    /// only global events (cancel, background toggle, quit) are honoured.
    pub fn handle_events(&mut self, events: &[InputEvent]) -> Option<PendingCommand> {
        let cancelling = events.contains(&InputEvent::Cancel);
        let mut pending = None;
        for event in events {
            if cancelling && *event == InputEvent::Complete {
                log::debug!("completion dropped in favour of cancel");
                continue;
            }
            if let Some(p) = self.handle_event(event) {
                pending = Some(p);
            }
        }
        pending.filter(|p| self.task.is_active(p.id))
    }

    pub fn handle_event(&mut self, event: &InputEvent) -> Option<PendingCommand> {
        if self.session.busy && !event.is_global() {
            return None;
        }
        match event {
            InputEvent::Cancel => self.cancel(),
            InputEvent::ToggleBackground => {
                self.session.background = self.session.background.toggled();
            },
            InputEvent::Quit => {},
            InputEvent::TextInput(ch) => self.session.editor.insert(*ch),
            InputEvent::Backspace => self.session.editor.backspace(),
            InputEvent::Submit => return self.submit(),
            InputEvent::HistoryPrevious => self.history_previous(),
            InputEvent::HistoryNext => self.history_next(),
            InputEvent::Complete => self.complete(),
        }
        None
    }

    /// Submit the edit buffer. Blank input is ignored and left in place.
    pub fn submit(&mut self) -> Option<PendingCommand> {
        if self.session.busy || self.session.editor.is_blank() {
            return None;
        }
        let raw = self.session.editor.take();
        self.session.history.push(raw.clone());
        self.begin(&raw)
    }

    pub fn history_previous(&mut self) {
        if let Some(line) = self.session.history.previous().map(str::to_string) {
            self.session.editor.set(line);
        }
    }

    pub fn history_next(&mut self) {
        let line = self
            .session
            .history
            .next()
            .map(str::to_string)
            .unwrap_or_default();
        self.session.editor.set(line);
    }

    /// Tab-complete the command token.
    pub fn complete(&mut self) {
        match complete(self.session.editor.text(), &self.registry) {
            Completion::Single(name) => self.session.editor.set(format!("{name} ")),
            Completion::Multiple(matches) if !self.session.busy => {
                let attempted = self.session.editor.take();
                let echo = format!("{}{}", self.prompt(), attempted.trim());
                self.session.transcript.push_input(echo);
                self.session.busy = true;
                self.start_render(vec![format!("Suggestions: {}", matches.join(" "))]);
            },
            _ => {},
        }
    }

    /// Interrupt the running command, or clear the buffer when idle.
    pub fn cancel(&mut self) {
        if !self.session.busy {
            self.session.editor.clear();
            self.session.history.reset_cursor();
            return;
        }
        log::info!("command cancelled");
        self.session.cancel_requested = true;
        self.session.busy = false;
        self.task.clear();
        self.session.transcript.push_output(CANCEL_ECHO);
        self.session.transcript.push_output(CANCEL_NOTICE);
    }

    // -- Execution --

    /// Parse `raw`, echo it and mark the session busy.
    ///
    /// Returns `None` for blank input or while another command is running.
    pub fn begin(&mut self, raw: &str) -> Option<PendingCommand> {
        if self.session.busy {
            log::debug!("busy; ignoring {raw:?}");
            return None;
        }
        let parsed = parse_command(raw);
        if parsed.is_empty() {
            return None;
        }
        let echo = format!("{}{}", self.prompt(), raw.trim());
        self.session.transcript.push_input(echo);
        self.session.busy = true;
        self.session.cancel_requested = false;
        // A cancelled job not yet ticked out.
        self.job = None;

        let id = self.seq.next_id();
        self.task.start(id);
        log::debug!("begin {id:?}: {}", parsed.name);
        Some(PendingCommand {
            id,
            name: parsed.name,
            args: parsed.args,
            env: self.environment(),
        })
    }

    fn environment(&self) -> Environment {
        let env = Environment::new(self.options.user.clone(), Arc::clone(&self.registry))
            .with_visits(self.visits);
        match &self.suggestions {
            Some(source) => env.with_suggestions(Arc::clone(source)),
            None => env,
        }
    }

    /// Apply a finished handler run. Stale runs (cancelled since) are
    /// dropped and `false` is returned.
    pub fn finish_command(&mut self, completed: CommandCompleted) -> bool {
        if !self.task.finish_if_active(completed.id) {
            log::debug!("dropping output of stale task {:?}", completed.id);
            return false;
        }
        for effect in completed.effects {
            if let Some(url) = self.session.apply(effect) {
                self.open_requests.push(url);
            }
        }
        self.start_render(completed.lines);
        true
    }

    fn start_render(&mut self, lines: Vec<String>) {
        self.session.cancel_requested = false;
        if lines.is_empty() {
            self.session.busy = false;
            return;
        }
        log::debug!("render {} line(s)", lines.len());
        self.job = Some(TypewriterJob::new(lines, &self.options.typewriter));
    }

    /// Reveal the next batch of output.
    ///
    /// Returns the delay before the next tick, or `None` when nothing is
    /// left to render. A pending cancel stops the job here, before any
    /// further batch is revealed.
    pub fn tick(&mut self) -> Option<Duration> {
        let job = self.job.as_mut()?;
        if self.session.cancel_requested {
            job.cancel();
        }
        match job.step(&mut self.session.transcript) {
            RenderStep::Continue(delay) => Some(delay),
            RenderStep::Done => {
                self.job = None;
                self.session.busy = false;
                None
            },
            RenderStep::Cancelled => {
                self.job = None;
                None
            },
        }
    }

    /// Run one line end to end: handler, effects, typewriter.
    ///
    /// `cancel` firing behaves like the cancel key. The handler task is
    /// detached, not aborted.
    pub async fn execute(&mut self, raw: &str, cancel: &CancellationToken) {
        let Some(pending) = self.begin(raw) else {
            return;
        };
        let id = pending.id;
        let handle = tokio::spawn(run_pending(Arc::clone(&self.registry), pending));
        let completed = tokio::select! {
            _ = cancel.cancelled() => {
                self.cancel();
                return;
            },
            joined = handle => match joined {
                Ok(completed) => completed,
                Err(e) => {
                    log::warn!("command task failed: {e}");
                    CommandCompleted {
                        id,
                        lines: vec![format!("Error: {e}")],
                        effects: Vec::new(),
                    }
                },
            },
        };
        self.finish_command(completed);
        self.render_pending(cancel).await;
    }

    /// Tick the typewriter with real sleeps until it finishes or `cancel`
    /// fires.
    pub async fn render_pending(&mut self, cancel: &CancellationToken) {
        loop {
            if cancel.is_cancelled() && self.session.busy {
                self.cancel();
            }
            let Some(delay) = self.tick() else {
                return;
            };
            if delay.is_zero() {
                continue;
            }
            tokio::select! {
                _ = cancel.cancelled() => {},
                _ = tokio::time::sleep(delay) => {},
            }
        }
    }
}
