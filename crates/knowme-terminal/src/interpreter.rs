//! Command trait, registry, parsing and dispatch.
//!
//! A raw input line is split on whitespace into a lower-cased command name
//! and its arguments. The registry resolves the name and awaits the handler.
//! Handlers never touch the session directly: they return lines and queue
//! [`SessionEffect`]s on the [`Environment`], which the executor applies.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use knowme_net::SuggestionSource;
use knowme_types::error::{KnowmeError, Result};
use knowme_types::theme::{Background, Theme};

/// Output produced by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Lines to hand to the typewriter renderer.
    Lines(Vec<String>),
    /// Command produced no visible output (side effects only).
    None,
}

impl CommandOutput {
    pub fn line(text: impl Into<String>) -> Self {
        CommandOutput::Lines(vec![text.into()])
    }

    pub fn into_lines(self) -> Vec<String> {
        match self {
            CommandOutput::Lines(lines) => lines,
            CommandOutput::None => Vec::new(),
        }
    }
}

/// Session change requested by a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEffect {
    ClearTranscript,
    SetTheme(Theme),
    SetBackground(Background),
    ToggleBackground,
    /// Ask the host to open a URL in the user's browser.
    OpenUrl(String),
}

/// Context handed to every command.
///
/// Owned and `Send` so a handler can run on its own task while the renderer
/// and the input loop stay live.
pub struct Environment {
    /// Prompt user, reported by `whoami`.
    pub user: String,
    /// Visitor count read at start-up, `None` when unavailable.
    pub visits: Option<u64>,
    /// Remote data proxies. `None` when the session runs offline.
    pub suggestions: Option<Arc<dyn SuggestionSource>>,
    /// The registry the command was dispatched from.
    pub registry: Arc<CommandRegistry>,
    effects: Vec<SessionEffect>,
}

impl Environment {
    pub fn new(user: impl Into<String>, registry: Arc<CommandRegistry>) -> Self {
        Self {
            user: user.into(),
            visits: None,
            suggestions: None,
            registry,
            effects: Vec::new(),
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

    /// Same context with no queued effects.
    pub fn scratch(&self) -> Self {
        Self {
            user: self.user.clone(),
            visits: self.visits,
            suggestions: self.suggestions.clone(),
            registry: Arc::clone(&self.registry),
            effects: Vec::new(),
        }
    }

    pub fn clear_transcript(&mut self) {
        self.effects.push(SessionEffect::ClearTranscript);
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.effects.push(SessionEffect::SetTheme(theme));
    }

    pub fn set_background(&mut self, background: Background) {
        self.effects.push(SessionEffect::SetBackground(background));
    }

    pub fn toggle_background(&mut self) {
        self.effects.push(SessionEffect::ToggleBackground);
    }

    pub fn open_url(&mut self, url: impl Into<String>) {
        self.effects.push(SessionEffect::OpenUrl(url.into()));
    }

    pub fn effects(&self) -> &[SessionEffect] {
        &self.effects
    }

    pub fn take_effects(&mut self) -> Vec<SessionEffect> {
        std::mem::take(&mut self.effects)
    }
}

/// A single executable command.
#[async_trait]
pub trait Command: Send + Sync {
    /// The command name (what the user types).
    fn name(&self) -> &str;

    /// One-line description for `help`.
    fn description(&self) -> &str;

    /// Usage string (e.g. "theme \[name\]").
    fn usage(&self) -> &str;

    /// Execute the command with the given arguments and environment.
    async fn execute(&self, args: &[&str], env: &mut Environment) -> Result<CommandOutput>;
}

/// Name, usage and description of a registered command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInfo {
    pub name: String,
    pub usage: String,
    pub description: String,
}

/// Name-to-handler map. Built once, then shared immutably for the session.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn Command>>,
}

impl CommandRegistry {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command. Replaces any existing command with the same name.
    pub fn register(&mut self, cmd: Box<dyn Command>) {
        self.commands.insert(cmd.name().to_ascii_lowercase(), cmd);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands
            .get(&name.to_ascii_lowercase())
            .map(|c| c.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All command names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Every command's help entry, sorted by name.
    pub fn list_commands(&self) -> Vec<CommandInfo> {
        self.names()
            .into_iter()
            .filter_map(|n| self.commands.get(n))
            .map(|c| CommandInfo {
                name: c.name().to_string(),
                usage: c.usage().to_string(),
                description: c.description().to_string(),
            })
            .collect()
    }

    /// Command names starting with `partial`, sorted.
    pub fn completions(&self, partial: &str) -> Vec<String> {
        self.names()
            .into_iter()
            .filter(|n| n.starts_with(partial))
            .map(str::to_string)
            .collect()
    }

    /// Resolve `name` and run it.
    pub async fn dispatch(
        &self,
        name: &str,
        args: &[&str],
        env: &mut Environment,
    ) -> Result<CommandOutput> {
        let Some(cmd) = self.get(name) else {
            return Err(KnowmeError::UnknownCommand(name.to_string()));
        };
        log::debug!("dispatch {name} {args:?}");
        cmd.execute(args, env).await
    }
}

/// A tokenized input line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCommand {
    /// Lower-cased first token; empty for blank input.
    pub name: String,
    pub args: Vec<String>,
}

impl ParsedCommand {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    pub fn arg_refs(&self) -> Vec<&str> {
        self.args.iter().map(String::as_str).collect()
    }
}

/// Split a raw line into command and arguments.
///
/// Whitespace runs collapse; there is no quoting or escaping.
pub fn parse_command(raw: &str) -> ParsedCommand {
    let mut tokens = raw.split_whitespace();
    let Some(first) = tokens.next() else {
        return ParsedCommand::default();
    };
    ParsedCommand {
        name: first.to_lowercase(),
        args: tokens.map(str::to_string).collect(),
    }
}

/// Prompt prefix shown before the line editor and echoed input.
pub fn render_prompt(user: &str, host: &str) -> String {
    format!("{user}@{host}:~$ ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    struct PingCmd;

    #[async_trait]
    impl Command for PingCmd {
        fn name(&self) -> &str {
            "ping"
        }
        fn description(&self) -> &str {
            "Reply with pong"
        }
        fn usage(&self) -> &str {
            "ping"
        }
        async fn execute(&self, args: &[&str], env: &mut Environment) -> Result<CommandOutput> {
            if args.first() == Some(&"clear") {
                env.clear_transcript();
                return Ok(CommandOutput::None);
            }
            Ok(CommandOutput::line("pong"))
        }
    }

    fn registry() -> Arc<CommandRegistry> {
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(PingCmd));
        Arc::new(reg)
    }

    #[test]
    fn parse_basic() {
        let p = parse_command("  Theme   AMBER  ");
        assert_eq!(p.name, "theme");
        assert_eq!(p.args, vec!["AMBER"]);
    }

    #[test]
    fn parse_blank() {
        assert!(parse_command("").is_empty());
        assert!(parse_command(" \t ").is_empty());
    }

    #[test]
    fn parse_args_keep_case() {
        let p = parse_command("echo Hello World");
        assert_eq!(p.arg_refs(), vec!["Hello", "World"]);
    }

    #[test]
    fn prompt_format() {
        assert_eq!(render_prompt("dyno8426", "know-me-cli"), "dyno8426@know-me-cli:~$ ");
    }

    #[test]
    fn prompt_uses_configured_identity() {
        assert_eq!(render_prompt("alice", "host1"), "alice@host1:~$ ");
    }

    #[test]
    fn registry_lookup_case_insensitive() {
        let reg = registry();
        assert!(reg.contains("PING"));
        assert!(!reg.contains("pong"));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn completions_sorted_prefix() {
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(PingCmd));
        assert_eq!(reg.completions("p"), vec!["ping"]);
        assert!(reg.completions("x").is_empty());
        assert_eq!(reg.completions(""), vec!["ping"]);
    }

    #[test]
    fn list_commands_carries_usage() {
        let reg = registry();
        let info = reg.list_commands();
        assert_eq!(info.len(), 1);
        assert_eq!(info[0].description, "Reply with pong");
    }

    #[tokio::test]
    async fn dispatch_known() {
        let reg = registry();
        let mut env = Environment::new("guest", Arc::clone(&reg));
        let out = reg.dispatch("ping", &[], &mut env).await.unwrap();
        assert_eq!(out, CommandOutput::line("pong"));
    }

    #[tokio::test]
    async fn dispatch_unknown() {
        let reg = registry();
        let mut env = Environment::new("guest", Arc::clone(&reg));
        let err = reg.dispatch("foo", &[], &mut env).await.unwrap_err();
        assert_eq!(err.to_string(), "Command not found: foo. Type 'help'.");
    }

    #[tokio::test]
    async fn effects_queue_and_drain() {
        let reg = registry();
        let mut env = Environment::new("guest", Arc::clone(&reg));
        let out = reg.dispatch("ping", &["clear"], &mut env).await.unwrap();
        assert_eq!(out, CommandOutput::None);
        assert_eq!(env.effects(), &[SessionEffect::ClearTranscript]);
        assert!(env.scratch().effects().is_empty());
        assert_eq!(env.take_effects().len(), 1);
        assert!(env.effects().is_empty());
    }

    #[test]
    fn output_into_lines() {
        assert!(CommandOutput::None.into_lines().is_empty());
        assert_eq!(CommandOutput::line("a").into_lines(), vec!["a"]);
    }

    proptest! {
        #[test]
        fn parse_never_panics(raw in ".*") {
            let _ = parse_command(&raw);
        }

        #[test]
        fn parsed_name_is_lowercase(raw in "[A-Za-z]{1,8}( [A-Za-z0-9]{0,5}){0,3}") {
            let p = parse_command(&raw);
            prop_assert_eq!(p.name.clone(), p.name.to_lowercase());
        }

        #[test]
        fn args_have_no_whitespace(raw in "[a-z \\t]{0,40}") {
            let p = parse_command(&raw);
            for a in &p.args {
                prop_assert!(!a.is_empty());
                prop_assert!(!a.chars().any(char::is_whitespace));
            }
        }

        #[test]
        fn token_count_preserved(words in proptest::collection::vec("[a-z]{1,6}", 1..6)) {
            let line = words.join("   ");
            let p = parse_command(&line);
            prop_assert_eq!(p.args.len() + 1, words.len());
        }
    }
}
