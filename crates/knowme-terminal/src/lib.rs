//! Command interpreter for the portfolio terminal.
//!
//! Commands implement the async `Command` trait and are registered by name.
//! The interpreter parses input lines, resolves the command name and awaits
//! `execute()`. Handlers report session changes through the `Environment`.

mod commands;
pub mod content;
mod interpreter;
pub mod selftest;
mod shell_commands;
mod suggestion_commands;

/// Register every built-in command into a registry.
pub use commands::register_builtins;
/// A single executable command trait.
pub use interpreter::Command;
/// Name, usage and description of a registered command.
pub use interpreter::CommandInfo;
/// Output produced by a command.
pub use interpreter::CommandOutput;
/// Registry of available commands with dispatch.
pub use interpreter::CommandRegistry;
/// Context passed to every command.
pub use interpreter::Environment;
/// Tokenized input line.
pub use interpreter::ParsedCommand;
/// Session change requested by a handler.
pub use interpreter::SessionEffect;
pub use interpreter::{parse_command, render_prompt};
/// Register clear/theme/background/echo/... into a registry.
pub use shell_commands::{group_thousands, register_shell_commands};
/// Register booksuggestion/photosuggestion into a registry.
pub use suggestion_commands::register_suggestion_commands;
