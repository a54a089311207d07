//! `knowme`: an interactive portfolio terminal.
//!
//! Type `help` for commands. Tab completes, Up/Down walk the history,
//! Ctrl+C cancels a running command, F2 switches the background and Esc
//! quits. `--exec "<line>"` runs one command and prints its output.

mod app_state;
mod commands;
mod input;
mod render;
mod tty;

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use app_state::App;
use knowme_core::visitors::{self, VisitorStore};
use knowme_core::{Terminal, TerminalOptions};
use knowme_net::ProxyClient;
use knowme_terminal::{CommandRegistry, register_builtins};
use knowme_types::config::{ENV_CONFIG, ENV_SESSION_ID, KnowmeConfig};
use knowme_types::error::KnowmeError;
use knowme_types::theme::Theme;

#[derive(Debug, Parser)]
#[command(name = "knowme", version, about = "A portfolio you can talk to from a shell")]
struct Cli {
    /// TOML config file.
    #[arg(long, env = ENV_CONFIG, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Run a single command line, print its output and exit.
    #[arg(long, value_name = "LINE")]
    exec: Option<String>,

    /// Starting colour theme.
    #[arg(long, value_parser = parse_theme)]
    theme: Option<Theme>,

    /// Do not record this session in the visitor counter.
    #[arg(long)]
    no_visit: bool,
}

fn parse_theme(s: &str) -> Result<Theme, String> {
    s.parse().map_err(|e: KnowmeError| e.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.exec.is_some());

    let config = load_config(cli.config.as_deref())?;
    let mut options = TerminalOptions::from_config(&config);
    if let Some(theme) = cli.theme {
        options.theme = theme;
    }
    log::info!("Starting knowme as {}@{}", options.user, options.host);

    let visits = if cli.no_visit {
        None
    } else {
        count_visit(&config)
    };

    let mut registry = CommandRegistry::new();
    register_builtins(&mut registry);
    log::info!("{} commands registered", registry.len());

    let mut terminal = Terminal::new(Arc::new(registry), options).with_visits(visits);
    match ProxyClient::new(&config.proxy) {
        Ok(client) => terminal = terminal.with_suggestions(Arc::new(client)),
        Err(e) => log::warn!("suggestion commands disabled: {e}"),
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    if let Some(line) = cli.exec {
        for out in runtime.block_on(commands::exec_line(&mut terminal, &line)) {
            println!("{out}");
        }
        return Ok(());
    }

    tty::install_panic_hook();
    let result = {
        let mut screen = tty::Screen::enter()?;
        let mut app = App::new(terminal, runtime.handle().clone());
        app.run(screen.out())
    };
    // Cancelled handlers may still be sleeping on the network.
    runtime.shutdown_background();
    log::info!("knowme shut down");
    result
}

/// Log to stderr in `--exec` mode. Otherwise stderr belongs to the raw
/// screen, so logs go to a file in the data directory.
fn init_logging(exec: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if !exec {
        let target: Box<dyn io::Write + Send> = match open_log_file() {
            Some(file) => Box::new(file),
            None => Box::new(io::sink()),
        };
        builder.target(env_logger::Target::Pipe(target));
    }
    builder.init();
}

fn open_log_file() -> Option<std::fs::File> {
    let dir = dirs::data_dir()?.join("knowme");
    std::fs::create_dir_all(&dir).ok()?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("knowme.log"))
        .ok()
}

/// Explicit path, else `<config dir>/knowme/config.toml` if present, else
/// defaults. Environment overrides apply on top.
fn load_config(explicit: Option<&Path>) -> Result<KnowmeConfig> {
    let mut config = match explicit {
        Some(path) => KnowmeConfig::load(path)?,
        None => match dirs::config_dir().map(|d| d.join("knowme").join("config.toml")) {
            Some(path) if path.is_file() => KnowmeConfig::load(&path)?,
            _ => KnowmeConfig::default(),
        },
    };
    config.apply_env(|key| std::env::var(key).ok())?;
    Ok(config)
}

/// Record this session and return the running total. Storage problems only
/// cost the counter.
fn count_visit(config: &KnowmeConfig) -> Option<u64> {
    let store = match VisitorStore::from_config(&config.visitors) {
        Ok(store) => store,
        Err(e) => {
            log::warn!("visitor counter unavailable: {e}");
            return None;
        },
    };
    let session = std::env::var(ENV_SESSION_ID).unwrap_or_else(|_| visitors::new_session_id());
    match store.record_visit(&session) {
        Ok(count) => Some(count),
        Err(e) => {
            log::warn!("could not record visit: {e}");
            None
        },
    }
}
