//! Session and utility commands: clear, theme, background, echo, content,
//! whoami, date, open, ndice, visitors, sudo.

use async_trait::async_trait;

use knowme_types::error::Result;
use knowme_types::theme::{Background, Theme};

use crate::content::{SUDO_HIRE_ME_LINES, to_lines};
use crate::interpreter::{Command, CommandOutput, CommandRegistry, Environment};

/// Register the session and utility commands.
pub fn register_shell_commands(reg: &mut CommandRegistry) {
    reg.register(Box::new(ClearCmd));
    reg.register(Box::new(ThemeCmd));
    reg.register(Box::new(BackgroundCmd));
    reg.register(Box::new(EchoCmd));
    reg.register(Box::new(ContentCmd));
    reg.register(Box::new(WhoamiCmd));
    reg.register(Box::new(DateCmd));
    reg.register(Box::new(OpenCmd));
    reg.register(Box::new(NdiceCmd));
    reg.register(Box::new(VisitorsCmd));
    reg.register(Box::new(SudoCmd));
}

// ---------------------------------------------------------------------------
// clear
// ---------------------------------------------------------------------------

struct ClearCmd;

#[async_trait]
impl Command for ClearCmd {
    fn name(&self) -> &str {
        "clear"
    }
    fn description(&self) -> &str {
        "Clear the screen"
    }
    fn usage(&self) -> &str {
        "clear"
    }
    async fn execute(&self, _args: &[&str], env: &mut Environment) -> Result<CommandOutput> {
        env.clear_transcript();
        Ok(CommandOutput::None)
    }
}

// ---------------------------------------------------------------------------
// theme
// ---------------------------------------------------------------------------

struct ThemeCmd;

#[async_trait]
impl Command for ThemeCmd {
    fn name(&self) -> &str {
        "theme"
    }
    fn description(&self) -> &str {
        "Switch theme"
    }
    fn usage(&self) -> &str {
        "theme [green|amber|mono|blue|red]"
    }
    async fn execute(&self, args: &[&str], env: &mut Environment) -> Result<CommandOutput> {
        let next = args.first().map(|a| a.to_lowercase()).unwrap_or_default();
        match next.parse::<Theme>() {
            Ok(theme) => {
                env.set_theme(theme);
                Ok(CommandOutput::line(format!("Theme set to {theme}.")))
            },
            Err(_) => Ok(CommandOutput::line(format!(
                "Unknown theme '{next}'. Available: {}",
                Theme::available()
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// background
// ---------------------------------------------------------------------------

struct BackgroundCmd;

#[async_trait]
impl Command for BackgroundCmd {
    fn name(&self) -> &str {
        "background"
    }
    fn description(&self) -> &str {
        "Switch the decorative background"
    }
    fn usage(&self) -> &str {
        "background [matrix|grid]"
    }
    async fn execute(&self, args: &[&str], env: &mut Environment) -> Result<CommandOutput> {
        let Some(arg) = args.first() else {
            env.toggle_background();
            return Ok(CommandOutput::line("Background toggled."));
        };
        match arg.parse::<Background>() {
            Ok(bg) => {
                env.set_background(bg);
                Ok(CommandOutput::line(format!("Background set to {bg}.")))
            },
            Err(_) => Ok(CommandOutput::line(format!(
                "Unknown background '{arg}'. Available: {}",
                Background::available()
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// echo / content
// ---------------------------------------------------------------------------

struct EchoCmd;

#[async_trait]
impl Command for EchoCmd {
    fn name(&self) -> &str {
        "echo"
    }
    fn description(&self) -> &str {
        "Print text"
    }
    fn usage(&self) -> &str {
        "echo <text>"
    }
    async fn execute(&self, args: &[&str], _env: &mut Environment) -> Result<CommandOutput> {
        Ok(CommandOutput::line(args.join(" ")))
    }
}

struct ContentCmd;

#[async_trait]
impl Command for ContentCmd {
    fn name(&self) -> &str {
        "content"
    }
    fn description(&self) -> &str {
        "Append arbitrary content"
    }
    fn usage(&self) -> &str {
        "content <text>"
    }
    async fn execute(&self, args: &[&str], _env: &mut Environment) -> Result<CommandOutput> {
        if args.is_empty() {
            return Ok(CommandOutput::line("Usage: content <text>"));
        }
        Ok(CommandOutput::line(args.join(" ")))
    }
}

// ---------------------------------------------------------------------------
// whoami / date
// ---------------------------------------------------------------------------

struct WhoamiCmd;

#[async_trait]
impl Command for WhoamiCmd {
    fn name(&self) -> &str {
        "whoami"
    }
    fn description(&self) -> &str {
        "Print current user"
    }
    fn usage(&self) -> &str {
        "whoami"
    }
    async fn execute(&self, _args: &[&str], env: &mut Environment) -> Result<CommandOutput> {
        Ok(CommandOutput::line(env.user.clone()))
    }
}

struct DateCmd;

#[async_trait]
impl Command for DateCmd {
    fn name(&self) -> &str {
        "date"
    }
    fn description(&self) -> &str {
        "Print date/time"
    }
    fn usage(&self) -> &str {
        "date"
    }
    async fn execute(&self, _args: &[&str], _env: &mut Environment) -> Result<CommandOutput> {
        Ok(CommandOutput::line(format_local_time(chrono::Local::now())))
    }
}

/// `9/19/2025, 3:04:05 PM`
fn format_local_time<Tz: chrono::TimeZone>(t: chrono::DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    t.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

// ---------------------------------------------------------------------------
// open
// ---------------------------------------------------------------------------

struct OpenCmd;

#[async_trait]
impl Command for OpenCmd {
    fn name(&self) -> &str {
        "open"
    }
    fn description(&self) -> &str {
        "Open a URL"
    }
    fn usage(&self) -> &str {
        "open <url>"
    }
    async fn execute(&self, args: &[&str], env: &mut Environment) -> Result<CommandOutput> {
        let Some(url) = args.first() else {
            return Ok(CommandOutput::line("Usage: open <url>"));
        };
        if !looks_like_web_url(url) {
            return Ok(CommandOutput::line("Invalid URL format. Use http(s)://..."));
        }
        env.open_url(*url);
        Ok(CommandOutput::line(format!("Opened URL: {url}")))
    }
}

/// `http://` or `https://` followed by something with an inner dot.
fn looks_like_web_url(url: &str) -> bool {
    let Some(rest) = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
    else {
        return false;
    };
    rest.char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < rest.len())
}

// ---------------------------------------------------------------------------
// ndice
// ---------------------------------------------------------------------------

struct NdiceCmd;

const DEFAULT_DICE_MAX: u64 = 6;

#[async_trait]
impl Command for NdiceCmd {
    fn name(&self) -> &str {
        "ndice"
    }
    fn description(&self) -> &str {
        "Random number between 0 and N"
    }
    fn usage(&self) -> &str {
        "ndice [int]"
    }
    async fn execute(&self, args: &[&str], _env: &mut Environment) -> Result<CommandOutput> {
        let max = match args.first() {
            None => DEFAULT_DICE_MAX,
            Some(a) => match a.parse::<u64>() {
                Ok(n) => n,
                Err(_) => return Ok(CommandOutput::line("Usage: ndice [int]")),
            },
        };
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64;
        Ok(CommandOutput::line(format!("🎲 {}", roll(seed, max))))
    }
}

/// Map `seed` into `0..=max`.
fn roll(seed: u64, max: u64) -> u64 {
    match max.checked_add(1) {
        Some(span) => seed % span,
        None => seed,
    }
}

// ---------------------------------------------------------------------------
// visitors
// ---------------------------------------------------------------------------

struct VisitorsCmd;

#[async_trait]
impl Command for VisitorsCmd {
    fn name(&self) -> &str {
        "visitors"
    }
    fn description(&self) -> &str {
        "Show visitor count"
    }
    fn usage(&self) -> &str {
        "visitors"
    }
    async fn execute(&self, _args: &[&str], env: &mut Environment) -> Result<CommandOutput> {
        Ok(CommandOutput::line(match env.visits {
            Some(n) => format!("Visitors: {}", group_thousands(n)),
            None => "Visitor count unavailable.".to_string(),
        }))
    }
}

/// `1234567` -> `1,234,567`
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ---------------------------------------------------------------------------
// sudo
// ---------------------------------------------------------------------------

struct SudoCmd;

#[async_trait]
impl Command for SudoCmd {
    fn name(&self) -> &str {
        "sudo"
    }
    fn description(&self) -> &str {
        "Fun easter egg"
    }
    fn usage(&self) -> &str {
        "sudo hire-me"
    }
    async fn execute(&self, args: &[&str], _env: &mut Environment) -> Result<CommandOutput> {
        if args.join(" ") == "hire-me" {
            return Ok(CommandOutput::Lines(to_lines(SUDO_HIRE_ME_LINES)));
        }
        Ok(CommandOutput::line("sudo: permission denied 😅"))
    }
}
