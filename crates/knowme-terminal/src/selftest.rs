//! Built-in self-checks, run live by the `test` command and by the test suite.

use async_trait::async_trait;

use knowme_types::error::Result;

use crate::content::BANNER_QUOTE;
use crate::interpreter::{Command, CommandOutput, CommandRegistry, Environment};

/// Commands the registry must always provide.
pub const EXPECTED_COMMANDS: &[&str] = &[
    "help",
    "about",
    "work",
    "acads",
    "publications",
    "projects",
    "books",
    "photos",
    "contact",
    "clear",
    "theme",
    "banner",
    "echo",
    "whoami",
    "date",
    "open",
    "sudo",
    "content",
    "test",
];

/// Outcome of one named assertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfCheck {
    pub name: &'static str,
    pub ok: bool,
}

impl SelfCheck {
    fn new(name: &'static str, ok: bool) -> Self {
        Self { name, ok }
    }

    pub fn render(&self) -> String {
        format!("{} {}", if self.ok { "✔" } else { "✖" }, self.name)
    }
}

/// Invoke a handler directly, ignoring any session effects it queues.
async fn run_check(reg: &CommandRegistry, env: &Environment, name: &str, args: &[&str]) -> Vec<String> {
    let mut scratch = env.scratch();
    match reg.dispatch(name, args, &mut scratch).await {
        Ok(out) => out.into_lines(),
        Err(e) => {
            log::warn!("self-check {name} failed: {e}");
            Vec::new()
        },
    }
}

/// Exercise the registry and a handful of handlers.
pub async fn run_self_checks(reg: &CommandRegistry, env: &Environment) -> Vec<SelfCheck> {
    let mut checks = Vec::new();

    checks.push(SelfCheck::new(
        "command registry present",
        EXPECTED_COMMANDS.iter().all(|c| reg.contains(c)),
    ));

    let acads = run_check(reg, env, "acads", &[]).await;
    checks.push(SelfCheck::new("acads returns > 3 lines", acads.len() > 3));

    let pubs = run_check(reg, env, "publications", &[]).await;
    checks.push(SelfCheck::new("publications returns > 3 lines", pubs.len() > 3));

    let theme = run_check(reg, env, "theme", &["purple"]).await;
    checks.push(SelfCheck::new(
        "theme invalid yields error",
        theme.first().is_some_and(|l| l.starts_with("Unknown theme")),
    ));

    let banner = run_check(reg, env, "banner", &[]).await;
    checks.push(SelfCheck::new("banner returns > 3 lines", banner.len() > 3));
    checks.push(SelfCheck::new(
        "banner contains quote",
        banner.join("\n").contains(BANNER_QUOTE),
    ));

    let echo = run_check(reg, env, "echo", &["hello", "world"]).await;
    checks.push(SelfCheck::new(
        "echo join works",
        echo.first().is_some_and(|l| l == "hello world"),
    ));

    checks
}

pub(crate) struct TestCmd;

#[async_trait]
impl Command for TestCmd {
    fn name(&self) -> &str {
        "test"
    }
    fn description(&self) -> &str {
        "Run built-in self-checks"
    }
    fn usage(&self) -> &str {
        "test"
    }
    async fn execute(&self, _args: &[&str], env: &mut Environment) -> Result<CommandOutput> {
        let registry = std::sync::Arc::clone(&env.registry);
        let checks = run_self_checks(&registry, env).await;
        let mut lines = vec!["Running self-checks...".to_string()];
        lines.extend(checks.iter().map(SelfCheck::render));
        lines.push("Self-checks complete.".to_string());
        Ok(CommandOutput::Lines(lines))
    }
}
