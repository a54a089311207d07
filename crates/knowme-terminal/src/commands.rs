//! Built-in registration plus `help` and the static profile commands.

use async_trait::async_trait;

use knowme_types::error::Result;

use crate::content::{self, to_lines};
use crate::interpreter::{Command, CommandOutput, CommandRegistry, Environment};

/// Register every built-in command.
pub fn register_builtins(reg: &mut CommandRegistry) {
    reg.register(Box::new(HelpCmd));
    reg.register(Box::new(InterestsCmd));
    reg.register(Box::new(BannerCmd));
    for page in PAGES {
        reg.register(Box::new(*page));
    }
    crate::register_shell_commands(reg);
    crate::register_suggestion_commands(reg);
    reg.register(Box::new(crate::selftest::TestCmd));
}

// ---------------------------------------------------------------------------
// help
// ---------------------------------------------------------------------------

struct HelpCmd;

#[async_trait]
impl Command for HelpCmd {
    fn name(&self) -> &str {
        "help"
    }
    fn description(&self) -> &str {
        "Show available commands"
    }
    fn usage(&self) -> &str {
        "help [command]"
    }
    async fn execute(&self, args: &[&str], env: &mut Environment) -> Result<CommandOutput> {
        if let Some(name) = args.first() {
            return Ok(match env.registry.get(name) {
                Some(cmd) => CommandOutput::Lines(vec![
                    format!("Usage: {}", cmd.usage()),
                    format!("  {}", cmd.description()),
                ]),
                None => CommandOutput::line(format!("No help for '{name}'.")),
            });
        }

        let entries = env.registry.list_commands();
        let width = entries.iter().map(|e| e.usage.len()).max().unwrap_or(0);
        let mut lines = Vec::with_capacity(entries.len() + 1);
        lines.push("COMMANDS:".to_string());
        for e in &entries {
            lines.push(format!("  {:<width$} → {}", e.usage, e.description));
        }
        Ok(CommandOutput::Lines(lines))
    }
}

// ---------------------------------------------------------------------------
// Static pages: about, work, resume, acads, publications, projects, books,
// photos, contact
// ---------------------------------------------------------------------------

/// A command that prints a fixed table of lines.
#[derive(Clone, Copy)]
struct PageCmd {
    name: &'static str,
    description: &'static str,
    lines: &'static [&'static str],
}

const PAGES: &[PageCmd] = &[
    PageCmd {
        name: "about",
        description: "Who I am",
        lines: content::ABOUT_LINES,
    },
    PageCmd {
        name: "work",
        description: "Professional background",
        lines: content::WORK_LINES,
    },
    PageCmd {
        name: "resume",
        description: "Professional background (alias of work)",
        lines: content::WORK_LINES,
    },
    PageCmd {
        name: "acads",
        description: "Education background",
        lines: content::ACADS_LINES,
    },
    PageCmd {
        name: "publications",
        description: "Research papers & patents",
        lines: content::PUBLICATIONS_LINES,
    },
    PageCmd {
        name: "projects",
        description: "Selected projects",
        lines: content::PROJECTS_LINES,
    },
    PageCmd {
        name: "books",
        description: "Recent book notes",
        lines: content::BOOKS_LINES,
    },
    PageCmd {
        name: "photos",
        description: "Photo journal info",
        lines: content::PHOTOS_LINES,
    },
    PageCmd {
        name: "contact",
        description: "How to reach me",
        lines: content::CONTACT_LINES,
    },
];

#[async_trait]
impl Command for PageCmd {
    fn name(&self) -> &str {
        self.name
    }
    fn description(&self) -> &str {
        self.description
    }
    fn usage(&self) -> &str {
        self.name
    }
    async fn execute(&self, _args: &[&str], _env: &mut Environment) -> Result<CommandOutput> {
        Ok(CommandOutput::Lines(to_lines(self.lines)))
    }
}

// ---------------------------------------------------------------------------
// interests
// ---------------------------------------------------------------------------

struct InterestsCmd;

const INTEREST_SECTIONS: &[(&str, &[&str])] = &[
    ("reading", content::INTERESTS_READING),
    ("photography", content::INTERESTS_PHOTOGRAPHY),
    ("art", content::INTERESTS_ART),
    ("music", content::INTERESTS_MUSIC),
    ("misc", content::INTERESTS_MISC),
];

#[async_trait]
impl Command for InterestsCmd {
    fn name(&self) -> &str {
        "interests"
    }
    fn description(&self) -> &str {
        "Show or explain a specific hobby"
    }
    fn usage(&self) -> &str {
        "interests [all|reading|photography|art|music|misc]"
    }
    async fn execute(&self, args: &[&str], _env: &mut Environment) -> Result<CommandOutput> {
        let opt = args.first().map(|a| a.to_lowercase()).unwrap_or_default();
        let lines = match opt.as_str() {
            "" | "help" => to_lines(content::INTERESTS_HELP),
            "all" => {
                let mut all = Vec::new();
                for (i, (_, section)) in INTEREST_SECTIONS.iter().enumerate() {
                    if i > 0 {
                        all.push("  ".to_string());
                    }
                    all.extend(to_lines(section));
                }
                all
            },
            other => match INTEREST_SECTIONS.iter().find(|(name, _)| *name == other) {
                Some((_, section)) => to_lines(section),
                None => vec![
                    "Unknown option for interests. Type \"interests help\" for usage.".to_string(),
                ],
            },
        };
        Ok(CommandOutput::Lines(lines))
    }
}

// ---------------------------------------------------------------------------
// banner
// ---------------------------------------------------------------------------

struct BannerCmd;

#[async_trait]
impl Command for BannerCmd {
    fn name(&self) -> &str {
        "banner"
    }
    fn description(&self) -> &str {
        "ASCII banner"
    }
    fn usage(&self) -> &str {
        "banner"
    }
    async fn execute(&self, _args: &[&str], _env: &mut Environment) -> Result<CommandOutput> {
        Ok(CommandOutput::Lines(
            content::BANNER_ART.split('\n').map(str::to_string).collect(),
        ))
    }
}
