//! Cosmetic session choices: color theme and decorative background.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::KnowmeError;

/// Terminal color theme, selected by the `theme` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Green,
    Amber,
    Mono,
    Blue,
    Red,
}

impl Theme {
    /// All themes, in the order they are listed to the user.
    pub const ALL: [Theme; 5] = [
        Theme::Green,
        Theme::Amber,
        Theme::Mono,
        Theme::Blue,
        Theme::Red,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Theme::Green => "green",
            Theme::Amber => "amber",
            Theme::Mono => "mono",
            Theme::Blue => "blue",
            Theme::Red => "red",
        }
    }

    /// Comma-separated list of every theme name.
    pub fn available() -> String {
        Self::ALL.map(Theme::name).join(", ")
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = KnowmeError;

    /// Case-insensitive lookup by name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.name() == lower)
            .ok_or_else(|| {
                KnowmeError::Config(format!(
                    "unknown theme '{s}' (expected one of: {})",
                    Self::available()
                ))
            })
    }
}

/// Decorative background behind the monitor, independent of the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    #[default]
    Matrix,
    Grid,
}

impl Background {
    pub const ALL: [Background; 2] = [Background::Matrix, Background::Grid];

    pub fn name(self) -> &'static str {
        match self {
            Background::Matrix => "matrix",
            Background::Grid => "grid",
        }
    }

    /// The other background.
    pub fn toggled(self) -> Self {
        match self {
            Background::Matrix => Background::Grid,
            Background::Grid => Background::Matrix,
        }
    }

    pub fn available() -> String {
        Self::ALL.map(Background::name).join(", ")
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Background {
    type Err = KnowmeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|b| b.name() == lower)
            .ok_or_else(|| {
                KnowmeError::Config(format!(
                    "unknown background '{s}' (expected one of: {})",
                    Self::available()
                ))
            })
    }
}
