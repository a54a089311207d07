//! Runtime configuration, loaded from an optional TOML file.
//!
//! Every field has a default so a partial file (or no file at all) yields a
//! working terminal. A few environment variables are applied on top of the
//! file; see [`KnowmeConfig::apply_env`].

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{KnowmeError, Result};
use crate::theme::{Background, Theme};

/// Environment variable naming a config file.
pub const ENV_CONFIG: &str = "KNOWME_CONFIG";
/// Environment variable selecting the proxy environment.
pub const ENV_PROXY_ENV: &str = "KNOWME_PROXY_ENV";
/// Environment variable overriding the proxy base URL.
pub const ENV_PROXY_URL: &str = "KNOWME_PROXY_URL";
/// Environment variable carrying a visitor-session identifier to reuse.
pub const ENV_SESSION_ID: &str = "KNOWME_SESSION_ID";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct KnowmeConfig {
    pub prompt: PromptConfig,
    pub typewriter: TypewriterConfig,
    pub history: HistoryConfig,
    pub proxy: ProxyConfig,
    pub visitors: VisitorConfig,
    pub session: SessionDefaults,
}

/// Identity shown in the prompt (`<user>@<host>:~$ `).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    pub user: String,
    pub host: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            user: "dyno8426".to_string(),
            host: "know-me-cli".to_string(),
        }
    }
}

/// Typewriter reveal tuning.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TypewriterConfig {
    /// Reveal rate in characters per second.
    pub chars_per_second: u32,
    /// Characters revealed per step.
    pub batch_size: usize,
    /// Lines at least this long (in characters) are printed whole.
    pub long_line_threshold: usize,
    /// Pause after each completed line.
    pub line_pause_ms: u64,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            chars_per_second: 900,
            batch_size: 3,
            long_line_threshold: 240,
            line_pause_ms: 12,
        }
    }
}

/// Command history bounds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub limit: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { limit: 100 }
    }
}

/// Which deployment of the data proxies to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProxyEnvironment {
    Development,
    #[default]
    Production,
}

impl std::str::FromStr for ProxyEnvironment {
    type Err = KnowmeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(KnowmeError::Config(format!(
                "unknown proxy environment '{other}'"
            ))),
        }
    }
}

/// Remote data proxy endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    pub environment: ProxyEnvironment,
    pub production_url: String,
    pub development_url: String,
    /// Explicit base URL; wins over `environment` when set.
    pub base_url: Option<String>,
    pub book_path: String,
    pub photo_path: String,
    pub timeout_secs: u64,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            environment: ProxyEnvironment::default(),
            production_url: "https://dyno8426.netlify.app".to_string(),
            development_url: "http://localhost:8888".to_string(),
            base_url: None,
            book_path: "/.netlify/functions/goodreads".to_string(),
            photo_path: "/.netlify/functions/unsplash".to_string(),
            timeout_secs: 10,
        }
    }
}

impl ProxyConfig {
    /// Base URL the proxy paths are resolved against.
    pub fn resolved_base(&self) -> &str {
        if let Some(base) = self.base_url.as_deref() {
            return base;
        }
        match self.environment {
            ProxyEnvironment::Development => &self.development_url,
            ProxyEnvironment::Production => &self.production_url,
        }
    }
}

/// Visitor counter persistence.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VisitorConfig {
    /// Where the record lives. `None` picks a file in the user data dir.
    pub path: Option<PathBuf>,
    /// Session entries retained in the record.
    pub max_sessions: usize,
}

impl Default for VisitorConfig {
    fn default() -> Self {
        Self {
            path: None,
            max_sessions: 50,
        }
    }
}

/// Initial cosmetic state for a new session.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SessionDefaults {
    pub theme: Theme,
    pub background: Background,
}

impl KnowmeConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            KnowmeError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        log::info!("Loaded config from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Apply environment overrides on top of the file values.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(env) = lookup(ENV_PROXY_ENV) {
            self.proxy.environment = env.parse()?;
        }
        if let Some(url) = lookup(ENV_PROXY_URL).filter(|u| !u.trim().is_empty()) {
            self.proxy.base_url = Some(url);
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.typewriter.chars_per_second == 0 {
            return Err(KnowmeError::Config(
                "typewriter.chars_per_second must be > 0".to_string(),
            ));
        }
        if self.typewriter.batch_size == 0 {
            return Err(KnowmeError::Config(
                "typewriter.batch_size must be > 0".to_string(),
            ));
        }
        if self.prompt.user.trim().is_empty() || self.prompt.host.trim().is_empty() {
            return Err(KnowmeError::Config(
                "prompt.user and prompt.host must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let cfg = KnowmeConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.prompt.user, "dyno8426");
        assert_eq!(cfg.prompt.host, "know-me-cli");
        assert_eq!(cfg.typewriter.chars_per_second, 900);
        assert_eq!(cfg.history.limit, 100);
        assert_eq!(cfg.visitors.max_sessions, 50);
        assert_eq!(cfg.session.theme, Theme::Green);
        assert_eq!(cfg.session.background, Background::Matrix);
    }

    #[test]
    fn partial_sections() {
        let cfg = KnowmeConfig::from_toml_str(
            r#"
[prompt]
user = "alice"

[typewriter]
batch_size = 8

[session]
theme = "amber"
background = "grid"
"#,
        )
        .unwrap();
        assert_eq!(cfg.prompt.user, "alice");
        assert_eq!(cfg.prompt.host, "know-me-cli");
        assert_eq!(cfg.typewriter.batch_size, 8);
        assert_eq!(cfg.typewriter.line_pause_ms, 12);
        assert_eq!(cfg.session.theme, Theme::Amber);
        assert_eq!(cfg.session.background, Background::Grid);
    }

    #[test]
    fn zero_rate_rejected() {
        let err = KnowmeConfig::from_toml_str("[typewriter]\nchars_per_second = 0\n").unwrap_err();
        assert!(matches!(err, KnowmeError::Config(_)));
    }

    #[test]
    fn unknown_theme_is_parse_error() {
        let err = KnowmeConfig::from_toml_str("[session]\ntheme = \"purple\"\n").unwrap_err();
        assert!(matches!(err, KnowmeError::TomlParse(_)));
    }

    #[test]
    fn proxy_base_by_environment() {
        let mut proxy = ProxyConfig::default();
        assert_eq!(proxy.resolved_base(), "https://dyno8426.netlify.app");
        proxy.environment = ProxyEnvironment::Development;
        assert_eq!(proxy.resolved_base(), "http://localhost:8888");
        proxy.base_url = Some("https://example.org".to_string());
        assert_eq!(proxy.resolved_base(), "https://example.org");
    }

    #[test]
    fn env_overrides() {
        let mut cfg = KnowmeConfig::default();
        cfg.apply_env(|key| match key {
            ENV_PROXY_ENV => Some("dev".to_string()),
            ENV_PROXY_URL => Some("http://127.0.0.1:9999".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(cfg.proxy.environment, ProxyEnvironment::Development);
        assert_eq!(cfg.proxy.resolved_base(), "http://127.0.0.1:9999");
    }

    #[test]
    fn env_bad_proxy_environment() {
        let mut cfg = KnowmeConfig::default();
        let err = cfg
            .apply_env(|key| (key == ENV_PROXY_ENV).then(|| "staging".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("staging"));
    }

    #[test]
    fn load_missing_file_is_config_error() {
        let err = KnowmeConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, KnowmeError::Config(_)));
    }
}
