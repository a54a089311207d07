//! Commands backed by the remote data proxies: booksuggestion, photosuggestion.
//!
//! Fetch failures never reach the executor. They degrade to a fixed two-line
//! message that says whether the service was unreachable or just failed.

use async_trait::async_trait;

use knowme_types::error::{KnowmeError, Result};

use crate::interpreter::{Command, CommandOutput, CommandRegistry, Environment};

/// Register the proxy-backed commands.
pub fn register_suggestion_commands(reg: &mut CommandRegistry) {
    reg.register(Box::new(BookSuggestionCmd));
    reg.register(Box::new(PhotoSuggestionCmd));
}

struct BookSuggestionCmd;

#[async_trait]
impl Command for BookSuggestionCmd {
    fn name(&self) -> &str {
        "booksuggestion"
    }
    fn description(&self) -> &str {
        "Random book recommendation"
    }
    fn usage(&self) -> &str {
        "booksuggestion"
    }
    async fn execute(&self, _args: &[&str], env: &mut Environment) -> Result<CommandOutput> {
        let Some(source) = env.suggestions.clone() else {
            return Ok(degraded("book", &offline()));
        };
        Ok(match source.book().await {
            Ok(book) => CommandOutput::Lines(book.to_lines()),
            Err(e) => degraded("book", &e),
        })
    }
}

struct PhotoSuggestionCmd;

#[async_trait]
impl Command for PhotoSuggestionCmd {
    fn name(&self) -> &str {
        "photosuggestion"
    }
    fn description(&self) -> &str {
        "Random photo suggestion"
    }
    fn usage(&self) -> &str {
        "photosuggestion"
    }
    async fn execute(&self, _args: &[&str], env: &mut Environment) -> Result<CommandOutput> {
        let Some(source) = env.suggestions.clone() else {
            return Ok(degraded("photo", &offline()));
        };
        Ok(match source.photo().await {
            Ok(photo) => CommandOutput::Lines(photo.to_lines()),
            Err(e) => degraded("photo", &e),
        })
    }
}

fn offline() -> KnowmeError {
    KnowmeError::Network("no proxy configured".to_string())
}

fn degraded(kind: &str, err: &KnowmeError) -> CommandOutput {
    log::warn!("{kind} suggestion failed: {err}");
    let lines = if err.is_unreachable() {
        vec![
            format!("Could not reach the {kind} service."),
            "Check your network connection and try again.".to_string(),
        ]
    } else {
        vec![
            format!("Failed to fetch a {kind} suggestion."),
            "Please try again later.".to_string(),
        ]
    };
    CommandOutput::Lines(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use knowme_net::{BookSuggestion, PhotoSuggestion, SuggestionSource};

    enum Canned {
        Ok,
        Unreachable,
        BadStatus,
    }

    #[async_trait]
    impl SuggestionSource for Canned {
        async fn book(&self) -> Result<BookSuggestion> {
            match self {
                Canned::Ok => BookSuggestion::from_json(
                    br#"{"title": "Flatland", "author": "Edwin Abbott Abbott", "rating": "5", "link": "https://gr/1"}"#,
                ),
                Canned::Unreachable => Err(KnowmeError::Network("refused".to_string())),
                Canned::BadStatus => Err(KnowmeError::Proxy("HTTP 500".to_string())),
            }
        }

        async fn photo(&self) -> Result<PhotoSuggestion> {
            match self {
                Canned::Ok => PhotoSuggestion::from_json(
                    br#"{"url": "https://img/1.jpg", "author": "Adarsh", "link": "https://us/1"}"#,
                ),
                Canned::Unreachable => Err(KnowmeError::Network("timeout".to_string())),
                Canned::BadStatus => Err(KnowmeError::Proxy("missing url".to_string())),
            }
        }
    }

    async fn run(source: Option<Canned>, name: &str) -> Vec<String> {
        let mut reg = CommandRegistry::new();
        register_suggestion_commands(&mut reg);
        let reg = Arc::new(reg);
        let mut env = Environment::new("dyno8426", Arc::clone(&reg));
        if let Some(s) = source {
            env = env.with_suggestions(Arc::new(s));
        }
        reg.dispatch(name, &[], &mut env).await.unwrap().into_lines()
    }

    #[tokio::test]
    async fn book_success() {
        let out = run(Some(Canned::Ok), "booksuggestion").await;
        assert_eq!(
            out,
            vec![
                "📚 Flatland by Edwin Abbott Abbott",
                "Rating: 5/5",
                "Link: https://gr/1"
            ]
        );
    }

    #[tokio::test]
    async fn photo_success() {
        let out = run(Some(Canned::Ok), "photosuggestion").await;
        assert_eq!(out[0], "📷 Untitled by Adarsh");
        assert_eq!(out[2], "Image: https://img/1.jpg");
    }

    #[tokio::test]
    async fn unreachable_message() {
        let out = run(Some(Canned::Unreachable), "booksuggestion").await;
        assert_eq!(
            out,
            vec![
                "Could not reach the book service.",
                "Check your network connection and try again."
            ]
        );
    }

    #[tokio::test]
    async fn generic_failure_message() {
        let out = run(Some(Canned::BadStatus), "photosuggestion").await;
        assert_eq!(
            out,
            vec!["Failed to fetch a photo suggestion.", "Please try again later."]
        );
    }

    #[tokio::test]
    async fn no_source_is_unreachable() {
        let out = run(None, "photosuggestion").await;
        assert_eq!(out[0], "Could not reach the photo service.");
    }
}
