//! Single-line input buffer and tab-completion.

use unicode_segmentation::UnicodeSegmentation;

use knowme_terminal::CommandRegistry;

/// The text the user is typing.
#[derive(Debug, Clone, Default)]
pub struct LineEditor {
    buffer: String,
}

impl LineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn insert(&mut self, ch: char) {
        self.buffer.push(ch);
    }

    /// Remove the last grapheme cluster.
    pub fn backspace(&mut self) {
        if let Some((idx, _)) = self.buffer.grapheme_indices(true).next_back() {
            self.buffer.truncate(idx);
        }
    }

    pub fn set(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }

    pub fn is_blank(&self) -> bool {
        self.buffer.trim().is_empty()
    }
}

/// Result of completing the command token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Exactly one command matches.
    Single(String),
    /// Several commands match, sorted.
    Multiple(Vec<String>),
    /// Nothing to do: no match, blank input, or the user is already typing
    /// arguments.
    Nothing,
}

/// Complete the command token in `input` against the registry.
pub fn complete(input: &str, registry: &CommandRegistry) -> Completion {
    let token = input.trim();
    if token.is_empty() || token.contains(char::is_whitespace) {
        return Completion::Nothing;
    }
    let mut matches = registry.completions(&token.to_lowercase());
    match matches.len() {
        0 => Completion::Nothing,
        1 => Completion::Single(matches.remove(0)),
        _ => Completion::Multiple(matches),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use knowme_terminal::{Command, CommandOutput, Environment};
    use knowme_types::error::Result;

    struct Named(&'static str);

    #[async_trait]
    impl Command for Named {
        fn name(&self) -> &str {
            self.0
        }
        fn description(&self) -> &str {
            ""
        }
        fn usage(&self) -> &str {
            self.0
        }
        async fn execute(&self, _args: &[&str], _env: &mut Environment) -> Result<CommandOutput> {
            Ok(CommandOutput::None)
        }
    }

    fn registry(names: &[&'static str]) -> CommandRegistry {
        let mut reg = CommandRegistry::new();
        for n in names {
            reg.register(Box::new(Named(n)));
        }
        reg
    }

    #[test]
    fn single_match() {
        let reg = registry(&["help", "about", "echo"]);
        assert_eq!(complete("he", &reg), Completion::Single("help".to_string()));
        assert_eq!(complete("  HE ", &reg), Completion::Single("help".to_string()));
    }

    #[test]
    fn multiple_matches_sorted() {
        let reg = registry(&["help", "hello", "about"]);
        assert_eq!(
            complete("h", &reg),
            Completion::Multiple(vec!["hello".to_string(), "help".to_string()])
        );
    }

    #[test]
    fn arguments_block_completion() {
        let reg = registry(&["help", "theme"]);
        assert_eq!(complete("theme am", &reg), Completion::Nothing);
        assert_eq!(complete("", &reg), Completion::Nothing);
        assert_eq!(complete("zz", &reg), Completion::Nothing);
    }

    #[test]
    fn backspace_removes_grapheme() {
        let mut ed = LineEditor::new();
        for ch in "ab🎲".chars() {
            ed.insert(ch);
        }
        ed.backspace();
        assert_eq!(ed.text(), "ab");
        ed.clear();
        ed.backspace();
        assert_eq!(ed.text(), "");
    }

    #[test]
    fn take_empties_buffer() {
        let mut ed = LineEditor::new();
        ed.set("help");
        assert_eq!(ed.take(), "help");
        assert!(ed.is_blank());
    }
}
