//! Append-only list of what the terminal has shown.

/// Whether an entry echoes user input or is command output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Input,
    Output,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub kind: EntryKind,
    pub text: String,
}

/// Ordered input/output lines. Only `clear` removes entries.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an input echo, returning its index.
    pub fn push_input(&mut self, text: impl Into<String>) -> usize {
        self.push(EntryKind::Input, text.into())
    }

    /// Append an output line, returning its index.
    pub fn push_output(&mut self, text: impl Into<String>) -> usize {
        self.push(EntryKind::Output, text.into())
    }

    fn push(&mut self, kind: EntryKind, text: String) -> usize {
        self.entries.push(TranscriptEntry { kind, text });
        self.entries.len() - 1
    }

    /// Extend the text of entry `index`. Out-of-range indexes are ignored.
    pub fn append_to(&mut self, index: usize, text: &str) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.text.push_str(text);
        }
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Texts of the output entries, in order.
    pub fn output_texts(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.kind == EntryKind::Output)
            .map(|e| e.text.as_str())
            .collect()
    }
}
