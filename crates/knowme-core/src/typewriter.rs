//! Progressive character reveal of command output.
//!
//! A [`TypewriterJob`] is driven one step at a time. Each step reveals at most
//! one batch of graphemes into the transcript and reports how long the caller
//! should wait before the next step. Nothing here sleeps; the caller owns the
//! clock, which keeps the input loop live while output is being typed.

use std::collections::VecDeque;
use std::time::Duration;

use unicode_segmentation::UnicodeSegmentation;

use knowme_types::config::TypewriterConfig;

use crate::transcript::Transcript;

/// Outcome of one [`TypewriterJob::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStep {
    /// More to reveal; wait this long before stepping again.
    Continue(Duration),
    Done,
    Cancelled,
}

#[derive(Debug)]
struct LineReveal {
    graphemes: Vec<String>,
    pos: usize,
    entry: usize,
}

/// A cancellable reveal of a list of lines.
#[derive(Debug)]
pub struct TypewriterJob {
    pending: VecDeque<String>,
    current: Option<LineReveal>,
    per_char: Duration,
    batch_size: usize,
    long_line_threshold: usize,
    line_pause: Duration,
    cancelled: bool,
}

impl TypewriterJob {
    pub fn new(lines: Vec<String>, config: &TypewriterConfig) -> Self {
        let cps = u64::from(config.chars_per_second.max(1));
        Self {
            pending: lines.into(),
            current: None,
            per_char: Duration::from_micros(1_000_000 / cps),
            batch_size: config.batch_size.max(1),
            long_line_threshold: config.long_line_threshold,
            line_pause: Duration::from_millis(config.line_pause_ms),
            cancelled: false,
        }
    }

    /// Stop before the next batch. Already revealed text stays.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Lines not yet started.
    pub fn remaining_lines(&self) -> usize {
        self.pending.len()
    }

    /// Reveal the next batch into `transcript`.
    pub fn step(&mut self, transcript: &mut Transcript) -> RenderStep {
        if self.cancelled {
            return RenderStep::Cancelled;
        }

        if self.current.is_none() {
            let Some(line) = self.pending.pop_front() else {
                return RenderStep::Done;
            };
            let graphemes: Vec<String> = line.graphemes(true).map(str::to_string).collect();
            if graphemes.is_empty() || graphemes.len() >= self.long_line_threshold {
                transcript.push_output(line);
                return RenderStep::Continue(self.line_pause);
            }
            let entry = transcript.push_output(String::new());
            self.current = Some(LineReveal {
                graphemes,
                pos: 0,
                entry,
            });
        }

        let Some(reveal) = self.current.as_mut() else {
            return RenderStep::Done;
        };
        let end = (reveal.pos + self.batch_size).min(reveal.graphemes.len());
        let batch = &reveal.graphemes[reveal.pos..end];
        let visible = batch
            .iter()
            .filter(|g| !g.chars().all(char::is_whitespace))
            .count() as u32;
        transcript.append_to(reveal.entry, &batch.concat());
        reveal.pos = end;

        let mut delay = self.per_char * visible;
        if reveal.pos == reveal.graphemes.len() {
            self.current = None;
            delay += self.line_pause;
        }
        RenderStep::Continue(delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TypewriterConfig {
        TypewriterConfig {
            chars_per_second: 1000,
            batch_size: 3,
            long_line_threshold: 20,
            line_pause_ms: 12,
        }
    }

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn run_all(job: &mut TypewriterJob, t: &mut Transcript) -> Vec<RenderStep> {
        let mut steps = Vec::new();
        loop {
            let s = job.step(t);
            steps.push(s);
            if s == RenderStep::Done || s == RenderStep::Cancelled {
                return steps;
            }
        }
    }

    #[test]
    fn reveals_in_batches() {
        let mut t = Transcript::new();
        let mut job = TypewriterJob::new(lines(&["abcdefg"]), &config());
        assert_eq!(job.step(&mut t), RenderStep::Continue(Duration::from_millis(3)));
        assert_eq!(t.output_texts(), vec!["abc"]);
        job.step(&mut t);
        assert_eq!(t.output_texts(), vec!["abcdef"]);
        assert_eq!(job.step(&mut t), RenderStep::Continue(Duration::from_millis(13)));
        assert_eq!(t.output_texts(), vec!["abcdefg"]);
        assert_eq!(job.step(&mut t), RenderStep::Done);
    }

    #[test]
    fn whitespace_batches_are_free() {
        let mut t = Transcript::new();
        let mut job = TypewriterJob::new(lines(&["      x"]), &config());
        assert_eq!(job.step(&mut t), RenderStep::Continue(Duration::ZERO));
        assert_eq!(job.step(&mut t), RenderStep::Continue(Duration::ZERO));
        assert_eq!(job.step(&mut t), RenderStep::Continue(Duration::from_millis(13)));
    }

    #[test]
    fn long_lines_print_whole() {
        let long = "x".repeat(25);
        let mut t = Transcript::new();
        let mut job = TypewriterJob::new(vec![long.clone()], &config());
        assert_eq!(job.step(&mut t), RenderStep::Continue(Duration::from_millis(12)));
        assert_eq!(t.output_texts(), vec![long.as_str()]);
        assert_eq!(job.step(&mut t), RenderStep::Done);
    }

    #[test]
    fn empty_line_gets_entry() {
        let mut t = Transcript::new();
        let mut job = TypewriterJob::new(lines(&["", "a"]), &config());
        run_all(&mut job, &mut t);
        assert_eq!(t.output_texts(), vec!["", "a"]);
    }

    #[test]
    fn graphemes_are_not_split() {
        let mut t = Transcript::new();
        let cfg = TypewriterConfig {
            batch_size: 1,
            ..config()
        };
        let mut job = TypewriterJob::new(lines(&["🎲é"]), &cfg);
        job.step(&mut t);
        assert_eq!(t.output_texts(), vec!["🎲"]);
        job.step(&mut t);
        assert_eq!(t.output_texts(), vec!["🎲é"]);
    }

    #[test]
    fn cancel_mid_render_keeps_partial_output() {
        let mut t = Transcript::new();
        let mut job = TypewriterJob::new(lines(&["first", "second", "third", "fourth"]), &config());
        // Finish "first", then one batch of "second".
        while t.len() < 2 {
            job.step(&mut t);
        }
        job.cancel();
        assert_eq!(job.step(&mut t), RenderStep::Cancelled);
        assert_eq!(job.step(&mut t), RenderStep::Cancelled);
        assert_eq!(t.output_texts(), vec!["first", "sec"]);
        assert_eq!(job.remaining_lines(), 2);
    }

    #[test]
    fn all_lines_in_order() {
        let mut t = Transcript::new();
        let mut job = TypewriterJob::new(lines(&["one", "two three", "four"]), &config());
        let steps = run_all(&mut job, &mut t);
        assert_eq!(steps.last(), Some(&RenderStep::Done));
        assert_eq!(t.output_texts(), vec!["one", "two three", "four"]);
    }
}
