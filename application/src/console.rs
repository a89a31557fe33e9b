//! Console buffer
//!
//! Keeps the most recent `line_limit` lines of tool output. The console
//! starts hidden and is revealed by the first write.

use crate::ports::process::OutputLine;
use chainrun_domain::OutputStream;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct ConsoleBuffer {
    lines: VecDeque<OutputLine>,
    limit: usize,
    revealed: bool,
}

impl ConsoleBuffer {
    pub fn new(limit: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(limit.min(1024)),
            limit: limit.max(1),
            revealed: false,
        }
    }

    /// Append `text`, one entry per line.
    ///
    /// Returns the lines that were added, so the caller can forward them to
    /// the front-end. Empty text adds nothing.
    pub fn write(&mut self, stream: OutputStream, text: &str) -> Vec<OutputLine> {
        let added: Vec<OutputLine> = text
            .lines()
            .map(|line| OutputLine {
                stream,
                text: line.to_string(),
            })
            .collect();
        for line in &added {
            self.push(line.clone());
        }
        added
    }

    pub fn push(&mut self, line: OutputLine) {
        while self.lines.len() >= self.limit {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    /// Mark the console as shown. Returns `true` only the first time.
    pub fn reveal(&mut self) -> bool {
        !std::mem::replace(&mut self.revealed, true)
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn lines(&self) -> impl Iterator<Item = &OutputLine> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
