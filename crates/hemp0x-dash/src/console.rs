use hemp0x_types::CONSOLE_MAX_LINES;
use serde::Serialize;
use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleLevel {
    Input,
    Output,
    Error,
}

#[derive(Clone, Debug, Serialize)]
pub struct ConsoleLine {
    pub time: String,
    pub level: ConsoleLevel,
    pub text: String,
}

/// Scroll-back for the RPC console. Keeps at most `max_lines` lines and
/// drops the oldest first.
#[derive(Clone, Debug)]
pub struct ConsoleLog {
    lines: VecDeque<ConsoleLine>,
    max_lines: usize,
}

impl Default for ConsoleLog {
    fn default() -> Self {
        Self::new(CONSOLE_MAX_LINES)
    }
}

impl ConsoleLog {
    pub fn new(max_lines: usize) -> Self {
        let max_lines = max_lines.max(1);
        Self {
            lines: VecDeque::with_capacity(max_lines.min(CONSOLE_MAX_LINES)),
            max_lines,
        }
    }

    /// Appends `text`, one entry per line, all stamped with the same time.
    pub fn push(&mut self, level: ConsoleLevel, text: &str) {
        let time = chrono::Local::now().format("%H:%M:%S").to_string();
        for line in text.lines() {
            if self.lines.len() >= self.max_lines {
                self.lines.pop_front();
            }
            self.lines.push_back(ConsoleLine {
                time: time.clone(),
                level,
                text: line.to_string(),
            });
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &ConsoleLine> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn to_text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
