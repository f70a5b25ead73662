//! # Status Lines
//!
//! Each dispatch produces exactly one `StatusMessage`, and the router posts
//! its text to a `StatusSink`. The kind is for callers and tests; the host
//! console only ever sees the text.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// The action took effect.
    Success,
    /// Nothing left to do in that direction (first/last track).
    Boundary,
    /// The host refused or failed a read/write/command.
    Failure,
    /// The key isn't bound.
    Unrecognized,
    /// Informational output with no host side effect.
    Info,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn new(kind: StatusKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(StatusKind::Success, text)
    }

    pub fn boundary(text: impl Into<String>) -> Self {
        Self::new(StatusKind::Boundary, text)
    }

    pub fn failure(text: impl Into<String>) -> Self {
        Self::new(StatusKind::Failure, text)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(StatusKind::Info, text)
    }

    pub fn is_failure(&self) -> bool {
        self.kind == StatusKind::Failure
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Where status lines go.
pub trait StatusSink {
    fn post(&mut self, line: &str);
}

/// Default sink: the `log` facade at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl StatusSink for LogSink {
    fn post(&mut self, line: &str) {
        log::info!("{line}");
    }
}

impl<F: FnMut(&str)> StatusSink for F {
    fn post(&mut self, line: &str) {
        self(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_text_only() {
        let status = StatusMessage::boundary("Already at first track");
        assert_eq!(status.to_string(), "Already at first track");
        assert_eq!(status.kind, StatusKind::Boundary);
    }

    #[test]
    fn test_closure_sink_receives_lines() {
        let mut lines = Vec::new();
        {
            let mut sink = |line: &str| lines.push(line.to_string());
            sink.post("one");
            sink.post("two");
        }
        assert_eq!(lines, ["one", "two"]);
    }
}
