//! Structured JSON logger
//!
//! Emits one JSON object per line: the event name first, then fields in
//! alphabetical order, then the severity. Lines at ERROR and above go to
//! stderr, everything else to stdout. Output is synchronous and unbuffered.

use std::fmt;
use std::io::{self, Write};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Debug-level detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Recoverable issues
    Warn = 2,
    /// Operation failures
    Error = 3,
    /// Unrecoverable, unit exits
    Fatal = 4,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An injectable structured logger.
///
/// Cheap to clone; each component holds its own copy. Events below the
/// severity floor are dropped.
#[derive(Debug, Clone)]
pub struct Logger {
    floor: Severity,
}

impl Logger {
    /// Creates a logger that emits everything at or above `floor`.
    pub fn new(floor: Severity) -> Self {
        Self { floor }
    }

    /// Creates a logger that drops every event. For tests and embedders
    /// that bring their own telemetry.
    pub fn disabled() -> Self {
        Self {
            // Fatal still passes; a silenced unit should not die silently.
            floor: Severity::Fatal,
        }
    }

    /// Log at TRACE
    pub fn trace(&self, event: &str, fields: &[(&str, &str)]) {
        self.log(Severity::Trace, event, fields);
    }

    /// Log at INFO
    pub fn info(&self, event: &str, fields: &[(&str, &str)]) {
        self.log(Severity::Info, event, fields);
    }

    /// Log at WARN
    pub fn warn(&self, event: &str, fields: &[(&str, &str)]) {
        self.log(Severity::Warn, event, fields);
    }

    /// Log at ERROR
    pub fn error(&self, event: &str, fields: &[(&str, &str)]) {
        self.log(Severity::Error, event, fields);
    }

    /// Log an event with the given severity and fields.
    pub fn log(&self, severity: Severity, event: &str, fields: &[(&str, &str)]) {
        if severity < self.floor {
            return;
        }
        let line = format_line(severity, event, fields);
        if severity >= Severity::Error {
            let _ = writeln!(io::stderr(), "{}", line);
        } else {
            let _ = writeln!(io::stdout(), "{}", line);
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(Severity::Info)
    }
}

/// Builds one JSON log line with deterministic key ordering.
fn format_line(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
    let mut sorted: Vec<(&str, &str)> = fields.to_vec();
    sorted.sort_by_key(|(k, _)| *k);

    let mut out = String::with_capacity(128);
    out.push_str("{\"event\":\"");
    escape_into(&mut out, event);
    out.push('"');
    for (key, value) in sorted {
        out.push_str(",\"");
        escape_into(&mut out, key);
        out.push_str("\":\"");
        escape_into(&mut out, value);
        out.push('"');
    }
    out.push_str(",\"severity\":\"");
    out.push_str(severity.as_str());
    out.push_str("\"}");
    out
}

/// Escapes a string for embedding in a JSON literal.
fn escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_first_fields_sorted() {
        let line = format_line(
            Severity::Info,
            "TOPIC_CHANGE",
            &[("topics", "3"), ("previous", "2")],
        );
        assert_eq!(
            line,
            "{\"event\":\"TOPIC_CHANGE\",\"previous\":\"2\",\"topics\":\"3\",\"severity\":\"INFO\"}"
        );
    }

    #[test]
    fn test_escaping() {
        let line = format_line(Severity::Warn, "ODD \"EVENT\"", &[("k", "a\nb")]);
        assert!(line.contains("ODD \\\"EVENT\\\""));
        assert!(line.contains("a\\nb"));
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Trace < Severity::Info);
        assert!(Severity::Error < Severity::Fatal);
    }
}
