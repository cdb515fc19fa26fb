//! Ingestion progress logging.
//!
//! The pipeline reports through the `log_*` helpers. Every entry goes to
//! [`LOG_BROADCASTER`], which echoes it to stderr (stdout carries CLI output)
//! and fans it out to subscribers. The CLI's `--log-json` mode is one such
//! subscriber: it drains the run's entries and prints them as JSON lines.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::broadcast::{self, error::TryRecvError};

/// Entries buffered per subscriber before the oldest are dropped.
const CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    fn marker(self) -> &'static str {
        match self {
            LogLevel::Info => "",
            LogLevel::Success => "✓",
            LogLevel::Warning => "⚠️",
            LogLevel::Error => "❌",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Nesting depth under the previous top-level entry
    #[serde(default)]
    pub indent: u8,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self { level, message: message.into(), indent: 0 }
    }

    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }

    /// Line as echoed to stderr.
    pub fn render(&self) -> String {
        let pad = "   ".repeat(usize::from(self.indent) + 1);
        format!("{}{} {}", pad, self.level.marker(), self.message)
    }
}

pub static LOG_BROADCASTER: Lazy<LogBroadcaster> = Lazy::new(LogBroadcaster::new);

/// Echoes entries to stderr and forwards them to subscribers.
pub struct LogBroadcaster {
    sender: broadcast::Sender<LogEntry>,
    quiet: AtomicBool,
}

impl LogBroadcaster {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender, quiet: AtomicBool::new(false) }
    }

    /// Stop echoing to stderr. Subscribers still receive entries.
    pub fn set_quiet(&self, quiet: bool) {
        self.quiet.store(quiet, Ordering::Relaxed);
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet.load(Ordering::Relaxed)
    }

    pub fn log(&self, entry: LogEntry) {
        if !self.is_quiet() {
            eprintln!("{}", entry.render());
        }
        // Err only means nobody is subscribed.
        let _ = self.sender.send(entry);
    }

    /// Start collecting entries logged from now on.
    pub fn subscribe(&self) -> LogCollector {
        LogCollector { receiver: self.sender.subscribe(), dropped: 0 }
    }
}

impl Default for LogBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

/// Subscriber that gathers entries without blocking.
pub struct LogCollector {
    receiver: broadcast::Receiver<LogEntry>,
    dropped: u64,
}

impl LogCollector {
    /// Everything received since the last drain, oldest first.
    pub fn drain(&mut self) -> Vec<LogEntry> {
        let mut entries = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(entry) => entries.push(entry),
                Err(TryRecvError::Lagged(n)) => self.dropped += n,
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        entries
    }

    /// Entries lost because the collector fell behind.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

fn emit(level: LogLevel, msg: impl Into<String>, indent: u8) {
    LOG_BROADCASTER.log(LogEntry::new(level, msg).with_indent(indent));
}

pub fn log_info(msg: impl Into<String>) {
    emit(LogLevel::Info, msg, 0);
}

pub fn log_success(msg: impl Into<String>) {
    emit(LogLevel::Success, msg, 0);
}

pub fn log_warning(msg: impl Into<String>) {
    emit(LogLevel::Warning, msg, 0);
}

pub fn log_error(msg: impl Into<String>) {
    emit(LogLevel::Error, msg, 0);
}

pub fn log_info_indent(msg: impl Into<String>, indent: u8) {
    emit(LogLevel::Info, msg, indent);
}

pub fn log_warning_indent(msg: impl Into<String>, indent: u8) {
    emit(LogLevel::Warning, msg, indent);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_drains_in_order() {
        let broadcaster = LogBroadcaster::new();
        broadcaster.set_quiet(true);
        let mut collector = broadcaster.subscribe();

        broadcaster.log(LogEntry::new(LogLevel::Info, "reading"));
        broadcaster.log(LogEntry::new(LogLevel::Warning, "unresolved column").with_indent(1));

        let entries = collector.drain();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].level, LogLevel::Warning);
        assert_eq!(entries[1].indent, 1);
        assert!(collector.drain().is_empty());
    }

    #[test]
    fn test_collector_counts_lagged_entries() {
        let broadcaster = LogBroadcaster::new();
        broadcaster.set_quiet(true);
        let mut collector = broadcaster.subscribe();

        for i in 0..CHANNEL_CAPACITY + 10 {
            broadcaster.log(LogEntry::new(LogLevel::Info, format!("row {}", i)));
        }

        let entries = collector.drain();
        assert_eq!(entries.len(), CHANNEL_CAPACITY);
        assert_eq!(collector.dropped(), 10);
        assert_eq!(entries[0].message, "row 10");
    }

    #[test]
    fn test_log_without_subscribers() {
        let broadcaster = LogBroadcaster::default();
        broadcaster.set_quiet(true);
        broadcaster.log(LogEntry::new(LogLevel::Error, "nobody listening"));
        assert!(broadcaster.is_quiet());
    }

    #[test]
    fn test_render_and_serialize() {
        let entry = LogEntry::new(LogLevel::Success, "Read 3 rows").with_indent(1);
        assert_eq!(entry.render(), "      ✓ Read 3 rows");

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["level"], "success");
        assert_eq!(json["indent"], 1);
    }
}
