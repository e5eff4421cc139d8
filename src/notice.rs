//! User-visible feedback
//!
//! Engines queue notices instead of touching the page. The presentation
//! layer drains the queue and owns display and auto-dismiss timing.

use serde::{Deserialize, Serialize};

/// How a notice should be styled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }
}

/// A single queued message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
    /// Show this long after the command that produced it (ms)
    #[serde(default)]
    pub delay_ms: u32,
}

impl Notice {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
            delay_ms: 0,
        }
    }

    pub fn delayed(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }
}

/// Sink for notices (the page's toast, a log, a test recorder)
pub trait Notifier {
    fn notify(&mut self, message: &str, severity: Severity);
}

/// Ordered notice queue
#[derive(Debug, Clone, Default)]
pub struct NoticeQueue {
    pending: Vec<Notice>,
}

impl NoticeQueue {
    pub fn push(&mut self, notice: Notice) {
        self.pending.push(notice);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Notice::new(message, Severity::Info));
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Notice::new(message, Severity::Success));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Notice::new(message, Severity::Error));
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Peek without draining
    pub fn pending(&self) -> &[Notice] {
        &self.pending
    }

    /// Take everything queued so far, oldest first
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.pending)
    }

    /// Hand everything queued so far to a notifier
    pub fn flush_to(&mut self, notifier: &mut dyn Notifier) {
        for notice in self.drain() {
            notifier.notify(&notice.message, notice.severity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<(String, Severity)>);

    impl Notifier for Recorder {
        fn notify(&mut self, message: &str, severity: Severity) {
            self.0.push((message.to_string(), severity));
        }
    }

    #[test]
    fn test_drain_empties_queue() {
        let mut queue = NoticeQueue::default();
        queue.info("a");
        queue.success("b");
        assert_eq!(queue.len(), 2);

        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].message, "a");
        assert_eq!(drained[1].severity, Severity::Success);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_flush_preserves_order() {
        let mut queue = NoticeQueue::default();
        queue.error("first");
        queue.push(Notice::new("second", Severity::Info).delayed(500));

        let mut recorder = Recorder::default();
        queue.flush_to(&mut recorder);
        assert_eq!(
            recorder.0,
            vec![
                ("first".to_string(), Severity::Error),
                ("second".to_string(), Severity::Info)
            ]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        let json = serde_json::to_string(&Severity::Success).unwrap();
        assert_eq!(json, format!("\"{}\"", Severity::Success.as_str()));
    }
}
