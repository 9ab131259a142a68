//! Notifier
//!
//! A single transient message. Showing a new one replaces the old one and
//! restarts its timer; the message text is kept after it is hidden.

use chrono::{DateTime, Duration, Local};

/// Default auto-dismiss delay
pub const DEFAULT_TIMEOUT_MS: i64 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Danger,
}

#[derive(Debug, Clone)]
pub struct Notifier {
    message: String,
    severity: Severity,
    visible: bool,
    deadline: Option<DateTime<Local>>,
    timeout: Duration,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(std::time::Duration::from_millis(DEFAULT_TIMEOUT_MS as u64))
    }
}

impl Notifier {
    pub fn new(timeout: std::time::Duration) -> Self {
        let timeout =
            Duration::from_std(timeout).unwrap_or(Duration::milliseconds(DEFAULT_TIMEOUT_MS));
        Self {
            message: String::new(),
            severity: Severity::Success,
            visible: false,
            deadline: None,
            timeout,
        }
    }

    pub fn show(&mut self, message: impl Into<String>, severity: Severity, now: DateTime<Local>) {
        self.message = message.into();
        self.severity = severity;
        self.visible = true;
        self.deadline = Some(now + self.timeout);
    }

    /// Hide the message once its deadline has passed. Returns `true` if
    /// this call hid it.
    pub fn tick(&mut self, now: DateTime<Local>) -> bool {
        match self.deadline {
            Some(deadline) if self.visible && now >= deadline => {
                self.dismiss();
                true
            }
            _ => false,
        }
    }

    pub fn dismiss(&mut self) {
        self.visible = false;
        self.deadline = None;
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The visible message, if any
    pub fn current(&self) -> Option<(&str, Severity)> {
        self.visible.then_some((self.message.as_str(), self.severity))
    }
}
