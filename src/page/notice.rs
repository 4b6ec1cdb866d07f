// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! User notices and the developer console
//!
//! Alerts are what the user sees as a blocking notice. The console is the
//! developer-facing diagnostic channel; it never changes what the user sees.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

/// A blocking user notice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Console message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleMessage {
    pub level: ConsoleLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Console log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLevel {
    Log,
    Info,
    Warn,
    Error,
    Debug,
}

/// Alerts and console output raised during one page session
#[derive(Debug, Clone, Default)]
pub struct NoticeLog {
    alerts: Arc<RwLock<Vec<Alert>>>,
    console: Arc<RwLock<Vec<ConsoleMessage>>>,
}

impl NoticeLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise a blocking notice
    pub fn alert(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(%message, "alert");
        self.alerts.write().push(Alert {
            message,
            timestamp: Utc::now(),
        });
    }

    /// Write to the developer console
    pub fn console(&self, level: ConsoleLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            ConsoleLevel::Error => tracing::error!(%message, "console"),
            ConsoleLevel::Warn => tracing::warn!(%message, "console"),
            _ => tracing::debug!(%message, "console"),
        }
        self.console.write().push(ConsoleMessage {
            level,
            message,
            timestamp: Utc::now(),
        });
    }

    /// All alerts raised so far
    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.read().clone()
    }

    /// Alert texts, oldest first
    pub fn alert_messages(&self) -> Vec<String> {
        self.alerts.read().iter().map(|a| a.message.clone()).collect()
    }

    /// Most recent alert text
    pub fn last_alert(&self) -> Option<String> {
        self.alerts.read().last().map(|a| a.message.clone())
    }

    /// Console output so far
    pub fn console_output(&self) -> Vec<ConsoleMessage> {
        self.console.read().clone()
    }

    /// Forget all alerts and console output
    pub fn clear(&self) {
        self.alerts.write().clear();
        self.console.write().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alerts_and_console_are_separate() {
        let log = NoticeLog::new();
        log.alert("Error: file too large");
        log.console(ConsoleLevel::Error, "Error: connection refused");

        assert_eq!(log.alert_messages(), vec!["Error: file too large"]);
        assert_eq!(log.last_alert().as_deref(), Some("Error: file too large"));
        let console = log.console_output();
        assert_eq!(console.len(), 1);
        assert_eq!(console[0].level, ConsoleLevel::Error);

        log.clear();
        assert!(log.alerts().is_empty());
        assert!(log.console_output().is_empty());
    }
}
