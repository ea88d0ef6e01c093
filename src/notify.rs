//! User-facing notices (the console's toast messages).

use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub message: String,
}

pub trait Notifier: Send + Sync {
    fn notify(&self, level: Level, message: &str);

    fn success(&self, message: &str) {
        self.notify(Level::Success, message);
    }

    fn warning(&self, message: &str) {
        self.notify(Level::Warning, message);
    }

    fn error(&self, message: &str) {
        self.notify(Level::Error, message);
    }
}

/// Prints notices to stderr and mirrors them into the trace log
#[derive(Debug, Default, Clone)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, level: Level, message: &str) {
        match level {
            Level::Success => {
                tracing::info!(notice = "success", "{}", message);
                eprintln!("✓ {}", message);
            }
            Level::Info => {
                tracing::info!(notice = "info", "{}", message);
                eprintln!("{}", message);
            }
            Level::Warning => {
                tracing::warn!(notice = "warning", "{}", message);
                eprintln!("Warning: {}", message);
            }
            Level::Error => {
                tracing::error!(notice = "error", "{}", message);
                eprintln!("Error: {}", message);
            }
        }
    }
}

/// Keeps every notice in memory
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().map(|n| n.clone()).unwrap_or_default()
    }

    pub fn count(&self, level: Level) -> usize {
        self.notices().iter().filter(|n| n.level == level).count()
    }

    pub fn clear(&self) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.clear();
        }
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: Level, message: &str) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(Notice {
                level,
                message: message.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_notifier_counts_by_level() {
        let notifier = RecordingNotifier::new();
        notifier.error("a");
        notifier.warning("b");
        notifier.error("c");

        assert_eq!(notifier.count(Level::Error), 2);
        assert_eq!(notifier.count(Level::Warning), 1);
        assert_eq!(notifier.notices()[1].message, "b");

        notifier.clear();
        assert!(notifier.notices().is_empty());
    }
}
