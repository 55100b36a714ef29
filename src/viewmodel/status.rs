//! Warning banner for rejected operations.

use crate::config::WarningConfig;
use std::time::{Duration, Instant};

/// Holds the latest user-facing warning, optionally clearing itself.
///
/// # Example
///
/// ```ignore
/// use criteria_composer::viewmodel::WarningBanner;
///
/// let mut banner = WarningBanner::new();
/// banner.set("At least one filter group is required");
/// assert!(banner.message().is_some());
///
/// banner.clear();
/// assert!(banner.message().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct WarningBanner {
    message: Option<String>,
    set_at: Option<Instant>,
    /// None = keep until replaced or dismissed
    auto_clear_after: Option<Duration>,
}

impl WarningBanner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A banner that clears itself after `duration`.
    #[must_use]
    pub const fn with_auto_clear(duration: Duration) -> Self {
        Self {
            message: None,
            set_at: None,
            auto_clear_after: Some(duration),
        }
    }

    #[must_use]
    pub fn from_config(config: &WarningConfig) -> Self {
        config
            .auto_clear()
            .map_or_else(Self::new, Self::with_auto_clear)
    }

    /// Show a warning, replacing any previous one.
    pub fn set(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.set_at = Some(Instant::now());
    }

    pub fn clear(&mut self) {
        self.message = None;
        self.set_at = None;
    }

    /// The current warning, after applying auto-clear.
    pub fn message(&mut self) -> Option<&str> {
        if let (Some(set_at), Some(duration)) = (self.set_at, self.auto_clear_after) {
            if set_at.elapsed() >= duration {
                self.clear();
            }
        }
        self.message.as_deref()
    }

    /// The current warning without applying auto-clear.
    #[must_use]
    pub fn peek(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub const fn has_message(&self) -> bool {
        self.message.is_some()
    }

    /// Take the warning, clearing it.
    pub fn take(&mut self) -> Option<String> {
        self.set_at = None;
        self.message.take()
    }
}
