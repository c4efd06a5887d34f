/*
[INPUT]:  User-facing notices (attachment rejections, load failures)
[OUTPUT]: Time-limited, dismissible toast queue for the UI
[POS]:    Notification layer shared by the attachment widget and the TUI
[UPDATE]: When adding toast levels or changing expiry rules
*/

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long a toast stays on screen unless dismissed
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(2000);

/// Toasts kept at once; older ones are dropped first
const MAX_VISIBLE_TOASTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub level: ToastLevel,
    expires_at: Instant,
}

impl Toast {
    pub fn new(title: impl Into<String>, description: impl Into<String>, level: ToastLevel) -> Self {
        Self::with_duration(title, description, level, DEFAULT_TOAST_DURATION)
    }

    pub fn with_duration(
        title: impl Into<String>,
        description: impl Into<String>,
        level: ToastLevel,
        duration: Duration,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            level,
            expires_at: Instant::now() + duration,
        }
    }

    pub fn warning(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, ToastLevel::Warning)
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Stack of visible toasts, newest last
#[derive(Debug, Default)]
pub struct Toasts {
    items: VecDeque<Toast>,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, toast: Toast) {
        if self.items.len() >= MAX_VISIBLE_TOASTS {
            self.items.pop_front();
        }
        self.items.push_back(toast);
    }

    /// Close the most recent toast
    pub fn dismiss_latest(&mut self) -> Option<Toast> {
        self.items.pop_back()
    }

    /// Drop every toast whose time is up; returns how many were removed
    pub fn expire(&mut self, now: Instant) -> usize {
        let before = self.items.len();
        self.items.retain(|toast| !toast.is_expired_at(now));
        before - self.items.len()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Toast> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_expires_after_duration() {
        let toast = Toast::with_duration("t", "d", ToastLevel::Info, Duration::from_millis(50));
        let now = Instant::now();
        assert!(!toast.is_expired_at(now));
        assert!(toast.is_expired_at(now + Duration::from_millis(100)));
    }

    #[test]
    fn test_expire_keeps_live_toasts() {
        let mut toasts = Toasts::new();
        toasts.push(Toast::with_duration("short", "", ToastLevel::Warning, Duration::ZERO));
        toasts.push(Toast::with_duration("long", "", ToastLevel::Warning, Duration::from_secs(60)));

        let removed = toasts.expire(Instant::now() + Duration::from_millis(1));
        assert_eq!(removed, 1);
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts.iter().next().map(|t| t.title.as_str()), Some("long"));
    }

    #[test]
    fn test_dismiss_latest_and_capacity() {
        let mut toasts = Toasts::new();
        for i in 0..5 {
            toasts.push(Toast::warning(format!("toast {i}"), ""));
        }
        assert_eq!(toasts.len(), MAX_VISIBLE_TOASTS);

        let dismissed = toasts.dismiss_latest().expect("a toast");
        assert_eq!(dismissed.title, "toast 4");
        assert_eq!(toasts.iter().next().map(|t| t.title.as_str()), Some("toast 2"));
    }
}
