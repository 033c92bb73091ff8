//! Short-lived notifications stacked in the top-right corner.

use std::time::{Duration, Instant};

pub const DEFAULT_TOAST_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    expires_at: Instant,
}

impl Toast {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug)]
pub struct ToastQueue {
    ttl: Duration,
    toasts: Vec<Toast>,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_TTL)
    }
}

impl ToastQueue {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            toasts: Vec::new(),
        }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push_at(ToastKind::Success, message, Instant::now());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push_at(ToastKind::Error, message, Instant::now());
    }

    pub fn push_at(&mut self, kind: ToastKind, message: impl Into<String>, now: Instant) {
        self.toasts.push(Toast {
            kind,
            message: message.into(),
            expires_at: now + self.ttl,
        });
    }

    /// Drops expired toasts; returns whether any are left to draw.
    pub fn prune(&mut self, now: Instant) -> bool {
        self.toasts.retain(|toast| !toast.is_expired(now));
        !self.toasts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_expire_after_ttl() {
        let start = Instant::now();
        let mut queue = ToastQueue::new(Duration::from_secs(2));
        queue.push_at(ToastKind::Success, "Logged out successfully", start);
        queue.push_at(ToastKind::Error, "later", start + Duration::from_secs(1));

        assert!(queue.prune(start + Duration::from_millis(1999)));
        assert_eq!(queue.len(), 2);

        assert!(queue.prune(start + Duration::from_secs(2)));
        let remaining: Vec<_> = queue.iter().map(|toast| toast.message.as_str()).collect();
        assert_eq!(remaining, vec!["later"]);

        assert!(!queue.prune(start + Duration::from_secs(3)));
        assert!(queue.is_empty());
    }

    #[test]
    fn toasts_keep_push_order() {
        let mut queue = ToastQueue::default();
        queue.success("first");
        queue.error("second");
        let kinds: Vec<_> = queue.iter().map(|toast| toast.kind).collect();
        assert_eq!(kinds, vec![ToastKind::Success, ToastKind::Error]);
    }
}
