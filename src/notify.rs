//! Transient toast notifications, shown first-in-first-out.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub created: Instant,
}

/// Notification channel
#[derive(Debug)]
pub struct Toasts {
    queue: VecDeque<Toast>,
    lifetime: Duration,
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

impl Toasts {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            queue: VecDeque::new(),
            lifetime,
        }
    }

    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) {
        let message = message.into();
        match kind {
            ToastKind::Success => tracing::info!("Toast: {}", message),
            ToastKind::Error => tracing::warn!("Toast: {}", message),
        }
        self.queue.push_back(Toast {
            kind,
            message,
            created: Instant::now(),
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Error, message);
    }

    /// Drop toasts older than the lifetime.
    pub fn expire(&mut self, now: Instant) {
        while let Some(front) = self.queue.front() {
            if now.duration_since(front.created) < self.lifetime {
                break;
            }
            self.queue.pop_front();
        }
    }

    pub fn dismiss(&mut self, index: usize) {
        self.queue.remove(index);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.queue.iter()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Count toasts of a kind carrying exactly this message.
    #[cfg(test)]
    pub fn count(&self, kind: ToastKind, message: &str) -> usize {
        self.queue
            .iter()
            .filter(|t| t.kind == kind && t.message == message)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut toasts = Toasts::default();
        toasts.success("first");
        toasts.error("second");
        let messages: Vec<_> = toasts.iter().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
        assert_eq!(toasts.count(ToastKind::Error, "second"), 1);
    }

    #[test]
    fn test_expire() {
        let mut toasts = Toasts::new(Duration::from_millis(10));
        toasts.success("old");
        let later = Instant::now() + Duration::from_millis(20);
        toasts.expire(later);
        assert!(toasts.is_empty());
    }

    #[test]
    fn test_dismiss() {
        let mut toasts = Toasts::default();
        toasts.success("a");
        toasts.success("b");
        toasts.dismiss(0);
        assert_eq!(toasts.iter().next().unwrap().message, "b");
        toasts.dismiss(5);
        assert_eq!(toasts.len(), 1);
    }
}
