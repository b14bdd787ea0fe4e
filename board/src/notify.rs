//! Toast notifications.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, warn};

/// How long a toast stays on screen.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub ttl: Duration,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
            ttl: NOTIFICATION_TTL,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Error)
    }
}

pub trait Notifier: Send {
    fn notify(&mut self, notification: Notification);
}

/// Shared toast list. Clones see the same toasts, so a UI can hold one
/// handle while the store writes through another.
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    toasts: Arc<Mutex<Vec<(Instant, Notification)>>>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toasts that have not yet outlived their ttl at `now`; expired ones
    /// are dismissed.
    pub fn active(&self, now: Instant) -> Vec<Notification> {
        let mut toasts = self.toasts.lock();
        prune(&mut toasts, now);
        toasts.iter().map(|(_, toast)| toast.clone()).collect()
    }

    /// Queues `notification` as shown at `now`, dropping whatever has expired
    /// by then so an unpolled queue stays bounded by the ttl.
    fn push_at(&self, now: Instant, notification: Notification) {
        let mut toasts = self.toasts.lock();
        prune(&mut toasts, now);
        toasts.push((now, notification));
    }

    /// Removes and returns every pending toast.
    pub fn drain(&self) -> Vec<Notification> {
        self.toasts.lock().drain(..).map(|(_, toast)| toast).collect()
    }

    pub fn last(&self) -> Option<Notification> {
        self.toasts.lock().last().map(|(_, toast)| toast.clone())
    }

    pub fn messages(&self) -> Vec<String> {
        self.toasts
            .lock()
            .iter()
            .map(|(_, toast)| toast.message.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.toasts.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.lock().is_empty()
    }
}

impl Notifier for ToastQueue {
    fn notify(&mut self, notification: Notification) {
        match notification.severity {
            Severity::Error => warn!(text = %notification.message, "toast"),
            Severity::Info | Severity::Success => debug!(text = %notification.message, "toast"),
        }
        self.push_at(Instant::now(), notification);
    }
}

fn prune(toasts: &mut Vec<(Instant, Notification)>, now: Instant) {
    toasts.retain(|(shown, toast)| now.saturating_duration_since(*shown) < toast.ttl);
}
