//! Notification center - publish/subscribe for user-facing messages
//!
//! The center is owned by whoever mounts a catalog (the shell session) and
//! handed to the controller and import pipeline as a [`Notifier`]. It keeps
//! the recent notifications for display and fans each one out to the
//! subscribers. Notifications dismiss themselves after a fixed delay.

use chrono::{DateTime, Duration, Utc};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::core::clock::Clock;

/// Default auto-dismiss delay
pub const DEFAULT_TIMEOUT_SECS: i64 = 5;

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::Success => write!(f, "success"),
            NotificationKind::Error => write!(f, "error"),
            NotificationKind::Warning => write!(f, "warning"),
            NotificationKind::Info => write!(f, "info"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub kind: NotificationKind,
    pub created_at: DateTime<Utc>,
}

/// Fire-and-forget sink for notifications
pub trait Notifier {
    fn notify(&self, message: &str, kind: NotificationKind);
}

/// Handle returned by [`NotificationCenter::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn Fn(&Notification)>;

pub struct NotificationCenter {
    clock: Rc<dyn Clock>,
    timeout: Duration,
    next_id: Cell<u64>,
    open: Cell<bool>,
    queue: RefCell<Vec<Notification>>,
    subscribers: RefCell<Vec<(SubscriptionId, Subscriber)>>,
}

impl NotificationCenter {
    pub fn new(clock: Rc<dyn Clock>, timeout: Duration) -> Self {
        Self {
            clock,
            timeout,
            next_id: Cell::new(1),
            open: Cell::new(true),
            queue: RefCell::new(Vec::new()),
            subscribers: RefCell::new(Vec::new()),
        }
    }

    /// Register a callback invoked for every published notification
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Notification) + 'static,
    {
        let id = SubscriptionId(self.bump());
        self.subscribers.borrow_mut().push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id);
        subscribers.len() != before
    }

    /// Notifications that have not yet been dismissed, oldest first
    pub fn active(&self) -> Vec<Notification> {
        self.prune();
        self.queue.borrow().clone()
    }

    /// Dismiss a notification before its timeout
    pub fn dismiss(&self, id: u64) {
        self.queue.borrow_mut().retain(|n| n.id != id);
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    /// Tear down: drop subscribers and pending notifications
    ///
    /// Anything published afterwards is discarded.
    pub fn shutdown(&self) {
        self.open.set(false);
        self.subscribers.borrow_mut().clear();
        self.queue.borrow_mut().clear();
    }

    fn publish(&self, message: &str, kind: NotificationKind) -> Option<Notification> {
        if !self.is_open() {
            tracing::debug!(%kind, text = message, "notification after shutdown dropped");
            return None;
        }

        let notification = Notification {
            id: self.bump(),
            message: message.to_string(),
            kind,
            created_at: self.clock.now(),
        };

        self.prune();
        self.queue.borrow_mut().push(notification.clone());

        // queue borrow is released, so subscribers may publish in turn
        for (_, subscriber) in self.subscribers.borrow().iter() {
            subscriber(&notification);
        }
        Some(notification)
    }

    fn prune(&self) {
        let now = self.clock.now();
        let timeout = self.timeout;
        self.queue
            .borrow_mut()
            .retain(|n| n.created_at + timeout > now);
    }

    fn bump(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }
}

impl Notifier for NotificationCenter {
    fn notify(&self, message: &str, kind: NotificationKind) {
        tracing::info!(%kind, text = message, "notification");
        self.publish(message, kind);
    }
}

impl Drop for NotificationCenter {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// A notifier that swallows everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _message: &str, _kind: NotificationKind) {}
}
