//! Subscription registry - typed handlers keyed by event kind.
//!
//! Insertion order is dispatch order. Handlers live behind `Arc<Mutex<_>>`
//! so a dispatch can snapshot the list and run callbacks without holding
//! the registry lock.

use super::events::{CanvasPoint, EventKind, InputEvent, KeyCode, PayloadKind};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// Callback for one subscription, typed by the payload it accepts.
pub enum Handler {
    Pointer(Box<dyn FnMut(CanvasPoint) + Send>),
    Key(Box<dyn FnMut(KeyCode) + Send>),
    Wheel(Box<dyn FnMut(f32) + Send>),
}

impl Handler {
    pub fn pointer<F>(f: F) -> Self
    where
        F: FnMut(CanvasPoint) + Send + 'static,
    {
        Self::Pointer(Box::new(f))
    }

    pub fn key<F>(f: F) -> Self
    where
        F: FnMut(KeyCode) + Send + 'static,
    {
        Self::Key(Box::new(f))
    }

    pub fn wheel<F>(f: F) -> Self
    where
        F: FnMut(f32) + Send + 'static,
    {
        Self::Wheel(Box::new(f))
    }

    pub fn payload(&self) -> PayloadKind {
        match self {
            Handler::Pointer(_) => PayloadKind::Pointer,
            Handler::Key(_) => PayloadKind::Key,
            Handler::Wheel(_) => PayloadKind::Wheel,
        }
    }

    pub(super) fn call(&mut self, event: &InputEvent) {
        match (self, event) {
            (
                Handler::Pointer(f),
                InputEvent::MouseDown(p)
                | InputEvent::MouseUp(p)
                | InputEvent::MouseClicked(p)
                | InputEvent::DblClick(p)
                | InputEvent::MouseMove(p),
            ) => f(*p),
            (Handler::Key(f), InputEvent::KeyDown(code) | InputEvent::KeyUp(code)) => f(*code),
            (Handler::Wheel(f), InputEvent::MouseWheel(delta)) => f(*delta),
            // Kinds are matched against payloads at subscription time.
            _ => {}
        }
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handler::{:?}", self.payload())
    }
}

/// Opaque token identifying one subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionHandle(u64);

pub(super) type SharedHandler = Arc<Mutex<Handler>>;

struct Subscription {
    kind: EventKind,
    handle: SubscriptionHandle,
    handler: SharedHandler,
}

#[derive(Default)]
pub(super) struct Registry {
    subscriptions: Vec<Subscription>,
    next_id: u64,
}

impl Registry {
    pub(super) fn add(&mut self, kind: EventKind, handler: Handler) -> SubscriptionHandle {
        let handle = SubscriptionHandle(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            kind,
            handle,
            handler: Arc::new(Mutex::new(handler)),
        });
        handle
    }

    /// Returns `None` if the handle was already removed.
    pub(super) fn remove(&mut self, handle: SubscriptionHandle) -> Option<EventKind> {
        let index = self.subscriptions.iter().position(|s| s.handle == handle)?;
        Some(self.subscriptions.remove(index).kind)
    }

    pub(super) fn count(&self, kind: EventKind) -> usize {
        self.subscriptions.iter().filter(|s| s.kind == kind).count()
    }

    pub(super) fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub(super) fn clear(&mut self) {
        self.subscriptions.clear();
    }

    /// Handlers in dispatch order, detached from the registry.
    pub(super) fn snapshot(&self) -> Vec<(EventKind, SharedHandler)> {
        self.subscriptions
            .iter()
            .map(|s| (s.kind, Arc::clone(&s.handler)))
            .collect()
    }
}
