//! Input mediator - normalizes raw host events and fans them out to subscribers.
//!
//! ## Dispatch model
//!
//! One raw event is processed atomically:
//!
//! 1. State (buttons, keys, pointer, gesture) is updated under the lock.
//! 2. The subscription list is snapshotted and the lock released.
//! 3. Each produced event goes to the snapshot's matching handlers in
//!    registration order.
//!
//! Callbacks may subscribe, unsubscribe, toggle flags or feed more raw
//! events. Registry changes take effect from the next raw event. Raw events
//! arriving while a dispatch runs (from a callback or another thread) are
//! queued and drained in arrival order by the dispatching thread.

use super::events::{CanvasPoint, EventKind, InputEvent, KeyCode, MouseButton, RawEvent};
use super::registry::{Handler, Registry, SharedHandler, SubscriptionHandle};
use super::state::{ButtonState, ClickPolicy, InputState};
use crate::error::{SceneError, SceneResult};
use crate::profile_scope;
use crate::settings::InputSettings;
use glam::Vec2;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

struct Inner {
    state: InputState,
    registry: Registry,
    pending: VecDeque<RawEvent>,
    dispatching: bool,
}

type Batch = (Vec<InputEvent>, Vec<(EventKind, SharedHandler)>);

/// Scene-owned mediator between host input and subscribers.
///
/// Cloning yields another handle to the same mediator.
#[derive(Clone)]
pub struct InputMediator {
    inner: Arc<Mutex<Inner>>,
}

impl Default for InputMediator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InputMediator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("InputMediator")
            .field("enabled", &inner.state.enabled)
            .field("keyboard_enabled", &inner.state.keyboard_enabled)
            .field("buttons", &inner.state.buttons)
            .field("subscriptions", &inner.registry.len())
            .finish()
    }
}

impl InputMediator {
    pub fn new() -> Self {
        Self::from_state(InputState::default())
    }

    /// Create a mediator with click policy and initial enable flags from settings.
    pub fn with_settings(settings: &InputSettings) -> Self {
        let mut state = InputState::new(ClickPolicy::from(settings));
        state.set_enabled(settings.enabled);
        state.set_keyboard_enabled(settings.keyboard_enabled);
        Self::from_state(state)
    }

    fn from_state(state: InputState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                state,
                registry: Registry::default(),
                pending: VecDeque::new(),
                dispatching: false,
            })),
        }
    }

    /// Replace the click policy. Enable flags are runtime state and are left alone.
    pub fn apply_settings(&self, settings: &InputSettings) {
        self.inner.lock().state.set_policy(ClickPolicy::from(settings));
    }

    pub fn click_policy(&self) -> ClickPolicy {
        self.inner.lock().state.policy
    }

    // ------------------------------------------------------------------------
    // Enable flags
    // ------------------------------------------------------------------------

    /// While disabled every raw event is dropped before normalization.
    pub fn set_enabled(&self, enabled: bool) {
        debug!(enabled, "Input enabled changed");
        self.inner.lock().state.set_enabled(enabled);
    }

    pub fn enabled(&self) -> bool {
        self.inner.lock().state.enabled
    }

    /// Gates keyboard events only; pointer and touch are unaffected.
    pub fn set_keyboard_enabled(&self, enabled: bool) {
        debug!(enabled, "Keyboard input enabled changed");
        self.inner.lock().state.set_keyboard_enabled(enabled);
    }

    pub fn keyboard_enabled(&self) -> bool {
        self.inner.lock().state.keyboard_enabled
    }

    // ------------------------------------------------------------------------
    // State queries
    // ------------------------------------------------------------------------

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.inner.lock().state.buttons.get(button)
    }

    pub fn button_state(&self) -> ButtonState {
        self.inner.lock().state.buttons
    }

    pub fn is_key_down(&self, key_code: KeyCode) -> bool {
        self.inner.lock().state.keys_down.contains(&key_code)
    }

    /// Last known pointer position, canvas-local.
    pub fn pointer_position(&self) -> CanvasPoint {
        self.inner.lock().state.pointer
    }

    /// Host reports where the canvas sits in device coordinates.
    pub fn set_canvas_origin(&self, origin: Vec2) {
        self.inner.lock().state.set_canvas_origin(origin);
    }

    pub fn canvas_origin(&self) -> Vec2 {
        self.inner.lock().state.coords.canvas_origin
    }

    // ------------------------------------------------------------------------
    // Subscriptions
    // ------------------------------------------------------------------------

    /// Subscribe `handler` to `kind`. Fails with `UnsupportedEvent` when the
    /// handler's payload does not match what the kind delivers.
    pub fn on(&self, kind: EventKind, handler: Handler) -> SceneResult<SubscriptionHandle> {
        if handler.payload() != kind.payload() {
            return Err(SceneError::UnsupportedEvent(format!(
                "{kind} does not deliver {:?} payloads",
                handler.payload()
            )));
        }
        let handle = self.inner.lock().registry.add(kind, handler);
        debug!(%kind, ?handle, "Subscribed");
        Ok(handle)
    }

    /// Subscribe by event name, e.g. `"mousedown"` or `"keyup"`.
    pub fn on_named(&self, name: &str, handler: Handler) -> SceneResult<SubscriptionHandle> {
        let kind = name.parse::<EventKind>()?;
        self.on(kind, handler)
    }

    pub fn on_pointer<F>(&self, kind: EventKind, f: F) -> SceneResult<SubscriptionHandle>
    where
        F: FnMut(CanvasPoint) + Send + 'static,
    {
        self.on(kind, Handler::pointer(f))
    }

    pub fn on_key<F>(&self, kind: EventKind, f: F) -> SceneResult<SubscriptionHandle>
    where
        F: FnMut(KeyCode) + Send + 'static,
    {
        self.on(kind, Handler::key(f))
    }

    pub fn on_wheel<F>(&self, f: F) -> SubscriptionHandle
    where
        F: FnMut(f32) + Send + 'static,
    {
        self.inner
            .lock()
            .registry
            .add(EventKind::MouseWheel, Handler::wheel(f))
    }

    /// Cancel a subscription. Idempotent; returns whether anything was removed.
    pub fn off(&self, handle: SubscriptionHandle) -> bool {
        let removed = self.inner.lock().registry.remove(handle);
        if let Some(kind) = removed {
            debug!(%kind, ?handle, "Unsubscribed");
        }
        removed.is_some()
    }

    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.inner.lock().registry.count(kind)
    }

    /// Drop every subscription.
    pub fn clear_subscriptions(&self) {
        self.inner.lock().registry.clear();
    }

    // ------------------------------------------------------------------------
    // Raw event intake
    // ------------------------------------------------------------------------

    /// Feed one raw host event.
    pub fn handle_raw(&self, event: RawEvent) {
        {
            let mut inner = self.inner.lock();
            inner.pending.push_back(event);
            if inner.dispatching {
                trace!(queued = inner.pending.len(), "Raw event queued behind active dispatch");
                return;
            }
            inner.dispatching = true;
        }

        let _guard = DispatchGuard { inner: &self.inner };
        while let Some((events, subscribers)) = self.next_batch() {
            deliver(&events, &subscribers);
        }
    }

    /// Process queued raw events until one produces output. Clears the
    /// dispatching flag under the same lock that observes the empty queue.
    fn next_batch(&self) -> Option<Batch> {
        let mut inner = self.inner.lock();
        loop {
            let Some(raw) = inner.pending.pop_front() else {
                inner.dispatching = false;
                return None;
            };
            let at = raw.timestamp();
            let events = inner.state.process(raw);
            if events.is_empty() {
                trace!(at_ms = at.as_millis() as u64, "Raw event produced no events");
                continue;
            }
            let subscribers = inner.registry.snapshot();
            return Some((events, subscribers));
        }
    }
}

fn deliver(events: &[InputEvent], subscribers: &[(EventKind, SharedHandler)]) {
    profile_scope!("dispatch_event");

    for event in events {
        let kind = event.kind();
        let mut delivered = 0usize;
        for (_, handler) in subscribers.iter().filter(|(k, _)| *k == kind) {
            handler.lock().call(event);
            delivered += 1;
        }
        trace!(%kind, delivered, "Dispatched");
    }
}

/// Resets the dispatching flag if a callback panics mid-dispatch.
struct DispatchGuard<'a> {
    inner: &'a Mutex<Inner>,
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            let mut inner = self.inner.lock();
            inner.dispatching = false;
            inner.pending.clear();
        }
    }
}
