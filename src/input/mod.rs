//! Mouse, touch and keyboard input mediation for the scene.
//!
//! Raw host events go in through `InputMediator::handle_raw`; normalized,
//! canvas-local events come out to subscribers registered per `EventKind`.
//!
//! ## Architecture
//!
//! The input system keeps all mutable state in one explicit `InputState`
//! (enable flags, button/key state, press gesture machine). Handlers for each
//! raw event family update that state first and return the events to emit.
//! The mediator owns the state plus the subscription registry and performs
//! the locked-update / unlocked-dispatch split.
//!
//! ## Modules
//!
//! - `events` - Event kinds, payloads, raw host events
//! - `coords` - Device to canvas coordinate conversion
//! - `state` - Input state, button state and gesture state machine
//! - `mouse_down` - Press handling (button down, touch start)
//! - `mouse_up` - Release handling, click and double-click derivation
//! - `drag` - Move handling and drag detection
//! - `keyboard` - Key down/up handling
//! - `wheel` - Wheel handling
//! - `registry` - Typed subscription registry
//! - `mediator` - Public mediator and dispatch loop

pub mod coords;
mod drag;
mod events;
mod keyboard;
mod mediator;
mod mouse_down;
mod mouse_up;
mod registry;
mod state;
mod wheel;

pub use events::{CanvasPoint, EventKind, InputEvent, KeyCode, MouseButton, PayloadKind, RawEvent};
pub use mediator::InputMediator;
pub use registry::{Handler, SubscriptionHandle};
pub use state::{ButtonState, ClickPolicy, GestureState, InputState, PressSource};
