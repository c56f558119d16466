//! Event types - raw host events in, normalized subscriber events out.

use crate::error::SceneError;
use glam::Vec2;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Canvas-local 2D coordinates (device coordinates minus the canvas origin).
pub type CanvasPoint = Vec2;

/// Host key code, delivered unchanged to keyboard subscribers.
pub type KeyCode = u32;

/// Mouse button enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// Fixed set of event kinds a subscriber can register against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    MouseDown,
    MouseUp,
    /// Derived: press and release of one button without a drag in between
    MouseClicked,
    /// Derived: two clicks inside the double-click window
    DblClick,
    MouseMove,
    KeyDown,
    KeyUp,
    MouseWheel,
}

/// Shape of the payload an event kind delivers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// Canvas-local coordinates
    Pointer,
    /// Key code
    Key,
    /// Wheel delta
    Wheel,
}

impl EventKind {
    pub const ALL: [EventKind; 8] = [
        EventKind::MouseDown,
        EventKind::MouseUp,
        EventKind::MouseClicked,
        EventKind::DblClick,
        EventKind::MouseMove,
        EventKind::KeyDown,
        EventKind::KeyUp,
        EventKind::MouseWheel,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EventKind::MouseDown => "mousedown",
            EventKind::MouseUp => "mouseup",
            EventKind::MouseClicked => "mouseclicked",
            EventKind::DblClick => "dblclick",
            EventKind::MouseMove => "mousemove",
            EventKind::KeyDown => "keydown",
            EventKind::KeyUp => "keyup",
            EventKind::MouseWheel => "mousewheel",
        }
    }

    pub fn payload(self) -> PayloadKind {
        match self {
            EventKind::KeyDown | EventKind::KeyUp => PayloadKind::Key,
            EventKind::MouseWheel => PayloadKind::Wheel,
            _ => PayloadKind::Pointer,
        }
    }

    pub fn is_keyboard(self) -> bool {
        self.payload() == PayloadKind::Key
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EventKind {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| SceneError::UnsupportedEvent(s.to_string()))
    }
}

/// A normalized event as delivered to subscribers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    MouseDown(CanvasPoint),
    MouseUp(CanvasPoint),
    MouseClicked(CanvasPoint),
    DblClick(CanvasPoint),
    MouseMove(CanvasPoint),
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    MouseWheel(f32),
}

impl InputEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            InputEvent::MouseDown(_) => EventKind::MouseDown,
            InputEvent::MouseUp(_) => EventKind::MouseUp,
            InputEvent::MouseClicked(_) => EventKind::MouseClicked,
            InputEvent::DblClick(_) => EventKind::DblClick,
            InputEvent::MouseMove(_) => EventKind::MouseMove,
            InputEvent::KeyDown(_) => EventKind::KeyDown,
            InputEvent::KeyUp(_) => EventKind::KeyUp,
            InputEvent::MouseWheel(_) => EventKind::MouseWheel,
        }
    }
}

/// Raw device event as delivered by the host environment.
///
/// Positions are device coordinates. Timestamps come from any monotonic host
/// clock; only differences between them matter.
#[derive(Debug, Clone, PartialEq)]
pub enum RawEvent {
    PointerDown {
        position: Vec2,
        button: MouseButton,
        timestamp: Duration,
    },
    PointerUp {
        position: Vec2,
        button: MouseButton,
        timestamp: Duration,
    },
    PointerMove {
        position: Vec2,
        timestamp: Duration,
    },
    /// Active touch points after the touch began
    TouchStart {
        touches: Vec<Vec2>,
        timestamp: Duration,
    },
    TouchMove {
        touches: Vec<Vec2>,
        timestamp: Duration,
    },
    /// Touch points still active after the touch ended
    TouchEnd {
        touches: Vec<Vec2>,
        timestamp: Duration,
    },
    Wheel {
        position: Vec2,
        delta: f32,
        timestamp: Duration,
    },
    KeyDown {
        key_code: KeyCode,
        timestamp: Duration,
    },
    KeyUp {
        key_code: KeyCode,
        timestamp: Duration,
    },
}

impl RawEvent {
    pub fn mouse_down(button: MouseButton, x: f32, y: f32, at_ms: u64) -> Self {
        Self::PointerDown {
            position: Vec2::new(x, y),
            button,
            timestamp: Duration::from_millis(at_ms),
        }
    }

    pub fn mouse_up(button: MouseButton, x: f32, y: f32, at_ms: u64) -> Self {
        Self::PointerUp {
            position: Vec2::new(x, y),
            button,
            timestamp: Duration::from_millis(at_ms),
        }
    }

    pub fn mouse_move(x: f32, y: f32, at_ms: u64) -> Self {
        Self::PointerMove {
            position: Vec2::new(x, y),
            timestamp: Duration::from_millis(at_ms),
        }
    }

    pub fn wheel(x: f32, y: f32, delta: f32, at_ms: u64) -> Self {
        Self::Wheel {
            position: Vec2::new(x, y),
            delta,
            timestamp: Duration::from_millis(at_ms),
        }
    }

    pub fn key_down(key_code: KeyCode, at_ms: u64) -> Self {
        Self::KeyDown {
            key_code,
            timestamp: Duration::from_millis(at_ms),
        }
    }

    pub fn key_up(key_code: KeyCode, at_ms: u64) -> Self {
        Self::KeyUp {
            key_code,
            timestamp: Duration::from_millis(at_ms),
        }
    }

    pub fn is_keyboard(&self) -> bool {
        matches!(self, RawEvent::KeyDown { .. } | RawEvent::KeyUp { .. })
    }

    pub fn timestamp(&self) -> Duration {
        match self {
            RawEvent::PointerDown { timestamp, .. }
            | RawEvent::PointerUp { timestamp, .. }
            | RawEvent::PointerMove { timestamp, .. }
            | RawEvent::TouchStart { timestamp, .. }
            | RawEvent::TouchMove { timestamp, .. }
            | RawEvent::TouchEnd { timestamp, .. }
            | RawEvent::Wheel { timestamp, .. }
            | RawEvent::KeyDown { timestamp, .. }
            | RawEvent::KeyUp { timestamp, .. } => *timestamp,
        }
    }
}
