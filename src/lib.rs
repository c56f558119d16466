//! Pose resolution and input mediation for a real-time 3D scene viewer.
//!
//! - [`pose`] turns an explicit matrix or a composed position / orientation /
//!   size description into a cached world matrix.
//! - [`input`] normalizes host pointer, touch and keyboard events into typed
//!   subscriptions with click and double-click detection.
//! - [`scene`] ties one mediator to a set of [`image_plane::ImagePlane`]s and
//!   picks them with rays.

pub mod assets;
pub mod constants;
pub mod error;
pub mod image_plane;
pub mod input;
pub mod logging;
pub mod perf;
pub mod picking;
pub mod pose;
pub mod scene;
pub mod settings;
pub mod settings_watcher;

pub use error::{SceneError, SceneResult};
pub use image_plane::{ImagePlane, ImageSource};
pub use input::{EventKind, Handler, InputEvent, InputMediator, MouseButton, RawEvent, SubscriptionHandle};
pub use picking::Ray;
pub use pose::{ComposedPose, Orientation, Pose, PoseConfig};
pub use scene::{PickHit, Scene};
pub use settings::Settings;
