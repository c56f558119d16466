//! World placement of planar components.
//!
//! A `Pose` turns flexible, partially-overlapping inputs (explicit matrix, or
//! position + rotation/direction + size + content aspect) into one cached
//! world matrix consumed by rendering and picking.
//!
//! ## Modules
//!
//! - `config` - `PoseConfig` / `ComposedPose` creation inputs
//! - `orientation` - Euler angle and direction views over one rotation
//! - `resolver` - `Pose` with eager matrix recomputation

mod config;
mod orientation;
mod resolver;

pub use config::{ComposedPose, PoseConfig};
pub use orientation::{EULER_ORDER, Orientation};
pub use resolver::{PLANE_CORNERS, Pose, compose_matrix, plane_scale, resolve};
