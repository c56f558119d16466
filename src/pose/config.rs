//! Pose configuration - the inputs a positionable component is created with.

use super::orientation::Orientation;
use crate::constants::DEFAULT_PLANE_SIZE;
use glam::{DMat4, DVec3};

/// Position, orientation and size inputs that compose into a world matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComposedPose {
    /// World-space position of the plane's center
    pub position: DVec3,
    pub orientation: Orientation,
    /// World-space length of the longest edge
    pub size: f64,
    /// Width / height of attached content, if known
    pub aspect: Option<f64>,
}

impl Default for ComposedPose {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            orientation: Orientation::default(),
            size: DEFAULT_PLANE_SIZE,
            aspect: None,
        }
    }
}

impl ComposedPose {
    pub fn with_position(mut self, position: DVec3) -> Self {
        self.position = position;
        self
    }

    /// Orient by Euler angles in degrees.
    pub fn with_rotation(mut self, degrees: DVec3) -> Self {
        self.orientation = Orientation::Euler(degrees);
        self
    }

    /// Orient by a forward direction.
    pub fn with_direction(mut self, dir: DVec3) -> Self {
        self.orientation = Orientation::Direction(dir);
        self
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn with_aspect(mut self, aspect: f64) -> Self {
        self.aspect = Some(aspect);
        self
    }
}

/// How a pose determines its world matrix.
///
/// An explicit matrix overrides everything; otherwise the matrix is composed
/// as `T(position) * R(orientation) * S(size, aspect)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PoseConfig {
    Matrix(DMat4),
    Composed(ComposedPose),
}

impl Default for PoseConfig {
    fn default() -> Self {
        Self::Composed(ComposedPose::default())
    }
}

impl From<DMat4> for PoseConfig {
    fn from(matrix: DMat4) -> Self {
        Self::Matrix(matrix)
    }
}

impl From<ComposedPose> for PoseConfig {
    fn from(pose: ComposedPose) -> Self {
        Self::Composed(pose)
    }
}
