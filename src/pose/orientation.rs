//! Orientation conversions - Euler angles and direction vectors over one quaternion.
//!
//! A plane's orientation is stored once, as a unit quaternion. Euler angles
//! (degrees, XYZ order) and the forward direction are two read/write views of
//! that single value, so they can never disagree.

use crate::constants::FORWARD_AXIS;
use crate::error::{SceneError, SceneResult};
use glam::{DQuat, DVec3, EulerRot};

/// Euler order used at the API boundary
pub const EULER_ORDER: EulerRot = EulerRot::XYZ;

/// Orientation input for a composed pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Orientation {
    /// Euler angles in degrees around X, Y and Z
    Euler(DVec3),
    /// Direction the plane's forward axis should point along (need not be unit length)
    Direction(DVec3),
}

impl Default for Orientation {
    fn default() -> Self {
        Self::Euler(DVec3::ZERO)
    }
}

impl Orientation {
    /// Convert to the internal quaternion, validating the input.
    pub fn to_quat(self) -> SceneResult<DQuat> {
        match self {
            Orientation::Euler(degrees) => quat_from_euler_degrees(degrees),
            Orientation::Direction(dir) => quat_from_direction(dir),
        }
    }
}

pub(crate) fn quat_from_euler_degrees(degrees: DVec3) -> SceneResult<DQuat> {
    if !degrees.is_finite() {
        return Err(SceneError::invalid(
            "rotation",
            format!("angles must be finite, got {degrees}"),
        ));
    }
    Ok(DQuat::from_euler(
        EULER_ORDER,
        degrees.x.to_radians(),
        degrees.y.to_radians(),
        degrees.z.to_radians(),
    ))
}

/// Shortest-arc rotation taking the forward axis onto `dir`.
///
/// Roll around the direction is not recoverable from a direction alone; the
/// shortest arc fixes it canonically.
pub(crate) fn quat_from_direction(dir: DVec3) -> SceneResult<DQuat> {
    if !dir.is_finite() {
        return Err(SceneError::invalid(
            "direction",
            format!("components must be finite, got {dir}"),
        ));
    }
    // Rescale by the largest component first so huge vectors don't overflow
    // `length()` and tiny ones don't underflow it.
    let largest = dir.abs().max_element();
    if largest == 0.0 {
        return Err(SceneError::invalid(
            "direction",
            "zero-length direction has no orientation",
        ));
    }
    Ok(DQuat::from_rotation_arc(FORWARD_AXIS, (dir / largest).normalize()))
}

/// Euler angles (degrees, XYZ) of a rotation.
pub(crate) fn euler_degrees(rotation: DQuat) -> DVec3 {
    let (x, y, z) = rotation.to_euler(EULER_ORDER);
    DVec3::new(x.to_degrees(), y.to_degrees(), z.to_degrees())
}

/// Forward direction of a rotation (unit length).
#[inline]
pub(crate) fn forward(rotation: DQuat) -> DVec3 {
    rotation * FORWARD_AXIS
}
