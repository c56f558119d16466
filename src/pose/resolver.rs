//! Pose resolution - cached world matrix for a positionable plane.
//!
//! ## Precedence
//!
//! ```text
//! explicit matrix set  -> resolved = explicit matrix
//! otherwise            -> resolved = T(position) * R(orientation) * S(size, aspect)
//! ```
//!
//! Composed inputs are always stored, even while an explicit matrix overrides
//! them, so clearing the explicit matrix falls back to the latest inputs.
//!
//! Every setter validates first and mutates second, then recomputes the cached
//! matrix before returning. A rejected call leaves the pose untouched.

use super::config::{ComposedPose, PoseConfig};
use super::orientation::{self, Orientation};
use crate::constants::DEFAULT_PLANE_SIZE;
use crate::error::{SceneError, SceneResult};
use crate::profile_scope;
use glam::{DMat4, DQuat, DVec3};
use tracing::trace;

/// Local-space corners of the unit plane, counter-clockwise from bottom-left.
pub const PLANE_CORNERS: [DVec3; 4] = [
    DVec3::new(-0.5, -0.5, 0.0),
    DVec3::new(0.5, -0.5, 0.0),
    DVec3::new(0.5, 0.5, 0.0),
    DVec3::new(-0.5, 0.5, 0.0),
];

/// World placement of one component.
#[derive(Debug, Clone, PartialEq)]
pub struct Pose {
    explicit_matrix: Option<DMat4>,
    position: DVec3,
    rotation: DQuat,
    size: f64,
    intrinsic_aspect: Option<f64>,
    resolved: DMat4,
}

impl Default for Pose {
    fn default() -> Self {
        let mut pose = Self {
            explicit_matrix: None,
            position: DVec3::ZERO,
            rotation: DQuat::IDENTITY,
            size: DEFAULT_PLANE_SIZE,
            intrinsic_aspect: None,
            resolved: DMat4::IDENTITY,
        };
        pose.recompute();
        pose
    }
}

impl Pose {
    /// Create a pose from its configuration, rejecting degenerate inputs.
    pub fn new(config: PoseConfig) -> SceneResult<Self> {
        let mut pose = Self::default();
        match config {
            PoseConfig::Matrix(matrix) => {
                validate_matrix(&matrix)?;
                pose.explicit_matrix = Some(matrix);
            }
            PoseConfig::Composed(composed) => {
                let ComposedPose {
                    position,
                    orientation,
                    size,
                    aspect,
                } = composed;
                validate_position(position)?;
                validate_size(size)?;
                if let Some(aspect) = aspect {
                    validate_aspect(aspect)?;
                }
                pose.position = position;
                pose.rotation = orientation.to_quat()?;
                pose.size = size;
                pose.intrinsic_aspect = aspect;
            }
        }
        pose.recompute();
        Ok(pose)
    }

    /// The cached world matrix. Always consistent with the current inputs.
    #[inline]
    pub fn resolved_matrix(&self) -> DMat4 {
        self.resolved
    }

    pub fn explicit_matrix(&self) -> Option<DMat4> {
        self.explicit_matrix
    }

    /// Set or clear the overriding matrix. `None` re-enables the composed path.
    pub fn set_explicit_matrix(&mut self, matrix: Option<DMat4>) -> SceneResult<()> {
        if let Some(ref m) = matrix {
            validate_matrix(m)?;
        }
        self.explicit_matrix = matrix;
        self.recompute();
        Ok(())
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn set_position(&mut self, position: DVec3) -> SceneResult<()> {
        validate_position(position)?;
        self.position = position;
        self.recompute();
        Ok(())
    }

    /// Orientation as Euler angles in degrees (XYZ order).
    ///
    /// Angles are read back from the stored rotation, so they come out in
    /// canonical range rather than exactly as written.
    pub fn rotation(&self) -> DVec3 {
        orientation::euler_degrees(self.rotation)
    }

    pub fn set_rotation(&mut self, degrees: DVec3) -> SceneResult<()> {
        self.set_orientation(Orientation::Euler(degrees))
    }

    /// Unit forward direction of the plane.
    pub fn direction(&self) -> DVec3 {
        orientation::forward(self.rotation)
    }

    pub fn set_direction(&mut self, dir: DVec3) -> SceneResult<()> {
        self.set_orientation(Orientation::Direction(dir))
    }

    pub fn set_orientation(&mut self, orientation: Orientation) -> SceneResult<()> {
        self.rotation = orientation.to_quat()?;
        self.recompute();
        Ok(())
    }

    /// Stored rotation quaternion.
    pub fn quaternion(&self) -> DQuat {
        self.rotation
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn set_size(&mut self, size: f64) -> SceneResult<()> {
        validate_size(size)?;
        self.size = size;
        self.recompute();
        Ok(())
    }

    pub fn intrinsic_aspect(&self) -> Option<f64> {
        self.intrinsic_aspect
    }

    /// Set or clear the width/height ratio of attached content.
    pub fn set_intrinsic_aspect(&mut self, aspect: Option<f64>) -> SceneResult<()> {
        if let Some(aspect) = aspect {
            validate_aspect(aspect)?;
        }
        self.intrinsic_aspect = aspect;
        self.recompute();
        Ok(())
    }

    /// Content finished loading with known pixel dimensions.
    pub fn set_content_dimensions(&mut self, width: u32, height: u32) -> SceneResult<()> {
        if width == 0 || height == 0 {
            return Err(SceneError::invalid(
                "content dimensions",
                format!("{width}x{height} has no aspect ratio"),
            ));
        }
        self.set_intrinsic_aspect(Some(width as f64 / height as f64))
    }

    /// In-plane (width, height) derived from `size` and the intrinsic aspect.
    ///
    /// Describes the composed inputs; an explicit matrix may scale differently.
    pub fn edge_lengths(&self) -> (f64, f64) {
        let scale = plane_scale(self.size, self.intrinsic_aspect);
        (scale.x, scale.y)
    }

    /// Plane corners transformed by the resolved matrix.
    pub fn world_corners(&self) -> [DVec3; 4] {
        PLANE_CORNERS.map(|c| self.resolved.transform_point3(c))
    }

    pub fn world_center(&self) -> DVec3 {
        self.resolved.transform_point3(DVec3::ZERO)
    }

    /// World-space plane normal (local +Z), zero if the matrix is degenerate.
    pub fn normal(&self) -> DVec3 {
        self.resolved.transform_vector3(DVec3::Z).normalize_or_zero()
    }

    fn recompute(&mut self) {
        profile_scope!("pose_recompute");

        self.resolved = match self.explicit_matrix {
            Some(matrix) => matrix,
            None => compose_matrix(
                self.position,
                self.rotation,
                plane_scale(self.size, self.intrinsic_aspect),
            ),
        };
        trace!(
            explicit = self.explicit_matrix.is_some(),
            size = self.size,
            aspect = ?self.intrinsic_aspect,
            "Pose resolved"
        );
    }
}

/// Resolve a configuration to its world matrix without keeping a pose around.
pub fn resolve(config: &PoseConfig) -> SceneResult<DMat4> {
    Pose::new(*config).map(|pose| pose.resolved_matrix())
}

/// `T(position) * R(rotation) * S(scale)`
#[inline]
pub fn compose_matrix(position: DVec3, rotation: DQuat, scale: DVec3) -> DMat4 {
    DMat4::from_scale_rotation_translation(scale, rotation, position)
}

/// Per-axis scale so the longest in-plane edge equals `size`.
pub fn plane_scale(size: f64, aspect: Option<f64>) -> DVec3 {
    match aspect {
        None => DVec3::splat(size),
        Some(aspect) if aspect >= 1.0 => DVec3::new(size, size / aspect, size),
        Some(aspect) => DVec3::new(size * aspect, size, size),
    }
}

fn validate_size(size: f64) -> SceneResult<()> {
    if !size.is_finite() || size <= 0.0 {
        return Err(SceneError::invalid(
            "size",
            format!("must be positive and finite, got {size}"),
        ));
    }
    Ok(())
}

fn validate_aspect(aspect: f64) -> SceneResult<()> {
    if !aspect.is_finite() || aspect <= 0.0 {
        return Err(SceneError::invalid(
            "intrinsic aspect",
            format!("must be positive and finite, got {aspect}"),
        ));
    }
    Ok(())
}

fn validate_position(position: DVec3) -> SceneResult<()> {
    if !position.is_finite() {
        return Err(SceneError::invalid(
            "position",
            format!("components must be finite, got {position}"),
        ));
    }
    Ok(())
}

fn validate_matrix(matrix: &DMat4) -> SceneResult<()> {
    if !matrix.is_finite() {
        return Err(SceneError::invalid("matrix", "elements must be finite"));
    }
    Ok(())
}
