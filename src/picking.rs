//! Picking Module
//!
//! R-tree based broad phase over the world-space bounding boxes of planes,
//! followed by an exact ray/quad test against each candidate's resolved
//! matrix. This keeps ray picking at O(log n) candidates instead of testing
//! every plane.

use crate::input::CanvasPoint;
use crate::input::coords::CoordinateConverter;
use glam::{DMat4, DVec2, DVec3, Vec2};
use rstar::{AABB, RTree, RTreeObject, SelectionFunction};
use std::collections::HashMap;

/// Padding added to boxes so flat planes still have a usable envelope.
const ENVELOPE_EPSILON: f64 = 1e-9;

/// A ray with unit-length direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    /// Returns `None` for a zero or non-finite direction.
    pub fn new(origin: DVec3, direction: DVec3) -> Option<Self> {
        let direction = direction.try_normalize()?;
        origin.is_finite().then_some(Self { origin, direction })
    }

    /// Ray through a canvas pixel.
    ///
    /// Expects a projection with depth range [0, 1] (glam `perspective_rh`,
    /// `orthographic_rh`); the ray starts on the near plane.
    pub fn from_canvas(
        point: CanvasPoint,
        canvas_size: Vec2,
        view: DMat4,
        projection: DMat4,
    ) -> Option<Self> {
        if canvas_size.x <= 0.0 || canvas_size.y <= 0.0 {
            return None;
        }
        let ndc = CoordinateConverter::canvas_to_ndc(point, canvas_size).as_dvec2();
        let inv_view_proj = (projection * view).inverse();
        let near = inv_view_proj.project_point3(ndc.extend(0.0));
        let far = inv_view_proj.project_point3(ndc.extend(1.0));
        Self::new(near, far - near)
    }

    #[inline]
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }

    fn hits_box(&self, lower: [f64; 3], upper: [f64; 3]) -> bool {
        let mut t_min = 0.0f64;
        let mut t_max = f64::INFINITY;
        for axis in 0..3 {
            let o = self.origin[axis];
            let d = self.direction[axis];
            if d == 0.0 {
                if o < lower[axis] || o > upper[axis] {
                    return false;
                }
                continue;
            }
            let t1 = (lower[axis] - o) / d;
            let t2 = (upper[axis] - o) / d;
            t_min = t_min.max(t1.min(t2));
            t_max = t_max.min(t1.max(t2));
            if t_min > t_max {
                return false;
            }
        }
        true
    }
}

/// Where a ray crossed a plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneHit {
    pub world_pos: DVec3,
    /// Distance from the ray origin
    pub distance: f64,
    /// Position on the plane, (0, 0) bottom-left to (1, 1) top-right
    pub uv: DVec2,
}

/// Intersect a ray with the unit plane placed by `matrix`.
///
/// Works in plane-local space, so any invertible affine matrix (including
/// explicit ones with shear) is handled.
pub fn intersect_plane(ray: &Ray, matrix: &DMat4) -> Option<PlaneHit> {
    let det = matrix.determinant();
    if det == 0.0 || !det.is_finite() {
        return None;
    }
    let inv = matrix.inverse();
    let origin = inv.transform_point3(ray.origin);
    let direction = inv.transform_vector3(ray.direction);
    if direction.z.abs() < 1e-12 {
        return None;
    }
    let t = -origin.z / direction.z;
    if t < 0.0 {
        return None;
    }
    let local = origin + direction * t;
    if local.x.abs() > 0.5 || local.y.abs() > 0.5 {
        return None;
    }
    let world_pos = matrix.transform_point3(local);
    Some(PlaneHit {
        world_pos,
        distance: (world_pos - ray.origin).length(),
        uv: DVec2::new(local.x + 0.5, local.y + 0.5),
    })
}

/// A spatial entry representing a plane's world bounding box.
#[derive(Debug, Clone)]
pub struct PickEntry {
    pub id: String,
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl PickEntry {
    pub fn from_corners(id: impl Into<String>, corners: &[DVec3]) -> Self {
        let (min, max) = corners.iter().fold(
            (DVec3::splat(f64::INFINITY), DVec3::splat(f64::NEG_INFINITY)),
            |(min, max), c| (min.min(*c), max.max(*c)),
        );
        Self {
            id: id.into(),
            min: (min - ENVELOPE_EPSILON).to_array(),
            max: (max + ENVELOPE_EPSILON).to_array(),
        }
    }
}

impl RTreeObject for PickEntry {
    type Envelope = AABB<[f64; 3]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}

impl PartialEq for PickEntry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

struct RaySelection<'a> {
    ray: &'a Ray,
}

impl SelectionFunction<PickEntry> for RaySelection<'_> {
    fn should_unpack_parent(&self, envelope: &AABB<[f64; 3]>) -> bool {
        self.ray.hits_box(envelope.lower(), envelope.upper())
    }

    fn should_unpack_leaf(&self, leaf: &PickEntry) -> bool {
        self.ray.hits_box(leaf.min, leaf.max)
    }
}

/// Spatial index for plane bounding boxes using an R-tree.
pub struct PickIndex {
    tree: RTree<PickEntry>,
    entries: HashMap<String, PickEntry>,
}

impl PickIndex {
    pub fn new() -> Self {
        Self {
            tree: RTree::new(),
            entries: HashMap::new(),
        }
    }

    /// Insert or replace the box for `id`.
    pub fn insert(&mut self, id: &str, corners: &[DVec3]) {
        if let Some(old_entry) = self.entries.remove(id) {
            self.tree.remove(&old_entry);
        }

        let entry = PickEntry::from_corners(id, corners);
        self.tree.insert(entry.clone());
        self.entries.insert(id.to_string(), entry);
    }

    pub fn remove(&mut self, id: &str) -> bool {
        if let Some(entry) = self.entries.remove(id) {
            self.tree.remove(&entry);
            true
        } else {
            false
        }
    }

    /// IDs whose bounding box the ray passes through.
    pub fn query_ray(&self, ray: &Ray) -> Vec<String> {
        self.tree
            .locate_with_selection_function(RaySelection { ray })
            .map(|entry| entry.id.clone())
            .collect()
    }

    /// IDs whose bounding box contains the point.
    pub fn query_point(&self, point: DVec3) -> Vec<String> {
        let point_envelope = AABB::from_point(point.to_array());
        self.tree
            .locate_in_envelope_intersecting(&point_envelope)
            .map(|entry| entry.id.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.tree = RTree::new();
        self.entries.clear();
    }
}

impl Default for PickIndex {
    fn default() -> Self {
        Self::new()
    }
}
