//! Unit tests for ray construction and plane intersection.

use glam::{DMat4, DVec3, Vec2};
use viewer_core::picking::{PickIndex, Ray, intersect_plane};
use viewer_core::pose::{ComposedPose, Pose};

fn camera() -> (DMat4, DMat4) {
    let view = DMat4::look_at_rh(DVec3::new(0.0, 0.0, 10.0), DVec3::ZERO, DVec3::Y);
    let projection = DMat4::perspective_rh(60f64.to_radians(), 1.0, 0.5, 50.0);
    (view, projection)
}

#[test]
fn test_center_ray_points_down_view_axis() {
    let (view, projection) = camera();
    let ray = Ray::from_canvas(Vec2::new(200.0, 200.0), Vec2::new(400.0, 400.0), view, projection)
        .unwrap();
    assert!(ray.direction.abs_diff_eq(DVec3::NEG_Z, 1e-9));
    // starts on the near plane
    assert!(ray.origin.abs_diff_eq(DVec3::new(0.0, 0.0, 9.5), 1e-6));
}

#[test]
fn test_canvas_y_grows_downward() {
    let (view, projection) = camera();
    let size = Vec2::new(400.0, 400.0);
    let top = Ray::from_canvas(Vec2::new(200.0, 0.0), size, view, projection).unwrap();
    let bottom = Ray::from_canvas(Vec2::new(200.0, 400.0), size, view, projection).unwrap();
    assert!(top.direction.y > 0.0);
    assert!(bottom.direction.y < 0.0);
}

#[test]
fn test_empty_canvas_has_no_ray() {
    let (view, projection) = camera();
    assert!(Ray::from_canvas(Vec2::ZERO, Vec2::new(0.0, 300.0), view, projection).is_none());
}

#[test]
fn test_intersect_rotated_pose() {
    let pose = Pose::new(
        ComposedPose::default()
            .with_position(DVec3::new(0.0, 0.0, -3.0))
            .with_rotation(DVec3::new(0.0, 0.0, 45.0))
            .with_size(2.0)
            .into(),
    )
    .unwrap();
    let ray = Ray::new(DVec3::new(0.0, 0.9, 5.0), DVec3::NEG_Z).unwrap();
    // rotated 45 degrees in-plane, the square's corner reaches y = sqrt(2)
    let hit = intersect_plane(&ray, &pose.resolved_matrix()).unwrap();
    assert!(hit.world_pos.abs_diff_eq(DVec3::new(0.0, 0.9, -3.0), 1e-9));
    assert!((hit.distance - 8.0).abs() < 1e-9);

    let outside = Ray::new(DVec3::new(0.0, 1.5, 5.0), DVec3::NEG_Z).unwrap();
    assert!(intersect_plane(&outside, &pose.resolved_matrix()).is_none());
}

#[test]
fn test_parallel_and_behind_rays_miss() {
    let matrix = DMat4::IDENTITY;
    let parallel = Ray::new(DVec3::new(-5.0, 0.0, 0.0), DVec3::X).unwrap();
    assert!(intersect_plane(&parallel, &matrix).is_none());
    let behind = Ray::new(DVec3::new(0.0, 0.0, 5.0), DVec3::Z).unwrap();
    assert!(intersect_plane(&behind, &matrix).is_none());
}

#[test]
fn test_degenerate_matrix_misses() {
    let flat = DMat4::from_scale(DVec3::new(1.0, 0.0, 1.0));
    let ray = Ray::new(DVec3::new(0.0, 0.0, 5.0), DVec3::NEG_Z).unwrap();
    assert!(intersect_plane(&ray, &flat).is_none());
}

#[test]
fn test_index_query_point() {
    let mut index = PickIndex::new();
    let pose = Pose::new(ComposedPose::default().with_size(2.0).into()).unwrap();
    index.insert("p", &pose.world_corners());
    assert_eq!(index.query_point(DVec3::new(0.5, -0.5, 0.0)), vec!["p".to_string()]);
    assert!(index.query_point(DVec3::new(0.5, -0.5, 1.0)).is_empty());
}
