//! Unit tests for asset probing.

use crate::helpers::write_png;
use tempfile::tempdir;
use viewer_core::assets::{ContentDimensions, probe_image};

#[test]
fn test_probe_png_dimensions() {
    let dir = tempdir().unwrap();
    let path = write_png(dir.path(), "fixture.png", 400, 300);
    let dims = probe_image(&path).unwrap();
    assert_eq!(dims, ContentDimensions::new(400, 300));
    assert!((dims.aspect().unwrap() - 4.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_probe_jpeg_dimensions() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fixture.jpg");
    image::RgbImage::new(64, 128).save(&path).unwrap();
    assert_eq!(probe_image(&path).unwrap(), ContentDimensions::new(64, 128));
}

#[test]
fn test_probe_corrupt_file_errors() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"definitely not a png").unwrap();
    assert!(probe_image(&path).is_err());
}
