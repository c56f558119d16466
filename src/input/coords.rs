//! Coordinate conversion utilities for pointer events.
//!
//! Centralizes the device <-> canvas formula so every raw event handler
//! normalizes positions the same way.

use glam::Vec2;

/// Context needed for coordinate conversions
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CoordinateContext {
    /// Top-left corner of the canvas in device coordinates, in the current layout
    pub canvas_origin: Vec2,
}

impl CoordinateContext {
    #[inline]
    pub fn new(canvas_origin: Vec2) -> Self {
        Self { canvas_origin }
    }
}

pub struct CoordinateConverter;

impl CoordinateConverter {
    /// Convert device position to canvas-local position
    #[inline]
    pub fn device_to_canvas(device_pos: Vec2, ctx: &CoordinateContext) -> Vec2 {
        device_pos - ctx.canvas_origin
    }

    /// Convert canvas-local position to device position
    #[inline]
    pub fn canvas_to_device(canvas_pos: Vec2, ctx: &CoordinateContext) -> Vec2 {
        canvas_pos + ctx.canvas_origin
    }

    /// Convert canvas-local position to normalized device coordinates ([-1, 1], y up)
    #[inline]
    pub fn canvas_to_ndc(canvas_pos: Vec2, canvas_size: Vec2) -> Vec2 {
        Vec2::new(
            (2.0 * canvas_pos.x) / canvas_size.x - 1.0,
            1.0 - (2.0 * canvas_pos.y) / canvas_size.y,
        )
    }
}
