//! Library-wide constants.
//!
//! Centralizes policy defaults so that click detection and pose defaults
//! are documented in one place. Every input policy value here is only a
//! default; `settings::InputSettings` overrides it at runtime.

use glam::DVec3;

// ============================================================================
// Click Detection Policy
// ============================================================================

/// Maximum pointer travel (canvas pixels) between press and release for the
/// pair to still count as a click. Sub-pixel jitter stays well inside this.
pub const DEFAULT_CLICK_TOLERANCE_PX: f32 = 4.0;

/// Maximum time between press and release for a click, in milliseconds
pub const DEFAULT_CLICK_TIMEOUT_MS: u64 = 500;

/// Maximum time between two clicks for a double-click, in milliseconds
pub const DEFAULT_DBLCLICK_WINDOW_MS: u64 = 400;

// ============================================================================
// Pose Defaults
// ============================================================================

/// Default world-space length of a plane's longest edge
pub const DEFAULT_PLANE_SIZE: f64 = 1.0;

/// Forward axis of an unrotated plane
pub const FORWARD_AXIS: DVec3 = DVec3::NEG_Z;

// ============================================================================
// Component Defaults
// ============================================================================

/// Default opacity factor for image planes
pub const DEFAULT_OPACITY: f32 = 1.0;

// ============================================================================
// Settings
// ============================================================================

/// Directory name under the platform config dir
pub const SETTINGS_DIR_NAME: &str = "viewer-core";

/// Settings file name
pub const SETTINGS_FILE_NAME: &str = "settings.json";
