//! Image plane component - a plane-shaped object carrying a bitmap.
//!
//! The plane's pose sizes itself to its image: once dimensions are known the
//! longest edge stays at `size` and the other edge follows the image aspect.

use crate::assets::{self, ContentDimensions};
use crate::constants::DEFAULT_OPACITY;
use crate::error::{SceneError, SceneResult};
use crate::pose::{Pose, PoseConfig};
use image::DynamicImage;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where the plane's image comes from
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ImageSource {
    #[default]
    None,
    /// File path, probed for dimensions when set
    Path(PathBuf),
    /// In-memory image supplied by the host
    Image(ContentDimensions),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImagePlane {
    id: String,
    pose: Pose,
    visible: bool,
    grid_visible: bool,
    collidable: bool,
    clippable: bool,
    pickable: bool,
    opacity: f32,
    source: ImageSource,
}

impl ImagePlane {
    pub fn new(id: impl Into<String>, config: PoseConfig) -> SceneResult<Self> {
        Ok(Self {
            id: id.into(),
            pose: Pose::new(config)?,
            visible: true,
            grid_visible: false,
            collidable: true,
            clippable: true,
            pickable: true,
            opacity: DEFAULT_OPACITY,
            source: ImageSource::None,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn pose_mut(&mut self) -> &mut Pose {
        &mut self.pose
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// The grid flag as set; see `is_grid_shown` for effective visibility.
    pub fn grid_visible(&self) -> bool {
        self.grid_visible
    }

    pub fn set_grid_visible(&mut self, visible: bool) {
        self.grid_visible = visible;
    }

    /// Grid is only drawn while the plane itself is visible.
    pub fn is_grid_shown(&self) -> bool {
        self.visible && self.grid_visible
    }

    /// Included in scene boundary calculations
    pub fn collidable(&self) -> bool {
        self.collidable
    }

    pub fn set_collidable(&mut self, collidable: bool) {
        self.collidable = collidable;
    }

    pub fn clippable(&self) -> bool {
        self.clippable
    }

    pub fn set_clippable(&mut self, clippable: bool) {
        self.clippable = clippable;
    }

    pub fn pickable(&self) -> bool {
        self.pickable
    }

    pub fn set_pickable(&mut self, pickable: bool) {
        self.pickable = pickable;
    }

    /// Whether a pick ray may hit this plane right now.
    pub fn is_pickable_now(&self) -> bool {
        self.visible && self.pickable
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Opacity factor in `[0, 1]`, multiplied into rendered fragment alpha.
    pub fn set_opacity(&mut self, opacity: f32) -> SceneResult<()> {
        if !(0.0..=1.0).contains(&opacity) {
            return Err(SceneError::invalid(
                "opacity",
                format!("must be within [0, 1], got {opacity}"),
            ));
        }
        self.opacity = opacity;
        Ok(())
    }

    pub fn source(&self) -> &ImageSource {
        &self.source
    }

    /// Image file path, if the image is sourced from one.
    pub fn src(&self) -> Option<&Path> {
        match &self.source {
            ImageSource::Path(path) => Some(path),
            _ => None,
        }
    }

    /// Source the image from a PNG or JPEG file. Replaces any in-memory image.
    pub fn set_src(&mut self, path: impl Into<PathBuf>) -> SceneResult<()> {
        let path = path.into();
        let dims = assets::probe_image(&path)?;
        self.attach_content(dims)?;
        debug!(id = %self.id, path = %path.display(), ?dims, "Image source set");
        self.source = ImageSource::Path(path);
        Ok(())
    }

    /// Source the image from decoded pixels. Clears `src`.
    pub fn set_image(&mut self, image: &DynamicImage) -> SceneResult<()> {
        let dims = ContentDimensions::from(image);
        self.attach_content(dims)?;
        self.source = ImageSource::Image(dims);
        Ok(())
    }

    /// A loader finished with known dimensions; resize the pose to match.
    pub fn attach_content(&mut self, dims: ContentDimensions) -> SceneResult<()> {
        self.pose.set_content_dimensions(dims.width, dims.height)
    }
}
