//! Scene context.
//!
//! A `Scene` owns exactly one `InputMediator`, the image planes keyed by ID,
//! the pick index over their world bounds and the active settings. Planes are
//! only mutated through `update_image_plane` so the pick index never goes
//! stale.

use crate::error::{SceneError, SceneResult};
use crate::image_plane::ImagePlane;
use crate::input::{CanvasPoint, InputMediator};
use crate::perf::measure_and_log;
use crate::picking::{PickIndex, Ray, intersect_plane};
use crate::pose::{ComposedPose, PoseConfig};
use crate::profile_function;
use crate::settings::Settings;
use crate::settings_watcher::{SettingsEvent, SettingsWatcher};
use glam::{DMat4, DVec2, DVec3, Vec2};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Settings reloads slower than this are logged
const RELOAD_WARN_MS: f64 = 50.0;

/// Result of a successful pick
#[derive(Debug, Clone, PartialEq)]
pub struct PickHit {
    pub id: String,
    pub world_pos: DVec3,
    pub distance: f64,
    pub uv: DVec2,
}

pub struct Scene {
    input: InputMediator,
    planes: HashMap<String, ImagePlane>,
    picks: PickIndex,
    settings: Settings,
    settings_path: Option<PathBuf>,
    settings_watcher: Option<SettingsWatcher>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Scene {
    pub fn new(settings: Settings) -> Self {
        Self {
            input: InputMediator::with_settings(&settings.input),
            planes: HashMap::new(),
            picks: PickIndex::new(),
            settings,
            settings_path: None,
            settings_watcher: None,
        }
    }

    /// Load settings from `path` and watch it for changes.
    ///
    /// A watcher that fails to start is logged and the scene runs without
    /// hot reload.
    pub fn with_settings_file(path: impl Into<PathBuf>) -> SceneResult<Self> {
        let path = path.into();
        let settings = Settings::load_from(&path)?;
        let mut scene = Self::new(settings);
        scene.settings_watcher = match SettingsWatcher::new(path.clone()) {
            Ok(watcher) => Some(watcher),
            Err(e) => {
                warn!(path = %path.display(), "Settings hot reload unavailable: {}", e);
                None
            }
        };
        scene.settings_path = Some(path);
        Ok(scene)
    }

    pub fn input(&self) -> &InputMediator {
        &self.input
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_path(&self) -> Option<&Path> {
        self.settings_path.as_deref()
    }

    /// Replace the active settings. Input tolerances apply immediately; the
    /// mediator's enable flags are runtime state and are left alone.
    pub fn apply_settings(&mut self, settings: Settings) -> SceneResult<()> {
        settings.validate()?;
        self.input.apply_settings(&settings.input);
        self.settings = settings;
        Ok(())
    }

    /// Poll the settings watcher and reload on change.
    ///
    /// Returns true when new settings were applied.
    pub fn check_settings_reload(&mut self) -> bool {
        let Some(watcher) = self.settings_watcher.as_mut() else {
            return false;
        };
        let Some(event) = watcher.poll() else {
            return false;
        };

        match event {
            SettingsEvent::Modified | SettingsEvent::Created => {
                info!("Settings file changed, reloading...");
                let path = watcher.path().to_path_buf();
                let loaded =
                    measure_and_log("settings_reload", RELOAD_WARN_MS, || Settings::load_from(&path));
                match loaded.and_then(|settings| self.apply_settings(settings)) {
                    Ok(()) => true,
                    Err(e) => {
                        warn!(path = %path.display(), "Keeping previous settings: {}", e);
                        false
                    }
                }
            }
            SettingsEvent::Deleted => {
                warn!("Settings file deleted");
                false
            }
            SettingsEvent::Error(e) => {
                error!("Settings watch error: {}", e);
                false
            }
        }
    }

    /// Composed pose at the origin facing -Z with the configured default size.
    pub fn default_plane_config(&self) -> PoseConfig {
        ComposedPose::default()
            .with_size(self.settings.planes.size)
            .into()
    }

    /// Create a plane. An ID is generated when none is given.
    pub fn create_image_plane(&mut self, id: Option<&str>, config: PoseConfig) -> SceneResult<String> {
        let id = match id {
            Some(id) if self.planes.contains_key(id) => {
                return Err(SceneError::DuplicateId(id.to_string()));
            }
            Some(id) => id.to_string(),
            None => Uuid::new_v4().to_string(),
        };

        let plane = ImagePlane::new(id.clone(), config)?;
        self.picks.insert(&id, &plane.pose().world_corners());
        self.planes.insert(id.clone(), plane);
        debug!(%id, "Image plane created");
        Ok(id)
    }

    pub fn image_plane(&self, id: &str) -> Option<&ImagePlane> {
        self.planes.get(id)
    }

    /// Mutate a plane in place and refresh its pick bounds.
    ///
    /// The plane is re-indexed even when `f` fails, since a failing setter
    /// leaves the plane unchanged but earlier setters in `f` may have run.
    pub fn update_image_plane<F>(&mut self, id: &str, f: F) -> SceneResult<()>
    where
        F: FnOnce(&mut ImagePlane) -> SceneResult<()>,
    {
        let plane = self
            .planes
            .get_mut(id)
            .ok_or_else(|| SceneError::UnknownId(id.to_string()))?;
        let result = f(plane);
        self.picks.insert(id, &plane.pose().world_corners());
        result
    }

    pub fn destroy_image_plane(&mut self, id: &str) -> bool {
        self.picks.remove(id);
        let removed = self.planes.remove(id).is_some();
        if removed {
            debug!(%id, "Image plane destroyed");
        }
        removed
    }

    pub fn clear(&mut self) {
        self.planes.clear();
        self.picks.clear();
    }

    pub fn plane_ids(&self) -> impl Iterator<Item = &str> {
        self.planes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.planes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planes.is_empty()
    }

    /// World bounds of all collidable planes as (min, max).
    pub fn aabb(&self) -> Option<(DVec3, DVec3)> {
        self.planes
            .values()
            .filter(|p| p.collidable())
            .flat_map(|p| p.pose().world_corners())
            .fold(None, |acc, c| match acc {
                None => Some((c, c)),
                Some((min, max)) => Some((min.min(c), max.max(c))),
            })
    }

    /// Nearest visible, pickable plane along the ray.
    pub fn pick(&self, ray: &Ray) -> Option<PickHit> {
        profile_function!();

        self.picks
            .query_ray(ray)
            .into_iter()
            .filter_map(|id| {
                let plane = self.planes.get(&id)?;
                if !plane.is_pickable_now() {
                    return None;
                }
                let hit = intersect_plane(ray, &plane.pose().resolved_matrix())?;
                Some(PickHit {
                    id,
                    world_pos: hit.world_pos,
                    distance: hit.distance,
                    uv: hit.uv,
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    /// Pick through a canvas-local point with the host's camera matrices.
    pub fn pick_canvas(
        &self,
        point: CanvasPoint,
        canvas_size: Vec2,
        view: DMat4,
        projection: DMat4,
    ) -> Option<PickHit> {
        let ray = Ray::from_canvas(point, canvas_size, view, projection)?;
        self.pick(&ray)
    }
}
