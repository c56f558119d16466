//! Settings file watcher for hot reload.
//!
//! Watches the settings file's directory (so deletion and re-creation are
//! seen) and reports changes to the settings file itself through `poll()`.

use crate::error::SceneResult;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, TryRecvError, channel};

pub use crate::settings::default_settings_path;

/// Change observed on the settings file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsEvent {
    Modified,
    Created,
    Deleted,
    Error(String),
}

pub struct SettingsWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    path: PathBuf,
}

impl SettingsWatcher {
    pub fn new(path: PathBuf) -> SceneResult<Self> {
        let (tx, rx) = channel::<notify::Result<Event>>();
        let mut watcher = notify::recommended_watcher(tx)?;

        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        watcher.watch(dir, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            rx,
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the next relevant change, if any, without blocking.
    pub fn poll(&mut self) -> Option<SettingsEvent> {
        loop {
            let result = match self.rx.try_recv() {
                Ok(result) => result,
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Disconnected) => {
                    return Some(SettingsEvent::Error("watcher disconnected".to_string()));
                }
            };

            let event = match result {
                Ok(event) => event,
                Err(e) => return Some(SettingsEvent::Error(e.to_string())),
            };

            if !self.concerns_settings_file(&event) {
                continue;
            }

            match event.kind {
                EventKind::Create(_) => return Some(SettingsEvent::Created),
                EventKind::Modify(_) => return Some(SettingsEvent::Modified),
                EventKind::Remove(_) => return Some(SettingsEvent::Deleted),
                _ => continue,
            }
        }
    }

    // Watched paths may come back canonicalized, so compare file names.
    fn concerns_settings_file(&self, event: &Event) -> bool {
        let name = self.path.file_name();
        event.paths.iter().any(|p| p.file_name() == name)
    }
}
