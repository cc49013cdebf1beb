//! Editor configuration: defaults, JSON load/save and hot reload.
//!
//! The config file lives at `<config dir>/arrowboard/settings.json`. Missing
//! fields take their defaults, so a file only needs the keys it overrides.

use crate::constants::{
    BOUNDS_SLOP, BRUSH_THRESHOLD, HIT_PADDING, IDLE_STOP_MS, LUT_SAMPLES, MAX_HISTORY_STATES,
    REBUILD_THROTTLE_MS, TEXT_BOX_SIZE, WORKER_TIMEOUT_MS,
};
use crate::error::{ConfigError, ConfigResult};
use crate::hit_test::HitParams;
use crate::logging::DEFAULT_FILTER;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, channel};
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub hit_padding: f64,
    pub bounds_slop: f64,
    pub brush_threshold: f64,
    pub lut_samples: usize,
    pub text_box_size: f64,
    pub max_history: usize,
    pub rebuild_throttle_ms: u64,
    pub idle_stop_ms: u64,
    pub worker_timeout_ms: u64,
    /// Persist the scene to the database after every commit.
    pub autosave: bool,
    /// Override for the scene database location.
    pub database_path: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            hit_padding: HIT_PADDING,
            bounds_slop: BOUNDS_SLOP,
            brush_threshold: BRUSH_THRESHOLD,
            lut_samples: LUT_SAMPLES,
            text_box_size: TEXT_BOX_SIZE,
            max_history: MAX_HISTORY_STATES,
            rebuild_throttle_ms: REBUILD_THROTTLE_MS,
            idle_stop_ms: IDLE_STOP_MS,
            worker_timeout_ms: WORKER_TIMEOUT_MS,
            autosave: true,
            database_path: None,
            log_filter: DEFAULT_FILTER.to_string(),
        }
    }
}

impl EditorConfig {
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let json = fs::read_to_string(path)?;
        let config = serde_json::from_str(&json)?;
        debug!(path = %path.display(), "loaded editor config");
        Ok(config)
    }

    /// Load `path`, falling back to defaults when it is missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "invalid editor config, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn hit_params(&self) -> HitParams {
        HitParams {
            padding: self.hit_padding,
            bounds_slop: self.bounds_slop,
            lut_samples: self.lut_samples,
        }
    }

    pub fn rebuild_throttle(&self) -> Duration {
        Duration::from_millis(self.rebuild_throttle_ms)
    }

    pub fn idle_stop(&self) -> Duration {
        Duration::from_millis(self.idle_stop_ms)
    }

    pub fn worker_timeout(&self) -> Duration {
        Duration::from_millis(self.worker_timeout_ms)
    }
}

/// `<config dir>/arrowboard/settings.json`, if the platform has one.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("arrowboard").join("settings.json"))
}

// ============================================================================
// Hot Reload
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigEvent {
    Modified,
    Created,
    Deleted,
    Error(String),
}

/// Watches the config file's directory and reports changes to the file.
pub struct ConfigWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    path: PathBuf,
}

impl ConfigWatcher {
    pub fn new(path: PathBuf) -> ConfigResult<Self> {
        let (tx, rx) = channel::<notify::Result<Event>>();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let _ = tx.send(res);
        })?;

        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        watcher.watch(dir, RecursiveMode::NonRecursive)?;
        info!(path = %path.display(), "watching editor config");

        Ok(Self {
            _watcher: watcher,
            rx,
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Next relevant change, without blocking.
    pub fn poll(&mut self) -> Option<ConfigEvent> {
        while let Ok(result) = self.rx.try_recv() {
            let event = match result {
                Ok(event) => event,
                Err(e) => return Some(ConfigEvent::Error(e.to_string())),
            };
            if !event.paths.iter().any(|p| self.is_config_file(p)) {
                continue;
            }
            match event.kind {
                EventKind::Create(_) => return Some(ConfigEvent::Created),
                EventKind::Modify(_) => return Some(ConfigEvent::Modified),
                EventKind::Remove(_) => return Some(ConfigEvent::Deleted),
                _ => continue,
            }
        }
        None
    }

    fn is_config_file(&self, candidate: &Path) -> bool {
        candidate == self.path || candidate.file_name() == self.path.file_name()
    }
}
