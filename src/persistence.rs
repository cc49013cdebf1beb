//! Scene database: one JSON document under a single key, written
//! atomically.

use crate::error::{PersistenceError, PersistenceResult};
use crate::scene::SceneSnapshot;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Storage key; the database file is `<key>.json`.
pub const DATABASE_KEY: &str = "arrowboard_scene";

#[derive(Debug, Clone)]
pub struct SceneDatabase {
    path: PathBuf,
}

impl SceneDatabase {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Database in the platform data directory.
    pub fn open_default() -> PersistenceResult<Self> {
        let dir = dirs::data_dir().ok_or(PersistenceError::NoDataDir)?;
        Ok(Self::at(dir.join("arrowboard").join(format!("{DATABASE_KEY}.json"))))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write serialized scene JSON via a temp file and rename, so readers
    /// never observe a partial document.
    pub fn save_json(&self, json: &str) -> PersistenceResult<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        debug!(path = %self.path.display(), bytes = json.len(), "scene saved");
        Ok(())
    }

    pub fn save(&self, snapshot: &SceneSnapshot) -> PersistenceResult<()> {
        self.save_json(&snapshot.to_json()?)
    }

    /// `Ok(None)` when nothing has been saved yet.
    pub fn load(&self) -> PersistenceResult<Option<SceneSnapshot>> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let snapshot = SceneSnapshot::from_json(&json)?;
        info!(
            boxes = snapshot.boxes.len(),
            arrows = snapshot.arrows.len(),
            "scene loaded"
        );
        Ok(Some(snapshot))
    }

    /// Remove the stored scene. Missing files are not an error.
    pub fn clear(&self) -> PersistenceResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
