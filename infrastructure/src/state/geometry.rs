//! TOML-backed window geometry store
//!
//! The state document looks like:
//!
//! ```toml
//! [tool_geo."Examples::keep-ui-open"]
//! position = [120, 80]
//! size = [640, 480]
//! ```
//!
//! Tables other than `tool_geo` are preserved on write.

use chainrun_application::{GeometryStore, StateStoreError, WindowGeometry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Default, Serialize, Deserialize)]
struct StateDocument {
    #[serde(default)]
    tool_geo: BTreeMap<String, WindowGeometry>,
    #[serde(flatten)]
    other: toml::Table,
}

/// Geometry store persisted as a TOML document.
#[derive(Debug)]
pub struct TomlGeometryStore {
    path: PathBuf,
    document: StateDocument,
    dirty: bool,
}

impl TomlGeometryStore {
    /// Open the document at `path`.
    ///
    /// A missing file gives an empty store. A file that cannot be read or
    /// parsed is logged and treated as empty; it is replaced on the next
    /// flush.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let document = match fs::read_to_string(&path) {
            Ok(text) => match toml::from_str::<StateDocument>(&text) {
                Ok(document) => {
                    debug!(path = %path.display(), entries = document.tool_geo.len(), "Loaded state");
                    document
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Ignoring corrupt state file");
                    StateDocument::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StateDocument::default(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read state file");
                StateDocument::default()
            }
        };

        Self {
            path,
            document,
            dirty: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.document.tool_geo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.document.tool_geo.is_empty()
    }

    fn write_error(&self, reason: impl ToString) -> StateStoreError {
        StateStoreError::Write {
            path: self.path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

impl GeometryStore for TomlGeometryStore {
    fn load(&self, key: &str) -> Option<WindowGeometry> {
        self.document.tool_geo.get(key).copied()
    }

    fn save(&mut self, key: &str, geometry: WindowGeometry) {
        if self.document.tool_geo.get(key) != Some(&geometry) {
            self.document.tool_geo.insert(key.to_string(), geometry);
            self.dirty = true;
        }
    }

    fn flush(&mut self) -> Result<(), StateStoreError> {
        if !self.dirty {
            return Ok(());
        }

        let text = toml::to_string_pretty(&self.document)
            .map_err(|e| StateStoreError::Serialize(e.to_string()))?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
        }

        // Write next to the target, then rename over it.
        let tmp = self.path.with_extension("toml.tmp");
        fs::write(&tmp, text).map_err(|e| self.write_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.write_error(e))?;

        debug!(path = %self.path.display(), "Saved state");
        self.dirty = false;
        Ok(())
    }
}
