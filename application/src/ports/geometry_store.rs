//! Persisted per-tool window geometry
//!
//! Keys are `"<collection>::<name>"` (see
//! [`ToolDescriptor::geometry_key`](chainrun_domain::ToolDescriptor::geometry_key)).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Position and size of a tool window, in front-end units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowGeometry {
    pub position: (i32, i32),
    pub size: (u32, u32),
}

#[derive(Debug, Error)]
pub enum StateStoreError {
    #[error("Failed to write state file {path}: {reason}")]
    Write { path: String, reason: String },

    #[error("Failed to serialize state: {0}")]
    Serialize(String),
}

pub trait GeometryStore {
    fn load(&self, key: &str) -> Option<WindowGeometry>;

    /// Record geometry in memory; [`flush`](Self::flush) persists it.
    fn save(&mut self, key: &str, geometry: WindowGeometry);

    fn flush(&mut self) -> Result<(), StateStoreError>;
}

/// Store that forgets everything when dropped.
#[derive(Debug, Default, Clone)]
pub struct InMemoryGeometryStore {
    entries: BTreeMap<String, WindowGeometry>,
    flushes: usize,
}

impl InMemoryGeometryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times [`flush`](GeometryStore::flush) was called.
    pub fn flush_count(&self) -> usize {
        self.flushes
    }
}

impl GeometryStore for InMemoryGeometryStore {
    fn load(&self, key: &str) -> Option<WindowGeometry> {
        self.entries.get(key).copied()
    }

    fn save(&mut self, key: &str, geometry: WindowGeometry) {
        self.entries.insert(key.to_string(), geometry);
    }

    fn flush(&mut self) -> Result<(), StateStoreError> {
        self.flushes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_store() {
        let mut store = InMemoryGeometryStore::new();
        assert_eq!(store.load("x::y"), None);

        let geo = WindowGeometry {
            position: (10, -20),
            size: (800, 600),
        };
        store.save("x::y", geo);
        store.flush().unwrap();

        assert_eq!(store.load("x::y"), Some(geo));
        assert_eq!(store.flush_count(), 1);
    }
}
