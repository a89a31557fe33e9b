//! Persisted per-user state

mod geometry;

pub use geometry::TomlGeometryStore;
