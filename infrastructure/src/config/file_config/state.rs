//! Persisted state configuration from TOML (`[state]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStateConfig {
    /// Override for the state document location
    pub path: Option<PathBuf>,
}

impl FileStateConfig {
    /// Configured path, or `<data dir>/chainrun/state.toml`.
    pub fn resolve_path(&self) -> Option<PathBuf> {
        self.path
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join("chainrun").join("state.toml")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_wins() {
        let config = FileStateConfig {
            path: Some(PathBuf::from("/srv/state.toml")),
        };
        assert_eq!(config.resolve_path(), Some(PathBuf::from("/srv/state.toml")));
    }
}
