//! Configuration file loading for chainrun
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `CHAINRUN_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./chainrun.toml` or `./.chainrun.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/chainrun/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{FileConfig, FileConsoleConfig, FileInterfaceConfig, FileStateConfig};
pub use loader::{ConfigError, ConfigLoader, ConfigSources};
