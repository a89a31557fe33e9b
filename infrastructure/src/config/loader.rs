//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use thiserror::Error;

const PROJECT_FILES: [&str; 2] = ["chainrun.toml", ".chainrun.toml"];
const ENV_PREFIX: &str = "CHAINRUN_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error(transparent)]
    Figment(#[from] Box<figment::Error>),
}

/// The file locations a load consults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigSources {
    pub global: Option<PathBuf>,
    pub project: Option<PathBuf>,
    pub explicit: Option<PathBuf>,
}

impl ConfigSources {
    /// Standard locations plus an optional `--config` path.
    pub fn discover(config_path: Option<&Path>) -> Self {
        Self {
            global: ConfigLoader::global_config_path(),
            project: ConfigLoader::project_config_path(),
            explicit: config_path.map(Path::to_path_buf),
        }
    }
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `CHAINRUN_*` environment variables (`CHAINRUN_CONSOLE__LINE_LIMIT`,
    ///    or `CHAINRUN_TITLE` for `interface.title`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./chainrun.toml` or `./.chainrun.toml`
    /// 4. Global: `~/.config/chainrun/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, ConfigError> {
        Self::load_from(&ConfigSources::discover(config_path))
    }

    pub fn load_from(sources: &ConfigSources) -> Result<FileConfig, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global) = &sources.global
            && global.exists()
        {
            figment = figment.merge(Toml::file(global));
        }

        if let Some(project) = &sources.project
            && project.exists()
        {
            figment = figment.merge(Toml::file(project));
        }

        if let Some(path) = &sources.explicit {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.clone()));
            }
            figment = figment.merge(Toml::file(path));
        }

        figment = figment
            .merge(
                Env::prefixed(ENV_PREFIX)
                    .ignore(&["TITLE", "LOG"])
                    .split("__"),
            )
            .merge(
                Env::raw()
                    .only(&["CHAINRUN_TITLE"])
                    .map(|_| "interface.title".into()),
            );

        figment.extract().map_err(|e| ConfigError::Figment(Box::new(e)))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns `$XDG_CONFIG_HOME/chainrun/config.toml` if set,
    /// otherwise falls back to `~/.config/chainrun/config.toml`
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("chainrun").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Describe the config file locations being used (for --show-config)
    pub fn describe_sources(sources: &ConfigSources) -> Vec<String> {
        let mut lines = vec!["Configuration sources (in priority order):".to_string()];

        lines.push(format!("  [ENV  ] Environment: {}*", ENV_PREFIX));

        if let Some(path) = &sources.explicit {
            lines.push(format!("  {} Explicit: {}", marker(path), path.display()));
        }

        match &sources.project {
            Some(path) => lines.push(format!("  {} Project: {}", marker(path), path.display())),
            None => lines.push(format!(
                "  [     ] Project: ./{} or ./{}",
                PROJECT_FILES[0], PROJECT_FILES[1]
            )),
        }

        if let Some(path) = &sources.global {
            lines.push(format!("  {} Global:  {}", marker(path), path.display()));
        }

        lines.push("  [     ] Default: built-in defaults".to_string());
        lines
    }
}

fn marker(path: &Path) -> &'static str {
    if path.exists() { "[FOUND]" } else { "[     ]" }
}
