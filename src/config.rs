use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::logging::DEFAULT_LEVEL;

pub const PROJECT_CONFIG_FILE: &str = "svc-registry.toml";
pub const DEFAULT_REGION: &str = "eu-west-1";

pub const ENV_LOG_LEVEL: &str = "SVC_REGISTRY_LOG_LEVEL";
pub const ENV_REGION: &str = "AWS_REGION";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_level: String,
    pub region: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LEVEL.to_string(),
            region: DEFAULT_REGION.to_string(),
        }
    }
}

/// One configuration layer; unset fields fall through to the layer below.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub log_level: Option<String>,
    pub region: Option<String>,
}

impl ConfigFile {
    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))
    }

    /// `self` over `lower`.
    fn over(self, lower: Self) -> Self {
        Self {
            log_level: self.log_level.or(lower.log_level),
            region: self.region.or(lower.region),
        }
    }
}

/// A resolved configuration and the problems of the layers that were skipped.
///
/// Loading happens before logging is installed, so warnings are returned to
/// the caller instead of being logged here.
#[derive(Debug)]
pub struct Loaded {
    pub config: Config,
    pub warnings: Vec<String>,
}

impl Config {
    /// Loads global, project and environment layers, in increasing priority.
    ///
    /// `project` overrides the default `./svc-registry.toml`.
    pub fn load(project: Option<&Path>) -> Result<Loaded> {
        Self::from_sources(
            Self::global_path().as_deref(),
            project,
            |name| std::env::var(name).ok(),
        )
    }

    pub fn from_sources(
        global: Option<&Path>,
        project: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Loaded> {
        let mut warnings = Vec::new();

        // A broken global file shouldn't stop the tool.
        let global = match global.filter(|p| p.exists()) {
            Some(path) => ConfigFile::read(path).unwrap_or_else(|e| {
                warnings.push(format!("ignoring global config: {e}"));
                ConfigFile::default()
            }),
            None => ConfigFile::default(),
        };

        let project = match project {
            Some(path) => ConfigFile::read(path)?,
            None => {
                let default = Path::new(PROJECT_CONFIG_FILE);
                if default.exists() {
                    ConfigFile::read(default)?
                } else {
                    ConfigFile::default()
                }
            }
        };

        let env = ConfigFile {
            log_level: env(ENV_LOG_LEVEL),
            region: env(ENV_REGION),
        };

        Ok(Loaded {
            config: Self::resolve(env.over(project).over(global)),
            warnings,
        })
    }

    fn resolve(layers: ConfigFile) -> Self {
        let defaults = Self::default();
        Self {
            log_level: layers.log_level.unwrap_or(defaults.log_level),
            region: layers.region.unwrap_or(defaults.region),
        }
    }

    pub fn global_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "svc-registry")
            .map(|d| d.config_dir().join("config.toml"))
    }
}
