//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "intent-guardian";
const ENV_PREFIX: &str = "INTENT_GUARDIAN_";
const PROJECT_FILES: &[&str] = &["guardian.toml", ".guardian.toml"];

/// Where a configuration layer comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSourceKind {
    Explicit,
    Environment,
    Project,
    Global,
    Default,
}

impl ConfigSourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigSourceKind::Explicit => "Explicit",
            ConfigSourceKind::Environment => "Env",
            ConfigSourceKind::Project => "Project",
            ConfigSourceKind::Global => "Global",
            ConfigSourceKind::Default => "Default",
        }
    }
}

/// One configuration layer and whether it is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    pub kind: ConfigSourceKind,
    /// File path or a description of the source.
    pub location: String,
    pub found: bool,
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. Environment: `INTENT_GUARDIAN_*`, `__` separating sections
    ///    (e.g. `INTENT_GUARDIAN_GUARDIAN__MODE=audit`)
    /// 3. Project root: `./guardian.toml` or `./.guardian.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/intent-guardian/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        let figment = Self::file_layers(
            Self::global_config_path().as_deref(),
            Self::project_config_path().as_deref(),
        )
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

        Self::extract(figment, config_path)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    fn file_layers(global: Option<&Path>, project: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));
        if let Some(path) = global.filter(|p| p.exists()) {
            figment = figment.merge(Toml::file(path));
        }
        if let Some(path) = project {
            figment = figment.merge(Toml::file(path));
        }
        figment
    }

    fn extract(
        mut figment: Figment,
        config_path: Option<&Path>,
    ) -> Result<FileConfig, Box<figment::Error>> {
        if let Some(path) = config_path {
            // Toml::file silently skips missing files; an explicit path must exist.
            if !path.exists() {
                return Err(Box::new(figment::Error::from(format!(
                    "config file not found: {}",
                    path.display()
                ))));
            }
            figment = figment.merge(Toml::file(path));
        }
        figment.extract().map_err(Box::new)
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Describe every configuration layer in priority order.
    pub fn sources(config_path: Option<&Path>) -> Vec<ConfigSource> {
        let mut sources = Vec::new();

        if let Some(path) = config_path {
            sources.push(ConfigSource {
                kind: ConfigSourceKind::Explicit,
                location: path.display().to_string(),
                found: path.exists(),
            });
        }

        let env_vars: Vec<String> = std::env::vars()
            .map(|(key, _)| key)
            .filter(|key| key.starts_with(ENV_PREFIX))
            .collect();
        sources.push(ConfigSource {
            kind: ConfigSourceKind::Environment,
            location: if env_vars.is_empty() {
                format!("{}*", ENV_PREFIX)
            } else {
                env_vars.join(", ")
            },
            found: !env_vars.is_empty(),
        });

        sources.push(match Self::project_config_path() {
            Some(path) => ConfigSource {
                kind: ConfigSourceKind::Project,
                location: path.display().to_string(),
                found: true,
            },
            None => ConfigSource {
                kind: ConfigSourceKind::Project,
                location: PROJECT_FILES
                    .iter()
                    .map(|f| format!("./{}", f))
                    .collect::<Vec<_>>()
                    .join(" or "),
                found: false,
            },
        });

        if let Some(path) = Self::global_config_path() {
            sources.push(ConfigSource {
                kind: ConfigSourceKind::Global,
                location: path.display().to_string(),
                found: path.exists(),
            });
        }

        sources.push(ConfigSource {
            kind: ConfigSourceKind::Default,
            location: "built-in defaults".to_string(),
            found: true,
        });

        sources
    }
}
