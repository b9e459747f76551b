//! Configuration for the uetools commands.
//!
//! Settings come from an optional JSON file and are then overridden by
//! `UETOOLS_*` environment variables. Every field is optional: an absent
//! engine only matters to commands that launch the editor, and an absent
//! registry URL falls back to [`DEFAULT_API_URL`].

mod builder;

use crate::environment::Environment;
use crate::error::{CoreError, CoreResult};
use crate::project::{EngineToolchain, ProjectFolder};

use log::debug;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub use builder::CoreConfigBuilder;

/// Registry API root used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "https://gitlab.com/api/v4/";

/// Explicit path of the configuration file.
pub const CONFIG_PATH_VAR: &str = "UETOOLS_CONFIG";
pub const ENGINE_PATH_VAR: &str = "UETOOLS_ENGINE_PATH";
pub const PROJECT_FOLDER_VAR: &str = "UETOOLS_PROJECT_FOLDER";
pub const REGISTRY_URL_VAR: &str = "UETOOLS_REGISTRY_URL";

/// Resolved configuration shared by every command.
///
/// ```json
/// {
///   "engine_path": "/opt/UnrealEngine",
///   "project_folder": "/home/me/Projects",
///   "registry_url": "https://gitlab.example.com/api/v4/"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoreConfig {
    /// Root of the engine installation.
    pub engine_path: Option<PathBuf>,

    /// Folder holding one sub-folder per project.
    pub project_folder: Option<PathBuf>,

    /// Registry API root used when `CI_API_V4_URL` is not set.
    pub registry_url: Option<String>,
}

impl CoreConfig {
    /// Loads the configuration file (if any) and applies environment
    /// overrides.
    pub fn load(env: &dyn Environment) -> CoreResult<Self> {
        let mut config = match config_path(env) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(env);
        Ok(config)
    }

    /// Reads a JSON configuration file. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> CoreResult<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No configuration file at {}", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(CoreError::Config(format!(
                    "cannot read {}: {}",
                    path.display(),
                    e
                )));
            }
        };
        debug!("Loading configuration from {}", path.display());
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// `UETOOLS_ENGINE_PATH`, `UETOOLS_PROJECT_FOLDER` and
    /// `UETOOLS_REGISTRY_URL` replace the corresponding fields.
    pub fn apply_env_overrides(&mut self, env: &dyn Environment) {
        if let Some(engine) = env.var(ENGINE_PATH_VAR) {
            self.engine_path = Some(PathBuf::from(engine));
        }
        if let Some(folder) = env.var(PROJECT_FOLDER_VAR) {
            self.project_folder = Some(PathBuf::from(folder));
        }
        if let Some(url) = env.var(REGISTRY_URL_VAR) {
            self.registry_url = Some(url);
        }
    }

    pub fn registry_url(&self) -> &str {
        self.registry_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    pub fn toolchain(&self) -> EngineToolchain {
        EngineToolchain::new(self.engine_path.clone())
    }

    pub fn project_locator(&self, working_dir: impl Into<PathBuf>) -> ProjectFolder {
        ProjectFolder::new(self.project_folder.clone(), working_dir)
    }
}

/// Location of the configuration file, if one can be determined.
pub fn config_path(env: &dyn Environment) -> Option<PathBuf> {
    if let Some(explicit) = env.var(CONFIG_PATH_VAR) {
        return Some(PathBuf::from(explicit));
    }
    let base = env
        .var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| env.var("HOME").map(|home| Path::new(&home).join(".config")))?;
    Some(base.join("uetools").join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::MapEnvironment;

    #[test]
    fn config_path_lookup_order() {
        let env = MapEnvironment::new()
            .with_var("HOME", "/home/dev")
            .with_var("XDG_CONFIG_HOME", "/xdg");
        assert_eq!(
            config_path(&env),
            Some(PathBuf::from("/xdg/uetools/config.json"))
        );

        let env = MapEnvironment::new().with_var("HOME", "/home/dev");
        assert_eq!(
            config_path(&env),
            Some(PathBuf::from("/home/dev/.config/uetools/config.json"))
        );

        let env = env.with_var(CONFIG_PATH_VAR, "/etc/uetools.json");
        assert_eq!(config_path(&env), Some(PathBuf::from("/etc/uetools.json")));
        assert_eq!(config_path(&MapEnvironment::new()), None);
    }

    #[test]
    fn file_values_are_overridden_by_environment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"engine_path": "/opt/UE_5.2", "registry_url": "https://gitlab.example.com/api/v4"}"#,
        )
        .unwrap();

        let env = MapEnvironment::new()
            .with_var(CONFIG_PATH_VAR, path.to_string_lossy())
            .with_var(ENGINE_PATH_VAR, "/opt/UE_5.3");
        let config = CoreConfig::load(&env).unwrap();
        assert_eq!(config.engine_path, Some(PathBuf::from("/opt/UE_5.3")));
        assert_eq!(config.registry_url(), "https://gitlab.example.com/api/v4");
        assert_eq!(config.project_folder, None);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CoreConfig::from_file(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.registry_url(), DEFAULT_API_URL);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        assert!(matches!(
            CoreConfig::from_json("{ engine_path: "),
            Err(CoreError::ConfigParse(_))
        ));
        assert!(matches!(
            CoreConfig::from_json(r#"{"engine": "/typo"}"#),
            Err(CoreError::ConfigParse(_))
        ));
    }
}
