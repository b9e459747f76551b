// ============================================================================
// uetools-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for CoreConfig
//
// Fluent construction of a `CoreConfig` for embedders and tests that do
// not want to go through a configuration file.
//
// AI-ASSISTANT-INFO: Builder pattern implementation for CoreConfig

use std::path::PathBuf;

use super::CoreConfig;

/// Builder for creating CoreConfig instances.
///
/// # Examples
///
/// ```rust
/// use uetools_core::config::CoreConfigBuilder;
///
/// let config = CoreConfigBuilder::new()
///     .engine_path("/opt/UnrealEngine")
///     .project_folder("/home/me/Projects")
///     .registry_url("https://gitlab.example.com/api/v4/")
///     .build();
/// assert_eq!(config.registry_url(), "https://gitlab.example.com/api/v4/");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CoreConfigBuilder {
    config: CoreConfig,
}

impl CoreConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root of the engine installation.
    pub fn engine_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.engine_path = Some(path.into());
        self
    }

    /// Sets the folder searched for `<name>/<name>.uproject`.
    pub fn project_folder(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.project_folder = Some(path.into());
        self
    }

    pub fn registry_url(mut self, url: impl Into<String>) -> Self {
        self.config.registry_url = Some(url.into());
        self
    }

    pub fn build(self) -> CoreConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_fields_stay_empty() {
        let config = CoreConfigBuilder::new().engine_path("/opt/UE").build();
        assert_eq!(config.engine_path, Some(PathBuf::from("/opt/UE")));
        assert_eq!(config.project_folder, None);
        assert_eq!(config.registry_url, None);
    }
}
