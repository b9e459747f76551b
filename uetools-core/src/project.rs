// ============================================================================
// uetools-core/src/project.rs
// ============================================================================
//
// PROJECT AND TOOLCHAIN LOCATION
//
// Commands never compute engine or project paths themselves; they ask a
// `ToolchainLocator` for the editor executable and a `ProjectLocator` for
// the `.uproject` file.
//
// KEY COMPONENTS:
// - ToolchainLocator / EngineToolchain: Editor executable inside an engine root
// - ProjectLocator / ProjectFolder: Resolve a project name to a .uproject
// - deduce_project: Computed default from the working directory
// - BUILD_PLATFORMS / guess_platform: Known target platforms
//
// AI-ASSISTANT-INFO: Collaborators that locate the engine and projects

use crate::args::Value;
use crate::environment::Environment;
use crate::error::{CoreError, CoreResult};

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// File extension of Unreal project descriptors.
pub const PROJECT_EXTENSION: &str = "uproject";

/// Platforms a package can be built for.
pub const BUILD_PLATFORMS: &[&str] = &["Win64", "Linux", "Mac"];

/// Build platform matching the host operating system.
pub fn guess_platform() -> &'static str {
    if cfg!(target_os = "windows") {
        "Win64"
    } else if cfg!(target_os = "macos") {
        "Mac"
    } else {
        "Linux"
    }
}

/// Supplies the path of the editor executable.
pub trait ToolchainLocator {
    fn editor(&self) -> CoreResult<PathBuf>;
}

/// Resolves a project name to its `.uproject` file.
pub trait ProjectLocator {
    fn find_project(&self, name: &str) -> CoreResult<PathBuf>;
}

/// An engine installation rooted at `engine_root`.
///
/// The editor lives at `Engine/Binaries/<Platform>/UnrealEditor[.exe]`.
/// Its existence is not checked here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineToolchain {
    engine_root: Option<PathBuf>,
    platform: &'static str,
}

impl EngineToolchain {
    pub fn new(engine_root: Option<PathBuf>) -> Self {
        Self::for_platform(engine_root, guess_platform())
    }

    pub fn for_platform(engine_root: Option<PathBuf>, platform: &'static str) -> Self {
        Self {
            engine_root,
            platform,
        }
    }

    pub fn engine_root(&self) -> Option<&Path> {
        self.engine_root.as_deref()
    }
}

impl ToolchainLocator for EngineToolchain {
    fn editor(&self) -> CoreResult<PathBuf> {
        let root = self.engine_root.as_ref().ok_or_else(|| {
            CoreError::ToolchainNotFound(
                "no engine configured (set UETOOLS_ENGINE_PATH or engine_path in the config file)"
                    .to_string(),
            )
        })?;
        let binary = if self.platform == "Win64" {
            "UnrealEditor.exe"
        } else {
            "UnrealEditor"
        };
        Ok(root
            .join("Engine")
            .join("Binaries")
            .join(self.platform)
            .join(binary))
    }
}

/// Looks projects up in a configured folder and in the working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFolder {
    folder: Option<PathBuf>,
    working_dir: PathBuf,
}

impl ProjectFolder {
    pub fn new(folder: Option<PathBuf>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            folder,
            working_dir: working_dir.into(),
        }
    }
}

impl ProjectLocator for ProjectFolder {
    fn find_project(&self, name: &str) -> CoreResult<PathBuf> {
        let direct = self.working_dir.join(name);
        if has_project_extension(&direct) && direct.is_file() {
            return Ok(direct);
        }

        let file_name = format!("{}.{}", name, PROJECT_EXTENSION);
        let mut candidates = Vec::new();
        if let Some(folder) = &self.folder {
            candidates.push(folder.join(name).join(&file_name));
        }
        candidates.push(self.working_dir.join(&file_name));

        for candidate in &candidates {
            debug!("Looking for project at {}", candidate.display());
            if candidate.is_file() {
                return Ok(candidate.clone());
            }
        }
        Err(CoreError::ProjectNotFound(name.to_string()))
    }
}

fn has_project_extension(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == PROJECT_EXTENSION)
}

/// Name of a project, i.e. the stem of its `.uproject` file.
pub fn project_name(path: &Path) -> Option<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
}

/// Name of the first `.uproject` in `dir`, by file name order.
pub fn deduce_project_in(dir: &Path) -> Option<String> {
    let mut projects: Vec<PathBuf> = fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| has_project_extension(path) && path.is_file())
        .collect();
    projects.sort();
    projects.first().and_then(|path| project_name(path))
}

/// Computed argument default: the project found in the working directory.
pub fn deduce_project(env: &dyn Environment) -> Option<Value> {
    let dir = env.current_dir()?;
    deduce_project_in(&dir).map(Value::Str)
}
