// ============================================================================
// uetools-cli/src/commands/publish.rs
// ============================================================================
//
// PUBLISH COMMAND: Upload a Packaged Build to the Generic Package Registry
//
// Derives the registry target from the bound arguments and streams the
// artifact in chunks with a progress bar.
//
// DERIVATION:
// - package name    = project name (stem of the resolved .uproject)
// - package version = <platform>-<commit_short>
// - file name       = <project>-<commit_tag>.<extension of the artifact>
//
// Most arguments default to the variables a CI pipeline exports
// (CI_API_V4_URL, CI_PROJECT_ID, CI_COMMIT_TAG, CI_COMMIT_SHORT_SHA,
// CI_JOB_TOKEN).
//
// AI-ASSISTANT-INFO: publish command, chunked upload of build artifacts

use std::path::Path;
use std::rc::Rc;

use log::info;
use uetools_core::args::{ArgumentSchema, Arguments, FieldSpec};
use uetools_core::command::Command;
use uetools_core::error::binding_error;
use uetools_core::project::{
    BUILD_PLATFORMS, ProjectLocator, deduce_project, guess_platform, project_name,
};
use uetools_core::upload::{
    ChunkedFile, Credential, HttpTransport, ProgressSink, RegistryTarget, ReqwestTransport,
    upload_package,
};
use uetools_core::CoreResult;

use crate::progress::BarProgress;

/// Default upload chunk size in bytes.
pub const DEFAULT_PUBLISH_CHUNK: i64 = 8 * 1024;

/// Environment variable holding a CI job token.
pub const JOB_TOKEN_VAR: &str = "CI_JOB_TOKEN";

type TransportFactory<T> = Box<dyn Fn() -> CoreResult<T>>;

/// Publishes a package to the registry.
pub struct PublishCommand<T> {
    projects: Rc<dyn ProjectLocator>,
    registry_url: String,
    job_token_present: bool,
    progress: bool,
    transport: TransportFactory<T>,
}

impl PublishCommand<ReqwestTransport> {
    /// `registry_url` is the API root used when `CI_API_V4_URL` is unset.
    /// `job_token_present` selects the `JOB-TOKEN` header over a bearer
    /// token.
    pub fn new(
        projects: Rc<dyn ProjectLocator>,
        registry_url: impl Into<String>,
        job_token_present: bool,
        progress: bool,
    ) -> Self {
        Self {
            projects,
            registry_url: registry_url.into(),
            job_token_present,
            progress,
            transport: Box::new(ReqwestTransport::new),
        }
    }
}

impl<T: HttpTransport> PublishCommand<T> {
    /// Replaces the HTTP client, e.g. with a recording double.
    pub fn with_transport<U>(self, transport: U) -> PublishCommand<U>
    where
        U: HttpTransport + Clone + 'static,
    {
        PublishCommand {
            projects: self.projects,
            registry_url: self.registry_url,
            job_token_present: self.job_token_present,
            progress: self.progress,
            transport: Box::new(move || Ok(transport.clone())),
        }
    }

    /// Builds the registry target from bound arguments.
    pub fn target(&self, args: &Arguments) -> CoreResult<RegistryTarget> {
        let project_path = self.projects.find_project(args.str("project")?)?;
        let project = project_name(&project_path).ok_or_else(|| {
            binding_error(format!(
                "cannot derive a project name from '{}'",
                project_path.display()
            ))
        })?;

        let source = args.str("filename")?;
        let extension = Path::new(source)
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .filter(|ext| !ext.is_empty())
            .ok_or_else(|| binding_error(format!("'{}' has no file extension", source)))?;

        Ok(RegistryTarget {
            api_url: args.str("api_url")?.to_string(),
            project_id: args.str("project_id")?.to_string(),
            package_name: project.clone(),
            package_version: format!("{}-{}", args.str("platform")?, args.str("commit_short")?),
            filename: format!("{}-{}.{}", project, args.str("commit_tag")?, extension),
            credential: Credential::select(args.str("token")?, self.job_token_present),
        })
    }

    fn chunk_size(args: &Arguments) -> CoreResult<usize> {
        let chunk = args.int("chunk")?;
        usize::try_from(chunk)
            .ok()
            .filter(|size| *size > 0)
            .ok_or_else(|| binding_error(format!("chunk must be a positive byte count, got {}", chunk)))
    }
}

impl<T: HttpTransport> Command for PublishCommand<T> {
    fn name(&self) -> &'static str {
        "publish"
    }

    fn about(&self) -> &'static str {
        "Publish a package to the registry"
    }

    fn schema(&self) -> ArgumentSchema {
        ArgumentSchema::new()
            .field(
                FieldSpec::string("filename")
                    .positional()
                    .required()
                    .help("Packaged build to upload"),
            )
            .field(
                FieldSpec::string("project")
                    .computed(deduce_project)
                    .required()
                    .help("Project the package belongs to (defaults to the .uproject in the working directory)"),
            )
            .field(
                FieldSpec::choice("platform", BUILD_PLATFORMS)
                    .default(guess_platform())
                    .help("Platform the package was built for"),
            )
            .field(
                FieldSpec::int("chunk")
                    .default(DEFAULT_PUBLISH_CHUNK)
                    .help("Upload chunk size in bytes"),
            )
            .field(
                FieldSpec::string("api_url")
                    .env_or("CI_API_V4_URL", self.registry_url.clone())
                    .help("Registry API root"),
            )
            .field(
                FieldSpec::string("project_id")
                    .env("CI_PROJECT_ID")
                    .required()
                    .help("Registry project identifier"),
            )
            .field(
                FieldSpec::string("commit_tag")
                    .env_or("CI_COMMIT_TAG", "v0.0.0")
                    .help("Release tag used in the uploaded file name"),
            )
            .field(
                FieldSpec::string("commit_short")
                    .env("CI_COMMIT_SHORT_SHA")
                    .required()
                    .help("Short commit hash used in the package version"),
            )
            .field(
                FieldSpec::string("token")
                    .env(JOB_TOKEN_VAR)
                    .required()
                    .help("Registry token (a job token when CI_JOB_TOKEN is set)"),
            )
            .field(
                FieldSpec::flag("dry").help("Print the upload URL without transferring anything"),
            )
    }

    fn execute(&self, args: &Arguments) -> CoreResult<i32> {
        let chunk_size = Self::chunk_size(args)?;
        let target = self.target(args)?;
        let url = target.url();
        println!("URL: {}", url);

        if args.flag("dry") {
            info!("Dry run, not uploading to {}", url);
            return Ok(0);
        }

        let mut source = ChunkedFile::open(args.str("filename")?, chunk_size)?;
        if self.progress {
            let bar: Box<dyn ProgressSink + Send> =
                Box::new(BarProgress::new(source.total_size(), &target.filename));
            source = source.with_progress(bar);
        }

        let transport = (self.transport)()?;
        upload_package(&transport, source, &target)?;
        Ok(0)
    }
}
