// ============================================================================
// uetools-cli/src/commands/shared.rs
// ============================================================================
//
// SHARED COMMAND PLUMBING: Editor Launch Context and Common Fields
//
// KEY COMPONENTS:
// - CommandOptions: Terminal settings decided by the top-level flags
// - EditorLauncher: Locators, spawner and formatting for editor commands
// - project_field / dry_field: Fields declared by several commands
//
// AI-ASSISTANT-INFO: Helpers shared by the editor-launching commands

use std::path::PathBuf;
use std::rc::Rc;

use uetools_core::CoreResult;
use uetools_core::args::{Arguments, FieldSpec};
use uetools_core::process::{
    Invocation, LineFormatter, ProcessRunner, ProcessSpawner, RunMode, TimestampFormatter,
    UnrealLogFormatter,
};
use uetools_core::project::{ProjectLocator, ToolchainLocator, deduce_project};

/// Output settings shared by every command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommandOptions {
    pub colored: bool,
    pub progress: bool,
    /// Drop `Verbose`/`VeryVerbose` engine log lines.
    pub hide_verbose_logs: bool,
    /// Prefix process output with the local time.
    pub timestamps: bool,
}

/// The positional project argument, deduced from the working directory.
pub fn project_field() -> FieldSpec {
    FieldSpec::string("project")
        .positional()
        .computed(deduce_project)
        .required()
        .help("Name of the project (defaults to the .uproject in the working directory)")
}

pub fn dry_field() -> FieldSpec {
    FieldSpec::flag("dry").help("Print the command it will execute without running it")
}

/// Everything needed to start the editor for a project.
pub struct EditorLauncher<S> {
    toolchain: Rc<dyn ToolchainLocator>,
    projects: Rc<dyn ProjectLocator>,
    spawner: S,
    options: CommandOptions,
}

impl<S: Clone> Clone for EditorLauncher<S> {
    fn clone(&self) -> Self {
        Self {
            toolchain: Rc::clone(&self.toolchain),
            projects: Rc::clone(&self.projects),
            spawner: self.spawner.clone(),
            options: self.options,
        }
    }
}

impl<S: ProcessSpawner + Clone> EditorLauncher<S> {
    pub fn new(
        toolchain: Rc<dyn ToolchainLocator>,
        projects: Rc<dyn ProjectLocator>,
        spawner: S,
        options: CommandOptions,
    ) -> Self {
        Self {
            toolchain,
            projects,
            spawner,
            options,
        }
    }

    /// Resolves the `project` argument to its `.uproject` path.
    pub fn project_path(&self, args: &Arguments) -> CoreResult<PathBuf> {
        self.projects.find_project(args.str("project")?)
    }

    /// `<editor> <project.uproject>`, ready for command specific arguments.
    pub fn editor_invocation(&self, args: &Arguments) -> CoreResult<Invocation> {
        let editor = self.toolchain.editor()?;
        let project = self.project_path(args)?;
        Ok(Invocation::new(editor).arg(project.to_string_lossy()))
    }

    /// Runs the editor with engine log formatting, honouring `dry`.
    pub fn launch(&self, invocation: &Invocation, args: &Arguments) -> CoreResult<i32> {
        let engine_log = UnrealLogFormatter::new(self.options.colored)
            .hide_verbose(self.options.hide_verbose_logs);
        let mut formatter: Box<dyn LineFormatter> = if self.options.timestamps {
            Box::new(TimestampFormatter::new(engine_log))
        } else {
            Box::new(engine_log)
        };
        let mut runner = ProcessRunner::new(self.spawner.clone());
        runner.run(
            invocation,
            formatter.as_mut(),
            RunMode::from_dry_flag(args.flag("dry")),
        )
    }
}
