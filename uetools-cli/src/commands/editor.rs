//! `editor`: open a project in the editor.

use super::shared::{EditorLauncher, dry_field, project_field};
use uetools_core::CoreResult;
use uetools_core::args::{ArgumentSchema, Arguments, FieldSpec};
use uetools_core::command::Command;
use uetools_core::process::ProcessSpawner;

pub struct EditorCommand<S> {
    launcher: EditorLauncher<S>,
}

impl<S: ProcessSpawner + Clone> EditorCommand<S> {
    pub fn new(launcher: EditorLauncher<S>) -> Self {
        Self { launcher }
    }
}

impl<S: ProcessSpawner + Clone> Command for EditorCommand<S> {
    fn name(&self) -> &'static str {
        "editor"
    }

    fn about(&self) -> &'static str {
        "Open a project in the editor"
    }

    fn schema(&self) -> ArgumentSchema {
        ArgumentSchema::new()
            .field(project_field())
            .field(FieldSpec::string("map").help("Map to open on start-up"))
            .field(dry_field())
    }

    fn execute(&self, args: &Arguments) -> CoreResult<i32> {
        let mut invocation = self.launcher.editor_invocation(args)?;
        if let Some(map) = args.opt_str("map") {
            invocation = invocation.arg(map);
        }
        let invocation = invocation.arg("-FullStdOutLogOutput");
        self.launcher.launch(&invocation, args)
    }
}
