//! The fully assembled argument vector of one external process.

use std::path::{Path, PathBuf};

/// Program, arguments and working directory of an external process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: PathBuf,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    /// Program followed by its arguments.
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.program.to_string_lossy().into_owned())
            .chain(self.args.iter().cloned())
            .collect()
    }

    /// Shell-quoted command line, for display only.
    pub fn command_line(&self) -> String {
        shell_words::join(self.argv())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_quotes_arguments_with_spaces() {
        let invocation = Invocation::new("/opt/Unreal Engine/UnrealEditor")
            .arg("/projects/RTSGame/RTSGame.uproject")
            .args(["-game", "-FullStdOutLogOutput"]);
        assert_eq!(
            invocation.command_line(),
            "'/opt/Unreal Engine/UnrealEditor' /projects/RTSGame/RTSGame.uproject -game -FullStdOutLogOutput"
        );
        assert_eq!(invocation.argv().len(), 4);
        assert_eq!(invocation.working_dir(), None);
    }
}
