// ============================================================================
// uetools-core/src/command/registry.rs
// ============================================================================
//
// COMMAND REGISTRY: Name -> Command Mapping and Dispatch
//
// The registry is populated once at start-up and is read-only afterwards.
// Dispatch is a lookup followed by binding and `execute`; nothing runs for
// an unknown name or a failed binding.
//
// AI-ASSISTANT-INFO: Explicit command registry and dispatcher

use super::Command;
use crate::args::{Binding, bind, build_parser};
use crate::environment::Environment;
use crate::error::{CoreError, CoreResult};

use log::{debug, info};
use std::collections::BTreeMap;
use std::io::Write;

/// Registered commands, keyed by name.
pub struct CommandRegistry {
    program: String,
    commands: BTreeMap<&'static str, Box<dyn Command>>,
}

impl CommandRegistry {
    /// Creates an empty registry. `program` is the binary name used in
    /// generated usage lines.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            commands: BTreeMap::new(),
        }
    }

    /// Adds a command. Names must be unique.
    pub fn register<C: Command + 'static>(&mut self, command: C) -> CoreResult<()> {
        let name = command.name();
        if self.commands.contains_key(name) {
            return Err(CoreError::DuplicateCommand(name.to_string()));
        }
        debug!("Registered command '{}'", name);
        self.commands.insert(name, Box::new(command));
        Ok(())
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&'static str> {
        self.commands.keys().copied().collect()
    }

    /// `(name, about)` pairs for listings.
    pub fn summaries(&self) -> Vec<(&'static str, &'static str)> {
        self.commands
            .values()
            .map(|command| (command.name(), command.about()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Looks up exactly one command by name.
    pub fn resolve(&self, name: &str) -> CoreResult<&dyn Command> {
        self.commands
            .get(name)
            .map(|command| command.as_ref())
            .ok_or_else(|| CoreError::UnknownCommand {
                name: name.to_string(),
                known: self.names().iter().map(|n| n.to_string()).collect(),
            })
    }

    /// Resolves `name`, binds `tokens` and runs the command.
    ///
    /// Help requests are written to `out` and return `Ok(0)`.
    pub fn dispatch<W: Write>(
        &self,
        name: &str,
        tokens: &[String],
        env: &dyn Environment,
        out: &mut W,
    ) -> CoreResult<i32> {
        let command = self.resolve(name)?;
        let schema = command.schema();
        let parser = build_parser(
            &format!("{} {}", self.program, command.name()),
            command.about(),
            &schema,
        );

        match bind(parser, &schema, tokens, env)? {
            Binding::Help(text) => {
                write!(out, "{}", text)?;
                out.flush()?;
                Ok(0)
            }
            Binding::Bound(args) => {
                info!("Running command '{}'", command.name());
                let code = command.execute(&args)?;
                debug!("Command '{}' finished with exit code {}", command.name(), code);
                Ok(code)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::{ArgumentSchema, Arguments, FieldSpec};
    use crate::environment::MapEnvironment;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Recorder {
        name: &'static str,
        calls: Rc<Cell<usize>>,
        exit_code: i32,
    }

    impl Command for Recorder {
        fn name(&self) -> &'static str {
            self.name
        }

        fn about(&self) -> &'static str {
            "Records invocations"
        }

        fn schema(&self) -> ArgumentSchema {
            ArgumentSchema::new().field(FieldSpec::string("target").required())
        }

        fn execute(&self, _args: &Arguments) -> CoreResult<i32> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.exit_code)
        }
    }

    fn registry_with(calls: &Rc<Cell<usize>>, exit_code: i32) -> CommandRegistry {
        let mut registry = CommandRegistry::new("uecli");
        registry
            .register(Recorder {
                name: "client",
                calls: Rc::clone(calls),
                exit_code,
            })
            .unwrap();
        registry
            .register(Recorder {
                name: "publish",
                calls: Rc::clone(calls),
                exit_code,
            })
            .unwrap();
        registry
    }

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn unknown_command_names_attempt_and_known_commands() {
        let calls = Rc::new(Cell::new(0));
        let registry = registry_with(&calls, 0);
        let mut out = Vec::new();

        let err = registry
            .dispatch("bogus", &[], &MapEnvironment::new(), &mut out)
            .unwrap_err();
        assert_eq!(err.exit_code(), 2);
        let message = err.to_string();
        assert!(message.contains("'bogus'"));
        assert!(message.contains("client, publish"));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn exit_code_of_execute_is_returned_unchanged() {
        let calls = Rc::new(Cell::new(0));
        let registry = registry_with(&calls, 7);
        let mut out = Vec::new();

        let code = registry
            .dispatch("client", &tokens(&["--target", "x"]), &MapEnvironment::new(), &mut out)
            .unwrap();
        assert_eq!(code, 7);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn binding_failure_prevents_execute() {
        let calls = Rc::new(Cell::new(0));
        let registry = registry_with(&calls, 0);
        let mut out = Vec::new();

        let err = registry
            .dispatch("client", &[], &MapEnvironment::new(), &mut out)
            .unwrap_err();
        assert!(err.is_usage_error());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn help_is_written_without_executing() {
        let calls = Rc::new(Cell::new(0));
        let registry = registry_with(&calls, 0);
        let mut out = Vec::new();

        let code = registry
            .dispatch("publish", &tokens(&["--help"]), &MapEnvironment::new(), &mut out)
            .unwrap();
        assert_eq!(code, 0);
        assert_eq!(calls.get(), 0);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("uecli publish"));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let calls = Rc::new(Cell::new(0));
        let mut registry = registry_with(&calls, 0);
        let err = registry
            .register(Recorder {
                name: "client",
                calls: Rc::clone(&calls),
                exit_code: 0,
            })
            .unwrap_err();
        assert!(matches!(err, CoreError::DuplicateCommand(name) if name == "client"));
        assert_eq!(registry.names(), vec!["client", "publish"]);
    }
}
