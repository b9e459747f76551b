//! `client`: launch the editor as a game client.

use super::shared::{EditorLauncher, dry_field, project_field};
use uetools_core::CoreResult;
use uetools_core::args::{ArgumentSchema, Arguments, FieldSpec};
use uetools_core::command::Command;
use uetools_core::process::ProcessSpawner;

pub const DEFAULT_PORT: i64 = 8123;

/// Launches the game, standalone or connected to a running server.
///
/// ```console
/// uecli client RTSGame
/// uecli client RTSGame --address localhost --port 8123
/// ```
pub struct ClientCommand<S> {
    launcher: EditorLauncher<S>,
}

impl<S: ProcessSpawner + Clone> ClientCommand<S> {
    pub fn new(launcher: EditorLauncher<S>) -> Self {
        Self { launcher }
    }
}

impl<S: ProcessSpawner + Clone> Command for ClientCommand<S> {
    fn name(&self) -> &'static str {
        "client"
    }

    fn about(&self) -> &'static str {
        "Launch the editor as a client, connecting to an already running server"
    }

    fn schema(&self) -> ArgumentSchema {
        ArgumentSchema::new()
            .field(project_field())
            .field(
                FieldSpec::string("address")
                    .help("Address of the server to connect to; standalone when omitted"),
            )
            .field(FieldSpec::int("port").default(DEFAULT_PORT).help("Server port"))
            .field(dry_field())
    }

    fn execute(&self, args: &Arguments) -> CoreResult<i32> {
        let mut invocation = self.launcher.editor_invocation(args)?;
        if let Some(address) = args.opt_str("address") {
            invocation = invocation
                .arg(address)
                .arg(format!("-port={}", args.int("port")?));
        }
        let invocation = invocation.args(["-game", "-FullStdOutLogOutput"]);
        self.launcher.launch(&invocation, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::shared::testing::{launcher, project_dir};
    use uetools_core::command::CommandRegistry;
    use uetools_core::process::mocks::MockSpawner;
    use uetools_core::MapEnvironment;

    fn dispatch(tokens: &[&str], spawner: &MockSpawner) -> CoreResult<i32> {
        let dir = project_dir("RTSGame");
        let mut registry = CommandRegistry::new("uecli");
        registry
            .register(ClientCommand::new(launcher(&dir, spawner.clone())))
            .unwrap();
        let env = MapEnvironment::new().with_current_dir(dir.path());
        let tokens: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
        registry.dispatch("client", &tokens, &env, &mut Vec::new())
    }

    #[test]
    fn standalone_client_uses_deduced_project() {
        let spawner = MockSpawner::new();
        assert_eq!(dispatch(&[], &spawner).unwrap(), 0);

        let received = spawner.received();
        assert_eq!(received.len(), 1);
        let args = received[0].arguments();
        assert!(args[0].ends_with("RTSGame.uproject"));
        assert_eq!(&args[1..], ["-game", "-FullStdOutLogOutput"]);
        assert_eq!(
            received[0].program().to_str(),
            Some("/opt/UE/Engine/Binaries/Linux/UnrealEditor")
        );
    }

    #[test]
    fn address_adds_server_and_port() {
        let spawner = MockSpawner::new();
        dispatch(&["RTSGame", "--address", "10.0.0.5", "--port", "7777"], &spawner).unwrap();
        let received = spawner.received();
        assert_eq!(
            &received[0].arguments()[1..],
            ["10.0.0.5", "-port=7777", "-game", "-FullStdOutLogOutput"]
        );
    }

    #[test]
    fn dry_run_spawns_nothing() {
        let spawner = MockSpawner::new().with_exit_code(5);
        assert_eq!(dispatch(&["--dry"], &spawner).unwrap(), 0);
        assert_eq!(spawner.spawn_count(), 0);
    }

    #[test]
    fn client_exit_code_is_propagated() {
        let spawner = MockSpawner::new()
            .with_lines(["LogWorld: Error: map failed to load"])
            .with_exit_code(3);
        assert_eq!(dispatch(&[], &spawner).unwrap(), 3);
    }

    #[test]
    fn bad_port_is_a_binding_error() {
        let spawner = MockSpawner::new();
        let err = dispatch(&["--port", "http"], &spawner).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(spawner.spawn_count(), 0);
    }
}
