use assert_cmd::Command;
use predicates::str::{contains, is_match};
use std::error::Error;
use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::thread;
use tempfile::{TempDir, tempdir};

// Binary with an empty environment rooted in `dir`.
fn uecli_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("uecli").expect("Failed to find uecli binary");
    cmd.env_clear().current_dir(dir).env("HOME", dir);
    cmd
}

// Working directory holding `<name>.uproject`.
fn project_dir(name: &str) -> Result<TempDir, Box<dyn Error>> {
    let dir = tempdir()?;
    fs::write(dir.path().join(format!("{}.uproject", name)), "{}")?;
    Ok(dir)
}

#[test]
fn test_unknown_command_is_usage_error() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    uecli_cmd(dir.path())
        .arg("cook")
        .assert()
        .code(2)
        .stderr(contains("unknown command 'cook'"))
        .stderr(contains("publish"));
    Ok(())
}

// Working directory with an unparsable config file next to the project.
fn broken_config_dir() -> Result<TempDir, Box<dyn Error>> {
    let dir = project_dir("RTSGame")?;
    fs::write(dir.path().join("config.json"), "{ engine_path: ")?;
    Ok(dir)
}

#[test]
fn test_broken_config_does_not_mask_unknown_command() -> Result<(), Box<dyn Error>> {
    let dir = broken_config_dir()?;
    uecli_cmd(dir.path())
        .env("UETOOLS_CONFIG", dir.path().join("config.json"))
        .arg("bogus")
        .assert()
        .code(2)
        .stderr(contains("unknown command 'bogus'"));
    Ok(())
}

#[test]
fn test_broken_config_is_reported_for_known_command() -> Result<(), Box<dyn Error>> {
    let dir = broken_config_dir()?;
    uecli_cmd(dir.path())
        .env("UETOOLS_CONFIG", dir.path().join("config.json"))
        .args(["editor", "--dry"])
        .assert()
        .code(1)
        .stderr(contains("failed to parse configuration"));
    Ok(())
}

#[test]
fn test_no_command_lists_commands() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    uecli_cmd(dir.path())
        .assert()
        .code(2)
        .stderr(contains("Commands:"))
        .stderr(contains("client"))
        .stderr(contains("editor"));
    Ok(())
}

#[test]
fn test_command_help_exits_cleanly() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    uecli_cmd(dir.path())
        .args(["client", "--help"])
        .assert()
        .success()
        .stdout(contains("--port"))
        .stdout(contains("--dry"));
    Ok(())
}

#[test]
fn test_client_dry_run_prints_command_line() -> Result<(), Box<dyn Error>> {
    let dir = project_dir("RTSGame")?;
    uecli_cmd(dir.path())
        .env("UETOOLS_ENGINE_PATH", "/opt/UE")
        .args(["client", "--address", "10.0.0.5", "--dry"])
        .assert()
        .success()
        .stdout(contains("RTSGame.uproject"))
        .stdout(contains("10.0.0.5 -port=8123 -game -FullStdOutLogOutput"));
    Ok(())
}

#[test]
fn test_missing_engine_is_fatal() -> Result<(), Box<dyn Error>> {
    let dir = project_dir("RTSGame")?;
    uecli_cmd(dir.path())
        .arg("editor")
        .assert()
        .code(1)
        .stderr(contains("toolchain not found"));
    Ok(())
}

#[test]
fn test_missing_editor_binary_fails_to_launch() -> Result<(), Box<dyn Error>> {
    let dir = project_dir("RTSGame")?;
    let engine = tempdir()?;
    uecli_cmd(dir.path())
        .env("UETOOLS_ENGINE_PATH", engine.path())
        .arg("editor")
        .assert()
        .code(1)
        .stderr(contains("failed to launch"));
    Ok(())
}

// Engine root whose editor is a shell script echoing its first argument.
#[cfg(target_os = "linux")]
fn fake_engine(exit_code: i32) -> Result<TempDir, Box<dyn Error>> {
    use std::os::unix::fs::PermissionsExt;

    let engine = tempdir()?;
    let binaries = engine.path().join("Engine/Binaries/Linux");
    fs::create_dir_all(&binaries)?;
    let editor = binaries.join("UnrealEditor");
    fs::write(
        &editor,
        format!("#!/bin/sh\necho \"opening $1\"\nexit {}\n", exit_code),
    )?;
    fs::set_permissions(&editor, fs::Permissions::from_mode(0o755))?;
    Ok(engine)
}

#[cfg(target_os = "linux")]
#[test]
fn test_editor_exit_code_is_forwarded() -> Result<(), Box<dyn Error>> {
    let dir = project_dir("RTSGame")?;
    let engine = fake_engine(3)?;

    uecli_cmd(dir.path())
        .env("UETOOLS_ENGINE_PATH", engine.path())
        .arg("editor")
        .assert()
        .code(3)
        .stdout(contains("opening"))
        .stdout(contains("RTSGame.uproject"));
    Ok(())
}

#[cfg(target_os = "linux")]
#[test]
fn test_timestamps_prefix_process_output() -> Result<(), Box<dyn Error>> {
    let dir = project_dir("RTSGame")?;
    let engine = fake_engine(0)?;

    uecli_cmd(dir.path())
        .env("UETOOLS_ENGINE_PATH", engine.path())
        .args(["--timestamps", "editor"])
        .assert()
        .success()
        .stdout(is_match(r"(?m)^\[\d{2}:\d{2}:\d{2}\] opening ")?);
    Ok(())
}

#[test]
fn test_publish_without_credentials_is_usage_error() -> Result<(), Box<dyn Error>> {
    let dir = project_dir("RTSGame")?;
    fs::write(dir.path().join("build.zip"), "payload")?;
    uecli_cmd(dir.path())
        .env("CI_PROJECT_ID", "4242")
        .env("CI_COMMIT_SHORT_SHA", "1a2b3c4d")
        .args(["publish", "build.zip"])
        .assert()
        .code(2)
        .stderr(contains("--token"))
        .stderr(contains("CI_JOB_TOKEN"));
    Ok(())
}

#[test]
fn test_publish_rejects_unknown_platform() -> Result<(), Box<dyn Error>> {
    let dir = project_dir("RTSGame")?;
    uecli_cmd(dir.path())
        .args([
            "publish",
            "build.zip",
            "--platform",
            "Amiga",
            "--project-id",
            "4242",
            "--commit-short",
            "1a2b3c4d",
            "--token",
            "secret",
            "--dry",
        ])
        .assert()
        .code(2);
    Ok(())
}

#[test]
fn test_publish_dry_run_prints_url() -> Result<(), Box<dyn Error>> {
    let dir = project_dir("RTSGame")?;
    uecli_cmd(dir.path())
        .env("CI_API_V4_URL", "https://gitlab.example.com/api/v4/")
        .env("CI_PROJECT_ID", "4242")
        .env("CI_COMMIT_TAG", "v1.2.0")
        .env("CI_COMMIT_SHORT_SHA", "1a2b3c4d")
        .env("CI_JOB_TOKEN", "job-secret")
        .args(["publish", "build.zip", "--platform", "Win64", "--dry"])
        .assert()
        .success()
        .stdout(contains(
            "URL: https://gitlab.example.com/api/v4/projects/4242/packages/generic/RTSGame/Win64-1a2b3c4d/RTSGame-v1.2.0.zip",
        ));
    Ok(())
}

#[test]
fn test_publish_uploads_to_registry() -> Result<(), Box<dyn Error>> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let address = listener.local_addr()?;

    let server = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut head = Vec::new();
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            if line.trim_end().is_empty() {
                break;
            }
            head.push(line.trim_end().to_string());
        }
        let length: usize = head
            .iter()
            .find_map(|line| {
                let (key, value) = line.split_once(':')?;
                key.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse().unwrap())
            })
            .unwrap_or(0);
        let mut body = vec![0u8; length];
        reader.read_exact(&mut body).unwrap();

        let mut stream = stream;
        stream
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\n{}")
            .unwrap();
        (head, body)
    });

    let dir = project_dir("RTSGame")?;
    let payload: Vec<u8> = (0..20_000u32).map(|i| (i % 251) as u8).collect();
    fs::write(dir.path().join("build.zip"), &payload)?;

    uecli_cmd(dir.path())
        .env("CI_API_V4_URL", format!("http://{}/api/v4", address))
        .env("CI_PROJECT_ID", "7")
        .env("CI_COMMIT_SHORT_SHA", "abc123")
        .env("CI_JOB_TOKEN", "job-secret")
        .args(["--no-progress", "publish", "build.zip", "--platform", "Linux"])
        .assert()
        .success();

    let (head, body) = server.join().map_err(|_| "registry thread panicked")?;
    assert_eq!(
        head[0],
        "PUT /api/v4/projects/7/packages/generic/RTSGame/Linux-abc123/RTSGame-v0.0.0.zip HTTP/1.1"
    );
    assert!(
        head.iter()
            .any(|line| line.to_ascii_lowercase() == "job-token: job-secret")
    );
    assert_eq!(body, payload);
    Ok(())
}
