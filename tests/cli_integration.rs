//! Integration tests for the cmdusage binary.
//!
//! Every command runs with `CMDUSAGE_CONFIG` and `HOME` pointed into a temp
//! directory so the developer's own config never leaks in.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

// =============================================================================
// Test Fixtures
// =============================================================================

const FIXTURE: &str = include_str!("fixtures/cluster.toml");

/// Temp workspace holding a manifest and an isolated config location.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        dir.child("cluster.toml").write_str(FIXTURE).unwrap();
        Self { dir }
    }

    fn manifest(&self) -> String {
        self.dir.child("cluster.toml").path().display().to_string()
    }

    fn write(&self, name: &str, contents: &str) -> String {
        let file = self.dir.child(name);
        file.write_str(contents).unwrap();
        file.path().display().to_string()
    }

    fn config_path(&self) -> std::path::PathBuf {
        self.dir.child("config/config.toml").path().to_path_buf()
    }

    /// A command for running cmdusage in this workspace.
    fn cmdusage(&self) -> Command {
        let mut cmd = Command::cargo_bin("cmdusage").unwrap();
        cmd.env("CMDUSAGE_CONFIG", self.config_path())
            .env("HOME", self.dir.path())
            .env_remove("XDG_CONFIG_HOME")
            .env_remove("NO_COLOR")
            .env_remove("RUST_LOG");
        cmd
    }
}

// =============================================================================
// render
// =============================================================================

#[test]
fn render_root_of_manifest() {
    let ws = Workspace::new();
    ws.cmdusage()
        .args(["render", &ws.manifest()])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Usage:\n  tanzu cluster [command]\n  tanzu kubernetes cluster [command]\n",
        ))
        .stdout(predicate::str::contains("Additional help topics:"));
}

#[test]
fn render_nested_command() {
    let ws = Workspace::new();
    ws.cmdusage()
        .args(["render", &ws.manifest(), "create"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "tanzu cluster create CLUSTER_NAME [flags]",
        ))
        .stdout(predicate::str::contains("Global Flags:"));
}

#[test]
fn render_unknown_command_fails() {
    let ws = Workspace::new();
    ws.cmdusage()
        .args(["render", &ws.manifest(), "nope"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "error: unknown command \"nope\" for \"cluster\"",
        ));
}

#[test]
fn render_with_root_token_flag() {
    let ws = Workspace::new();
    ws.cmdusage()
        .args(["--root-token", "acme", "render", &ws.manifest(), "list"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Usage:\n  acme cluster list [flags]\n"));
}

#[test]
fn render_with_forced_color() {
    let ws = Workspace::new();
    ws.cmdusage()
        .args(["--color", "always", "render", &ws.manifest()])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("\x1b[1mUsage:\x1b[0m"));
}

#[test]
fn render_deprecated_command_warns() {
    let ws = Workspace::new();
    ws.cmdusage()
        .args(["render", &ws.manifest(), "scale"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Usage:\n  tanzu cluster scale CLUSTER_NAME [flags]\n"))
        .stderr(predicate::str::contains(
            "warning: command \"scale\" is deprecated, use 'tanzu cluster update' instead",
        ));
}

#[test]
fn render_json_manifest() {
    let ws = Workspace::new();
    let path = ws.write(
        "tool.json",
        r#"{"command": {"use": "tool", "commands": [{"use": "run TASK", "short": "Run a task", "runnable": true}]}}"#,
    );
    ws.cmdusage()
        .args(["render", &path, "run"])
        .assert()
        .success()
        .stdout("Usage:\n  tanzu tool run TASK [flags]\n\nFlags:\n  -h, --help   help for run\n");
}

#[test]
fn render_missing_manifest_fails() {
    let ws = Workspace::new();
    ws.cmdusage()
        .args(["render", "does-not-exist.toml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to read manifest"));
}

// =============================================================================
// tree / check
// =============================================================================

#[test]
fn tree_outline_marks_commands() {
    let ws = Workspace::new();
    ws.cmdusage()
        .args(["tree", &ws.manifest()])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("cluster\n  create\n"))
        .stdout(predicate::str::contains("  internals [hidden]"))
        .stdout(predicate::str::contains("  lifecycle [help topic]"))
        .stdout(predicate::str::contains("  scale [deprecated]"));
}

#[test]
fn tree_as_json() {
    let ws = Workspace::new();
    let output = ws
        .cmdusage()
        .args(["tree", &ws.manifest(), "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["name"], "cluster");
    assert_eq!(json["target"], "kubernetes");
    assert_eq!(json["commands"][0]["path"], "cluster create");
    assert_eq!(json["commands"].as_array().unwrap().len(), 5);
}

#[test]
fn check_reports_counts() {
    let ws = Workspace::new();
    ws.cmdusage()
        .args(["check", &ws.manifest()])
        .assert()
        .success()
        .stdout("ok: 6 commands, 11 flags\n");
}

#[test]
fn check_quiet_prints_nothing() {
    let ws = Workspace::new();
    ws.cmdusage()
        .args(["-q", "check", &ws.manifest()])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn check_rejects_unknown_field() {
    let ws = Workspace::new();
    let path = ws.write("bad.toml", "[command]\nuse = \"x\"\nshrot = \"typo\"\n");
    ws.cmdusage()
        .args(["check", &path])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to parse manifest"))
        .stderr(predicate::str::contains("shrot"));
}

#[test]
fn check_rejects_duplicate_commands() {
    let ws = Workspace::new();
    let path = ws.write(
        "dup.toml",
        "[command]\nuse = \"x\"\n\n[[command.commands]]\nuse = \"a\"\n\n[[command.commands]]\nuse = \"a\"\n",
    );
    ws.cmdusage()
        .args(["check", &path])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("duplicate command 'a'"));
}

// =============================================================================
// config
// =============================================================================

#[test]
fn config_set_then_get() {
    let ws = Workspace::new();
    ws.cmdusage()
        .args(["config", "set", "root_token", "acme"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set root_token = acme"));

    ws.cmdusage()
        .args(["config", "get", "root_token"])
        .assert()
        .success()
        .stdout("acme\n");

    ws.cmdusage()
        .args(["render", &ws.manifest(), "list"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Usage:\n  acme cluster list"));

    ws.dir
        .child("config/config.toml")
        .assert(predicate::str::contains("root_token = \"acme\""));
}

#[test]
fn config_list_shows_defaults() {
    let ws = Workspace::new();
    ws.cmdusage()
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(
            "root_token = tanzu\ncolor = auto\nsort_commands = true\nhelp_flag = true\n",
        );
}

#[test]
fn config_rejects_bad_values() {
    let ws = Workspace::new();
    ws.cmdusage()
        .args(["config", "set", "colour", "never"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("colour"));

    ws.cmdusage()
        .args(["config", "set", "sort_commands", "maybe"])
        .assert()
        .code(1);

    ws.dir.child("config/config.toml").assert(predicate::path::missing());
}

#[test]
fn config_path_uses_env() {
    let ws = Workspace::new();
    ws.cmdusage()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn config_disables_help_flag() {
    let ws = Workspace::new();
    ws.cmdusage()
        .args(["config", "set", "help_flag", "false"])
        .assert()
        .success();

    ws.cmdusage()
        .args(["check", &ws.manifest()])
        .assert()
        .success()
        .stdout("ok: 6 commands, 5 flags\n");
}

// =============================================================================
// usage / completion
// =============================================================================

#[test]
fn usage_renders_own_commands() {
    let ws = Workspace::new();
    ws.cmdusage()
        .args(["usage", "render"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "cmdusage render <MANIFEST> [PATH]... [flags]",
        ))
        .stdout(predicate::str::contains("Global Flags:"))
        .stdout(predicate::str::contains("--root-token TOKEN"));
}

#[test]
fn usage_root_lists_commands() {
    let ws = Workspace::new();
    ws.cmdusage()
        .arg("usage")
        .assert()
        .success()
        .stdout(predicate::str::contains("Available Commands:"))
        .stdout(predicate::str::contains("  render"))
        .stdout(predicate::str::contains(
            "Use \"cmdusage [command] --help\" for more information about a command.",
        ));
}

#[test]
fn completion_script_is_generated() {
    let ws = Workspace::new();
    ws.cmdusage()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cmdusage"));
}

#[test]
fn version_flag_works() {
    let ws = Workspace::new();
    ws.cmdusage()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("cmdusage"));
}
