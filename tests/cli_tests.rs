mod common;

use common::{run_slidecraft, TestEnv};

#[test]
fn slidecraft_help_shows_usage() {
    let output = run_slidecraft(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "--help should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("Commands:"));
    assert!(stdout.contains("create"));
    assert!(stdout.contains("outline"));
}

#[test]
fn slidecraft_version_shows_version() {
    let output = run_slidecraft(&["--version"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "--version should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("slidecraft "));
}

#[test]
fn completions_bash_outputs_script() {
    let output = run_slidecraft(&["completions", "bash"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "completions bash should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(
        stdout.contains("slidecraft"),
        "expected completion output to reference command name\nstdout:\n{}",
        stdout
    );
}

#[test]
fn config_show_works() {
    let output = run_slidecraft(&["config", "show"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "config show should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("[llm]"));
    assert!(stdout.contains("provider = \"gemini\""));
    assert!(stdout.contains("[presentation]"));
}

#[test]
fn config_show_redacts_api_keys() {
    let env = TestEnv::new();
    env.write_config("[llm]\nprovider = \"openai\"\napi_key = \"sk-secret-value-1234\"\n");

    let output = env.run(&["config", "show"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("provider = \"openai\""));
    assert!(
        !stdout.contains("sk-secret-value-1234"),
        "api key leaked into config show\nstdout:\n{}",
        stdout
    );
}

#[test]
fn config_path_returns_valid_path() {
    let output = run_slidecraft(&["config", "path"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "config path should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("config.toml"));
}

#[test]
fn config_init_refuses_to_overwrite_without_force() {
    let env = TestEnv::new();

    let first = env.run(&["config", "init"]);
    assert!(
        first.status.success(),
        "config init should succeed\nstderr:\n{}",
        String::from_utf8_lossy(&first.stderr)
    );
    assert!(env.config_path().exists());

    let second = env.run(&["config", "init"]);
    assert!(!second.status.success());
    assert!(String::from_utf8_lossy(&second.stderr).contains("--force"));

    let forced = env.run(&["config", "init", "--force"]);
    assert!(forced.status.success());
}
