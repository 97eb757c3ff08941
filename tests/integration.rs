use std::io::Write as _;
use std::path::Path;
use std::process::{Command, Output, Stdio};

fn refmd_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_refmd"));
    cmd.current_dir(dir);
    cmd
}

fn run_with_stdin(dir: &Path, args: &[&str], input: &str) -> Output {
    let mut child = refmd_cmd(dir)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .as_mut()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn convert_stdin_emits_markdown_link() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_with_stdin(
        dir.path(),
        &["convert"],
        "See {external+charmcraft:ref}`initialise-a-charm`.\n",
    );
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "See [initialise-a-charm](https://documentation.ubuntu.com/charmcraft/en/latest/howto/manage-charms/#initialise-a-charm).\n"
    );
}

#[test]
fn convert_stdin_passes_plain_text_through() {
    let dir = tempfile::tempdir().unwrap();
    let input = "No references here.\nJust text.\n";
    let output = run_with_stdin(dir.path(), &["convert"], input);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), input);
}

#[test]
fn convert_rewrites_files_in_place() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::copy(
        "tests/fixtures/clean/guide.md",
        dir.path().join("guide.md"),
    )
    .unwrap();

    let output = refmd_cmd(dir.path()).args(["convert", "."]).output().unwrap();
    assert!(
        output.status.success(),
        "convert failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("Converted 3 references in 1 files"));

    let content = std::fs::read_to_string(dir.path().join("guide.md")).unwrap();
    assert!(content.contains("[initialise-a-charm]("));
    assert!(content.contains("[Specify a name]("));
    assert!(content.contains("[command-juju-model-config]("));
    assert!(!content.contains("{external+"));

    let check = refmd_cmd(dir.path()).args(["check", "."]).output().unwrap();
    assert!(check.status.success());
    assert!(String::from_utf8_lossy(&check.stdout).contains("All 0 references resolve"));
}

#[test]
fn convert_dry_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let original = std::fs::read_to_string("tests/fixtures/clean/guide.md").unwrap();
    std::fs::write(dir.path().join("guide.md"), &original).unwrap();

    let output = refmd_cmd(dir.path())
        .args(["convert", ".", "--dry-run"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Would convert 3 references in 1 files"));
    assert_eq!(
        std::fs::read_to_string(dir.path().join("guide.md")).unwrap(),
        original
    );
}

#[test]
fn check_passes_on_clean_fixture() {
    let output = refmd_cmd(Path::new("tests/fixtures/clean"))
        .args(["check", "."])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "check failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("All 3 references resolve"));
}

#[test]
fn check_exit_two_when_source_unknown() {
    let output = refmd_cmd(Path::new("tests/fixtures/unresolved"))
        .args(["check", "."])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("notes.md:1"));
    assert!(stdout.contains("charmcraft:upload-a-charm (unknown target)"));
    assert!(stdout.contains("discourse:charm-development (unknown source)"));
}

#[test]
fn check_exit_one_when_only_target_unknown() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_with_stdin(
        dir.path(),
        &["check"],
        "{external+charmcraft:ref}`upload-a-charm`\n",
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("<stdin>:1"));
}

#[test]
fn source_add_list_remove_round_trip() {
    let dir = tempfile::tempdir().unwrap();

    let add = refmd_cmd(dir.path())
        .args(["source", "add", "wiki", "https://example.com/wiki/"])
        .output()
        .unwrap();
    assert!(add.status.success());
    assert!(dir.path().join(".refmd.toml").exists());

    let list = refmd_cmd(dir.path()).args(["source", "list"]).output().unwrap();
    assert!(list.status.success());
    assert!(String::from_utf8_lossy(&list.stdout).contains("wiki -> https://example.com/wiki/ (0 targets)"));

    let remove = refmd_cmd(dir.path())
        .args(["source", "remove", "wiki"])
        .output()
        .unwrap();
    assert!(remove.status.success());

    let list = refmd_cmd(dir.path()).args(["source", "list"]).output().unwrap();
    assert!(!String::from_utf8_lossy(&list.stdout).contains("wiki"));
}

#[test]
fn source_remove_builtin_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = refmd_cmd(dir.path())
        .args(["source", "remove", "charmcraft"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Built-in Source"));
}

#[test]
fn config_extends_catalog_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(".refmd.toml"),
        r#"
[sources.wiki]
base-url = "https://example.com/wiki/"

[sources.wiki.targets.getting-started]
path = "tutorial/"
"#,
    )
    .unwrap();

    let output = run_with_stdin(
        dir.path(),
        &["convert"],
        "{external+wiki:ref}`getting-started`\n",
    );
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "[getting-started](https://example.com/wiki/tutorial/#getting-started)\n"
    );
}
