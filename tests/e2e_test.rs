//! End-to-end tests driving the compiled `launchkit` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn launchkit(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("launchkit").expect("Failed to locate launchkit binary");
    cmd.current_dir(cwd);
    cmd
}

fn read_manifest(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn apply_creates_project_named_after_the_project() {
    let work = TempDir::new().unwrap();

    launchkit(work.path())
        .args(["apply", "--name", "onboardkit", "--no-install"])
        .assert()
        .success()
        .stdout(predicate::str::contains("generated successfully"))
        .stdout(predicate::str::contains("Next steps:"));

    let manifest = read_manifest(&work.path().join("onboardkit/package.json"));
    assert_eq!(manifest["name"], "onboardkit");
    assert!(work.path().join("onboardkit/.github/workflows/deploy.yml").is_file());
    assert!(work.path().join("onboardkit/netlify.toml").is_file());
}

#[test]
fn apply_slugifies_the_directory() {
    let work = TempDir::new().unwrap();

    launchkit(work.path()).args(["apply", "--name", "My App!", "--no-install"]).assert().success();

    assert!(work.path().join("my-app").is_dir());
    let manifest = read_manifest(&work.path().join("my-app/package.json"));
    assert_eq!(manifest["name"], "my-app");
}

#[test]
fn apply_twice_fails_and_keeps_first_tree() {
    let work = TempDir::new().unwrap();
    let args = ["apply", "--name", "onboardkit", "--dir", "site", "--no-install"];

    launchkit(work.path()).args(args).assert().success();
    let readme = work.path().join("site/README.md");
    fs::write(&readme, "edited by hand").unwrap();

    launchkit(work.path())
        .args(args)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(fs::read_to_string(&readme).unwrap(), "edited by hand");
}

#[test]
fn apply_without_billing() {
    let work = TempDir::new().unwrap();

    launchkit(work.path())
        .args(["apply", "--name", "onboardkit", "--no-stripe", "--no-install"])
        .assert()
        .success();

    let root = work.path().join("onboardkit");
    assert!(!root.join("app/api/checkout/route.ts").exists());
    assert!(read_manifest(&root.join("package.json"))["dependencies"].get("stripe").is_none());
}

#[test]
fn apply_with_repository_initializes_git() {
    let work = TempDir::new().unwrap();

    launchkit(work.path())
        .args([
            "apply",
            "--name",
            "onboardkit",
            "--repo",
            "https://github.com/acme/onboardkit.git",
            "--no-install",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized git repository"));

    let root = work.path().join("onboardkit");
    assert!(root.join(".git").is_dir());
    let manifest = read_manifest(&root.join("package.json"));
    assert_eq!(manifest["repository"], "https://github.com/acme/onboardkit.git");
}

#[test]
fn apply_rejects_invalid_repository() {
    let work = TempDir::new().unwrap();

    launchkit(work.path())
        .args(["apply", "--name", "onboardkit", "--repo", "not a url", "--no-install"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid git repository URL"));

    assert!(!work.path().join("onboardkit").exists());
}

#[test]
fn apply_rejects_repository_that_would_break_the_manifest() {
    let work = TempDir::new().unwrap();

    for repo in [r#"https://github.com/acme/a"b"#, r#"git@h:x", "scripts": {}, "y": ""#] {
        launchkit(work.path())
            .args(["apply", "--name", "onboardkit", "--repo", repo, "--no-install"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("not a valid git repository URL"));
    }

    assert!(!work.path().join("onboardkit").exists());
}

#[test]
fn config_file_repository_is_validated() {
    let work = TempDir::new().unwrap();
    fs::write(
        work.path().join("launchkit.json"),
        r#"{"name": "onboardkit", "repo": "https://github.com/acme/a\"b", "install": false}"#,
    )
    .unwrap();

    launchkit(work.path())
        .args(["apply", "--config", "launchkit.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid git repository URL"));

    assert!(!work.path().join("onboardkit").exists());
}

#[test]
fn missing_subcommand_prints_help() {
    let work = TempDir::new().unwrap();

    launchkit(work.path())
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("apply"))
        .stdout(predicate::str::contains("destroy"));
}

#[test]
fn install_failure_does_not_fail_apply() {
    let work = TempDir::new().unwrap();
    let empty_path = TempDir::new().unwrap();

    launchkit(work.path())
        .env("PATH", empty_path.path())
        .args(["apply", "--name", "onboardkit"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Dependency installation failed"));

    assert!(work.path().join("onboardkit/package.json").is_file());
}

#[test]
fn apply_from_config_file() {
    let work = TempDir::new().unwrap();
    fs::write(
        work.path().join("launchkit.json"),
        r#"{"name": "Config Kit", "package_manager": "pnpm", "install": false}"#,
    )
    .unwrap();

    launchkit(work.path()).args(["apply", "--config", "launchkit.json"]).assert().success();

    let workflow = fs::read_to_string(work.path().join("config-kit/.github/workflows/deploy.yml")).unwrap();
    assert!(workflow.contains("pnpm/action-setup"));
    assert!(workflow.contains("run: pnpm install --frozen-lockfile"));
}

#[test]
fn destroy_removes_generated_project() {
    let work = TempDir::new().unwrap();

    launchkit(work.path()).args(["apply", "--name", "onboardkit", "--no-install"]).assert().success();
    launchkit(work.path())
        .args(["destroy", "--dir", "./onboardkit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed"));

    assert!(!work.path().join("onboardkit").exists());
}

#[test]
fn destroy_absent_directory_succeeds() {
    let work = TempDir::new().unwrap();

    launchkit(work.path())
        .args(["destroy", "--dir", "ghost"])
        .assert()
        .success()
        .stdout(predicate::str::contains("does not exist"));
}

#[test]
fn destroy_requires_dir() {
    let work = TempDir::new().unwrap();
    fs::create_dir(work.path().join("keep")).unwrap();

    launchkit(work.path())
        .arg("destroy")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Missing required argument: --dir"));

    assert!(work.path().join("keep").is_dir());
}
