//! End-to-end tests for the `forge` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

/// Isolated invocation: an empty config file and no colours.
fn forge(temp: &TempDir) -> assert_cmd::Command {
    let config = temp.path().join("forge.toml");
    if !config.exists() {
        fs::write(&config, "").unwrap();
    }
    let mut cmd = cargo::cargo_bin_cmd!("forge");
    cmd.env("FORGE_CONFIG", &config)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .current_dir(temp.path());
    cmd
}

fn output_dir(temp: &TempDir) -> PathBuf {
    let dir = temp.path().join("out");
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn json(stdout: &[u8]) -> serde_json::Value {
    serde_json::from_slice(stdout).expect("stdout is JSON")
}

fn write_manifest(dir: &Path) {
    let feature = dir.join("audit");
    fs::create_dir_all(&feature).unwrap();
    fs::write(
        feature.join("feature.toml"),
        r#"
[feature]
name = "audit"
title = "Audit Log"
description = "Adds an audit log configuration"
category = "other"

[[artifacts]]
name = "auditConfig"
path = "grails-app/conf/audit.yml"
text = "audit:\n    app: {{PROJECT_NAME}}\n"
"#,
    )
    .unwrap();
}

// ── help / version ────────────────────────────────────────────────────────────

#[test]
fn help_lists_subcommands() {
    let temp = TempDir::new().unwrap();
    forge(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("preview"))
        .stdout(predicate::str::contains("list"));
}

#[test]
fn version_flag() {
    let temp = TempDir::new().unwrap();
    forge(&temp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// ── list ──────────────────────────────────────────────────────────────────────

#[test]
fn list_hides_hidden_features_unless_all() {
    let temp = TempDir::new().unwrap();
    forge(&temp)
        .args(["list", "--format", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("jrebel"))
        .stdout(predicate::str::contains("springloaded").not());

    forge(&temp)
        .args(["list", "--all", "--format", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("springloaded"));
}

#[test]
fn list_json_filters_by_type() {
    let temp = TempDir::new().unwrap();
    let out = forge(&temp)
        .args(["list", "--type", "plugin", "--format", "json"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let names: Vec<String> = json(&out.stdout)
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap().to_string())
        .collect();
    assert!(!names.contains(&"rabbitmq".to_string()));
    assert!(names.contains(&"web".to_string()));
}

#[test]
fn list_includes_manifest_features() {
    let temp = TempDir::new().unwrap();
    let features = temp.path().join("features");
    write_manifest(&features);

    forge(&temp)
        .args(["list", "--format", "list", "--features-dir"])
        .arg(&features)
        .assert()
        .success()
        .stdout(predicate::str::contains("audit"));
}

// ── preview ───────────────────────────────────────────────────────────────────

#[test]
fn preview_json_contains_rendered_files() {
    let temp = TempDir::new().unwrap();
    let out = forge(&temp)
        .args(["preview", "demo", "--format", "json"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let preview = json(&out.stdout);
    assert_eq!(preview["project_name"], "demo");
    assert_eq!(preview["features"], serde_json::json!(["web"]));
    assert!(
        preview["files"]["settings.gradle"]
            .as_str()
            .unwrap()
            .contains("demo")
    );
}

#[test]
fn preview_reports_springloaded_exclusion_on_jdk_17() {
    let temp = TempDir::new().unwrap();
    let out = forge(&temp)
        .args([
            "preview", "demo", "--jdk", "17", "--features", "springloaded", "--format", "json",
        ])
        .output()
        .unwrap();
    assert!(out.status.success());

    let preview = json(&out.stdout);
    assert_eq!(preview["features"], serde_json::json!(["web"]));
    assert_eq!(
        preview["warnings"],
        serde_json::json!(["springloaded was excluded because it does not support JDK 17"])
    );
}

#[test]
fn preview_uses_manifest_feature() {
    let temp = TempDir::new().unwrap();
    let features = temp.path().join("features");
    write_manifest(&features);

    let out = forge(&temp)
        .args(["preview", "demo", "-f", "audit", "--format", "json", "--features-dir"])
        .arg(&features)
        .output()
        .unwrap();
    assert!(out.status.success());
    assert_eq!(
        json(&out.stdout)["files"]["grails-app/conf/audit.yml"],
        "audit:\n    app: demo\n"
    );
}

// ── create ────────────────────────────────────────────────────────────────────

#[test]
fn create_writes_project() {
    let temp = TempDir::new().unwrap();
    let out_dir = output_dir(&temp);

    forge(&temp)
        .args(["create", "demo", "--yes", "-o"])
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("created"));

    let root = out_dir.join("demo");
    assert!(root.join("build.gradle").is_file());
    assert!(root.join("settings.gradle").is_file());
    assert!(root.join("grails-app/conf/application.yml").is_file());
}

#[test]
fn create_dry_run_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let out_dir = output_dir(&temp);

    forge(&temp)
        .args(["create", "demo", "--dry-run", "-o"])
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("build.gradle"));

    assert!(!out_dir.join("demo").exists());
}

#[test]
fn create_refuses_existing_directory() {
    let temp = TempDir::new().unwrap();
    let out_dir = output_dir(&temp);
    fs::create_dir_all(out_dir.join("demo")).unwrap();

    forge(&temp)
        .args(["create", "demo", "--yes", "-o"])
        .arg(&out_dir)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn create_rejects_name_without_leading_letter() {
    let temp = TempDir::new().unwrap();
    let out_dir = output_dir(&temp);

    forge(&temp)
        .args(["create", "1app", "--yes", "-o"])
        .arg(&out_dir)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("must start with a letter"));

    assert!(!out_dir.join("1app").exists());
}

#[test]
fn create_json_reports_features() {
    let temp = TempDir::new().unwrap();
    let out_dir = output_dir(&temp);

    let out = forge(&temp)
        .args(["--output-format", "json", "create", "demo", "-f", "jrebel", "-o"])
        .arg(&out_dir)
        .output()
        .unwrap();
    assert!(out.status.success());

    let report = json(&out.stdout);
    assert_eq!(report["features"], serde_json::json!(["web", "jrebel"]));
    assert!(report["created_at"].is_string());
    assert!(out_dir.join("demo/src/main/resources/rebel.xml").is_file());
}

// ── failures ──────────────────────────────────────────────────────────────────

#[test]
fn unknown_feature_exits_with_not_found() {
    let temp = TempDir::new().unwrap();
    forge(&temp)
        .args(["preview", "demo", "--features", "does-not-exist"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("does-not-exist"));
}

#[test]
fn unsupported_jdk_is_a_usage_error() {
    let temp = TempDir::new().unwrap();
    forge(&temp)
        .args(["preview", "demo", "--jdk", "9"])
        .assert()
        .code(2);
}

#[test]
fn bad_configured_default_is_a_config_error() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("forge.toml"), "[defaults]\njdk = \"9\"\n").unwrap();

    forge(&temp)
        .args(["preview", "demo"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("defaults.jdk"));
}

#[test]
fn missing_explicit_config_exits_with_config_error() {
    let temp = TempDir::new().unwrap();
    forge(&temp)
        .args(["--config", "/no/such/forge.toml", "list"])
        .assert()
        .code(4);
}

// ── config / init / completions ───────────────────────────────────────────────

#[test]
fn config_get_reads_file_and_env() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("forge.toml"), "[defaults]\njdk = \"11\"\n").unwrap();

    forge(&temp)
        .args(["config", "get", "defaults.jdk"])
        .assert()
        .success()
        .stdout(predicate::str::diff("11\n"));

    forge(&temp)
        .env("FORGE_DEFAULTS__APPLICATION_TYPE", "plugin")
        .args(["config", "get", "defaults.application_type"])
        .assert()
        .success()
        .stdout(predicate::str::diff("plugin\n"));
}

#[test]
fn init_writes_config_at_explicit_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("fresh/forge.toml");

    let mut cmd = cargo::cargo_bin_cmd!("forge");
    cmd.env("NO_COLOR", "1")
        .args(["init", "--config"])
        .arg(&path)
        .assert()
        .success();
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("# Forge configuration"));
    assert!(text.contains("[defaults]"));
}

#[test]
fn init_keeps_existing_file_without_force() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("forge.toml"), "# mine\n").unwrap();

    forge(&temp).arg("init").assert().success();
    assert_eq!(
        fs::read_to_string(temp.path().join("forge.toml")).unwrap(),
        "# mine\n"
    );

    forge(&temp).args(["init", "--force"]).assert().success();
    let text = fs::read_to_string(temp.path().join("forge.toml")).unwrap();
    assert!(text.contains("[defaults]"));
}

#[test]
fn completions_for_bash() {
    let temp = TempDir::new().unwrap();
    forge(&temp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("forge"));
}
