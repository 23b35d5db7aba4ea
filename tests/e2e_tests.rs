//! End-to-end tests for the dep-harvest CLI
//!
//! These tests verify:
//! - Each offline subcommand writes the expected files
//! - JSON summaries have the expected schema
//! - Exit codes are correct for various scenarios

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Command for the compiled binary, isolated from any config in the working directory
fn dep_harvest(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("dep-harvest").expect("binary should be built");
    cmd.current_dir(dir).env_remove("RUST_LOG").env_remove("GITHUB_TOKEN");
    cmd
}

/// Create a test directory with a small Gradle project
fn create_test_project() -> TempDir {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let project = temp_dir.path().join("project");
    fs::create_dir_all(&project).unwrap();

    fs::write(
        project.join("build.gradle"),
        r#"ext {
    junitVersion = '4.13.2'
}

dependencies {
    implementation 'org.slf4j:slf4j-api:2.0.9'
    testImplementation "junit:junit:${junitVersion}"
}
"#,
    )
    .unwrap();

    temp_dir
}

#[test]
fn test_help_lists_subcommands() {
    let temp = tempfile::tempdir().unwrap();
    dep_harvest(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("harvest"))
        .stdout(predicate::str::contains("dedupe"))
        .stdout(predicate::str::contains("verify"))
        .stdout(predicate::str::contains("fixture"));
}

#[test]
fn test_missing_subcommand_fails() {
    let temp = tempfile::tempdir().unwrap();
    dep_harvest(temp.path()).assert().failure();
}

#[test]
fn test_harvest_writes_list() {
    let temp = create_test_project();
    let output = temp.path().join("out").join("deps.txt");

    dep_harvest(temp.path())
        .args(["harvest", "project", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Harvest summary:"));

    let content = fs::read_to_string(&output).unwrap();
    assert_eq!(content, "junit:junit:4.13.2\norg.slf4j:slf4j-api:2.0.9\n");
}

#[test]
fn test_harvest_json_summary() {
    let temp = create_test_project();

    let assert = dep_harvest(temp.path())
        .args(["harvest", "project", "-o", "deps.txt", "--json"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(json["unique"], 2);
    assert_eq!(json["placeholders"], 1);
    assert_eq!(json["resolved"], 1);
    assert_eq!(json["output"], "deps.txt");
}

#[test]
fn test_harvest_missing_root_fails() {
    let temp = tempfile::tempdir().unwrap();
    dep_harvest(temp.path())
        .args(["harvest", "does-not-exist", "-o", "deps.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("directory not found"));
}

#[test]
fn test_harvest_broken_pom_is_partial() {
    let temp = create_test_project();
    fs::write(temp.path().join("project").join("pom.xml"), "<project>").unwrap();

    dep_harvest(temp.path())
        .args(["harvest", "project", "-o", "deps.txt", "-q"])
        .assert()
        .code(2);
    assert!(temp.path().join("deps.txt").exists());
}

#[test]
fn test_dedupe_merges_lists_and_trees() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(
        temp.path().join("ide.txt"),
        "Gradle: junit:junit:4.12\nMaven: com.google.guava:guava:31.1-jre\n",
    )
    .unwrap();
    fs::write(
        temp.path().join("tree.json"),
        r#"[
  {"type": "testImplementation", "group": "junit", "name": "junit", "version": "4.13.2"},
  {"type": "annotationProcessor", "group": "org.projectlombok", "module": "lombok", "version": "1.18.30"}
]"#,
    )
    .unwrap();

    dep_harvest(temp.path())
        .args(["dedupe", "ide.txt", "tree.json", "-o", "all.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 unique coordinates"));

    let content = fs::read_to_string(temp.path().join("all.txt")).unwrap();
    assert_eq!(
        content,
        "com.google.guava:guava:31.1-jre\njunit:junit:4.13.2\norg.projectlombok:lombok:1.18.30\n"
    );
}

#[test]
fn test_dedupe_missing_input_fails() {
    let temp = tempfile::tempdir().unwrap();
    dep_harvest(temp.path())
        .args(["dedupe", "missing.txt", "-o", "all.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing.txt"));
}

#[test]
fn test_fixture_writes_block_and_settings() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(
        temp.path().join("deps.txt"),
        "junit:junit:4.13.2\n\norg.slf4j:slf4j-api:2.0.9\n",
    )
    .unwrap();

    dep_harvest(temp.path())
        .args([
            "fixture",
            "deps.txt",
            "-o",
            "fixture/build.gradle",
            "--projects",
            "2",
        ])
        .assert()
        .success();

    let build = fs::read_to_string(temp.path().join("fixture/build.gradle")).unwrap();
    assert_eq!(
        build,
        "dependencies {\n  implementation \"junit:junit:4.13.2\"\n  implementation \"org.slf4j:slf4j-api:2.0.9\"\n}\n"
    );
    let settings = fs::read_to_string(temp.path().join("fixture/settings.gradle")).unwrap();
    assert_eq!(settings, "include(\"project0\")\ninclude(\"project1\")\n");
}

#[test]
fn test_invalid_config_fails() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("dep-harvest.toml"), "[verify]\nexception_threshold = 0\n").unwrap();
    fs::write(temp.path().join("deps.txt"), "a:b:1\n").unwrap();

    dep_harvest(temp.path())
        .args(["dedupe", "deps.txt", "-o", "out.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("verify.exception_threshold"));
}

#[test]
fn test_verify_rejects_zero_max_passes() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("deps.txt"), "a:b:1\n").unwrap();

    dep_harvest(temp.path())
        .args(["verify", "deps.txt", "--max-passes", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("verify.max_passes"));
}

#[test]
#[ignore = "requires network access"]
fn test_check_against_maven_central() {
    let temp = tempfile::tempdir().unwrap();
    dep_harvest(temp.path())
        .args(["check", "junit:junit:4.13.2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("found"));
}
