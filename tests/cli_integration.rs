//! Integration tests for subcommands that work without HyPhy.

#![allow(clippy::unwrap_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{TempDir, tempdir};

/// hyphy-run with an isolated config directory and no `HYPHY_RUN_*`
/// variables leaking in from the environment.
fn hyphy_run(config_home: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("hyphy-run");
    cmd.env("HOME", config_home)
        .env("XDG_CONFIG_HOME", config_home)
        .env_remove("HYPHY_RUN_OUTPUT_MODE")
        .env_remove("HYPHY_RUN_EXECUTABLE")
        .env_remove("HYPHY_RUN_BUILD_PATH")
        .env_remove("HYPHY_RUN_INSTALL_PATH")
        .env_remove("HYPHY_RUN_CPU")
        .env_remove("RUST_LOG");
    cmd
}

fn write_split_input(dir: &TempDir, tree: &str) -> (String, String) {
    let alignment = dir.path().join("aln.fa");
    let tree_path = dir.path().join("tree.nwk");
    fs::write(&alignment, ">a\nATG\n>b\nATG\n>c\nATA\n").unwrap();
    fs::write(&tree_path, tree).unwrap();
    (
        alignment.display().to_string(),
        tree_path.display().to_string(),
    )
}

#[test]
fn test_codes_lists_all_genetic_codes() {
    let home = tempdir().unwrap();
    hyphy_run(home.path())
        .arg("codes")
        .assert()
        .success()
        .stdout(predicate::str::contains(" 1  Universal"))
        .stdout(predicate::str::contains(" 2  Vertebrate mtDNA"))
        .stdout(predicate::str::contains("19  Pachysolen Nuclear"));
}

#[test]
fn test_codes_json_envelope() {
    let home = tempdir().unwrap();
    let output = hyphy_run(home.path())
        .args(["codes", "--output-mode", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["event"], "result");
    assert_eq!(value["payload"]["result_type"], "genetic_codes");
    assert_eq!(value["payload"]["codes"].as_array().unwrap().len(), 19);
}

#[test]
fn test_labels_from_split_input() {
    let home = tempdir().unwrap();
    let dir = tempdir().unwrap();
    let (alignment, tree) =
        write_split_input(&dir, "((a{Foreground},b{Background}),c{Foreground});\n");

    hyphy_run(home.path())
        .args(["labels", "-a", &alignment, "-t", &tree])
        .assert()
        .success()
        .stdout("Foreground\nBackground\n");
}

#[test]
fn test_labels_from_nexus_with_translate_table() {
    let home = tempdir().unwrap();
    let dir = tempdir().unwrap();
    let data = dir.path().join("data.nex");
    fs::write(
        &data,
        "#NEXUS\n\
         BEGIN DATA;\n\
         DIMENSIONS NTAX=3 NCHAR=3;\n\
         FORMAT DATATYPE=DNA;\n\
         MATRIX\n\
         human ATG\n\
         chimp ATG\n\
         mouse ATA\n\
         ;\n\
         END;\n\
         BEGIN TREES;\n\
         TRANSLATE 1 human, 2 chimp, 3 mouse;\n\
         TREE tree1 = ((1{Primates},2{Primates}),3);\n\
         END;\n",
    )
    .unwrap();

    let output = hyphy_run(home.path())
        .args(["labels", "-d"])
        .arg(&data)
        .args(["--output-mode", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["payload"]["labels"], serde_json::json!(["Primates"]));
    let tree = value["payload"]["tree"].as_str().unwrap();
    assert!(tree.contains("human{Primates}"));
    assert!(tree.contains("mouse"));
}

#[test]
fn test_labels_requires_tree_with_alignment() {
    let home = tempdir().unwrap();
    let dir = tempdir().unwrap();
    let (alignment, _) = write_split_input(&dir, "((a,b),c);");

    hyphy_run(home.path())
        .args(["labels", "-a", &alignment])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "error: a tree must be provided together with the alignment",
        ));
}

#[test]
fn test_labels_rejects_both_input_modes() {
    let home = tempdir().unwrap();
    let dir = tempdir().unwrap();
    let (alignment, tree) = write_split_input(&dir, "((a,b),c);");

    hyphy_run(home.path())
        .args(["labels", "-a", &alignment, "-t", &tree, "-d", &alignment])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not both"));
}

#[test]
fn test_json_mode_error_envelope() {
    let home = tempdir().unwrap();
    let dir = tempdir().unwrap();
    let (alignment, _) = write_split_input(&dir, "((a,b),c);");

    let output = hyphy_run(home.path())
        .args(["labels", "-a", &alignment, "--output-mode", "json"])
        .output()
        .unwrap();
    assert!(!output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["event"], "error");
    assert_eq!(value["payload"]["code"], "tree_required");
    assert!(
        String::from_utf8_lossy(&output.stderr)
            .contains("error: a tree must be provided together with the alignment")
    );
}

#[test]
fn test_labels_combined_without_tree() {
    let home = tempdir().unwrap();
    let dir = tempdir().unwrap();
    let data = dir.path().join("data.fa");
    fs::write(&data, ">a\nATG\n>b\nATG\n").unwrap();

    hyphy_run(home.path())
        .args(["labels", "-d"])
        .arg(&data)
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed tree"));
}

#[test]
fn test_missing_executable_reported() {
    let home = tempdir().unwrap();
    let dir = tempdir().unwrap();
    let (alignment, tree) = write_split_input(&dir, "((a,b),c);");

    hyphy_run(home.path())
        .args(["fel", "-a", &alignment, "-t", &tree])
        .args(["--executable", "/nonexistent/bin/HYPHYMP"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("HyPhy executable"))
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_missing_build_path_reported() {
    let home = tempdir().unwrap();
    let dir = tempdir().unwrap();
    let (alignment, tree) = write_split_input(&dir, "((a,b),c);");

    hyphy_run(home.path())
        .args(["meme", "-a", &alignment, "-t", &tree])
        .args(["--build-path", "/nonexistent/hyphy/build"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("build path does not exist"));
}

#[test]
fn test_invalid_alpha_rejected_by_parser() {
    let home = tempdir().unwrap();
    hyphy_run(home.path())
        .args(["fel", "-d", "data.nex", "--alpha", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("alpha must be between"));
}

#[test]
fn test_no_subcommand_shows_usage() {
    let home = tempdir().unwrap();
    hyphy_run(home.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

// Config location follows XDG_CONFIG_HOME only on Linux.
#[cfg(target_os = "linux")]
#[test]
fn test_config_path_init_and_show() {
    let home = tempdir().unwrap();

    hyphy_run(home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hyphy-run"))
        .stdout(predicate::str::ends_with("config.toml\n"));

    hyphy_run(home.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));

    hyphy_run(home.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    hyphy_run(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[hyphy]"))
        .stdout(predicate::str::contains("executable = \"HYPHYMP\""));
}

#[cfg(target_os = "linux")]
#[test]
fn test_invalid_config_rejected() {
    let home = tempdir().unwrap();
    let config_dir = home.path().join("hyphy-run");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[defaults]\ngenetic_code = \"Martian\"\n",
    )
    .unwrap();

    let dir = tempdir().unwrap();
    let (alignment, tree) = write_split_input(&dir, "((a,b),c);");

    hyphy_run(home.path())
        .args(["fel", "-a", &alignment, "-t", &tree])
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration validation failed"));
}
