//! Integration tests for the flags-gen CLI.
//!
//! Fixtures are copied into a temporary directory so the default output file
//! lands next to the copy and never inside the source tree.

#![allow(deprecated)] // cargo_bin is deprecated but works fine for standard builds

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Copies a fixture into a fresh temporary directory.
fn copy_fixture(name: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(name);
    fs::copy(fixture(name), &path).unwrap();
    (temp_dir, path)
}

fn flags_gen() -> Command {
    Command::cargo_bin("flags-gen").unwrap()
}

// ============================================================================
// Help and Version tests
// ============================================================================

#[test]
fn test_help_shows_usage() {
    flags_gen()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("+flags-gen"))
        .stdout(predicate::str::contains("--input"));
}

#[test]
fn test_version() {
    flags_gen()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// ============================================================================
// Input validation tests
// ============================================================================

#[test]
fn test_missing_input_fails() {
    flags_gen()
        .assert()
        .failure()
        .stderr(predicate::str::contains("--input"));
}

#[test]
fn test_nonexistent_input_fails() {
    flags_gen()
        .args(["-i", "/nonexistent/path/types.go"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_non_go_input_fails() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("types.txt");
    fs::write(&input, "package main\n").unwrap();

    flags_gen()
        .arg("-i")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains(".go extension"));
}

#[test]
fn test_directory_input_fails() {
    let temp_dir = TempDir::new().unwrap();

    flags_gen()
        .arg("-i")
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a file"));
}

#[test]
fn test_parent_directory_input_rejected() {
    flags_gen()
        .args(["-i", "../types.go"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("directory traversal"));
}

#[test]
fn test_output_and_stdout_conflict() {
    let (_temp_dir, input) = copy_fixture("server.go");

    flags_gen()
        .arg("-i")
        .arg(&input)
        .args(["-o", "out.go", "--stdout"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

// ============================================================================
// Generation tests
// ============================================================================

#[test]
fn test_default_output_next_to_input() {
    let (temp_dir, input) = copy_fixture("server.go");

    flags_gen()
        .arg("-i")
        .arg(&input)
        .arg("--no-color")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Generated flags code for 1 struct(s) in",
        ))
        .stdout(predicate::str::contains("server_flags.go"));

    let generated = fs::read_to_string(temp_dir.path().join("server_flags.go")).unwrap();
    assert!(generated.starts_with("// Code generated by flags-gen. DO NOT EDIT."));
    assert!(generated.contains("package main\n"));
    assert!(generated.contains("\"github.com/spf13/pflag\""));
    assert!(generated.contains("func (s *ServerConfig) AddFlags(fs *pflag.FlagSet) {"));
    assert!(generated.contains(
        "\tfs.StringVar(&s.Host, \"host\", \"localhost\", \"Host is the server hostname\")\n"
    ));
    assert!(generated.contains("\tfs.IntVar(&s.Port, \"port\", 8080, \"Port is the server port\")\n"));
    assert!(generated.contains(
        "\tfs.BoolVarP(&s.Debug, \"debug\", \"d\", false, \"Enable debug mode\")\n"
    ));
    assert!(generated.contains(
        "\tfs.StringSliceVar(&s.Tags, \"tags\", []string{\"web\", \"api\"}, \"Tags for filtering\")\n"
    ));
    assert!(!generated.contains("secret"));
    assert!(!generated.contains("IgnoredConfig"));
}

#[test]
fn test_explicit_output_path() {
    let (temp_dir, input) = copy_fixture("server.go");
    let output = temp_dir.path().join("gen").join("flags_gen.go");

    flags_gen()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("-n")
        .assert()
        .success();

    assert!(output.exists());
    assert!(!temp_dir.path().join("server_flags.go").exists());
}

#[test]
fn test_stdout_output() {
    let (temp_dir, input) = copy_fixture("server.go");

    flags_gen()
        .arg("-i")
        .arg(&input)
        .arg("--stdout")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "// Code generated by flags-gen. DO NOT EDIT.",
        ))
        .stdout(predicate::str::contains("Generated flags code").not());

    assert!(!temp_dir.path().join("server_flags.go").exists());
}

#[test]
fn test_grouped_declarations_with_duration() {
    let (_temp_dir, input) = copy_fixture("operator.go");

    let output = flags_gen()
        .arg("-i")
        .arg(&input)
        .arg("--stdout")
        .output()
        .unwrap();
    assert!(output.status.success());
    let generated = String::from_utf8(output.stdout).unwrap();

    assert!(generated.contains("package options\n"));
    assert!(generated.contains("import (\n\t\"time\"\n\n\t\"github.com/spf13/pflag\"\n)\n"));
    assert!(generated.contains(
        "\tfs.StringVar(&o.WatchNamespace, \"watch-namespace\", \"\", \"Namespace to watch, empty for all namespaces\")\n"
    ));
    assert!(generated.contains(
        "\tfs.DurationVar(&o.ResyncPeriod, \"resync-period\", 10*time.Minute, \"How often every object is reconciled\")\n"
    ));
    assert!(generated.contains("\"max-concurrent-reconciles\", 4,"));
    assert!(generated.contains("fs.Float32Var(&o.KubeAPIQPS, \"kube-apiqps\", 20,"));
    assert!(generated.contains(
        "\tfs.BoolVar(&o.LeaderElection, \"leader-election\", false, \"Enable leader election\")\n"
    ));

    let operator = generated.find("func (o *OperatorOptions)").unwrap();
    let metrics = generated.find("func (m *MetricsOptions)").unwrap();
    assert!(operator < metrics);
    assert!(generated.contains(
        "[]string{\"/healthz\", \"/readyz\"}"
    ));
}

#[test]
fn test_json_format() {
    let (temp_dir, input) = copy_fixture("operator.go");

    flags_gen()
        .arg("-i")
        .arg(&input)
        .args(["--format", "json", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("operator_flags.json"));

    let content = fs::read_to_string(temp_dir.path().join("operator_flags.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    let structs = parsed.as_array().unwrap();

    assert_eq!(structs.len(), 2);
    assert_eq!(structs[0]["name"], "OperatorOptions");
    assert_eq!(structs[0]["fields"][0]["external_name"], "watchNamespace");
    assert_eq!(structs[0]["fields"][1]["default_literal"], "10*time.Minute");
    assert_eq!(structs[1]["name"], "MetricsOptions");
}

#[test]
fn test_generation_is_deterministic() {
    let (_temp_dir, input) = copy_fixture("operator.go");

    let run = || {
        flags_gen()
            .arg("-i")
            .arg(&input)
            .arg("--stdout")
            .output()
            .unwrap()
            .stdout
    };

    assert_eq!(run(), run());
}

// ============================================================================
// Failure tests
// ============================================================================

#[test]
fn test_no_annotated_structs_fails() {
    let (temp_dir, input) = copy_fixture("plain.go");

    flags_gen()
        .arg("-i")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no structs with +flags-gen annotation"));

    assert!(!temp_dir.path().join("plain_flags.go").exists());
}

#[test]
fn test_unsupported_field_type_fails() {
    let (temp_dir, input) = copy_fixture("unsupported.go");

    flags_gen()
        .arg("-i")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Lookup"));

    assert!(!temp_dir.path().join("unsupported_flags.go").exists());
}

#[test]
fn test_syntax_error_fails() {
    let (temp_dir, input) = copy_fixture("invalid.go");

    flags_gen()
        .arg("-i")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse input file"));

    assert!(!temp_dir.path().join("invalid_flags.go").exists());
}
