//! CLI tests - run the symcat binary against descriptor fixtures.

use assert_cmd::Command;
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// symcat with config isolated to `home`.
fn symcat(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("symcat").unwrap();
    cmd.env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("NO_COLOR", "1")
        .env_remove("SYMCAT_LOG")
        .arg("--root")
        .arg(home.path());
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("failed to execute symcat");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn activations_compact() {
    let home = TempDir::new().unwrap();
    let output = symcat(&home)
        .args(["extract", "--category", "activations", "--compact"])
        .arg(fixture("activations.yaml"))
        .output()
        .unwrap();
    assert!(output.status.success());
    insta::assert_snapshot!(String::from_utf8_lossy(&output.stdout).trim_end(), @r"
    keras.activations 2.4.0 [activations] 2 records
    fn relu(x, alpha=0.0, max_value=None, threshold=0)
    fn softmax(x, axis=-1)
    ");
}

#[test]
fn initializer_classes_json() {
    let home = TempDir::new().unwrap();
    let catalog = stdout_json(
        symcat(&home)
            .args(["extract", "--classes", "--json"])
            .arg(fixture("initializers.json")),
    );

    assert_eq!(catalog["namespace"], "keras.initializers");
    let records = catalog["records"].as_array().unwrap();
    let names: Vec<_> = records.iter().map(|r| r["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["Initializer", "RandomUniform", "Zeros"]);

    let initializer = &records[0];
    assert_eq!(initializer["abstract"], true);
    assert_eq!(initializer["arguments"], Value::Null);
    assert_eq!(initializer["inputs"], Value::Null);

    let uniform = &records[1];
    assert_eq!(uniform["aliases"], serde_json::json!(["random_uniform", "uniform"]));
    assert_eq!(uniform["arguments"][0]["name"], "self");
    assert_eq!(uniform["arguments"][3]["default"], "None");

    let zeros = &records[2];
    assert_eq!(zeros["base"], "Initializer");
    assert_eq!(zeros["file"], "keras/initializers.py");
    assert_eq!(zeros["aliases"], serde_json::json!(["zeros"]));
    assert_eq!(zeros["inputs"][2]["default"], "None");
}

#[test]
fn patches_and_output_file() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("initializers.json");
    symcat(&home)
        .args(["extract", "--classes", "--patch", "Zeros+=zeros_init", "-o"])
        .arg(&out)
        .arg(fixture("initializers.json"))
        .assert()
        .success();

    let records: Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(records.as_array().unwrap().len(), 3);
    assert_eq!(records[2]["aliases"], serde_json::json!(["zeros", "zeros_init"]));
}

#[test]
fn jq_filter() {
    let home = TempDir::new().unwrap();
    let output = symcat(&home)
        .args(["extract", "--functions", "--jq", ".records[].name"])
        .arg(fixture("activations.yaml"))
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "\"relu\"\n\"softmax\"\n");
}

#[test]
fn invalid_jq_filter_fails() {
    let home = TempDir::new().unwrap();
    let output = symcat(&home)
        .args(["extract", "--functions", "--jq", ".records["])
        .arg(fixture("activations.yaml"))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("error: jq parse error"));
}

#[test]
fn output_file_is_json_whatever_the_format() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("activations.json");
    let output = symcat(&home)
        .args(["extract", "--functions", "--jq", ".records[].name", "-o"])
        .arg(&out)
        .arg(fixture("activations.yaml"))
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--jq is ignored"));

    let records: Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(records[0]["name"], "relu");
    assert_eq!(records[1]["name"], "softmax");
}

#[test]
fn scan_reports_skipped_bindings() {
    let home = TempDir::new().unwrap();
    let report = stdout_json(
        symcat(&home)
            .args(["scan", "--json"])
            .arg(fixture("initializers.json")),
    );
    let entries = report["entries"].as_array().unwrap();
    let get = entries.iter().find(|e| e["name"] == "get").unwrap();
    assert_eq!(get["skipped"], "helper");
    let backend = entries.iter().find(|e| e["name"] == "backend").unwrap();
    assert_eq!(backend["skipped"], "namespace");
    let zeros = entries.iter().find(|e| e["name"] == "zeros").unwrap();
    assert_eq!(zeros["kind"], "class");
    assert!(zeros.get("skipped").is_none());
}

#[test]
fn project_config_defines_categories_and_rules() {
    let home = TempDir::new().unwrap();
    std::fs::create_dir_all(home.path().join(".symcat")).unwrap();
    std::fs::write(
        home.path().join(".symcat/config.toml"),
        r#"
[rules]
abstract_classes = []

[output]
format = "json"

[[categories]]
name = "inits"
strategy = "classes"
description = "Initializers, nothing abstract"
"#,
    )
    .unwrap();

    let catalog = stdout_json(
        symcat(&home)
            .args(["extract", "--category", "inits"])
            .arg(fixture("initializers.json")),
    );
    assert_eq!(catalog["category"], "inits");
    assert_eq!(catalog["records"][0]["name"], "Initializer");
    assert_eq!(catalog["records"][0]["abstract"], false);

    let list = stdout_json(symcat(&home).arg("categories"));
    let names: Vec<_> = list["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect();
    assert!(names.contains(&"inits".to_string()));
    assert!(names.contains(&"regularizers".to_string()));
}

#[test]
fn unknown_category_fails() {
    let home = TempDir::new().unwrap();
    symcat(&home)
        .args(["extract", "--category", "losses"])
        .arg(fixture("activations.yaml"))
        .assert()
        .failure()
        .code(1);
}

#[test]
fn missing_descriptor_fails() {
    let home = TempDir::new().unwrap();
    let output = symcat(&home)
        .args(["extract", "--functions", "/nonexistent/ns.json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("error: failed to load"));
}
