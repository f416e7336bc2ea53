//! Integration tests driving the recordkeep binary

use serde_json::Value;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn recordkeep(data: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_recordkeep"))
        .arg("--data")
        .arg(data)
        .args(["--delay-ms", "0"])
        .args(args)
        .env("RUST_LOG", "off")
        .env_remove("RECORDKEEP_CONFIG")
        .env_remove("RECORDKEEP_PROFILE")
        .output()
        .expect("failed to run recordkeep")
}

fn json_of(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be a JSON envelope")
}

#[test]
fn test_seed_process_list() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("items.json");

    let seeded = recordkeep(&data, &["seed", "3"]);
    assert!(seeded.status.success());
    assert_eq!(json_of(&seeded)["count"], 3);

    let processed = recordkeep(&data, &["process"]);
    assert!(processed.status.success());
    let envelope = json_of(&processed);
    assert_eq!(envelope["operation"], "process_all");
    assert_eq!(envelope["count"], 3);
    assert!(envelope["meta"]["run_id"].is_string());

    let listed = json_of(&recordkeep(&data, &["list"]));
    let items = listed["data"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert!(items.iter().all(|i| i["status"] == "PROCESSED"));
}

#[test]
fn test_process_report_includes_skips() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("items.json");
    recordkeep(&data, &["seed", "2"]);

    let output = recordkeep(&data, &["process", "--report"]);
    let envelope = json_of(&output);

    assert_eq!(envelope["data"]["total"], 2);
    assert_eq!(envelope["data"]["processed"].as_array().unwrap().len(), 2);
    assert!(envelope["data"]["skipped"].as_array().unwrap().is_empty());
}

#[test]
fn test_crud_round() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("items.json");

    let created = recordkeep(
        &data,
        &[
            "create",
            "--name",
            "Widget",
            "--description",
            "Blue",
            "--email",
            "widget@email.com",
        ],
    );
    assert!(created.status.success());
    assert_eq!(json_of(&created)["data"]["id"], 1);

    let updated = recordkeep(&data, &["update", "1", "--status", "ARCHIVED"]);
    assert_eq!(json_of(&updated)["data"]["status"], "ARCHIVED");

    let fetched = json_of(&recordkeep(&data, &["get", "1"]));
    assert_eq!(fetched["data"]["name"], "Widget");
    assert_eq!(fetched["data"]["status"], "ARCHIVED");

    assert!(recordkeep(&data, &["delete", "1"]).status.success());
    let missing = recordkeep(&data, &["get", "1"]);
    assert!(!missing.status.success());
    assert_eq!(json_of(&missing)["success"], false);
}

#[test]
fn test_invalid_email_is_rejected() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("items.json");

    let output = recordkeep(
        &data,
        &["create", "--name", "Widget", "--email", "widget.email.com"],
    );

    assert!(!output.status.success());
    let envelope = json_of(&output);
    assert!(
        envelope["data"]["error"]
            .as_str()
            .unwrap()
            .contains("Validation error")
    );
    assert!(!data.exists());
}

#[test]
fn test_text_output() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("items.json");
    recordkeep(&data, &["seed", "1"]);

    let output = recordkeep(&data, &["--output-format", "text", "get", "1"]);
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert!(stdout.starts_with("✓ get_item"));
    assert!(stdout.contains("#1\tItem1\titem1@email.com\tNEW"));
}

#[test]
fn test_config_file_is_honored() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("from-config.json");
    let config = temp.path().join("recordkeep.yaml");
    std::fs::write(
        &config,
        format!(
            "profile: custom\nprocessing_delay_ms: 0\ndata_path: {}\n",
            data.display()
        ),
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_recordkeep"))
        .arg("--config")
        .arg(&config)
        .args(["seed", "2"])
        .env("RUST_LOG", "off")
        .env_remove("RECORDKEEP_DATA")
        .env_remove("RECORDKEEP_PROFILE")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(data.exists());
}

#[test]
fn test_unknown_profile_fails() {
    let temp = TempDir::new().unwrap();
    let output = recordkeep(
        &temp.path().join("items.json"),
        &["--profile", "warp-speed", "list"],
    );
    assert!(!output.status.success());
}

#[test]
fn test_ignored_profile_is_reported_on_stderr() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("items.json");
    let config = temp.path().join("recordkeep.yaml");
    std::fs::write(
        &config,
        format!("processing_delay_ms: 0\ndata_path: {}\n", data.display()),
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_recordkeep"))
        .arg("--config")
        .arg(&config)
        .args(["--profile", "minimal", "list"])
        .env("RUST_LOG", "warn")
        .env_remove("RECORDKEEP_DATA")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8(output.stderr.clone()).unwrap();
    assert!(stderr.contains("Ignoring profile 'minimal'"));
    // stdout stays a clean envelope
    assert_eq!(json_of(&output)["operation"], "list_items");
}

#[test]
fn test_create_reports_validation_notes() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("items.json");

    let output = recordkeep(
        &data,
        &["create", "--name", "Widget", "--email", "widget@email.com"],
    );
    assert!(output.status.success());

    let envelope = json_of(&output);
    assert_eq!(envelope["data"]["id"], 1);
    assert_eq!(
        envelope["warnings"],
        serde_json::json!(["description: Description is empty"])
    );
}
