use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn recibo(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("recibo").unwrap();
    cmd.env("XDG_CONFIG_HOME", dir.join("config"))
        .env_remove("RECIBO_DATA_DIR")
        .arg("--data-dir")
        .arg(dir.join("data"));
    cmd
}

fn stored(dir: &Path) -> Vec<Value> {
    let raw = fs::read_to_string(dir.join("data").join("receipts.json")).unwrap();
    serde_json::from_str(&raw).unwrap()
}

fn create(dir: &Path, args: &[&str]) -> Value {
    let output = recibo(dir)
        .arg("new")
        .args(args)
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn new_saves_receipt_with_default_item() {
    let dir = TempDir::new().unwrap();

    let receipt = create(dir.path(), &["--client", "Maria Silva"]);

    assert_eq!(receipt["client"]["name"], "Maria Silva");
    assert_eq!(receipt["serviceType"], "Serviços Gerais");
    assert_eq!(receipt["items"][0]["ref"], "ITEM-001");
    assert_eq!(receipt["total"], 150);

    let saved = stored(dir.path());
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0]["receiptNumber"], receipt["receiptNumber"]);
}

#[test]
fn new_with_items_and_negative_extra() {
    let dir = TempDir::new().unwrap();

    let receipt = create(
        dir.path(),
        &[
            "--client",
            "João",
            "--item",
            "Bainha=40",
            "--item",
            "ITEM-050=Zíper=20",
            "--extra=-10",
        ],
    );

    let items = receipt["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["ref"], "ITEM-001");
    assert_eq!(items[0]["description"], "Bainha");
    assert_eq!(items[1]["ref"], "ITEM-050");
    assert_eq!(receipt["extraValue"], -10);
    assert_eq!(receipt["total"], 50);
}

#[test]
fn list_filters_by_client() {
    let dir = TempDir::new().unwrap();
    create(dir.path(), &["--client", "Maria Silva"]);
    create(dir.path(), &["--client", "João Souza"]);

    recibo(dir.path())
        .args(["list", "maria"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Maria Silva"))
        .stdout(predicate::str::contains("João Souza").not())
        .stdout(predicate::str::contains("(deletable)"));

    recibo(dir.path())
        .args(["list", "ninguém"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No receipts found."));
}

#[test]
fn list_on_empty_store() {
    let dir = TempDir::new().unwrap();

    recibo(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No receipts found."));
}

#[test]
fn show_by_prefix() {
    let dir = TempDir::new().unwrap();
    let receipt = create(dir.path(), &["--client", "Ana"]);
    let number = receipt["receiptNumber"].as_str().unwrap();

    recibo(dir.path())
        .args(["show", &number[..8]])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cliente: Ana"))
        .stdout(predicate::str::contains("R$ 150,00"));

    recibo(dir.path())
        .args(["show", "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Receipt not found"));
}

#[test]
fn delete_requires_confirmation() {
    let dir = TempDir::new().unwrap();
    let receipt = create(dir.path(), &["--client", "Ana"]);
    let number = receipt["receiptNumber"].as_str().unwrap();

    recibo(dir.path())
        .args(["delete", number])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
    assert_eq!(stored(dir.path()).len(), 1);

    recibo(dir.path())
        .args(["delete", number, "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted receipt"));
    assert!(stored(dir.path()).is_empty());
}

#[test]
fn delete_refused_after_window() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(
        data.join("receipts.json"),
        r#"[{"receiptNumber":"old-receipt","client":{"name":"Ana"},"items":[],"createdAt":1000}]"#,
    )
    .unwrap();

    recibo(dir.path())
        .args(["delete", "old-receipt", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("can no longer be deleted"));
    assert_eq!(stored(dir.path()).len(), 1);
}

#[test]
fn export_csv() {
    let dir = TempDir::new().unwrap();
    create(dir.path(), &["--client", "Ana", "--item", "Bainha=40", "--item", "Zíper=20"]);

    recibo(dir.path())
        .args(["export", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("receipt_number,date,created_at"))
        .stdout(predicate::str::contains("Bainha"))
        .stdout(predicate::str::contains("Zíper"));
}

#[test]
fn config_path_and_init() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("recibo.json");

    recibo(dir.path())
        .args(["config", "init", "--output"])
        .arg(&config)
        .assert()
        .success();
    assert!(config.exists());

    recibo(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "policy.delete_window_secs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("300"));
}

#[test]
fn edit_replaces_in_place() {
    let dir = TempDir::new().unwrap();
    let receipt = create(dir.path(), &["--client", "Ana"]);
    let number = receipt["receiptNumber"].as_str().unwrap();

    recibo(dir.path())
        .args(["edit", number, "--client", "Ana Lima", "--item", "Vestido=300", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total\": 300"));

    let saved = stored(dir.path());
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0]["receiptNumber"], number);
    assert_eq!(saved[0]["client"]["name"], "Ana Lima");
    assert_eq!(saved[0]["createdAt"], receipt["createdAt"]);
}
