//! End-to-end tests for the `emdia` binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `emdia` with an isolated config directory and a fixed date
fn emdia(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("emdia").unwrap();
    cmd.env("EMDIA_CONFIG_DIR", config_dir.path())
        .env_remove("EMDIA_CONFIG")
        .env_remove("RUST_LOG")
        .args(["--today", "2024-03-09"]);
    cmd
}

#[test]
fn test_billing_list_by_status() {
    let dir = TempDir::new().unwrap();

    emdia(&dir)
        .args(["billing", "list", "--status", "overdue"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pedro Costa"))
        .stdout(predicate::str::contains("Maria Santos").not())
        .stdout(predicate::str::contains("1 charges"));

    emdia(&dir)
        .args(["billing", "list", "--status", "bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid status"));
}

#[test]
fn test_billing_summary() {
    let dir = TempDir::new().unwrap();

    emdia(&dir)
        .args(["billing", "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Overdue:"))
        .stdout(predicate::str::contains("R$ 3.750,00"));
}

#[test]
fn test_remind_overdue_charge() {
    let dir = TempDir::new().unwrap();

    emdia(&dir)
        .args(["billing", "remind", "bil-3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reminder sent!"))
        .stdout(predicate::str::contains("Charge sent to Pedro Costa via WhatsApp"));
}

#[test]
fn test_remind_paid_charge_fails() {
    let dir = TempDir::new().unwrap();

    emdia(&dir)
        .args(["billing", "remind", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already paid"));
}

#[test]
fn test_receipt_for_paid_charge() {
    let dir = TempDir::new().unwrap();

    emdia(&dir)
        .args(["billing", "receipt", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Receipt sent!"))
        .stdout(predicate::str::contains("Payment confirmation sent to"));

    let config = dir.path().join("no-receipts.json");
    std::fs::write(&config, r#"{"notifications":{"send_receipts":false}}"#).unwrap();

    emdia(&dir)
        .arg("--config")
        .arg(&config)
        .args(["billing", "receipt", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Receipts are disabled"));
}

#[test]
fn test_message_render() {
    let dir = TempDir::new().unwrap();

    emdia(&dir)
        .args(["message", "render", "Confirmação de Pagamento", "--billing", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Olá Maria Santos"))
        .stdout(predicate::str::contains("R$ 1.200,00"));

    emdia(&dir)
        .args(["message", "render", "tpl-3", "--set", "nome=Ana"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Olá Ana, notamos"))
        .stdout(predicate::str::contains("{valor}"));

    emdia(&dir)
        .args(["message", "render", "tpl-3", "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Unresolved placeholders: nome, valor, vencimento",
        ));
}

#[test]
fn test_export_csv_to_stdout() {
    let dir = TempDir::new().unwrap();

    emdia(&dir)
        .args(["export", "csv", "--status", "paid"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "id,tenant,property,amount,due_date,status,payment_date,reminder_sent",
        ))
        .stdout(predicate::str::contains("João Silva"))
        .stdout(predicate::str::contains("Pedro Costa").not());
}

#[test]
fn test_snapshot_seeds_session() {
    let dir = TempDir::new().unwrap();
    let snapshot = dir.path().join("snapshot.yaml");

    emdia(&dir)
        .args(["tenant", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Maria Santos"));

    emdia(&dir)
        .arg("export")
        .arg("yaml")
        .arg("--output")
        .arg(&snapshot)
        .assert()
        .success();
    assert!(snapshot.exists());

    emdia(&dir)
        .arg("--data")
        .arg(&snapshot)
        .args(["billing", "show", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ana"))
        .stdout(predicate::str::contains("Scheduled"));
}

#[test]
fn test_dashboard() {
    let dir = TempDir::new().unwrap();

    emdia(&dir)
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Dashboard (09/03/2024)"))
        .stdout(predicate::str::contains("Recent payments"));
}

#[test]
fn test_config_init_and_show() {
    let dir = TempDir::new().unwrap();

    emdia(&dir)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default settings"));
    assert!(dir.path().join("config.json").exists());

    emdia(&dir)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    emdia(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(loaded)"))
        .stdout(predicate::str::contains("Placeholders:     verbatim"));
}

#[test]
fn test_yaml_config_file() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("emdia.yaml");
    std::fs::write(&config, "whatsapp:\n  use_whatsapp: false\n").unwrap();

    emdia(&dir)
        .arg("--config")
        .arg(&config)
        .args(["billing", "remind", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("WhatsApp is disabled"));
}

#[test]
fn test_shell_keeps_one_session() {
    let dir = TempDir::new().unwrap();

    emdia(&dir)
        .arg("shell")
        .write_stdin("billing remind 4\nbilling show 4\nbilling remind 4\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Reminder sent!"))
        .stdout(predicate::str::contains("Reminder: sent"))
        .stderr(predicate::str::contains("Reminder already sent for bil-4"));
}

#[test]
fn test_bad_date_format_is_reported() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        r#"{"display":{"date_format":"%Q"}}"#,
    )
    .unwrap();

    emdia(&dir)
        .args(["billing", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid date format"));

    let dir = TempDir::new().unwrap();
    emdia(&dir)
        .arg("shell")
        .write_stdin("settings set display.date_format %H:%M\nbilling list\nexit\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("time or time zone fields"))
        .stdout(predicate::str::contains("Pedro Costa"));
}
