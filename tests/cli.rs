use chrono::Local;

use std::{fs, process::Command};

fn orders() -> Command {
    Command::new(env!("CARGO_BIN_EXE_orders"))
}

#[test]
fn binary_exits_1_without_path() {
    let output = orders().output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("Error: No path to sales data CSV file provided."));
}

#[test]
fn binary_exits_1_for_empty_path() {
    let output = orders().arg("").output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("Error: No path to sales data CSV file provided."));
}

#[test]
fn binary_exits_1_for_missing_file_and_creates_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let output = orders()
        .arg(tmp.path().join("missing.csv"))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("Error: The provided path does not exist or is not a file."));
    assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[test]
fn binary_reports_output_dir_on_success() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("sales.csv");
    fs::copy("testdata/orders.csv", &input).unwrap();
    let output = orders().arg(&input).output().unwrap();
    assert!(output.status.success());

    let dir = tmp.path().join(format!(
        "Orders_{}",
        Local::now().date_naive().format("%Y-%m-%d")
    ));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim_end(),
        format!("Excel files have been generated in {}", dir.display())
    );
    assert!(dir.join("Order_1002.xlsx").is_file());
}

#[test]
fn binary_exits_nonzero_for_bad_data() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("sales.csv");
    fs::copy("testdata/orders_bad_price.csv", &input).unwrap();
    let output = orders().arg(&input).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("sales.csv"));
}
