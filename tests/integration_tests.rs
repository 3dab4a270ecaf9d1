//! Integration tests for the ckit CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const LIGHT_KIT: &str = "\
2,Battery,AA,1.5,3.1
4,Light Globe,warm,6.5,240,3.5
14,Wire,60,3.2
1,Switch,push,4.5,4.6
";

const SENSOR_KIT: &str = "\
1,Solar Panel,1.4,0.4,14.00
1,Sensor,motion,5,3.9
1,Buzzer,240,90,4,120,5.6
1,Switch,toggle,4.5,4.6
5,Wire,40,2.4
";

/// Helper to get a ckit command isolated from the user's config
fn ckit() -> Command {
    let mut cmd = Command::cargo_bin("ckit").unwrap();
    cmd.env("CKIT_CONFIG", "/nonexistent/ckit/config.yaml")
        .env_remove("CKIT_KIT")
        .env_remove("CKIT_FORMAT")
        .env_remove("CKIT_SKIP_ERRORS")
        .env_remove("RUST_LOG");
    cmd
}

/// Helper to write a CSV file into a temp directory
fn write_csv(tmp: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = tmp.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    ckit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("circuit kits"));
}

#[test]
fn test_version_displays() {
    ckit()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ckit"));
}

#[test]
fn test_unknown_command_fails() {
    ckit()
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

// ============================================================================
// Check Command Tests
// ============================================================================

#[test]
fn test_check_complete_light_kit() {
    let tmp = TempDir::new().unwrap();
    let path = write_csv(&tmp, "light.csv", LIGHT_KIT);

    ckit()
        .arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "21 Piece Light Circuit, with 2 AA Batterys, 4 Warm Light Globes & Push Switch",
        ))
        .stdout(predicate::str::contains("$69.60"))
        .stdout(predicate::str::contains("yes"));
}

#[test]
fn test_check_detail_lists_lines() {
    let tmp = TempDir::new().unwrap();
    let path = write_csv(&tmp, "light.csv", LIGHT_KIT);

    ckit()
        .args(["check", "--detail"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("6.5V 240.0mA Warm Light Globe $3.50"))
        .stdout(predicate::str::contains("$44.80"));
}

#[test]
fn test_check_incomplete_kit_reports_violation() {
    let tmp = TempDir::new().unwrap();
    let path = write_csv(&tmp, "short.csv", &LIGHT_KIT.replace("14,Wire", "3,Wire"));

    ckit()
        .arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("no"))
        .stdout(predicate::str::contains(
            "needs at least as many wires as other components (3 < 7)",
        ));
}

#[test]
fn test_check_strict_fails_incomplete_kit() {
    let tmp = TempDir::new().unwrap();
    let path = write_csv(&tmp, "short.csv", &LIGHT_KIT.replace("14,Wire", "3,Wire"));

    ckit()
        .args(["check", "--strict"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Light Circuit is not complete"));
}

#[test]
fn test_check_sensor_kit() {
    let tmp = TempDir::new().unwrap();
    let path = write_csv(&tmp, "sensor.csv", SENSOR_KIT);

    ckit()
        .args(["check", "--strict", "--kit", "sensor"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "9 Piece Sensor Circuit, with 1 Solar Panel, Motion Sensor Buzzer & Toggle Switch",
        ));
}

#[test]
fn test_check_kit_from_environment() {
    let tmp = TempDir::new().unwrap();
    let path = write_csv(&tmp, "sensor.csv", SENSOR_KIT);

    ckit()
        .env("CKIT_KIT", "sensor")
        .args(["check", "--strict"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Piece Sensor Circuit"));
}

#[test]
fn test_check_kit_from_config_file() {
    let tmp = TempDir::new().unwrap();
    let path = write_csv(&tmp, "sensor.csv", SENSOR_KIT);
    let config = tmp.path().join("config.yaml");
    fs::write(&config, "default_kit: sensor\n").unwrap();

    ckit()
        .env("CKIT_CONFIG", &config)
        .arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Piece Sensor Circuit"));
}

#[test]
fn test_check_bad_row_fails_without_skip() {
    let tmp = TempDir::new().unwrap();
    let contents = format!("{}1,Unicycle,red,9.99\n", LIGHT_KIT);
    let path = write_csv(&tmp, "bad.csv", &contents);

    ckit()
        .arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Row 5"))
        .stderr(predicate::str::contains("Unknown component type: 'Unicycle'"));
}

#[test]
fn test_check_bad_row_skipped() {
    let tmp = TempDir::new().unwrap();
    let contents = format!("{}1,Unicycle,red,9.99\n", LIGHT_KIT);
    let path = write_csv(&tmp, "bad.csv", &contents);

    ckit()
        .args(["check", "--skip-errors", "--strict"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("21 Piece Light Circuit"));
}

#[test]
fn test_check_missing_file() {
    ckit()
        .args(["check", "/nonexistent/kit.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_check_json_output() {
    let tmp = TempDir::new().unwrap();
    let path = write_csv(&tmp, "light.csv", LIGHT_KIT);

    let output = ckit()
        .args(["check", "--format", "json"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["kit"], "Light Circuit");
    assert_eq!(report["complete"], true);
    assert_eq!(report["total_count"], 21);
    assert_eq!(report["lines"].as_array().unwrap().len(), 4);
    assert_eq!(report["lines"][0]["component"]["type"], "battery");
    assert!(report["violations"].as_array().unwrap().is_empty());
}

#[test]
fn test_check_json_lists_violations() {
    let tmp = TempDir::new().unwrap();
    let contents = LIGHT_KIT.replace("1,Switch,push,4.5,4.6\n", "");
    let path = write_csv(&tmp, "noswitch.csv", &contents);

    let output = ckit()
        .args(["check", "-f", "json"])
        .arg(&path)
        .output()
        .unwrap();

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["complete"], false);
    assert_eq!(report["violations"][0]["rule"], "missing_switch");
}

#[test]
fn test_check_csv_output_is_canonical() {
    let tmp = TempDir::new().unwrap();
    let path = write_csv(&tmp, "light.csv", &LIGHT_KIT.replace("Wire", "wire"));

    ckit()
        .args(["check", "--format", "csv"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("2,Battery,AA,1.5,3.10"))
        .stdout(predicate::str::contains("14,Wire,60,3.20"));
}

// ============================================================================
// Parse Command Tests
// ============================================================================

#[test]
fn test_parse_lowercase_tag() {
    ckit()
        .args(["parse", "17,wire,40,2.4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("17 x 40mm Wire $2.40"))
        .stdout(predicate::str::contains("17,Wire,40,2.40"));
}

#[test]
fn test_parse_reports_wattage() {
    ckit()
        .args(["parse", "1,Solar Panel,5,200,14"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wattage: 1.000W"));
}

#[test]
fn test_parse_unknown_type_fails() {
    ckit()
        .args(["parse", "1,Unicycle,1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown component type"));
}

#[test]
fn test_parse_malformed_number_fails() {
    ckit()
        .args(["parse", "1,Battery,AA,high,3.1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("voltage"));
}

#[test]
fn test_parse_json() {
    let output = ckit()
        .args(["parse", "--format", "json", "4,LED Light,red,3,150,2.2"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["quantity"], 4);
    assert_eq!(value["component"]["kind"], "led");
    assert_eq!(value["display"], "3.0V 150.0mA Red LED Light $2.20");
}

#[test]
fn test_parse_csv_quotes_text_with_commas() {
    ckit()
        .args(["parse", "--format", "csv", "1,Sensor,\"dust, fine\",5,3.9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1,Sensor,\"dust, fine\",5,3.90"));
}

#[test]
fn test_parse_format_from_environment() {
    let output = ckit()
        .env("CKIT_FORMAT", "json")
        .args(["parse", "17,wire,40,2.4"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["display"], "40mm Wire $2.40");
}

#[test]
fn test_check_invalid_utf8_row_is_skipped() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("bytes.csv");
    let mut contents = LIGHT_KIT.as_bytes().to_vec();
    contents.extend_from_slice(b"1,Sensor,mo");
    contents.extend_from_slice(&[0xff, 0xfe]);
    contents.extend_from_slice(b"tion,5,3.9\n");
    fs::write(&path, contents).unwrap();

    ckit()
        .args(["check", "--skip-errors", "--strict"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("21 Piece Light Circuit"))
        .stderr(predicate::str::contains("not valid UTF-8"));
}

// ============================================================================
// Template Command Tests
// ============================================================================

#[test]
fn test_template_round_trips_through_check() {
    let tmp = TempDir::new().unwrap();

    for kit in ["light", "sensor"] {
        let output = ckit().args(["template", kit]).output().unwrap();
        assert!(output.status.success());

        let path = write_csv(
            &tmp,
            &format!("{}.csv", kit),
            &String::from_utf8(output.stdout).unwrap(),
        );

        ckit()
            .args(["check", "--strict", "--kit", kit])
            .arg(&path)
            .assert()
            .success();
    }
}

#[test]
fn test_template_invalid_kit() {
    ckit()
        .args(["template", "robot"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid kit type"));
}

#[test]
fn test_completions_bash() {
    ckit()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ckit"));
}
