//! Integration tests for the DCA CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const BOM: &str = "\u{feff}";

/// Helper to get a dca command
fn dca() -> Command {
    Command::cargo_bin("dca").unwrap()
}

/// A dca command running in `tmp`, isolated from the user's config
fn dca_in(tmp: &TempDir) -> Command {
    let mut cmd = dca();
    cmd.current_dir(tmp.path())
        .env("HOME", tmp.path())
        .env("XDG_CONFIG_HOME", tmp.path().join(".config"))
        .env_remove("DCA_EXPORT_DIR")
        .env_remove("DCA_DEFAULT_FORMAT")
        .env_remove("DCA_NOTIFICATION_TIMEOUT_SECS")
        .env_remove("DCA_LOG");
    cmd
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    dca()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("catalog tables"));
}

#[test]
fn test_version_displays() {
    dca()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dca"));
}

#[test]
fn test_unknown_command_fails() {
    dca()
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_unknown_catalog_fails() {
    let tmp = TempDir::new().unwrap();
    dca_in(&tmp)
        .args(["list", "orders"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown catalog"));
}

// ============================================================================
// List Command Tests
// ============================================================================

#[test]
fn test_list_brands_shows_seed_data() {
    let tmp = TempDir::new().unwrap();
    dca_in(&tmp)
        .args(["list", "brand"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Guchi"))
        .stdout(predicate::str::contains("Prada"))
        .stdout(predicate::str::contains("Gloria Jeans"))
        .stdout(predicate::str::contains("3 brands found"));
}

#[test]
fn test_list_csv_has_record_keys_as_header() {
    let tmp = TempDir::new().unwrap();
    dca_in(&tmp)
        .args(["list", "brands", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "id,name,isActive,createdAt,updatedAt\n1,Guchi,true,",
        ));
}

#[test]
fn test_list_ids() {
    let tmp = TempDir::new().unwrap();
    dca_in(&tmp)
        .args(["list", "payment-type", "--format", "id"])
        .assert()
        .success()
        .stdout("1\n2\n3\n4\n");
}

#[test]
fn test_list_filters() {
    let tmp = TempDir::new().unwrap();
    dca_in(&tmp)
        .args(["list", "color", "--search", "NAVY", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"hexCode\": \"#1F2A44\""))
        .stdout(predicate::str::contains("Black").not());

    dca_in(&tmp)
        .args(["list", "size", "--active-only", "--format", "id"])
        .assert()
        .success()
        .stdout("1\n2\n3\n");
}

#[test]
fn test_list_point_csv_keeps_null_columns() {
    let tmp = TempDir::new().unwrap();
    dca_in(&tmp)
        .args(["list", "point", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "id,name,address,cityId,contractorId,latitude,longitude,isActive,createdAt,updatedAt\n",
        ))
        .stdout(predicate::str::contains("3,Abay Ave,Abay Ave 10,1,,,,false,"));
}

// ============================================================================
// Export Command Tests
// ============================================================================

#[test]
fn test_export_csv_to_file_has_bom() {
    let tmp = TempDir::new().unwrap();
    dca_in(&tmp)
        .args(["export", "brand", "--output", "out/brands.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 3 brands"));

    let content = fs::read_to_string(tmp.path().join("out/brands.csv")).unwrap();
    assert!(content.starts_with(BOM));
    assert!(content.contains("id,name,isActive,createdAt,updatedAt\n"));
    assert!(content.contains("3,Gloria Jeans,true,"));
}

#[test]
fn test_export_default_file_name_in_export_dir() {
    let tmp = TempDir::new().unwrap();
    dca_in(&tmp)
        .env("DCA_EXPORT_DIR", tmp.path().join("exports"))
        .args(["export", "measurement-unit", "--format", "xls"])
        .assert()
        .success();

    let names: Vec<String> = fs::read_dir(tmp.path().join("exports"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(names.len(), 1, "{:?}", names);
    assert!(names[0].starts_with("measurement_unit_"));
    assert!(names[0].ends_with(".xls"));
}

#[test]
fn test_export_xls_to_stdout() {
    let tmp = TempDir::new().unwrap();
    dca_in(&tmp)
        .args(["export", "brand", "--format", "xls", "--stdout"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "xmlns:x=\"urn:schemas-microsoft-com:office:excel\"",
        ))
        .stdout(predicate::str::contains("<th>isActive</th>"))
        .stdout(predicate::str::contains("<td>Gloria Jeans</td>"));
}

#[test]
fn test_export_config_default_format() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join(".dca")).unwrap();
    fs::write(tmp.path().join(".dca/config.yaml"), "default_format: xls\n").unwrap();

    dca_in(&tmp)
        .args(["export", "brand", "--stdout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<table"));
}

#[test]
fn test_export_empty_view_fails() {
    let tmp = TempDir::new().unwrap();
    dca_in(&tmp)
        .args(["export", "brand", "--search", "zzz", "--stdout"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to export"));
}

// ============================================================================
// Import Command Tests
// ============================================================================

#[test]
fn test_import_template() {
    let tmp = TempDir::new().unwrap();
    dca_in(&tmp)
        .args(["import", "point", "--template"])
        .assert()
        .success()
        .stdout("name,address,cityId,contractorId,latitude,longitude\n");
}

#[test]
fn test_import_appends_names() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("brands.csv");
    fs::write(&file, "Brand name,Country\nZara,ES\n  ,IT\n\"Dolce, Gabbana\",IT\n").unwrap();

    dca_in(&tmp)
        .args(["import", "brand"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 brands"))
        .stdout(predicate::str::contains("1 row(s) without a name skipped"))
        .stdout(predicate::str::contains("Dolce, Gabbana"));
}

#[test]
fn test_import_then_export() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("colors.csv");
    fs::write(&file, "name\nTeal\n").unwrap();

    dca_in(&tmp)
        .args(["--quiet", "import", "color"])
        .arg(&file)
        .args(["--export", "colors.csv"])
        .assert()
        .success();

    let content = fs::read_to_string(tmp.path().join("colors.csv")).unwrap();
    // imported rows get no hex code until edited
    assert!(content.contains("\n5,Teal,,true,"));
}

#[test]
fn test_import_without_rows_fails() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("empty.csv");
    fs::write(&file, "name\n").unwrap();

    dca_in(&tmp)
        .args(["import", "brand"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no rows with a name"));
}

#[test]
fn test_import_missing_file_fails() {
    let tmp = TempDir::new().unwrap();
    dca_in(&tmp)
        .args(["import", "brand", "nope.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

// ============================================================================
// Shell Tests
// ============================================================================

#[test]
fn test_shell_scripted_session() {
    let tmp = TempDir::new().unwrap();
    let script = format!(
        "delete 2\nconfirm\nnew\nset name Zara\nsubmit\nexport csv {}\nquit\nlist\n",
        tmp.path().join("brands.csv").display()
    );

    dca_in(&tmp)
        .args(["shell", "brand"])
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Brand \"Prada\" deleted"))
        .stdout(predicate::str::contains("Brand \"Zara\" created"))
        .stdout(predicate::str::contains("Exported 3 brands"));

    let content = fs::read_to_string(tmp.path().join("brands.csv")).unwrap();
    let body = content.strip_prefix(BOM).unwrap();
    let names: Vec<&str> = body
        .lines()
        .skip(1)
        .map(|l| l.split(',').nth(1).unwrap())
        .collect();
    assert_eq!(names, vec!["Guchi", "Gloria Jeans", "Zara"]);
}

#[test]
fn test_shell_validation_stays_in_form() {
    let tmp = TempDir::new().unwrap();
    dca_in(&tmp)
        .args(["shell", "color"])
        .write_stdin("new\nset name Teal\nset hexCode teal\nsubmit\nset hexCode #008080\nsubmit\nlist\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("hexCode"))
        .stdout(predicate::str::contains("Color \"Teal\" created"))
        .stdout(predicate::str::contains("#008080"));
}

#[test]
fn test_shell_script_file() {
    let tmp = TempDir::new().unwrap();
    let script = tmp.path().join("session.dca");
    fs::write(&script, "# deactivate Prada\ntoggle 2\nhelp\n").unwrap();

    dca_in(&tmp)
        .args(["shell", "brand", "--script"])
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Brand \"Prada\" deactivated"))
        .stdout(predicate::str::contains("Commands:"));
}

// ============================================================================
// Geocode and Stats Tests
// ============================================================================

#[test]
fn test_geocode_stub_returns_coordinates() {
    let tmp = TempDir::new().unwrap();
    dca_in(&tmp)
        .args(["geocode", "--json", "Abay", "Ave", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"latitude\": 43."))
        .stdout(predicate::str::contains("\"error\": null"));
}

#[test]
fn test_reverse_geocode_rejects_out_of_range() {
    let tmp = TempDir::new().unwrap();
    dca_in(&tmp)
        .args(["reverse-geocode", "95", "76.9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn test_stats_for_point() {
    let tmp = TempDir::new().unwrap();
    dca_in(&tmp)
        .args(["stats", "point", "1", "--seed", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dostyk Plaza"))
        .stdout(predicate::str::contains("Average check"));
}

#[test]
fn test_stats_for_missing_record() {
    let tmp = TempDir::new().unwrap();
    dca_in(&tmp)
        .args(["stats", "brand", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

// ============================================================================
// Config and Completions Tests
// ============================================================================

#[test]
fn test_config_show_env_override() {
    let tmp = TempDir::new().unwrap();
    dca_in(&tmp)
        .env("DCA_DEFAULT_FORMAT", "xls")
        .args(["config", "show", "default_format"])
        .assert()
        .success()
        .stdout("xls\n");
}

#[test]
fn test_config_set_writes_project_config() {
    let tmp = TempDir::new().unwrap();
    dca_in(&tmp)
        .args(["config", "set", "notification_timeout_secs", "8"])
        .assert()
        .success();

    dca_in(&tmp)
        .args(["config", "show", "notification_timeout_secs"])
        .assert()
        .success()
        .stdout("8\n");
}

#[test]
fn test_config_set_rejects_unknown_key() {
    let tmp = TempDir::new().unwrap();
    dca_in(&tmp)
        .args(["config", "set", "author", "me"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown key"));
}

#[test]
fn test_completions_bash() {
    dca()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dca"));
}
