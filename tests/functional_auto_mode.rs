//! Auto mode runs of the CLI against a bulk endpoint dump

mod helpers;

use helpers::{Fixtures, BULK_ENDPOINTS, MOQUERY};
use predicates::prelude::*;

#[test]
fn test_auto_run_groups_by_vlan() {
    let fx = Fixtures::new();
    let moquery = fx.arg("moquery.txt", MOQUERY);
    let bulk = fx.arg("bulk.txt", BULK_ENDPOINTS);

    assert_cmd::cargo_bin_cmd!("vlancheck")
        .args(["-m", &moquery, "--mode", "auto", "--endpoints", &bulk])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Entry #1: VLAN 623 - VLAN623-10.204.85.128-27",
        ))
        .stdout(predicate::str::contains("Entry #2: VLAN 712 - VLAN712-WEB"))
        .stdout(predicate::str::contains("Entries validated: 2"))
        .stdout(predicate::str::contains("Paths checked: 3"));
}

#[test]
fn test_auto_run_csv_export() {
    let fx = Fixtures::new();
    let moquery = fx.arg("moquery.txt", MOQUERY);
    let bulk = fx.arg("bulk.txt", BULK_ENDPOINTS);

    let output = assert_cmd::cargo_bin_cmd!("vlancheck")
        .args([
            "-m", &moquery, "--mode", "auto", "--endpoints", &bulk, "--csv", "-",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    // Bulk rows carry no node mapping, so bare ports get the placeholder node
    assert_eq!(
        stdout,
        "VLAN,EPG,PATH\n\
         623,EPG-VLAN623-10.204.85.128-27,pod-2/paths-XXX/pathep-[eth1/5]\n\
         712,EPG-VLAN712-WEB,pod-2/protpaths-425-426/pathep-[425-426-VPC-31-32-PG]\n"
    );
    // The report moves to stderr
    assert!(stderr.contains("Validation Summary:"));
}

#[test]
fn test_auto_run_from_stdin_with_matrix() {
    let fx = Fixtures::new();
    let moquery = fx.arg("moquery.txt", MOQUERY);

    assert_cmd::cargo_bin_cmd!("vlancheck")
        .args(["-m", &moquery, "--mode", "auto", "--endpoints", "-", "--matrix"])
        .write_stdin(BULK_ENDPOINTS)
        .assert()
        .success()
        .stdout(predicate::str::contains("VLAN Validation Matrix:"))
        .stdout(predicate::str::contains("10.204.85.130"))
        .stdout(predicate::str::contains("NOK"));
}

#[test]
fn test_auto_run_without_endpoint_rows_fails() {
    let fx = Fixtures::new();
    let moquery = fx.arg("moquery.txt", MOQUERY);
    let bulk = fx.arg("bulk.txt", "apic1# show endpoints ip 10.0.0.1\nNo endpoints found.\n");

    assert_cmd::cargo_bin_cmd!("vlancheck")
        .args(["-m", &moquery, "--mode", "auto", "--endpoints", &bulk])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Unable to parse APIC endpoint data. Please check your input.",
        ));
}

#[test]
fn test_auto_mode_rejects_manual_entries() {
    let fx = Fixtures::new();
    let moquery = fx.arg("moquery.txt", MOQUERY);
    let bulk = fx.arg("bulk.txt", BULK_ENDPOINTS);

    assert_cmd::cargo_bin_cmd!("vlancheck")
        .args([
            "-m", &moquery, "--mode", "auto", "--endpoints", &bulk, "-e", "x.txt=VLAN623",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--entry is only used with --mode manual"));
}
