//! Pod assignment through a --config file

mod helpers;

use helpers::{Fixtures, MOQUERY};
use predicates::prelude::*;

const ENDPOINT: &str = "   303        eth1/5                 vlan-623        10.204.85.130\n";

#[test]
fn test_custom_pod_bands() {
    let fx = Fixtures::new();
    let moquery = fx.arg("moquery.txt", MOQUERY);
    let endpoint = fx.arg("ep.txt", ENDPOINT);
    let config = fx.arg(
        "config.toml",
        r#"
[pods]
default = "pod-9"

[[pods.bands]]
min = 300
max = 310
pod = "pod-5"
"#,
    );

    assert_cmd::cargo_bin_cmd!("vlancheck")
        .args([
            "-m",
            &moquery,
            "-e",
            &format!("{}=VLAN623", endpoint),
            "--config",
            &config,
            "--csv",
            "-",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "623,EPG-VLAN623,pod-5/paths-303/pathep-[eth1/5]",
        ));
}

#[test]
fn test_default_pod_for_unbanded_node() {
    let fx = Fixtures::new();
    let moquery = fx.arg("moquery.txt", MOQUERY);
    let endpoint = fx.arg(
        "ep.txt",
        "   512        eth1/7                 vlan-623        10.204.85.150\n",
    );
    let config = fx.arg("config.toml", "[pods]\ndefault = \"pod-3\"\n");

    assert_cmd::cargo_bin_cmd!("vlancheck")
        .args([
            "-m",
            &moquery,
            "-e",
            &format!("{}=VLAN623", endpoint),
            "-c",
            &config,
            "--csv",
            "-",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "623,EPG-VLAN623,pod-3/paths-512/pathep-[eth1/7]",
        ));
}

#[test]
fn test_invalid_band_is_rejected() {
    let fx = Fixtures::new();
    let moquery = fx.arg("moquery.txt", MOQUERY);
    let endpoint = fx.arg("ep.txt", ENDPOINT);
    let config = fx.arg(
        "config.toml",
        "[[pods.bands]]\nmin = 400\nmax = 300\npod = \"pod-1\"\n",
    );

    assert_cmd::cargo_bin_cmd!("vlancheck")
        .args([
            "-m",
            &moquery,
            "-e",
            &format!("{}=VLAN623", endpoint),
            "--config",
            &config,
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid pod band"));
}

#[test]
fn test_malformed_config_is_rejected() {
    let fx = Fixtures::new();
    let moquery = fx.arg("moquery.txt", MOQUERY);
    let endpoint = fx.arg("ep.txt", ENDPOINT);
    let config = fx.arg("config.toml", "[pods\n");

    assert_cmd::cargo_bin_cmd!("vlancheck")
        .args([
            "-m",
            &moquery,
            "-e",
            &format!("{}=VLAN623", endpoint),
            "--config",
            &config,
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config file"));
}
