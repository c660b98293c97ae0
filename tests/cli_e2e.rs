//! End-to-end CLI tests for the bond binary.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[macro_use]
mod support;

/// Command with an isolated config home so a user config never leaks in.
fn bond(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("bond").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home).env_remove("RUST_LOG");
    cmd
}

fn write_feed(dir: &Path, base: &str) -> std::path::PathBuf {
    let feed = serde_json::json!({
        "versions": [
            {
                "version": "3.2.6",
                "production_release": true,
                "downloads": [
                    {"edition": "base", "target": "linux_x86_64", "arch": "x86_64",
                     "archive": {"url": format!("{base}/mongodb-linux-x86_64-3.2.6.tgz")}},
                    {"edition": "enterprise", "target": "rhel62", "arch": "x86_64",
                     "archive": {"url": format!("{base}/mongodb-linux-x86_64-enterprise-rhel62-3.2.6.tgz")}},
                    {"edition": "source", "target": "src", "arch": "x86_64",
                     "archive": {"url": format!("{base}/mongodb-src-r3.2.6.tgz")}}
                ]
            },
            {
                "version": "3.2.5",
                "downloads": [
                    {"edition": "base", "target": "linux_x86_64", "arch": "x86_64",
                     "archive": {"url": format!("{base}/mongodb-linux-x86_64-3.2.5.tgz")}}
                ]
            }
        ]
    });
    let path = dir.join("full.json");
    std::fs::write(&path, feed.to_string()).unwrap();
    path
}

fn install_build(root: &Path, name: &str) {
    let bin = root.join(name).join("bin");
    std::fs::create_dir_all(&bin).unwrap();
    for binary in bond_core::catalog::required_binaries() {
        std::fs::write(bin.join(binary), b"").unwrap();
    }
}

#[test]
fn test_binary_help_displays_usage() {
    let tempdir = TempDir::new().unwrap();
    bond(tempdir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Catalog and fetch MongoDB release builds"));
}

#[test]
fn test_binary_version_displays_version() {
    let tempdir = TempDir::new().unwrap();
    bond(tempdir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bond"));
}

#[test]
fn test_binary_invalid_flag_returns_error() {
    let tempdir = TempDir::new().unwrap();
    bond(tempdir.path())
        .arg("--invalid-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_version_command_classifies_release_candidate() {
    let tempdir = TempDir::new().unwrap();
    bond(tempdir.path())
        .args(["version", "3.2.6-rc0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("series=3.2"))
        .stdout(predicate::str::contains("release_candidate=true"))
        .stdout(predicate::str::contains("rc_number=0"));
}

#[test]
fn test_version_command_rejects_garbage() {
    let tempdir = TempDir::new().unwrap();
    bond(tempdir.path())
        .args(["version", "not-a-version"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not-a-version"));
}

#[test]
fn test_builds_command_lists_variants_for_series() {
    let tempdir = TempDir::new().unwrap();
    let feed = write_feed(tempdir.path(), "https://downloads.example.com");

    bond(tempdir.path())
        .args(["builds", "3.2", "--feed-file"])
        .arg(&feed)
        .assert()
        .success()
        .stdout(predicate::str::contains("3.2.6"))
        .stdout(predicate::str::contains("targets: linux_x86_64, rhel62"))
        .stdout(predicate::str::contains("editions: base, enterprise"))
        .stdout(predicate::str::contains("src").not());
}

#[test]
fn test_catalog_show_and_lookup() {
    let tempdir = TempDir::new().unwrap();
    let root = tempdir.path().join("builds");
    install_build(&root, "mongodb-linux-x86_64-3.2.6");
    std::fs::create_dir_all(root.join("mongodb-linux-x86_64-3.4.0")).unwrap();

    bond(tempdir.path())
        .args(["catalog", "show"])
        .arg(&root)
        .assert()
        .success()
        .stdout(predicate::str::contains("3.2.6"))
        .stdout(predicate::str::contains("invalid:"));

    install_build(&root, "mongodb-linux-x86_64-3.4.0");
    bond(tempdir.path())
        .args(["catalog", "lookup"])
        .arg(&root)
        .args([
            "--version", "3.2.6", "--edition", "base", "--target", "linux_x86_64", "--arch",
            "x86_64",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("mongodb-linux-x86_64-3.2.6"));
}

#[test]
fn test_catalog_lookup_missing_build_fails() {
    let tempdir = TempDir::new().unwrap();
    let root = tempdir.path().join("builds");
    install_build(&root, "mongodb-linux-x86_64-3.2.6");

    bond(tempdir.path())
        .args(["catalog", "lookup"])
        .arg(&root)
        .args([
            "--version", "3.4.0", "--edition", "base", "--target", "linux_x86_64", "--arch",
            "x86_64",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("3.4.0"));
}

#[test]
fn test_fetch_unknown_release_reports_aggregate() {
    let tempdir = TempDir::new().unwrap();
    let feed = write_feed(tempdir.path(), "https://downloads.example.com");

    bond(tempdir.path())
        .args(["fetch", "9.9.9", "8.8.8", "--arch", "x86_64", "--target", "linux"])
        .arg("--dir")
        .arg(tempdir.path().join("downloads"))
        .arg("--feed-file")
        .arg(&feed)
        .assert()
        .failure()
        .stderr(predicate::str::contains("problem fetching releases (2 errors)"))
        .stderr(predicate::str::contains("9.9.9"))
        .stderr(predicate::str::contains("8.8.8"));
}

#[test]
fn test_invalid_config_file_fails() {
    let tempdir = TempDir::new().unwrap();
    let config = tempdir.path().join("bond.toml");
    std::fs::write(&config, "workers = 0\n").unwrap();

    bond(tempdir.path())
        .args(["version", "3.2.6", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("workers"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_fetch_downloads_archives_from_feed_file() {
    let server = require_mock_server!();
    for version in ["3.2.6", "3.2.5"] {
        Mock::given(method("GET"))
            .and(path(format!("/mongodb-linux-x86_64-{version}.tgz")))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(version.as_bytes().to_vec()))
            .expect(1)
            .mount(&server)
            .await;
    }

    let tempdir = TempDir::new().unwrap();
    let feed = write_feed(tempdir.path(), &server.uri());
    let downloads = tempdir.path().join("downloads");

    let config_home = tempdir.path().to_path_buf();
    let dir = downloads.clone();
    tokio::task::spawn_blocking(move || {
        bond(&config_home)
            .args(["fetch", "3.2.6", "3.2.5", "--arch", "x86_64", "--target", "linux", "-w", "2"])
            .arg("--dir")
            .arg(&dir)
            .arg("--feed-file")
            .arg(&feed)
            .assert()
            .success()
            .stdout(predicate::str::contains("downloaded 2 archive(s)"));
    })
    .await
    .unwrap();

    assert_eq!(
        std::fs::read(downloads.join("mongodb-linux-x86_64-3.2.6.tgz")).unwrap(),
        b"3.2.6"
    );
    assert_eq!(
        std::fs::read(downloads.join("mongodb-linux-x86_64-3.2.5.tgz")).unwrap(),
        b"3.2.5"
    );
}
