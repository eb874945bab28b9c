//! Integration tests for nbpack-cli.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use predicates::prelude::*;
use std::fs;
use std::fs::File;
use std::path::Path;
use tempfile::TempDir;

fn nbpack_cmd() -> Command {
    cargo_bin_cmd!("nbpack")
}

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Creates `<temp>/echo` with a manifest, sources and some excluded paths.
fn plugin(temp: &TempDir) -> std::path::PathBuf {
    let src = temp.path().join("echo");
    write(&src, "manifest.json", r#"{"id":"echo","version":"1.0.0"}"#);
    write(&src, "index.js", "export default {};");
    write(&src, "lib/util.js", "export const x = 1;");
    write(&src, "node_modules/dep/index.js", "dep");
    write(&src, "dist/bundle.js", "bundle");
    write(&src, "temp/scratch.txt", "scratch");
    src
}

fn entry_names(package: &Path) -> Vec<String> {
    let mut archive = tar::Archive::new(GzDecoder::new(File::open(package).unwrap()));
    archive
        .entries()
        .unwrap()
        .map(|e| e.unwrap().path().unwrap().to_string_lossy().into_owned())
        .collect()
}

fn pack(src: &Path, out: &Path) {
    nbpack_cmd()
        .arg("pack")
        .arg("--src")
        .arg(src)
        .arg("--out")
        .arg(out)
        .assert()
        .success();
}

#[test]
fn test_version_flag() {
    nbpack_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("nbpack"));
}

#[test]
fn test_pack_help() {
    nbpack_cmd()
        .arg("pack")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--src"))
        .stdout(predicate::str::contains("--exclude"));
}

#[test]
fn test_pack_creates_package() {
    let temp = TempDir::new().unwrap();
    let src = plugin(&temp);
    let out = temp.path().join("build/nested/echo.nbp");

    nbpack_cmd()
        .arg("pack")
        .arg("--src")
        .arg(&src)
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Plugin packed:"))
        .stdout(predicate::str::contains("echo.nbp"));

    assert_eq!(
        entry_names(&out),
        ["index.js", "lib/util.js", "manifest.json", "temp/scratch.txt"]
    );
}

#[test]
fn test_pack_extra_excludes() {
    let temp = TempDir::new().unwrap();
    let src = plugin(&temp);
    let out = temp.path().join("echo.nbp");

    nbpack_cmd()
        .args(["pack", "--exclude", "temp", "-x", "lib", "--src"])
        .arg(&src)
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    assert_eq!(entry_names(&out), ["index.js", "manifest.json"]);
}

#[test]
fn test_pack_missing_manifest_fails() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("empty");
    fs::create_dir(&src).unwrap();
    let out = temp.path().join("out/echo.nbp");

    nbpack_cmd()
        .arg("pack")
        .arg("--src")
        .arg(&src)
        .arg("--out")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("manifest.json not found"))
        .stderr(predicate::str::contains("HINT"));

    assert!(!out.exists());
}

#[test]
fn test_pack_refuses_to_overwrite_manifest() {
    let temp = TempDir::new().unwrap();
    let src = plugin(&temp);
    let manifest = src.join("manifest.json");

    nbpack_cmd()
        .arg("pack")
        .arg("--src")
        .arg(&src)
        .arg("--out")
        .arg(&manifest)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"))
        .stderr(predicate::str::contains("HINT"));

    assert_eq!(
        fs::read_to_string(&manifest).unwrap(),
        r#"{"id":"echo","version":"1.0.0"}"#
    );
}

#[test]
fn test_pack_missing_source_fails() {
    let temp = TempDir::new().unwrap();

    nbpack_cmd()
        .arg("pack")
        .arg("--src")
        .arg(temp.path().join("nope"))
        .arg("--out")
        .arg(temp.path().join("echo.nbp"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_pack_invalid_level_rejected() {
    nbpack_cmd()
        .args(["pack", "--src", ".", "--out", "x.nbp", "-l", "0"])
        .assert()
        .failure();
}

#[test]
fn test_pack_reproducible_is_byte_identical() {
    let temp = TempDir::new().unwrap();
    let src = plugin(&temp);
    let first = temp.path().join("first.nbp");
    let second = temp.path().join("second.nbp");

    for out in [&first, &second] {
        nbpack_cmd()
            .args(["pack", "--reproducible", "--src"])
            .arg(&src)
            .arg("--out")
            .arg(out)
            .assert()
            .success();
    }

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn test_pack_json_output() {
    let temp = TempDir::new().unwrap();
    let src = plugin(&temp);
    let out = temp.path().join("echo.nbp");

    let output = nbpack_cmd()
        .args(["--json", "pack", "--src"])
        .arg(&src)
        .arg("--out")
        .arg(&out)
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["operation"], "pack");
    assert_eq!(json["status"], "success");
    assert_eq!(json["data"]["files_added"], 4);
    assert_eq!(json["data"]["entries"][0], "index.js");
}

#[test]
fn test_pack_json_error() {
    let temp = TempDir::new().unwrap();

    let output = nbpack_cmd()
        .args(["--json", "pack", "--src"])
        .arg(temp.path().join("nope"))
        .arg("--out")
        .arg(temp.path().join("echo.nbp"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["status"], "error");
    assert!(json["error"].as_str().unwrap().contains("does not exist"));
}

#[test]
fn test_pack_quiet_prints_nothing() {
    let temp = TempDir::new().unwrap();
    let src = plugin(&temp);

    nbpack_cmd()
        .args(["-q", "pack", "--src"])
        .arg(&src)
        .arg("--out")
        .arg(temp.path().join("echo.nbp"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_list_short_and_long() {
    let temp = TempDir::new().unwrap();
    let src = plugin(&temp);
    let out = temp.path().join("echo.nbp");
    pack(&src, &out);

    nbpack_cmd()
        .arg("list")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("lib/util.js"))
        .stdout(predicate::str::contains("node_modules").not());

    nbpack_cmd()
        .args(["list", "--long", "-H"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 4 entries"));
}

#[test]
fn test_list_invalid_package() {
    let temp = TempDir::new().unwrap();
    let bogus = temp.path().join("bogus.nbp");
    fs::write(&bogus, "not a package").unwrap();

    nbpack_cmd()
        .arg("list")
        .arg(&bogus)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid package"));
}

#[test]
fn test_verify_packed_plugin_passes() {
    let temp = TempDir::new().unwrap();
    let src = plugin(&temp);
    let out = temp.path().join("echo.nbp");
    pack(&src, &out);

    nbpack_cmd()
        .arg("verify")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Package verification"))
        .stdout(predicate::str::contains("Plugin id: echo"));
}

#[test]
fn test_verify_without_manifest_fails() {
    let temp = TempDir::new().unwrap();
    let package = temp.path().join("broken.nbp");

    let mut builder = tar::Builder::new(GzEncoder::new(
        File::create(&package).unwrap(),
        Compression::default(),
    ));
    let mut header = tar::Header::new_gnu();
    header.set_size(1);
    header.set_entry_type(tar::EntryType::Regular);
    builder
        .append_data(&mut header, "index.js", &b"1"[..])
        .unwrap();
    builder.into_inner().unwrap().finish().unwrap();

    nbpack_cmd()
        .arg("verify")
        .arg(&package)
        .assert()
        .failure()
        .stdout(predicate::str::contains("manifest.json not found"));
}

#[test]
fn test_completion_bash() {
    nbpack_cmd()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nbpack"));
}
