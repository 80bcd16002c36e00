//! End-to-end tests for the sheaf binary.

use assert_cmd::Command;
use predicates::prelude::*;

// 2x3 RGB PNG, built by hand: signature, IHDR, one zlib IDAT, IEND.
const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x03, 0x08, 0x02, 0x00, 0x00, 0x00, 0x36,
    0x88, 0x49, 0xD6, 0x00, 0x00, 0x00, 0x10, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x10,
    0x50, 0x30, 0x00, 0x22, 0x06, 0x14, 0x0A, 0x00, 0x16, 0xF5, 0x02, 0x41, 0x14, 0x0C, 0x4F,
    0xF9, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

#[test]
fn no_args_shows_usage() {
    Command::cargo_bin("sheaf")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn convert_produces_a_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("page.png");
    let output = dir.path().join("result.pdf");
    std::fs::write(&input, TINY_PNG).unwrap();

    Command::cargo_bin("sheaf")
        .unwrap()
        .args([
            "convert",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "--fit",
            "default",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 1 pages"));

    let bytes = std::fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn convert_rejects_unsupported_type() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("anim.gif");
    std::fs::write(&input, b"GIF89a").unwrap();

    Command::cargo_bin("sheaf")
        .unwrap()
        .args(["convert", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported file type"));
}

#[test]
fn convert_rejects_missing_input() {
    Command::cargo_bin("sheaf")
        .unwrap()
        .args(["convert", "/definitely/not/here.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
