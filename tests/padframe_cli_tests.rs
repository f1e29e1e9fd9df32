#![cfg(feature = "png")]

use std::fs;
use std::process::Command;

use image::{Rgb, RgbImage};

fn setup() -> (&'static str, tempfile::TempDir) {
    let binary = env!("CARGO_BIN_EXE_padframe");
    let tmp_dir = tempfile::tempdir_in(env!("CARGO_TARGET_TMPDIR")).unwrap();
    (binary, tmp_dir)
}

#[test]
fn test_cli_writes_report_and_images() {
    let (binary, tmp_dir) = setup();
    let input = tmp_dir.path().join("in");
    let output = tmp_dir.path().join("out");
    fs::create_dir(&input).unwrap();
    RgbImage::from_pixel(500, 800, Rgb([50, 50, 50]))
        .save(input.join("tall.png"))
        .unwrap();

    let result = Command::new(binary)
        .arg(&input)
        .arg(&output)
        .args(["--max-width", "400", "--aspect", "1:1"])
        .output()
        .expect("padframe did not run");

    assert!(result.status.success());
    let stdout = String::from_utf8(result.stdout).unwrap();
    assert!(stdout.contains("tall.png"), "{stdout}");
    assert!(stdout.contains("1 processed, 0 skipped, 0 failed"), "{stdout}");
    let written = image::open(output.join("tall.png")).unwrap();
    assert_eq!((written.width(), written.height()), (400, 400));
}

#[test]
fn test_cli_exit_code_on_failed_image() {
    let (binary, tmp_dir) = setup();
    let input = tmp_dir.path().join("in");
    fs::create_dir(&input).unwrap();
    RgbImage::from_pixel(10, 10, Rgb([0, 0, 0]))
        .save(input.join("good.png"))
        .unwrap();
    fs::write(input.join("bad.png"), b"not a png").unwrap();

    let result = Command::new(binary)
        .arg(&input)
        .arg(tmp_dir.path().join("out"))
        .output()
        .expect("padframe did not run");

    assert_eq!(result.status.code(), Some(2));
    assert!(String::from_utf8(result.stdout).unwrap().contains("failed  bad.png"));
}

#[test]
fn test_cli_rejects_bad_aspect() {
    let (binary, tmp_dir) = setup();
    let input = tmp_dir.path().join("in");
    fs::create_dir(&input).unwrap();

    let result = Command::new(binary)
        .arg(&input)
        .arg(tmp_dir.path().join("out"))
        .args(["--aspect", "4:0"])
        .output()
        .expect("padframe did not run");

    assert!(!result.status.success());
}

#[test]
fn test_cli_empty_batch_is_an_error() {
    let (binary, tmp_dir) = setup();
    let input = tmp_dir.path().join("in");
    fs::create_dir(&input).unwrap();
    fs::write(input.join("broken.png"), b"garbage").unwrap();
    fs::write(input.join("notes.txt"), b"hello").unwrap();

    let result = Command::new(binary)
        .arg(&input)
        .arg(tmp_dir.path().join("out"))
        .env("RUST_LOG", "off")
        .output()
        .expect("padframe did not run");

    assert_eq!(result.status.code(), Some(1));
    let stderr = String::from_utf8(result.stderr).unwrap();
    assert!(stderr.contains("no readable images"), "{stderr}");
    // the files that were looked at are still reported
    let stdout = String::from_utf8(result.stdout).unwrap();
    assert!(stdout.contains("failed  broken.png"), "{stdout}");
    assert!(stdout.contains("skipped notes.txt"), "{stdout}");
    assert!(!tmp_dir.path().join("out").exists());
}
