//! End-to-end tests running the `glyph-widths` binary.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../tests/fonts")
        .join(name)
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_glyph-widths"))
        .args(args)
        .output()
        .expect("failed to run glyph-widths")
}

#[test]
fn test_prints_json_for_font() {
    let font = fixture("DejaVuSans.ttf");
    let output = run(&[font.to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("{\n  \" \": "));
    assert!(stdout.ends_with("\n}\n"));

    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value.as_object().unwrap().len(), 95);
}

#[test]
fn test_output_is_stable_across_runs() {
    let font = fixture("DejaVuSansMono.ttf");
    let first = run(&[font.to_str().unwrap(), "--size", "12"]);
    let second = run(&[font.to_str().unwrap(), "--size", "12"]);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_size_flag_changes_widths() {
    let font = fixture("DejaVuSansMono.ttf");
    let output = run(&[font.to_str().unwrap(), "-s", "24"]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    // 1233 units at 2048 per em
    assert_eq!(value["a"].as_f64().unwrap(), 1233.0 * 24.0 / 2048.0);
}

#[test]
fn test_round_flag() {
    let font = fixture("DejaVuSans.ttf");
    let output = run(&[font.to_str().unwrap(), "--round"]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    for (key, width) in value.as_object().unwrap() {
        let width = width.as_f64().unwrap();
        assert_eq!(width, width.round(), "{:?}", key);
    }
}

#[test]
fn test_missing_font_fails_without_output() {
    let output = run(&["/nonexistent/dir/NoSuchFont-8c1f.ttf"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Font not found"));
}

#[test]
fn test_invalid_font_fails_without_output() {
    // Cargo.toml is not a font
    let manifest = Path::new(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");
    let output = run(&[manifest.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_non_positive_size_rejected() {
    let font = fixture("DejaVuSans.ttf");
    let output = run(&[font.to_str().unwrap(), "--size=0"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_missing_glyph_fails_without_output() {
    let font = fixture("NoAdvances.ttf");
    let output = run(&[font.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("No glyph or .notdef advance"));
}
