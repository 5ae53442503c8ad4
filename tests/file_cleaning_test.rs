//! File Cleaning Tests
//!
//! Runs the cleaner against real files in a temp directory:
//! - output naming and overwrite behavior
//! - verbose vs. quiet output on a realistic slicer excerpt
//! - non-UTF-8 comments and line-ending variants
//! - failure paths (missing input, malformed numbers)

use std::fs;
use std::path::Path;

use gcode_clean::{CleanOptions, Error, clean_output_path, load_and_rewrite};
use tempfile::TempDir;

// ============================================================================
// Helper Functions
// ============================================================================

const SLICED_LAYER: &str = "\
; layer 1, Z = 0.3
G1 Z0.3 F600
G1 X10 Y10 E0.5
G1 X20 Y10 E1.0
G1 X30 Y10 E1.5
G1 X40 Y10 E2.0
G1 X40 Y20 E2.5
G1 X40 Y20.01 E2.5005
G1 X40 Y30 E3.0
; infill
G1 X41 Y31 E3.05
G1 X42 Y32 E3.10
G1 X43 Y33 E3.15
M107
";

fn write_input(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write input");
    path
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).expect("read output")
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn quiet_mode_writes_clean_sibling_file() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_input(&dir, "layer.gcode", SLICED_LAYER);

    let report = load_and_rewrite(&input, CleanOptions::default()).expect("clean");

    assert_eq!(report.output, dir.path().join("layer.clean.gcode"));
    // X40 Y20 sits on the line from X40 Y10 to X40 Y20.01, so the whole
    // vertical edge collapses to its endpoints.
    assert_eq!(
        read(&report.output),
        "\
; layer 1, Z = 0.3
G1 Z0.3 F600
G1 X10 Y10 E0.5
G1 X40 Y10 E2.0
G1 X40 Y30 E3.0
; infill
G1 X41 Y31 E3.05
G1 X43 Y33 E3.15
M107
"
    );
    assert_eq!(report.stats.lines_read, 14);
    assert_eq!(report.stats.motion_commands, 10);
    assert_eq!(report.stats.removed, 5);
    assert_eq!(report.stats.lines_written, 9);
}

#[test]
fn verbose_mode_keeps_removed_lines_as_comments() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_input(&dir, "layer.gcode", SLICED_LAYER);

    let report = load_and_rewrite(&input, CleanOptions { verbose: true }).expect("clean");
    let output = read(&report.output);
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines.len(), 14);
    assert_eq!(lines[3], ";G1 X20 Y10 E1.0 ratio=0.50 error=0.00 (straight line)");
    assert_eq!(lines[4], ";G1 X30 Y10 E1.5 ratio=0.67 error=0.00 (straight line)");
    assert!(lines[6].starts_with(";G1 X40 Y20 E2.5 ratio=1.00"), "{}", lines[6]);
    assert!(lines[7].starts_with(";G1 X40 Y20.01 E2.5005 ratio=0.50"), "{}", lines[7]);
    assert!(lines[11].starts_with(";G1 X42 Y32 E3.10 ratio=0.50"), "{}", lines[11]);

    // Every other line is untouched.
    let input_lines: Vec<&str> = SLICED_LAYER.lines().collect();
    for (i, (got, want)) in lines.iter().zip(&input_lines).enumerate() {
        if !got.starts_with(";G1") {
            assert_eq!(got, want, "line {i}");
        }
    }
}

#[test]
fn cleaning_the_clean_file_changes_nothing() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_input(&dir, "layer.gcode", SLICED_LAYER);
    let first = load_and_rewrite(&input, CleanOptions::default()).expect("first pass");

    let second = load_and_rewrite(&first.output, CleanOptions::default()).expect("second pass");

    assert_eq!(second.output, dir.path().join("layer.clean.clean.gcode"));
    assert_eq!(read(&first.output), read(&second.output));
    assert_eq!(second.stats.removed, 0);
}

#[test]
fn existing_output_is_overwritten() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_input(&dir, "part.gcode", "G28\nG1 X0 Y0 E0\n");
    let stale = clean_output_path(&input);
    fs::write(&stale, "stale contents that are much longer than the new output\n")
        .expect("write stale output");

    load_and_rewrite(&input, CleanOptions::default()).expect("clean");

    assert_eq!(read(&stale), "G28\nG1 X0 Y0 E0\n");
}

#[test]
fn crlf_input_is_written_with_plain_newlines() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_input(&dir, "win.gcode", "G1 X0 Y0 E0\r\nG1 X1 Y0 E1\r\nG1 X2 Y0 E2\r\n");

    let report = load_and_rewrite(&input, CleanOptions::default()).expect("clean");

    assert_eq!(read(&report.output), "G1 X0 Y0 E0\nG1 X2 Y0 E2\n");
}

#[test]
fn latin1_comments_are_copied_byte_for_byte() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("latin1.gcode");
    fs::write(&input, b"; bed 60\xB0C\nG1 X0 Y0 E0\nG1 X5 Y0 E1\nG1 X10 Y0 E2\n; fin \xE9\n")
        .expect("write input");

    let report = load_and_rewrite(&input, CleanOptions::default()).expect("clean");

    assert_eq!(
        fs::read(&report.output).expect("read output"),
        b"; bed 60\xB0C\nG1 X0 Y0 E0\nG1 X10 Y0 E2\n; fin \xE9\n"
    );
    assert_eq!(report.stats.removed, 1);
}

#[test]
fn old_mac_line_endings_are_split() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_input(&dir, "mac.gcode", "G1 X0 Y0 E0\rG1 X1 Y0 E1\rG1 X2 Y0 E2\r");

    let report = load_and_rewrite(&input, CleanOptions::default()).expect("clean");

    assert_eq!(read(&report.output), "G1 X0 Y0 E0\nG1 X2 Y0 E2\n");
}

#[test]
fn missing_input_creates_no_output() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("absent.gcode");

    let err = load_and_rewrite(&input, CleanOptions::default()).expect_err("must fail");

    assert!(matches!(err, Error::InputNotFound(ref p) if p == &input));
    assert!(!clean_output_path(&input).exists());
}

#[test]
fn malformed_number_fails_the_whole_file() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_input(&dir, "bad.gcode", "G28\nG1 X0 Y0 E0\nG1 X1 Y-- E1\nM107\n");

    let err = load_and_rewrite(&input, CleanOptions::default()).expect_err("must fail");

    match err {
        Error::MalformedNumber { line, text, .. } => {
            assert_eq!(line, 3);
            assert_eq!(text, "--");
        }
        other => panic!("expected malformed number, got {other:?}"),
    }
}
