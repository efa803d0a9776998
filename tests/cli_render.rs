//! CLI integration tests for `dotart render` and `dotart styles`
//!
//! These tests run the binary against images written to a temp directory and
//! check exit codes and output image dimensions.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use image::{Rgba, RgbaImage};
use tempfile::TempDir;

/// Get the path to the dotart binary
fn dotart_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_dotart"))
}

/// Write a `width x height` checkerboard PNG into `dir`
fn write_input(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let image = RgbaImage::from_fn(width, height, |x, y| {
        if (x / 4 + y / 4) % 2 == 0 {
            Rgba([0, 0, 0, 255])
        } else {
            Rgba([255, 255, 255, 255])
        }
    });
    let path = dir.join(name);
    image.save(&path).expect("Failed to write input image");
    path
}

/// Get image dimensions from a PNG file
fn get_image_dimensions(path: &Path) -> (u32, u32) {
    let img = image::open(path).expect("Failed to open output image");
    (img.width(), img.height())
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(dotart_binary())
        .current_dir(dir)
        .args(args)
        .arg("--no-config")
        .output()
        .expect("Failed to execute dotart")
}

#[test]
fn test_render_default_output_path() {
    let temp = TempDir::new().unwrap();
    write_input(temp.path(), "board.png", 20, 12);

    let output = run(temp.path(), &["render", "board.png", "--style", "circle"]);
    assert!(output.status.success(), "Render failed: {}", String::from_utf8_lossy(&output.stderr));

    // Default cell size 8: 3x2 cells rendered at full size
    let expected = temp.path().join("board_circle.png");
    assert_eq!(get_image_dimensions(&expected), (24, 16));
}

#[test]
fn test_render_explicit_output_and_scale() {
    let temp = TempDir::new().unwrap();
    write_input(temp.path(), "board.png", 16, 16);

    let output = run(
        temp.path(),
        &["render", "board.png", "-o", "out/art.png", "--cell-size", "4", "--scale", "2"],
    );
    assert!(output.status.success(), "Render failed: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(get_image_dimensions(&temp.path().join("out/art.png")), (32, 32));
}

#[test]
fn test_render_output_directory() {
    let temp = TempDir::new().unwrap();
    write_input(temp.path(), "board.png", 8, 8);

    let output = run(temp.path(), &["render", "board.png", "-o", "renders/", "-s", "ascii"]);
    assert!(output.status.success(), "Render failed: {}", String::from_utf8_lossy(&output.stderr));
    assert!(temp.path().join("renders/board_ascii.png").exists());
}

#[test]
fn test_render_canvas_and_dots() {
    let temp = TempDir::new().unwrap();
    write_input(temp.path(), "wide.png", 40, 10);

    let output =
        run(temp.path(), &["render", "wide.png", "--canvas", "64", "--dots", "16", "-o", "a.png"]);
    assert!(output.status.success(), "Render failed: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(get_image_dimensions(&temp.path().join("a.png")), (64, 64));
}

#[test]
fn test_unknown_style_is_invalid_args() {
    let temp = TempDir::new().unwrap();
    write_input(temp.path(), "board.png", 8, 8);

    let output = run(temp.path(), &["render", "board.png", "--style", "circel"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Did you mean 'circle'?"), "stderr: {}", stderr);
}

#[test]
fn test_missing_input_is_invalid_args() {
    let temp = TempDir::new().unwrap();
    let output = run(temp.path(), &["render", "nope.png"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_corrupt_input_is_error() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("bad.png"), b"\x89PNG\r\n\x1a\nnot really").unwrap();

    let output = run(temp.path(), &["render", "bad.png"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!temp.path().join("bad_pixel.png").exists());
}

#[test]
fn test_config_defaults_apply() {
    let temp = TempDir::new().unwrap();
    write_input(temp.path(), "board.png", 12, 12);
    fs::write(temp.path().join("dotart.toml"), "[defaults]\nstyle = \"square\"\ncell_size = 5\n")
        .unwrap();

    let output = Command::new(dotart_binary())
        .current_dir(temp.path())
        .args(["render", "board.png"])
        .output()
        .expect("Failed to execute dotart");
    assert!(output.status.success(), "Render failed: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(get_image_dimensions(&temp.path().join("board_square.png")), (15, 15));
}

#[test]
fn test_invalid_config_is_error() {
    let temp = TempDir::new().unwrap();
    write_input(temp.path(), "board.png", 8, 8);
    fs::write(temp.path().join("dotart.toml"), "[defaults]\nsparkle = true\n").unwrap();

    let output = Command::new(dotart_binary())
        .current_dir(temp.path())
        .args(["render", "board.png"])
        .output()
        .expect("Failed to execute dotart");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_styles_lists_every_style() {
    let output = Command::new(dotart_binary()).arg("styles").output().expect("Failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in ["pixel", "circle", "square", "diamond", "ascii"] {
        assert!(stdout.contains(name), "missing {} in {}", name, stdout);
    }
}
