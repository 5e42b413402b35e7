use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Run the binary inside `dir`, isolated from any local config file
fn mediaconv(dir: &Path, args: &[&str], envs: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_mediaconv"));
    cmd.args(args)
        .current_dir(dir)
        .env_remove("MEDIACONV_CONFIG")
        .env("RUST_LOG", "error"); // Quiet logs during tests
    for (key, value) in envs {
        cmd.env(key, value);
    }
    cmd.output().expect("Failed to run mediaconv")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_formats_for_video_include_audio() {
    let dir = TempDir::new().unwrap();
    let output = mediaconv(dir.path(), &["formats", "/a/b/clip.MOV"], &[]);

    assert!(output.status.success());
    let formats: Vec<String> = stdout(&output).lines().map(str::to_string).collect();
    assert_eq!(
        formats,
        vec![
            "mp4", "avi", "mkv", "mov", "webm", "flv", "mp3", "wav", "ogg", "flac", "aac", "m4a"
        ]
    );
    assert!(stderr(&output).contains("video"));
}

#[test]
fn test_formats_for_unknown_file_fail() {
    let dir = TempDir::new().unwrap();
    let output = mediaconv(dir.path(), &["formats", "notes.txt"], &[]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_convert_rejects_unsupported_input() {
    let dir = TempDir::new().unwrap();
    let output = mediaconv(dir.path(), &["convert", "notes.txt", "--to", "mp4"], &[]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Error: Unsupported input type"));
}

#[test]
fn test_convert_rejects_format_outside_category() {
    let dir = TempDir::new().unwrap();
    let output = mediaconv(dir.path(), &["convert", "song.mp3", "--to", "png"], &[]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Cannot convert audio to png"));
}

#[test]
fn test_convert_reports_missing_ffmpeg() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("clip.mov"), b"fake movie").unwrap();
    let missing = dir.path().join("no-such-ffmpeg");

    let output = mediaconv(
        dir.path(),
        &["convert", "clip.mov", "--to", "mp4"],
        &[("MEDIACONV_CONVERTER__FFMPEG_PATH", missing.to_str().unwrap())],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("FFmpeg Error"));
    assert!(!stdout(&output).contains("Success"));
    assert!(!dir.path().join("clip.mp4").exists());
}

#[test]
fn test_declined_overwrite_keeps_existing_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("clip.mov"), b"fake movie").unwrap();
    std::fs::write(dir.path().join("clip.mp4"), b"keep me").unwrap();
    let missing = dir.path().join("no-such-ffmpeg");

    // stdin is closed, which answers the overwrite question with "no"
    let output = mediaconv(
        dir.path(),
        &["convert", "clip.mov", "--to", "mp4"],
        &[("MEDIACONV_CONVERTER__FFMPEG_PATH", missing.to_str().unwrap())],
    );

    assert!(output.status.success());
    assert!(stderr(&output).contains("already exists"));
    assert!(!stderr(&output).contains("FFmpeg Error"));
    assert_eq!(std::fs::read(dir.path().join("clip.mp4")).unwrap(), b"keep me");
}

#[test]
fn test_config_file_is_picked_up() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("mediaconv.toml"),
        "[converter]\nffmpeg_path = \"/opt/ffmpeg/bin/ffmpeg\"\n",
    )
    .unwrap();

    let output = mediaconv(dir.path(), &["config"], &[]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("ffmpeg_path = \"/opt/ffmpeg/bin/ffmpeg\""));
    assert!(text.contains("confirm_overwrite = true"));
}

#[test]
fn test_invalid_config_is_fatal() {
    let dir = TempDir::new().unwrap();
    let output = mediaconv(
        dir.path(),
        &["config"],
        &[("MEDIACONV_CONVERTER__FFMPEG_LOG_LEVEL", "loud")],
    );

    assert_eq!(output.status.code(), Some(1));
}
