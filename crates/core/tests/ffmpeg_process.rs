//! FfmpegConverter against stand-in ffmpeg scripts.
//!
//! Everything runs inside one test: writing an executable while another test
//! thread forks can make the exec fail with ETXTBSY.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use mediaconv_core::{
    session::{ConversionSession, FormState},
    testing::RecordingPrompt,
    ConversionJob, Converter, ConverterConfig, ConverterError, FfmpegConverter,
};

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn converter(ffmpeg: PathBuf, ffprobe: PathBuf) -> FfmpegConverter {
    FfmpegConverter::new(ConverterConfig::with_paths(ffmpeg, ffprobe))
}

#[tokio::test]
async fn test_ffmpeg_invocation() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("clip.mov");
    fs::write(&input, b"fake movie").unwrap();

    // Records its arguments, emits progress, then writes the last argument
    let ok_ffmpeg = write_script(
        dir.path(),
        "ok-ffmpeg",
        r#"[ "$1" = "-version" ] && exit 0
printf '%s\n' "$@" > "$(dirname "$0")/args.txt"
echo "out_time_ms=1000000" >&2
echo "speed=2.0x" >&2
echo "progress=end" >&2
for last; do :; done
printf 'converted' > "$last""#,
    );
    let failing_ffmpeg = write_script(
        dir.path(),
        "bad-ffmpeg",
        r#"echo "out_time_ms=0" >&2
echo "clip.mov: Invalid data found when processing input" >&2
exit 1"#,
    );
    // Output that is not valid UTF-8, as ffmpeg prints for Latin-1 file names
    let latin1_ffmpeg = write_script(
        dir.path(),
        "latin1-ffmpeg",
        r#"printf 'warning: caf\351.mov has odd metadata\n' >&2
for last; do :; done
printf 'converted' > "$last""#,
    );
    let latin1_failing_ffmpeg = write_script(
        dir.path(),
        "latin1-bad-ffmpeg",
        r#"printf 'caf\351.mov: Invalid data found when processing input\n' >&2
exit 1"#,
    );
    let hanging_ffmpeg = write_script(dir.path(), "hanging-ffmpeg", "exec sleep 30");
    let ffprobe = write_script(
        dir.path(),
        "ffprobe",
        r#"echo '{"format":{"format_name":"mov,mp4,m4a","duration":"2.0","size":"10"},"streams":[]}'"#,
    );

    // Successful run: arguments, output and result
    let ok = converter(ok_ffmpeg, ffprobe.clone());
    let output = dir.path().join("clip.mp4");
    let result = ok
        .convert(ConversionJob::new(input.clone(), output.clone()))
        .await
        .unwrap();
    assert_eq!(result.output_path, output);
    assert_eq!(result.output_size_bytes, "converted".len() as u64);
    assert_eq!(result.input_format, "mov");
    assert_eq!(result.output_format, "mp4");

    let args = fs::read_to_string(dir.path().join("args.txt")).unwrap();
    let args: Vec<&str> = args.lines().collect();
    assert_eq!(args[0], "-y");
    assert_eq!(args[1], "-i");
    assert_eq!(args[2], input.to_str().unwrap());
    assert_eq!(args.last().copied(), Some(output.to_str().unwrap()));

    // Probe parses the stand-in ffprobe's JSON
    let info = ok.probe(&input).await.unwrap();
    assert_eq!(info.format, "mov");
    assert!((info.duration_secs - 2.0).abs() < 0.001);

    // Progress run: duration from ffprobe turns the position into a percentage
    let (tx, mut rx) = mpsc::channel(8);
    let progress_output = dir.path().join("clip.mkv");
    ok.convert_with_progress(ConversionJob::new(input.clone(), progress_output.clone()), tx)
        .await
        .unwrap();
    assert!(progress_output.exists());
    while let Ok(progress) = rx.try_recv() {
        assert!(progress.percent <= 100.0);
    }

    assert!(ok.validate().await.is_ok());

    // Failing run: exit status and captured output surface in the error
    let bad = converter(failing_ffmpeg, ffprobe.clone());
    let err = bad
        .convert(ConversionJob::new(input.clone(), dir.path().join("clip.webm")))
        .await
        .unwrap_err();
    match &err {
        ConverterError::ConversionFailed { reason, output } => {
            assert_eq!(reason, "FFmpeg exited with code 1");
            assert_eq!(
                output.as_deref(),
                Some("clip.mov: Invalid data found when processing input")
            );
        }
        other => panic!("expected ConversionFailed, got {:?}", other),
    }

    // Undecodable bytes in stderr neither abort a healthy run nor lose output
    let latin1 = converter(latin1_ffmpeg, ffprobe.clone());
    let latin1_output = dir.path().join("clip.wav");
    latin1
        .convert(ConversionJob::new(input.clone(), latin1_output.clone()))
        .await
        .unwrap();
    assert_eq!(fs::read(&latin1_output).unwrap(), b"converted");

    let latin1_bad = converter(latin1_failing_ffmpeg, ffprobe.clone());
    let err = latin1_bad
        .convert(ConversionJob::new(input.clone(), dir.path().join("clip.flv")))
        .await
        .unwrap_err();
    match &err {
        ConverterError::ConversionFailed { reason, output } => {
            assert_eq!(reason, "FFmpeg exited with code 1");
            assert_eq!(
                output.as_deref(),
                Some("caf\u{FFFD}.mov: Invalid data found when processing input")
            );
        }
        other => panic!("expected ConversionFailed, got {:?}", other),
    }
    assert!(err.user_message().contains("Invalid data found"));

    // A run past the configured timeout is killed
    let hanging = FfmpegConverter::new(
        ConverterConfig::with_paths(hanging_ffmpeg, ffprobe).with_timeout(1),
    );
    let started = Instant::now();
    let err = hanging
        .convert(ConversionJob::new(input.clone(), dir.path().join("clip.ogg")))
        .await
        .unwrap_err();
    let elapsed = started.elapsed();
    assert!(matches!(err, ConverterError::Timeout { timeout_secs: 1 }));
    assert!(elapsed >= Duration::from_millis(900));
    assert!(elapsed < Duration::from_secs(10));

    // The same failure through a session shows one failure dialog
    let prompt = RecordingPrompt::accepting();
    let session = ConversionSession::new(bad);
    let form = FormState::new(false).select_file(&input).select_format("avi");
    let outcome = session.attempt(&form, &prompt).await;
    assert!(!outcome.is_converted());
    assert!(prompt.infos().is_empty());
    let errors = prompt.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].1.contains("Invalid data found"));
}
