use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::error::Error;
use tempfile::tempdir;

// Helper function to get the path to the compiled binary
fn vidtool_cmd() -> Command {
    let mut cmd = Command::cargo_bin("vidtool").expect("Failed to find vidtool binary");
    cmd.env_remove("VIDTOOL_FFMPEG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cut_dry_run_prints_command() -> Result<(), Box<dyn Error>> {
    vidtool_cmd()
        .args(["cut", "clip.mp4", "--start", "00:00:05", "--end", "00:00:10", "--dry-run"])
        .assert()
        .success()
        .stdout(contains("ffmpeg -hide_banner -y -ss 00:00:05 -to 00:00:10 -i clip.mp4"))
        .stdout(contains("clip-cut.mp4"))
        .stderr(contains("dry run"));
    Ok(())
}

#[test]
fn test_convert_dry_run_lists_every_input() -> Result<(), Box<dyn Error>> {
    vidtool_cmd()
        .args(["convert", "a.mov", "b.mov", "-e", "mkv", "--dry-run"])
        .assert()
        .success()
        .stdout(
            contains("-i a.mov -c:v copy -c:a copy a.mkv")
                .and(contains("-i b.mov -c:v copy -c:a copy b.mkv")),
        );
    Ok(())
}

#[test]
fn test_output_keeps_input_directory() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("clip.mp4");
    let expected = dir.path().join("clip-resized.mp4");

    vidtool_cmd()
        .arg("resize")
        .arg(&input)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(contains("scale_cuda=-1:640:interp_algo=lanczos"))
        .stdout(contains(expected.to_string_lossy().into_owned()));
    Ok(())
}

#[test]
fn test_json_format() -> Result<(), Box<dyn Error>> {
    let output = vidtool_cmd()
        .args(["slomo", "clip.mp4", "--rate-in", "60", "--dry-run", "--format", "json"])
        .output()?;
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["program"], "ffmpeg");
    let args = value["args"].as_array().expect("args array");
    assert!(args.iter().any(|a| a == "setpts=2.0*PTS"));
    assert_eq!(args.last().and_then(|a| a.as_str()), Some("clip-slow.mp4"));
    Ok(())
}

#[test]
fn test_ffmpeg_location_from_env() -> Result<(), Box<dyn Error>> {
    vidtool_cmd()
        .env("VIDTOOL_FFMPEG", "/opt/ffmpeg/bin/ffmpeg")
        .args(["silence", "clip.mp4", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("/opt/ffmpeg/bin/ffmpeg -hide_banner -y"))
        .stdout(contains("-an clip-noaudio.mp4"));
    Ok(())
}

#[test]
fn test_invalid_time_fails_before_running() -> Result<(), Box<dyn Error>> {
    vidtool_cmd()
        .args(["gif", "clip.mp4", "--start", "25:00:00", "--dry-run"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(contains("invalid value '25:00:00'"));
    Ok(())
}

#[test]
fn test_end_before_start_is_rejected() -> Result<(), Box<dyn Error>> {
    vidtool_cmd()
        .args(["cut", "clip.mp4", "--start", "00:01:00", "--end", "00:00:30", "--dry-run"])
        .assert()
        .code(2)
        .stderr(contains("Error:"));
    Ok(())
}

#[test]
fn test_reencode_name_with_several_inputs() -> Result<(), Box<dyn Error>> {
    vidtool_cmd()
        .args(["reencode", "a.mp4", "b.mp4", "--name", "out.mp4", "--dry-run"])
        .assert()
        .failure()
        .stderr(contains("--name"));
    Ok(())
}

#[test]
fn test_unknown_command_fails_with_usage() -> Result<(), Box<dyn Error>> {
    vidtool_cmd()
        .args(["frobnicate", "clip.mp4"])
        .assert()
        .failure()
        .stderr(contains("Unknown operation 'frobnicate'"))
        .stderr(contains("Usage:"));
    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<(), Box<dyn Error>> {
    vidtool_cmd()
        .assert()
        .failure()
        .stderr(contains("Usage:"))
        .stderr(contains("clipify"));
    Ok(())
}
