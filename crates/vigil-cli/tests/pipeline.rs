//! Detection pipeline tests feeding canned measurement streams via stdin.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use assert_cmd::Command;
use serde_json::Value;

fn vigil() -> Command {
    let mut cmd = Command::cargo_bin("vigil").unwrap();
    cmd.env("XDG_CONFIG_HOME", "/nonexistent");
    cmd
}

/// Builds a JSONL stream of `n` samples at 0.1s intervals.
fn stream(n: usize, ear: f32, mar: f32) -> String {
    (0..n)
        .map(|i| {
            format!(
                "{{\"ear\":{ear},\"mar\":{mar},\"t\":{:.1}}}\n",
                0.1 * i as f64
            )
        })
        .collect()
}

fn events(stdout: &[u8]) -> Vec<Value> {
    String::from_utf8_lossy(stdout)
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).expect("event line is JSON"))
        .collect()
}

#[test]
fn test_sustained_closure_emits_one_drowsy() {
    let output = vigil()
        .args(["run", "--no-pipe"])
        .write_stdin(stream(25, 0.15, 0.3))
        .output()
        .unwrap();

    assert!(output.status.success());
    let events = events(&output.stdout);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["event"], "DROWSY");
    assert!((events[0]["t"].as_f64().unwrap() - 2.0).abs() < 1e-6);
    assert!((events[0]["ear"].as_f64().unwrap() - 0.15).abs() < 1e-6);
}

#[test]
fn test_open_eyes_emit_nothing() {
    let output = vigil()
        .args(["run", "--no-pipe"])
        .write_stdin(stream(50, 0.30, 0.3))
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(events(&output.stdout).is_empty());
}

#[test]
fn test_sustained_mouth_open_emits_yawn() {
    let output = vigil()
        .args(["run", "--no-pipe"])
        .write_stdin(stream(15, 0.30, 0.8))
        .output()
        .unwrap();

    assert!(output.status.success());
    let events = events(&output.stdout);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["event"], "YAWN");
    assert!((events[0]["t"].as_f64().unwrap() - 1.0).abs() < 1e-6);
}

#[test]
fn test_face_loss_resets_detection() {
    // 1.9s of closure, one face-lost frame, then 1.9s more: no event.
    let mut input = stream(19, 0.15, 0.3);
    input.push_str("{\"ear\":0.15,\"mar\":0.3,\"face_present\":false,\"t\":1.9}\n");
    for i in 0..19 {
        input.push_str(&format!(
            "{{\"ear\":0.15,\"mar\":0.3,\"t\":{:.1}}}\n",
            2.0 + 0.1 * f64::from(i)
        ));
    }

    let output = vigil()
        .args(["run", "--no-pipe"])
        .write_stdin(input)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(events(&output.stdout).is_empty());
}

#[test]
fn test_threshold_flags_apply() {
    // With a lowered EAR threshold, ear = 0.15 no longer counts as closed.
    let output = vigil()
        .args(["run", "--no-pipe", "--ear-threshold", "0.1"])
        .write_stdin(stream(30, 0.15, 0.3))
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(events(&output.stdout).is_empty());
}

#[test]
fn test_sustain_flag_applies() {
    // Shorter sustain confirms earlier.
    let output = vigil()
        .args(["run", "--no-pipe", "--drowsy-sustain", "0.5"])
        .write_stdin(stream(10, 0.15, 0.3))
        .output()
        .unwrap();

    assert!(output.status.success());
    let events = events(&output.stdout);
    assert_eq!(events.len(), 1);
    assert!((events[0]["t"].as_f64().unwrap() - 0.5).abs() < 1e-6);
}

#[test]
fn test_blend_shape_scores_trigger_detection() {
    let input: String = (0..25)
        .map(|i| {
            format!(
                "{{\"ear\":0.35,\"mar\":0.3,\"blink_score\":0.9,\"t\":{:.1}}}\n",
                0.1 * f64::from(i)
            )
        })
        .collect();

    let output = vigil()
        .args(["run", "--no-pipe"])
        .write_stdin(input)
        .output()
        .unwrap();

    assert!(output.status.success());
    let events = events(&output.stdout);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["event"], "DROWSY");
}

#[test]
fn test_malformed_lines_are_skipped() {
    let mut input = String::from("garbage\n{\"unrelated\":true}\n");
    input.push_str(&stream(25, 0.15, 0.3));

    let output = vigil()
        .args(["run", "--no-pipe"])
        .write_stdin(input)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(events(&output.stdout).len(), 1);
}

#[cfg(unix)]
#[test]
fn test_pipe_object_created_and_removed() {
    let dir = tempfile::tempdir().unwrap();
    let pipe = dir.path().join("events.pipe");

    let output = vigil()
        .args(["run", "--pipe", pipe.to_str().unwrap()])
        .write_stdin(stream(5, 0.30, 0.3))
        .output()
        .unwrap();

    assert!(output.status.success());
    // Torn down on exit.
    assert!(!pipe.exists());
}

#[cfg(unix)]
#[test]
fn test_pipe_setup_failure_is_fatal() {
    let output = vigil()
        .args(["run", "--pipe", "/nonexistent-dir/events.pipe"])
        .write_stdin("")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to create the event pipe"));
}
