//! Integration tests for jugo-cli.
//!
//! Tests cover binary invocation, the effect listing, and end-to-end
//! file processing through `jugo process`, `analyze`, and `generate`.

use std::process::Command;

/// Helper to get the path to the `jugo` binary built by cargo.
fn jugo_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_jugo"))
}

// ---------------------------------------------------------------------------
// CLI binary tests -- `jugo effects`
// ---------------------------------------------------------------------------

#[test]
fn cli_effects_lists_all_effects() {
    let output = jugo_bin()
        .arg("effects")
        .output()
        .expect("failed to run jugo effects");

    assert!(output.status.success(), "jugo effects failed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Available effects"),
        "should show the listing header"
    );

    for id in jugo_effects::EFFECT_IDS {
        assert!(stdout.contains(id), "effects listing should contain '{id}'");
    }
}

#[test]
fn cli_effects_detail_shows_parameters() {
    let output = jugo_bin()
        .args(["effects", "material"])
        .output()
        .expect("failed to run jugo effects material");

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("material"));
    assert!(stdout.contains("parameter"));
    assert!(stdout.contains("Material"));
    assert!(stdout.contains("Mix"));
    assert!(stdout.contains("stepped"), "selector params are flagged");
}

#[test]
fn cli_effects_unknown_effect_fails() {
    let output = jugo_bin()
        .args(["effects", "nonexistent_effect_xyz"])
        .output()
        .expect("failed to run jugo");

    assert!(!output.status.success(), "should fail for unknown effect");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("unknown effect") || stderr.contains("nonexistent_effect_xyz"),
        "error should mention the unknown effect, got: {stderr}"
    );
}

// ---------------------------------------------------------------------------
// CLI binary tests -- `jugo --help`
// ---------------------------------------------------------------------------

#[test]
fn cli_help_works() {
    let output = jugo_bin()
        .arg("--help")
        .output()
        .expect("failed to run jugo --help");

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Juiciness analysis"));
    assert!(stdout.contains("process"));
    assert!(stdout.contains("analyze"));
    assert!(stdout.contains("generate"));
    assert!(stdout.contains("effects"));
}

#[test]
fn cli_version_works() {
    let output = jugo_bin()
        .arg("--version")
        .output()
        .expect("failed to run jugo --version");

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("jugo"), "version output should name the binary");
}

// ---------------------------------------------------------------------------
// CLI binary tests -- `jugo process` (end-to-end file processing)
// ---------------------------------------------------------------------------

fn write_test_tone(path: &std::path::Path, sample_rate: u32) {
    use jugo_io::{WavSpec, write_wav};

    let samples: Vec<f32> = (0..sample_rate)
        .map(|i| {
            0.8 * (2.0 * std::f32::consts::PI * 440.0 * i as f32 / sample_rate as f32).sin()
        })
        .collect();

    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
    };
    write_wav(path, &samples, spec).unwrap();
}

#[test]
fn cli_process_chain() {
    use tempfile::TempDir;

    let dir = TempDir::new().unwrap();
    let input_path = dir.path().join("input.wav");
    let output_path = dir.path().join("output.wav");
    write_test_tone(&input_path, 48000);

    let output = jugo_bin()
        .args([
            "process",
            input_path.to_str().unwrap(),
            output_path.to_str().unwrap(),
            "--chain",
            "material:texture=0.8|width",
        ])
        .output()
        .expect("failed to run jugo process");

    assert!(
        output.status.success(),
        "jugo process failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Juiciness:"),
        "should report pre/post scores, got: {stdout}"
    );

    assert!(output_path.exists(), "output WAV should exist");
    let (loaded, spec) = jugo_io::read_wav_stereo(&output_path).unwrap();
    assert_eq!(spec.sample_rate, 48000);
    assert_eq!(spec.channels, 2);
    assert!(!loaded.is_empty());
}

#[test]
fn cli_process_unknown_stage_fails() {
    use tempfile::TempDir;

    let dir = TempDir::new().unwrap();
    let input_path = dir.path().join("input.wav");
    let output_path = dir.path().join("output.wav");
    write_test_tone(&input_path, 48000);

    let output = jugo_bin()
        .args([
            "process",
            input_path.to_str().unwrap(),
            output_path.to_str().unwrap(),
            "--chain",
            "material|not_an_effect",
        ])
        .output()
        .expect("failed to run jugo");

    assert!(!output.status.success(), "unknown stage should fail");
}

#[test]
fn cli_process_nonexistent_input_fails() {
    let output = jugo_bin()
        .args([
            "process",
            "/tmp/nonexistent_jugo_test_file_12345.wav",
            "/tmp/nonexistent_jugo_out.wav",
            "--chain",
            "punch",
        ])
        .output()
        .expect("failed to run jugo");

    assert!(
        !output.status.success(),
        "process with nonexistent input should fail"
    );
}

// ---------------------------------------------------------------------------
// CLI binary tests -- `jugo analyze`
// ---------------------------------------------------------------------------

#[test]
fn cli_analyze_reports_a_score() {
    use tempfile::TempDir;

    let dir = TempDir::new().unwrap();
    let input_path = dir.path().join("input.wav");
    write_test_tone(&input_path, 48000);

    let output = jugo_bin()
        .args(["analyze", input_path.to_str().unwrap()])
        .output()
        .expect("failed to run jugo analyze");

    assert!(
        output.status.success(),
        "jugo analyze failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("48000 Hz"), "header line: {stdout}");
    assert!(stdout.contains("float"));
    assert!(stdout.contains("Juiciness score"));
    assert!(stdout.contains("punch"));
    assert!(stdout.contains("repetition density"));
}

// ---------------------------------------------------------------------------
// CLI binary tests -- `jugo generate`
// ---------------------------------------------------------------------------

#[test]
fn cli_generate_tone() {
    use tempfile::TempDir;

    let dir = TempDir::new().unwrap();
    let output_path = dir.path().join("tone.wav");

    let output = jugo_bin()
        .args([
            "generate",
            "tone",
            output_path.to_str().unwrap(),
            "--freq",
            "440",
            "--duration",
            "0.1",
        ])
        .output()
        .expect("failed to run jugo generate tone");

    assert!(
        output.status.success(),
        "jugo generate tone failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    assert!(output_path.exists());

    let (loaded, spec) = jugo_io::read_wav(&output_path).unwrap();
    // Duration 0.1s at the default sample rate gives 4800 samples.
    assert_eq!(loaded.len(), 4800);
    assert_eq!(spec.sample_rate, 48000);
}

#[test]
fn cli_generate_drumloop() {
    use tempfile::TempDir;

    let dir = TempDir::new().unwrap();
    let output_path = dir.path().join("loop.wav");

    let output = jugo_bin()
        .args([
            "generate",
            "drumloop",
            output_path.to_str().unwrap(),
            "--duration",
            "0.5",
        ])
        .output()
        .expect("failed to run jugo generate drumloop");

    assert!(
        output.status.success(),
        "jugo generate drumloop failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let (loaded, _) = jugo_io::read_wav(&output_path).unwrap();
    assert!(!loaded.is_empty());
    let peak = loaded.iter().copied().map(f32::abs).fold(0.0f32, f32::max);
    assert!(peak > 0.1, "drum loop should carry audible hits");
}
