//! Integration tests for wavegraph-cli.
//!
//! Tests drive the built binary and check its output files with an
//! independent WAV reader.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Helper to get the `wavegraph` binary with an isolated configuration.
///
/// Every command gets `--config` pointing at a file inside `dir`, so the
/// user's own configuration never leaks into a test.
fn wavegraph(dir: &TempDir) -> Command {
    let config = dir.path().join("wavegraph.toml");
    if !config.exists() {
        std::fs::write(&config, "[export]\nplay = false\n").unwrap();
    }
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_wavegraph"));
    cmd.arg("--config").arg(config);
    cmd
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn read_samples(path: &Path) -> (hound::WavSpec, Vec<i16>) {
    let mut reader = hound::WavReader::open(path).expect("hound should read the file");
    let spec = reader.spec();
    let samples = reader.samples::<i16>().map(Result::unwrap).collect();
    (spec, samples)
}

// ---------------------------------------------------------------------------
// `wavegraph nodes`
// ---------------------------------------------------------------------------

#[test]
fn cli_nodes_lists_all_categories() {
    let dir = TempDir::new().unwrap();
    let output = wavegraph(&dir).arg("nodes").output().unwrap();
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.contains("Available Nodes"));
    for category in ["Math", "Output", "Tone", "Noise", "Mixers", "Inputs", "Filters", "FFT"] {
        assert!(out.contains(&format!("{category}:")), "missing category {category}");
    }
    for id in ["sine_wave", "overlay_mixer", "amplitude_lowpass", "reverse_fft"] {
        assert!(out.contains(id), "missing node {id}");
    }
}

#[test]
fn cli_nodes_filters_by_category() {
    let dir = TempDir::new().unwrap();
    let output = wavegraph(&dir)
        .args(["nodes", "--category", "mixers"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.contains("screen_mixer"));
    assert!(!out.contains("sine_wave"));
}

#[test]
fn cli_nodes_detail_shows_ports() {
    let dir = TempDir::new().unwrap();
    let output = wavegraph(&dir).args(["nodes", "Process"]).output().unwrap();
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.contains("Terminal: yes"));
    assert!(out.contains("scale"));
    assert!(out.contains("32767"));
    assert!(out.contains("samplesOut"));
}

#[test]
fn cli_nodes_unknown_fails() {
    let dir = TempDir::new().unwrap();
    let output = wavegraph(&dir).args(["nodes", "flux_capacitor"]).output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown node"));
}

// ---------------------------------------------------------------------------
// `wavegraph generate` / `wavegraph info`
// ---------------------------------------------------------------------------

#[test]
fn cli_generate_writes_readable_wav() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("a440.wav");

    let output = wavegraph(&dir)
        .args(["generate", "sine"])
        .arg(&path)
        .args(["--freq", "440", "--duration", "0.5", "--amplitude", "1"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let (spec, samples) = read_samples(&path);
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 44_100);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(samples.len(), 22_050);
    assert_eq!(samples[0], 0);
    assert!(samples.iter().any(|&s| s > 32_000));
}

#[test]
fn cli_generate_noise_is_seeded() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.wav");
    let b = dir.path().join("b.wav");

    for path in [&a, &b] {
        let status = wavegraph(&dir)
            .args(["generate", "noise"])
            .arg(path)
            .args(["--duration", "0.1", "--seed", "7"])
            .status()
            .unwrap();
        assert!(status.success());
    }

    assert_eq!(std::fs::read(&a).unwrap(), std::fs::read(&b).unwrap());
}

#[test]
fn cli_generate_rejects_unknown_waveform() {
    let dir = TempDir::new().unwrap();
    let output = wavegraph(&dir)
        .args(["generate", "pulse"])
        .arg(dir.path().join("x.wav"))
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn cli_info_prints_header() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tone.wav");
    let status = wavegraph(&dir)
        .args(["generate", "square"])
        .arg(&path)
        .args(["--duration", "1"])
        .status()
        .unwrap();
    assert!(status.success());

    let output = wavegraph(&dir).arg("info").arg(&path).output().unwrap();
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.contains("PCM 16-bit"));
    assert!(out.contains("Channels:    1"));
    assert!(out.contains("44100 Hz"));
    assert!(out.contains("88200 B/s"));
    assert!(out.contains("1.000s (44100 samples)"));
}

#[test]
fn cli_info_rejects_non_wav() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.wav");
    std::fs::write(&path, vec![b'X'; 64]).unwrap();

    let output = wavegraph(&dir).arg("info").arg(&path).output().unwrap();
    assert!(!output.status.success());
}

// ---------------------------------------------------------------------------
// `wavegraph chain`
// ---------------------------------------------------------------------------

#[test]
fn cli_chain_exports_through_process() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("chain.wav");

    let output = wavegraph(&dir)
        .args([
            "chain",
            "int16_max:length=0.01|volume:volume=0.5|process:scale=2",
            "--no-play",
            "--output",
        ])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout(&output).contains("samples (441 values"));

    let (_, samples) = read_samples(&path);
    assert_eq!(samples.len(), 441);
    assert!(samples.iter().all(|&s| s == 32_767));
}

#[test]
fn cli_chain_without_sink_prints_summary() {
    let dir = TempDir::new().unwrap();
    let output = wavegraph(&dir)
        .args(["chain", "constant:value=0.25,length=0.1|invert"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.contains("signal (4410 values"));
    assert!(out.contains("-0.25 .. -0.25"));
}

#[test]
fn cli_chain_reports_bad_parameter() {
    let dir = TempDir::new().unwrap();
    let output = wavegraph(&dir)
        .args(["chain", "sine_wave:pitch=440"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown parameter 'pitch'"));
}

#[test]
fn cli_chain_reads_file_input() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("source.wav");
    let status = wavegraph(&dir)
        .args(["generate", "triangle"])
        .arg(&source)
        .args(["--duration", "0.2"])
        .status()
        .unwrap();
    assert!(status.success());

    let spec = format!("file_in:path={}|volume:volume=1", source.display());
    let output = wavegraph(&dir).args(["chain", &spec]).output().unwrap();
    assert!(output.status.success());
    assert!(stdout(&output).contains("signal (8820 values"));
}

#[test]
fn cli_chain_fails_on_missing_file_input() {
    let dir = TempDir::new().unwrap();
    let spec = format!("file_in:path={}", dir.path().join("absent.wav").display());
    let output = wavegraph(&dir).args(["chain", &spec]).output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("File In"));
}

// ---------------------------------------------------------------------------
// `wavegraph config`
// ---------------------------------------------------------------------------

#[test]
fn cli_config_init_and_show() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fresh.toml");

    let status = Command::new(env!("CARGO_BIN_EXE_wavegraph"))
        .args(["config", "--config"])
        .arg(&path)
        .arg("init")
        .status()
        .unwrap();
    assert!(status.success());
    assert!(path.is_file());

    let again = Command::new(env!("CARGO_BIN_EXE_wavegraph"))
        .args(["config", "--config"])
        .arg(&path)
        .arg("init")
        .output()
        .unwrap();
    assert!(!again.status.success());

    let output = wavegraph(&dir).args(["config", "show"]).output().unwrap();
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("[export]"));
    assert!(out.contains("play = false"));
}

#[test]
fn cli_missing_explicit_config_fails() {
    let dir = TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_wavegraph"))
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .args(["generate", "sine"])
        .arg(dir.path().join("x.wav"))
        .output()
        .unwrap();
    assert!(!output.status.success());
}
