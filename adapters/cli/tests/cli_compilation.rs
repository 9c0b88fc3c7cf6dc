use std::process::Command;

#[test]
fn cli_compiles_without_warnings() {
    let status = Command::new(env!("CARGO"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["check", "--quiet", "--bin", "wildfire"])
        .status()
        .expect("failed to invoke cargo check for wildfire CLI binary");

    assert!(status.success(), "cargo check --bin wildfire should succeed");
}

#[test]
fn headless_campaign_reports_every_wave() {
    let output = Command::new(env!("CARGO_BIN_EXE_wildfire"))
        .args(["--waves", "5", "--wave-seconds", "12", "--seed", "7"])
        .output()
        .expect("failed to run the wildfire CLI binary");

    assert!(output.status.success(), "wildfire exited with {}", output.status);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().filter(|line| line.starts_with("wave ")).count(), 5);
    assert!(stdout.contains("wave 5 (group 1, boss)"));
}

#[test]
fn missing_pattern_file_is_reported() {
    let output = Command::new(env!("CARGO_BIN_EXE_wildfire"))
        .args(["--patterns", "does-not-exist.toml"])
        .output()
        .expect("failed to run the wildfire CLI binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does-not-exist.toml"));
}
