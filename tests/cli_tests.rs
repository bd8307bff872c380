//! CLI integration tests.
//!
//! Tests the keccaksum commands by invoking the binary as a subprocess.

use std::io::Write;
use std::process::{Command, Stdio};

fn run(args: &[&str], input: &[u8]) -> (i32, String, String) {
    let bin = env!("CARGO_BIN_EXE_keccaksum");
    let mut child = Command::new(bin)
        .args(args)
        .env_remove("KECCAKSUM_ALGORITHM")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap_or_else(|e| panic!("Failed to spawn keccaksum at {:?}: {}", bin, e));

    {
        let stdin = child.stdin.as_mut().unwrap();
        stdin.write_all(input).unwrap();
    }

    let output = child.wait_with_output().unwrap();
    let code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (code, stdout, stderr)
}

fn fixture() -> String {
    format!("{}/tests/data/keccak_kats.json", env!("CARGO_MANIFEST_DIR"))
}

// ============================================================================
// Hash Command Tests
// ============================================================================

#[test]
fn test_hash_default_is_sha3_256() {
    let (code, stdout, _) = run(&["hash"], b"abc");
    assert_eq!(code, 0);
    assert_eq!(
        stdout.trim(),
        "3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532  -"
    );
}

#[test]
fn test_hash_algorithm_names_are_lenient() {
    let (code, stdout, _) = run(&["hash", "-a", "sha3_224"], b"abc");
    assert_eq!(code, 0);
    assert!(stdout.starts_with("e642824c3f8cf24ad09234ee7d3c766fc9a3a5168d0c94ad73b46fdf"));
}

#[test]
fn test_hash_base64() {
    let (code, stdout, _) = run(&["hash", "-a", "SHA3-256", "-e", "base64"], b"");
    assert_eq!(code, 0);
    assert_eq!(
        stdout.trim(),
        "p__G-L8e12ZRwUdWoGHWYvWA_03kO0n6gtgKS4D4Q0o=  -"
    );
}

#[test]
fn test_hash_shake_default_length() {
    let (code, stdout, _) = run(&["hash", "-a", "SHAKE128"], b"");
    assert_eq!(code, 0);
    let digest = stdout.split_whitespace().next().unwrap();
    assert_eq!(
        digest,
        "7f9c2ba4e88f827d616045507605853ed73b8093f6efbc88eb1a6eacfa66ef26"
    );
}

#[test]
fn test_hash_shake_explicit_length() {
    let (code, stdout, _) = run(&["hash", "-a", "SHAKE128", "-n", "16"], b"abc");
    assert_eq!(code, 0);
    assert!(stdout.starts_with("5881092dd818bf5cf8a3ddb793fbcba7  "));
}

#[test]
fn test_hash_file_argument() {
    let path = std::env::temp_dir().join(format!("keccaksum-cli-{}.txt", std::process::id()));
    std::fs::write(&path, b"abc").unwrap();
    let (code, stdout, _) = run(&["hash", path.to_str().unwrap()], b"");
    std::fs::remove_file(&path).ok();
    assert_eq!(code, 0);
    assert!(stdout.starts_with("3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532  "));
    assert!(stdout.trim_end().ends_with(".txt"));
}

#[test]
fn test_hash_missing_file_fails() {
    let (code, _, stderr) = run(&["hash", "/nonexistent/keccaksum-input"], b"");
    assert_eq!(code, 1);
    assert!(stderr.contains("keccaksum:"));
}

#[test]
fn test_hash_unknown_algorithm_fails() {
    let (code, _, stderr) = run(&["hash", "-a", "MD5"], b"abc");
    assert_ne!(code, 0);
    assert!(stderr.contains("MD5"));
}

// ============================================================================
// ShakeX Command Tests
// ============================================================================

#[test]
fn test_shake_x_custom_rate() {
    let (code, stdout, _) = run(&["shake-x", "--rate", "100", "-n", "32"], b"abc");
    assert_eq!(code, 0);
    assert!(stdout
        .starts_with("bc94c26b00c0d49c25a633f75481c107eb7dc462c62a30db185292a7d322156e  "));
}

#[test]
fn test_shake_x_rejects_full_width_rate() {
    let (code, stdout, stderr) = run(&["shake-x", "--rate", "200", "-n", "8"], b"abc");
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("200"));
}

// ============================================================================
// Kat / PermuteZero / Version Tests
// ============================================================================

#[test]
fn test_kat_fixture_passes() {
    let (code, stdout, _) = run(&["kat", &fixture()], b"");
    assert_eq!(code, 0, "stdout: {}", stdout);
    assert!(stdout.contains("228 passed, 0 failed"));
}

#[test]
fn test_kat_mismatch_writes_repro() {
    let dir = std::env::temp_dir().join(format!("keccaksum-repro-{}", std::process::id()));
    std::fs::remove_dir_all(&dir).ok();
    std::fs::create_dir_all(&dir).unwrap();
    let fixture = dir.join("mismatch.json");
    std::fs::write(
        &fixture,
        r#"{"kats":{"SHA3-224":[{"length":8,"message":"FF","digest":"00112233"}]}}"#,
    )
    .unwrap();
    let reports = dir.join("reports");

    let (code, stdout, _) = run(
        &[
            "kat",
            fixture.to_str().unwrap(),
            "--repro-dir",
            reports.to_str().unwrap(),
        ],
        b"",
    );
    let written: Vec<String> = std::fs::read_dir(&reports)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    let report = std::fs::read_to_string(reports.join("SHA3-224_0.txt")).unwrap_or_default();
    std::fs::remove_dir_all(&dir).ok();

    assert_eq!(code, 1);
    assert!(stdout.contains("0 passed, 1 failed"));
    assert_eq!(written, vec!["SHA3-224_0.txt".to_string()]);
    assert!(report.contains("Test: SHA3-224#0"));
    assert!(report.contains("First difference: byte 0"));
}

#[test]
fn test_kat_missing_fixture_fails() {
    let (code, _, stderr) = run(&["kat", "/nonexistent/keccak_kats.json"], b"");
    assert_eq!(code, 1);
    assert!(stderr.contains("I/O error"));
}

#[test]
fn test_permute_zero() {
    let (code, stdout, _) = run(&["permute-zero"], b"");
    assert_eq!(code, 0);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("f1258f7940e1dde7 "));
    assert!(lines[4].ends_with(" eaf1ff7b5ceca249"));
}

#[test]
fn test_version() {
    let (code, stdout, _) = run(&["version"], b"");
    assert_eq!(code, 0);
    assert!(stdout.starts_with("keccaksum v"));
}
