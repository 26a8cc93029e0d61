use std::process::Command;

#[test]
fn sim_binary_smoke() {
    let output = Command::new("cargo")
        .args(["run", "--quiet", "--bin", "sim", "--", "1", "20"])
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .expect("failed to run sim binary");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
    let v: serde_json::Value = serde_json::from_str(stdout.trim()).expect("invalid json");
    assert_eq!(v["difficulty"], "Medium");
    assert_eq!(v["games"], 20);
    // Bisection needs at most seven guesses on 1..=100.
    assert_eq!(v["wins"], 20);
    assert!(v["achievements"].is_array());
}

#[test]
fn sim_binary_rejects_bad_difficulty() {
    let output = Command::new("cargo")
        .args(["run", "--quiet", "--bin", "sim", "--", "1", "3", "nightmare"])
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .expect("failed to run sim binary");
    assert!(!output.status.success());
}

#[test]
fn sim_binary_prints_usage_without_arguments() {
    let output = Command::new("cargo")
        .args(["run", "--quiet", "--bin", "sim"])
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .expect("failed to run sim binary");
    // A clean exit(1), not a panic (101).
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage:"), "{}", stderr);
    assert!(stderr.contains("<seed> <games> [difficulty]"), "{}", stderr);
}
