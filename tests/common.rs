use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::{Path, PathBuf};

/// Get a Command for hatecheck with credentials cleared from the environment
pub fn hatecheck() -> Command {
    let mut cmd = cargo_bin_cmd!("hatecheck");
    cmd.env_remove("HATECHECK_PASSWORD")
        .env_remove("HATECHECK_TOKEN")
        .env_remove("HATECHECK_LOG")
        .env_remove("RUST_LOG");
    cmd
}

/// Initialize a store under `dir` and return its path
///
/// Passwords use the cheapest bcrypt cost so registration stays fast.
pub fn init_store(dir: &Path, embedding_dim: usize) -> PathBuf {
    let store = dir.join(".hatecheck");
    hatecheck()
        .arg("--store")
        .arg(&store)
        .args(["init", "--embedding-dim", &embedding_dim.to_string()])
        .args(["--password-cost", "4"])
        .assert()
        .success();
    store
}

/// Write a linear model whose output depends only on the bias
#[allow(dead_code)]
pub fn write_constant_model(store: &Path, embedding_dim: usize, label: &str) {
    let (bias_zero, bias_one) = if label == "1" { (0.0, 1.0) } else { (1.0, 0.0) };
    let model = serde_json::json!({
        "labels": ["0", "1"],
        "weights": [vec![0.0; embedding_dim], vec![0.0; embedding_dim]],
        "bias": [bias_zero, bias_one],
    });
    fs::write(store.join("model.json"), model.to_string()).unwrap();
}

/// Register a user with password "pw"
#[allow(dead_code)]
pub fn register(store: &Path, username: &str) {
    hatecheck()
        .arg("--store")
        .arg(store)
        .args(["register", username, "--email", "user@example.com", "--password", "pw"])
        .assert()
        .success();
}

/// Log in as a user registered with [`register`] and return the token
#[allow(dead_code)]
pub fn login(store: &Path, username: &str) -> String {
    let output = hatecheck()
        .arg("--store")
        .arg(store)
        .args(["token", username, "--password", "pw"])
        .output()
        .unwrap();
    assert!(output.status.success());
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}
