#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Runs the bitebox binary against an isolated home directory.
///
/// The backend address points at a closed local port, so any command that
/// reaches the network fails fast instead of touching a real server.
pub struct BiteboxTest {
    pub temp_dir: TempDir,
    binary_path: &'static str,
}

impl BiteboxTest {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        BiteboxTest {
            temp_dir,
            binary_path: env!("CARGO_BIN_EXE_bitebox"),
        }
    }

    pub fn home(&self) -> PathBuf {
        self.temp_dir.path().join("home")
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(self.binary_path)
            .args(args)
            .current_dir(self.temp_dir.path())
            .env("BITEBOX_HOME", self.home())
            .env("BITEBOX_API_URL", "http://127.0.0.1:9")
            .env_remove("BITEBOX_PASSWORD")
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to execute bitebox command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }

    /// Seed a stored session as if `bitebox login` had succeeded.
    pub fn write_session(&self, token: &str, user_json: &str) {
        fs::create_dir_all(self.home()).expect("Failed to create home directory");
        let session = serde_json::json!({ "token": token, "user": user_json });
        fs::write(
            self.home().join("session.json"),
            serde_json::to_string(&session).expect("Failed to encode session"),
        )
        .expect("Failed to write session file");
    }

    pub fn session_exists(&self) -> bool {
        self.home().join("session.json").exists()
    }

    pub fn read_config(&self) -> String {
        fs::read_to_string(self.home().join("config.yaml")).expect("Failed to read config file")
    }
}
