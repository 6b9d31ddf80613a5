//! Isolated environments for running the knit binary
//!
//! Rather than overriding HOME for the whole test process, [`CliEnv`] hands
//! out commands whose HOME and XDG directories point into a per-test
//! temporary directory, so tests can run in parallel.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// A temporary HOME with its own XDG config directory
pub struct CliEnv {
  /// The temporary directory used as HOME
  pub temp_dir: TempDir,
}

impl Default for CliEnv {
  fn default() -> Self {
    Self::new()
  }
}

impl CliEnv {
  /// Environment variable names
  pub const XDG_CONFIG_HOME: &'static str = "XDG_CONFIG_HOME";
  pub const KNIT_CONFIG: &'static str = "KNIT_CONFIG";

  /// Create a new environment with an empty HOME and config directory
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    fs::create_dir_all(temp_dir.path().join("config")).expect("Failed to create config directory");
    Self { temp_dir }
  }

  /// Get the path to the temporary HOME directory
  pub fn home_dir(&self) -> &Path {
    self.temp_dir.path()
  }

  /// Get the path to the XDG config directory
  pub fn config_dir(&self) -> PathBuf {
    self.temp_dir.path().join("config")
  }

  /// Get the path of the default `.netrc` inside HOME
  pub fn netrc_path(&self) -> PathBuf {
    self.temp_dir.path().join(".netrc")
  }

  /// Write the default `.netrc` inside HOME
  pub fn write_netrc(&self, content: &str) -> PathBuf {
    let path = self.netrc_path();
    fs::write(&path, content).expect("Failed to write test .netrc");
    path
  }

  /// Read the default `.netrc` inside HOME
  pub fn read_netrc(&self) -> String {
    fs::read_to_string(self.netrc_path()).expect("Failed to read test .netrc")
  }

  /// Get the path of `knit/config.toml` inside the config directory
  pub fn config_path(&self) -> PathBuf {
    self.config_dir().join("knit").join("config.toml")
  }

  /// Write `knit/config.toml` inside the config directory
  pub fn write_config(&self, content: &str) -> PathBuf {
    let path = self.config_path();
    if let Some(dir) = path.parent() {
      fs::create_dir_all(dir).expect("Failed to create knit config directory");
    }
    fs::write(&path, content).expect("Failed to write test config");
    path
  }

  /// A command for `bin` with HOME, XDG and `KNIT_CONFIG` pointing into this
  /// environment and `NETRC` cleared.
  pub fn command(&self, bin: &str) -> Command {
    let mut cmd = Command::cargo_bin(bin).expect("Failed to locate binary");
    cmd
      .env("HOME", self.home_dir())
      .env("USERPROFILE", self.home_dir())
      .env(Self::XDG_CONFIG_HOME, self.config_dir())
      .env(Self::KNIT_CONFIG, self.config_path())
      .env_remove("NETRC")
      .env_remove("RUST_LOG")
      .env("NO_COLOR", "1");
    cmd
  }
}
