//! Temporary netrc files for testing

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// RAII guard for test netrc files
///
/// Creates a temporary directory holding a `.netrc` file with the given
/// content. The directory and file are removed when the guard is dropped.
pub struct NetrcGuard {
  temp_dir: TempDir,
  netrc_path: PathBuf,
}

impl NetrcGuard {
  /// Create a new NetrcGuard with the given content
  pub fn new(content: &str) -> Self {
    Self::with_file_name(".netrc", Some(content))
  }

  /// Create a guard whose netrc file does not exist yet
  pub fn empty() -> Self {
    Self::with_file_name(".netrc", None)
  }

  /// Create a guard for a custom file name such as `.netrc.gpg`
  pub fn with_file_name(name: &str, content: Option<&str>) -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let netrc_path = temp_dir.path().join(name);

    if let Some(content) = content {
      fs::write(&netrc_path, content).expect("Failed to write test .netrc");
    }

    Self { temp_dir, netrc_path }
  }

  /// Get the path to the netrc file
  pub fn netrc_path(&self) -> &Path {
    &self.netrc_path
  }

  /// Get the path to the temporary directory
  pub fn home_dir(&self) -> &Path {
    self.temp_dir.path()
  }

  /// Read the current contents of the netrc file
  pub fn contents(&self) -> String {
    fs::read_to_string(&self.netrc_path).expect("Failed to read test .netrc")
  }
}
