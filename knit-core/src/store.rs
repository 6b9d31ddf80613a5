//! # Netrc Files
//!
//! [`NetrcFile`] is the host around the in-memory model: it reads the file
//! (decrypting `.gpg` files through a [`Cipher`]), hands the text to the
//! parser, and writes the serialized result back with owner-only
//! permissions. A missing file loads as an empty netrc so that the first
//! save creates it.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::cipher::{Cipher, Gpg};
use crate::error::{Result, StoreError};
use crate::machines::Netrc;
use crate::parser::parse;
use crate::paths::{default_netrc_path, is_encrypted};
use crate::platform::{FilePermissions, SystemFilePermissions};

/// A netrc file on disk together with its parsed contents.
#[derive(Debug, Clone)]
pub struct NetrcFile {
  file: PathBuf,
  machines: Netrc,
  cipher: Arc<dyn Cipher>,
}

impl NetrcFile {
  /// Creates a handle for `file` with no contents loaded yet.
  pub fn new(file: impl Into<PathBuf>) -> Self {
    Self {
      file: file.into(),
      machines: Netrc::default(),
      cipher: Arc::new(Gpg::default()),
    }
  }

  /// Creates a handle for the user's default netrc file.
  pub fn discover() -> Self {
    Self::new(default_netrc_path())
  }

  /// Opens and loads `file` in one step.
  pub fn open(file: impl Into<PathBuf>) -> Result<Self> {
    let mut netrc = Self::new(file);
    netrc.load()?;
    Ok(netrc)
  }

  /// Replaces the cipher used for `.gpg` files.
  pub fn with_cipher(mut self, cipher: impl Cipher + 'static) -> Self {
    self.cipher = Arc::new(cipher);
    self
  }

  pub fn file(&self) -> &Path {
    &self.file
  }

  pub fn is_encrypted(&self) -> bool {
    is_encrypted(&self.file)
  }

  pub fn machines(&self) -> &Netrc {
    &self.machines
  }

  pub fn machines_mut(&mut self) -> &mut Netrc {
    &mut self.machines
  }

  /// Reads and parses the file, replacing anything loaded before.
  pub fn load(&mut self) -> Result<()> {
    let body = if self.is_encrypted() {
      self.cipher.decrypt(&self.file)?
    } else {
      read_or_empty(&self.file, fs::read_to_string(&self.file))?
    };
    self.machines = parse(&body);
    debug!(path = %self.file.display(), machines = self.machines.len(), "Loaded netrc");
    Ok(())
  }

  /// The bytes [`save`](Self::save) would write: the serialized netrc,
  /// encrypted when the file is a `.gpg` file.
  pub fn render(&self) -> Result<Vec<u8>> {
    let body = self.machines.serialize();
    if self.is_encrypted() {
      self.cipher.encrypt(&body)
    } else {
      Ok(body.into_bytes())
    }
  }

  /// Serializes the current contents and writes them to the file.
  pub fn save(&self) -> Result<()> {
    let bytes = self.render()?;
    write_secure(&self.file, &bytes)?;
    info!(path = %self.file.display(), "Saved netrc");
    Ok(())
  }

  /// Async variant of [`load`](Self::load).
  #[cfg(feature = "async")]
  pub async fn load_async(&mut self) -> Result<()> {
    let body = if self.is_encrypted() {
      let cipher = Arc::clone(&self.cipher);
      let file = self.file.clone();
      tokio::task::spawn_blocking(move || cipher.decrypt(&file)).await??
    } else {
      read_or_empty(&self.file, tokio::fs::read_to_string(&self.file).await)?
    };
    self.machines = parse(&body);
    debug!(path = %self.file.display(), machines = self.machines.len(), "Loaded netrc");
    Ok(())
  }

  /// Async variant of [`save`](Self::save).
  #[cfg(feature = "async")]
  pub async fn save_async(&self) -> Result<()> {
    let body = self.machines.serialize();
    let bytes = if self.is_encrypted() {
      let cipher = Arc::clone(&self.cipher);
      tokio::task::spawn_blocking(move || cipher.encrypt(&body)).await??
    } else {
      body.into_bytes()
    };

    let file = self.file.clone();
    tokio::task::spawn_blocking(move || write_secure(&file, &bytes)).await??;
    info!(path = %self.file.display(), "Saved netrc");
    Ok(())
  }
}

fn read_or_empty(path: &Path, read: io::Result<String>) -> Result<String> {
  match read {
    Ok(body) => Ok(body),
    Err(e) if e.kind() == io::ErrorKind::NotFound => {
      debug!(path = %path.display(), "No netrc file, starting empty");
      Ok(String::new())
    }
    Err(source) => Err(StoreError::Read {
      path: path.to_path_buf(),
      source,
    }),
  }
}

fn write_secure(path: &Path, bytes: &[u8]) -> Result<()> {
  let write_error = |source| StoreError::Write {
    path: path.to_path_buf(),
    source,
  };

  let mut options = OpenOptions::new();
  options.write(true).create(true).truncate(true);
  #[cfg(unix)]
  {
    use std::os::unix::fs::OpenOptionsExt;
    options.mode(0o600);
  }

  let mut file = options.open(path).map_err(write_error)?;
  file.write_all(bytes).map_err(write_error)?;

  SystemFilePermissions::set_secure_permissions(path).map_err(|source| StoreError::Permissions {
    path: path.to_path_buf(),
    source,
  })
}

#[cfg(test)]
mod tests {
  use std::fs;

  use knit_test_utils::NetrcGuard;

  use super::*;

  #[test]
  fn test_missing_file_loads_empty() {
    let guard = NetrcGuard::empty();
    let netrc = NetrcFile::open(guard.netrc_path()).unwrap();

    assert!(netrc.machines().is_empty());
    assert_eq!(netrc.machines().serialize(), "");
  }

  #[test]
  fn test_missing_file_is_created_on_save() {
    let guard = NetrcGuard::empty();
    let mut netrc = NetrcFile::open(guard.netrc_path()).unwrap();
    netrc.machines_mut().set("foo", [("login", "u"), ("password", "p")]).unwrap();
    netrc.save().unwrap();

    assert_eq!(guard.contents(), "machine foo login u password p\n");
  }

  #[test]
  fn test_directory_is_a_read_error() {
    let guard = NetrcGuard::empty();
    let err = NetrcFile::open(guard.home_dir()).unwrap_err();

    assert!(matches!(err, StoreError::Read { .. }));
  }

  #[test]
  fn test_save_without_edits_keeps_bytes() {
    let content = "# I am a comment\nmachine mail.google.com # foo\n  login joe@gmail.com\n  password secret\n\nmacdef init\nput x\n";
    let guard = NetrcGuard::new(content);
    let netrc = NetrcFile::open(guard.netrc_path()).unwrap();
    netrc.save().unwrap();

    assert_eq!(fs::read_to_string(guard.netrc_path()).unwrap(), content);
  }

  #[test]
  #[cfg(unix)]
  fn test_save_tightens_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let guard = NetrcGuard::new("machine a login b password c\n");
    fs::set_permissions(guard.netrc_path(), fs::Permissions::from_mode(0o644)).unwrap();

    let netrc = NetrcFile::open(guard.netrc_path()).unwrap();
    netrc.save().unwrap();

    let mode = fs::metadata(guard.netrc_path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
  }
}
