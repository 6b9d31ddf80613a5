//! # Encrypted Netrc Files
//!
//! Files ending in `.gpg` are decrypted before parsing and encrypted again
//! after serializing. The parser never sees ciphertext; the [`Cipher`] trait
//! is the seam where the host plugs in the external program.

use std::ffi::OsString;
use std::fmt;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tracing::debug;

use crate::error::{Result, StoreError};

/// Default program used for `.gpg` netrc files
pub const GPG_PROGRAM: &str = "gpg";

/// Trait for the decrypt/encrypt collaborator of encrypted netrc files
pub trait Cipher: fmt::Debug + Send + Sync {
  /// Decrypt the file at `path` into netrc text
  fn decrypt(&self, path: &Path) -> Result<String>;

  /// Encrypt netrc text into the bytes that will be written to disk
  fn encrypt(&self, plaintext: &str) -> Result<Vec<u8>>;
}

/// Cipher that shells out to GnuPG.
///
/// Decryption runs `gpg --batch --quiet --decrypt <file>` with the terminal's
/// stdin available for passphrase prompts. Encryption runs
/// `gpg -a --batch --default-recipient-self -e` with the plaintext on stdin,
/// producing ASCII-armored output.
#[derive(Debug, Clone)]
pub struct Gpg {
  program: String,
}

impl Default for Gpg {
  fn default() -> Self {
    Self::new(GPG_PROGRAM)
  }
}

impl Gpg {
  pub fn new(program: impl Into<String>) -> Self {
    Self {
      program: program.into(),
    }
  }

  pub fn program(&self) -> &str {
    &self.program
  }

  pub fn decrypt_args(path: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["--batch", "--quiet", "--decrypt"].iter().map(OsString::from).collect();
    args.push(path.as_os_str().to_owned());
    args
  }

  pub fn encrypt_args() -> [&'static str; 4] {
    ["-a", "--batch", "--default-recipient-self", "-e"]
  }

  fn spawn_error(&self, source: std::io::Error) -> StoreError {
    StoreError::Spawn {
      program: self.program.clone(),
      source,
    }
  }

  fn check(&self, output: Output) -> Result<Vec<u8>> {
    if output.status.success() {
      return Ok(output.stdout);
    }
    Err(StoreError::CipherFailed {
      program: self.program.clone(),
      code: output.status.code().unwrap_or(-1),
      stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    })
  }
}

impl Cipher for Gpg {
  fn decrypt(&self, path: &Path) -> Result<String> {
    debug!(program = %self.program, path = %path.display(), "Decrypting netrc");
    let output = Command::new(&self.program)
      .args(Self::decrypt_args(path))
      .stdin(Stdio::inherit())
      .output()
      .map_err(|e| self.spawn_error(e))?;

    let stdout = self.check(output)?;
    String::from_utf8(stdout).map_err(|source| StoreError::CipherOutput {
      program: self.program.clone(),
      source,
    })
  }

  fn encrypt(&self, plaintext: &str) -> Result<Vec<u8>> {
    debug!(program = %self.program, "Encrypting netrc");
    let mut child = Command::new(&self.program)
      .args(Self::encrypt_args())
      .stdin(Stdio::piped())
      .stdout(Stdio::piped())
      .stderr(Stdio::piped())
      .spawn()
      .map_err(|e| self.spawn_error(e))?;

    if let Some(mut stdin) = child.stdin.take() {
      stdin.write_all(plaintext.as_bytes()).map_err(|e| self.spawn_error(e))?;
    }

    let output = child.wait_with_output().map_err(|e| self.spawn_error(e))?;
    self.check(output)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_decrypt_args_end_with_file() {
    let args = Gpg::decrypt_args(Path::new("/home/user/.netrc.gpg"));
    assert_eq!(
      args,
      vec![
        OsString::from("--batch"),
        OsString::from("--quiet"),
        OsString::from("--decrypt"),
        OsString::from("/home/user/.netrc.gpg"),
      ]
    );
  }

  #[test]
  fn test_missing_program_is_a_spawn_error() {
    let gpg = Gpg::new("knit-test-no-such-program");
    let err = gpg.encrypt("machine a login b\n").unwrap_err();

    assert!(matches!(err, StoreError::Spawn { ref program, .. } if program == "knit-test-no-such-program"));
  }

  #[test]
  #[cfg(unix)]
  fn test_non_zero_exit_reports_code() {
    // `false` ignores its arguments and exits with status 1
    let gpg = Gpg::new("false");
    let err = gpg.decrypt(Path::new("/nonexistent/.netrc.gpg")).unwrap_err();

    assert!(matches!(err, StoreError::CipherFailed { code: 1, .. }));
    assert_eq!(err.to_string(), "false exited with code 1: ");
  }
}
