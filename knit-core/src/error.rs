//! # Store Errors
//!
//! Failures of the file host around the parser: reading and writing the
//! netrc file and running the encryption program. Parsing and serialization
//! themselves cannot fail.

use std::io;
use std::path::PathBuf;
use std::string::FromUtf8Error;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("failed to read {}", .path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to write {}", .path.display())]
  Write {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to secure permissions of {}", .path.display())]
  Permissions {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to run {program}")]
  Spawn {
    program: String,
    #[source]
    source: io::Error,
  },

  #[error("{program} exited with code {code}: {stderr}")]
  CipherFailed { program: String, code: i32, stderr: String },

  #[error("{program} produced output that is not valid UTF-8")]
  CipherOutput {
    program: String,
    #[source]
    source: FromUtf8Error,
  },

  #[cfg(feature = "async")]
  #[error(transparent)]
  Task(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, StoreError>;
