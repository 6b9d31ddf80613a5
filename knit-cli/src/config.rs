//! # Configuration Management
//!
//! Loads the optional `config.toml` from the knit config directory and
//! decides which netrc file a command operates on.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use knit_core::cipher::GPG_PROGRAM;
use knit_core::{Gpg, NetrcFile, default_netrc_path};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Environment variable naming a netrc file, as honoured by curl and friends.
pub const NETRC_ENV: &str = "NETRC";

/// Name of the config file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// User settings read from `config.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
  /// Netrc file to use instead of the discovered default
  pub file: Option<PathBuf>,
  /// Program invoked to decrypt and encrypt `.gpg` files
  pub gpg_program: String,
  /// Whether `knit check` reports files readable by group or others
  pub secure_permissions: bool,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      file: None,
      gpg_program: GPG_PROGRAM.to_string(),
      secure_permissions: true,
    }
  }
}

impl Config {
  /// Load the config from `path`, or the defaults when it does not exist.
  pub fn load(path: &Path) -> Result<Self> {
    if !path.exists() {
      debug!(path = %path.display(), "No config file, using defaults");
      return Ok(Self::default());
    }

    let content =
      fs::read_to_string(path).with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: Self =
      toml::from_str(&content).with_context(|| format!("Failed to parse config from {}", path.display()))?;

    debug!(path = %path.display(), ?config, "Loaded config");
    Ok(config)
  }
}

/// The default location of `config.toml`
pub fn default_config_path() -> Result<PathBuf> {
  let proj_dirs = ProjectDirs::from("", "", "knit").context("Failed to determine project directories")?;
  Ok(proj_dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Picks the netrc file: an explicit `--file`, then `$NETRC`, then the
/// config's `file`, then the platform default.
pub fn resolve_netrc_path(flag: Option<&Path>, env: Option<OsString>, config: &Config) -> PathBuf {
  if let Some(path) = flag {
    return path.to_path_buf();
  }
  if let Some(path) = env.filter(|value| !value.is_empty()) {
    return PathBuf::from(path);
  }
  if let Some(path) = &config.file {
    return path.clone();
  }
  default_netrc_path()
}

/// Settings shared by every command once the global flags are parsed
#[derive(Debug, Clone)]
pub struct Session {
  pub config: Config,
  pub netrc_path: PathBuf,
}

impl Session {
  pub fn new(file: Option<&Path>, config_path: Option<&Path>) -> Result<Self> {
    let config_path = match config_path {
      Some(path) => path.to_path_buf(),
      None => default_config_path()?,
    };
    let config = Config::load(&config_path)?;
    let netrc_path = resolve_netrc_path(file, std::env::var_os(NETRC_ENV), &config);
    debug!(netrc = %netrc_path.display(), "Resolved netrc file");

    Ok(Self { config, netrc_path })
  }

  /// A handle on the netrc file, not loaded yet
  pub fn netrc(&self) -> NetrcFile {
    NetrcFile::new(&self.netrc_path).with_cipher(Gpg::new(&self.config.gpg_program))
  }

  /// Opens and loads the netrc file
  pub fn open(&self) -> Result<NetrcFile> {
    let mut netrc = self.netrc();
    netrc
      .load()
      .with_context(|| format!("Failed to load {}", self.netrc_path.display()))?;
    Ok(netrc)
  }
}
