//! Default netrc location for the current platform.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use directories::BaseDirs;

/// Returns the netrc file the user most likely means: `~/.netrc` (or
/// `_netrc` on Windows), preferring an encrypted `.gpg` sibling when one
/// exists.
pub fn default_netrc_path() -> PathBuf {
  netrc_path_in(&home_dir(), cfg!(windows))
}

/// Resolves the netrc file inside `home`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use knit_core::paths::netrc_path_in;
///
/// let path = netrc_path_in(Path::new("/nonexistent/home/user"), false);
/// assert_eq!(path, Path::new("/nonexistent/home/user/.netrc"));
/// ```
pub fn netrc_path_in(home: &Path, windows: bool) -> PathBuf {
  let file = home.join(netrc_file_name(windows));
  let encrypted = with_gpg_extension(&file);
  if encrypted.exists() { encrypted } else { file }
}

pub const fn netrc_file_name(windows: bool) -> &'static str {
  if windows { "_netrc" } else { ".netrc" }
}

/// Whether `path` names an encrypted netrc file.
pub fn is_encrypted(path: &Path) -> bool {
  path.extension().is_some_and(|ext| ext == "gpg")
}

fn with_gpg_extension(file: &Path) -> PathBuf {
  let mut name = OsString::from(file.as_os_str());
  name.push(".gpg");
  PathBuf::from(name)
}

/// The user's home directory. On Windows the `HOME`, `HOMEDRIVE`/`HOMEPATH`
/// and `USERPROFILE` variables take precedence over the system profile
/// directory. Falls back to the temp directory when nothing is known.
pub fn home_dir() -> PathBuf {
  if cfg!(windows)
    && let Some(home) = windows_home_from(|name| std::env::var_os(name))
  {
    return home;
  }

  BaseDirs::new()
    .map(|dirs| dirs.home_dir().to_path_buf())
    .unwrap_or_else(std::env::temp_dir)
}

fn windows_home_from(var: impl Fn(&str) -> Option<OsString>) -> Option<PathBuf> {
  let non_empty = |name: &str| var(name).filter(|value| !value.is_empty());

  if let Some(home) = non_empty("HOME") {
    return Some(PathBuf::from(home));
  }
  if let (Some(drive), Some(path)) = (non_empty("HOMEDRIVE"), non_empty("HOMEPATH")) {
    return Some(Path::new(&drive).join(path));
  }
  non_empty("USERPROFILE").map(PathBuf::from)
}
