//! Platform-specific file permission handling
//!
//! Netrc files hold secrets, so they are written readable by their owner
//! only where the platform supports it.

use std::io;
use std::path::Path;

/// Trait for platform-specific file permission operations
pub trait FilePermissions {
  /// Set secure permissions on a credential file
  fn set_secure_permissions(path: &Path) -> io::Result<()>;

  /// Check if a file has secure permissions
  fn has_secure_permissions(path: &Path) -> io::Result<bool>;
}

/// Unix implementation using chmod-style permissions
#[cfg(unix)]
pub struct UnixFilePermissions;

#[cfg(unix)]
impl FilePermissions for UnixFilePermissions {
  fn set_secure_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = std::fs::metadata(path)?.permissions();
    perms.set_mode(0o600); // Owner read/write only
    std::fs::set_permissions(path, perms)
  }

  fn has_secure_permissions(path: &Path) -> io::Result<bool> {
    use std::os::unix::fs::PermissionsExt;

    let mode = std::fs::metadata(path)?.permissions().mode();
    // No group/other bits
    Ok(mode & 0o077 == 0)
  }
}

/// Windows implementation. ACLs of the user profile already restrict access,
/// so both operations only confirm the file exists.
#[cfg(windows)]
pub struct WindowsFilePermissions;

#[cfg(windows)]
impl FilePermissions for WindowsFilePermissions {
  fn set_secure_permissions(path: &Path) -> io::Result<()> {
    std::fs::metadata(path).map(|_| ())
  }

  fn has_secure_permissions(path: &Path) -> io::Result<bool> {
    std::fs::metadata(path).map(|_| true)
  }
}

#[cfg(unix)]
pub type SystemFilePermissions = UnixFilePermissions;

#[cfg(windows)]
pub type SystemFilePermissions = WindowsFilePermissions;

#[cfg(all(test, unix))]
mod tests {
  use std::fs;
  use std::os::unix::fs::PermissionsExt;

  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_secure_permissions_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(".netrc");
    fs::write(&path, "machine a login b\n").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

    assert!(!UnixFilePermissions::has_secure_permissions(&path).unwrap());

    UnixFilePermissions::set_secure_permissions(&path).unwrap();

    assert!(UnixFilePermissions::has_secure_permissions(&path).unwrap());
    assert_eq!(fs::metadata(&path).unwrap().permissions().mode() & 0o777, 0o600);
  }
}
