//! # Check Command
//!
//! Verifies that the netrc file exists, loads cleanly and is private to its
//! owner. Problems with individual machines are reported as warnings.

use anyhow::{Context, Result, bail};
use knit_core::platform::{FilePermissions, SystemFilePermissions};

use crate::config::Session;
use crate::output::{format_command, format_host, format_path, print_info, print_success, print_warning};

pub fn handle_check_command(session: &Session) -> Result<()> {
  let path = &session.netrc_path;
  let shown = format_path(&path.display().to_string());

  if !path.exists() {
    bail!("No netrc file found at {}", path.display());
  }

  let netrc = session.open()?;
  let machines = netrc.machines();
  if netrc.is_encrypted() {
    print_success(&format!("Decrypted {shown} with {}", session.config.gpg_program));
  }
  print_success(&format!("{shown} defines {} machine(s)", machines.len()));

  for host in machines.hosts() {
    if machines.credentials(host).is_none() {
      print_warning(&format!("Machine {} is missing a login or password", format_host(host)));
    }
  }

  if !session.config.secure_permissions {
    print_info("Permission check disabled by config");
    return Ok(());
  }

  let secure = SystemFilePermissions::has_secure_permissions(path)
    .with_context(|| format!("Failed to read permissions of {}", path.display()))?;
  if secure {
    print_success("File permissions are secure");
  } else {
    print_warning("The netrc file is readable by other users");
    println!(
      "For security, change permissions to 600: {}",
      format_command(&format!("chmod 600 {}", path.display()))
    );
  }

  Ok(())
}
