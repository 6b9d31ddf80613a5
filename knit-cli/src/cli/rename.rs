//! # Rename Command

use anyhow::{Context, Result};
use clap::Args;

use crate::config::Session;
use crate::output::{format_host, print_success};

/// Arguments for the rename command
#[derive(Args, Debug)]
pub struct RenameArgs {
  /// Current host of the machine
  pub from: String,

  /// New host
  pub to: String,
}

pub fn handle_rename_command(session: &Session, args: RenameArgs) -> Result<()> {
  let mut netrc = session.open()?;
  netrc
    .machines_mut()
    .rename(&args.from, &args.to)
    .with_context(|| format!("Failed to rename '{}' in {}", args.from, session.netrc_path.display()))?;

  netrc
    .save()
    .with_context(|| format!("Failed to save {}", session.netrc_path.display()))?;
  print_success(&format!("Renamed {} to {}", format_host(&args.from), format_host(&args.to)));
  Ok(())
}
