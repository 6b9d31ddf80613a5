//! # Remove Command

use anyhow::{Context, Result, bail};
use clap::Args;

use crate::config::Session;
use crate::output::{format_host, print_success};

/// Arguments for the remove command
#[derive(Args, Debug)]
pub struct RemoveArgs {
  /// Host of the machine to remove
  pub host: String,
}

pub fn handle_remove_command(session: &Session, args: RemoveArgs) -> Result<()> {
  let mut netrc = session.open()?;
  if !netrc.machines_mut().remove(&args.host) {
    bail!("No machine named '{}' in {}", args.host, session.netrc_path.display());
  }

  netrc
    .save()
    .with_context(|| format!("Failed to save {}", session.netrc_path.display()))?;
  print_success(&format!("Removed machine {}", format_host(&args.host)));
  Ok(())
}
