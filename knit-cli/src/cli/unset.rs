//! # Unset Command
//!
//! Removes named properties from one machine.

use anyhow::{Context, Result, bail};
use clap::Args;
use knit_core::HOST_KEY;

use crate::config::Session;
use crate::output::{format_host, format_key, print_success, print_warning};

/// Arguments for the unset command
#[derive(Args, Debug)]
pub struct UnsetArgs {
  /// Host of the machine
  pub host: String,

  /// Properties to remove
  #[arg(required = true)]
  pub keys: Vec<String>,
}

pub fn handle_unset_command(session: &Session, args: UnsetArgs) -> Result<()> {
  if args.keys.iter().any(|key| key == HOST_KEY) {
    bail!("The host of a machine cannot be unset; use `knit remove` instead");
  }

  let mut netrc = session.open()?;
  let Some(mut machine) = netrc.machines_mut().get_mut(&args.host) else {
    bail!("No machine named '{}' in {}", args.host, session.netrc_path.display());
  };

  let mut removed = 0;
  for key in &args.keys {
    if machine.remove(key).is_some() {
      removed += 1;
    } else {
      print_warning(&format!("Machine {} has no {}", format_host(&args.host), format_key(key)));
    }
  }

  if removed == 0 {
    return Ok(());
  }

  netrc
    .save()
    .with_context(|| format!("Failed to save {}", session.netrc_path.display()))?;
  let noun = if removed == 1 { "property" } else { "properties" };
  print_success(&format!("Removed {removed} {noun} from {}", format_host(&args.host)));
  Ok(())
}
