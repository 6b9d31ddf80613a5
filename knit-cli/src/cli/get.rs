//! # Get Command
//!
//! Shows one machine, or a single property of it.

use anyhow::{Result, bail};
use clap::Args;

use crate::config::Session;
use crate::output::{display_value, format_host, format_key};

/// Arguments for the get command
#[derive(Args, Debug)]
pub struct GetArgs {
  /// Host of the machine
  pub host: String,

  /// Property to print, such as login or password
  pub key: Option<String>,

  /// Show the password in the full machine view instead of masking it
  #[arg(long)]
  pub show_secrets: bool,
}

pub fn handle_get_command(session: &Session, args: GetArgs) -> Result<()> {
  let netrc = session.open()?;
  let Some(machine) = netrc.machines().get(&args.host) else {
    bail!("No machine named '{}' in {}", args.host, session.netrc_path.display());
  };

  if let Some(key) = &args.key {
    let Some(value) = machine.get(key) else {
      bail!("Machine '{}' has no {key}", args.host);
    };
    println!("{value}");
    return Ok(());
  }

  match machine.comment() {
    Some(comment) => println!("machine {} {comment}", format_host(machine.host())),
    None => println!("machine {}", format_host(machine.host())),
  }
  for (key, value) in machine.props() {
    println!("  {} {}", format_key(key), display_value(key, value, args.show_secrets));
  }

  Ok(())
}
