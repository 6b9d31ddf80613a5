//! # List Command
//!
//! Prints every machine in file order with its login.

use anyhow::Result;
use clap::Args;

use crate::config::Session;
use crate::output::{format_host, format_path, print_info};

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
  /// Print host names only, one per line
  #[arg(short, long)]
  pub quiet: bool,
}

pub fn handle_list_command(session: &Session, args: ListArgs) -> Result<()> {
  let netrc = session.open()?;
  let machines = netrc.machines();

  if machines.is_empty() {
    if !args.quiet {
      print_info(&format!(
        "No machines in {}",
        format_path(&session.netrc_path.display().to_string())
      ));
    }
    return Ok(());
  }

  let width = machines.hosts().map(str::len).max().unwrap_or(0);
  for host in machines.hosts() {
    if args.quiet {
      println!("{host}");
      continue;
    }
    let login = machines.get(host).and_then(|machine| machine.login()).unwrap_or("-");
    let padding = " ".repeat(width - host.len());
    println!("{}{padding}  {login}", format_host(host));
  }

  Ok(())
}
