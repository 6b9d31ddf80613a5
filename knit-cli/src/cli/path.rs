//! # Path Command

use anyhow::Result;

use crate::config::Session;

pub fn handle_path_command(session: &Session) -> Result<()> {
  println!("{}", session.netrc_path.display());
  Ok(())
}
