//! # Command Line Interface
//!
//! Defines the CLI structure and dispatches each subcommand against the
//! resolved netrc file.

mod check;
mod get;
mod list;
mod path;
mod remove;
mod rename;
mod set;
mod unset;

use std::path::PathBuf;

use anyhow::Result;
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser, Subcommand};

use crate::config::Session;
use crate::output::ColorMode;

/// Top-level CLI command for the knit tool
#[derive(Parser, Debug)]
#[command(name = "knit")]
#[command(display_name = "🧶 Knit")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = "Read and edit .netrc credential files without losing their formatting")]
#[command(
  long_about = "Knit reads and edits .netrc files in place.\n\n\
        Comments, indentation, macro definitions and entries it does not touch are\n\
        written back exactly as they were, so hand-maintained files stay tidy.\n\
        Files ending in .gpg are decrypted and re-encrypted with gpg."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    ignore_case = true,
    global = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  /// Netrc file to operate on
  #[arg(
    short = 'f',
    long,
    global = true,
    value_name = "PATH",
    long_help = "Netrc file to operate on.\n\n\
             Without this flag the NETRC environment variable is used, then the\n\
             `file` entry of the config, then ~/.netrc (or ~/.netrc.gpg when present)."
  )]
  pub file: Option<PathBuf>,

  /// Config file to read instead of the default location
  #[arg(long, global = true, value_name = "PATH", env = "KNIT_CONFIG")]
  pub config: Option<PathBuf>,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Subcommands for the knit tool
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Check that the netrc file exists, parses and is private
  #[command(long_about = "Checks the netrc file.\n\n\
            Verifies that the file exists and can be read (decrypting it when it is a\n\
            .gpg file), reports machines with incomplete credentials, and warns when\n\
            the file is readable by other users.")]
  Check,

  /// Show the properties of a machine
  #[command(long_about = "Shows the properties of a machine.\n\n\
            Without a property name the whole machine is listed, with the password\n\
            masked unless --show-secrets is given. With a property name only that\n\
            value is printed, raw and unmasked, which makes it convenient in scripts.")]
  Get(get::GetArgs),

  /// List the machines in the netrc file
  #[command(alias = "ls")]
  List(list::ListArgs),

  /// Print the netrc file that commands operate on
  Path,

  /// Remove a machine and the lines that belong to it
  #[command(alias = "rm")]
  Remove(remove::RemoveArgs),

  /// Rename a machine
  #[command(alias = "mv")]
  Rename(rename::RenameArgs),

  /// Add a machine or update its properties
  #[command(long_about = "Adds a machine or updates its properties.\n\n\
            Properties that are not mentioned are kept. A new machine is appended to\n\
            the end of the file, using the indentation of the last machine.")]
  Set(set::SetArgs),

  /// Remove properties from a machine
  Unset(unset::UnsetArgs),
}

pub fn handle_cli(cli: Cli) -> Result<()> {
  cli.colors.apply();

  let session = Session::new(cli.file.as_deref(), cli.config.as_deref())?;

  match cli.command {
    Commands::Check => check::handle_check_command(&session),
    Commands::Get(args) => get::handle_get_command(&session, args),
    Commands::List(args) => list::handle_list_command(&session, args),
    Commands::Path => path::handle_path_command(&session),
    Commands::Remove(args) => remove::handle_remove_command(&session, args),
    Commands::Rename(args) => rename::handle_rename_command(&session, args),
    Commands::Set(args) => set::handle_set_command(&session, args),
    Commands::Unset(args) => unset::handle_unset_command(&session, args),
  }
}
