//! # Knit CLI Library
//!
//! Command-line front end over `knit-core`: argument parsing, config
//! loading and the handlers behind each `knit` subcommand.

pub mod cli;
pub mod config;
pub mod output;
