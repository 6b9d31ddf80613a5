//! # Set Command
//!
//! Creates a machine or merges new property values into it.

use anyhow::{Context, Result};
use clap::Args;

use crate::config::Session;
use crate::output::{format_host, print_success};

/// Arguments for the set command
#[derive(Args, Debug)]
pub struct SetArgs {
  /// Host of the machine
  pub host: String,

  /// Login name
  #[arg(short, long, value_parser = parse_value)]
  pub login: Option<String>,

  /// Password or token
  #[arg(short, long, value_parser = parse_value)]
  pub password: Option<String>,

  /// Account name
  #[arg(short, long, value_parser = parse_value)]
  pub account: Option<String>,

  /// Any other property, as KEY=VALUE (can be used multiple times)
  #[arg(long = "prop", value_name = "KEY=VALUE", value_parser = parse_key_value)]
  pub props: Vec<(String, String)>,
}

impl SetArgs {
  /// Property assignments in the order they are applied. An empty value
  /// removes the property.
  pub fn assignments(&self) -> Vec<(String, String)> {
    let named = [
      ("login", &self.login),
      ("password", &self.password),
      ("account", &self.account),
    ];
    named
      .into_iter()
      .filter_map(|(key, value)| value.as_ref().map(|value| (key.to_string(), value.clone())))
      .chain(self.props.iter().cloned())
      .collect()
  }
}

/// Netrc values are single whitespace-free words.
pub fn parse_value(arg: &str) -> Result<String, String> {
  if arg.chars().any(char::is_whitespace) {
    return Err("values cannot contain whitespace".to_string());
  }
  Ok(arg.to_string())
}

/// Parses a `KEY=VALUE` argument. The value may be empty or contain `=`.
pub fn parse_key_value(arg: &str) -> Result<(String, String), String> {
  let (key, value) = arg
    .split_once('=')
    .ok_or_else(|| format!("expected KEY=VALUE, got '{arg}'"))?;
  if key.is_empty() || key.chars().any(char::is_whitespace) {
    return Err(format!("invalid property name '{key}'"));
  }
  Ok((key.to_string(), parse_value(value)?))
}

pub fn handle_set_command(session: &Session, args: SetArgs) -> Result<()> {
  let mut netrc = session.open()?;
  let existed = netrc.machines().contains(&args.host);

  netrc
    .machines_mut()
    .set(&args.host, args.assignments())
    .with_context(|| format!("Failed to update machine '{}'", args.host))?;
  netrc
    .save()
    .with_context(|| format!("Failed to save {}", session.netrc_path.display()))?;

  let verb = if existed { "Updated" } else { "Added" };
  print_success(&format!("{verb} machine {}", format_host(&args.host)));
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_key_value() {
    assert_eq!(parse_key_value("port=22"), Ok(("port".into(), "22".into())));
    assert_eq!(parse_key_value("token=a=b"), Ok(("token".into(), "a=b".into())));
    assert_eq!(parse_key_value("account="), Ok(("account".into(), String::new())));
    assert!(parse_key_value("novalue").is_err());
    assert!(parse_key_value("=x").is_err());
    assert!(parse_key_value("k=a b").is_err());
  }

  #[test]
  fn test_assignments_apply_named_flags_first() {
    let args = SetArgs {
      host: "h".into(),
      login: Some("u".into()),
      password: None,
      account: Some(String::new()),
      props: vec![("port".into(), "22".into())],
    };

    assert_eq!(
      args.assignments(),
      vec![
        ("login".to_string(), "u".to_string()),
        ("account".to_string(), String::new()),
        ("port".to_string(), "22".to_string()),
      ]
    );
  }
}
