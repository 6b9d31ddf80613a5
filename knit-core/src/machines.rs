//! # Machines
//!
//! The editable model over a parsed netrc file. [`Netrc`] owns the token
//! sequence and keeps a host index of positions into it; the read view
//! [`Machine`] and write view [`MachineMut`] translate property access into
//! token reads and mutations so that untouched bytes are written back exactly
//! as they were read.

use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use crate::serializer::serialize;
use crate::token::{INLINE_WHITESPACE, Layout, MachineToken, Prop, Token};

/// Property name that addresses the machine's host rather than a property.
pub const HOST_KEY: &str = "host";

/// Represents credentials for a machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
  pub username: String,
  pub password: String,
}

/// Errors raised by structural edits of a [`Netrc`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
  #[error("no machine named '{0}'")]
  UnknownHost(String),
  #[error("a machine named '{0}' already exists")]
  HostExists(String),
  #[error("machine host cannot be empty")]
  EmptyHost,
}

/// A parsed netrc file.
///
/// Token order is authoritative for output; the host index only maps hosts
/// to token positions and is rebuilt whenever positions shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Netrc {
  tokens: Vec<Token>,
  index: HashMap<String, usize>,
}

impl Default for Netrc {
  fn default() -> Self {
    Self::from_tokens(vec![Token::Other(String::new())])
  }
}

impl Netrc {
  /// Wraps an already tokenized file. Later entries whose host is already
  /// indexed are left out of the index.
  pub fn from_tokens(tokens: Vec<Token>) -> Self {
    let mut netrc = Self {
      tokens,
      index: HashMap::new(),
    };
    netrc.reindex();
    netrc
  }

  fn reindex(&mut self) {
    self.index.clear();
    for (position, token) in self.tokens.iter().enumerate() {
      if let Token::Machine(machine) = token
        && !machine.host.is_empty()
      {
        self.index.entry(machine.host.clone()).or_insert(position);
      }
    }
  }

  /// The underlying token sequence, in output order.
  pub fn tokens(&self) -> &[Token] {
    &self.tokens
  }

  pub fn into_tokens(self) -> Vec<Token> {
    self.tokens
  }

  /// Hosts in the order their entries appear in the file, followed by
  /// entries added since parsing in the order they were added.
  pub fn hosts(&self) -> impl Iterator<Item = &str> {
    self
      .tokens
      .iter()
      .enumerate()
      .filter_map(|(position, token)| match token {
        Token::Machine(machine) if self.index.get(&machine.host) == Some(&position) => Some(machine.host.as_str()),
        _ => None,
      })
  }

  pub fn contains(&self, host: &str) -> bool {
    self.index.contains_key(host)
  }

  pub fn len(&self) -> usize {
    self.index.len()
  }

  pub fn is_empty(&self) -> bool {
    self.index.is_empty()
  }

  pub fn get(&self, host: &str) -> Option<Machine<'_>> {
    let position = *self.index.get(host)?;
    let token = self.tokens.get(position)?.as_machine()?;
    Some(Machine { token })
  }

  pub fn get_mut(&mut self, host: &str) -> Option<MachineMut<'_>> {
    let position = *self.index.get(host)?;
    self.machine_at(position)
  }

  /// Returns the `login`/`password` pair for `host` when both are set.
  pub fn credentials(&self, host: &str) -> Option<Credentials> {
    let machine = self.get(host)?;
    let username = machine.login().filter(|v| !v.is_empty())?;
    let password = machine.password().filter(|v| !v.is_empty())?;
    Some(Credentials {
      username: username.to_string(),
      password: password.to_string(),
    })
  }

  /// Writes `props` into the machine for `host`, creating the machine at the
  /// end of the file if it does not exist yet.
  ///
  /// Existing properties that are not mentioned are kept. An empty value
  /// removes the property, and the key `host` renames the machine.
  ///
  /// A new machine copies the property whitespace of the last machine in the
  /// file, or is written inline when there is none.
  ///
  /// When any property fails to apply, the model is left as it was.
  pub fn set<I, K, V>(&mut self, host: &str, props: I) -> Result<MachineMut<'_>, EditError>
  where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
  {
    if host.is_empty() {
      return Err(EditError::EmptyHost);
    }

    let created = !self.index.contains_key(host);
    if created {
      self.push_machine(host);
    }
    let position = self
      .index
      .get(host)
      .copied()
      .ok_or_else(|| EditError::UnknownHost(host.to_string()))?;
    let backup = if created { None } else { self.tokens.get(position).cloned() };

    let applied = match self.machine_at(position) {
      Some(mut machine) => props
        .into_iter()
        .try_for_each(|(key, value)| machine.set(key.as_ref(), value.as_ref())),
      None => Err(EditError::UnknownHost(host.to_string())),
    };

    if let Err(err) = applied {
      debug!(host, %err, "Rolling back machine edit");
      if created {
        self.discard_last_machine();
      } else if let (Some(token), Some(slot)) = (backup, self.tokens.get_mut(position)) {
        *slot = token;
      }
      self.reindex();
      return Err(err);
    }

    self
      .machine_at(position)
      .ok_or_else(|| EditError::UnknownHost(host.to_string()))
  }

  /// Appends an empty machine for `host` and indexes it.
  fn push_machine(&mut self, host: &str) {
    let whitespace = self
      .tokens
      .iter()
      .rev()
      .find_map(Token::as_machine)
      .map_or(INLINE_WHITESPACE, |last| last.internal_whitespace.as_str())
      .to_string();
    let mut machine = MachineToken::new(host, whitespace);

    // Trailing text without a final newline would run into the new header
    if let Some(Token::Other(trailing)) = self.tokens.last_mut()
      && !trailing.is_empty()
      && !trailing.ends_with('\n')
    {
      machine.pre = std::mem::take(trailing);
    }

    debug!(host, "Adding machine");
    self.tokens.push(Token::Machine(machine));
    self.index.insert(host.to_string(), self.tokens.len() - 1);
  }

  /// Undoes [`push_machine`](Self::push_machine), handing any text it took
  /// back to the trailing token.
  fn discard_last_machine(&mut self) {
    if let Some(Token::Machine(machine)) = self.tokens.pop()
      && !machine.pre.is_empty()
      && let Some(Token::Other(trailing)) = self.tokens.last_mut()
    {
      *trailing = machine.pre;
    }
  }

  fn machine_at(&mut self, position: usize) -> Option<MachineMut<'_>> {
    let token = self.tokens.get_mut(position)?.as_machine_mut()?;
    Some(MachineMut {
      token,
      index: &mut self.index,
      position,
    })
  }

  /// Removes the machine for `host` together with the text preceding it.
  /// Returns `false` when no such machine exists.
  pub fn remove(&mut self, host: &str) -> bool {
    let Some(position) = self.index.get(host).copied() else {
      return false;
    };
    debug!(host, "Removing machine");
    self.tokens.remove(position);
    self.reindex();
    true
  }

  /// Changes the host of an existing machine, keeping its position.
  pub fn rename(&mut self, from: &str, to: &str) -> Result<(), EditError> {
    let mut machine = self
      .get_mut(from)
      .ok_or_else(|| EditError::UnknownHost(from.to_string()))?;
    machine.set_host(to)
  }

  /// Renders the file, reflecting every edit made so far.
  pub fn serialize(&self) -> String {
    serialize(&self.tokens)
  }
}

impl fmt::Display for Netrc {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.serialize())
  }
}

impl FromStr for Netrc {
  type Err = Infallible;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Ok(crate::parser::parse(s))
  }
}

/// Read-only view of one machine.
#[derive(Debug, Clone, Copy)]
pub struct Machine<'a> {
  token: &'a MachineToken,
}

impl<'a> Machine<'a> {
  pub fn host(&self) -> &'a str {
    &self.token.host
  }

  /// Looks up a property by name. The name `host` yields the host itself.
  pub fn get(&self, key: &str) -> Option<&'a str> {
    if key == HOST_KEY {
      return Some(self.token.host.as_str());
    }
    self.token.props.get(key).map(|prop| prop.value.as_str())
  }

  pub fn login(&self) -> Option<&'a str> {
    self.get("login")
  }

  pub fn password(&self) -> Option<&'a str> {
    self.get("password")
  }

  pub fn account(&self) -> Option<&'a str> {
    self.get("account")
  }

  /// The full property record, including any trailing comment.
  pub fn prop(&self, key: &str) -> Option<&'a Prop> {
    self.token.props.get(key)
  }

  /// Properties in output order.
  pub fn props(&self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
    let token = self.token;
    token
      .ordered_keys()
      .filter_map(move |key| token.props.get(key).map(|prop| (key, prop.value.as_str())))
  }

  /// Comment trailing the `machine` header line.
  pub fn comment(&self) -> Option<&'a str> {
    self.token.comment.as_deref()
  }

  pub fn layout(&self) -> Layout {
    self.token.layout()
  }

  pub fn token(&self) -> &'a MachineToken {
    self.token
  }
}

/// Mutable view of one machine. Edits go straight into the token sequence.
#[derive(Debug)]
pub struct MachineMut<'a> {
  token: &'a mut MachineToken,
  index: &'a mut HashMap<String, usize>,
  position: usize,
}

impl MachineMut<'_> {
  pub fn host(&self) -> &str {
    &self.token.host
  }

  pub fn get(&self, key: &str) -> Option<&str> {
    self.as_machine().get(key)
  }

  pub fn as_machine(&self) -> Machine<'_> {
    Machine { token: &*self.token }
  }

  /// Sets a property, keeping the comment already attached to it. `None` or
  /// an empty value removes the property; the key `host` renames the machine.
  pub fn set<'v>(&mut self, key: &str, value: impl Into<Option<&'v str>>) -> Result<(), EditError> {
    let value = value.into().unwrap_or_default();
    if key == HOST_KEY {
      return self.set_host(value);
    }
    if value.is_empty() {
      self.remove(key);
      return Ok(());
    }

    self
      .token
      .props
      .entry(key.to_string())
      .and_modify(|prop| prop.value = value.to_string())
      .or_insert_with(|| Prop::new(value));
    Ok(())
  }

  /// Removes a property, returning its previous value.
  pub fn remove(&mut self, key: &str) -> Option<String> {
    self.token.props.shift_remove(key).map(|prop| prop.value)
  }

  /// Renames the machine in place. Fails without changes when `host` is
  /// empty or already names another machine.
  pub fn set_host(&mut self, host: &str) -> Result<(), EditError> {
    if host == self.token.host {
      return Ok(());
    }
    if host.is_empty() {
      return Err(EditError::EmptyHost);
    }
    if self.index.contains_key(host) {
      return Err(EditError::HostExists(host.to_string()));
    }

    debug!(from = %self.token.host, to = host, "Renaming machine");
    self.index.remove(&self.token.host);
    self.index.insert(host.to_string(), self.position);
    self.token.host = host.to_string();
    Ok(())
  }
}
