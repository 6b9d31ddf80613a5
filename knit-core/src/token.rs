//! # Tokens
//!
//! The token sequence is the single source of truth for a parsed netrc file.
//! Machine entries keep enough layout detail (preceding text, indentation,
//! comments) to be written back byte-for-byte, and everything the parser does
//! not recognize travels along as opaque text.

use indexmap::IndexMap;

/// Whitespace placed before every property of a machine that was parsed
/// without any property lines of its own.
pub const DEFAULT_MULTILINE_WHITESPACE: &str = "\n  ";

/// Separator used between the header and properties of an inline machine.
pub const INLINE_WHITESPACE: &str = " ";

/// How a machine's properties are laid out relative to its header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
  /// `machine host login user password secret` on one line
  Inline,
  /// Header on its own line, one indented property per following line
  Multiline,
}

/// A single property value and the comment that trailed it, if any.
///
/// The comment is stored verbatim including its leading whitespace, so that
/// `password secret   # rotated` survives a round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prop {
  pub value: String,
  pub comment: Option<String>,
}

impl Prop {
  pub fn new(value: impl Into<String>) -> Self {
    Self {
      value: value.into(),
      comment: None,
    }
  }

  pub fn with_comment(value: impl Into<String>, comment: Option<String>) -> Self {
    Self {
      value: value.into(),
      comment,
    }
  }
}

/// One `machine` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineToken {
  pub host: String,
  /// Raw lines that appeared before the header, joined with `\n` and without
  /// a trailing newline. Empty when nothing preceded the entry.
  pub pre: String,
  /// Separator emitted before each property. Contains a newline for
  /// multiline entries, in which case it also carries the indentation.
  pub internal_whitespace: String,
  pub props: IndexMap<String, Prop>,
  /// Comment trailing the header line, starting at `#`.
  pub comment: Option<String>,
}

impl MachineToken {
  /// Creates an entry with no properties, no preceding text and no comment.
  pub fn new(host: impl Into<String>, internal_whitespace: impl Into<String>) -> Self {
    Self {
      host: host.into(),
      pre: String::new(),
      internal_whitespace: internal_whitespace.into(),
      props: IndexMap::new(),
      comment: None,
    }
  }

  pub fn layout(&self) -> Layout {
    if self.internal_whitespace.contains('\n') {
      Layout::Multiline
    } else {
      Layout::Inline
    }
  }

  /// Property keys in the order they are written: `login`, then `password`,
  /// then everything else in insertion order.
  pub fn ordered_keys(&self) -> impl Iterator<Item = &str> {
    let login = self.props.get_key_value("login").map(|(k, _)| k.as_str());
    let password = self.props.get_key_value("password").map(|(k, _)| k.as_str());
    let rest = self
      .props
      .keys()
      .map(String::as_str)
      .filter(|k| *k != "login" && *k != "password");

    login.into_iter().chain(password).chain(rest)
  }
}

/// An element of the parsed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
  Machine(MachineToken),
  /// Text that is not part of any entry, emitted unchanged.
  Other(String),
}

impl Token {
  pub fn as_machine(&self) -> Option<&MachineToken> {
    match self {
      Token::Machine(machine) => Some(machine),
      Token::Other(_) => None,
    }
  }

  pub fn as_machine_mut(&mut self) -> Option<&mut MachineToken> {
    match self {
      Token::Machine(machine) => Some(machine),
      Token::Other(_) => None,
    }
  }
}
