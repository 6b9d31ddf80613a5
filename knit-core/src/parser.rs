//! # Netrc Parser
//!
//! Line-oriented tokenizer that turns netrc text into a [`Token`] sequence
//! without losing any of the original formatting. Lines that do not belong to
//! a machine entry are accumulated and attached to the next entry as its
//! preceding text, or emitted as a trailing opaque token at the end.
//!
//! Parsing never fails: anything unrecognized is carried through verbatim.

use std::collections::VecDeque;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use crate::machines::Netrc;
use crate::token::{DEFAULT_MULTILINE_WHITESPACE, INLINE_WHITESPACE, MachineToken, Prop, Token};

// `machine <host> [<key> <value>]... [#comment]`, only at the start of a line
static MACHINE_PATTERN: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^\s*machine\s+((?:[^#\s]+\s*)+)(#.*)?$").expect("Failed to compile machine regex"));

// `<indent><key> <value> [#comment]`
static PROPERTY_PATTERN: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^(\s+)(\S+)\s+(\S+)(\s+#.*)?$").expect("Failed to compile property regex"));

/// Parses netrc text into an editable [`Netrc`] model.
///
/// # Examples
///
/// ```
/// let netrc = knit_core::parse("machine example.com login user password secret\n");
/// let machine = netrc.get("example.com").unwrap();
/// assert_eq!(machine.login(), Some("user"));
/// assert_eq!(netrc.to_string(), "machine example.com login user password secret\n");
/// ```
pub fn parse(text: &str) -> Netrc {
  Netrc::from_tokens(tokenize(text))
}

/// Splits netrc text into machine tokens followed by one trailing opaque
/// token holding whatever came after the last machine (possibly empty).
///
/// When a host appears more than once, only the first entry is kept. The
/// later entry's header and property lines are dropped.
pub fn tokenize(text: &str) -> Vec<Token> {
  let mut lines: VecDeque<&str> = text.split('\n').collect();
  let mut pre: Vec<&str> = Vec::new();
  let mut tokens: Vec<Token> = Vec::new();

  while let Some(line) = lines.pop_front() {
    let Some(captures) = MACHINE_PATTERN.captures(line) else {
      trace!(line, "Opaque line");
      pre.push(line);
      continue;
    };

    let body = captures.get(1).map_or("", |m| m.as_str());
    let comment = captures.get(2).map(|m| m.as_str().to_string());
    let words: Vec<&str> = body.split_whitespace().collect();
    let host = words.first().copied().unwrap_or_default();

    let mut machine = MachineToken::new(host, DEFAULT_MULTILINE_WHITESPACE);
    machine.comment = comment;

    if words.len() > 1 {
      trace!(host, "Inline machine");
      machine.internal_whitespace = INLINE_WHITESPACE.to_string();
      for pair in words[1..].chunks_exact(2) {
        machine.props.insert(pair[0].to_string(), Prop::new(pair[1]));
      }
    } else {
      trace!(host, "Multiline machine");
      consume_property_lines(&mut lines, &mut machine);
    }

    let duplicate = tokens
      .iter()
      .filter_map(Token::as_machine)
      .any(|existing| existing.host == machine.host);
    if duplicate {
      debug!(host = %machine.host, "Dropping duplicate machine entry");
      continue;
    }

    machine.pre = pre.join("\n");
    pre.clear();
    tokens.push(Token::Machine(machine));
  }

  debug!(machines = tokens.len(), "Parsed netrc");
  tokens.push(Token::Other(pre.join("\n")));
  tokens
}

/// Consumes indented `key value` lines following a multiline header. The
/// first line that is not a property is left at the front of the queue.
fn consume_property_lines(lines: &mut VecDeque<&str>, machine: &mut MachineToken) {
  while let Some(&line) = lines.front() {
    let Some(captures) = PROPERTY_PATTERN.captures(line) else {
      break;
    };

    let (Some(ws), Some(key), Some(value)) = (captures.get(1), captures.get(2), captures.get(3)) else {
      break;
    };
    let comment = captures.get(4).map(|m| m.as_str().to_string());

    machine
      .props
      .insert(key.as_str().to_string(), Prop::with_comment(value.as_str(), comment));
    // The indentation of the last property line wins.
    machine.internal_whitespace = format!("\n{}", ws.as_str());
    lines.pop_front();
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::token::Layout;

  fn machines(tokens: &[Token]) -> Vec<&MachineToken> {
    tokens.iter().filter_map(Token::as_machine).collect()
  }

  #[test]
  fn test_empty_input_yields_single_empty_opaque_token() {
    let tokens = tokenize("");
    assert_eq!(tokens, vec![Token::Other(String::new())]);
  }

  #[test]
  fn test_inline_machine() {
    let tokens = tokenize("machine ray login demo password mypassword");
    let machines = machines(&tokens);

    assert_eq!(machines.len(), 1);
    let ray = machines[0];
    assert_eq!(ray.host, "ray");
    assert_eq!(ray.layout(), Layout::Inline);
    assert_eq!(ray.internal_whitespace, " ");
    assert_eq!(ray.props["login"].value, "demo");
    assert_eq!(ray.props["password"].value, "mypassword");
  }

  #[test]
  fn test_inline_machine_with_odd_token_count_drops_dangling_key() {
    let tokens = tokenize("machine ray login demo password");
    let ray = machines(&tokens)[0];

    assert_eq!(ray.props.len(), 1);
    assert_eq!(ray.props["login"].value, "demo");
  }

  #[test]
  fn test_inline_comment_is_split_from_value() {
    let tokens = tokenize("machine weirdlogin login uname password pass#pass");
    let machine = machines(&tokens)[0];

    assert_eq!(machine.props["password"].value, "pass");
    assert_eq!(machine.comment.as_deref(), Some("#pass"));
  }

  #[test]
  fn test_multiline_machine_with_header_comment() {
    let tokens = tokenize("machine mail.google.com # foo\n  login joe@gmail.com\n  account gmail\n  password secret");
    let machine = machines(&tokens)[0];

    assert_eq!(machine.host, "mail.google.com");
    assert_eq!(machine.comment.as_deref(), Some("# foo"));
    assert_eq!(machine.layout(), Layout::Multiline);
    assert_eq!(machine.internal_whitespace, "\n  ");
    let keys: Vec<_> = machine.props.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["login", "account", "password"]);
  }

  #[test]
  fn test_multiline_whitespace_comes_from_last_property_line() {
    let tokens = tokenize("machine a\n  login u\n\tpassword p\n");
    let machine = machines(&tokens)[0];

    assert_eq!(machine.internal_whitespace, "\n\t");
  }

  #[test]
  fn test_multiline_machine_without_properties_uses_default_whitespace() {
    let tokens = tokenize("machine lonely\n");
    let machine = machines(&tokens)[0];

    assert_eq!(machine.internal_whitespace, DEFAULT_MULTILINE_WHITESPACE);
    assert!(machine.props.is_empty());
  }

  #[test]
  fn test_property_comment_keeps_leading_whitespace() {
    let tokens = tokenize("machine a\n  account justagmail #end of line comment\n");
    let machine = machines(&tokens)[0];

    assert_eq!(machine.props["account"].value, "justagmail");
    assert_eq!(
      machine.props["account"].comment.as_deref(),
      Some(" #end of line comment")
    );
  }

  #[test]
  fn test_property_lookahead_stops_at_first_non_property_line() {
    let tokens = tokenize("machine a\n  login u\n # a comment line\n  password p\n");
    let machine = machines(&tokens)[0];

    assert_eq!(machine.props.len(), 1);
    assert_eq!(
      tokens.last(),
      Some(&Token::Other(" # a comment line\n  password p\n".to_string()))
    );
  }

  #[test]
  fn test_preceding_text_is_attached_to_next_machine() {
    let tokens = tokenize("# comment\n\nmacdef init\nput x\n\nmachine a login u\n");
    let machine = machines(&tokens)[0];

    assert_eq!(machine.pre, "# comment\n\nmacdef init\nput x\n");
  }

  #[test]
  fn test_default_block_stays_opaque() {
    let tokens = tokenize("default\n  login anonymous\n  password joe@example.com\n");

    assert!(machines(&tokens).is_empty());
    assert_eq!(
      tokens,
      vec![Token::Other("default\n  login anonymous\n  password joe@example.com\n".to_string())]
    );
  }

  #[test]
  fn test_duplicate_hosts_keep_first_entry() {
    let tokens = tokenize("machine a\n  login foo\nmachine b login x\nmachine a\n  login ignoreme\n");
    let machines = machines(&tokens);

    assert_eq!(machines.len(), 2);
    assert_eq!(machines[0].props["login"].value, "foo");
    assert_eq!(machines[1].host, "b");
    assert_eq!(tokens.last(), Some(&Token::Other(String::new())));
  }

  #[test]
  fn test_text_before_duplicate_moves_to_following_entry() {
    let tokens = tokenize("machine a login u\n# note\nmachine a login v\nmachine b login w\n");
    let machines = machines(&tokens);

    assert_eq!(machines.len(), 2);
    assert_eq!(machines[1].host, "b");
    assert_eq!(machines[1].pre, "# note");
  }

  #[test]
  fn test_commented_out_machine_stays_opaque() {
    let text = "#machine old login x password y\n# machine older login z\nmachine a login u\n";
    let tokens = tokenize(text);
    let machines = machines(&tokens);

    assert_eq!(machines.len(), 1);
    assert_eq!(machines[0].host, "a");
    assert_eq!(machines[0].pre, "#machine old login x password y\n# machine older login z");
    assert_eq!(crate::serializer::serialize(&tokens), text);
  }

  #[test]
  fn test_machine_word_inside_a_line_is_not_a_header() {
    let tokens = tokenize("macdef init\nssh machine foo\n");

    assert!(machines(&tokens).is_empty());
    assert_eq!(tokens, vec![Token::Other("macdef init\nssh machine foo\n".to_string())]);
  }
}
