//! # Netrc Serializer
//!
//! Rebuilds netrc text from a token sequence. Opaque tokens are written
//! verbatim; machine tokens are written from their stored layout, with
//! `login` and `password` always leading the property list.

use crate::token::{Layout, MachineToken, Token};

/// Renders `tokens` back into netrc text.
///
/// For a sequence produced by [`crate::parser::tokenize`] from text that this
/// function generated, the output equals that text.
pub fn serialize(tokens: &[Token]) -> String {
  let mut output = String::new();
  for token in tokens {
    match token {
      Token::Other(content) => output.push_str(content),
      Token::Machine(machine) => write_machine(&mut output, machine),
    }
  }
  output
}

fn write_machine(output: &mut String, machine: &MachineToken) {
  if !machine.pre.is_empty() {
    output.push_str(&machine.pre);
    output.push('\n');
  }

  output.push_str("machine ");
  output.push_str(&machine.host);

  match machine.layout() {
    Layout::Multiline => {
      write_header_comment(output, machine);
      write_props(output, machine);
    }
    Layout::Inline => {
      write_props(output, machine);
      write_header_comment(output, machine);
    }
  }
  output.push('\n');
}

fn write_header_comment(output: &mut String, machine: &MachineToken) {
  if let Some(comment) = &machine.comment {
    output.push(' ');
    output.push_str(comment);
  }
}

fn write_props(output: &mut String, machine: &MachineToken) {
  for key in machine.ordered_keys() {
    let Some(prop) = machine.props.get(key) else {
      continue;
    };
    output.push_str(&machine.internal_whitespace);
    output.push_str(key);
    output.push(' ');
    output.push_str(&prop.value);
    if let Some(comment) = &prop.comment {
      output.push_str(comment);
    }
  }
}
