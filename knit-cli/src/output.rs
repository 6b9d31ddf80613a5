//! # Output Formatting
//!
//! Status lines with emojis and colors, plus the small formatters used when
//! printing machines. Colors follow the `--colors` mode and fall back to
//! terminal detection.

use owo_colors::{OwoColorize, Stream, Style};

/// Placeholder printed instead of a secret value.
pub const MASK: &str = "********";

/// Enum representing different color modes for output
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
  /// Enable colored output
  Yes,
  /// Enable colored output (alias for Yes)
  Always,
  /// Automatically detect if colors should be used based on terminal
  /// capabilities
  Auto,
  /// Disable colored output
  No,
  /// Disable colored output (alias for No)
  Never,
}

impl ColorMode {
  /// Applies the mode as the global color override.
  pub fn apply(self) {
    match self {
      Self::Always | Self::Yes => owo_colors::set_override(true),
      Self::Never | Self::No => owo_colors::set_override(false),
      // Leave terminal detection in charge
      Self::Auto => {}
    }
  }
}

/// Helper function to safely get an emoji or fallback to a default character
pub fn get_emoji_or_default(name: &str, default: &str) -> String {
  match emojis::get_by_shortcode(name) {
    Some(emoji) => emoji.to_string(),
    None => default.to_string(),
  }
}

fn paint(text: &str, stream: Stream, style: Style) -> String {
  text.if_supports_color(stream, |t| t.style(style)).to_string()
}

/// Print a success message
pub fn print_success(message: &str) {
  let check = get_emoji_or_default("check_mark", "✓");
  println!("{} {}", paint(&check, Stream::Stdout, Style::new().green().bold()), message);
}

/// Print an error message
pub fn print_error(message: &str) {
  let cross = get_emoji_or_default("cross_mark", "✗");
  eprintln!("{} {}", paint(&cross, Stream::Stderr, Style::new().red().bold()), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
  let warning = get_emoji_or_default("warning", "⚠");
  println!("{} {}", paint(&warning, Stream::Stdout, Style::new().yellow().bold()), message);
}

/// Print an info message
pub fn print_info(message: &str) {
  let info = get_emoji_or_default("information", "ℹ");
  println!("{} {}", paint(&info, Stream::Stdout, Style::new().blue().bold()), message);
}

/// Format a file path
pub fn format_path(path: &str) -> String {
  paint(path, Stream::Stdout, Style::new().bright_green())
}

/// Format a machine host
pub fn format_host(host: &str) -> String {
  paint(host, Stream::Stdout, Style::new().bright_cyan().bold())
}

/// Format a property name
pub fn format_key(key: &str) -> String {
  paint(key, Stream::Stdout, Style::new().yellow())
}

/// Format a command or command example
pub fn format_command(cmd: &str) -> String {
  paint(cmd, Stream::Stdout, Style::new().purple())
}

/// Whether a property holds a secret that is masked by default.
pub fn is_secret(key: &str) -> bool {
  key == "password"
}

/// The value to display for `key`, masked unless `show_secrets` is set.
pub fn display_value<'a>(key: &str, value: &'a str, show_secrets: bool) -> &'a str {
  if is_secret(key) && !show_secrets { MASK } else { value }
}
