//! # Knit Core Library
//!
//! Format-preserving reading and editing of `.netrc` credential files.
//! Parsing produces a token sequence that remembers comments, indentation,
//! macro definitions and any other content it does not understand, so that
//! changing one property of one machine leaves every other byte of the file
//! untouched when it is written back.
//!
//! ```
//! let mut netrc = knit_core::parse("# work\nmachine a\n  login foo\n  password bar\n");
//! netrc.get_mut("a").unwrap().set("login", "foo2").unwrap();
//! assert_eq!(netrc.to_string(), "# work\nmachine a\n  login foo2\n  password bar\n");
//! ```

pub mod cipher;
pub mod error;
pub mod machines;
pub mod parser;
pub mod paths;
pub mod platform;
pub mod serializer;
pub mod store;
pub mod token;

// Re-export main types
pub use cipher::{Cipher, Gpg};
pub use error::StoreError;
pub use machines::{Credentials, EditError, HOST_KEY, Machine, MachineMut, Netrc};
pub use parser::{parse, tokenize};
pub use paths::default_netrc_path;
pub use serializer::serialize;
pub use store::NetrcFile;
pub use token::{Layout, MachineToken, Prop, Token};
