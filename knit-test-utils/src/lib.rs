//! Test utilities shared across the knit workspace
//!
//! This crate provides common testing infrastructure including:
//! - Temporary netrc files ([`NetrcGuard`])
//! - Isolated HOME/XDG environments for CLI runs ([`CliEnv`])
//!
//! The clippy dead_code lint is disabled for this crate because test utilities
//! may not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod env;
pub mod netrc;

// Re-export commonly used items
pub use env::CliEnv;
pub use netrc::NetrcGuard;
