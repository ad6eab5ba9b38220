//! osw CLI library
//!
//! Command handlers for the `osw` binary, split out so they can be driven
//! from integration tests as well as from `main`.

pub mod commands;
pub mod error;

pub use error::CliError;
