//! Command-line tool for `blam.sav` profile records
//!
//! The library holds the argument definitions and command handlers so they
//! can be tested without spawning the binary.
//!
//! # Example
//!
//! ```no_run
//! use blamsav_cli::{Cli, handle};
//!
//! fn main() -> anyhow::Result<()> {
//!     let cli = Cli::from_args();
//!     handle(&cli, &mut std::io::stdout().lock())
//! }
//! ```

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod commands;
pub mod config;
pub mod error;

pub use commands::{Commands, SetArgs, handle};
pub use config::{Cli, LogLevel, OutputFormat};
pub use error::CliError;
