//! Command-line configuration
//!
//! Every global option can also come from the environment:
//!
//! | Option                | Variable                   |
//! |-----------------------|----------------------------|
//! | `--log-level`         | `BLAMSAV_LOG_LEVEL`        |
//! | `--checksum`          | `BLAMSAV_CHECKSUM`         |
//! | `--menu-accept-code`  | `BLAMSAV_MENU_ACCEPT_CODE` |
//! | `--menu-back-code`    | `BLAMSAV_MENU_BACK_CODE`   |
//! | `--hce-dir`           | `BLAMSAV_HCE_DIR`          |
//!
//! `RUST_LOG`, when set, takes precedence over `--log-level`.

use crate::commands::Commands;
use crate::error::CliError;
use blamsav_formats::profile::{Action, ChecksumPolicy, CodecOptions, UnknownActionPolicy};
use clap::Parser;

/// Arguments of the `blamsav` tool
#[derive(Debug, Parser)]
#[command(
    name = "blamsav",
    about = "Inspect and edit Halo: Combat Evolved blam.sav profiles",
    version
)]
pub struct Cli {
    /// Logging level
    #[arg(
        short,
        long,
        value_enum,
        global = true,
        env = "BLAMSAV_LOG_LEVEL",
        default_value = "warn"
    )]
    pub log_level: LogLevel,

    /// Output format
    #[arg(short = 'o', long, value_enum, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Checksum handling when loading
    #[arg(
        long,
        value_enum,
        global = true,
        env = "BLAMSAV_CHECKSUM",
        default_value = "ignore"
    )]
    pub checksum: ChecksumMode,

    /// Treat button slots with unknown action codes as unbound
    #[arg(long, global = true)]
    pub skip_unknown_actions: bool,

    /// Code stored for the MenuAccept action (decimal or 0x hex)
    #[arg(long, global = true, env = "BLAMSAV_MENU_ACCEPT_CODE", value_parser = parse_code)]
    pub menu_accept_code: Option<u8>,

    /// Code stored for the MenuBack action (decimal or 0x hex)
    #[arg(long, global = true, env = "BLAMSAV_MENU_BACK_CODE", value_parser = parse_code)]
    pub menu_back_code: Option<u8>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Parse from the process arguments and environment
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Codec options selected by the global arguments
    pub fn codec_options(&self) -> CodecOptions {
        let defaults = CodecOptions::default().action_codes;
        let accept = self
            .menu_accept_code
            .unwrap_or_else(|| defaults.code(Action::MenuAccept));
        let back = self
            .menu_back_code
            .unwrap_or_else(|| defaults.code(Action::MenuBack));

        let unknown_actions = if self.skip_unknown_actions {
            UnknownActionPolicy::Skip
        } else {
            UnknownActionPolicy::Reject
        };

        CodecOptions::new()
            .with_checksum(self.checksum.into())
            .with_action_codes(defaults.with_menu_codes(accept, back))
            .with_unknown_actions(unknown_actions)
    }
}

/// Logging level
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    /// Everything
    Trace,
    /// Per-field detail
    Debug,
    /// One line per record
    Info,
    /// Problems only
    Warn,
    /// Failures only
    Error,
}

impl LogLevel {
    /// Filter directive for this level
    pub const fn as_filter(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Output format
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Checksum handling when loading
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChecksumMode {
    /// Do not check
    Ignore,
    /// Warn on mismatch
    Warn,
    /// Fail on mismatch
    Reject,
}

impl From<ChecksumMode> for ChecksumPolicy {
    fn from(mode: ChecksumMode) -> Self {
        match mode {
            ChecksumMode::Ignore => Self::Ignore,
            ChecksumMode::Warn => Self::Warn,
            ChecksumMode::Reject => Self::Reject,
        }
    }
}

/// Parse an action code written in decimal or `0x` hex
pub fn parse_code(value: &str) -> Result<u8, CliError> {
    let parsed = match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => value.parse(),
    };
    parsed.map_err(|_| CliError::InvalidCode(value.to_string()))
}
