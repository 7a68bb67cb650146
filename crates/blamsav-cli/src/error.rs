//! Error types for the command-line tool

use blamsav_crypto::ProfileChecksum;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by argument parsing and command handling
#[derive(Debug, Error)]
pub enum CliError {
    /// Binding argument is not `ACTION=BUTTON`
    #[error("Invalid binding '{0}': expected ACTION=BUTTON")]
    InvalidBinding(String),

    /// No action has this name
    #[error("Unknown action '{0}'")]
    UnknownAction(String),

    /// No button has this name
    #[error("Unknown button '{0}'")]
    UnknownButton(String),

    /// No colour has this name
    #[error("Unknown colour '{0}'")]
    UnknownColour(String),

    /// Resolution argument is not `WIDTHxHEIGHT`
    #[error("Invalid resolution '{0}': expected WIDTHxHEIGHT")]
    InvalidResolution(String),

    /// Action code is not a byte in decimal or `0x` hex
    #[error("Invalid action code '{0}'")]
    InvalidCode(String),

    /// Neither a profiles directory nor a game directory was given
    #[error("No profiles directory given: pass DIR or --hce-dir")]
    MissingDirectory,

    /// Stored checksum does not match the record body
    #[error("Checksum mismatch in {}: stored {stored}, computed {computed}", .path.display())]
    ChecksumMismatch {
        /// Record checked
        path: PathBuf,
        /// Checksum found in the record
        stored: ProfileChecksum,
        /// Checksum of the record body
        computed: ProfileChecksum,
    },
}
