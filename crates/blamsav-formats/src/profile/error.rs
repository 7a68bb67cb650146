//! Error types for profile record operations

use crate::profile::input::{Action, Button};
use crate::profile::layout::Field;
use blamsav_crypto::ProfileChecksum;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when reading, writing or locating profile records
#[derive(Debug, Error)]
pub enum ProfileError {
    /// Pointer file or record file does not exist
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Profiles directory does not exist
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// Record is not the fixed record length
    #[error("Unexpected record length: expected {expected} bytes, got {actual} bytes")]
    UnexpectedLength {
        /// Fixed record length
        expected: usize,
        /// Length found
        actual: usize,
    },

    /// Profile name does not fit the name field
    #[error("Profile name is {units} UTF-16 units long, the limit is 11")]
    NameTooLong {
        /// Encoded length in UTF-16 code units
        units: usize,
    },

    /// Name field does not hold valid UTF-16
    #[error("Profile name is not valid UTF-16")]
    InvalidName,

    /// Byte at a field offset is not a known value for that field
    #[error("Invalid value {value:#04x} for {field} at offset {offset:#06x}")]
    InvalidFieldValue {
        /// Field being decoded
        field: Field,
        /// Offset of the field
        offset: u16,
        /// Raw value found
        value: u8,
    },

    /// Button slot holds a code no action uses
    #[error("Unknown action code {code:#04x} on button {button}")]
    UnknownActionCode {
        /// Button whose slot held the code
        button: Button,
        /// Raw code found
        code: u8,
    },

    /// Button slot holds a code shared by several actions
    #[error("Action code {code:#04x} is shared by {actions:?}")]
    AmbiguousActionCode {
        /// Shared code
        code: u8,
        /// Actions using the code
        actions: Vec<Action>,
    },

    /// Stored checksum does not match the record body
    #[error("Checksum mismatch: stored {stored}, computed {computed}")]
    ChecksumMismatch {
        /// Checksum found in the record
        stored: ProfileChecksum,
        /// Checksum of the record body
        computed: ProfileChecksum,
    },

    /// `lastprof.txt` content does not name a profile
    #[error("Invalid last profile pointer: {0:?}")]
    InvalidPointer(String),

    /// Binary read/write error
    #[error("Binary parsing error: {0}")]
    BinRead(String),

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<binrw::Error> for ProfileError {
    fn from(e: binrw::Error) -> Self {
        match e {
            binrw::Error::Io(io) => Self::Io(io),
            other => Self::BinRead(other.to_string()),
        }
    }
}

/// Result type alias for profile operations
pub type Result<T> = std::result::Result<T, ProfileError>;
