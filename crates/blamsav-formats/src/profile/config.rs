//! Codec configuration

use crate::profile::input::ActionCodes;
use serde::{Deserialize, Serialize};

/// What loading does with the stored checksum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChecksumPolicy {
    /// Do not look at it
    #[default]
    Ignore,
    /// Log a warning on mismatch and keep going
    Warn,
    /// Fail with [`ProfileError::ChecksumMismatch`](crate::profile::ProfileError::ChecksumMismatch)
    Reject,
}

/// What loading does with a button slot holding a code no action uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnknownActionPolicy {
    /// Fail with [`ProfileError::UnknownActionCode`](crate::profile::ProfileError::UnknownActionCode)
    #[default]
    Reject,
    /// Log and treat the button as unbound
    Skip,
}

/// Options shared by load and save
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CodecOptions {
    /// Checksum handling on load
    pub checksum: ChecksumPolicy,
    /// Action code table
    pub action_codes: ActionCodes,
    /// Unknown action code handling on load
    pub unknown_actions: UnknownActionPolicy,
}

impl CodecOptions {
    /// Default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set checksum handling on load
    #[must_use]
    pub const fn with_checksum(mut self, checksum: ChecksumPolicy) -> Self {
        self.checksum = checksum;
        self
    }

    /// Set the action code table
    #[must_use]
    pub const fn with_action_codes(mut self, action_codes: ActionCodes) -> Self {
        self.action_codes = action_codes;
        self
    }

    /// Set unknown action code handling on load
    #[must_use]
    pub const fn with_unknown_actions(mut self, unknown_actions: UnknownActionPolicy) -> Self {
        self.unknown_actions = unknown_actions;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::profile::input::CodeCollision;

    #[test]
    fn test_defaults_match_engine_behaviour() {
        let options = CodecOptions::default();
        assert_eq!(options.checksum, ChecksumPolicy::Ignore);
        assert_eq!(options.unknown_actions, UnknownActionPolicy::Reject);
        assert_eq!(options.action_codes, ActionCodes::default());
    }

    #[test]
    fn test_builder() {
        let options = CodecOptions::new()
            .with_checksum(ChecksumPolicy::Reject)
            .with_unknown_actions(UnknownActionPolicy::Skip)
            .with_action_codes(ActionCodes::new().with_collision(CodeCollision::Reject));
        assert_eq!(options.checksum, ChecksumPolicy::Reject);
        assert_eq!(options.unknown_actions, UnknownActionPolicy::Skip);
        assert_eq!(options.action_codes.collision(), CodeCollision::Reject);
    }

    #[test]
    fn test_serde_round_trip() {
        let options = CodecOptions::new().with_checksum(ChecksumPolicy::Warn);
        let json = serde_json::to_string(&options).unwrap();
        let parsed: CodecOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, options);
    }
}
