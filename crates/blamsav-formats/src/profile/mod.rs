//! `blam.sav` profile records
//!
//! A profile record is a fixed 8192-byte file holding one player's settings:
//! name and colour, mouse, audio, video, network and gamepad bindings. The
//! last four bytes are a checksum of everything before them; the engine
//! refuses records whose checksum does not match.
//!
//! # Format Overview
//!
//! - Length: 0x2000 bytes, checksum at 0x1FFC
//! - All multi-byte integers: little-endian
//! - Name: UTF-16LE at 0x0002, 22 bytes
//! - Fields: sparse, addressed by absolute offset (see [`layout`])
//! - Bindings: one byte per button slot holding an action code
//!
//! # Usage
//!
//! ```rust,no_run
//! use blamsav_formats::profile::{Action, Button, Colour, ProfileRecord};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut record = ProfileRecord::load("savegames/New001/blam.sav")?;
//! record.details.colour = Colour::Cobalt;
//! record.input.bind(Action::Jump, Button::A);
//!
//! let checksum = record.save("savegames/New001/blam.sav")?;
//! println!("new checksum: {checksum}");
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod config;
pub mod discovery;
pub mod error;
pub mod input;
pub mod layout;
pub mod record;
pub mod types;

// Re-export main types
pub use codec::{ChecksumReport, ProfileCodec, checksum_report};
pub use config::{ChecksumPolicy, CodecOptions, UnknownActionPolicy};
pub use discovery::{DetectedProfile, LastProfile, ProfileLocator, detect, list, scan};
pub use error::{ProfileError, Result};
pub use input::{Action, ActionCodes, Button, CodeCollision, InputMapping, UNBOUND};
pub use layout::{CHECKSUM_OFFSET, Field, RECORD_LEN};
pub use record::ProfileRecord;
pub use types::{
    AudioQuality, AudioVariety, AudioVolume, Colour, Connection, FrameRate, MouseSensitivity,
    NetworkPort, Particles, ProfileAudio, ProfileDetails, ProfileMouse, ProfileNetwork,
    ProfileVideo, TextureQuality, VideoEffects, VideoResolution,
};

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_re_exports_accessible() {
        let codec = ProfileCodec::new(CodecOptions::default());
        assert_eq!(codec.options().checksum, ChecksumPolicy::Ignore);
        assert_eq!(ProfileRecord::new().details.colour, Colour::White);
        assert_eq!(RECORD_LEN - CHECKSUM_OFFSET, 4);
    }

    #[test]
    fn test_basic_workflow() {
        let mut record = ProfileRecord::new();
        record.details.name = "Spartan".to_string();
        record.input.bind(Action::Crouch, Button::LSM);

        let codec = ProfileCodec::default();
        let bytes = codec.encode_to_vec(&record).expect("Should encode record");
        let parsed = codec
            .read(&mut std::io::Cursor::new(&bytes))
            .expect("Should decode record");
        assert_eq!(parsed, record);
    }
}
