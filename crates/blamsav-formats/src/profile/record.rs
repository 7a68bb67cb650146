//! In-memory profile record

use crate::profile::codec::ProfileCodec;
use crate::profile::error::{ProfileError, Result};
use crate::profile::input::InputMapping;
use crate::profile::layout::{Field, FieldSpec, NAME_LEN, NAME_MAX_UNITS};
use crate::profile::types::{
    AudioQuality, AudioVariety, Colour, Connection, FrameRate, Particles, ProfileAudio,
    ProfileDetails, ProfileMouse, ProfileNetwork, ProfileVideo, TextureQuality,
};
use blamsav_crypto::ProfileChecksum;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Settings held by one `blam.sav` profile record
///
/// Starts out with the engine's defaults; [`ProfileCodec::read`] overwrites
/// every field from a record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// Name and colour
    pub details: ProfileDetails,
    /// Mouse sensitivity and inversion
    pub mouse: ProfileMouse,
    /// Volumes, quality, variety, EAX and hardware acceleration
    pub audio: ProfileAudio,
    /// Resolution, rates, effects and qualities
    pub video: ProfileVideo,
    /// Connection class and ports
    pub network: ProfileNetwork,
    /// Gamepad bindings
    pub input: InputMapping,
}

impl ProfileRecord {
    /// Record holding the engine defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a record with default codec options
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        ProfileCodec::default().load(path)
    }

    /// Save into an existing record with default codec options
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<ProfileChecksum> {
        ProfileCodec::default().save(self, path)
    }

    /// Value written for a scalar field, zero-extended
    pub(crate) fn scalar(&self, field: Field) -> u32 {
        match field {
            Field::ProfileColour => self.details.colour.code().into(),
            Field::VideoFrameRate => self.video.frame_rate.code().into(),
            Field::VideoQualityParticles => self.video.particles.code().into(),
            Field::VideoQualityTextures => self.video.texture_quality.code().into(),
            Field::AudioQuality => self.audio.quality.code().into(),
            Field::AudioVariety => self.audio.variety.code().into(),
            Field::NetworkConnectionType => self.network.connection.code().into(),
            Field::VideoResolutionWidth => self.video.resolution.width.into(),
            Field::VideoResolutionHeight => self.video.resolution.height.into(),
            Field::NetworkPortServer => self.network.port.server.into(),
            Field::NetworkPortClient => self.network.port.client.into(),
            Field::VideoRefreshRate => self.video.refresh_rate.into(),
            Field::VideoMiscellaneousGamma => self.video.gamma.into(),
            Field::MouseSensitivityHorizontal => self.mouse.sensitivity.horizontal.into(),
            Field::MouseSensitivityVertical => self.mouse.sensitivity.vertical.into(),
            Field::AudioVolumeMaster => self.audio.volume.master.into(),
            Field::AudioVolumeEffects => self.audio.volume.effects.into(),
            Field::AudioVolumeMusic => self.audio.volume.music.into(),
            Field::MouseInvertVerticalAxis => self.mouse.invert_vertical_axis.into(),
            Field::VideoEffectsSpecular => self.video.effects.specular.into(),
            Field::VideoEffectsShadows => self.video.effects.shadows.into(),
            Field::VideoEffectsDecals => self.video.effects.decals.into(),
            Field::AudioEax => self.audio.eax.into(),
            Field::AudioHwa => self.audio.hwa.into(),
        }
    }

    /// Store a raw value read at the significant width of `entry`
    pub(crate) fn set_scalar(&mut self, entry: &FieldSpec, raw: u32) -> Result<()> {
        let byte = raw as u8;
        let short = raw as u16;
        let invalid = || ProfileError::InvalidFieldValue {
            field: entry.field,
            offset: entry.offset,
            value: byte,
        };

        match entry.field {
            Field::ProfileColour => {
                self.details.colour = if byte == Colour::UNSET {
                    debug!("Profile colour unset, using {}", Colour::default());
                    Colour::default()
                } else {
                    Colour::from_code(byte).ok_or_else(invalid)?
                };
            }
            Field::VideoFrameRate => {
                self.video.frame_rate = FrameRate::from_code(byte).ok_or_else(invalid)?;
            }
            Field::VideoQualityParticles => {
                self.video.particles = Particles::from_code(byte).ok_or_else(invalid)?;
            }
            Field::VideoQualityTextures => {
                self.video.texture_quality = TextureQuality::from_code(byte).ok_or_else(invalid)?;
            }
            Field::AudioQuality => {
                self.audio.quality = AudioQuality::from_code(byte).ok_or_else(invalid)?;
            }
            Field::AudioVariety => {
                self.audio.variety = AudioVariety::from_code(byte).ok_or_else(invalid)?;
            }
            Field::NetworkConnectionType => {
                self.network.connection = Connection::from_code(byte).ok_or_else(invalid)?;
            }
            Field::VideoResolutionWidth => self.video.resolution.width = short,
            Field::VideoResolutionHeight => self.video.resolution.height = short,
            Field::NetworkPortServer => self.network.port.server = short,
            Field::NetworkPortClient => self.network.port.client = short,
            Field::VideoRefreshRate => self.video.refresh_rate = byte,
            Field::VideoMiscellaneousGamma => self.video.gamma = byte,
            Field::MouseSensitivityHorizontal => self.mouse.sensitivity.horizontal = byte,
            Field::MouseSensitivityVertical => self.mouse.sensitivity.vertical = byte,
            Field::AudioVolumeMaster => self.audio.volume.master = byte,
            Field::AudioVolumeEffects => self.audio.volume.effects = byte,
            Field::AudioVolumeMusic => self.audio.volume.music = byte,
            Field::MouseInvertVerticalAxis => self.mouse.invert_vertical_axis = byte == 1,
            Field::VideoEffectsSpecular => self.video.effects.specular = byte == 1,
            Field::VideoEffectsShadows => self.video.effects.shadows = byte == 1,
            Field::VideoEffectsDecals => self.video.effects.decals = byte == 1,
            Field::AudioEax => self.audio.eax = byte == 1,
            Field::AudioHwa => self.audio.hwa = byte == 1,
        }

        Ok(())
    }
}

/// Encode a profile name as NUL-padded UTF-16LE
pub fn encode_name(name: &str) -> Result<[u8; NAME_LEN]> {
    let units: Vec<u16> = name.encode_utf16().collect();
    if units.len() > NAME_MAX_UNITS {
        return Err(ProfileError::NameTooLong { units: units.len() });
    }

    let mut field = [0u8; NAME_LEN];
    for (slot, unit) in field.chunks_exact_mut(2).zip(units) {
        slot.copy_from_slice(&unit.to_le_bytes());
    }
    Ok(field)
}

/// Decode a UTF-16LE name field, dropping trailing NULs
pub fn decode_name(field: &[u8]) -> Result<String> {
    let units: Vec<u16> = field
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    let name = String::from_utf16(&units).map_err(|_| ProfileError::InvalidName)?;
    Ok(name.trim_end_matches('\0').to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::profile::layout::{SCALAR_FIELDS, spec};

    #[test]
    fn test_defaults() {
        let record = ProfileRecord::new();
        assert_eq!(record.details.name, "New001");
        assert_eq!(record.details.colour, Colour::White);
        assert_eq!(record.mouse.sensitivity.horizontal, 3);
        assert!(!record.mouse.invert_vertical_axis);
        assert_eq!(record.video.resolution.width, 800);
        assert!(record.input.is_empty());
    }

    #[test]
    fn test_scalars_round_trip_through_significant_width() {
        let mut source = ProfileRecord::new();
        source.details.colour = Colour::Cobalt;
        source.video.resolution.width = 1920;
        source.video.resolution.height = 1080;
        source.video.gamma = 0xAB;
        source.network.port.server = 65000;
        source.audio.hwa = true;
        source.video.effects.shadows = false;

        let mut target = ProfileRecord::new();
        for entry in SCALAR_FIELDS {
            let mask = match entry.significant.bytes() {
                1 => 0xFF,
                2 => 0xFFFF,
                _ => u32::MAX,
            };
            target.set_scalar(&entry, source.scalar(entry.field) & mask).unwrap();
        }
        assert_eq!(target, source);
    }

    #[test]
    fn test_colour_sentinel_normalised() {
        let mut record = ProfileRecord::new();
        record.details.colour = Colour::Red;
        record
            .set_scalar(&spec(Field::ProfileColour), u32::from(Colour::UNSET))
            .unwrap();
        assert_eq!(record.details.colour, Colour::White);
    }

    #[test]
    fn test_unknown_enumerant_rejected() {
        let mut record = ProfileRecord::new();
        let err = record
            .set_scalar(&spec(Field::NetworkConnectionType), 7)
            .unwrap_err();
        assert!(matches!(
            err,
            ProfileError::InvalidFieldValue {
                field: Field::NetworkConnectionType,
                offset: 0x0FC0,
                value: 7
            }
        ));
    }

    #[test]
    fn test_flags_only_true_for_one() {
        let mut record = ProfileRecord::new();
        record.set_scalar(&spec(Field::AudioEax), 1).unwrap();
        assert!(record.audio.eax);
        record.set_scalar(&spec(Field::AudioEax), 2).unwrap();
        assert!(!record.audio.eax);
    }

    #[test]
    fn test_name_encoding() {
        let field = encode_name("Spartan").unwrap();
        assert_eq!(&field[..4], &[b'S', 0, b'p', 0]);
        assert!(field[14..].iter().all(|&b| b == 0));
        assert_eq!(decode_name(&field).unwrap(), "Spartan");

        let full = encode_name("ElevenChars").unwrap();
        assert_eq!(decode_name(&full).unwrap(), "ElevenChars");

        assert!(matches!(
            encode_name("TwelveCharss"),
            Err(ProfileError::NameTooLong { units: 12 })
        ));
    }

    #[test]
    fn test_name_decoding_rejects_lone_surrogate() {
        let mut field = [0u8; NAME_LEN];
        field[..2].copy_from_slice(&0xD800u16.to_le_bytes());
        assert!(matches!(decode_name(&field), Err(ProfileError::InvalidName)));
    }
}
