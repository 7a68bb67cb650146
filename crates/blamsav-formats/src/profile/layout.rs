//! Byte layout of the `blam.sav` record
//!
//! ```text
//! [0x0000 .. 0x1FFC)  settings, sparse, addressed by absolute offset
//! [0x1FFC .. 0x2000)  checksum of everything before it
//! ```
//!
//! Scalar fields are described by [`SCALAR_FIELDS`]. Several enumerants and
//! 16-bit values occupy 4-byte slots that overlap their neighbours, so the
//! table order is also the write order: 4-byte slots are written first
//! (zeroing their upper bytes), then the 1-byte fields that share those
//! bytes. Reads only look at the significant width of each field.

use std::fmt;

/// Total record length, checksum included
pub const RECORD_LEN: usize = 0x2000;

/// Offset of the checksum; also the length of the checksummed body
pub const CHECKSUM_OFFSET: usize = 0x1FFC;

/// Length of the checksum field
pub const CHECKSUM_LEN: usize = RECORD_LEN - CHECKSUM_OFFSET;

/// Offset of the UTF-16LE profile name
pub const NAME_OFFSET: usize = 0x0002;

/// Byte length of the name field
pub const NAME_LEN: usize = 22;

/// Maximum name length in UTF-16 code units
pub const NAME_MAX_UNITS: usize = NAME_LEN / 2;

/// Width of a value on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    /// One byte
    Byte,
    /// Two bytes, little-endian
    Short,
    /// Four bytes, little-endian
    Int,
}

impl Width {
    /// Width in bytes
    pub const fn bytes(self) -> usize {
        match self {
            Self::Byte => 1,
            Self::Short => 2,
            Self::Int => 4,
        }
    }
}

/// Scalar fields of the record, declared in write order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Field {
    ProfileColour,
    VideoFrameRate,
    VideoQualityParticles,
    VideoQualityTextures,
    AudioQuality,
    AudioVariety,
    NetworkConnectionType,
    VideoResolutionWidth,
    VideoResolutionHeight,
    NetworkPortServer,
    NetworkPortClient,
    VideoRefreshRate,
    VideoMiscellaneousGamma,
    MouseSensitivityHorizontal,
    MouseSensitivityVertical,
    AudioVolumeMaster,
    AudioVolumeEffects,
    AudioVolumeMusic,
    MouseInvertVerticalAxis,
    VideoEffectsSpecular,
    VideoEffectsShadows,
    VideoEffectsDecals,
    AudioEax,
    AudioHwa,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Placement of one scalar field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field described
    pub field: Field,
    /// Absolute offset in the record
    pub offset: u16,
    /// Width written on save
    pub stored: Width,
    /// Width read on load
    pub significant: Width,
}

impl FieldSpec {
    const fn new(field: Field, offset: u16, stored: Width, significant: Width) -> Self {
        Self {
            field,
            offset,
            stored,
            significant,
        }
    }

    /// Byte range covered when the field is written
    pub const fn stored_range(&self) -> std::ops::Range<usize> {
        self.offset as usize..self.offset as usize + self.stored.bytes()
    }
}

/// Scalar fields in write order
pub const SCALAR_FIELDS: [FieldSpec; 24] = [
    // Enumerants
    FieldSpec::new(Field::ProfileColour, 0x011A, Width::Byte, Width::Byte),
    FieldSpec::new(Field::VideoFrameRate, 0x0A6F, Width::Int, Width::Byte),
    FieldSpec::new(Field::VideoQualityParticles, 0x0A73, Width::Int, Width::Byte),
    FieldSpec::new(Field::VideoQualityTextures, 0x0A74, Width::Int, Width::Byte),
    FieldSpec::new(Field::AudioQuality, 0x0B7D, Width::Int, Width::Byte),
    FieldSpec::new(Field::AudioVariety, 0x0B7F, Width::Int, Width::Byte),
    FieldSpec::new(Field::NetworkConnectionType, 0x0FC0, Width::Int, Width::Byte),
    // 16-bit values in 4-byte slots
    FieldSpec::new(Field::VideoResolutionWidth, 0x0A68, Width::Int, Width::Short),
    FieldSpec::new(Field::VideoResolutionHeight, 0x0A6A, Width::Int, Width::Short),
    FieldSpec::new(Field::NetworkPortServer, 0x1002, Width::Int, Width::Short),
    FieldSpec::new(Field::NetworkPortClient, 0x1004, Width::Int, Width::Short),
    // Bytes
    FieldSpec::new(Field::VideoRefreshRate, 0x0A6C, Width::Byte, Width::Byte),
    FieldSpec::new(Field::VideoMiscellaneousGamma, 0x0A76, Width::Byte, Width::Byte),
    FieldSpec::new(Field::MouseSensitivityHorizontal, 0x0954, Width::Byte, Width::Byte),
    FieldSpec::new(Field::MouseSensitivityVertical, 0x0955, Width::Byte, Width::Byte),
    FieldSpec::new(Field::AudioVolumeMaster, 0x0B78, Width::Byte, Width::Byte),
    FieldSpec::new(Field::AudioVolumeEffects, 0x0B79, Width::Byte, Width::Byte),
    FieldSpec::new(Field::AudioVolumeMusic, 0x0B7A, Width::Byte, Width::Byte),
    // Flags
    FieldSpec::new(Field::MouseInvertVerticalAxis, 0x012F, Width::Byte, Width::Byte),
    FieldSpec::new(Field::VideoEffectsSpecular, 0x0A70, Width::Byte, Width::Byte),
    FieldSpec::new(Field::VideoEffectsShadows, 0x0A71, Width::Byte, Width::Byte),
    FieldSpec::new(Field::VideoEffectsDecals, 0x0A72, Width::Byte, Width::Byte),
    FieldSpec::new(Field::AudioEax, 0x0B7B, Width::Byte, Width::Byte),
    FieldSpec::new(Field::AudioHwa, 0x0B7C, Width::Byte, Width::Byte),
];

/// Placement of `field`
pub const fn spec(field: Field) -> FieldSpec {
    // Field variants are declared in table order.
    SCALAR_FIELDS[field as usize]
}
