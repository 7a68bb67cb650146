//! Settings groups stored in a profile record
//!
//! Every enumerant keeps the exact byte code the engine writes. Decoding
//! goes through `from_code`, which only accepts known codes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Multiplayer colour shown for the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Colour {
    /// Snow
    #[default]
    White = 0x00,
    /// Black
    Black = 0x01,
    /// Crimson
    Red = 0x02,
    /// Blue
    Blue = 0x03,
    /// Steel
    Gray = 0x04,
    /// Gold
    Yellow = 0x05,
    /// Green
    Green = 0x06,
    /// Rose
    Pink = 0x07,
    /// Violet
    Purple = 0x0A,
    /// Cyan
    Cyan = 0x0B,
    /// Cobalt
    Cobalt = 0x0C,
    /// Orange
    Orange = 0x0D,
    /// Aqua
    Teal = 0x0E,
    /// Sage
    Sage = 0x0F,
    /// Brown
    Brown = 0x10,
    /// Tan
    Tan = 0x11,
    /// Maroon
    Maroon = 0x14,
    /// Peach
    Salmon = 0x15,
}

impl Colour {
    /// Code the engine writes for a profile that never picked a colour
    pub const UNSET: u8 = 0xFF;

    /// Every palette entry in code order
    pub const ALL: [Self; 18] = [
        Self::White,
        Self::Black,
        Self::Red,
        Self::Blue,
        Self::Gray,
        Self::Yellow,
        Self::Green,
        Self::Pink,
        Self::Purple,
        Self::Cyan,
        Self::Cobalt,
        Self::Orange,
        Self::Teal,
        Self::Sage,
        Self::Brown,
        Self::Tan,
        Self::Maroon,
        Self::Salmon,
    ];

    /// Convert from raw byte code
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x00 => Some(Self::White),
            0x01 => Some(Self::Black),
            0x02 => Some(Self::Red),
            0x03 => Some(Self::Blue),
            0x04 => Some(Self::Gray),
            0x05 => Some(Self::Yellow),
            0x06 => Some(Self::Green),
            0x07 => Some(Self::Pink),
            0x0A => Some(Self::Purple),
            0x0B => Some(Self::Cyan),
            0x0C => Some(Self::Cobalt),
            0x0D => Some(Self::Orange),
            0x0E => Some(Self::Teal),
            0x0F => Some(Self::Sage),
            0x10 => Some(Self::Brown),
            0x11 => Some(Self::Tan),
            0x14 => Some(Self::Maroon),
            0x15 => Some(Self::Salmon),
            _ => None,
        }
    }

    /// Raw byte code
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Look up a colour by its name, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|colour| format!("{colour:?}").eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Frame pacing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum FrameRate {
    /// Uncapped, no vertical sync
    VsyncOff = 0x00,
    /// Vertical sync
    VsyncOn = 0x01,
    /// Locked to 30 frames per second
    #[default]
    Fps30 = 0x02,
}

impl FrameRate {
    /// Convert from raw byte code
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x00 => Some(Self::VsyncOff),
            0x01 => Some(Self::VsyncOn),
            0x02 => Some(Self::Fps30),
            _ => None,
        }
    }

    /// Raw byte code
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// Particle effect quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Particles {
    /// No particles
    Off = 0x00,
    /// Reduced particles
    Low = 0x01,
    /// Full particles
    #[default]
    High = 0x02,
}

impl Particles {
    /// Convert from raw byte code
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x00 => Some(Self::Off),
            0x01 => Some(Self::Low),
            0x02 => Some(Self::High),
            _ => None,
        }
    }

    /// Raw byte code
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// Texture quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum TextureQuality {
    /// Low resolution textures
    Low = 0x00,
    /// Medium resolution textures
    Medium = 0x01,
    /// Full resolution textures
    #[default]
    High = 0x02,
}

impl TextureQuality {
    /// Convert from raw byte code
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x00 => Some(Self::Low),
            0x01 => Some(Self::Medium),
            0x02 => Some(Self::High),
            _ => None,
        }
    }

    /// Raw byte code
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// Sound quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum AudioQuality {
    /// Low
    Low = 0x00,
    /// Normal
    #[default]
    Normal = 0x01,
    /// High
    High = 0x02,
}

impl AudioQuality {
    /// Convert from raw byte code
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x00 => Some(Self::Low),
            0x01 => Some(Self::Normal),
            0x02 => Some(Self::High),
            _ => None,
        }
    }

    /// Raw byte code
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// Sound variety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum AudioVariety {
    /// Low
    Low = 0x00,
    /// Medium
    Medium = 0x01,
    /// High
    #[default]
    High = 0x02,
}

impl AudioVariety {
    /// Convert from raw byte code
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x00 => Some(Self::Low),
            0x01 => Some(Self::Medium),
            0x02 => Some(Self::High),
            _ => None,
        }
    }

    /// Raw byte code
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// Connection class advertised for multiplayer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Connection {
    /// 56k modem
    DialUp = 0x00,
    /// DSL/Cable, low
    DslLow = 0x01,
    /// DSL/Cable, average
    DslAverage = 0x02,
    /// DSL/Cable, high
    DslHigh = 0x03,
    /// T1/LAN
    #[default]
    Lan = 0x04,
}

impl Connection {
    /// Convert from raw byte code
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x00 => Some(Self::DialUp),
            0x01 => Some(Self::DslLow),
            0x02 => Some(Self::DslAverage),
            0x03 => Some(Self::DslHigh),
            0x04 => Some(Self::Lan),
            _ => None,
        }
    }

    /// Raw byte code
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// Profile identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDetails {
    /// Display name, at most 11 UTF-16 code units
    pub name: String,
    /// Multiplayer colour
    pub colour: Colour,
}

impl Default for ProfileDetails {
    fn default() -> Self {
        Self {
            name: "New001".to_string(),
            colour: Colour::White,
        }
    }
}

/// Mouse look sensitivity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MouseSensitivity {
    /// Horizontal axis
    pub horizontal: u8,
    /// Vertical axis
    pub vertical: u8,
}

impl Default for MouseSensitivity {
    fn default() -> Self {
        Self {
            horizontal: 3,
            vertical: 3,
        }
    }
}

/// Mouse settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProfileMouse {
    /// Invert the vertical look axis
    pub invert_vertical_axis: bool,
    /// Look sensitivity
    pub sensitivity: MouseSensitivity,
}

/// Volume levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioVolume {
    /// Master volume
    pub master: u8,
    /// Sound effects volume
    pub effects: u8,
    /// Music volume
    pub music: u8,
}

impl Default for AudioVolume {
    fn default() -> Self {
        Self {
            master: 10,
            effects: 10,
            music: 6,
        }
    }
}

/// Audio settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProfileAudio {
    /// Volume levels
    pub volume: AudioVolume,
    /// Sound quality
    pub quality: AudioQuality,
    /// Sound variety
    pub variety: AudioVariety,
    /// Environmental audio (EAX)
    pub eax: bool,
    /// Hardware acceleration
    pub hwa: bool,
}

/// Display resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoResolution {
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
}

impl Default for VideoResolution {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

impl fmt::Display for VideoResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Shader effect toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoEffects {
    /// Specular highlights
    pub specular: bool,
    /// Dynamic shadows
    pub shadows: bool,
    /// Decals
    pub decals: bool,
}

impl Default for VideoEffects {
    fn default() -> Self {
        Self {
            specular: true,
            shadows: true,
            decals: true,
        }
    }
}

/// Video settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileVideo {
    /// Display resolution
    pub resolution: VideoResolution,
    /// Refresh rate in hertz
    pub refresh_rate: u8,
    /// Frame pacing
    pub frame_rate: FrameRate,
    /// Gamma byte, kept as stored
    pub gamma: u8,
    /// Particle quality
    pub particles: Particles,
    /// Texture quality
    pub texture_quality: TextureQuality,
    /// Shader toggles
    pub effects: VideoEffects,
}

impl Default for ProfileVideo {
    fn default() -> Self {
        Self {
            resolution: VideoResolution::default(),
            refresh_rate: 60,
            frame_rate: FrameRate::default(),
            gamma: 0,
            particles: Particles::default(),
            texture_quality: TextureQuality::default(),
            effects: VideoEffects::default(),
        }
    }
}

/// UDP ports used for multiplayer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkPort {
    /// Port used when hosting
    pub server: u16,
    /// Port used when joining
    pub client: u16,
}

impl Default for NetworkPort {
    fn default() -> Self {
        Self {
            server: 2302,
            client: 2303,
        }
    }
}

/// Network settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProfileNetwork {
    /// Connection class
    pub connection: Connection,
    /// Multiplayer ports
    pub port: NetworkPort,
}
