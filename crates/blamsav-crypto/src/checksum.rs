//! Forged CRC-32 checksum for profile records
//!
//! The engine hashes the record body with a plain CRC-32 (reflected
//! polynomial `0xEDB88320`, register seeded with `0xFFFFFFFF`, one table
//! lookup per byte). The standard algorithm complements the register once at
//! the end. The engine then complements every byte of that result a second
//! time and stores the bytes little-endian. Both complements are applied
//! here; skipping either produces a record the engine rejects.

use binrw::{BinRead, BinWrite};
use std::fmt;

/// Reflected form of the IEEE 802.3 polynomial `0x04C11DB7`
pub const POLYNOMIAL: u32 = 0xEDB8_8320;

/// Register value before the first byte is consumed
pub const INITIAL_REGISTER: u32 = 0xFFFF_FFFF;

/// Byte-indexed lookup table for [`POLYNOMIAL`]
pub const CRC32_TABLE: [u32; 256] = build_table();

const fn build_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut index = 0;
    while index < 256 {
        let mut crc = index as u32;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 1 == 0 {
                crc >> 1
            } else {
                (crc >> 1) ^ POLYNOMIAL
            };
            bit += 1;
        }
        table[index] = crc;
        index += 1;
    }
    table
}

#[inline]
const fn step(register: u32, byte: u8) -> u32 {
    CRC32_TABLE[((register ^ byte as u32) & 0xFF) as usize] ^ (register >> 8)
}

/// CRC-32 register after consuming `data`, without the final complement
pub fn crc32_register(data: &[u8]) -> u32 {
    data.iter()
        .fold(INITIAL_REGISTER, |register, &byte| step(register, byte))
}

/// Standard CRC-32 of `data` (register with the final complement applied)
///
/// # Examples
///
/// ```
/// use blamsav_crypto::checksum::crc32;
///
/// assert_eq!(crc32(b"123456789"), 0xCBF4_3926);
/// ```
pub fn crc32(data: &[u8]) -> u32 {
    !crc32_register(data)
}

/// Incremental CRC-32 over data supplied in pieces
///
/// Any split of the input yields the same result as [`crc32`] over the
/// concatenation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crc32Hasher {
    register: u32,
}

impl Crc32Hasher {
    /// Create a hasher with a freshly seeded register
    pub const fn new() -> Self {
        Self {
            register: INITIAL_REGISTER,
        }
    }

    /// Feed more data into the register
    pub fn update(&mut self, data: &[u8]) {
        self.register = data
            .iter()
            .fold(self.register, |register, &byte| step(register, byte));
    }

    /// Current register value (no final complement)
    pub const fn register(&self) -> u32 {
        self.register
    }

    /// Standard CRC-32 of everything fed so far
    pub const fn finalize(&self) -> u32 {
        !self.register
    }

    /// Profile checksum of everything fed so far
    pub fn checksum(&self) -> ProfileChecksum {
        ProfileChecksum::from_crc(self.finalize())
    }
}

impl Default for Crc32Hasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Checksum stored in the last four bytes of a profile record
///
/// Holds the bytes exactly as they appear on disk.
#[derive(BinRead, BinWrite, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ProfileChecksum([u8; 4]);

impl ProfileChecksum {
    /// Size of the checksum field in bytes
    pub const LEN: usize = 4;

    /// Compute the checksum the engine expects for a record body
    pub fn compute(data: &[u8]) -> Self {
        Self::from_crc(crc32(data))
    }

    /// Derive the stored form from a standard CRC-32 value
    pub fn from_crc(crc: u32) -> Self {
        let mut bytes = crc.to_le_bytes();
        for byte in &mut bytes {
            *byte = !*byte;
        }
        Self(bytes)
    }

    /// Create from the raw on-disk bytes
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Raw on-disk bytes
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Stored bytes read as a little-endian integer
    pub const fn to_u32(&self) -> u32 {
        u32::from_le_bytes(self.0)
    }

    /// Standard CRC-32 this checksum was derived from
    pub const fn crc(&self) -> u32 {
        !self.to_u32()
    }

    /// Parse from a hex string of the on-disk bytes
    pub fn from_hex(hex: &str) -> Result<Self, hex::FromHexError> {
        let mut bytes = [0u8; 4];
        hex::decode_to_slice(hex, &mut bytes)?;
        Ok(Self(bytes))
    }

    /// Hex string of the on-disk bytes
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for ProfileChecksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use binrw::{BinReaderExt, BinWriterExt};

    #[test]
    fn test_table_matches_reference_entries() {
        assert_eq!(CRC32_TABLE[0], 0x0000_0000);
        assert_eq!(CRC32_TABLE[1], 0x7707_3096);
        assert_eq!(CRC32_TABLE[128], 0xEDB8_8320);
        assert_eq!(CRC32_TABLE[255], 0x2D02_EF8D);
    }

    #[test]
    fn test_standard_check_value() {
        assert_eq!(crc32(b"123456789"), 0xCBF4_3926);
        assert_eq!(crc32(b""), 0);
        assert_eq!(crc32_register(b""), INITIAL_REGISTER);
    }

    #[test]
    fn test_complement_law() {
        let data = b"Spartan profile body";
        let raw = crc32(data).to_le_bytes();
        let checksum = ProfileChecksum::compute(data);

        for (stored, standard) in checksum.as_bytes().iter().zip(raw) {
            assert_eq!(*stored, !standard);
        }
        assert_eq!(checksum.to_u32(), crc32_register(data));
        assert_eq!(checksum.crc(), crc32(data));
    }

    #[test]
    fn test_empty_input_checksum() {
        let checksum = ProfileChecksum::compute(&[]);
        assert_eq!(checksum.as_bytes(), &[0xFF; 4]);
    }

    #[test]
    fn test_deterministic() {
        let data: Vec<u8> = (0..=255u8).cycle().take(0x1FFC).collect();
        assert_eq!(ProfileChecksum::compute(&data), ProfileChecksum::compute(&data));
    }

    #[test]
    fn test_single_bit_flip_changes_checksum() {
        let data = vec![0x5Au8; 512];
        let original = ProfileChecksum::compute(&data);

        for position in [0, 1, 255, 511] {
            for bit in 0..8 {
                let mut flipped = data.clone();
                flipped[position] ^= 1 << bit;
                assert_ne!(ProfileChecksum::compute(&flipped), original);
            }
        }
    }

    #[test]
    fn test_hasher_matches_one_shot() {
        let data = b"The quick brown fox jumps over the lazy dog";
        let mut hasher = Crc32Hasher::default();
        for chunk in data.chunks(5) {
            hasher.update(chunk);
        }

        assert_eq!(hasher.register(), crc32_register(data));
        assert_eq!(hasher.finalize(), 0x414F_A339);
        assert_eq!(hasher.checksum(), ProfileChecksum::compute(data));
    }

    #[test]
    fn test_hex_round_trip() {
        let checksum = ProfileChecksum::from_bytes([0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(checksum.to_hex(), "deadbeef");
        assert_eq!(checksum.to_string(), "deadbeef");
        assert_eq!(ProfileChecksum::from_hex("deadbeef").unwrap(), checksum);
        assert!(ProfileChecksum::from_hex("dead").is_err());
    }

    #[test]
    fn test_binrw_layout_is_raw_bytes() {
        let checksum = ProfileChecksum::from_bytes([1, 2, 3, 4]);
        let mut cursor = Cursor::new(Vec::new());
        cursor.write_le(&checksum).unwrap();
        assert_eq!(cursor.get_ref(), &[1, 2, 3, 4]);

        cursor.set_position(0);
        let parsed: ProfileChecksum = cursor.read_le().unwrap();
        assert_eq!(parsed, checksum);
    }
}
