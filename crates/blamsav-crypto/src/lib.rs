//! Checksum primitives for Halo: Combat Evolved profile records
//!
//! The host engine refuses to load a `blam.sav` profile record unless the
//! last four bytes hold a checksum of everything before them. This crate
//! computes that value.
//!
//! # Components
//!
//! - **CRC-32**: table-driven CRC-32 over the reflected `0xEDB88320`
//!   polynomial, available one-shot or streaming
//! - **Profile checksum**: the complemented form the engine actually stores
//!
//! # Examples
//!
//! ## Checksum of a record body
//!
//! ```
//! use blamsav_crypto::checksum::{ProfileChecksum, crc32_register};
//!
//! let body = vec![0u8; 0x1FFC];
//! let checksum = ProfileChecksum::compute(&body);
//!
//! // The stored bytes are the CRC register before its final complement.
//! assert_eq!(checksum.to_u32(), crc32_register(&body));
//! println!("checksum: {}", checksum);
//! ```
//!
//! ## Streaming
//!
//! ```
//! use blamsav_crypto::checksum::{Crc32Hasher, crc32};
//!
//! let mut hasher = Crc32Hasher::new();
//! hasher.update(b"1234");
//! hasher.update(b"56789");
//! assert_eq!(hasher.finalize(), crc32(b"123456789"));
//! ```

#![warn(missing_docs)]

pub mod checksum;

// Re-export commonly used types
pub use checksum::{Crc32Hasher, ProfileChecksum, crc32, crc32_register};
