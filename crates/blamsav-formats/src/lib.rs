//! Parser and writer for Halo: Combat Evolved `blam.sav` profile records
//!
//! The engine keeps each player profile in a fixed-size binary record
//! protected by a checksum. This crate decodes a record into a typed
//! settings model, writes the model back without disturbing bytes it does
//! not cover, and re-signs the record so the engine accepts it.
//!
//! # Design Principles
//!
//! - **Absolute addressing**: every field is read and written at its own
//!   offset, never by walking the record
//! - **Preservation**: saving patches the existing record in place
//! - **Strict decoding**: unknown enumerant bytes are errors, not defaults
//!
//! Logging goes through `tracing`; install a subscriber to see it.

#![warn(missing_docs)]

/// Profile record model, codec and discovery
///
/// See [`profile::ProfileRecord`] for the model and
/// [`profile::ProfileCodec`] for reading and writing.
pub mod profile;
