//! Reading and writing profile records
//!
//! Loading addresses every field by absolute offset and never assumes two
//! fields are adjacent. Saving patches a copy of the existing record in
//! memory, so bytes the model does not cover are carried over untouched,
//! then replaces the file contents in one write.

use crate::profile::config::{ChecksumPolicy, CodecOptions, UnknownActionPolicy};
use crate::profile::error::{ProfileError, Result};
use crate::profile::input::{Button, InputMapping, UNBOUND};
use crate::profile::layout::{
    CHECKSUM_OFFSET, NAME_LEN, NAME_OFFSET, RECORD_LEN, SCALAR_FIELDS, Width,
};
use crate::profile::record::{ProfileRecord, decode_name, encode_name};
use binrw::{BinReaderExt, BinWriterExt};
use blamsav_crypto::ProfileChecksum;
use std::fs::{File, OpenOptions};
use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};
use std::path::Path;
use tracing::{debug, info, warn};

/// Stored and recomputed checksum of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecksumReport {
    /// Checksum found at the checksum offset
    pub stored: ProfileChecksum,
    /// Checksum of the record body
    pub computed: ProfileChecksum,
}

impl ChecksumReport {
    /// Whether the engine would accept the record
    pub fn is_valid(&self) -> bool {
        self.stored == self.computed
    }
}

/// Profile record reader and writer
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileCodec {
    options: CodecOptions,
}

impl ProfileCodec {
    /// Create a codec with the given options
    pub const fn new(options: CodecOptions) -> Self {
        Self { options }
    }

    /// Options in use
    pub const fn options(&self) -> &CodecOptions {
        &self.options
    }

    /// Load the record at `path`
    ///
    /// The file must be exactly [`RECORD_LEN`] bytes.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<ProfileRecord> {
        let path = path.as_ref();
        let mut file = open_record(path, false)?;
        check_length(&file)?;

        let record = self.read(&mut file)?;
        info!(
            "Loaded profile {:?} from {}",
            record.details.name,
            path.display()
        );
        Ok(record)
    }

    /// Decode a record from any seekable source
    pub fn read<R: Read + Seek>(&self, reader: &mut R) -> Result<ProfileRecord> {
        let mut record = ProfileRecord::default();

        let mut name = [0u8; NAME_LEN];
        reader.seek(SeekFrom::Start(NAME_OFFSET as u64))?;
        reader.read_exact(&mut name)?;
        record.details.name = decode_name(&name)?;

        for entry in &SCALAR_FIELDS {
            reader.seek(SeekFrom::Start(u64::from(entry.offset)))?;
            let raw = match entry.significant {
                Width::Byte => u32::from(reader.read_le::<u8>()?),
                Width::Short => u32::from(reader.read_le::<u16>()?),
                Width::Int => reader.read_le::<u32>()?,
            };
            record.set_scalar(entry, raw)?;
        }

        record.input = self.read_input(reader)?;

        if self.options.checksum != ChecksumPolicy::Ignore {
            let report = checksum_report(reader)?;
            if !report.is_valid() {
                match self.options.checksum {
                    ChecksumPolicy::Reject => {
                        return Err(ProfileError::ChecksumMismatch {
                            stored: report.stored,
                            computed: report.computed,
                        });
                    }
                    _ => warn!(
                        "Checksum mismatch: stored {}, computed {}",
                        report.stored, report.computed
                    ),
                }
            }
        }

        debug!("Profile deserialisation complete");
        Ok(record)
    }

    fn read_input<R: Read + Seek>(&self, reader: &mut R) -> Result<InputMapping> {
        let mut mapping = InputMapping::new();

        for button in Button::ALL {
            reader.seek(SeekFrom::Start(u64::from(button.offset())))?;
            let code: u8 = reader.read_le()?;
            if code == UNBOUND {
                continue;
            }

            match self.options.action_codes.decode(code)? {
                Some(action) if mapping.contains(action) => {
                    debug!("{action} already bound, ignoring duplicate on {button}");
                }
                Some(action) => {
                    mapping.bind(action, button);
                }
                None => match self.options.unknown_actions {
                    UnknownActionPolicy::Reject => {
                        return Err(ProfileError::UnknownActionCode { button, code });
                    }
                    UnknownActionPolicy::Skip => {
                        debug!("Skipping unknown action code {code:#04x} on {button}");
                    }
                },
            }
        }

        Ok(mapping)
    }

    /// Write `record` into the existing record at `path`
    ///
    /// Returns the checksum written.
    pub fn save<P: AsRef<Path>>(&self, record: &ProfileRecord, path: P) -> Result<ProfileChecksum> {
        let path = path.as_ref();
        let mut file = open_record(path, true)?;

        let mut staging = Vec::with_capacity(RECORD_LEN);
        file.read_to_end(&mut staging)?;
        if staging.len() > RECORD_LEN {
            return Err(ProfileError::UnexpectedLength {
                expected: RECORD_LEN,
                actual: staging.len(),
            });
        }
        if staging.len() < RECORD_LEN {
            debug!(
                "Record is {} bytes, zero-extending to {RECORD_LEN}",
                staging.len()
            );
            staging.resize(RECORD_LEN, 0);
        }

        let checksum = self.encode(record, &mut staging)?;

        debug!("Replacing contents of {}", path.display());
        file.set_len(0)?;
        file.seek(SeekFrom::Start(0))?;
        file.write_all(&staging)?;
        file.flush()?;

        info!("Saved profile {:?} to {}", record.details.name, path.display());
        Ok(checksum)
    }

    /// Write `record` to `path` from a blank template
    ///
    /// Creates the file or replaces it entirely.
    pub fn create<P: AsRef<Path>>(
        &self,
        record: &ProfileRecord,
        path: P,
    ) -> Result<ProfileChecksum> {
        let path = path.as_ref();
        let mut staging = vec![0u8; RECORD_LEN];
        let checksum = self.encode(record, &mut staging)?;

        let mut file = File::create(path)?;
        file.write_all(&staging)?;
        file.flush()?;

        info!(
            "Created profile {:?} at {}",
            record.details.name,
            path.display()
        );
        Ok(checksum)
    }

    /// Complete record for `record` built on a blank template
    pub fn encode_to_vec(&self, record: &ProfileRecord) -> Result<Vec<u8>> {
        let mut staging = vec![0u8; RECORD_LEN];
        self.encode(record, &mut staging)?;
        Ok(staging)
    }

    /// Patch every modelled field of `record` into `staging` and re-sign it
    ///
    /// `staging` must be exactly [`RECORD_LEN`] bytes. Nothing is written if
    /// the name does not fit.
    pub fn encode(&self, record: &ProfileRecord, staging: &mut [u8]) -> Result<ProfileChecksum> {
        if staging.len() != RECORD_LEN {
            return Err(ProfileError::UnexpectedLength {
                expected: RECORD_LEN,
                actual: staging.len(),
            });
        }
        let name = encode_name(&record.details.name)?;

        let mut cursor = Cursor::new(&mut *staging);
        cursor.seek(SeekFrom::Start(NAME_OFFSET as u64))?;
        cursor.write_all(&name)?;

        for entry in &SCALAR_FIELDS {
            cursor.seek(SeekFrom::Start(u64::from(entry.offset)))?;
            let value = record.scalar(entry.field);
            match entry.stored {
                Width::Byte => cursor.write_le(&(value as u8))?,
                Width::Short => cursor.write_le(&(value as u16))?,
                Width::Int => cursor.write_le(&value)?,
            }
        }

        // Every slot is cleared before any binding is written.
        for button in Button::ALL {
            cursor.seek(SeekFrom::Start(u64::from(button.offset())))?;
            cursor.write_le(&UNBOUND)?;
        }
        for (action, button) in record.input.iter() {
            let code = self.options.action_codes.code(action);
            debug!("Binding {action} ({code:#04x}) to {button}");
            cursor.seek(SeekFrom::Start(u64::from(button.offset())))?;
            cursor.write_le(&code)?;
        }

        let checksum = ProfileChecksum::compute(&staging[..CHECKSUM_OFFSET]);
        debug!("New checksum {checksum}");

        let mut cursor = Cursor::new(&mut *staging);
        cursor.seek(SeekFrom::Start(CHECKSUM_OFFSET as u64))?;
        cursor.write_le(&checksum)?;

        Ok(checksum)
    }

    /// Compare the stored checksum of the record at `path` with its body
    pub fn verify<P: AsRef<Path>>(&self, path: P) -> Result<ChecksumReport> {
        let mut file = open_record(path.as_ref(), false)?;
        check_length(&file)?;
        checksum_report(&mut file)
    }

    /// Re-sign the record at `path` without decoding it
    ///
    /// Only the four checksum bytes change. Returns the checksum written.
    pub fn rehash<P: AsRef<Path>>(&self, path: P) -> Result<ProfileChecksum> {
        let path = path.as_ref();
        let mut file = open_record(path, true)?;
        check_length(&file)?;

        let report = checksum_report(&mut file)?;
        if report.is_valid() {
            debug!("Checksum of {} already current", path.display());
        }
        file.seek(SeekFrom::Start(CHECKSUM_OFFSET as u64))?;
        file.write_le(&report.computed)?;
        file.flush()?;

        info!("Rehashed {} to {}", path.display(), report.computed);
        Ok(report.computed)
    }
}

/// Stored and recomputed checksum of the record behind `reader`
pub fn checksum_report<R: Read + Seek>(reader: &mut R) -> Result<ChecksumReport> {
    let mut body = vec![0u8; CHECKSUM_OFFSET];
    reader.seek(SeekFrom::Start(0))?;
    reader.read_exact(&mut body)?;
    let stored: ProfileChecksum = reader.read_le()?;

    Ok(ChecksumReport {
        stored,
        computed: ProfileChecksum::compute(&body),
    })
}

fn open_record(path: &Path, write: bool) -> Result<File> {
    OpenOptions::new()
        .read(true)
        .write(write)
        .open(path)
        .map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                ProfileError::NotFound(path.to_path_buf())
            } else {
                ProfileError::Io(e)
            }
        })
}

fn check_length(file: &File) -> Result<()> {
    let actual = usize::try_from(file.metadata()?.len()).unwrap_or(usize::MAX);
    if actual != RECORD_LEN {
        return Err(ProfileError::UnexpectedLength {
            expected: RECORD_LEN,
            actual,
        });
    }
    Ok(())
}
