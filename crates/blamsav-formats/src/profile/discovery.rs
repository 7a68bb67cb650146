//! Locating profile records in a game data directory
//!
//! ```text
//! <hce_dir>/
//!   lastprof.txt              path of the last record used
//!   savegames/
//!     <name>/blam.sav         one record per profile
//! ```

use crate::profile::codec::ProfileCodec;
use crate::profile::error::{ProfileError, Result};
use crate::profile::record::ProfileRecord;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name of a profile record
pub const RECORD_FILE_NAME: &str = "blam.sav";

/// File name of the last profile pointer
pub const LAST_PROFILE_FILE_NAME: &str = "lastprof.txt";

/// Directory holding one subdirectory per profile
pub const PROFILES_DIR_NAME: &str = "savegames";

/// Contents of `lastprof.txt`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastProfile {
    /// Name of the last profile used
    pub profile: String,
}

impl LastProfile {
    /// Parse pointer file content
    ///
    /// The content is a Windows path into the profile's directory; the
    /// directory name is the second-to-last component.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim_end_matches('\0').trim();
        let components: Vec<&str> = trimmed.split(['\\', '/']).collect();

        let profile = match components.as_slice() {
            [.., name, _] if !name.is_empty() => (*name).to_string(),
            _ => return Err(ProfileError::InvalidPointer(trimmed.to_string())),
        };

        Ok(Self { profile })
    }

    /// Read and parse the pointer file at `path`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| not_found(e, path))?;
        Self::parse(&String::from_utf8_lossy(&bytes))
    }
}

/// Paths inside a game data directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileLocator {
    hce_dir: PathBuf,
}

impl ProfileLocator {
    /// Locator rooted at `hce_dir`
    pub fn new(hce_dir: impl Into<PathBuf>) -> Self {
        Self {
            hce_dir: hce_dir.into(),
        }
    }

    /// Game data directory
    pub fn hce_dir(&self) -> &Path {
        &self.hce_dir
    }

    /// Path of `lastprof.txt`
    pub fn last_profile_path(&self) -> PathBuf {
        self.hce_dir.join(LAST_PROFILE_FILE_NAME)
    }

    /// Directory holding the profiles
    pub fn profiles_dir(&self) -> PathBuf {
        self.hce_dir.join(PROFILES_DIR_NAME)
    }

    /// Path of the record for profile `name`
    pub fn record_path(&self, name: &str) -> PathBuf {
        self.profiles_dir().join(name).join(RECORD_FILE_NAME)
    }
}

/// The last-used profile and its record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedProfile {
    /// Profile name from the pointer file
    pub name: String,
    /// Path of the record
    pub path: PathBuf,
    /// Decoded record
    pub record: ProfileRecord,
}

/// Load the profile named by `lastprof.txt`
pub fn detect(locator: &ProfileLocator, codec: &ProfileCodec) -> Result<DetectedProfile> {
    let pointer = LastProfile::load(locator.last_profile_path())?;
    let path = locator.record_path(&pointer.profile);
    debug!("Last profile is {:?} at {}", pointer.profile, path.display());

    let record = codec.load(&path)?;
    info!("Detected profile {:?}", pointer.profile);

    Ok(DetectedProfile {
        name: pointer.profile,
        path,
        record,
    })
}

/// Load every record under `dir`
///
/// Fails on the first record that does not load.
pub fn list<P: AsRef<Path>>(dir: P, codec: &ProfileCodec) -> Result<Vec<ProfileRecord>> {
    record_paths(dir.as_ref())?
        .iter()
        .map(|path| codec.load(path))
        .collect()
}

/// Load every record under `dir`, keeping each outcome
pub fn scan<P: AsRef<Path>>(
    dir: P,
    codec: &ProfileCodec,
) -> Result<Vec<(PathBuf, Result<ProfileRecord>)>> {
    let scanned = record_paths(dir.as_ref())?
        .into_iter()
        .map(|path| {
            let outcome = codec.load(&path);
            (path, outcome)
        })
        .collect();
    Ok(scanned)
}

/// Paths of every `blam.sav` under `dir`, sorted
pub fn record_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ProfileError::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut paths = Vec::new();
    for entry in walkdir::WalkDir::new(dir).min_depth(1).follow_links(false) {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_file() && entry.file_name() == RECORD_FILE_NAME {
            paths.push(entry.into_path());
        }
    }
    paths.sort();

    debug!("Found {} records under {}", paths.len(), dir.display());
    Ok(paths)
}

fn not_found(err: io::Error, path: &Path) -> ProfileError {
    if err.kind() == io::ErrorKind::NotFound {
        ProfileError::NotFound(path.to_path_buf())
    } else {
        ProfileError::Io(err)
    }
}
