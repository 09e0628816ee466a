//! # Upload Sink
//!
//! Keeps uploaded files in one directory under generated storage keys of the form
//! `<uuid>_<original-filename>`. Keys are always plain file names; anything that
//! looks like a path is refused, so a key can never point outside the directory.

use crate::error::{AppError, Result};
use log::{debug, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct UploadSink {
    dir: PathBuf,
}

impl UploadSink {
    /// Opens the sink, creating the directory if it does not exist.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `bytes` under a new storage key derived from `original_filename` and
    /// returns the key.
    pub fn store(&self, original_filename: &str, bytes: &[u8]) -> Result<String> {
        let key = format!("{}_{}", Uuid::new_v4(), base_name(original_filename));
        fs::create_dir_all(&self.dir)?;
        fs::write(self.dir.join(&key), bytes)?;
        debug!("stored upload {} ({} bytes)", key, bytes.len());
        Ok(key)
    }

    /// Reads back the bytes stored under `storage_key`.
    pub fn retrieve(&self, storage_key: &str) -> Result<Vec<u8>> {
        let path = self.path_for(storage_key)?;
        fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => AppError::not_found(format!("file {}", storage_key)),
            _ => AppError::Io(e),
        })
    }

    /// Removes the file behind `storage_key`. Failures are logged and otherwise
    /// ignored: the catalogue entry goes away whether or not the file did.
    pub fn delete(&self, storage_key: &str) {
        let path = match self.path_for(storage_key) {
            Ok(path) => path,
            Err(_) => {
                warn!("refusing to delete invalid storage key {:?}", storage_key);
                return;
            }
        };
        match fs::remove_file(&path) {
            Ok(()) => debug!("deleted upload {}", storage_key),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("upload {} was already missing", storage_key)
            }
            Err(e) => warn!("could not delete upload {}: {}", storage_key, e),
        }
    }

    fn path_for(&self, storage_key: &str) -> Result<PathBuf> {
        let is_plain_name = !storage_key.is_empty()
            && storage_key != "."
            && storage_key != ".."
            && !storage_key.contains(['/', '\\']);
        if !is_plain_name {
            return Err(AppError::not_found(format!("file {}", storage_key)));
        }
        Ok(self.dir.join(storage_key))
    }
}

/// The last path component of a client-supplied filename, with separators of either
/// platform stripped.
fn base_name(original: &str) -> String {
    let name = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    match name {
        "" | "." | ".." => "upload".to_string(),
        name => name.to_string(),
    }
}
