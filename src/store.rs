//! Image persistence capability.
//!
//! The core never decides where card images live; it hands bytes to an
//! [`ImageStore`] and keeps the reference string it returns.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::Result;

/// Persists raw image bytes and returns a reference to them
pub trait ImageStore: Send + Sync {
    /// Store `image`, returning where it can be found again
    fn save(&self, image: &[u8]) -> Result<String>;
}

/// How [`FsImageStore`] names files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingScheme {
    /// `YYYYMMDD_<8 hex>.png`, unique per call
    #[default]
    Timestamped,
    /// `<sha256 hex>.<ext>`, identical images share one file
    ContentAddressed,
}

/// SHA-256 of `data` as lowercase hex
pub fn compute_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// File extension for the raster format sniffed from `data`
fn sniff_extension(data: &[u8]) -> &'static str {
    match image::guess_format(data) {
        Ok(format) => format.extensions_str().first().copied().unwrap_or("bin"),
        Err(_) => "bin",
    }
}

impl NamingScheme {
    /// File name for `image` under this scheme
    pub fn file_name(self, image: &[u8]) -> String {
        match self {
            NamingScheme::Timestamped => {
                let id = Uuid::new_v4().simple().to_string();
                format!("{}_{}.png", Local::now().format("%Y%m%d"), &id[..8])
            }
            NamingScheme::ContentAddressed => {
                format!("{}.{}", compute_hash(image), sniff_extension(image))
            }
        }
    }
}

/// Stores images as files in one directory, created on first save
#[derive(Debug, Clone)]
pub struct FsImageStore {
    directory: PathBuf,
    naming: NamingScheme,
}

impl FsImageStore {
    /// Store writing timestamped names into `directory`
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            naming: NamingScheme::default(),
        }
    }

    /// Use `naming` for new files
    pub fn with_naming(mut self, naming: NamingScheme) -> Self {
        self.naming = naming;
        self
    }

    /// Target directory
    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl ImageStore for FsImageStore {
    fn save(&self, image: &[u8]) -> Result<String> {
        fs::create_dir_all(&self.directory)?;
        let path = self.directory.join(self.naming.file_name(image));
        if self.naming == NamingScheme::ContentAddressed && path.exists() {
            log::debug!("{} already stored", path.display());
        } else {
            fs::write(&path, image)?;
            log::debug!("stored {} bytes at {}", image.len(), path.display());
        }
        Ok(path.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use tempfile::TempDir;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n rest of file";

    #[test]
    fn test_compute_hash() {
        assert_eq!(
            compute_hash(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_timestamped_names() {
        let pattern = Regex::new(r"^\d{8}_[0-9a-f]{8}\.png$").unwrap();
        let first = NamingScheme::Timestamped.file_name(b"x");
        let second = NamingScheme::Timestamped.file_name(b"x");
        assert!(pattern.is_match(&first), "{first}");
        assert_ne!(first, second);
    }

    #[test]
    fn test_content_addressed_names() {
        let name = NamingScheme::ContentAddressed.file_name(PNG_MAGIC);
        assert_eq!(name, format!("{}.png", compute_hash(PNG_MAGIC)));
        assert!(NamingScheme::ContentAddressed.file_name(b"plain").ends_with(".bin"));
    }

    #[test]
    fn test_fs_store_writes_into_new_directory() {
        let temp = TempDir::new().unwrap();
        let store = FsImageStore::new(temp.path().join("uploads"));
        let reference = store.save(PNG_MAGIC).unwrap();
        assert!(reference.starts_with(&*temp.path().join("uploads").to_string_lossy()));
        assert_eq!(fs::read(&reference).unwrap(), PNG_MAGIC);
    }

    #[test]
    fn test_content_addressed_store_deduplicates() {
        let temp = TempDir::new().unwrap();
        let store = FsImageStore::new(temp.path()).with_naming(NamingScheme::ContentAddressed);
        let a = store.save(PNG_MAGIC).unwrap();
        let b = store.save(PNG_MAGIC).unwrap();
        assert_eq!(a, b);
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
    }
}
