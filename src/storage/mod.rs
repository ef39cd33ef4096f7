//! Byte-source abstraction for index files.
//!
//! Decoding works on a complete in-memory buffer, so a backend only has to
//! resolve a path and hand back the file's bytes. The handle is released
//! before decoding starts.
//!
//! # Implementations
//!
//! - [`LocalStorage`] - Local filesystem storage
//!
//! # Example
//!
//! ```no_run
//! use tidx::storage::{LocalStorage, Storage};
//! use std::path::{Path, PathBuf};
//!
//! # fn main() -> tidx::Result<()> {
//! let storage = LocalStorage::new(PathBuf::from("./indexes"));
//! let bytes = storage.read_bytes(Path::new("calls.vcf.idx"))?;
//! let _index = tidx::decode(bytes)?;
//! # Ok(())
//! # }
//! ```

mod local;

pub use local::LocalStorage;

use crate::Result;
use bytes::Bytes;
use std::path::{Path, PathBuf};

/// Storage backend trait for reading index files
pub trait Storage {
    /// Full location of `path` within this backend
    fn resolve(&self, path: &Path) -> PathBuf;

    /// Check if a file exists
    fn exists(&self, path: &Path) -> bool;

    /// Read the whole file
    fn read_bytes(&self, path: &Path) -> Result<Bytes>;
}
