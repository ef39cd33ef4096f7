use super::Storage;
use crate::{Error, Result};
use bytes::Bytes;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub struct LocalStorage {
    data_dir: PathBuf,
}

impl LocalStorage {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }
}

impl Storage for LocalStorage {
    fn resolve(&self, path: &Path) -> PathBuf {
        // Absolute paths replace data_dir on join
        self.data_dir.join(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).is_file()
    }

    fn read_bytes(&self, path: &Path) -> Result<Bytes> {
        let full = self.resolve(path);
        let buf = fs::read(&full).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::NotFound(full.display().to_string()),
            _ => Error::Io(e),
        })?;
        tracing::debug!(path = %full.display(), len = buf.len(), "read index file");
        Ok(Bytes::from(buf))
    }
}
