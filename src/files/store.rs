//! File Store
//!
//! Maps a record id + name to a deterministic path and copies bytes.

use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{DocDbError, Result};

/// Per-id directory tree under a files root
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open the files root, creating it if absent
    pub fn open(root: &Path) -> Result<Self> {
        if root.exists() && !root.is_dir() {
            return Err(DocDbError::Config(format!(
                "files root is not a directory: {}",
                root.display()
            )));
        }
        fs::create_dir_all(root)?;

        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Copy all of `source` to `<root>/<id>/<name>`.
    ///
    /// Fails with `AlreadyExists` if the id directory is present. A failure
    /// after the directory is created leaves whatever was written in place.
    /// Returns the number of bytes copied.
    pub fn write<R: Read>(&self, id: i64, name: &str, source: &mut R) -> Result<u64> {
        let dir = self.dir_path(id);
        if let Err(e) = fs::create_dir(&dir) {
            return Err(match e.kind() {
                io::ErrorKind::AlreadyExists => DocDbError::AlreadyExists(dir),
                _ => DocDbError::Io(e),
            });
        }

        let mut dest = BufWriter::new(File::create(dir.join(name))?);
        let copied = io::copy(source, &mut dest)?;
        dest.flush()?;

        Ok(copied)
    }

    /// Open `<root>/<id>/<name>` for reading
    pub fn open_file(&self, id: i64, name: &str) -> Result<File> {
        File::open(self.file_path(id, name)).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => DocDbError::NotFound(id),
            _ => DocDbError::Io(e),
        })
    }

    /// Recursively delete the directory for `id`. Missing is fine.
    pub fn remove_all(&self, id: i64) -> Result<()> {
        match fs::remove_dir_all(self.dir_path(id)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Whether a directory exists for `id`
    pub fn exists(&self, id: i64) -> bool {
        self.dir_path(id).is_dir()
    }

    /// Ids of every numeric directory under the root, ascending
    pub fn list_ids(&self) -> Result<Vec<i64>> {
        let mut ids = Vec::new();

        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            if let Some(id) = entry.file_name().to_str().and_then(|s| s.parse().ok()) {
                ids.push(id);
            }
        }

        ids.sort_unstable();
        Ok(ids)
    }

    /// Number of entries inside the id directory (0 if it is missing)
    pub fn entry_count(&self, id: i64) -> Result<usize> {
        match fs::read_dir(self.dir_path(id)) {
            Ok(entries) => Ok(entries.count()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    /// Files root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/<id>`
    pub fn dir_path(&self, id: i64) -> PathBuf {
        self.root.join(id.to_string())
    }

    /// `<root>/<id>/<name>`
    pub fn file_path(&self, id: i64, name: &str) -> PathBuf {
        self.dir_path(id).join(name)
    }
}
