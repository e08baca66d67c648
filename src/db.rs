//! DocDb Module
//!
//! The facade that coordinates the metadata table and the file tree.
//!
//! ## Responsibilities
//! - Sequence every mutation: metadata first (it owns the id), files second
//! - Reconstruct reads from the metadata table, content from the file tree
//! - Surface every failure unchanged
//!
//! ## Consistency
//! The two stores are updated by separate, non-transactional calls. There
//! is no rollback:
//! - `insert` can leave a row with no file if the copy fails
//! - `update` can leave a renamed row with no matching file if the file
//!   step fails
//!
//! Both gaps are logged at `warn` and can be listed with [`DocDb::orphans`].
//!
//! ## Concurrency
//! Single writer. Nothing here arbitrates concurrent mutations of one id;
//! callers must serialize them.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::Config;
use crate::error::Result;
use crate::files::FileStore;
use crate::metadata::MetadataStore;
use crate::record::{name_from_path, validate_name, Record, SortColumn, SortOrder};

/// An embedded document database
pub struct DocDb {
    /// Database configuration
    config: Config,

    /// The `docs` table (source of ids)
    metadata: MetadataStore,

    /// `<files_dir>/<id>/<name>` content tree
    files: FileStore,
}

/// Drift between the two stores, as found by [`DocDb::orphans`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrphanReport {
    /// Directories under the files root with no matching row
    pub dirs_without_record: Vec<i64>,

    /// Rows whose `<id>/<name>` file is missing
    pub records_without_file: Vec<i64>,
}

impl OrphanReport {
    pub fn is_clean(&self) -> bool {
        self.dirs_without_record.is_empty() && self.records_without_file.is_empty()
    }
}

/// Open `path` for copying; anything but a regular file is rejected
/// before a row is written.
fn open_source(path: &Path) -> Result<File> {
    let source = File::open(path)?;
    if !source.metadata()?.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("not a regular file: {}", path.display()),
        )
        .into());
    }
    Ok(source)
}

impl DocDb {
    /// Open or create a database with the given config
    ///
    /// On open:
    /// 1. Create the files root if absent
    /// 2. Create the database file and `docs` table if absent
    pub fn open(config: Config) -> Result<Self> {
        let files = FileStore::open(&config.files_dir)?;
        let metadata = MetadataStore::open(&config)?;

        tracing::debug!(
            "Opened DocDB (db: {}, files: {})",
            config.db_path.display(),
            config.files_dir.display()
        );

        Ok(Self {
            config,
            metadata,
            files,
        })
    }

    /// Open with the two storage locations and default tuning
    pub fn open_paths(db_path: impl Into<PathBuf>, files_dir: impl Into<PathBuf>) -> Result<Self> {
        Self::open(Config::new(db_path, files_dir))
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Store a copy of the file at `path`, named after its last segment
    pub fn insert(&self, path: impl AsRef<Path>) -> Result<Record> {
        let path = path.as_ref();
        let name = name_from_path(path)?;
        let mut source = open_source(path)?;
        self.insert_reader(&name, &mut source)
    }

    /// Store the bytes of `source` under `name`
    ///
    /// Steps:
    /// 1. Insert the row (assigns the id)
    /// 2. Create `<id>/` and copy the content into `<id>/<name>`
    pub fn insert_reader<R: Read>(&self, name: &str, source: &mut R) -> Result<Record> {
        validate_name(name)?;

        let id = self.metadata.insert(name)?;
        let record = self.metadata.find_one(id)?;

        match self.files.write(id, name, source) {
            Ok(bytes) => {
                tracing::debug!("Inserted document {} ({}, {} bytes)", id, name, bytes);
                Ok(record)
            }
            Err(e) => {
                tracing::warn!(
                    "Content write for document {} failed after row commit: {}",
                    id,
                    e
                );
                Err(e)
            }
        }
    }

    /// Replace the content of `id` with the file at `path`
    pub fn update(&self, id: i64, path: impl AsRef<Path>) -> Result<Record> {
        let path = path.as_ref();
        let name = name_from_path(path)?;
        let mut source = open_source(path)?;
        self.update_reader(id, &name, &mut source)
    }

    /// Replace the content of `id` with `source`, renamed to `name`
    ///
    /// Steps:
    /// 1. Rewrite the row's name and `updated_at`
    /// 2. Re-read the row (`NotFound` here means nothing was touched)
    /// 3. Remove `<id>/`, then write the new file
    pub fn update_reader<R: Read>(&self, id: i64, name: &str, source: &mut R) -> Result<Record> {
        validate_name(name)?;

        self.metadata.update_name(id, name)?;
        let record = self.metadata.find_one(id)?;

        let written = self
            .files
            .remove_all(id)
            .and_then(|_| self.files.write(id, name, source));

        match written {
            Ok(bytes) => {
                tracing::debug!("Updated document {} ({}, {} bytes)", id, name, bytes);
                Ok(record)
            }
            Err(e) => {
                tracing::warn!(
                    "Content rewrite for document {} failed after row update: {}",
                    id,
                    e
                );
                Err(e)
            }
        }
    }

    /// Remove the row and the directory for `id`. Missing ids are not an error.
    pub fn delete(&self, id: i64) -> Result<()> {
        self.metadata.delete(id)?;

        if let Err(e) = self.files.remove_all(id) {
            tracing::warn!("Row {} deleted but its directory was not: {}", id, e);
            return Err(e);
        }

        tracing::debug!("Deleted document {}", id);
        Ok(())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Record for `id`, or `NotFound`
    pub fn find_one(&self, id: i64) -> Result<Record> {
        self.metadata.find_one(id)
    }

    /// A page of records sorted by `column`
    pub fn find_many(
        &self,
        count: u32,
        offset: u32,
        column: SortColumn,
        order: SortOrder,
    ) -> Result<Vec<Record>> {
        self.metadata.find_many(count, offset, column, order)
    }

    /// Every record sorted by `column`
    pub fn find_all(&self, column: SortColumn, order: SortOrder) -> Result<Vec<Record>> {
        self.metadata.find_all(column, order)
    }

    /// Records whose name contains `pattern`, by id ascending
    pub fn find_like(&self, pattern: &str) -> Result<Vec<Record>> {
        self.metadata.find_like(pattern)
    }

    /// Number of records
    pub fn count(&self) -> Result<u64> {
        self.metadata.count()
    }

    /// Open the content of `id` for reading
    pub fn open_content(&self, id: i64) -> Result<File> {
        let record = self.metadata.find_one(id)?;
        self.files.open_file(record.id, &record.name)
    }

    /// Read the whole content of `id`
    pub fn read(&self, id: i64) -> Result<Vec<u8>> {
        let mut file = self.open_content(id)?;
        let mut buf = Vec::new();
        file.read_to_end(&mut buf)?;
        Ok(buf)
    }

    /// List drift between rows and directories. Read-only.
    pub fn orphans(&self) -> Result<OrphanReport> {
        let records = self.metadata.find_all(SortColumn::Id, SortOrder::Asc)?;
        let record_ids: BTreeSet<i64> = records.iter().map(|r| r.id).collect();

        let dirs_without_record = self
            .files
            .list_ids()?
            .into_iter()
            .filter(|id| !record_ids.contains(id))
            .collect();

        let records_without_file = records
            .iter()
            .filter(|r| !self.files.file_path(r.id, &r.name).is_file())
            .map(|r| r.id)
            .collect();

        Ok(OrphanReport {
            dirs_without_record,
            records_without_file,
        })
    }

    /// Close the database, releasing the connection
    pub fn close(self) -> Result<()> {
        self.metadata.close()?;
        tracing::debug!("Closed DocDB ({})", self.config.db_path.display());
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Path of the content file for `record`
    pub fn file_path(&self, record: &Record) -> PathBuf {
        record.file_path(self.files.root())
    }

    /// Get the files root
    pub fn files_dir(&self) -> &Path {
        self.files.root()
    }

    /// Get the file store
    pub fn files(&self) -> &FileStore {
        &self.files
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
