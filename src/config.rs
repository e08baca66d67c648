//! Configuration for DocDB
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for a DocDB instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Path of the SQLite database holding the `docs` table
    pub db_path: PathBuf,

    /// Root directory for document content
    /// Internal structure:
    ///   {files_dir}/
    ///     ├── 1/report.pdf
    ///     └── 2/notes.txt
    pub files_dir: PathBuf,

    // -------------------------------------------------------------------------
    // SQLite Configuration
    // -------------------------------------------------------------------------
    /// Journal mode applied when the connection is opened
    pub journal_mode: JournalMode,

    /// How long a statement waits on a locked database (milliseconds)
    pub busy_timeout_ms: u64,
}

/// SQLite journal mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalMode {
    /// Rollback journal, deleted after each transaction (SQLite default)
    Delete,

    /// Write-ahead log
    Wal,
}

impl JournalMode {
    /// Value for `PRAGMA journal_mode`
    pub fn pragma_value(self) -> &'static str {
        match self {
            JournalMode::Delete => "DELETE",
            JournalMode::Wal => "WAL",
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("./docdb_data/docs.db"),
            files_dir: PathBuf::from("./docdb_data/files"),
            journal_mode: JournalMode::Delete,
            busy_timeout_ms: 5000,
        }
    }
}

impl Config {
    /// Config with the two storage locations and default tuning
    pub fn new(db_path: impl Into<PathBuf>, files_dir: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            files_dir: files_dir.into(),
            ..Self::default()
        }
    }

    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the SQLite database file
    pub fn db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.db_path = path.into();
        self
    }

    /// Set the files root directory
    pub fn files_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.files_dir = path.into();
        self
    }

    /// Set the journal mode
    pub fn journal_mode(mut self, mode: JournalMode) -> Self {
        self.config.journal_mode = mode;
        self
    }

    /// Set the busy timeout (in milliseconds)
    pub fn busy_timeout_ms(mut self, ms: u64) -> Self {
        self.config.busy_timeout_ms = ms;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
