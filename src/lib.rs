//! # DocDB
//!
//! A small embedded document database:
//! - A SQLite table of records (id, name, created_at, updated_at)
//! - A directory per record id holding the document's bytes
//! - One facade that keeps the two in step
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          DocDb                               │
//! │      insert / update / delete / find_* / open_content        │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  metadata first, files second
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  Metadata   │          │    Files    │
//!   │  (SQLite)   │          │ <id>/<name> │
//!   └─────────────┘          └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use docdb::{DocDb, SortColumn, SortOrder};
//!
//! let db = DocDb::open_paths("./app.db", "./files")?;
//! let record = db.insert("./report.pdf")?;
//! let bytes = db.read(record.id)?;
//! let first_five = db.find_many(5, 0, SortColumn::Name, SortOrder::Asc)?;
//! db.close()?;
//! # Ok::<(), docdb::DocDbError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod metadata;
pub mod files;
pub mod db;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{DocDbError, Result};
pub use config::{Config, JournalMode};
pub use record::{Record, SortColumn, SortOrder};
pub use db::{DocDb, OrphanReport};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of DocDB
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
