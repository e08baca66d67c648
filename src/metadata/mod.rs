//! Metadata Module
//!
//! The relational half of DocDB: one SQLite table of document records.
//!
//! ## Responsibilities
//! - Create the database file and the `docs` table if absent
//! - Assign ids (the source of truth for a document's identity)
//! - Point lookups, sorted/paginated scans, substring search
//!
//! ## Schema
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ docs                                                     │
//! │ ┌────────────┬──────────┬──────────────┬──────────────┐ │
//! │ │ id INTEGER │ name TEXT│ created_at   │ updated_at   │ │
//! │ │ PK AUTOINC │ NOT NULL │ datetime     │ datetime     │ │
//! │ └────────────┴──────────┴──────────────┴──────────────┘ │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Every value reaches SQLite through parameter binding. The only text
//! formatted into a statement is a `SortColumn` / `SortOrder` keyword.

mod store;

pub use store::{MetadataStore, CREATE_TABLE_SQL};
