//! Files Module
//!
//! The filesystem half of DocDB: one directory per record id, holding one
//! file named after the record.
//!
//! ## Layout
//! ```text
//! {files_dir}/
//!   ├── 1/
//!   │   └── a.txt
//!   ├── 2/
//!   │   └── report.pdf
//!   └── 3/
//!       └── notes.md
//! ```
//!
//! A directory is created exactly once per current file. Writing into an
//! id whose directory already exists fails with `AlreadyExists`; updates
//! remove the directory first.

mod store;

pub use store::FileStore;
