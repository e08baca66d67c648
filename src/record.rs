//! Document records and sort keys
//!
//! A `Record` is the metadata row for one stored document. Its content lives
//! at `<files_dir>/<id>/<name>`.

use std::fmt;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DocDbError, Result};

/// Metadata for one stored document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Auto-assigned row id; also the name of the document's directory
    pub id: i64,

    /// Last path segment of the source file
    pub name: String,

    /// Set once, at insert
    pub created_at: DateTime<Utc>,

    /// Set at insert and at every update
    pub updated_at: DateTime<Utc>,
}

impl Record {
    /// Directory owning this record's content
    pub fn dir_path(&self, files_dir: &Path) -> PathBuf {
        files_dir.join(self.id.to_string())
    }

    /// Full path of this record's content file
    pub fn file_path(&self, files_dir: &Path) -> PathBuf {
        self.dir_path(files_dir).join(&self.name)
    }
}

/// Columns usable as an ORDER BY key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    Id,
    Name,
    CreatedAt,
    UpdatedAt,
}

impl SortColumn {
    /// Column identifier. This is the only text spliced into query strings;
    /// it comes from a closed set, never from caller input.
    pub fn as_sql(self) -> &'static str {
        match self {
            SortColumn::Id => "id",
            SortColumn::Name => "name",
            SortColumn::CreatedAt => "created_at",
            SortColumn::UpdatedAt => "updated_at",
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for SortColumn {
    type Err = DocDbError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "id" => Ok(SortColumn::Id),
            "name" => Ok(SortColumn::Name),
            "created_at" | "created" => Ok(SortColumn::CreatedAt),
            "updated_at" | "updated" => Ok(SortColumn::UpdatedAt),
            _ => Err(DocDbError::InvalidSortColumn(s.to_string())),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Validate a document name: exactly one normal path segment
pub(crate) fn validate_name(name: &str) -> Result<()> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains(MAIN_SEPARATOR)
        || name.contains('\0');
    if bad {
        return Err(DocDbError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Derive a document name from the last segment of `path`
pub(crate) fn name_from_path(path: &Path) -> Result<String> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| DocDbError::InvalidName(path.display().to_string()))?;
    validate_name(name)?;
    Ok(name.to_string())
}
