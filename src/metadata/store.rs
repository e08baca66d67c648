//! Metadata Store
//!
//! Translates typed record operations into parameterized statements.

use std::fs;
use std::time::Duration;

use chrono::Utc;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row};

use crate::config::Config;
use crate::error::{DocDbError, Result};
use crate::record::{Record, SortColumn, SortOrder};

/// Schema for the records table
pub const CREATE_TABLE_SQL: &str = "
CREATE TABLE IF NOT EXISTS docs (
    id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    created_at datetime NOT NULL,
    updated_at datetime NOT NULL
);";

const SELECT_COLUMNS: &str = "SELECT id, name, created_at, updated_at FROM docs";

/// Owns the SQLite connection for the `docs` table
pub struct MetadataStore {
    conn: Connection,
}

impl MetadataStore {
    /// Open or create the database described by `config`
    ///
    /// On open:
    /// 1. Create the parent directory of the db file if needed
    /// 2. Open read-write, creating the file if absent
    /// 3. Apply journal mode and busy timeout
    /// 4. Create the `docs` table if absent
    pub fn open(config: &Config) -> Result<Self> {
        if let Some(parent) = config.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE;
        let conn = Connection::open_with_flags(&config.db_path, flags)?;

        // journal_mode answers with the mode now in effect
        let mode: String = conn.pragma_update_and_check(
            None,
            "journal_mode",
            config.journal_mode.pragma_value(),
            |row| row.get(0),
        )?;
        tracing::debug!("SQLite journal mode: {}", mode);
        conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))?;

        Self::from_connection(conn)
    }

    /// Open a private in-memory database (for tests and scratch use)
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(CREATE_TABLE_SQL)?;
        Ok(Self { conn })
    }

    /// Insert a row named `name`, stamping both timestamps with now.
    /// Returns the generated id.
    pub fn insert(&self, name: &str) -> Result<i64> {
        let now = Utc::now();
        self.conn.execute(
            "INSERT INTO docs (name, created_at, updated_at) VALUES (?1, ?2, ?2)",
            params![name, now],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Rewrite `name` and `updated_at` for `id`.
    ///
    /// A missing id is a silent no-op; callers that care check existence.
    pub fn update_name(&self, id: i64, name: &str) -> Result<()> {
        let now = Utc::now();
        self.conn.execute(
            "UPDATE docs SET name = ?1, updated_at = ?2 WHERE id = ?3",
            params![name, now, id],
        )?;
        Ok(())
    }

    /// Point lookup by id
    pub fn find_one(&self, id: i64) -> Result<Record> {
        self.conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE id = ?1 LIMIT 1"),
                params![id],
                row_to_record,
            )
            .optional()?
            .ok_or(DocDbError::NotFound(id))
    }

    /// Paginated scan; empty when nothing matches
    pub fn find_many(
        &self,
        limit: u32,
        offset: u32,
        column: SortColumn,
        order: SortOrder,
    ) -> Result<Vec<Record>> {
        let sql = format!(
            "{SELECT_COLUMNS} ORDER BY {} {}, id ASC LIMIT ?1 OFFSET ?2",
            column.as_sql(),
            order.as_sql()
        );
        self.query(&sql, params![i64::from(limit), i64::from(offset)])
    }

    /// Unbounded sorted scan
    pub fn find_all(&self, column: SortColumn, order: SortOrder) -> Result<Vec<Record>> {
        let sql = format!(
            "{SELECT_COLUMNS} ORDER BY {} {}, id ASC",
            column.as_sql(),
            order.as_sql()
        );
        self.query(&sql, params![])
    }

    /// Records whose name contains `substring`, by id ascending.
    ///
    /// Case-sensitive; wildcard characters in `substring` have no meaning.
    pub fn find_like(&self, substring: &str) -> Result<Vec<Record>> {
        let sql = format!("{SELECT_COLUMNS} WHERE instr(name, ?1) > 0 ORDER BY id ASC");
        self.query(&sql, params![substring])
    }

    /// Remove the row for `id`; a missing id is not an error
    pub fn delete(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM docs WHERE id = ?1", params![id])?;
        Ok(())
    }

    /// Number of rows
    pub fn count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM docs", [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }

    /// Release the connection
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| DocDbError::Store(e))
    }

    fn query(&self, sql: &str, params: &[&dyn rusqlite::ToSql]) -> Result<Vec<Record>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, row_to_record)?;
        let records = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<Record> {
    Ok(Record {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: row.get(2)?,
        updated_at: row.get(3)?,
    })
}
