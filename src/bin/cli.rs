//! DocDB CLI
//!
//! Command-line interface for a local DocDB.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use docdb::{Config, DocDb, JournalMode, Record, SortColumn, SortOrder};
use tracing_subscriber::{fmt, EnvFilter};

/// Log filter used when `RUST_LOG` is unset
const DEFAULT_LOG_FILTER: &str = "info,docdb=debug";

/// DocDB CLI
#[derive(Parser, Debug)]
#[command(name = "docdb")]
#[command(about = "Embedded document database backed by SQLite and a file tree")]
#[command(version)]
struct Args {
    /// SQLite database file
    #[arg(short, long, default_value = "./docdb_data/docs.db")]
    db: PathBuf,

    /// Root directory for document files
    #[arg(short, long, default_value = "./docdb_data/files")]
    files: PathBuf,

    /// Use SQLite WAL journal mode
    #[arg(long)]
    wal: bool,

    /// Print records as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Store a copy of a file
    Insert {
        /// The file to store
        path: PathBuf,
    },

    /// Replace a document's content
    Update {
        /// The document id
        id: i64,

        /// The new file
        path: PathBuf,
    },

    /// Show one document's record
    Get {
        /// The document id
        id: i64,
    },

    /// Write a document's content to stdout
    Cat {
        /// The document id
        id: i64,
    },

    /// List documents
    List {
        /// Sort column: id, name, created_at, updated_at
        #[arg(short, long, default_value = "id")]
        sort: SortColumn,

        /// Sort descending
        #[arg(long)]
        desc: bool,

        /// Page size (all documents when omitted)
        #[arg(short, long)]
        limit: Option<u32>,

        /// Page offset
        #[arg(short, long, default_value = "0")]
        offset: u32,
    },

    /// Find documents whose name contains a substring
    Search {
        /// The substring
        pattern: String,
    },

    /// Delete a document and its file
    Delete {
        /// The document id
        id: i64,
    },

    /// Report rows and directories that no longer match
    Orphans,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let journal_mode = if args.wal {
        JournalMode::Wal
    } else {
        JournalMode::Delete
    };
    let config = Config::builder()
        .db_path(&args.db)
        .files_dir(&args.files)
        .journal_mode(journal_mode)
        .build();

    let db = match DocDb::open(config) {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to open database: {}", e);
            process::exit(1);
        }
    };

    let outcome = run(&db, args.command, args.json);
    let closed = db.close();

    if let Err(e) = outcome.and(closed) {
        tracing::error!("{}", e);
        process::exit(1);
    }
}

fn run(db: &DocDb, command: Commands, json: bool) -> docdb::Result<()> {
    match command {
        Commands::Insert { path } => print_records(&[db.insert(&path)?], json),
        Commands::Update { id, path } => print_records(&[db.update(id, &path)?], json),
        Commands::Get { id } => print_records(&[db.find_one(id)?], json),
        Commands::Cat { id } => {
            let mut file = db.open_content(id)?;
            io::copy(&mut file, &mut io::stdout().lock())?;
            Ok(())
        }
        Commands::List {
            sort,
            desc,
            limit,
            offset,
        } => {
            let order = SortOrder::from_ascending(!desc);
            let records = match limit {
                Some(limit) => db.find_many(limit, offset, sort, order)?,
                None => db.find_all(sort, order)?,
            };
            print_records(&records, json)
        }
        Commands::Search { pattern } => print_records(&db.find_like(&pattern)?, json),
        Commands::Delete { id } => {
            db.delete(id)?;
            tracing::info!("Deleted document {}", id);
            Ok(())
        }
        Commands::Orphans => {
            let report = db.orphans()?;
            let mut out = io::stdout().lock();
            if json {
                let text = serde_json::to_string_pretty(&report).map_err(io::Error::from)?;
                writeln!(out, "{}", text)?;
            } else {
                writeln!(out, "dirs without record: {:?}", report.dirs_without_record)?;
                writeln!(out, "records without file: {:?}", report.records_without_file)?;
            }
            Ok(())
        }
    }
}

fn print_records(records: &[Record], json: bool) -> docdb::Result<()> {
    let mut out = io::stdout().lock();

    if json {
        let text = serde_json::to_string_pretty(records).map_err(io::Error::from)?;
        writeln!(out, "{}", text)?;
        return Ok(());
    }

    for r in records {
        writeln!(
            out,
            "{:>6}  {:<32}  {}  {}",
            r.id,
            r.name,
            r.created_at.format("%Y-%m-%d %H:%M:%S"),
            r.updated_at.format("%Y-%m-%d %H:%M:%S")
        )?;
    }
    Ok(())
}
