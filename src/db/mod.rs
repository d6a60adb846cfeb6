//! Database module for Wardroom.
//!
//! Every record category (patients, doctors, staff, ambulances, rooms, medicines and
//! appointments) lives in one SQLite file. A category is an ordered mapping from a
//! string ID to a JSON-encoded record; see [`Store`] for the operations on it. The
//! medicine purchase ledger and the administrator accounts have tables of their own.
//!
//! A [`Database`] is opened once at startup and handed to every component that needs
//! it. Operations that read, check and then write run inside
//! [`Database::transaction`], so a failed check never leaves a partial write behind.

mod ledger;
mod records;
mod users;

pub use ledger::NewPurchase;
pub use records::{Record, Store};

use rusqlite::{Connection, ErrorCode};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// The schema applied on every open.
const SCHEMA: &str = include_str!("schema.sql");

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{category} {id} not found")]
    NotFound { category: Category, id: String },

    #[error("{category} {id} already exists")]
    Duplicate { category: Category, id: String },

    #[error("Invalid credentials")]
    InvalidCredentials,
}

pub type DbResult<T> = Result<T, DbError>;

/// The independently persisted record categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Patient,
    Doctor,
    Staff,
    Ambulance,
    Room,
    Medicine,
    Appointment,
}

impl Category {
    /// Key stored in the `category` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Patient => "patient",
            Category::Doctor => "doctor",
            Category::Staff => "staff",
            Category::Ambulance => "ambulance",
            Category::Room => "room",
            Category::Medicine => "medicine",
            Category::Appointment => "appointment",
        }
    }

    /// Human-readable name used in messages.
    pub fn label(self) -> &'static str {
        match self {
            Category::Patient => "Patient",
            Category::Doctor => "Doctor",
            Category::Staff => "Staff member",
            Category::Ambulance => "Ambulance",
            Category::Room => "Room",
            Category::Medicine => "Medicine",
            Category::Appointment => "Appointment",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens the database at `path`, creating it if needed.
    ///
    /// A file that SQLite does not recognise as a database is renamed to
    /// `<path>.corrupt` and replaced by an empty store, so a damaged file starts the
    /// application with no records instead of failing.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let path = path.as_ref();
        match Self::open_existing(path) {
            Err(DbError::Sqlite(rusqlite::Error::SqliteFailure(e, _)))
                if e.code == ErrorCode::NotADatabase =>
            {
                let backup = corrupt_backup_path(path);
                warn!(
                    path = %path.display(),
                    backup = %backup.display(),
                    "Database file is not readable, starting with an empty store"
                );
                std::fs::rename(path, &backup)?;
                Self::open_existing(path)
            }
            other => other,
        }
    }

    fn open_existing(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.initialize()?;
        info!(path = %path.display(), "Opened database");
        Ok(db)
    }

    /// Creates an in-memory database (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    fn initialize(&self) -> DbResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Read/write access to the record categories outside a transaction.
    pub fn store(&self) -> Store<'_> {
        Store::new(&self.conn)
    }

    /// Runs `f` inside a transaction.
    ///
    /// The transaction commits only if `f` returns `Ok`; on `Err` every write made
    /// through the provided [`Store`] is rolled back.
    pub fn transaction<T, E>(&mut self, f: impl FnOnce(&Store<'_>) -> Result<T, E>) -> Result<T, E>
    where
        E: From<DbError>,
    {
        let tx = self.conn.transaction().map_err(DbError::from)?;
        let value = f(&Store::new(&tx))?;
        tx.commit().map_err(DbError::from)?;
        Ok(value)
    }
}

fn corrupt_backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".corrupt");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory();
        assert!(db.is_ok());
    }

    #[test]
    fn test_schema_initialized() {
        let db = Database::open_in_memory().unwrap();

        let tables: Vec<String> = db
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert!(tables.contains(&"users".to_string()));
        assert!(tables.contains(&"records".to_string()));
        assert!(tables.contains(&"medicine_purchases".to_string()));
    }

    #[test]
    fn test_schema_is_idempotent() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.initialize().is_ok());
    }

    #[test]
    fn test_corrupt_backup_path() {
        assert_eq!(
            corrupt_backup_path(Path::new("/data/wardroom.db")),
            PathBuf::from("/data/wardroom.db.corrupt")
        );
    }
}
