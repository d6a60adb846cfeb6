//! Generic per-category record storage.

use super::{Category, DbError, DbResult};
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

/// A value stored in one record category under a string ID.
pub trait Record: Serialize + DeserializeOwned {
    /// The category this record type is persisted in.
    const CATEGORY: Category;

    /// The record's unique key within its category.
    fn id(&self) -> &str;
}

/// Handle to the record categories, bound to a connection or an open transaction.
///
/// Records of a category are returned in insertion order. Replacing a record with
/// [`Store::put`] keeps its position.
pub struct Store<'c> {
    pub(super) conn: &'c Connection,
}

impl<'c> Store<'c> {
    pub(super) fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// All records of a category, in stored order.
    ///
    /// Rows whose body no longer decodes are skipped with a warning.
    pub fn all<R: Record>(&self) -> DbResult<Vec<R>> {
        let mut stmt = self
            .conn
            .prepare("SELECT record_id, body FROM records WHERE category = ?1 ORDER BY seq")?;
        let rows = stmt.query_map(params![R::CATEGORY.as_str()], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (record_id, body) = row?;
            match serde_json::from_str::<R>(&body) {
                Ok(record) => records.push(record),
                Err(e) => warn!(
                    category = R::CATEGORY.as_str(),
                    record_id = %record_id,
                    error = %e,
                    "Skipping undecodable record"
                ),
            }
        }
        Ok(records)
    }

    /// Retrieves a single record by ID.
    pub fn get<R: Record>(&self, id: &str) -> DbResult<Option<R>> {
        let body: Option<String> = self
            .conn
            .query_row(
                "SELECT body FROM records WHERE category = ?1 AND record_id = ?2",
                params![R::CATEGORY.as_str(), id],
                |row| row.get(0),
            )
            .optional()?;

        body.map(|body| serde_json::from_str(&body).map_err(DbError::from))
            .transpose()
    }

    /// Whether a record with this ID exists in category `R`.
    pub fn exists<R: Record>(&self, id: &str) -> DbResult<bool> {
        let found: Option<i64> = self
            .conn
            .query_row(
                "SELECT 1 FROM records WHERE category = ?1 AND record_id = ?2",
                params![R::CATEGORY.as_str(), id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Adds a new record at the end of its category.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Duplicate`] if the ID is already taken.
    pub fn insert<R: Record>(&self, record: &R) -> DbResult<()> {
        if self.exists::<R>(record.id())? {
            return Err(DbError::Duplicate {
                category: R::CATEGORY,
                id: record.id().to_string(),
            });
        }

        let body = serde_json::to_string(record)?;
        self.conn.execute(
            "INSERT INTO records (category, record_id, body) VALUES (?1, ?2, ?3)",
            params![R::CATEGORY.as_str(), record.id(), body],
        )?;
        debug!(category = R::CATEGORY.as_str(), record_id = record.id(), "Inserted record");
        Ok(())
    }

    /// Replaces an existing record, keeping its position in the category.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::NotFound`] if no record has this ID.
    pub fn put<R: Record>(&self, record: &R) -> DbResult<()> {
        let body = serde_json::to_string(record)?;
        let updated = self.conn.execute(
            "UPDATE records SET body = ?3 WHERE category = ?1 AND record_id = ?2",
            params![R::CATEGORY.as_str(), record.id(), body],
        )?;

        if updated == 0 {
            return Err(DbError::NotFound {
                category: R::CATEGORY,
                id: record.id().to_string(),
            });
        }
        debug!(category = R::CATEGORY.as_str(), record_id = record.id(), "Updated record");
        Ok(())
    }

    /// Deletes a record. Returns whether anything was removed.
    pub fn remove<R: Record>(&self, id: &str) -> DbResult<bool> {
        let removed = self.conn.execute(
            "DELETE FROM records WHERE category = ?1 AND record_id = ?2",
            params![R::CATEGORY.as_str(), id],
        )?;
        Ok(removed > 0)
    }

    /// Replaces the whole category with `records`, stored in the given order.
    pub fn replace_all<R: Record>(&self, records: &[R]) -> DbResult<()> {
        self.conn.execute(
            "DELETE FROM records WHERE category = ?1",
            params![R::CATEGORY.as_str()],
        )?;
        for record in records {
            self.insert(record)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::db::{Database, DbError};
    use crate::models::{Medicine, Patient};

    fn patient(id: &str, name: &str) -> Patient {
        Patient {
            id: id.to_string(),
            name: name.to_string(),
            age: 30,
            disease: "Flu".to_string(),
        }
    }

    #[test]
    fn test_insert_and_get() {
        let db = Database::open_in_memory().unwrap();
        let store = db.store();

        store.insert(&patient("P1", "Alice")).unwrap();

        let loaded: Patient = store.get("P1").unwrap().unwrap();
        assert_eq!(loaded.name, "Alice");
        assert!(store.exists::<Patient>("P1").unwrap());
        assert!(store.get::<Patient>("P2").unwrap().is_none());
    }

    #[test]
    fn test_categories_are_independent() {
        let db = Database::open_in_memory().unwrap();
        let store = db.store();

        store.insert(&patient("X1", "Alice")).unwrap();
        store
            .insert(&Medicine {
                id: "X1".to_string(),
                name: "Paracetamol".to_string(),
                price: "12.5".to_string(),
            })
            .unwrap();

        assert_eq!(store.all::<Patient>().unwrap().len(), 1);
        assert_eq!(store.all::<Medicine>().unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let db = Database::open_in_memory().unwrap();
        let store = db.store();

        store.insert(&patient("P1", "Alice")).unwrap();
        let err = store.insert(&patient("P1", "Bob")).unwrap_err();
        assert!(matches!(err, DbError::Duplicate { .. }));
    }

    #[test]
    fn test_put_keeps_stored_order() {
        let db = Database::open_in_memory().unwrap();
        let store = db.store();

        for (id, name) in [("P1", "Alice"), ("P2", "Bob"), ("P3", "Carol")] {
            store.insert(&patient(id, name)).unwrap();
        }
        store.put(&patient("P1", "Alicia")).unwrap();

        let ids: Vec<String> = store.all::<Patient>().unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, ["P1", "P2", "P3"]);
        assert_eq!(store.get::<Patient>("P1").unwrap().unwrap().name, "Alicia");
    }

    #[test]
    fn test_put_unknown_record() {
        let db = Database::open_in_memory().unwrap();
        let err = db.store().put(&patient("P9", "Nobody")).unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[test]
    fn test_remove() {
        let db = Database::open_in_memory().unwrap();
        let store = db.store();

        store.insert(&patient("P1", "Alice")).unwrap();
        assert!(store.remove::<Patient>("P1").unwrap());
        assert!(!store.remove::<Patient>("P1").unwrap());
        assert!(store.all::<Patient>().unwrap().is_empty());
    }

    #[test]
    fn test_free_text_with_commas_round_trips() {
        let db = Database::open_in_memory().unwrap();
        let store = db.store();

        let mut p = patient("P1", "Doe, John");
        p.disease = "fever, \"cough\"\nand chills".to_string();
        store.insert(&p).unwrap();

        assert_eq!(store.get::<Patient>("P1").unwrap().unwrap(), p);
    }

    #[test]
    fn test_undecodable_rows_are_skipped() {
        let db = Database::open_in_memory().unwrap();
        let store = db.store();

        store.insert(&patient("P1", "Alice")).unwrap();
        db.conn
            .execute(
                "INSERT INTO records (category, record_id, body) VALUES ('patient', 'P2', 'not json')",
                [],
            )
            .unwrap();

        let all = store.all::<Patient>().unwrap();
        assert_eq!(all.len(), 1);
        assert!(store.get::<Patient>("P2").is_err());
    }

    #[test]
    fn test_transaction_rolls_back_on_error() {
        let mut db = Database::open_in_memory().unwrap();

        let result: Result<(), DbError> = db.transaction(|store| {
            store.insert(&patient("P1", "Alice"))?;
            Err(DbError::InvalidCredentials)
        });
        assert!(result.is_err());
        assert!(!db.store().exists::<Patient>("P1").unwrap());

        db.transaction(|store| store.insert(&patient("P1", "Alice"))).unwrap();
        assert!(db.store().exists::<Patient>("P1").unwrap());
    }
}
