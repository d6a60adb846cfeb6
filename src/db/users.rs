//! Administrator accounts.

use super::{Database, DbError, DbResult};
use bcrypt::{hash, verify, DEFAULT_COST};
use rusqlite::{params, OptionalExtension};
use tracing::info;

impl Database {
    /// Creates the administrator account if no user with this name exists.
    ///
    /// The password is stored as a bcrypt hash. An existing account is left untouched,
    /// so changing the configured password later does not overwrite it.
    ///
    /// # Returns
    ///
    /// `true` if the account was created.
    pub fn seed_admin(&self, username: &str, password: &str) -> DbResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM users WHERE username = ?1",
            params![username],
            |row| row.get(0),
        )?;
        if count > 0 {
            return Ok(false);
        }

        self.create_user(username, password)?;
        info!(username, "Created administrator account");
        Ok(true)
    }

    /// Creates a new user, hashing the password before storing it.
    pub fn create_user(&self, username: &str, password: &str) -> DbResult<()> {
        self.create_user_with_cost(username, password, DEFAULT_COST)
    }

    pub(crate) fn create_user_with_cost(&self, username: &str, password: &str, cost: u32) -> DbResult<()> {
        let hashed_password = hash(password, cost)?;
        self.conn.execute(
            "INSERT INTO users (username, password_hash) VALUES (?1, ?2)",
            params![username, hashed_password],
        )?;
        Ok(())
    }

    /// Authenticates a user against the stored bcrypt hash.
    ///
    /// # Returns
    ///
    /// The user's ID when the username exists and the password matches.
    ///
    /// # Errors
    ///
    /// [`DbError::InvalidCredentials`] for an unknown username or a wrong password.
    pub fn authenticate_user(&self, username: &str, password: &str) -> DbResult<i64> {
        let row: Option<(i64, String)> = self
            .conn
            .query_row(
                "SELECT id, password_hash FROM users WHERE username = ?1",
                params![username],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let (user_id, stored_hash) = row.ok_or(DbError::InvalidCredentials)?;
        if verify(password, &stored_hash)? {
            Ok(user_id)
        } else {
            Err(DbError::InvalidCredentials)
        }
    }

    /// Retrieves a username given a user ID.
    pub fn get_username(&self, user_id: i64) -> DbResult<String> {
        let username = self.conn.query_row(
            "SELECT username FROM users WHERE id = ?1",
            params![user_id],
            |row| row.get(0),
        )?;
        Ok(username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum bcrypt cost keeps the tests fast.
    const TEST_COST: u32 = 4;

    #[test]
    fn test_authenticate() {
        let db = Database::open_in_memory().unwrap();
        db.create_user_with_cost("admin", "admin123", TEST_COST).unwrap();

        let id = db.authenticate_user("admin", "admin123").unwrap();
        assert_eq!(db.get_username(id).unwrap(), "admin");

        assert!(matches!(
            db.authenticate_user("admin", "wrong"),
            Err(DbError::InvalidCredentials)
        ));
        assert!(matches!(
            db.authenticate_user("nobody", "admin123"),
            Err(DbError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_seed_admin_creates_missing_account() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.seed_admin("admin", "secret").unwrap());
        assert!(db.authenticate_user("admin", "secret").is_ok());
    }

    #[test]
    fn test_seed_admin_only_once() {
        let db = Database::open_in_memory().unwrap();
        db.create_user_with_cost("admin", "first", TEST_COST).unwrap();

        assert!(!db.seed_admin("admin", "second").unwrap());
        assert!(db.authenticate_user("admin", "first").is_ok());
    }
}
