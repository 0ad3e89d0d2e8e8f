//! SQLite database module for hatecheck

mod schema;
mod users;

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use crate::auth;
use crate::error::{HatecheckError, Result};

pub use schema::{create_schema, CURRENT_SCHEMA_VERSION};
pub use users::User;

/// Database filename inside the store
pub const DB_FILE: &str = "hatecheck.db";

const TOKEN_SECRET_KEY: &str = "token_secret";

/// SQLite database for hatecheck
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create the database at the given store root
    pub fn open(store_root: &Path) -> Result<Self> {
        let db_path = store_root.join(DB_FILE);

        let conn = Connection::open(&db_path).map_err(|e| {
            HatecheckError::Other(format!(
                "failed to open database at {}: {}",
                db_path.display(),
                e
            ))
        })?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| HatecheckError::Other(format!("failed to enable WAL mode: {}", e)))?;

        Self::from_connection(conn)
    }

    /// In-memory database, for tests and one-shot use
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| HatecheckError::db_operation("open in-memory database", e))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        create_schema(&conn)?;
        let db = Database { conn };
        db.ensure_token_secret()?;
        Ok(db)
    }

    fn ensure_token_secret(&self) -> Result<()> {
        let inserted = self
            .conn
            .execute(
                "INSERT OR IGNORE INTO service_meta (key, value) VALUES (?1, ?2)",
                params![TOKEN_SECRET_KEY, auth::generate_secret()],
            )
            .map_err(|e| HatecheckError::db_operation("store token secret", e))?;

        if inserted > 0 {
            tracing::info!("Generated new token secret");
        }
        Ok(())
    }

    /// Secret used to sign and verify access tokens
    pub fn token_secret(&self) -> Result<String> {
        self.conn
            .query_row(
                "SELECT value FROM service_meta WHERE key = ?1",
                [TOKEN_SECRET_KEY],
                |r| r.get::<_, String>(0),
            )
            .optional()
            .map_err(|e| HatecheckError::db_operation("read token secret", e))?
            .ok_or_else(|| HatecheckError::not_found("service metadata", TOKEN_SECRET_KEY))
    }

    pub fn get_schema_version(&self) -> Result<i32> {
        self.conn
            .query_row(
                "SELECT value FROM service_meta WHERE key = 'schema_version'",
                [],
                |r| {
                    let s: String = r.get(0)?;
                    Ok(s.parse().unwrap_or(0))
                },
            )
            .map_err(|e| HatecheckError::db_operation("get schema version", e))
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        // Checkpoint so a following process sees every committed row
        let _ = self.conn.pragma_update(None, "wal_checkpoint", "TRUNCATE");
    }
}
