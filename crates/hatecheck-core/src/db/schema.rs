//! SQLite database schema for hatecheck

use rusqlite::Connection;

use crate::error::{HatecheckError, Result};

pub const CURRENT_SCHEMA_VERSION: i32 = 1;

const SCHEMA_SQL: &str = r#"
-- Registered API users
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    email TEXT NOT NULL,
    hashed_password TEXT NOT NULL,
    request_count INTEGER NOT NULL DEFAULT 0,
    created TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_users_email ON users(email);

-- Service metadata (schema version, token secret)
CREATE TABLE IF NOT EXISTS service_meta (
    key TEXT PRIMARY KEY,
    value TEXT
);
"#;

/// Create or upgrade the schema
///
/// User rows cannot be rebuilt from anywhere else, so a database written
/// by a newer schema is refused instead of being dropped.
pub fn create_schema(conn: &Connection) -> Result<()> {
    let current_version: Option<i32> = conn
        .query_row(
            "SELECT value FROM service_meta WHERE key = 'schema_version'",
            [],
            |r| r.get::<_, String>(0).map(|s| s.parse().unwrap_or(0)),
        )
        .ok();

    match current_version {
        None => {
            conn.execute_batch(SCHEMA_SQL)?;
            conn.execute(
                "INSERT INTO service_meta (key, value) VALUES ('schema_version', ?1)",
                [&CURRENT_SCHEMA_VERSION.to_string()],
            )?;
        }
        Some(v) if v < CURRENT_SCHEMA_VERSION => {
            conn.execute_batch(SCHEMA_SQL)?;
            conn.execute(
                "UPDATE service_meta SET value = ?1 WHERE key = 'schema_version'",
                [&CURRENT_SCHEMA_VERSION.to_string()],
            )?;
            tracing::info!(
                "Database schema updated from version {} to {}",
                v,
                CURRENT_SCHEMA_VERSION
            );
        }
        Some(v) if v == CURRENT_SCHEMA_VERSION => {}
        Some(v) => {
            return Err(HatecheckError::invalid_value(
                "database schema version",
                format!("{} (newest supported is {})", v, CURRENT_SCHEMA_VERSION),
            ));
        }
    }

    Ok(())
}
