use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};
use serde::Serialize;

use super::Database;
use crate::error::{HatecheckError, Result};

/// A registered API user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub request_count: i64,
    pub created: DateTime<Utc>,
}

const USER_COLUMNS: &str = "id, username, email, hashed_password, request_count, created";

fn user_from_row(row: &Row) -> rusqlite::Result<User> {
    let created: String = row.get(5)?;
    let created = DateTime::parse_from_rfc3339(&created)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        hashed_password: row.get(3)?,
        request_count: row.get(4)?,
        created,
    })
}

impl Database {
    /// Insert a new user. Usernames are unique.
    pub fn create_user(&self, username: &str, email: &str, hashed_password: &str) -> Result<User> {
        if self.find_user(username)?.is_some() {
            return Err(HatecheckError::already_exists("user", username));
        }

        let created = Utc::now();
        self.conn
            .execute(
                "INSERT INTO users (username, email, hashed_password, request_count, created)
                 VALUES (?1, ?2, ?3, 0, ?4)",
                params![username, email, hashed_password, created.to_rfc3339()],
            )
            .map_err(|e| match e {
                rusqlite::Error::SqliteFailure(err, _)
                    if err.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    HatecheckError::already_exists("user", username)
                }
                other => HatecheckError::db_operation("insert user", other),
            })?;

        let id = self.conn.last_insert_rowid();
        self.conn
            .query_row(
                &format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS),
                [id],
                user_from_row,
            )
            .map_err(|e| HatecheckError::db_operation("read new user", e))
    }

    pub fn find_user(&self, username: &str) -> Result<Option<User>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM users WHERE username = ?1", USER_COLUMNS),
                [username],
                user_from_row,
            )
            .optional()
            .map_err(|e| HatecheckError::db_operation("look up user", e))
    }

    /// Add one to the user's request count and return the new value
    pub fn increment_request_count(&self, username: &str) -> Result<i64> {
        let changed = self
            .conn
            .execute(
                "UPDATE users SET request_count = request_count + 1 WHERE username = ?1",
                [username],
            )
            .map_err(|e| HatecheckError::db_operation("update request count", e))?;

        if changed == 0 {
            return Err(HatecheckError::not_found("user", username));
        }

        self.conn
            .query_row(
                "SELECT request_count FROM users WHERE username = ?1",
                [username],
                |r| r.get(0),
            )
            .map_err(|e| HatecheckError::db_operation("read request count", e))
    }

    pub fn user_count(&self) -> Result<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))
            .map_err(|e| HatecheckError::db_operation("count users", e))
    }
}
