//! Schema bootstrap and column evolution.
//!
//! Safe to run on every startup: tables are created if absent, missing
//! columns are added with defaults so old rows stay valid, and the built-in
//! accounts are re-seeded with their authoritative roles.

use std::collections::HashSet;

use rusqlite::{params, Connection};

use crate::errors::AppResult;

/// username, password, fullname, role. Passwords are deliberately plain.
const DEFAULT_USERS: &[(&str, &str, &str, &str)] = &[
    ("student", "1234", "Student User", "student"),
    ("admin", "admin123", "Administrator", "admin"),
    ("instructor", "teach123", "Instructor", "instructor"),
];

const REQUIRED_USER_COLUMNS: &[(&str, &str)] =
    &[("role", "role TEXT NOT NULL DEFAULT 'student'")];

const REQUIRED_TASK_COLUMNS: &[(&str, &str)] = &[
    ("section", "section TEXT NOT NULL DEFAULT ''"),
    ("course", "course TEXT NOT NULL DEFAULT ''"),
    ("year_level", "year_level TEXT NOT NULL DEFAULT ''"),
    ("instructor", "instructor TEXT NOT NULL DEFAULT ''"),
    ("term", "term TEXT NOT NULL DEFAULT 'Prelim'"),
];

pub(super) fn ensure_schema(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS users (
            username TEXT PRIMARY KEY,
            password TEXT NOT NULL,
            fullname TEXT NOT NULL,
            role TEXT NOT NULL DEFAULT 'student'
        );
        CREATE TABLE IF NOT EXISTS tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            subject TEXT NOT NULL,
            section TEXT NOT NULL,
            course TEXT NOT NULL,
            year_level TEXT NOT NULL,
            instructor TEXT NOT NULL,
            term TEXT NOT NULL,
            deadline TEXT NOT NULL,
            status TEXT NOT NULL
        );",
    )?;

    ensure_table_columns(conn, "users", REQUIRED_USER_COLUMNS)?;
    ensure_table_columns(conn, "tasks", REQUIRED_TASK_COLUMNS)?;
    seed_users(conn)?;
    Ok(())
}

/// Compare the live column set against the required one and ALTER in
/// whatever is missing. Defaults keep existing rows valid without a
/// backfill pass.
fn ensure_table_columns(
    conn: &Connection,
    table: &str,
    columns: &[(&str, &str)],
) -> AppResult<()> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table})"))?;
    let existing: HashSet<String> = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<Result<_, _>>()?;

    for (name, definition) in columns {
        if !existing.contains(*name) {
            conn.execute(&format!("ALTER TABLE {table} ADD COLUMN {definition}"), [])?;
            tracing::info!(table, column = name, "added missing column");
        }
    }
    Ok(())
}

/// Insert the built-in accounts if absent; on every boot the built-in role
/// wins, while a changed password or fullname is left alone.
fn seed_users(conn: &Connection) -> AppResult<()> {
    for (username, password, fullname, role) in DEFAULT_USERS {
        conn.execute(
            "INSERT OR IGNORE INTO users (username, password, fullname, role)
             VALUES (?1, ?2, ?3, ?4)",
            params![username, password, fullname, role],
        )?;
        conn.execute(
            "UPDATE users SET role = ?1 WHERE username = ?2",
            params![role, username],
        )?;
    }
    Ok(())
}
