//! SQLite record store for users and tasks.
//!
//! All operations are synchronous single statements; every write commits
//! immediately. Opening the store runs the schema evolver, so callers never
//! see a half-migrated database.

mod schema;

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::errors::{AppError, AppResult};
use crate::models::{Role, Task, TaskFields, TaskStatus, Term, User};

pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create) the store at `path` and bring the schema up to date.
    /// Failure here is fatal to the application.
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let conn = Connection::open(path)?;
        let store = Store { conn };
        store.ensure_schema()?;
        Ok(store)
    }

    /// In-memory store, used by tests and throwaway tooling.
    pub fn open_in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Store { conn };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Idempotent schema bootstrap; see `store::schema`.
    pub fn ensure_schema(&self) -> AppResult<()> {
        schema::ensure_schema(&self.conn)
    }

    pub fn list_users(&self) -> AppResult<Vec<User>> {
        let mut stmt = self.conn.prepare(
            "SELECT username, password, fullname, role FROM users ORDER BY username",
        )?;
        let users = stmt
            .query_map([], user_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }

    /// Exact, case-sensitive match on both fields. No hashing, no lockout.
    pub fn authenticate(&self, username: &str, password: &str) -> AppResult<Option<User>> {
        let user = self
            .conn
            .query_row(
                "SELECT username, password, fullname, role FROM users WHERE username = ?1",
                params![username],
                user_from_row,
            )
            .optional()?;
        Ok(user.filter(|u| u.password == password))
    }

    pub fn list_tasks(&self) -> AppResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, subject, section, course, year_level, instructor,
                    term, deadline, status
             FROM tasks
             ORDER BY id",
        )?;
        let tasks = stmt
            .query_map([], task_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    /// Insert a task and return its assigned id. Rejects any field that is
    /// empty after trimming; the session layer has normally trimmed already.
    pub fn insert_task(&self, fields: &TaskFields, status: TaskStatus) -> AppResult<i64> {
        ensure_fields_present(fields)?;
        self.conn.execute(
            "INSERT INTO tasks (name, subject, section, course, year_level,
                                instructor, term, deadline, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                fields.name,
                fields.subject,
                fields.section,
                fields.course,
                fields.year_level,
                fields.instructor,
                fields.term.as_str(),
                fields.deadline,
                status.as_str(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Overwrite every content column of `id`, leaving status alone.
    /// Returns the number of affected rows; zero means the id is stale.
    pub fn update_task(&self, id: i64, fields: &TaskFields) -> AppResult<usize> {
        ensure_fields_present(fields)?;
        let changed = self.conn.execute(
            "UPDATE tasks
             SET name = ?1, subject = ?2, section = ?3, course = ?4,
                 year_level = ?5, instructor = ?6, term = ?7, deadline = ?8
             WHERE id = ?9",
            params![
                fields.name,
                fields.subject,
                fields.section,
                fields.course,
                fields.year_level,
                fields.instructor,
                fields.term.as_str(),
                fields.deadline,
                id,
            ],
        )?;
        Ok(changed)
    }

    pub fn delete_task(&self, id: i64) -> AppResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        Ok(changed)
    }

    pub fn set_status(&self, id: i64, status: TaskStatus) -> AppResult<usize> {
        let changed = self.conn.execute(
            "UPDATE tasks SET status = ?1 WHERE id = ?2",
            params![status.as_str(), id],
        )?;
        Ok(changed)
    }
}

fn ensure_fields_present(fields: &TaskFields) -> AppResult<()> {
    if fields.text_values().iter().any(|v| v.trim().is_empty()) {
        return Err(AppError::Validation("All fields are required!".into()));
    }
    Ok(())
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        username: row.get(0)?,
        password: row.get(1)?,
        fullname: row.get(2)?,
        role: Role::parse(&row.get::<_, String>(3)?),
    })
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        name: row.get(1)?,
        subject: row.get(2)?,
        section: row.get(3)?,
        course: row.get(4)?,
        year_level: row.get(5)?,
        instructor: row.get(6)?,
        term: Term::parse_or_default(&row.get::<_, String>(7)?),
        deadline: row.get(8)?,
        status: TaskStatus::parse_or_default(&row.get::<_, String>(9)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fields() -> TaskFields {
        TaskFields {
            name: "Essay".into(),
            subject: "English".into(),
            section: "A".into(),
            course: "BSIT".into(),
            year_level: "2".into(),
            instructor: "Cruz".into(),
            term: Term::Prelim,
            deadline: "2025-03-14 02:30 PM".into(),
        }
    }

    #[test]
    fn authenticate_is_exact_and_case_sensitive() {
        let store = Store::open_in_memory().unwrap();
        let user = store.authenticate("admin", "admin123").unwrap().unwrap();
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.fullname, "Administrator");

        assert!(store.authenticate("admin", "ADMIN123").unwrap().is_none());
        assert!(store.authenticate("Admin", "admin123").unwrap().is_none());
        assert!(store.authenticate("nobody", "x").unwrap().is_none());
    }

    #[test]
    fn insert_assigns_ascending_ids() {
        let store = Store::open_in_memory().unwrap();
        let first = store.insert_task(&sample_fields(), TaskStatus::Pending).unwrap();
        let second = store.insert_task(&sample_fields(), TaskStatus::Pending).unwrap();
        assert!(second > first);

        let tasks = store.list_tasks().unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, first);
        assert_eq!(tasks[1].id, second);
        assert_eq!(tasks[0].status, TaskStatus::Pending);
    }

    #[test]
    fn insert_rejects_blank_fields() {
        let store = Store::open_in_memory().unwrap();
        let mut fields = sample_fields();
        fields.section = "   ".into();
        assert!(matches!(
            store.insert_task(&fields, TaskStatus::Pending),
            Err(AppError::Validation(_))
        ));
        assert!(store.list_tasks().unwrap().is_empty());
    }

    #[test]
    fn update_of_missing_id_affects_zero_rows() {
        let store = Store::open_in_memory().unwrap();
        assert_eq!(store.update_task(999, &sample_fields()).unwrap(), 0);
    }

    #[test]
    fn set_status_and_delete() {
        let store = Store::open_in_memory().unwrap();
        let id = store.insert_task(&sample_fields(), TaskStatus::Pending).unwrap();

        assert_eq!(store.set_status(id, TaskStatus::Completed).unwrap(), 1);
        assert_eq!(store.list_tasks().unwrap()[0].status, TaskStatus::Completed);

        assert_eq!(store.delete_task(id).unwrap(), 1);
        assert!(store.list_tasks().unwrap().is_empty());
        assert_eq!(store.delete_task(id).unwrap(), 0);
    }

    #[test]
    fn list_users_is_ordered_by_username() {
        let store = Store::open_in_memory().unwrap();
        let names: Vec<String> = store
            .list_users()
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect();
        assert_eq!(names, ["admin", "instructor", "student"]);
    }
}
