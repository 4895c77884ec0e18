//! Session context and task lifecycle operations.
//!
//! A `Session` is the explicit state of one logged-in user: the
//! authenticated identity plus an in-memory task cache rebuilt from the
//! store on login. Every mutating operation writes the store first and only
//! then updates the cache, so the cache never gets ahead of disk.

use std::io::Write;

use crate::deadline;
use crate::errors::{AppError, AppResult};
use crate::export;
use crate::models::{Role, Task, TaskFields, TaskForm, TaskStatus, Term, User};
use crate::store::Store;

/// Everything a session can ask for. Kept as data so permission policy is
/// one pure function instead of a check scattered through each operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    AddTask,
    EditTask,
    DeleteTask,
    ExportTasks,
    MarkCompleted,
}

impl Action {
    pub fn describe(&self) -> &'static str {
        match self {
            Action::AddTask => "add tasks",
            Action::EditTask => "edit tasks",
            Action::DeleteTask => "delete tasks",
            Action::ExportTasks => "export schedules",
            Action::MarkCompleted => "mark tasks completed",
        }
    }
}

/// Marking a task completed is the one thing students may do; everything
/// else needs a manager role.
pub fn permitted(role: Role, action: Action) -> bool {
    match action {
        Action::MarkCompleted => true,
        Action::AddTask | Action::EditTask | Action::DeleteTask | Action::ExportTasks => {
            role.is_manager()
        }
    }
}

pub struct Session {
    pub user: User,
    /// Cache of the tasks table, ascending id order.
    pub tasks: Vec<Task>,
}

impl Session {
    /// Validate credentials and build a session with a fresh task cache.
    /// `None` means the username/password pair did not match.
    pub fn login(store: &Store, username: &str, password: &str) -> AppResult<Option<Session>> {
        match store.authenticate(username, password)? {
            Some(user) => {
                let tasks = store.list_tasks()?;
                tracing::info!(username = %user.username, role = user.role.as_str(), "login");
                Ok(Some(Session { user, tasks }))
            }
            None => {
                tracing::warn!(username, "rejected login attempt");
                Ok(None)
            }
        }
    }

    /// Rebuild the cache from the store.
    pub fn reload(&mut self, store: &Store) -> AppResult<()> {
        self.tasks = store.list_tasks()?;
        Ok(())
    }

    fn authorize(&self, action: Action) -> AppResult<()> {
        if permitted(self.user.role, action) {
            Ok(())
        } else {
            Err(AppError::Permission {
                role: self.user.role.as_str(),
                action: action.describe(),
            })
        }
    }

    pub fn add_task(&mut self, store: &Store, form: &TaskForm) -> AppResult<Task> {
        self.authorize(Action::AddTask)?;
        let fields = validate_form(form)?;
        let id = store.insert_task(&fields, TaskStatus::Pending)?;
        let task = Task::from_fields(id, fields, TaskStatus::Pending);
        tracing::info!(id, name = %task.name, "task added");
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Full-field edit. The status column is untouched; re-validation and
    /// re-formatting of the deadline happen from scratch.
    pub fn edit_task(&mut self, store: &Store, id: i64, form: &TaskForm) -> AppResult<Task> {
        self.authorize(Action::EditTask)?;
        let fields = validate_form(form)?;
        let position = self.position_of(id)?;
        if store.update_task(id, &fields)? == 0 {
            // Deleted out from under the cache since the last reload.
            return Err(AppError::NotFound(id));
        }
        self.tasks[position].apply_fields(fields);
        tracing::info!(id, "task edited");
        Ok(self.tasks[position].clone())
    }

    /// `confirmed` is the caller's yes/no prompt result; nothing is touched
    /// until it is true. Returns whether a delete actually happened.
    pub fn delete_task(&mut self, store: &Store, id: i64, confirmed: bool) -> AppResult<bool> {
        self.authorize(Action::DeleteTask)?;
        if !confirmed {
            return Ok(false);
        }
        let position = self.position_of(id)?;
        store.delete_task(id)?;
        let removed = self.tasks.remove(position);
        tracing::info!(id, name = %removed.name, "task deleted");
        Ok(true)
    }

    /// Open to every role. Idempotent: completing a completed task is a
    /// second no-op write, never an error. Nothing ever goes back to
    /// Pending through this operation.
    pub fn mark_completed(&mut self, store: &Store, id: i64) -> AppResult<()> {
        self.authorize(Action::MarkCompleted)?;
        let position = self.position_of(id)?;
        store.set_status(id, TaskStatus::Completed)?;
        self.tasks[position].status = TaskStatus::Completed;
        tracing::info!(id, "task marked completed");
        Ok(())
    }

    /// CSV export of the cache, manager-gated.
    pub fn export_tasks<W: Write>(&self, writer: W) -> AppResult<()> {
        self.authorize(Action::ExportTasks)?;
        export::write_tasks(writer, &self.tasks)
    }

    fn position_of(&self, id: i64) -> AppResult<usize> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(AppError::NotFound(id))
    }
}

/// Trim all nine inputs, reject blanks, parse the term and the deadline.
/// The deadline is re-formatted to the canonical stored string.
fn validate_form(form: &TaskForm) -> AppResult<TaskFields> {
    let name = form.name.trim();
    let subject = form.subject.trim();
    let section = form.section.trim();
    let course = form.course.trim();
    let year_level = form.year_level.trim();
    let instructor = form.instructor.trim();
    let term = form.term.trim();
    let date = form.date.trim();
    let time = form.time.trim();

    let required = [
        name, subject, section, course, year_level, instructor, term, date, time,
    ];
    if required.iter().any(|v| v.is_empty()) {
        return Err(AppError::Validation("All fields are required!".into()));
    }

    let term = Term::parse(term)
        .ok_or_else(|| AppError::Validation("Term must be Prelim or Midterm".into()))?;
    let parsed = deadline::combine(date, time)?;

    Ok(TaskFields {
        name: name.to_string(),
        subject: subject.to_string(),
        section: section.to_string(),
        course: course.to_string(),
        year_level: year_level.to_string(),
        instructor: instructor.to_string(),
        term,
        deadline: deadline::format(parsed),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager_session(store: &Store) -> Session {
        Session::login(store, "instructor", "teach123")
            .unwrap()
            .expect("seeded instructor should log in")
    }

    fn student_session(store: &Store) -> Session {
        Session::login(store, "student", "1234")
            .unwrap()
            .expect("seeded student should log in")
    }

    fn sample_form() -> TaskForm {
        TaskForm {
            name: "Essay".into(),
            subject: "English".into(),
            section: "A".into(),
            course: "BSIT".into(),
            year_level: "2".into(),
            instructor: "Cruz".into(),
            term: "Prelim".into(),
            date: "2025-03-14".into(),
            time: "02:30 PM".into(),
        }
    }

    #[test]
    fn login_rejects_bad_password() {
        let store = Store::open_in_memory().unwrap();
        assert!(Session::login(&store, "student", "wrong").unwrap().is_none());
    }

    #[test]
    fn add_task_persists_and_caches() {
        let store = Store::open_in_memory().unwrap();
        let mut session = manager_session(&store);

        let task = session.add_task(&store, &sample_form()).unwrap();
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.deadline, "2025-03-14 02:30 PM");

        let stored = store.list_tasks().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].name, "Essay");
        assert_eq!(stored[0].subject, "English");
        assert_eq!(session.tasks.len(), 1);
    }

    #[test]
    fn add_task_trims_whitespace() {
        let store = Store::open_in_memory().unwrap();
        let mut session = manager_session(&store);
        let mut form = sample_form();
        form.name = "  Essay  ".into();
        let task = session.add_task(&store, &form).unwrap();
        assert_eq!(task.name, "Essay");
    }

    #[test]
    fn student_cannot_add_or_delete() {
        let store = Store::open_in_memory().unwrap();
        let mut manager = manager_session(&store);
        let task = manager.add_task(&store, &sample_form()).unwrap();

        let mut student = student_session(&store);
        assert!(matches!(
            student.add_task(&store, &sample_form()),
            Err(AppError::Permission { .. })
        ));
        assert!(matches!(
            student.delete_task(&store, task.id, true),
            Err(AppError::Permission { .. })
        ));
        // Task survived the refused delete.
        assert_eq!(store.list_tasks().unwrap().len(), 1);
    }

    #[test]
    fn student_may_mark_completed_and_it_is_idempotent() {
        let store = Store::open_in_memory().unwrap();
        let mut manager = manager_session(&store);
        let task = manager.add_task(&store, &sample_form()).unwrap();

        let mut student = student_session(&store);
        student.reload(&store).unwrap();
        student.mark_completed(&store, task.id).unwrap();
        student.mark_completed(&store, task.id).unwrap();

        assert_eq!(store.list_tasks().unwrap()[0].status, TaskStatus::Completed);
    }

    #[test]
    fn mark_completed_missing_id_is_not_found() {
        let store = Store::open_in_memory().unwrap();
        let mut session = student_session(&store);
        assert!(matches!(
            session.mark_completed(&store, 42),
            Err(AppError::NotFound(42))
        ));
    }

    #[test]
    fn malformed_time_fails_with_no_store_mutation() {
        let store = Store::open_in_memory().unwrap();
        let mut session = manager_session(&store);

        let mut form = sample_form();
        form.time = "25:99".into();
        assert!(matches!(
            session.add_task(&store, &form),
            Err(AppError::InvalidDeadlineFormat)
        ));
        assert!(store.list_tasks().unwrap().is_empty());

        let task = session.add_task(&store, &sample_form()).unwrap();
        let mut bad_edit = sample_form();
        bad_edit.time = "half past two".into();
        assert!(matches!(
            session.edit_task(&store, task.id, &bad_edit),
            Err(AppError::InvalidDeadlineFormat)
        ));
        assert_eq!(store.list_tasks().unwrap()[0].deadline, "2025-03-14 02:30 PM");
    }

    #[test]
    fn edit_task_rewrites_every_content_field() {
        let store = Store::open_in_memory().unwrap();
        let mut session = manager_session(&store);
        let task = session.add_task(&store, &sample_form()).unwrap();

        let mut form = sample_form();
        form.subject = "Literature".into();
        form.term = "Midterm".into();
        form.time = "09:00 AM".into();
        let edited = session.edit_task(&store, task.id, &form).unwrap();

        assert_eq!(edited.subject, "Literature");
        assert_eq!(edited.term, Term::Midterm);
        assert_eq!(edited.deadline, "2025-03-14 09:00 AM");
        assert_eq!(edited.status, TaskStatus::Pending);
        assert_eq!(store.list_tasks().unwrap()[0].subject, "Literature");
    }

    #[test]
    fn edit_task_stale_id_is_not_found() {
        let store = Store::open_in_memory().unwrap();
        let mut session = manager_session(&store);
        assert!(matches!(
            session.edit_task(&store, 7, &sample_form()),
            Err(AppError::NotFound(7))
        ));
    }

    #[test]
    fn delete_requires_confirmation() {
        let store = Store::open_in_memory().unwrap();
        let mut session = manager_session(&store);
        let task = session.add_task(&store, &sample_form()).unwrap();

        assert!(!session.delete_task(&store, task.id, false).unwrap());
        assert_eq!(store.list_tasks().unwrap().len(), 1);
        assert_eq!(session.tasks.len(), 1);

        assert!(session.delete_task(&store, task.id, true).unwrap());
        assert!(store.list_tasks().unwrap().is_empty());
        assert!(session.tasks.is_empty());
    }

    #[test]
    fn export_is_manager_gated() {
        let store = Store::open_in_memory().unwrap();
        let student = student_session(&store);
        let mut out = Vec::new();
        assert!(matches!(
            student.export_tasks(&mut out),
            Err(AppError::Permission { .. })
        ));
        assert!(out.is_empty());
    }
}
