use serde::{Deserialize, Serialize};

/// Academic period tag attached to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Term {
    Prelim,
    Midterm,
}

impl Term {
    /// Strict parse for validating form input.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Prelim" => Some(Term::Prelim),
            "Midterm" => Some(Term::Midterm),
            _ => None,
        }
    }

    /// Lenient parse for rows migrated with an empty or unexpected term.
    pub fn parse_or_default(value: &str) -> Self {
        Self::parse(value).unwrap_or(Term::Prelim)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Term::Prelim => "Prelim",
            Term::Midterm => "Midterm",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    Pending,
    Completed,
}

impl TaskStatus {
    pub fn parse_or_default(value: &str) -> Self {
        match value {
            "Completed" => TaskStatus::Completed,
            _ => TaskStatus::Pending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::Completed => "Completed",
        }
    }
}

/// A stored task row. `id` is assigned by the store and never changes.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Task {
    pub id: i64,
    pub name: String,
    pub subject: String,
    pub section: String,
    pub course: String,
    pub year_level: String,
    pub instructor: String,
    pub term: Term,
    /// Formatted `YYYY-MM-DD hh:mm AM/PM` string, minute precision.
    pub deadline: String,
    pub status: TaskStatus,
}

/// Validated, trimmed write-shape for insert/update. The deadline has
/// already been parsed and re-formatted by the session layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFields {
    pub name: String,
    pub subject: String,
    pub section: String,
    pub course: String,
    pub year_level: String,
    pub instructor: String,
    pub term: Term,
    pub deadline: String,
}

impl TaskFields {
    /// All text columns, for the store's empty-field guard.
    pub fn text_values(&self) -> [&str; 7] {
        [
            &self.name,
            &self.subject,
            &self.section,
            &self.course,
            &self.year_level,
            &self.instructor,
            &self.deadline,
        ]
    }
}

impl Task {
    pub fn from_fields(id: i64, fields: TaskFields, status: TaskStatus) -> Self {
        Task {
            id,
            name: fields.name,
            subject: fields.subject,
            section: fields.section,
            course: fields.course,
            year_level: fields.year_level,
            instructor: fields.instructor,
            term: fields.term,
            deadline: fields.deadline,
            status,
        }
    }

    /// In-place overwrite after a successful store update. Status is not
    /// touched; editing never changes completion state.
    pub fn apply_fields(&mut self, fields: TaskFields) {
        self.name = fields.name;
        self.subject = fields.subject;
        self.section = fields.section;
        self.course = fields.course;
        self.year_level = fields.year_level;
        self.instructor = fields.instructor;
        self.term = fields.term;
        self.deadline = fields.deadline;
    }
}
