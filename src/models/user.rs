use serde::{Deserialize, Serialize};

/// Access tier controlling which operations a logged-in user may perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Instructor,
    Admin,
}

impl Role {
    /// Lenient parse used when reading rows: anything unrecognized
    /// (including the empty string from pre-migration rows) is a student.
    pub fn parse(value: &str) -> Self {
        match value {
            "admin" => Role::Admin,
            "instructor" => Role::Instructor,
            _ => Role::Student,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Instructor => "instructor",
            Role::Admin => "admin",
        }
    }

    /// Instructors and admins may create/edit/delete/export tasks.
    pub fn is_manager(&self) -> bool {
        matches!(self, Role::Instructor | Role::Admin)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    pub username: String,
    // Stored and compared in plain text, matching the seeded accounts.
    pub password: String,
    pub fullname: String,
    pub role: Role,
}
