use crate::deadline;
use crate::models::Task;

/// Raw nine-field task input exactly as the presentation layer collects it:
/// free text everywhere, with the deadline split into date and time parts.
#[derive(Debug, Clone, Default)]
pub struct TaskForm {
    pub name: String,
    pub subject: String,
    pub section: String,
    pub course: String,
    pub year_level: String,
    pub instructor: String,
    pub term: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `hh:mm AM/PM`
    pub time: String,
}

impl TaskForm {
    /// Pre-populate an edit form from a stored task. A deadline that no
    /// longer parses is split naively on the first space so the user still
    /// sees something editable; persistence re-validates from scratch.
    pub fn from_task(task: &Task) -> Self {
        let (date, time) = deadline::split_for_edit(&task.deadline);
        TaskForm {
            name: task.name.clone(),
            subject: task.subject.clone(),
            section: task.section.clone(),
            course: task.course.clone(),
            year_level: task.year_level.clone(),
            instructor: task.instructor.clone(),
            term: task.term.as_str().to_string(),
            date,
            time,
        }
    }
}
