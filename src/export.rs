//! CSV export of the task table.

use std::io::Write;

use csv::Writer;

use crate::errors::AppResult;
use crate::models::Task;

pub const EXPORT_HEADER: [&str; 9] = [
    "Name",
    "Subject",
    "Section",
    "Course",
    "Year",
    "Instructor",
    "Term",
    "Deadline",
    "Status",
];

/// Write all tasks in the given order, one record each, RFC 4180 quoting.
pub fn write_tasks<W: Write>(writer: W, tasks: &[Task]) -> AppResult<()> {
    let mut csv_writer = Writer::from_writer(writer);
    csv_writer.write_record(EXPORT_HEADER)?;
    for task in tasks {
        csv_writer.write_record([
            task.name.as_str(),
            task.subject.as_str(),
            task.section.as_str(),
            task.course.as_str(),
            task.year_level.as_str(),
            task.instructor.as_str(),
            task.term.as_str(),
            task.deadline.as_str(),
            task.status.as_str(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}
