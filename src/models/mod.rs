mod forms;
mod task;
mod user;

pub use forms::TaskForm;
pub use task::{Task, TaskFields, TaskStatus, Term};
pub use user::{Role, User};
