//! Non-GUI core of a student schedule reminder: a self-migrating SQLite
//! store of users and tasks, role-gated task lifecycle operations, and a
//! periodic deadline-proximity scan. The presentation layer is expected to
//! sit on top of `session` and `scheduler`.

pub mod config;
pub mod deadline;
pub mod errors;
pub mod export;
pub mod models;
pub mod scheduler;
pub mod session;
pub mod store;
