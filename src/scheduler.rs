//! Deadline-proximity scan.
//!
//! Classification is a pure function over (deadline, now); the periodic
//! behavior lives in `Scheduler::alerts`, a lazy stream where every pull
//! re-reads the task table and scans at the current wall clock. Display,
//! pacing, and any future de-duplication policy belong to the caller.

use std::time::Duration;

use chrono::{Local, NaiveDateTime};

use crate::deadline;
use crate::errors::AppResult;
use crate::models::{Task, TaskStatus};
use crate::store::Store;

const DUE_NOW_WINDOW_SECS: i64 = 60;
const ALMOST_DUE_WINDOW_SECS: i64 = 3 * 60 * 60;

/// How close a pending task is to its deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    /// Deadline already passed.
    Overdue,
    /// Due within the next minute.
    DueNow,
    /// Due within the next three hours.
    AlmostDue { minutes_left: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub task_id: i64,
    pub task_name: String,
    pub urgency: Urgency,
}

/// First match wins: overdue, then the one-minute window, then the
/// three-hour window. Anything further out gets no alert.
pub fn classify(deadline: NaiveDateTime, now: NaiveDateTime) -> Option<Urgency> {
    let delta = (deadline - now).num_seconds();
    if delta < 0 {
        Some(Urgency::Overdue)
    } else if delta <= DUE_NOW_WINDOW_SECS {
        Some(Urgency::DueNow)
    } else if delta <= ALMOST_DUE_WINDOW_SECS {
        Some(Urgency::AlmostDue {
            minutes_left: delta / 60,
        })
    } else {
        None
    }
}

/// One scan pass: at most one alert per pending task. Tasks whose stored
/// deadline parses in neither format are skipped without an error.
pub fn scan(tasks: &[Task], now: NaiveDateTime) -> Vec<Alert> {
    tasks
        .iter()
        .filter(|task| task.status == TaskStatus::Pending)
        .filter_map(|task| {
            let parsed = deadline::parse_lenient(&task.deadline)?;
            classify(parsed, now).map(|urgency| Alert {
                task_id: task.id,
                task_name: task.name.clone(),
                urgency,
            })
        })
        .collect()
}

/// Periodic reminder source. A task sitting in a qualifying window is
/// re-alerted on every cycle; suppression of repeats is deliberately left
/// to whoever consumes the stream.
pub struct Scheduler {
    pub period: Duration,
}

impl Scheduler {
    pub fn new(period: Duration) -> Self {
        Scheduler { period }
    }

    /// Lazy, restartable stream of scan results. Each pull reloads the full
    /// task table so edits made elsewhere are picked up, then scans against
    /// the current local time. The caller paces consumption (normally one
    /// pull per `period`).
    pub fn alerts<'a>(
        &self,
        store: &'a Store,
    ) -> impl Iterator<Item = AppResult<Vec<Alert>>> + 'a {
        std::iter::repeat_with(move || {
            let tasks = store.list_tasks()?;
            Ok(scan(&tasks, Local::now().naive_local()))
        })
    }
}
