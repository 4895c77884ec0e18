use std::thread;
use std::time::Duration;

use anyhow::Context;

use schedule_reminder::config::Config;
use schedule_reminder::scheduler::{Scheduler, Urgency};
use schedule_reminder::store::Store;

/// Headless reminder loop: open the store (fatal if unavailable), then scan
/// the task table every configured interval and log qualifying alerts.
fn main() -> anyhow::Result<()> {
    // Initialize basic tracing subscriber
    tracing_subscriber::fmt::init();

    let config = Config::load().context("Failed to load configuration")?;
    let store = Store::open(&config.storage.path).with_context(|| {
        format!(
            "Cannot open schedule store at {}",
            config.storage.path.display()
        )
    })?;

    let scheduler = Scheduler::new(Duration::from_secs(config.scheduler.interval_secs));
    tracing::info!(
        path = %config.storage.path.display(),
        interval_secs = config.scheduler.interval_secs,
        "reminder scan running"
    );

    for result in scheduler.alerts(&store) {
        match result {
            Ok(alerts) => {
                for alert in alerts {
                    match alert.urgency {
                        Urgency::Overdue => {
                            tracing::warn!(task = %alert.task_name, "task is OVERDUE")
                        }
                        Urgency::DueNow => {
                            tracing::warn!(task = %alert.task_name, "task is due now")
                        }
                        Urgency::AlmostDue { minutes_left } => {
                            tracing::info!(
                                task = %alert.task_name,
                                minutes_left,
                                "task is almost due"
                            )
                        }
                    }
                }
            }
            Err(e) => tracing::error!("reminder scan failed: {e}"),
        }
        thread::sleep(scheduler.period);
    }

    Ok(())
}
