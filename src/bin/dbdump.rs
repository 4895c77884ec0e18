//! Diagnostic dump of both tables to stdout, one JSON object per row.
//! Read-only apart from the idempotent schema bootstrap that every open
//! performs.

use anyhow::Context;

use schedule_reminder::config::Config;
use schedule_reminder::store::Store;

fn main() -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    let store = Store::open(&config.storage.path).with_context(|| {
        format!(
            "Cannot open schedule store at {}",
            config.storage.path.display()
        )
    })?;

    println!("Users:");
    let users = store.list_users()?;
    if users.is_empty() {
        println!("No rows found in users.");
    }
    for user in &users {
        println!("{}", serde_json::to_string(user)?);
    }

    println!();
    println!("Tasks:");
    let tasks = store.list_tasks()?;
    if tasks.is_empty() {
        println!("No rows found in tasks.");
    }
    for task in &tasks {
        println!("{}", serde_json::to_string(task)?);
    }

    Ok(())
}
