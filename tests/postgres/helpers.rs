//! Shared test helpers for `PostgreSQL` integration tests.

use mockable::DefaultClock;
use workflow_ai::task::{
    adapters::postgres::PostgresTaskRepository,
    domain::{Task, TaskDescription, TaskTitle},
};

/// Environment variable naming the test database.
pub const TEST_DATABASE_URL_ENV: &str = "WORKFLOW_AI_TEST_DATABASE_URL";

/// Connects to the test database, or returns `None` when it is not configured.
///
/// # Errors
///
/// Returns an error if the variable is set but the connection fails.
pub async fn repository() -> Result<Option<PostgresTaskRepository>, eyre::Report> {
    let Ok(url) = std::env::var(TEST_DATABASE_URL_ENV) else {
        return Ok(None);
    };
    Ok(Some(PostgresTaskRepository::connect(&url).await?))
}

/// Builds an unsaved task.
///
/// # Errors
///
/// Returns an error if `title` is blank.
pub fn new_task(title: &str, description: &str) -> Result<Task, eyre::Report> {
    Ok(Task::new(
        TaskTitle::new(title)?,
        TaskDescription::new(description)?,
        &DefaultClock,
    ))
}
