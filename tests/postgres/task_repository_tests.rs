//! Store contract tests against a live `PostgreSQL` database.

use std::sync::Arc;

use super::helpers::{new_task, repository};
use mockable::{Clock, DefaultClock};
use workflow_ai::task::{
    domain::{AiSummary, TaskChanges, TaskDescription, TaskId, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError},
};

#[tokio::test(flavor = "multi_thread")]
async fn created_task_round_trips() -> Result<(), eyre::Report> {
    let Some(repo) = repository().await? else {
        return Ok(());
    };
    let task = new_task("Write report", "Quarterly figures")?;
    repo.create(&task).await?;

    let found = repo
        .find_by_id(task.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task not stored"))?;
    eyre::ensure!(found.id() == task.id());
    eyre::ensure!(found.title() == task.title());
    eyre::ensure!(found.description() == task.description());
    eyre::ensure!(found.ai_summary().is_none());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_identifier_is_rejected() -> Result<(), eyre::Report> {
    let Some(repo) = repository().await? else {
        return Ok(());
    };
    let task = new_task("Once", "")?;
    repo.create(&task).await?;

    let second = repo.create(&task).await;
    eyre::ensure!(
        matches!(second, Err(TaskRepositoryError::DuplicateTask(id)) if id == task.id()),
        "expected DuplicateTask, got {second:?}"
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn list_keeps_insertion_order() -> Result<(), eyre::Report> {
    let Some(repo) = repository().await? else {
        return Ok(());
    };
    let first = new_task("First", "")?;
    let second = new_task("Second", "")?;
    repo.create(&first).await?;
    repo.create(&second).await?;

    let ours: Vec<TaskId> = repo
        .list()
        .await?
        .iter()
        .map(workflow_ai::task::domain::Task::id)
        .filter(|id| *id == first.id() || *id == second.id())
        .collect();
    eyre::ensure!(ours == vec![first.id(), second.id()], "order: {ours:?}");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn update_leaves_summary_untouched() -> Result<(), eyre::Report> {
    let Some(repo) = repository().await? else {
        return Ok(());
    };
    let task = new_task("Draft", "Details")?;
    repo.create(&task).await?;
    repo.set_summary(task.id(), AiSummary::new("Summary")?, DefaultClock.utc())
        .await?;

    let changes = TaskChanges::new(&DefaultClock)
        .with_title(TaskTitle::new("Final")?)
        .with_description(TaskDescription::new("New details")?);
    let updated = repo.update(task.id(), &changes).await?;

    eyre::ensure!(updated.title().as_str() == "Final");
    eyre::ensure!(updated.description().as_str() == "New details");
    eyre::ensure!(updated.ai_summary().map(AiSummary::as_str) == Some("Summary"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn summary_is_written_at_most_once() -> Result<(), eyre::Report> {
    let Some(repo) = repository().await? else {
        return Ok(());
    };
    let task = new_task("Analyze me", "Details")?;
    repo.create(&task).await?;
    let shared = Arc::new(repo);

    let mut handles = Vec::new();
    for index in 0..8 {
        let writer = Arc::clone(&shared);
        let id = task.id();
        handles.push(tokio::spawn(async move {
            let summary = AiSummary::new(format!("Summary {index}"))?;
            Ok::<_, eyre::Report>(writer.set_summary(id, summary, DefaultClock.utc()).await)
        }));
    }

    let mut committed = 0;
    for handle in handles {
        match handle.await?? {
            Ok(_) => committed += 1,
            Err(TaskRepositoryError::AlreadySummarized(_)) => {}
            Err(other) => return Err(other.into()),
        }
    }
    eyre::ensure!(committed == 1, "expected one commit, saw {committed}");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn mutations_on_missing_task_report_not_found() -> Result<(), eyre::Report> {
    let Some(repo) = repository().await? else {
        return Ok(());
    };
    let missing = TaskId::new();

    let summary = repo
        .set_summary(missing, AiSummary::new("Summary")?, DefaultClock.utc())
        .await;
    eyre::ensure!(matches!(summary, Err(TaskRepositoryError::NotFound(_))));

    let update = repo.update(missing, &TaskChanges::new(&DefaultClock)).await;
    eyre::ensure!(matches!(update, Err(TaskRepositoryError::NotFound(_))));

    let delete = repo.delete(missing).await;
    eyre::ensure!(matches!(delete, Err(TaskRepositoryError::NotFound(_))));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_returns_removed_task() -> Result<(), eyre::Report> {
    let Some(repo) = repository().await? else {
        return Ok(());
    };
    let task = new_task("Temporary", "")?;
    repo.create(&task).await?;

    let removed = repo.delete(task.id()).await?;
    eyre::ensure!(removed.id() == task.id());
    eyre::ensure!(repo.find_by_id(task.id()).await?.is_none());
    Ok(())
}
