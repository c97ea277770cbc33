//! In-memory integration tests for task lifecycle operations.

use super::helpers::{Harness, harness};
use rstest::rstest;
use workflow_ai::task::{
    domain::AnalysisState,
    services::{TaskLifecycleError, UpdateTaskRequest},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_reflects_creation_order_after_deletions(
    harness: Harness,
) -> Result<(), eyre::Report> {
    let first = harness.create("First", "").await?;
    let second = harness.create("Second", "").await?;
    let third = harness.create("Third", "").await?;

    harness.service.delete_task(second.id()).await?;
    let fourth = harness.create("Fourth", "").await?;

    let ids: Vec<_> = harness
        .service
        .list_tasks()
        .await?
        .iter()
        .map(workflow_ai::task::domain::Task::id)
        .collect();
    eyre::ensure!(
        ids == vec![first.id(), third.id(), fourth.id()],
        "unexpected listing order: {ids:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_workflow_from_draft_to_deletion(harness: Harness) -> Result<(), eyre::Report> {
    let created = harness.create("Write report", "").await?;
    eyre::ensure!(created.analysis_state() == AnalysisState::Unanalyzed);

    let rejected = harness.service.analyze_task(created.id()).await;
    eyre::ensure!(
        matches!(rejected, Err(TaskLifecycleError::PreconditionFailed(_))),
        "expected precondition failure, got {rejected:?}"
    );

    harness
        .service
        .update_task(UpdateTaskRequest::new(created.id()).with_description("Quarterly figures"))
        .await?;
    let analyzed = harness.service.analyze_task(created.id()).await?;
    eyre::ensure!(analyzed.analysis_state() == AnalysisState::Analyzed);
    eyre::ensure!(harness.summarizer.inputs() == vec!["Quarterly figures".to_owned()]);

    let retitled = harness
        .service
        .update_task(UpdateTaskRequest::new(created.id()).with_title("Write annual report"))
        .await?;
    eyre::ensure!(
        retitled.ai_summary() == analyzed.ai_summary(),
        "editing the title must keep the summary"
    );

    harness.service.delete_task(created.id()).await?;
    let lookup = harness.service.get_task(created.id()).await;
    eyre::ensure!(
        matches!(lookup, Err(TaskLifecycleError::NotFound(id)) if id == created.id()),
        "expected deleted task to be gone, got {lookup:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_twice_reports_not_found(harness: Harness) -> Result<(), eyre::Report> {
    let created = harness.create("Temporary", "").await?;
    harness.service.delete_task(created.id()).await?;

    let second = harness.service.delete_task(created.id()).await;
    eyre::ensure!(
        matches!(second, Err(TaskLifecycleError::NotFound(_))),
        "expected NotFound, got {second:?}"
    );
    Ok(())
}
