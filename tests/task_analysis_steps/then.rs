//! Then steps for task analysis BDD scenarios.

use super::world::{TaskAnalysisWorld, run_async};
use rstest_bdd_macros::then;
use workflow_ai::task::services::TaskLifecycleError;

fn last_result(
    world: &TaskAnalysisWorld,
) -> Result<&Result<workflow_ai::task::domain::Task, TaskLifecycleError>, eyre::Report> {
    world
        .last_analysis_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing analysis result"))
}

#[then(r#"the analysis is rejected with reason "{reason}""#)]
fn analysis_rejected(world: &TaskAnalysisWorld, reason: String) -> Result<(), eyre::Report> {
    match last_result(world)? {
        Err(TaskLifecycleError::PreconditionFailed(precondition))
            if precondition.reason() == reason =>
        {
            Ok(())
        }
        other => Err(eyre::eyre!(
            "expected precondition failure '{reason}', got {other:?}"
        )),
    }
}

#[then("the analysis fails")]
fn analysis_fails(world: &TaskAnalysisWorld) -> Result<(), eyre::Report> {
    let result = last_result(world)?;
    if !matches!(result, Err(TaskLifecycleError::AnalysisFailed(_))) {
        return Err(eyre::eyre!("expected AnalysisFailed error, got {result:?}"));
    }
    Ok(())
}

#[then(r#"the task summary is "{summary}""#)]
fn task_summary_is(world: &TaskAnalysisWorld, summary: String) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let stored = run_async(world.service()?.get_task(task_id))?;
    let actual = stored.ai_summary().map(|value| value.as_str().to_owned());
    if actual.as_deref() != Some(summary.as_str()) {
        return Err(eyre::eyre!("expected summary {summary:?}, found {actual:?}"));
    }
    Ok(())
}

#[then("the task has no summary")]
fn task_has_no_summary(world: &TaskAnalysisWorld) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let stored = run_async(world.service()?.get_task(task_id))?;
    if let Some(summary) = stored.ai_summary() {
        return Err(eyre::eyre!("expected no summary, found {summary}"));
    }
    Ok(())
}

#[then("the summarizer was called {count:usize} time")]
fn summarizer_call_count(world: &TaskAnalysisWorld, count: usize) -> Result<(), eyre::Report> {
    let summarizer = world
        .summarizer
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing summarizer"))?;
    let calls = summarizer.call_count();
    if calls != count {
        return Err(eyre::eyre!("expected {count} summarizer calls, found {calls}"));
    }
    Ok(())
}
