//! When steps for task analysis BDD scenarios.

use super::world::{TaskAnalysisWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use workflow_ai::task::services::UpdateTaskRequest;

#[when("the task is analyzed")]
fn task_is_analyzed(world: &mut TaskAnalysisWorld) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let result = run_async(world.service()?.analyze_task(task_id));
    if let Ok(ref analyzed) = result {
        world.current_task = Some(analyzed.clone());
    }
    world.last_analysis_result = Some(result);
    Ok(())
}

#[when(r#"the task description is updated to "{description}""#)]
fn description_is_updated(
    world: &mut TaskAnalysisWorld,
    description: String,
) -> Result<(), eyre::Report> {
    let request = UpdateTaskRequest::new(world.task()?.id()).with_description(description);
    let updated = run_async(world.service()?.update_task(request))
        .wrap_err("update task description")?;
    world.current_task = Some(updated);
    Ok(())
}
