//! Given steps for task analysis BDD scenarios.

use super::world::{TaskAnalysisWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use workflow_ai::task::{
    adapters::memory::ScriptedSummarizer, ports::SummarizerError, services::CreateTaskRequest,
};

#[given(r#"a summarizer that replies "{summary}""#)]
fn summarizer_replies(world: &mut TaskAnalysisWorld, summary: String) {
    world.use_summarizer(ScriptedSummarizer::replying(summary));
}

#[given("a summarizer that fails")]
fn summarizer_fails(world: &mut TaskAnalysisWorld) {
    world.use_summarizer(ScriptedSummarizer::failing(SummarizerError::Upstream(
        "upstream unavailable".to_owned(),
    )));
}

#[given(r#"a task titled "{title}" with an empty description"#)]
fn task_without_description(
    world: &mut TaskAnalysisWorld,
    title: String,
) -> Result<(), eyre::Report> {
    let created = run_async(world.service()?.create_task(CreateTaskRequest::new(title)))
        .wrap_err("create task without description")?;
    world.current_task = Some(created);
    Ok(())
}

#[given(r#"a task titled "{title}" with description "{description}""#)]
fn task_with_description(
    world: &mut TaskAnalysisWorld,
    title: String,
    description: String,
) -> Result<(), eyre::Report> {
    let request = CreateTaskRequest::new(title).with_description(description);
    let created = run_async(world.service()?.create_task(request))
        .wrap_err("create task with description")?;
    world.current_task = Some(created);
    Ok(())
}
