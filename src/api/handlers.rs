//! Request handlers for the task routes.

use super::{
    dto::{CreateTaskBody, TaskResponse, UpdateTaskBody},
    error::ApiError,
};
use crate::task::{
    domain::TaskId,
    ports::{Summarizer, TaskRepository},
    services::{CreateTaskRequest, TaskLifecycleService, UpdateTaskRequest},
};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use mockable::Clock;
use serde_json::{Value, json};
use std::sync::Arc;

type SharedService<R, S, C> = Arc<TaskLifecycleService<R, S, C>>;
type ApiResult<T> = Result<T, ApiError>;

pub(super) async fn root() -> Json<Value> {
    Json(json!({"message": "workflow-ai task service"}))
}

pub(super) async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

fn parse_task_id(raw: &str) -> ApiResult<TaskId> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid task id: {raw}")))
}

fn body_or_bad_request<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

pub(super) async fn list_tasks<R, S, C>(
    State(service): State<SharedService<R, S, C>>,
) -> ApiResult<Json<Vec<TaskResponse>>>
where
    R: TaskRepository + 'static,
    S: Summarizer + 'static,
    C: Clock + Send + Sync + 'static,
{
    let tasks = service.list_tasks().await?;
    Ok(Json(tasks.iter().map(TaskResponse::from).collect()))
}

pub(super) async fn create_task<R, S, C>(
    State(service): State<SharedService<R, S, C>>,
    payload: Result<Json<CreateTaskBody>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)>
where
    R: TaskRepository + 'static,
    S: Summarizer + 'static,
    C: Clock + Send + Sync + 'static,
{
    let body = body_or_bad_request(payload)?;
    let mut request = CreateTaskRequest::new(body.title);
    if let Some(description) = body.description {
        request = request.with_description(description);
    }
    let task = service.create_task(request).await?;
    Ok((StatusCode::CREATED, Json(TaskResponse::from(&task))))
}

pub(super) async fn get_task<R, S, C>(
    State(service): State<SharedService<R, S, C>>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<TaskResponse>>
where
    R: TaskRepository + 'static,
    S: Summarizer + 'static,
    C: Clock + Send + Sync + 'static,
{
    let task = service.get_task(parse_task_id(&raw_id)?).await?;
    Ok(Json(TaskResponse::from(&task)))
}

pub(super) async fn update_task<R, S, C>(
    State(service): State<SharedService<R, S, C>>,
    Path(raw_id): Path<String>,
    payload: Result<Json<UpdateTaskBody>, JsonRejection>,
) -> ApiResult<Json<TaskResponse>>
where
    R: TaskRepository + 'static,
    S: Summarizer + 'static,
    C: Clock + Send + Sync + 'static,
{
    let task_id = parse_task_id(&raw_id)?;
    let body = body_or_bad_request(payload)?;

    let mut request = UpdateTaskRequest::new(task_id);
    if let Some(title) = body.title {
        request = request.with_title(title);
    }
    if let Some(description) = body.description {
        request = request.with_description(description);
    }
    let task = service.update_task(request).await?;
    Ok(Json(TaskResponse::from(&task)))
}

pub(super) async fn delete_task<R, S, C>(
    State(service): State<SharedService<R, S, C>>,
    Path(raw_id): Path<String>,
) -> ApiResult<StatusCode>
where
    R: TaskRepository + 'static,
    S: Summarizer + 'static,
    C: Clock + Send + Sync + 'static,
{
    service.delete_task(parse_task_id(&raw_id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(super) async fn analyze_task<R, S, C>(
    State(service): State<SharedService<R, S, C>>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<TaskResponse>>
where
    R: TaskRepository + 'static,
    S: Summarizer + 'static,
    C: Clock + Send + Sync + 'static,
{
    let task = service.analyze_task(parse_task_id(&raw_id)?).await?;
    Ok(Json(TaskResponse::from(&task)))
}
