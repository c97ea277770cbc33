//! HTTP binding for the task lifecycle service.
//!
//! Routes map one-to-one onto service operations; the only logic here is
//! request-shape validation, status-code translation and serialization.
//! [`cors_layer`] lets a browser frontend on another origin call the routes.

mod dto;
mod error;
mod handlers;

pub use dto::{CreateTaskBody, TaskResponse, UpdateTaskBody};
pub use error::{ApiError, ErrorBody};

use crate::task::{
    ports::{Summarizer, TaskRepository},
    services::TaskLifecycleService,
};
use axum::Router;
use axum::http::HeaderValue;
use axum::http::header::InvalidHeaderValue;
use axum::routing::{get, post};
use mockable::Clock;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Builds a CORS layer admitting credentialed browser requests from `origins`.
///
/// Preflight requests are answered by the layer itself, echoing the
/// requested method and headers.
///
/// # Errors
///
/// Returns [`InvalidHeaderValue`] when an origin is not a valid header value.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer, InvalidHeaderValue> {
    let allowed = origins
        .iter()
        .map(|origin| HeaderValue::from_str(origin.trim()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

/// Builds the router for a shared lifecycle service.
pub fn router<R, S, C>(service: Arc<TaskLifecycleService<R, S, C>>) -> Router
where
    R: TaskRepository + 'static,
    S: Summarizer + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route(
            "/tasks",
            get(handlers::list_tasks::<R, S, C>).post(handlers::create_task::<R, S, C>),
        )
        .route(
            "/tasks/",
            get(handlers::list_tasks::<R, S, C>).post(handlers::create_task::<R, S, C>),
        )
        .route(
            "/tasks/{task_id}",
            get(handlers::get_task::<R, S, C>)
                .patch(handlers::update_task::<R, S, C>)
                .delete(handlers::delete_task::<R, S, C>),
        )
        .route(
            "/tasks/{task_id}/analyze",
            post(handlers::analyze_task::<R, S, C>),
        )
        .with_state(service)
}
