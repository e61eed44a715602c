//! Task CRUD handlers.
//!
//! Every route in this module sits behind a capability middleware, so the
//! handlers themselves only deal with already-authorized identities. The
//! [`AuthUser`] extraction here reads the identity cached by the middleware
//! rather than re-verifying the session.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get, patch, post};

use crate::extract::{AuthUser, Json, Path, ValidateJson};
use crate::handler::request::{CreateTaskRequest, TaskPathParams, UpdateTaskRequest};
use crate::handler::response::{TaskListResponse, TaskResponse};
use crate::handler::{ErrorKind, Result};
use crate::middleware::{require_create, require_delete, require_edit, require_view};
use crate::service::tasks::Task;
use crate::service::{ServiceState, TaskStore};

/// Tracing target for task operations.
const TRACING_TARGET: &str = "taskboard_server::handler::tasks";

/// Returns a [`Router`] with all task routes, grouped by capability.
pub fn routes(state: ServiceState) -> Router<ServiceState> {
    let view_routes = Router::new()
        .route("/tasks", get(list_tasks))
        .route("/tasks/{taskId}", get(get_task))
        .route_layer(from_fn_with_state(state.clone(), require_view));

    let create_routes = Router::new()
        .route("/tasks", post(create_task))
        .route_layer(from_fn_with_state(state.clone(), require_create));

    let edit_routes = Router::new()
        .route("/tasks/{taskId}", patch(update_task))
        .route_layer(from_fn_with_state(state.clone(), require_edit));

    let delete_routes = Router::new()
        .route("/tasks/{taskId}", delete(delete_task))
        .route_layer(from_fn_with_state(state, require_delete));

    view_routes
        .merge(create_routes)
        .merge(edit_routes)
        .merge(delete_routes)
}

/// Lists the organization's tasks.
#[tracing::instrument(skip_all)]
async fn list_tasks(
    auth_user: AuthUser,
    State(task_store): State<TaskStore>,
) -> Result<Json<TaskListResponse>> {
    let tasks = task_store.list(auth_user.organization_id()).await;

    tracing::debug!(
        target: TRACING_TARGET,
        org_id = %auth_user.organization_id(),
        total = tasks.len(),
        "listed tasks",
    );

    Ok(Json(TaskListResponse::new(tasks)))
}

/// Fetches a single task.
#[tracing::instrument(skip_all)]
async fn get_task(
    auth_user: AuthUser,
    State(task_store): State<TaskStore>,
    Path(params): Path<TaskPathParams>,
) -> Result<Json<TaskResponse>> {
    let task = task_store
        .get(auth_user.organization_id(), params.task_id)
        .await
        .ok_or_else(|| ErrorKind::NotFound.with_resource("task"))?;

    Ok(Json(task.into()))
}

/// Creates a new task.
#[tracing::instrument(skip_all)]
async fn create_task(
    auth_user: AuthUser,
    State(task_store): State<TaskStore>,
    ValidateJson(request): ValidateJson<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>)> {
    tracing::info!(
        target: TRACING_TARGET,
        user_id = %auth_user.user_id(),
        org_id = %auth_user.organization_id(),
        title = %request.title,
        "creating new task",
    );

    let task = Task::new(
        auth_user.organization_id(),
        auth_user.user_id(),
        request.title,
        request.description,
    );
    let task = task_store.insert(task).await;

    Ok((StatusCode::CREATED, Json(task.into())))
}

/// Applies partial changes to an existing task.
#[tracing::instrument(skip_all)]
async fn update_task(
    auth_user: AuthUser,
    State(task_store): State<TaskStore>,
    Path(params): Path<TaskPathParams>,
    ValidateJson(request): ValidateJson<UpdateTaskRequest>,
) -> Result<Json<TaskResponse>> {
    tracing::info!(
        target: TRACING_TARGET,
        user_id = %auth_user.user_id(),
        org_id = %auth_user.organization_id(),
        task_id = %params.task_id,
        "updating task",
    );

    let task = task_store
        .update(auth_user.organization_id(), params.task_id, request.into())
        .await
        .ok_or_else(|| ErrorKind::NotFound.with_resource("task"))?;

    Ok(Json(task.into()))
}

/// Deletes a task.
#[tracing::instrument(skip_all)]
async fn delete_task(
    auth_user: AuthUser,
    State(task_store): State<TaskStore>,
    Path(params): Path<TaskPathParams>,
) -> Result<StatusCode> {
    tracing::info!(
        target: TRACING_TARGET,
        user_id = %auth_user.user_id(),
        org_id = %auth_user.organization_id(),
        task_id = %params.task_id,
        "deleting task",
    );

    task_store
        .remove(auth_user.organization_id(), params.task_id)
        .await
        .ok_or_else(|| ErrorKind::NotFound.with_resource("task"))?;

    Ok(StatusCode::NO_CONTENT)
}
