use crate::api::session::session_token;
use crate::domain::session::driving_ports::SessionPort;
use crate::domain::task::driving_ports::TaskPort;
use crate::external_connections::ExternalConnectivity;
use crate::routing_utils::{
    Json, JsonErrorResponse, Path, SessionErrorResponse, TaskErrorResponse,
    ValidationErrorResponse,
};
use crate::{domain, dto, persistence, AppState, SharedData};
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::ErrorResponse;
use axum::routing::{delete, get, post, put};
use axum::Router;
use std::sync::Arc;
use tracing::info;
use utoipa::OpenApi;
use validator::Validate;

#[derive(OpenApi)]
#[openapi(paths(
    list_all_tasks,
    list_my_tasks,
    create_task,
    delete_task,
    mark_task_complete,
    mark_task_active
))]
/// Defines the OpenAPI documentation for the task API
pub struct TaskApi;

/// Adds routes under "/tasks" and the current user's task listing to the application router
pub fn task_routes() -> Router<Arc<SharedData>> {
    Router::new()
        .route(
            "/tasks",
            get(|State(app_state): AppState| async move {
                let mut ext_cxn = app_state.ext_cxn.clone();
                let task_service = domain::task::TaskService {};

                list_all_tasks(&mut ext_cxn, &task_service).await
            }),
        )
        .route(
            "/tasks",
            post(
                |State(app_state): AppState,
                 headers: HeaderMap,
                 request: Result<Json<dto::CreateTaskRequest>, JsonErrorResponse>| async move {
                    let token = session_token(&headers, &app_state.cookie_key);
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let session_service = domain::session::SessionService;
                    let task_service = domain::task::TaskService {};

                    create_task(
                        token.as_deref(),
                        request.map(|Json(body)| body),
                        &mut ext_cxn,
                        &session_service,
                        &task_service,
                    )
                    .await
                },
            ),
        )
        .route(
            "/my_tasks",
            get(|State(app_state): AppState, headers: HeaderMap| async move {
                let token = session_token(&headers, &app_state.cookie_key);
                let mut ext_cxn = app_state.ext_cxn.clone();
                let session_service = domain::session::SessionService;
                let task_service = domain::task::TaskService {};

                list_my_tasks(token.as_deref(), &mut ext_cxn, &session_service, &task_service)
                    .await
            }),
        )
        .route(
            "/tasks/:task_id",
            delete(|State(app_state): AppState, Path(task_id): Path<i32>| async move {
                let mut ext_cxn = app_state.ext_cxn.clone();
                let task_service = domain::task::TaskService {};

                delete_task(task_id, &mut ext_cxn, &task_service).await
            }),
        )
        .route(
            "/tasks/:task_id/mark_complete",
            put(|State(app_state): AppState, Path(task_id): Path<i32>| async move {
                let mut ext_cxn = app_state.ext_cxn.clone();
                let task_service = domain::task::TaskService {};

                mark_task_complete(task_id, &mut ext_cxn, &task_service).await
            }),
        )
        .route(
            "/tasks/:task_id/mark_active",
            put(|State(app_state): AppState, Path(task_id): Path<i32>| async move {
                let mut ext_cxn = app_state.ext_cxn.clone();
                let task_service = domain::task::TaskService {};

                mark_task_active(task_id, &mut ext_cxn, &task_service).await
            }),
        )
}

#[utoipa::path(
    get,
    path = "/tasks",
    tag = "Tasks",
    responses(
        (status = 200, description = "Every task in the system, oldest first", body = dto::TaskList),
        (status = 500, description = "Tasks could not be read", body = crate::routing_utils::BasicErrorResponse),
    ),
)]
/// Lists every task regardless of owner
async fn list_all_tasks(
    ext_cxn: &mut impl ExternalConnectivity,
    task_service: &impl TaskPort,
) -> Result<Json<dto::TaskList>, ErrorResponse> {
    info!("Listing all tasks");
    let task_read = persistence::db_task_driven_ports::DbTaskReader;

    let tasks = task_service
        .all_tasks(&mut *ext_cxn, &task_read)
        .await
        .map_err(TaskErrorResponse::from)?;

    Ok(Json(dto::TaskList::from(tasks)))
}

#[utoipa::path(
    get,
    path = "/my_tasks",
    tag = "Tasks",
    responses(
        (status = 200, description = "Tasks owned by the session's user, oldest first", body = dto::TaskList),
        (status = 401, description = "The session cookie was missing or invalid", body = crate::routing_utils::BasicErrorResponse),
        (status = 500, description = "Tasks could not be read", body = crate::routing_utils::BasicErrorResponse),
    ),
)]
/// Lists the tasks belonging to the user identified by the session cookie
async fn list_my_tasks(
    session_token: Option<&str>,
    ext_cxn: &mut impl ExternalConnectivity,
    session_service: &impl SessionPort,
    task_service: &impl TaskPort,
) -> Result<Json<dto::TaskList>, ErrorResponse> {
    let session_read = persistence::db_session_driven_ports::DbSessionReader;
    let current_user = session_service
        .current_user(session_token, &mut *ext_cxn, &session_read)
        .await
        .map_err(SessionErrorResponse::from)?;

    info!("Listing tasks for user {}", current_user.user_id);
    let task_read = persistence::db_task_driven_ports::DbTaskReader;
    let tasks = task_service
        .tasks_for_user(&current_user, &mut *ext_cxn, &task_read)
        .await
        .map_err(TaskErrorResponse::from)?;

    Ok(Json(dto::TaskList::from(tasks)))
}

#[utoipa::path(
    post,
    path = "/tasks",
    tag = "Tasks",
    request_body = dto::CreateTaskRequest,
    responses(
        (status = 201, description = "The task was created for the session's user", body = dto::CreatedTask),
        (status = 400, description = "The body was malformed, or the task content was missing or blank", body = crate::routing_utils::BasicErrorResponse),
        (status = 401, description = "The session cookie was missing or invalid", body = crate::routing_utils::BasicErrorResponse),
        (status = 500, description = "The task could not be saved", body = crate::routing_utils::BasicErrorResponse),
    ),
)]
/// Creates a task owned by the user identified by the session cookie. The session is checked
/// before anything in the body is looked at.
async fn create_task(
    session_token: Option<&str>,
    request: Result<dto::CreateTaskRequest, JsonErrorResponse>,
    ext_cxn: &mut impl ExternalConnectivity,
    session_service: &impl SessionPort,
    task_service: &impl TaskPort,
) -> Result<(StatusCode, Json<dto::CreatedTask>), ErrorResponse> {
    let session_read = persistence::db_session_driven_ports::DbSessionReader;
    let current_user = session_service
        .current_user(session_token, &mut *ext_cxn, &session_read)
        .await
        .map_err(SessionErrorResponse::from)?;

    info!("Creating a task for user {}", current_user.user_id);
    let request = request?;
    request
        .task
        .validate()
        .map_err(ValidationErrorResponse::from)?;

    let new_task = domain::task::NewTask::from(request.task);
    let task_write = persistence::db_task_driven_ports::DbTaskWriter;
    let created_task = task_service
        .create_task(&current_user, &new_task, &mut *ext_cxn, &task_write)
        .await
        .map_err(TaskErrorResponse::from)?;

    Ok((
        StatusCode::CREATED,
        Json(dto::CreatedTask {
            task: created_task.into(),
        }),
    ))
}

#[utoipa::path(
    delete,
    path = "/tasks/{task_id}",
    tag = "Tasks",
    params(("task_id" = i32, Path, description = "ID of the task to delete")),
    responses(
        (status = 200, description = "The task was deleted", body = dto::DeleteSuccess),
        (status = 404, description = "No task has the given ID", body = crate::routing_utils::BasicErrorResponse),
        (status = 500, description = "The task could not be deleted", body = crate::routing_utils::BasicErrorResponse),
    ),
)]
/// Permanently deletes a task
async fn delete_task(
    task_id: i32,
    ext_cxn: &mut impl ExternalConnectivity,
    task_service: &impl TaskPort,
) -> Result<Json<dto::DeleteSuccess>, ErrorResponse> {
    info!("Deleting task {task_id}");
    let task_write = persistence::db_task_driven_ports::DbTaskWriter;

    task_service
        .delete_task(task_id, &mut *ext_cxn, &task_write)
        .await
        .map_err(TaskErrorResponse::from)?;

    Ok(Json(dto::DeleteSuccess { success: true }))
}

#[utoipa::path(
    put,
    path = "/tasks/{task_id}/mark_complete",
    tag = "Tasks",
    params(("task_id" = i32, Path, description = "ID of the task to complete")),
    responses(
        (status = 200, description = "The task is now completed", body = dto::UpdatedTask),
        (status = 404, description = "No task has the given ID", body = crate::routing_utils::BasicErrorResponse),
        (status = 500, description = "The task could not be updated", body = crate::routing_utils::BasicErrorResponse),
    ),
)]
/// Marks a task as completed
async fn mark_task_complete(
    task_id: i32,
    ext_cxn: &mut impl ExternalConnectivity,
    task_service: &impl TaskPort,
) -> Result<Json<dto::UpdatedTask>, ErrorResponse> {
    info!("Marking task {task_id} complete");
    let task_write = persistence::db_task_driven_ports::DbTaskWriter;

    let updated_task = task_service
        .mark_complete(task_id, &mut *ext_cxn, &task_write)
        .await
        .map_err(TaskErrorResponse::from)?;

    Ok(Json(dto::UpdatedTask {
        task: updated_task.into(),
    }))
}

#[utoipa::path(
    put,
    path = "/tasks/{task_id}/mark_active",
    tag = "Tasks",
    params(("task_id" = i32, Path, description = "ID of the task to reactivate")),
    responses(
        (status = 200, description = "The task is now active", body = dto::UpdatedTask),
        (status = 404, description = "No task has the given ID", body = crate::routing_utils::BasicErrorResponse),
        (status = 500, description = "The task could not be updated", body = crate::routing_utils::BasicErrorResponse),
    ),
)]
/// Moves a task back to the active state
async fn mark_task_active(
    task_id: i32,
    ext_cxn: &mut impl ExternalConnectivity,
    task_service: &impl TaskPort,
) -> Result<Json<dto::UpdatedTask>, ErrorResponse> {
    info!("Marking task {task_id} active");
    let task_write = persistence::db_task_driven_ports::DbTaskWriter;

    let updated_task = task_service
        .mark_active(task_id, &mut *ext_cxn, &task_write)
        .await
        .map_err(TaskErrorResponse::from)?;

    Ok(Json(dto::UpdatedTask {
        task: updated_task.into(),
    }))
}
