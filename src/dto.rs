pub mod task;

pub use task::*;

use crate::routing_utils::{BasicErrorResponse, ExtraInfo, ValidationErrorSchema};
use utoipa::OpenApi;

/// Collects the schemas of every DTO so they can be merged into the API documentation
#[derive(OpenApi)]
#[openapi(components(schemas(
    task::CreateTaskRequest,
    task::NewTask,
    task::TaskSummary,
    task::TaskDetail,
    task::TaskList,
    task::CreatedTask,
    task::UpdatedTask,
    task::DeleteSuccess,
    BasicErrorResponse,
    ExtraInfo,
    ValidationErrorSchema,
)))]
pub struct OpenApiSchemas;
