use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_macros::{FromRequest, FromRequestParts};

use serde::Serialize;
use tracing::{debug, error};
use utoipa::openapi::{RefOr, Schema};
use utoipa::{openapi, ToSchema};

use validator::ValidationErrors;

use crate::domain::session::driving_ports::SessionError;
use crate::domain::task::driving_ports::TaskError;

/// Contains diagnostic information about an API failure
#[derive(Serialize, Debug, ToSchema)]
#[schema(example = json!({
    "error_code": "not_found",
    "error_description": "The requested entity could not be found.",
    "extra_info": null
}))]
pub struct BasicErrorResponse {
    pub error_code: String,
    pub error_description: String,
    pub extra_info: Option<ExtraInfo>,
}

impl BasicErrorResponse {
    fn without_extra_info(error_code: &str, error_description: &str) -> Self {
        BasicErrorResponse {
            error_code: error_code.to_owned(),
            error_description: error_description.to_owned(),
            extra_info: None,
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(untagged)]
pub enum ExtraInfo {
    ValidationIssues(ValidationErrorSchema),
    Message(String),
}

/// Stand-in OpenAPI schema for [ValidationErrors] which just provides an empty object
#[derive(Serialize, Debug)]
#[serde(transparent)]
pub struct ValidationErrorSchema(ValidationErrors);

impl<'schem> ToSchema<'schem> for ValidationErrorSchema {
    fn schema() -> (&'schem str, RefOr<Schema>) {
        (
            "ValidationErrorSchema",
            openapi::ObjectBuilder::new().into(),
        )
    }
}

/// Response type for requests referring to an entity that doesn't exist
pub struct NotFoundErrorResponse;

impl IntoResponse for NotFoundErrorResponse {
    fn into_response(self) -> Response {
        (
            StatusCode::NOT_FOUND,
            Json(BasicErrorResponse::without_extra_info(
                "not_found",
                "The requested entity could not be found.",
            )),
        )
            .into_response()
    }
}

impl From<PathRejection> for NotFoundErrorResponse {
    fn from(value: PathRejection) -> Self {
        debug!("Path did not identify a resource: {}", value.body_text());
        NotFoundErrorResponse
    }
}

/// Response type for requests which need a valid session but didn't have one
pub struct UnauthorizedErrorResponse;

impl IntoResponse for UnauthorizedErrorResponse {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(BasicErrorResponse::without_extra_info(
                "unauthorized",
                "A valid session is required to access this resource.",
            )),
        )
            .into_response()
    }
}

/// Response type for unexpected failures. The cause is logged but not exposed to the caller.
pub struct GenericErrorResponse(pub anyhow::Error);

impl IntoResponse for GenericErrorResponse {
    fn into_response(self) -> Response {
        error!("Request failed unexpectedly: {:#}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(BasicErrorResponse::without_extra_info(
                "internal_error",
                "Could not access data to complete your request",
            )),
        )
            .into_response()
    }
}

/// Response type that maps task service failures onto HTTP responses
pub struct TaskErrorResponse(pub TaskError);

impl IntoResponse for TaskErrorResponse {
    fn into_response(self) -> Response {
        match self.0 {
            TaskError::TaskDoesNotExist(_) => NotFoundErrorResponse.into_response(),
            TaskError::PortError(cause) => GenericErrorResponse(cause).into_response(),
        }
    }
}

impl From<TaskError> for TaskErrorResponse {
    fn from(value: TaskError) -> Self {
        Self(value)
    }
}

/// Response type that maps session resolution failures onto HTTP responses
pub struct SessionErrorResponse(pub SessionError);

impl IntoResponse for SessionErrorResponse {
    fn into_response(self) -> Response {
        match self.0 {
            SessionError::NoSession | SessionError::UnknownSession => {
                UnauthorizedErrorResponse.into_response()
            }
            SessionError::PortError(cause) => GenericErrorResponse(cause).into_response(),
        }
    }
}

impl From<SessionError> for SessionErrorResponse {
    fn from(value: SessionError) -> Self {
        Self(value)
    }
}

/// Response type that wraps validation errors and turns them into [BasicErrorResponse]s
pub struct ValidationErrorResponse(ValidationErrors);

impl IntoResponse for ValidationErrorResponse {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(BasicErrorResponse {
                error_code: "invalid_input".into(),
                error_description: "Submitted data was invalid.".to_owned(),
                extra_info: Some(ExtraInfo::ValidationIssues(ValidationErrorSchema(self.0))),
            }),
        )
            .into_response()
    }
}

impl From<ValidationErrors> for ValidationErrorResponse {
    fn from(value: ValidationErrors) -> Self {
        Self(value)
    }
}

/// Wrapper for [axum::Json] which customizes the error response to use our
/// data structure for API errors
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(JsonErrorResponse))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Wrapper for [axum::extract::Path]. A path segment that can't be parsed into the expected
/// type can't name an existing resource, so it's answered the same way as a missing one.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(NotFoundErrorResponse))]
pub struct Path<T>(pub T);

/// Response type representing JSON parse errors
pub struct JsonErrorResponse {
    parse_problem: String,
}

impl From<JsonRejection> for JsonErrorResponse {
    fn from(value: JsonRejection) -> Self {
        JsonErrorResponse {
            parse_problem: value.body_text(),
        }
    }
}

impl IntoResponse for JsonErrorResponse {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            axum::Json(BasicErrorResponse {
                error_code: "invalid_json".into(),
                error_description:
                    "The passed request body contained malformed or unreadable JSON.".into(),
                extra_info: Some(ExtraInfo::Message(self.parse_problem)),
            }),
        )
            .into_response()
    }
}
