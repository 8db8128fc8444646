use crate::domain;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Request body for creating a task. The task's fields are nested under a "task" key.
/// Absent or null fields deserialize to their empty values and are rejected by validation.
#[derive(Deserialize, ToSchema)]
#[cfg_attr(test, derive(Serialize))]
pub struct CreateTaskRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub task: NewTask,
}

/// DTO for creating a new task via the API
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[cfg_attr(test, derive(Serialize))]
pub struct NewTask {
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(length(min = 1), custom = "not_blank")]
    #[schema(example = "New Task")]
    pub content: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn not_blank(content: &str) -> Result<(), ValidationError> {
    if content.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }

    Ok(())
}

impl From<NewTask> for domain::task::NewTask {
    fn from(value: NewTask) -> Self {
        domain::task::NewTask {
            content: value.content,
        }
    }
}

/// A task as it appears in listings and on creation
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, Debug))]
pub struct TaskSummary {
    #[schema(example = 10)]
    pub id: i32,
    #[schema(example = "Something to do")]
    pub content: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<domain::task::Task> for TaskSummary {
    fn from(value: domain::task::Task) -> Self {
        TaskSummary {
            id: value.id,
            content: value.content,
            completed: value.completed,
            created_at: value.created_at,
        }
    }
}

/// A task as it appears after being modified, including when it was last touched
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, Debug))]
pub struct TaskDetail {
    #[schema(example = 10)]
    pub id: i32,
    #[schema(example = "Something to do")]
    pub content: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<domain::task::Task> for TaskDetail {
    fn from(value: domain::task::Task) -> Self {
        TaskDetail {
            id: value.id,
            content: value.content,
            completed: value.completed,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// DTO for a list of tasks
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, Debug))]
pub struct TaskList {
    pub tasks: Vec<TaskSummary>,
}

impl From<Vec<domain::task::Task>> for TaskList {
    fn from(value: Vec<domain::task::Task>) -> Self {
        TaskList {
            tasks: value.into_iter().map(TaskSummary::from).collect(),
        }
    }
}

/// DTO for a newly created task
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, Debug))]
pub struct CreatedTask {
    pub task: TaskSummary,
}

/// DTO for a task whose state was just changed
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, Debug))]
pub struct UpdatedTask {
    pub task: TaskDetail,
}

/// Acknowledges a successful deletion
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, Debug))]
pub struct DeleteSuccess {
    #[schema(example = true)]
    pub success: bool,
}
