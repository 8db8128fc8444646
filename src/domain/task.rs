use crate::domain::session::SessionUser;
use crate::domain::task::driven_ports::{TaskReader, TaskWriter};
use crate::domain::task::driving_ports::TaskError;
use crate::external_connections::ExternalConnectivity;
use anyhow::Context;
use chrono::{DateTime, Utc};
use derive_more::Display;
use tracing::info;

#[derive(PartialEq, Eq, Debug)]
#[cfg_attr(test, derive(Clone))]
pub struct Task {
    pub id: i32,
    pub owner_user_id: i32,
    pub content: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn state(&self) -> TaskState {
        TaskState::from_completed(self.completed)
    }
}

/// Tasks start out active and can be moved back and forth between the two states any number of times
#[derive(PartialEq, Eq, Debug, Clone, Copy, Display)]
pub enum TaskState {
    #[display("active")]
    Active,
    #[display("completed")]
    Completed,
}

impl TaskState {
    pub fn from_completed(completed: bool) -> TaskState {
        if completed {
            TaskState::Completed
        } else {
            TaskState::Active
        }
    }

    pub fn is_completed(self) -> bool {
        self == TaskState::Completed
    }
}

#[derive(Debug)]
#[cfg_attr(test, derive(Clone))]
pub struct NewTask {
    pub content: String,
}

pub mod driven_ports {
    use super::*;

    pub trait TaskReader {
        /// Every task in the system, oldest first
        async fn all_tasks(
            &self,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Vec<Task>, anyhow::Error>;
        /// Every task owned by [user_id], oldest first
        async fn tasks_for_user(
            &self,
            user_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Vec<Task>, anyhow::Error>;
    }

    pub trait TaskWriter {
        async fn create_task_for_user(
            &self,
            user_id: i32,
            new_task: &NewTask,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Task, anyhow::Error>;

        /// Removes a task, returning false if there was no task with that ID
        async fn delete_task(
            &self,
            task_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<bool, anyhow::Error>;

        /// Moves a task into [state] and bumps its update timestamp, returning the updated task
        /// or None if there was no task with that ID
        async fn set_task_state(
            &self,
            task_id: i32,
            state: TaskState,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Option<Task>, anyhow::Error>;
    }
}

pub mod driving_ports {
    use super::*;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum TaskError {
        #[error("task {0} does not exist")]
        TaskDoesNotExist(i32),
        #[error(transparent)]
        PortError(#[from] anyhow::Error),
    }


    pub trait TaskPort {
        async fn all_tasks(
            &self,
            ext_cxn: &mut impl ExternalConnectivity,
            task_read: &impl driven_ports::TaskReader,
        ) -> Result<Vec<Task>, TaskError>;
        async fn tasks_for_user(
            &self,
            current_user: &SessionUser,
            ext_cxn: &mut impl ExternalConnectivity,
            task_read: &impl driven_ports::TaskReader,
        ) -> Result<Vec<Task>, TaskError>;
        async fn create_task(
            &self,
            current_user: &SessionUser,
            task: &NewTask,
            ext_cxn: &mut impl ExternalConnectivity,
            task_write: &impl driven_ports::TaskWriter,
        ) -> Result<Task, TaskError>;
        async fn delete_task(
            &self,
            task_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
            task_write: &impl driven_ports::TaskWriter,
        ) -> Result<(), TaskError>;
        async fn mark_complete(
            &self,
            task_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
            task_write: &impl driven_ports::TaskWriter,
        ) -> Result<Task, TaskError>;
        async fn mark_active(
            &self,
            task_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
            task_write: &impl driven_ports::TaskWriter,
        ) -> Result<Task, TaskError>;
    }
}

pub struct TaskService {}

impl TaskService {
    async fn transition_task(
        &self,
        task_id: i32,
        state: TaskState,
        ext_cxn: &mut impl ExternalConnectivity,
        task_write: &impl TaskWriter,
    ) -> Result<Task, TaskError> {
        let updated_task = task_write
            .set_task_state(task_id, state, &mut *ext_cxn)
            .await
            .with_context(|| format!("marking task {task_id} {state}"))?;

        match updated_task {
            Some(task) => {
                info!("Task {task_id} is now {}", task.state());
                Ok(task)
            }
            None => Err(TaskError::TaskDoesNotExist(task_id)),
        }
    }
}

impl driving_ports::TaskPort for TaskService {
    async fn all_tasks(
        &self,
        ext_cxn: &mut impl ExternalConnectivity,
        task_read: &impl TaskReader,
    ) -> Result<Vec<Task>, TaskError> {
        let tasks = task_read
            .all_tasks(&mut *ext_cxn)
            .await
            .context("listing all tasks")?;

        Ok(tasks)
    }

    async fn tasks_for_user(
        &self,
        current_user: &SessionUser,
        ext_cxn: &mut impl ExternalConnectivity,
        task_read: &impl TaskReader,
    ) -> Result<Vec<Task>, TaskError> {
        let tasks = task_read
            .tasks_for_user(current_user.user_id, &mut *ext_cxn)
            .await
            .context("listing tasks for the current user")?;

        Ok(tasks)
    }

    async fn create_task(
        &self,
        current_user: &SessionUser,
        task: &NewTask,
        ext_cxn: &mut impl ExternalConnectivity,
        task_write: &impl TaskWriter,
    ) -> Result<Task, TaskError> {
        let created_task = task_write
            .create_task_for_user(current_user.user_id, task, &mut *ext_cxn)
            .await
            .context("creating a task")?;

        Ok(created_task)
    }

    async fn delete_task(
        &self,
        task_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
        task_write: &impl TaskWriter,
    ) -> Result<(), TaskError> {
        let task_removed = task_write
            .delete_task(task_id, &mut *ext_cxn)
            .await
            .context("deleting a task")?;

        if task_removed {
            Ok(())
        } else {
            Err(TaskError::TaskDoesNotExist(task_id))
        }
    }

    async fn mark_complete(
        &self,
        task_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
        task_write: &impl TaskWriter,
    ) -> Result<Task, TaskError> {
        self.transition_task(task_id, TaskState::Completed, ext_cxn, task_write)
            .await
    }

    async fn mark_active(
        &self,
        task_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
        task_write: &impl TaskWriter,
    ) -> Result<Task, TaskError> {
        self.transition_task(task_id, TaskState::Active, ext_cxn, task_write)
            .await
    }
}
