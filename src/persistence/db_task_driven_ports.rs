use crate::domain;
use crate::domain::task::{NewTask, Task, TaskState};
use crate::external_connections::{ConnectionHandle, ExternalConnectivity};
use anyhow::{Context, Error};
use chrono::{DateTime, Utc};
use sqlx::{query, query_as, FromRow};

pub struct DbTaskReader;

#[derive(FromRow)]
struct TaskRow {
    id: i32,
    user_id: i32,
    content: String,
    completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TaskRow> for Task {
    fn from(value: TaskRow) -> Self {
        Task {
            id: value.id,
            owner_user_id: value.user_id,
            content: value.content,
            completed: value.completed,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl domain::task::driven_ports::TaskReader for DbTaskReader {
    async fn all_tasks(&self, ext_cxn: &mut impl ExternalConnectivity) -> Result<Vec<Task>, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let tasks: Vec<Task> = query_as::<_, TaskRow>("SELECT t.* FROM task t ORDER BY t.id")
            .fetch_all(cxn.borrow_connection())
            .await
            .context("trying to fetch every task")?
            .into_iter()
            .map(Task::from)
            .collect();

        Ok(tasks)
    }

    async fn tasks_for_user(
        &self,
        user_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Vec<Task>, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let tasks: Vec<Task> =
            query_as::<_, TaskRow>("SELECT t.* FROM task t WHERE t.user_id = $1 ORDER BY t.id")
                .bind(user_id)
                .fetch_all(cxn.borrow_connection())
                .await
                .context("trying to fetch tasks for a user")?
                .into_iter()
                .map(Task::from)
                .collect();

        Ok(tasks)
    }
}

pub struct DbTaskWriter;

impl domain::task::driven_ports::TaskWriter for DbTaskWriter {
    async fn create_task_for_user(
        &self,
        user_id: i32,
        new_task: &NewTask,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Task, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let created = query_as::<_, TaskRow>(
            "INSERT INTO task(user_id, content) VALUES ($1, $2) RETURNING task.*",
        )
        .bind(user_id)
        .bind(&new_task.content)
        .fetch_one(cxn.borrow_connection())
        .await
        .context("trying to insert a new task into the database")?;

        Ok(created.into())
    }

    async fn delete_task(
        &self,
        task_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<bool, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let delete_result = query("DELETE FROM task WHERE id = $1")
            .bind(task_id)
            .execute(cxn.borrow_connection())
            .await
            .context("trying to remove a task from the database")?;

        Ok(delete_result.rows_affected() > 0)
    }

    async fn set_task_state(
        &self,
        task_id: i32,
        state: TaskState,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Option<Task>, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let updated = query_as::<_, TaskRow>(
            "UPDATE task SET completed = $1, updated_at = now() WHERE id = $2 RETURNING task.*",
        )
        .bind(state.is_completed())
        .bind(task_id)
        .fetch_optional(cxn.borrow_connection())
        .await
        .context("trying to update a task's state in the database")?;

        Ok(updated.map(Task::from))
    }
}
