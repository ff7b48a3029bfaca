//! Task list use-cases.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{TaskPersistenceError, TaskRepository, TasksCommand, TasksQuery};
use crate::domain::{Error, Task, TaskDraft, TaskId, TaskList, TaskStatus, UserId};

fn map_task_persistence_error(error: TaskPersistenceError) -> Error {
    match error {
        TaskPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("task repository unavailable: {message}"))
        }
        TaskPersistenceError::Query { message } => {
            Error::internal(format!("task repository error: {message}"))
        }
    }
}

fn task_not_found(id: TaskId) -> Error {
    Error::not_found(format!("task {id} not found"))
}

/// Task service implementing the task driving ports.
#[derive(Clone)]
pub struct TaskService {
    tasks: Arc<dyn TaskRepository>,
}

impl TaskService {
    /// Create a service backed by the given repository.
    pub fn new(tasks: Arc<dyn TaskRepository>) -> Self {
        Self { tasks }
    }
}

#[async_trait]
impl TasksQuery for TaskService {
    async fn list_tasks(&self, owner: UserId) -> Result<TaskList, Error> {
        let tasks = self
            .tasks
            .list_for_owner(owner)
            .await
            .map_err(map_task_persistence_error)?;
        Ok(TaskList::partition(tasks))
    }
}

#[async_trait]
impl TasksCommand for TaskService {
    async fn add_task(&self, owner: UserId, draft: &TaskDraft) -> Result<Task, Error> {
        let task = self
            .tasks
            .insert(owner, draft)
            .await
            .map_err(map_task_persistence_error)?;
        info!(user_id = %owner, task_id = %task.id, "task added");
        Ok(task)
    }

    async fn complete_task(&self, owner: UserId, id: TaskId) -> Result<(), Error> {
        let updated = self
            .tasks
            .set_status(owner, id, TaskStatus::Closed)
            .await
            .map_err(map_task_persistence_error)?;
        if !updated {
            return Err(task_not_found(id));
        }
        info!(user_id = %owner, task_id = %id, "task completed");
        Ok(())
    }

    async fn delete_task(&self, owner: UserId, id: TaskId) -> Result<(), Error> {
        let deleted = self
            .tasks
            .delete(owner, id)
            .await
            .map_err(map_task_persistence_error)?;
        if !deleted {
            return Err(task_not_found(id));
        }
        info!(user_id = %owner, task_id = %id, "task deleted");
        Ok(())
    }
}
