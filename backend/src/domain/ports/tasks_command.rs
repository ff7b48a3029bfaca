//! Driving port for changing a user's task list.

use async_trait::async_trait;

use crate::domain::{Error, Task, TaskDraft, TaskId, UserId};

/// Domain use-case port for changing tasks.
#[async_trait]
pub trait TasksCommand: Send + Sync {
    /// Add an open task.
    async fn add_task(&self, owner: UserId, draft: &TaskDraft) -> Result<Task, Error>;

    /// Mark an owned task as closed.
    async fn complete_task(&self, owner: UserId, id: TaskId) -> Result<(), Error>;

    /// Remove an owned task.
    async fn delete_task(&self, owner: UserId, id: TaskId) -> Result<(), Error>;
}
