//! Driving port for reading a user's task list.

use async_trait::async_trait;

use crate::domain::{Error, TaskList, UserId};

/// Domain use-case port for reading tasks.
#[async_trait]
pub trait TasksQuery: Send + Sync {
    /// Open and closed tasks owned by `owner`.
    async fn list_tasks(&self, owner: UserId) -> Result<TaskList, Error>;
}
