//! Port abstraction for task persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Task, TaskDraft, TaskId, TaskStatus, UserId};

/// Persistence errors raised by task repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskPersistenceError {
    /// Repository connection could not be established.
    #[error("task repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("task repository query failed: {message}")]
    Query { message: String },
}

impl TaskPersistenceError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Storage for tasks. Every operation is scoped to an owner.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert an open task for `owner`.
    async fn insert(&self, owner: UserId, draft: &TaskDraft) -> Result<Task, TaskPersistenceError>;

    /// Tasks belonging to `owner`, ordered by due date then identifier.
    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Task>, TaskPersistenceError>;

    /// Update the status of an owned task. Returns `false` when no owned task
    /// has that identifier.
    async fn set_status(
        &self,
        owner: UserId,
        id: TaskId,
        status: TaskStatus,
    ) -> Result<bool, TaskPersistenceError>;

    /// Delete an owned task. Returns `false` when no owned task has that
    /// identifier.
    async fn delete(&self, owner: UserId, id: TaskId) -> Result<bool, TaskPersistenceError>;
}
