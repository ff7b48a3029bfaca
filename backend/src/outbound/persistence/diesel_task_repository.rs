//! SQLite-backed `TaskRepository` implementation using Diesel ORM.
//!
//! Every statement filters on `user_id`, so one user can never read or change
//! another user's tasks even with a guessed identifier.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{TaskPersistenceError, TaskRepository};
use crate::domain::{Priority, Task, TaskDraft, TaskId, TaskStatus, UserId};

use super::diesel_basic_error_mapping::{
    DieselFailure, classify_diesel_error, map_basic_pool_error,
};
use super::models::{NewTaskRow, TaskRow};
use super::pool::{DbPool, PoolError};
use super::schema::tasks;

diesel::define_sql_function! {
    /// Rowid of the most recent insert on this connection.
    fn last_insert_rowid() -> Integer;
}

/// Diesel-backed implementation of the `TaskRepository` port.
#[derive(Clone)]
pub struct DieselTaskRepository {
    pool: DbPool,
}

impl DieselTaskRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TaskPersistenceError {
    map_basic_pool_error(error, TaskPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> TaskPersistenceError {
    match classify_diesel_error(&error) {
        DieselFailure::Connection(message) => TaskPersistenceError::connection(message),
        DieselFailure::UniqueViolation => {
            TaskPersistenceError::query("unexpected unique violation")
        }
        DieselFailure::Query(message) => TaskPersistenceError::query(message),
    }
}

/// Convert a database row to a domain task.
fn row_to_task(row: TaskRow) -> Task {
    let priority = Priority::new(row.priority).unwrap_or_else(|_| {
        warn!(
            task_id = row.task_id,
            value = row.priority,
            "stored priority out of range, clamping"
        );
        Priority::saturating(row.priority)
    });

    Task {
        id: TaskId::new(row.task_id),
        name: row.name,
        due_date: row.due_date,
        priority,
        status: TaskStatus::from_flag(row.status),
        owner: UserId::new(row.user_id),
    }
}

#[async_trait]
impl TaskRepository for DieselTaskRepository {
    async fn insert(&self, owner: UserId, draft: &TaskDraft) -> Result<Task, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewTaskRow {
            name: draft.name(),
            due_date: draft.due_date(),
            priority: draft.priority().get(),
            status: TaskStatus::Open.as_flag(),
            user_id: owner.get(),
        };

        diesel::insert_into(tasks::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let task_id: i32 = diesel::select(last_insert_rowid())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(Task {
            id: TaskId::new(task_id),
            name: draft.name().to_owned(),
            due_date: draft.due_date(),
            priority: draft.priority(),
            status: TaskStatus::Open,
            owner,
        })
    }

    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Task>, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = tasks::table
            .filter(tasks::user_id.eq(owner.get()))
            .order((tasks::due_date.asc(), tasks::task_id.asc()))
            .select(TaskRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_task).collect())
    }

    async fn set_status(
        &self,
        owner: UserId,
        id: TaskId,
        status: TaskStatus,
    ) -> Result<bool, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(
            tasks::table
                .filter(tasks::task_id.eq(id.get()))
                .filter(tasks::user_id.eq(owner.get())),
        )
        .set(tasks::status.eq(status.as_flag()))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(updated > 0)
    }

    async fn delete(&self, owner: UserId, id: TaskId) -> Result<bool, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(
            tasks::table
                .filter(tasks::task_id.eq(id.get()))
                .filter(tasks::user_id.eq(owner.get())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn row(priority: i32, status: i32) -> TaskRow {
        TaskRow {
            task_id: 3,
            name: "Write tests".to_owned(),
            due_date: NaiveDate::from_ymd_opt(2025, 3, 15).expect("valid date"),
            priority,
            status,
            user_id: 9,
        }
    }

    #[rstest]
    #[case(1, TaskStatus::Open)]
    #[case(0, TaskStatus::Closed)]
    fn row_converts_status_flag(#[case] flag: i32, #[case] expected: TaskStatus) {
        let task = row_to_task(row(4, flag));
        assert_eq!(task.status, expected);
        assert_eq!(task.owner, UserId::new(9));
        assert_eq!(task.priority.get(), 4);
    }

    #[rstest]
    #[case(0, 1)]
    #[case(42, 10)]
    fn out_of_range_priority_is_clamped(#[case] stored: i32, #[case] expected: i32) {
        let task = row_to_task(row(stored, 1));
        assert_eq!(task.priority.get(), expected);
    }
}
