//! Domain primitives, ports, and services.
//!
//! Purpose: define the strongly typed entities shared by the HTTP and
//! persistence adapters, and the use-cases that operate on them. Nothing in
//! this module knows about actix or Diesel.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failures.
//! - User, Username, EmailAddress, PasswordHash: account model.
//! - LoginCredentials, Registration: validated form inputs.
//! - Task, TaskDraft, TaskList: task list model.
//! - AccountService, TaskService: driving port implementations.

mod accounts;
pub mod auth;
pub mod error;
pub mod password;
pub mod ports;
pub mod task;
mod tasks;
mod trace_id;
pub mod user;

pub use self::accounts::{AccountService, DUPLICATE_ACCOUNT_MESSAGE, INVALID_CREDENTIALS_MESSAGE};
pub use self::auth::{
    LoginCredentials, LoginValidationError, Registration, RegistrationValidationError,
};
pub use self::error::{Error, ErrorCode};
pub use self::password::{CredentialHasher, PasswordHash, PasswordHashError};
pub use self::task::{
    PRIORITY_MAX, PRIORITY_MIN, Priority, TASK_NAME_MAX, Task, TaskDraft, TaskId, TaskList,
    TaskStatus, TaskValidationError,
};
pub use self::tasks::TaskService;
pub use self::trace_id::TraceId;
pub use self::user::{EmailAddress, NewUser, User, UserId, UserValidationError, Username};

/// Convenient result alias for handlers and services.
pub type AppResult<T> = Result<T, Error>;
