//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports ([`UserRepository`], [`TaskRepository`]) describe what the
//! domain needs from storage and expose strongly typed errors so adapters map
//! their failures into predictable variants. Driving ports
//! ([`LoginService`], [`RegistrationService`], [`TasksQuery`],
//! [`TasksCommand`]) are what inbound adapters call; handler tests substitute
//! doubles for them without wiring persistence.

mod login_service;
mod registration_service;
mod task_repository;
mod tasks_command;
mod tasks_query;
mod user_repository;

pub use login_service::LoginService;
pub use registration_service::RegistrationService;
pub use task_repository::{TaskPersistenceError, TaskRepository};
pub use tasks_command::TasksCommand;
pub use tasks_query::TasksQuery;
pub use user_repository::{UserPersistenceError, UserRepository};
