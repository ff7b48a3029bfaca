//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{LoginService, RegistrationService, TasksCommand, TasksQuery};
use crate::domain::{AccountService, TaskService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Credential check for `POST /`.
    pub login: Arc<dyn LoginService>,
    /// Account creation for `POST /register/`.
    pub registration: Arc<dyn RegistrationService>,
    /// Task list reads.
    pub tasks: Arc<dyn TasksQuery>,
    /// Task list changes.
    pub task_commands: Arc<dyn TasksCommand>,
}

impl HttpState {
    /// Wire state from the two domain services.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use taskr::domain::{AccountService, CredentialHasher, TaskService};
    /// use taskr::inbound::http::state::HttpState;
    /// use taskr::outbound::persistence::{
    ///     DbPool, DieselTaskRepository, DieselUserRepository, PoolConfig,
    /// };
    ///
    /// # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("taskr.db")).await?;
    /// let accounts = AccountService::new(
    ///     Arc::new(DieselUserRepository::new(pool.clone())),
    ///     CredentialHasher::default(),
    /// );
    /// let tasks = TaskService::new(Arc::new(DieselTaskRepository::new(pool)));
    /// let state = HttpState::from_services(accounts, tasks);
    /// let _login = state.login.clone();
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_services(accounts: AccountService, tasks: TaskService) -> Self {
        let accounts = Arc::new(accounts);
        let tasks = Arc::new(tasks);
        Self {
            login: accounts.clone(),
            registration: accounts,
            tasks: tasks.clone(),
            task_commands: tasks,
        }
    }
}
