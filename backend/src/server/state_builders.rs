//! Wiring of repositories and domain services into handler state.

use std::sync::Arc;

use actix_web::web;
use taskr::domain::{AccountService, TaskService};
use taskr::inbound::http::state::HttpState;
use taskr::outbound::persistence::{DieselTaskRepository, DieselUserRepository};

use super::ServerConfig;

/// Build the shared handler state over the configured database pool.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let users = Arc::new(DieselUserRepository::new(config.db_pool.clone()));
    let tasks = Arc::new(DieselTaskRepository::new(config.db_pool.clone()));
    let accounts = AccountService::new(users, config.hasher.clone());
    web::Data::new(HttpState::from_services(accounts, TaskService::new(tasks)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::{Key, SameSite};
    use taskr::domain::{ErrorCode, LoginCredentials, Registration};
    use taskr::test_support::{TestDatabase, fast_hasher};

    async fn state_over(db: &TestDatabase) -> web::Data<HttpState> {
        let config = ServerConfig::new(
            Key::generate(),
            false,
            SameSite::Lax,
            "127.0.0.1:0".parse().expect("socket addr"),
            db.pool().clone(),
        )
        .with_hasher(fast_hasher());
        build_http_state(&config)
    }

    #[tokio::test]
    async fn wired_services_share_one_store() {
        let db = TestDatabase::new().await.expect("test database");
        let state = state_over(&db).await;

        let registration =
            Registration::try_from_parts("Michael", "michael@realpython.pl", "python", "python")
                .expect("valid registration");
        let created = state
            .registration
            .register(&registration)
            .await
            .expect("register");

        let credentials = LoginCredentials::try_from_parts("Michael", "python").expect("creds");
        let user = state.login.authenticate(&credentials).await.expect("login");
        assert_eq!(user.id(), created.id());

        let list = state.tasks.list_tasks(user.id()).await.expect("list");
        assert!(list.open.is_empty() && list.closed.is_empty());
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorised() {
        let db = TestDatabase::new().await.expect("test database");
        let state = state_over(&db).await;
        let registration =
            Registration::try_from_parts("Michael", "michael@realpython.pl", "python", "python")
                .expect("valid registration");
        state
            .registration
            .register(&registration)
            .await
            .expect("register");

        let credentials = LoginCredentials::try_from_parts("Michael", "foo").expect("creds");
        let err = state
            .login
            .authenticate(&credentials)
            .await
            .expect_err("wrong password");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }
}
