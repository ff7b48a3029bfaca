//! Shared helpers for backend integration tests.
//!
//! Integration tests compile as separate crates, so the app factory and the
//! cookie-carrying [`Browser`] live here rather than in each test file.

#![allow(dead_code, reason = "each test crate uses a different subset")]

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};

use taskr::Trace;
use taskr::domain::ports::UserRepository;
use taskr::domain::{AccountService, TaskService, User};
use taskr::inbound::http::configure;
use taskr::inbound::http::state::HttpState;
use taskr::outbound::persistence::{DieselTaskRepository, DieselUserRepository};
use taskr::test_support::{
    TestDatabase, fast_hasher, location, session_cookie, test_session_middleware,
};

const MAX_REDIRECTS: usize = 5;

/// Full HTML app over `db`, wired like the server binary.
pub fn app(
    db: &TestDatabase,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody + use<>>,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let users = Arc::new(DieselUserRepository::new(db.pool().clone()));
    let tasks = Arc::new(DieselTaskRepository::new(db.pool().clone()));
    let state = HttpState::from_services(
        AccountService::new(users, fast_hasher()),
        TaskService::new(tasks),
    );

    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .wrap(Trace)
        .configure(configure)
}

/// Every user row currently stored.
pub async fn stored_users(db: &TestDatabase) -> Vec<User> {
    DieselUserRepository::new(db.pool().clone())
        .list()
        .await
        .expect("list users")
}

/// Final response after following redirects.
#[derive(Debug)]
pub struct Page {
    /// Status of the first response, before any redirect was followed.
    pub first_status: StatusCode,
    pub status: StatusCode,
    /// Path of the final request.
    pub path: String,
    pub body: String,
}

impl Page {
    pub fn contains(&self, needle: &str) -> bool {
        self.body.contains(needle)
    }
}

/// Minimal client that keeps the session cookie between requests and follows
/// redirects with `GET`.
#[derive(Default)]
pub struct Browser {
    cookie: Option<Cookie<'static>>,
}

impl Browser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a session cookie is currently held.
    pub fn has_session(&self) -> bool {
        self.cookie.is_some()
    }

    async fn send<S, B>(&mut self, app: &S, request: test::TestRequest) -> ServiceResponse<B>
    where
        S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    {
        let request = match &self.cookie {
            Some(cookie) => request.cookie(cookie.clone()),
            None => request,
        };
        let res = test::call_service(app, request.to_request()).await;
        if let Some(cookie) = session_cookie(&res) {
            self.cookie = (!cookie.value().is_empty()).then_some(cookie);
        }
        res
    }

    async fn follow<S, B>(&mut self, app: &S, first: ServiceResponse<B>, path: &str) -> Page
    where
        S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
        B: MessageBody,
    {
        let first_status = first.status();
        let mut res = first;
        let mut path = path.to_owned();
        for _ in 0..MAX_REDIRECTS {
            if !res.status().is_redirection() {
                break;
            }
            path = location(&res).expect("redirect carries a location");
            res = self
                .send(app, test::TestRequest::get().uri(&path))
                .await;
        }
        let status = res.status();
        let bytes = test::read_body(res).await;
        Page {
            first_status,
            status,
            path,
            body: String::from_utf8(bytes.to_vec()).expect("utf8 body"),
        }
    }

    pub async fn get<S, B>(&mut self, app: &S, uri: &str) -> Page
    where
        S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
        B: MessageBody,
    {
        let res = self.send(app, test::TestRequest::get().uri(uri)).await;
        self.follow(app, res, uri).await
    }

    pub async fn post_form<S, B>(&mut self, app: &S, uri: &str, fields: &[(&str, &str)]) -> Page
    where
        S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
        B: MessageBody,
    {
        let res = self
            .send(app, test::TestRequest::post().uri(uri).set_form(fields))
            .await;
        self.follow(app, res, uri).await
    }

    pub async fn register<S, B>(
        &mut self,
        app: &S,
        name: &str,
        email: &str,
        password: &str,
        confirm: &str,
    ) -> Page
    where
        S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
        B: MessageBody,
    {
        self.post_form(
            app,
            "/register/",
            &[
                ("name", name),
                ("email", email),
                ("password", password),
                ("confirm", confirm),
            ],
        )
        .await
    }

    pub async fn login<S, B>(&mut self, app: &S, name: &str, password: &str) -> Page
    where
        S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
        B: MessageBody,
    {
        self.post_form(app, "/", &[("name", name), ("password", password)])
            .await
    }
}
