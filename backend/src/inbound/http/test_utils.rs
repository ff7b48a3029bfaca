//! Test helpers for inbound HTTP components: in-memory services and an app
//! factory wired like the real server.

use std::sync::{Arc, Mutex};

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test, web};
use async_trait::async_trait;

use crate::domain::ports::{LoginService, RegistrationService, TasksCommand, TasksQuery};
use crate::domain::{
    DUPLICATE_ACCOUNT_MESSAGE, EmailAddress, Error, INVALID_CREDENTIALS_MESSAGE,
    LoginCredentials, PasswordHash, Priority, Registration, Task, TaskDraft, TaskId, TaskList,
    TaskStatus, User, UserId, Username,
};
use crate::inbound::http::state::HttpState;

pub use crate::test_support::{location, session_cookie, test_session_middleware};

pub const STUB_USER_ID: UserId = UserId::new(1);
pub const STUB_USER_NAME: &str = "Michael";
pub const STUB_PASSWORD: &str = "python";

fn stub_user() -> User {
    User::new(
        STUB_USER_ID,
        Username::new(STUB_USER_NAME).expect("valid name"),
        EmailAddress::new("michael@realpython.pl").expect("valid email"),
        PasswordHash::from_phc("$argon2id$stub"),
    )
}

/// Accepts one fixed account; every other name or password is rejected.
pub struct StubAccounts;

#[async_trait]
impl LoginService for StubAccounts {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        if credentials.username().as_ref() == STUB_USER_NAME
            && credentials.password() == STUB_PASSWORD
        {
            Ok(stub_user())
        } else {
            Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE))
        }
    }
}

#[async_trait]
impl RegistrationService for StubAccounts {
    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        if registration.name().as_ref() == STUB_USER_NAME {
            return Err(Error::conflict(DUPLICATE_ACCOUNT_MESSAGE));
        }
        Ok(User::new(
            UserId::new(2),
            registration.name().clone(),
            registration.email().clone(),
            PasswordHash::from_phc("$argon2id$stub"),
        ))
    }
}

/// Task store held in a `Vec`, scoped by owner like the real repository.
#[derive(Default)]
pub struct StubTasks {
    tasks: Mutex<Vec<Task>>,
}

impl StubTasks {
    pub const OTHER_USER_ID: UserId = UserId::new(99);

    fn next_id(tasks: &[Task]) -> TaskId {
        TaskId::new(tasks.iter().map(|t| t.id.get()).max().unwrap_or(0) + 1)
    }

    /// Insert an open task directly, bypassing validation.
    pub fn seed_open(&self, owner: UserId, name: &str) -> TaskId {
        let mut tasks = self.tasks.lock().expect("tasks lock");
        let id = Self::next_id(&tasks);
        tasks.push(Task {
            id,
            name: name.to_owned(),
            due_date: chrono::NaiveDate::from_ymd_opt(2030, 1, 1).expect("valid date"),
            priority: Priority::new(5).expect("valid priority"),
            status: TaskStatus::Open,
            owner,
        });
        id
    }

    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.lock().expect("tasks lock").clone()
    }
}

#[async_trait]
impl TasksQuery for StubTasks {
    async fn list_tasks(&self, owner: UserId) -> Result<TaskList, Error> {
        let owned = self
            .snapshot()
            .into_iter()
            .filter(|task| task.owner == owner)
            .collect();
        Ok(TaskList::partition(owned))
    }
}

#[async_trait]
impl TasksCommand for StubTasks {
    async fn add_task(&self, owner: UserId, draft: &TaskDraft) -> Result<Task, Error> {
        let mut tasks = self.tasks.lock().expect("tasks lock");
        let task = Task {
            id: Self::next_id(&tasks),
            name: draft.name().to_owned(),
            due_date: draft.due_date(),
            priority: draft.priority(),
            status: TaskStatus::Open,
            owner,
        };
        tasks.push(task.clone());
        Ok(task)
    }

    async fn complete_task(&self, owner: UserId, id: TaskId) -> Result<(), Error> {
        let mut tasks = self.tasks.lock().expect("tasks lock");
        let task = tasks
            .iter_mut()
            .find(|task| task.id == id && task.owner == owner)
            .ok_or_else(|| Error::not_found(format!("task {id} not found")))?;
        task.status = TaskStatus::Closed;
        Ok(())
    }

    async fn delete_task(&self, owner: UserId, id: TaskId) -> Result<(), Error> {
        let mut tasks = self.tasks.lock().expect("tasks lock");
        let before = tasks.len();
        tasks.retain(|task| !(task.id == id && task.owner == owner));
        if tasks.len() == before {
            return Err(Error::not_found(format!("task {id} not found")));
        }
        Ok(())
    }
}

/// Handler state over the stubs; the task stub is returned for inspection.
pub fn stub_state() -> (HttpState, Arc<StubTasks>) {
    let accounts = Arc::new(StubAccounts);
    let tasks = Arc::new(StubTasks::default());
    let state = HttpState {
        login: accounts.clone(),
        registration: accounts,
        tasks: tasks.clone(),
        task_commands: tasks.clone(),
    };
    (state, tasks)
}

/// App with every HTML route and a test session middleware.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .configure(super::configure)
}

/// Log in as the stub account and return the session cookie.
pub async fn logged_in_cookie<S, B>(app: &S) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/")
            .set_form([("name", STUB_USER_NAME), ("password", STUB_PASSWORD)])
            .to_request(),
    )
    .await;
    session_cookie(&res).expect("login sets a session cookie")
}

/// Read a response body as UTF-8.
pub async fn body_text<B>(res: ServiceResponse<B>) -> String
where
    B: MessageBody,
{
    let bytes = test::read_body(res).await;
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}
