//! Task list handlers.
//!
//! ```text
//! GET  /tasks/
//! POST /add/            name=..&due_date=..&priority=..
//! GET  /complete/{id}/
//! GET  /delete/{id}/
//! ```
//!
//! Every route requires a logged-in session; anonymous visitors are sent back
//! to the login page with a flash.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, post, web};
use tracing::debug;

use crate::domain::{Error, TaskDraft, TaskId};
use crate::inbound::http::error::WebResult;
use crate::inbound::http::forms::TaskForm;
use crate::inbound::http::pages::{self, TaskFormView};
use crate::inbound::http::session::{SessionContext, SessionUser};
use crate::inbound::http::state::HttpState;

/// Flash shown when an anonymous visitor hits a task route.
pub const LOGIN_REQUIRED_MESSAGE: &str = "You need to login first.";
/// Flash shown after a task is stored.
pub const TASK_ADDED_MESSAGE: &str = "New entry was successfully posted. Thanks.";
/// Flash shown after a task is closed.
pub const TASK_COMPLETED_MESSAGE: &str = "The task was marked as complete.";
/// Flash shown after a task is removed.
pub const TASK_DELETED_MESSAGE: &str = "The task was deleted.";

const TASKS_PATH: &str = "/tasks/";

fn login_first(session: &SessionContext) -> WebResult<HttpResponse> {
    session.flash(LOGIN_REQUIRED_MESSAGE)?;
    Ok(pages::see_other("/"))
}

/// Parse a task id path segment. Anything that is not an id names no task.
fn parse_task_id(raw: &str) -> WebResult<TaskId> {
    raw.parse::<i32>()
        .map(TaskId::new)
        .map_err(|_| Error::not_found(format!("task {raw} not found")))
}

/// Render the task list for `user`, draining pending flashes.
pub(super) async fn render_task_list(
    state: &HttpState,
    session: &SessionContext,
    user: &SessionUser,
    form: &TaskFormView<'_>,
    status: StatusCode,
) -> WebResult<HttpResponse> {
    let list = state.tasks.list_tasks(user.id).await?;
    let flashes = session.take_flashes()?;
    Ok(pages::html(
        status,
        pages::tasks_page(user, &flashes, &list, form),
    ))
}

/// Show open and closed tasks with the add form.
#[get("/tasks/")]
pub async fn list_tasks(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> WebResult<HttpResponse> {
    let Some(user) = session.current_user()? else {
        return login_first(&session);
    };
    render_task_list(&state, &session, &user, &TaskFormView::default(), StatusCode::OK).await
}

/// Validate and store a new open task.
#[post("/add/")]
pub async fn add_task(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<TaskForm>,
) -> WebResult<HttpResponse> {
    let Some(user) = session.current_user()? else {
        return login_first(&session);
    };

    let draft = match TaskDraft::try_from_parts(&form.name, &form.due_date, &form.priority) {
        Ok(draft) => draft,
        Err(err) => {
            debug!(user_id = %user.id, error = %err, "task form rejected");
            let message = err.to_string();
            let view = TaskFormView {
                name: &form.name,
                due_date: &form.due_date,
                priority: &form.priority,
                error: Some(&message),
            };
            return render_task_list(&state, &session, &user, &view, StatusCode::BAD_REQUEST)
                .await;
        }
    };

    state.task_commands.add_task(user.id, &draft).await?;
    session.flash(TASK_ADDED_MESSAGE)?;
    Ok(pages::see_other(TASKS_PATH))
}

/// Close an owned task.
#[get("/complete/{task_id}/")]
pub async fn complete_task(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> WebResult<HttpResponse> {
    let Some(user) = session.current_user()? else {
        return login_first(&session);
    };
    state
        .task_commands
        .complete_task(user.id, parse_task_id(&path)?)
        .await?;
    session.flash(TASK_COMPLETED_MESSAGE)?;
    Ok(pages::see_other(TASKS_PATH))
}

/// Remove an owned task.
#[get("/delete/{task_id}/")]
pub async fn delete_task(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> WebResult<HttpResponse> {
    let Some(user) = session.current_user()? else {
        return login_first(&session);
    };
    state
        .task_commands
        .delete_task(user.id, parse_task_id(&path)?)
        .await?;
    session.flash(TASK_DELETED_MESSAGE)?;
    Ok(pages::see_other(TASKS_PATH))
}
