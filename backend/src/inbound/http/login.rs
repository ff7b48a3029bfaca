//! Root page, login and logout.
//!
//! ```text
//! GET  /           login form, or the task list once logged in
//! POST /           name=..&password=..
//! GET  /logout/
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, post, web};
use tracing::{debug, info};

use crate::domain::{ErrorCode, INVALID_CREDENTIALS_MESSAGE, LoginCredentials};
use crate::inbound::http::error::WebResult;
use crate::inbound::http::forms::LoginForm;
use crate::inbound::http::pages::{self, LoginView, TaskFormView};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::tasks::render_task_list;

/// Flash queued after a successful login.
pub const WELCOME_MESSAGE: &str = "Welcome!";
/// Flash queued after logout.
pub const GOODBYE_MESSAGE: &str = "Goodbye!";

fn rejected_login(session: &SessionContext, name: &str) -> WebResult<HttpResponse> {
    let flashes = session.take_flashes()?;
    let view = LoginView {
        name,
        error: Some(INVALID_CREDENTIALS_MESSAGE),
    };
    Ok(pages::html(
        StatusCode::UNAUTHORIZED,
        pages::login_page(&flashes, &view),
    ))
}

/// Login prompt for visitors, task list for logged-in users.
#[get("/")]
pub async fn index(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> WebResult<HttpResponse> {
    if let Some(user) = session.current_user()? {
        return render_task_list(&state, &session, &user, &TaskFormView::default(), StatusCode::OK)
            .await;
    }
    let flashes = session.take_flashes()?;
    Ok(pages::html(
        StatusCode::OK,
        pages::login_page(&flashes, &LoginView::default()),
    ))
}

/// Check credentials and start a session.
///
/// Unknown names, wrong passwords and blank fields all produce the same
/// message so the response does not reveal which accounts exist.
#[post("/")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> WebResult<HttpResponse> {
    let credentials = match LoginCredentials::try_from_parts(&form.name, &form.password) {
        Ok(credentials) => credentials,
        Err(err) => {
            debug!(error = %err, "login form rejected");
            return rejected_login(&session, &form.name);
        }
    };

    let user = match state.login.authenticate(&credentials).await {
        Ok(user) => user,
        Err(err) if err.code() == ErrorCode::Unauthorized => {
            return rejected_login(&session, &form.name);
        }
        Err(err) => return Err(err),
    };

    session.persist_user(&user)?;
    session.flash(WELCOME_MESSAGE)?;
    info!(user_id = %user.id(), "user logged in");
    Ok(pages::see_other("/tasks/"))
}

/// End the session and return to the login page.
#[get("/logout/")]
pub async fn logout(session: SessionContext) -> WebResult<HttpResponse> {
    if let Some(user) = session.current_user()? {
        info!(user_id = %user.id, "user logged out");
    }
    session.end();
    session.flash(GOODBYE_MESSAGE)?;
    Ok(pages::see_other("/"))
}
