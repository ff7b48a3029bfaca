//! Account registration.
//!
//! ```text
//! GET  /register/
//! POST /register/   name=..&email=..&password=..&confirm=..
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, post, web};
use tracing::debug;

use crate::domain::{ErrorCode, Registration};
use crate::inbound::http::error::WebResult;
use crate::inbound::http::forms::RegisterForm;
use crate::inbound::http::pages::{self, RegisterView};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Flash queued after a successful registration.
pub const REGISTERED_MESSAGE: &str = "Thanks for registering. Please login.";

fn rerender(
    session: &SessionContext,
    form: &RegisterForm,
    status: StatusCode,
    error: &str,
) -> WebResult<HttpResponse> {
    let user = session.current_user()?;
    let flashes = session.take_flashes()?;
    let view = RegisterView {
        name: &form.name,
        email: &form.email,
        error: Some(error),
    };
    Ok(pages::html(
        status,
        pages::register_page(user.as_ref(), &flashes, &view),
    ))
}

/// Registration form.
#[get("/register/")]
pub async fn register_form(session: SessionContext) -> WebResult<HttpResponse> {
    let user = session.current_user()?;
    let flashes = session.take_flashes()?;
    Ok(pages::html(
        StatusCode::OK,
        pages::register_page(user.as_ref(), &flashes, &RegisterView::default()),
    ))
}

/// Create an account and send the visitor to the login page.
#[post("/register/")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<RegisterForm>,
) -> WebResult<HttpResponse> {
    let registration = match Registration::try_from_parts(
        &form.name,
        &form.email,
        &form.password,
        &form.confirm,
    ) {
        Ok(registration) => registration,
        Err(err) => {
            debug!(error = %err, "registration form rejected");
            return rerender(&session, &form, StatusCode::BAD_REQUEST, &err.to_string());
        }
    };

    if let Err(err) = state.registration.register(&registration).await {
        if err.code() == ErrorCode::Conflict {
            return rerender(&session, &form, StatusCode::CONFLICT, err.message());
        }
        return Err(err);
    }

    session.flash(REGISTERED_MESSAGE)?;
    Ok(pages::see_other("/"))
}
