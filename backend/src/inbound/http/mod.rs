//! HTTP inbound adapter serving the HTML pages.

use actix_web::web;

pub mod error;
pub mod forms;
pub mod health;
pub mod login;
pub mod pages;
pub mod register;
pub mod session;
pub mod session_config;
pub mod state;
pub mod tasks;
#[cfg(test)]
pub mod test_utils;

pub use error::WebResult;

/// Register the login, registration and task routes.
///
/// Handlers expect `web::Data<HttpState>` and a session middleware on the
/// enclosing app.
///
/// # Examples
/// ```
/// use actix_web::App;
///
/// let app = App::new().configure(taskr::inbound::http::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(login::index)
        .service(login::login)
        .service(login::logout)
        .service(register::register_form)
        .service(register::register)
        .service(tasks::list_tasks)
        .service(tasks::add_task)
        .service(tasks::complete_task)
        .service(tasks::delete_task);
}
