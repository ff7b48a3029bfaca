//! Server-rendered HTML pages.
//!
//! Pages are assembled with `format!` around a shared layout. Every value that
//! originates from a user (names, emails, task names, flash text) passes
//! through [`escape_html`] before it is written.

use std::fmt::Write as _;

use actix_web::HttpResponse;
use actix_web::http::{StatusCode, header};
use chrono::NaiveDate;

use crate::domain::{PRIORITY_MAX, PRIORITY_MIN, Task, TaskList};

use super::session::SessionUser;

/// Prompt shown above the login form.
pub const LOGIN_PROMPT: &str = "Please log in to access your task list";
/// Prompt shown above the registration form.
pub const REGISTER_PROMPT: &str = "Please register to access the task list.";

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Escape text for inclusion in HTML element content or a quoted attribute.
///
/// # Examples
/// ```
/// use taskr::inbound::http::pages::escape_html;
///
/// assert_eq!(
///     escape_html(r#"alert("alert box!");"#),
///     "alert(&quot;alert box!&quot;);"
/// );
/// ```
#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Wrap a rendered page in an HTML response.
pub fn html(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .insert_header((header::CONTENT_TYPE, HTML_CONTENT_TYPE))
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .body(body)
}

/// `303 See Other` to `location`.
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn layout(title: &str, user: Option<&SessionUser>, flashes: &[String], content: &str) -> String {
    let mut nav = String::new();
    match user {
        Some(user) => {
            let _ = write!(
                nav,
                r#"<p class="user">Logged in as {}. <a href="/logout/">Signout</a></p>"#,
                escape_html(&user.name)
            );
        }
        None => nav.push_str(r#"<p class="user"><a href="/register/">Register</a></p>"#),
    }

    let mut messages = String::new();
    for flash in flashes {
        let _ = write!(messages, r#"<div class="flash">{}</div>"#, escape_html(flash));
    }

    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html lang=\"en\">\n",
            "<head><meta charset=\"utf-8\"><title>{title}</title></head>\n",
            "<body>\n",
            "<header><h1>Taskr</h1>{nav}</header>\n",
            "{messages}\n",
            "<main>\n{content}\n</main>\n",
            "</body>\n",
            "</html>\n"
        ),
        title = escape_html(title),
        nav = nav,
        messages = messages,
        content = content,
    )
}

fn error_block(error: Option<&str>) -> String {
    error
        .map(|message| format!(r#"<div class="error">{}</div>"#, escape_html(message)))
        .unwrap_or_default()
}

/// Values echoed back into the login form.
#[derive(Debug, Default)]
pub struct LoginView<'a> {
    /// Previously submitted name.
    pub name: &'a str,
    /// Message explaining why the last attempt failed.
    pub error: Option<&'a str>,
}

/// Login page served at `/` for anonymous visitors.
pub fn login_page(flashes: &[String], view: &LoginView<'_>) -> String {
    let content = format!(
        concat!(
            "<h2>{prompt}</h2>\n",
            "{error}\n",
            "<form method=\"post\" action=\"/\">\n",
            "<label>Username <input type=\"text\" name=\"name\" value=\"{name}\"></label>\n",
            "<label>Password <input type=\"password\" name=\"password\"></label>\n",
            "<button type=\"submit\">Sign in</button>\n",
            "</form>\n",
            "<p>Need an account? <a href=\"/register/\">Signup!</a></p>"
        ),
        prompt = LOGIN_PROMPT,
        error = error_block(view.error),
        name = escape_html(view.name),
    );
    layout("Welcome", None, flashes, &content)
}

/// Values echoed back into the registration form.
#[derive(Debug, Default)]
pub struct RegisterView<'a> {
    /// Previously submitted name.
    pub name: &'a str,
    /// Previously submitted email.
    pub email: &'a str,
    /// Message explaining why the last attempt failed.
    pub error: Option<&'a str>,
}

/// Registration page served at `/register/`.
pub fn register_page(
    user: Option<&SessionUser>,
    flashes: &[String],
    view: &RegisterView<'_>,
) -> String {
    let content = format!(
        concat!(
            "<h2>{prompt}</h2>\n",
            "{error}\n",
            "<form method=\"post\" action=\"/register/\">\n",
            "<label>Username <input type=\"text\" name=\"name\" value=\"{name}\"></label>\n",
            "<label>Email <input type=\"email\" name=\"email\" value=\"{email}\"></label>\n",
            "<label>Password <input type=\"password\" name=\"password\"></label>\n",
            "<label>Repeat Password <input type=\"password\" name=\"confirm\"></label>\n",
            "<button type=\"submit\">Register</button>\n",
            "</form>\n",
            "<p>Already registered? <a href=\"/\">Click here to login.</a></p>"
        ),
        prompt = REGISTER_PROMPT,
        error = error_block(view.error),
        name = escape_html(view.name),
        email = escape_html(view.email),
    );
    layout("Register", user, flashes, &content)
}

/// Values echoed back into the add-task form.
#[derive(Debug, Default)]
pub struct TaskFormView<'a> {
    /// Previously submitted task name.
    pub name: &'a str,
    /// Previously submitted due date.
    pub due_date: &'a str,
    /// Previously submitted priority.
    pub priority: &'a str,
    /// Message explaining why the last submission failed.
    pub error: Option<&'a str>,
}

fn format_due_date(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

fn open_task_rows(tasks: &[Task]) -> String {
    let mut rows = String::new();
    for task in tasks {
        let _ = write!(
            rows,
            concat!(
                "<tr><td>{name}</td><td>{due}</td><td>{priority}</td>",
                "<td><a href=\"/delete/{id}/\">Delete</a> ",
                "<a href=\"/complete/{id}/\">Mark as Complete</a></td></tr>\n"
            ),
            name = escape_html(&task.name),
            due = format_due_date(task.due_date),
            priority = task.priority.get(),
            id = task.id,
        );
    }
    rows
}

fn closed_task_rows(tasks: &[Task]) -> String {
    let mut rows = String::new();
    for task in tasks {
        let _ = write!(
            rows,
            concat!(
                "<tr><td>{name}</td><td>{due}</td><td>{priority}</td>",
                "<td><a href=\"/delete/{id}/\">Delete</a></td></tr>\n"
            ),
            name = escape_html(&task.name),
            due = format_due_date(task.due_date),
            priority = task.priority.get(),
            id = task.id,
        );
    }
    rows
}

fn priority_options(selected: &str) -> String {
    let mut options = String::new();
    for value in PRIORITY_MIN..=PRIORITY_MAX {
        let marker = if selected == value.to_string() {
            " selected"
        } else {
            ""
        };
        let _ = write!(options, r#"<option value="{value}"{marker}>{value}</option>"#);
    }
    options
}

/// Task list page served at `/tasks/` (and `/` once logged in).
pub fn tasks_page(
    user: &SessionUser,
    flashes: &[String],
    list: &TaskList,
    form: &TaskFormView<'_>,
) -> String {
    let content = format!(
        concat!(
            "<h2>Add a new task:</h2>\n",
            "{error}\n",
            "<form method=\"post\" action=\"/add/\">\n",
            "<label>Task Name <input type=\"text\" name=\"name\" value=\"{name}\"></label>\n",
            "<label>Due Date (mm/dd/yyyy) ",
            "<input type=\"text\" name=\"due_date\" value=\"{due_date}\"></label>\n",
            "<label>Priority <select name=\"priority\">{priorities}</select></label>\n",
            "<button type=\"submit\">Save</button>\n",
            "</form>\n",
            "<h2>Open tasks:</h2>\n",
            "<table class=\"open\">\n",
            "<tr><th>Task Name</th><th>Due Date</th><th>Priority</th><th>Actions</th></tr>\n",
            "{open}",
            "</table>\n",
            "<h2>Closed tasks:</h2>\n",
            "<table class=\"closed\">\n",
            "<tr><th>Task Name</th><th>Due Date</th><th>Priority</th><th>Actions</th></tr>\n",
            "{closed}",
            "</table>"
        ),
        error = error_block(form.error),
        name = escape_html(form.name),
        due_date = escape_html(form.due_date),
        priorities = priority_options(form.priority),
        open = open_task_rows(&list.open),
        closed = closed_task_rows(&list.closed),
    );
    layout("Tasks", Some(user), flashes, &content)
}

/// Standalone page for failures that end a request.
pub fn error_page(status: StatusCode, message: &str, trace_id: Option<&str>) -> String {
    let reason = status.canonical_reason().unwrap_or("Error");
    let reference = trace_id
        .map(|id| format!(r#"<p class="trace">Reference: {}</p>"#, escape_html(id)))
        .unwrap_or_default();
    let content = format!(
        "<h2>{code} {reason}</h2>\n<p>{message}</p>\n{reference}\n<p><a href=\"/\">Back</a></p>",
        code = status.as_u16(),
        reason = escape_html(reason),
        message = escape_html(message),
    );
    layout(reason, None, &[], &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Priority, TaskId, TaskStatus, UserId};
    use rstest::rstest;

    fn user() -> SessionUser {
        SessionUser {
            id: UserId::new(1),
            name: "Michael".to_owned(),
        }
    }

    fn task(id: i32, name: &str, status: TaskStatus) -> Task {
        Task {
            id: TaskId::new(id),
            name: name.to_owned(),
            due_date: NaiveDate::from_ymd_opt(2025, 3, 15).expect("valid date"),
            priority: Priority::new(3).expect("valid priority"),
            status,
            owner: UserId::new(1),
        }
    }

    #[rstest]
    #[case("plain", "plain")]
    #[case("<script>", "&lt;script&gt;")]
    #[case("a & b", "a &amp; b")]
    #[case("it's", "it&#x27;s")]
    fn escapes_markup(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(escape_html(raw), expected);
    }

    #[test]
    fn login_page_escapes_echoed_name() {
        let page = login_page(
            &[],
            &LoginView {
                name: r#"alert("alert box!");"#,
                error: Some("Invalid username or password."),
            },
        );
        assert!(page.contains(LOGIN_PROMPT));
        assert!(page.contains("Invalid username or password."));
        assert!(page.contains("alert(&quot;alert box!&quot;);"));
        assert!(!page.contains(r#"alert("alert box!")"#));
    }

    #[test]
    fn flashes_are_rendered_escaped() {
        let page = login_page(&["<b>Welcome!</b>".to_owned()], &LoginView::default());
        assert!(page.contains("&lt;b&gt;Welcome!&lt;/b&gt;"));
    }

    #[test]
    fn register_page_has_prompt_and_fields() {
        let page = register_page(None, &[], &RegisterView::default());
        assert!(page.contains(REGISTER_PROMPT));
        for field in ["name", "email", "password", "confirm"] {
            assert!(page.contains(&format!(r#"name="{field}""#)), "missing {field}");
        }
    }

    #[test]
    fn tasks_page_splits_tables_and_links_actions() {
        let list = TaskList {
            open: vec![task(1, "<open>", TaskStatus::Open)],
            closed: vec![task(2, "done", TaskStatus::Closed)],
        };
        let page = tasks_page(&user(), &[], &list, &TaskFormView::default());
        assert!(page.contains("&lt;open&gt;"));
        assert!(page.contains(r#"href="/complete/1/""#));
        assert!(page.contains(r#"href="/delete/2/""#));
        assert!(!page.contains(r#"href="/complete/2/""#));
        assert!(page.contains("03/15/2025"));
        assert!(page.contains("Logged in as Michael"));
    }

    #[test]
    fn priority_selection_is_preserved() {
        let options = priority_options("7");
        assert!(options.contains(r#"<option value="7" selected>7</option>"#));
        assert!(options.contains(r#"<option value="1">1</option>"#));
    }

    #[test]
    fn error_page_shows_reference() {
        let page = error_page(StatusCode::NOT_FOUND, "task 9 not found", Some("abc"));
        assert!(page.contains("404 Not Found"));
        assert!(page.contains("Reference: abc"));
    }
}
