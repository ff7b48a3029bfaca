//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations: remembering the logged-in user, reading it
//! back, one-shot flash messages, and ending the session.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, User, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const USER_NAME_KEY: &str = "user_name";
pub(crate) const FLASHES_KEY: &str = "flashes";

/// Identity of the logged-in user as remembered by the session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    /// Store identifier.
    pub id: UserId,
    /// Login name, shown in the page header.
    pub name: String,
}

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

fn session_read_error(error: impl std::fmt::Display) -> Error {
    Error::internal(format!("failed to read session: {error}"))
}

fn session_write_error(error: impl std::fmt::Display) -> Error {
    Error::internal(format!("failed to persist session: {error}"))
}

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Remember `user` as logged in.
    ///
    /// The session identifier is renewed first so a cookie captured before
    /// login cannot be replayed afterwards.
    pub fn persist_user(&self, user: &User) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user.id().get())
            .map_err(session_write_error)?;
        self.0
            .insert(USER_NAME_KEY, user.name().as_ref())
            .map_err(session_write_error)
    }

    /// Fetch the logged-in user, if any.
    ///
    /// A half-written or tampered session is treated as anonymous.
    pub fn current_user(&self) -> Result<Option<SessionUser>, Error> {
        let id = self
            .0
            .get::<i32>(USER_ID_KEY)
            .map_err(session_read_error)?;
        let name = self
            .0
            .get::<String>(USER_NAME_KEY)
            .map_err(session_read_error)?;
        match (id, name) {
            (Some(id), Some(name)) => Ok(Some(SessionUser {
                id: UserId::new(id),
                name,
            })),
            (None, None) => Ok(None),
            _ => {
                warn!("incomplete user identity in session cookie");
                Ok(None)
            }
        }
    }

    /// Queue a message for the next rendered page.
    pub fn flash(&self, message: impl Into<String>) -> Result<(), Error> {
        let mut queued = self.peek_flashes()?;
        queued.push(message.into());
        self.0
            .insert(FLASHES_KEY, queued)
            .map_err(session_write_error)
    }

    /// Drain queued flash messages, oldest first.
    pub fn take_flashes(&self) -> Result<Vec<String>, Error> {
        let queued = self.peek_flashes()?;
        if !queued.is_empty() {
            self.0.remove(FLASHES_KEY);
        }
        Ok(queued)
    }

    fn peek_flashes(&self) -> Result<Vec<String>, Error> {
        Ok(self
            .0
            .get::<Vec<String>>(FLASHES_KEY)
            .map_err(session_read_error)?
            .unwrap_or_default())
    }

    /// Forget the logged-in user and everything else in the session.
    ///
    /// The session is cleared and renewed rather than purged so a flash
    /// queued afterwards still reaches the next page.
    pub fn end(&self) {
        self.0.clear();
        self.0.renew();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
